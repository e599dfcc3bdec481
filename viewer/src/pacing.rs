#[cfg(test)]
#[path = "pacing_test.rs"]
mod pacing_test;

use std::collections::VecDeque;
use std::time::Duration;

use crate::consts::{FRAME_HISTORY_LEN, FRAME_HISTORY_SEED_MS};

/// Fixed-interval frame pacing and a rolling FPS average.
///
/// A frame that finishes inside its budget is followed by a sleep for the
/// rest of the budget; a frame that overran is followed immediately.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    /// Milliseconds between consecutive frame starts, oldest first.
    deltas: VecDeque<f64>,
    last_frame_ms: Option<f64>,
}

impl FramePacer {
    /// Pace to `frame_rate` frames per second. The interval is the whole
    /// number of milliseconds `1000 / frame_rate`, so 60 gives 16 ms.
    #[must_use]
    pub fn new(frame_rate: u32) -> Self {
        let interval = Duration::from_millis(u64::from(1000 / frame_rate.max(1)));
        Self {
            interval,
            deltas: std::iter::repeat_n(FRAME_HISTORY_SEED_MS, FRAME_HISTORY_LEN).collect(),
            last_frame_ms: None,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Record the start of a frame at `now_ms`.
    pub fn frame_started(&mut self, now_ms: f64) {
        if let Some(last) = self.last_frame_ms {
            let delta = now_ms - last;
            if delta.is_finite() && delta >= 0.0 {
                self.deltas.pop_front();
                self.deltas.push_back(delta);
            }
        }
        self.last_frame_ms = Some(now_ms);
    }

    /// Average frames per second over the recorded history, rounded down.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn fps(&self) -> u32 {
        let mean = self.deltas.iter().sum::<f64>() / self.deltas.len() as f64;
        if mean <= 0.0 {
            return 0;
        }
        (1000.0 / mean).floor() as u32
    }

    /// How long to wait before the next frame, given how long this one took.
    #[must_use]
    pub fn next_delay(&self, elapsed: Duration) -> Duration {
        self.interval.saturating_sub(elapsed)
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_FRAME_RATE)
    }
}
