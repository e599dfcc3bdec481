//! Scripted input replay.
//!
//! A script is a JSON array of events, each tagged by `type`:
//!
//! ```json
//! [
//!   {"type": "resize", "width": 800, "height": 600},
//!   {"type": "pointer_down", "x": 15, "y": 15, "modifiers": {"ctrl": true}},
//!   {"type": "pointer_move", "x": 9, "y": 15, "modifiers": {"ctrl": true}},
//!   {"type": "frame", "at_ms": 16},
//!   {"type": "pointer_up", "x": 9, "y": 15}
//! ]
//! ```
//!
//! Events go through [`EngineCore`] exactly as live input would, and the
//! report summarises where the session ended up.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use viewer::consts::GLYPH_COUNT;
use viewer::engine::{Action, EngineCore};
use viewer::font::{Font, Glyph};
use viewer::geometry::Point;
use viewer::input::{Button, InputMode, Modifiers, WheelDelta};
use viewer::pacing::FramePacer;
use viewer::viewport::Viewport;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    Resize {
        width: f64,
        height: f64,
    },
    Mode {
        mode: InputMode,
    },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default = "primary")]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default = "primary")]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Modifiers {
        modifiers: Modifiers,
    },
    Wheel {
        x: f64,
        y: f64,
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default)]
        at_ms: f64,
    },
    TouchStart {
        touches: Vec<Point>,
    },
    TouchMove {
        touches: Vec<Point>,
    },
    TouchEnd {
        #[serde(default)]
        remaining: Vec<Point>,
    },
    Frame {
        at_ms: f64,
    },
}

fn primary() -> Button {
    Button::Primary
}

/// Where a replay left the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub events: usize,
    pub status: String,
    pub fps: u32,
    pub viewport: Viewport,
    pub hovered: Option<u8>,
    /// Glyphs whose final values differ from the font the replay started with.
    pub edited: Vec<Glyph>,
    pub edit_sessions: usize,
}

/// Parse a replay script.
///
/// # Errors
///
/// Returns the JSON error for malformed scripts or unknown event types.
pub fn parse_script(json: &str) -> Result<Vec<ReplayEvent>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Feed one event to the engine. Frame events are also recorded by `pacer`.
pub fn step(engine: &mut EngineCore, pacer: &mut FramePacer, event: &ReplayEvent) -> Vec<Action> {
    match event {
        ReplayEvent::Resize { width, height } => engine.set_viewport(*width, *height),
        ReplayEvent::Mode { mode } => {
            engine.set_input_mode(*mode);
            Vec::new()
        }
        ReplayEvent::PointerDown { x, y, button, modifiers } => {
            engine.on_pointer_down(Point::new(*x, *y), *button, *modifiers)
        }
        ReplayEvent::PointerMove { x, y, modifiers } => engine.on_pointer_move(Point::new(*x, *y), *modifiers),
        ReplayEvent::PointerUp { x, y, button, modifiers } => {
            engine.on_pointer_up(Point::new(*x, *y), *button, *modifiers)
        }
        ReplayEvent::Modifiers { modifiers } => engine.on_modifiers(*modifiers),
        ReplayEvent::Wheel { x, y, dx, dy, modifiers, at_ms } => {
            engine.on_wheel(Point::new(*x, *y), WheelDelta { dx: *dx, dy: *dy }, *modifiers, *at_ms)
        }
        ReplayEvent::TouchStart { touches } => engine.on_touch_start(touches),
        ReplayEvent::TouchMove { touches } => engine.on_touch_move(touches),
        ReplayEvent::TouchEnd { remaining } => engine.on_touch_end(remaining),
        ReplayEvent::Frame { at_ms } => {
            pacer.frame_started(*at_ms);
            engine.frame(*at_ms)
        }
    }
}

/// Run a whole script as fast as possible.
pub fn run(engine: &mut EngineCore, pacer: &mut FramePacer, events: &[ReplayEvent]) -> ReplayReport {
    let baseline = engine.font.clone();
    let mut edit_sessions = 0;
    for event in events {
        edit_sessions += count_sessions(&step(engine, pacer, event));
    }
    report(engine, pacer, baseline.as_ref().map(Font::glyphs), events.len(), edit_sessions)
}

/// Run a script with frame events spaced at the pacer's interval in real
/// time.
pub async fn run_paced(engine: &mut EngineCore, pacer: &mut FramePacer, events: &[ReplayEvent]) -> ReplayReport {
    let baseline = engine.font.clone();
    let mut edit_sessions = 0;
    let mut frame_start = Instant::now();
    for event in events {
        edit_sessions += count_sessions(&step(engine, pacer, event));
        if matches!(event, ReplayEvent::Frame { .. }) {
            tokio::time::sleep(pacer.next_delay(frame_start.elapsed())).await;
            frame_start = Instant::now();
        }
    }
    report(engine, pacer, baseline.as_ref().map(Font::glyphs), events.len(), edit_sessions)
}

fn count_sessions(actions: &[Action]) -> usize {
    actions.iter().filter(|a| matches!(a, Action::EditStarted { .. })).count()
}

fn report(
    engine: &EngineCore,
    pacer: &FramePacer,
    baseline: Option<&[Glyph; GLYPH_COUNT]>,
    events: usize,
    edit_sessions: usize,
) -> ReplayReport {
    let edited = match (engine.font(), baseline) {
        (Some(font), Some(before)) => font
            .glyphs()
            .iter()
            .zip(before.iter())
            .filter(|(now, was)| now != was)
            .map(|(now, _)| *now)
            .collect(),
        _ => Vec::new(),
    };
    ReplayReport {
        events,
        status: engine.status_line(),
        fps: pacer.fps(),
        viewport: engine.viewport,
        hovered: engine.hovered(),
        edited,
        edit_sessions,
    }
}

#[cfg(test)]
#[path = "replay_test.rs"]
mod tests;
