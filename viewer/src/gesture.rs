//! Continuous gesture sources: trackpad wheel and multi-touch.
//!
//! Both trackers write into the shared [`Viewport`]. Discrete mouse-wheel
//! zoom and right-button drag pan live on the viewport itself; these two
//! need state that outlives a single event.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::consts::CTRL_WHEEL_ZOOM_DIVISOR;
use crate::geometry::{BBox, Point};
use crate::input::WheelDelta;
use crate::viewport::Viewport;

/// Trackpad wheel state: pan velocity and the continuous zoom accumulator.
///
/// A wheel event sets a pan velocity that [`tick`](Self::tick) applies once
/// per frame. When no wheel event arrives for `idle_ms`, the velocity and the
/// zoom accumulator are dropped so a pause does not read as continued motion.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelTracker {
    idle_ms: f64,
    /// World units added to the offset per frame.
    velocity: Point,
    /// Unfloored zoom level accumulated from ctrl+wheel deltas.
    zoom_accumulator: Option<f64>,
    idle_deadline_ms: Option<f64>,
}

impl WheelTracker {
    #[must_use]
    pub fn new(idle_ms: f64) -> Self {
        Self { idle_ms, velocity: Point::default(), zoom_accumulator: None, idle_deadline_ms: None }
    }

    #[must_use]
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    /// Feed one trackpad wheel event. Returns whether the zoom changed.
    ///
    /// With ctrl held (how browsers report a pinch) `dy` is accumulated into
    /// a fractional zoom level whose floor becomes the viewport zoom.
    /// Otherwise the delta becomes the pan velocity. State left over from
    /// before an idle gap is dropped first, even if no frame ran in between.
    pub fn on_wheel(&mut self, viewport: &mut Viewport, delta: WheelDelta, ctrl: bool, now_ms: f64) -> bool {
        if !(delta.dx.is_finite() && delta.dy.is_finite()) {
            return false;
        }
        self.expire_idle(now_ms);
        self.idle_deadline_ms = Some(now_ms + self.idle_ms);
        if ctrl {
            let accumulated = self.zoom_accumulator.unwrap_or(viewport.zoom) - delta.dy / CTRL_WHEEL_ZOOM_DIVISOR;
            self.zoom_accumulator = Some(accumulated);
            viewport.set_zoom(accumulated.floor())
        } else {
            self.velocity = Point::new(delta.dx, delta.dy) / viewport.zoom;
            false
        }
    }

    /// Advance one frame: expire idle state, then apply the pan velocity.
    /// Returns whether the offset moved.
    pub fn tick(&mut self, viewport: &mut Viewport, now_ms: f64) -> bool {
        self.expire_idle(now_ms);
        if self.velocity == Point::default() {
            return false;
        }
        viewport.nudge(self.velocity);
        true
    }

    /// Drop velocity, accumulator, and the idle deadline.
    pub fn reset(&mut self) {
        self.velocity = Point::default();
        self.zoom_accumulator = None;
        self.idle_deadline_ms = None;
    }

    fn expire_idle(&mut self, now_ms: f64) {
        if self.idle_deadline_ms.is_some_and(|deadline| now_ms >= deadline) {
            self.reset();
        }
    }
}

/// Reference state captured when a touch gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TouchAnchor {
    /// Negated viewport offset at gesture start.
    init_offset: Point,
    init_zoom: f64,
    init_box: BBox,
}

/// Multi-touch pan and pinch-zoom.
///
/// The gesture is tracked through the bounding box of all active touches:
/// its origin drives panning and, with two or more touches, its diagonal
/// drives zoom relative to the box at gesture start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchTracker {
    anchor: Option<TouchAnchor>,
}

impl TouchTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Capture the reference box, offset, and zoom. An empty touch list
    /// clears the gesture.
    pub fn start(&mut self, viewport: &Viewport, touches: &[Point]) {
        self.anchor = BBox::enclosing(touches).map(|init_box| TouchAnchor {
            init_offset: -viewport.offset,
            init_zoom: viewport.zoom,
            init_box,
        });
    }

    /// Update the viewport from the current touch positions. Returns whether
    /// the zoom changed.
    ///
    /// A reference box with zero diagonal leaves the zoom untouched.
    pub fn moved(&mut self, viewport: &mut Viewport, touches: &[Point]) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        let Some(current) = BBox::enclosing(touches) else {
            return false;
        };
        let shift = (current.origin() - anchor.init_box.origin()) / viewport.zoom;
        viewport.set_offset(-(anchor.init_offset + shift).floor());

        if touches.len() < 2 {
            return false;
        }
        let reference = anchor.init_box.diagonal();
        if reference <= 0.0 || !reference.is_finite() {
            return false;
        }
        viewport.set_zoom(anchor.init_zoom * (current.diagonal() / reference))
    }

    /// Handle touches lifting. With none left the zoom snaps to its integer
    /// level; otherwise the gesture is re-anchored on the remaining touches.
    pub fn ended(&mut self, viewport: &mut Viewport, remaining: &[Point]) {
        if remaining.is_empty() {
            viewport.settle_zoom();
            self.anchor = None;
        } else {
            self.start(viewport, remaining);
        }
    }
}
