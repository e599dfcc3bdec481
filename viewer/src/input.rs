//! Input model: modifier keys, mouse buttons, wheel deltas, and the wheel mode.
//!
//! These are the values the host passes to the [`crate::engine::EngineCore`]
//! handler entry points. They carry no behavior of their own beyond small
//! helpers; gesture interpretation lives in [`crate::viewport`],
//! [`crate::gesture`], and [`crate::edit`].

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap). Starts glyph edits.
    Primary,
    /// Middle mouse button (scroll wheel click). Unused.
    Middle,
    /// Right mouse button. Pans the view while held.
    Secondary,
}

/// Wheel / trackpad scroll delta, in browser convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// How wheel events are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Wheel ticks zoom in discrete powers of two.
    #[default]
    Mouse,
    /// Wheel deltas pan continuously; ctrl+wheel (pinch) zooms continuously.
    Trackpad,
}

impl InputMode {
    #[must_use]
    pub fn from_trackpad_flag(trackpad: bool) -> Self {
        if trackpad { Self::Trackpad } else { Self::Mouse }
    }

    #[must_use]
    pub fn is_trackpad(self) -> bool {
        self == Self::Trackpad
    }
}
