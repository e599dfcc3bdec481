//! Glyph edit session: drag a glyph to change its metrics.
//!
//! A session starts when the primary button goes down over a glyph and ends
//! when it is released. While it is active, every update recomputes the
//! edited field from the snapshot taken at session start, so the result
//! depends only on the total drag distance and never accumulates rounding.
//!
//! Which field is edited is read from the modifiers on every update:
//!
//! | Held | Field | Update |
//! |------|-------|--------|
//! | Ctrl | `delta` | `original.delta - pointer_delta` |
//! | Shift | `dst` | `original.dst + pointer_delta` |
//! | neither | `src` | `original.src` translated by `-pointer_delta` |
//!
//! where `pointer_delta = floor((pointer_down - pointer) / zoom)`.

#[cfg(test)]
#[path = "edit_test.rs"]
mod edit_test;

use crate::font::{Font, Glyph};
use crate::geometry::Point;
use crate::hit::hit_test;
use crate::input::Modifiers;
use crate::viewport::Viewport;

/// The glyph field a drag writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Pen advance.
    Delta,
    /// Destination offset.
    Dst,
    /// Source rectangle position.
    Src,
}

impl EditMode {
    /// Ctrl takes precedence over Shift.
    #[must_use]
    pub fn from_modifiers(modifiers: Modifiers) -> Self {
        if modifiers.ctrl {
            Self::Delta
        } else if modifiers.shift {
            Self::Dst
        } else {
            Self::Src
        }
    }
}

/// State captured when a session starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveEdit {
    pub character: u8,
    /// Glyph values before the drag began.
    pub original: Glyph,
    /// Screen position of the pointer at button-down.
    pub pointer_down: Point,
}

/// Idle or editing exactly one glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(ActiveEdit),
}

impl EditSession {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    /// Character under edit, if any.
    #[must_use]
    pub fn target(&self) -> Option<u8> {
        match self {
            Self::Idle => None,
            Self::Editing(edit) => Some(edit.character),
        }
    }

    /// Start editing the glyph under `pointer`.
    ///
    /// Does nothing and returns `None` when a session is already active or
    /// no glyph is hit.
    pub fn begin(&mut self, font: &Font, viewport: &Viewport, pointer: Point) -> Option<u8> {
        if self.is_active() {
            return None;
        }
        let hit = hit_test(pointer, font, viewport)?;
        *self = Self::Editing(ActiveEdit {
            character: hit.character,
            original: *font.glyph(hit.character),
            pointer_down: pointer,
        });
        Some(hit.character)
    }

    /// Recompute the edited glyph for the current pointer and modifiers.
    ///
    /// Returns the new glyph when the update changed it.
    pub fn apply(&self, font: &mut Font, zoom: f64, pointer: Point, modifiers: Modifiers) -> Option<Glyph> {
        let Self::Editing(edit) = self else {
            return None;
        };
        let moved = pointer_delta(edit.pointer_down, pointer, zoom)?;
        let glyph = font.glyph_mut(edit.character);
        let before = *glyph;
        match EditMode::from_modifiers(modifiers) {
            EditMode::Delta => glyph.delta = edit.original.delta - moved,
            EditMode::Dst => glyph.dst = edit.original.dst + moved,
            EditMode::Src => glyph.src = edit.original.src.translate(-moved),
        }
        (*glyph != before).then_some(*glyph)
    }

    /// End the session. Returns the character that was being edited.
    pub fn end(&mut self) -> Option<u8> {
        let target = self.target();
        *self = Self::Idle;
        target
    }
}

/// Drag distance in whole world units, or `None` if it is not finite.
#[must_use]
pub fn pointer_delta(pointer_down: Point, pointer: Point, zoom: f64) -> Option<Point> {
    let delta = ((pointer_down - pointer) / zoom).floor();
    delta.is_finite().then_some(delta)
}
