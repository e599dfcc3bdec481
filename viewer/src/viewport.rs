//! Pan/zoom viewport over the atlas and the screen <-> world mapping.
//!
//! `offset` is the world point shown at the centre of the screen. The screen
//! position of world `(0, 0)` is snapped to whole pixels:
//!
//! ```text
//! screen_origin = floor(-offset * zoom + screen_center)
//! screen        = world * zoom + screen_origin
//! ```
//!
//! `zoom` stays within `[MIN_ZOOM, MAX_ZOOM]`. It rests on integer values but
//! may hold fractional values while a pinch gesture is in progress.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::Serialize;

use crate::consts::{MAX_ZOOM, MIN_ZOOM, WHEEL_ZOOM_STEP};
use crate::geometry::{BBox, Point};

/// Anchor of a held-button drag pan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PanAnchor {
    /// Screen position where the drag started, or `None` when not panning.
    pub origin: Option<Point>,
    /// Viewport offset when the drag started.
    pub offset_at_start: Point,
}

/// Zoom level, pan offset, and screen size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub zoom: f64,
    /// World-space point mapped to the screen centre.
    pub offset: Point,
    pub pan: PanAnchor,
    /// Screen width in CSS pixels.
    pub width: f64,
    /// Screen height in CSS pixels.
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { zoom: MIN_ZOOM, offset: Point::default(), pan: PanAnchor::default(), width: 0.0, height: 0.0 }
    }
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ..Self::default() }
    }

    /// Update the screen size. Non-finite or negative sizes are ignored.
    pub fn set_size(&mut self, width: f64, height: f64) {
        if width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 {
            self.width = width;
            self.height = height;
        }
    }

    // --- Mapping ---

    /// Screen-space centre.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Screen position of world `(0, 0)`, snapped to whole pixels.
    #[must_use]
    pub fn screen_origin(&self) -> Point {
        ((-self.offset) * self.zoom + self.center()).floor()
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        world * self.zoom + self.screen_origin()
    }

    /// Convert a screen-space point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        (screen - self.screen_origin()) / self.zoom
    }

    /// Project a world-space box to screen space, snapped to whole pixels.
    #[must_use]
    pub fn world_box_to_screen(&self, world: BBox) -> BBox {
        BBox::from_corners(self.world_to_screen(world.origin()), self.world_to_screen(world.corner())).floor()
    }

    // --- Zoom ---

    /// Apply one discrete wheel step, keeping the world point under `cursor`
    /// fixed on screen.
    ///
    /// A step that would leave `[MIN_ZOOM, MAX_ZOOM]` is discarded and
    /// returns `false`; nothing changes in that case.
    pub fn step_zoom(&mut self, zoom_in: bool, cursor: Point) -> bool {
        let old = self.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let new = if zoom_in { old * WHEEL_ZOOM_STEP } else { old / WHEEL_ZOOM_STEP };
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&new) {
            return false;
        }
        self.zoom = new;
        let direction = (new - old).signum();
        self.offset = self.offset + (cursor - self.center()) / new.max(old) * direction;
        self.resnap_pan(cursor);
        true
    }

    /// Set the zoom directly, clamped to the allowed range. Non-finite values
    /// are ignored. Returns whether the zoom changed.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if !zoom.is_finite() {
            return false;
        }
        let clamped = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let changed = (clamped - self.zoom).abs() > f64::EPSILON;
        self.zoom = clamped;
        changed
    }

    /// Snap a fractional zoom down to the integer level below it.
    pub fn settle_zoom(&mut self) {
        self.zoom = self.zoom.floor().clamp(MIN_ZOOM, MAX_ZOOM);
    }

    // --- Pan ---

    /// Shift the offset by `by` world units. Non-finite shifts are ignored.
    pub fn nudge(&mut self, by: Point) {
        if by.is_finite() {
            self.offset = self.offset + by;
        }
    }

    /// Replace the offset. Non-finite offsets are ignored.
    pub fn set_offset(&mut self, offset: Point) {
        if offset.is_finite() {
            self.offset = offset;
        }
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan.origin.is_some()
    }

    /// Anchor a drag pan at `pointer` unless one is already active.
    pub fn begin_pan(&mut self, pointer: Point) {
        if self.pan.origin.is_none() {
            self.pan.origin = Some(pointer);
            self.pan.offset_at_start = self.offset;
        }
    }

    /// Recompute the offset from the active drag anchor.
    pub fn drag_pan(&mut self, pointer: Point) {
        if let Some(origin) = self.pan.origin {
            self.set_offset((origin - pointer) / self.zoom + self.pan.offset_at_start);
        }
    }

    /// Clear the drag anchor and its snapshot.
    pub fn end_pan(&mut self) {
        self.pan = PanAnchor::default();
    }

    /// Move an active drag anchor to `pointer` and the current offset, so a
    /// zoom change mid-drag continues from the new level without a jump.
    pub fn resnap_pan(&mut self, pointer: Point) {
        if self.pan.origin.is_some() {
            self.pan.origin = Some(pointer);
            self.pan.offset_at_start = self.offset;
        }
    }

    // --- Display ---

    /// Offset and zoom readout, e.g. `-12 40 4x`.
    #[must_use]
    pub fn status_line(&self) -> String {
        // Adding 0.0 turns -0.0 into 0.0 for display.
        let x = self.offset.x.floor() + 0.0;
        let y = self.offset.y.floor() + 0.0;
        format!("{x} {y} {}x", self.zoom)
    }
}
