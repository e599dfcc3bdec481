#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::font::{Font, Glyph};
use crate::geometry::{BBox, Point};
use crate::viewport::Viewport;

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub character: u8,
    /// The glyph's source box in screen space at the time of the test.
    pub screen_box: BBox,
}

/// Screen-space box of a glyph's atlas rectangle.
#[must_use]
pub fn glyph_screen_box(glyph: &Glyph, viewport: &Viewport) -> BBox {
    viewport.world_box_to_screen(glyph.src)
}

/// The glyph under `pointer`. When boxes overlap, the lowest character code
/// wins. Empty and inverted boxes are never hit.
#[must_use]
pub fn hit_test(pointer: Point, font: &Font, viewport: &Viewport) -> Option<Hit> {
    font.glyphs().iter().find_map(|glyph| {
        let screen_box = glyph_screen_box(glyph, viewport);
        (!screen_box.is_empty() && screen_box.contains(pointer))
            .then_some(Hit { character: glyph.character, screen_box })
    })
}
