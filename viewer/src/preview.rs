//! Single-line text layout with the font's metrics.
//!
//! Each byte of the text selects a glyph. The glyph's source box is drawn at
//! `pen + dst` with the source box's size, then the pen advances by `delta`.
//! Glyphs without a drawable box still advance the pen.

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

use serde::Serialize;

use crate::font::Font;
use crate::geometry::{BBox, Point};

/// One glyph drawn by a layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub character: u8,
    /// Atlas rectangle to copy from.
    pub src: BBox,
    /// Where it lands, in the same units as the layout origin.
    pub dest: BBox,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub placements: Vec<Placement>,
    /// Pen position after the last glyph.
    pub pen: Point,
}

impl Layout {
    /// Box enclosing every placement, or `None` if nothing is drawn.
    #[must_use]
    pub fn bounds(&self) -> Option<BBox> {
        let corners: Vec<Point> =
            self.placements.iter().flat_map(|p| [p.dest.origin(), p.dest.corner()]).collect();
        BBox::enclosing(&corners)
    }
}

/// Lay out `text` starting with the pen at `origin`.
#[must_use]
pub fn layout(font: &Font, text: &[u8], origin: Point) -> Layout {
    let mut pen = origin;
    let mut placements = Vec::with_capacity(text.len());
    for &character in text {
        let glyph = font.glyph(character);
        if glyph.is_drawable() {
            placements.push(Placement {
                character,
                src: glyph.src,
                dest: BBox::from_origin_and_size(pen + glyph.dst, glyph.src.width(), glyph.src.height()),
            });
        }
        pen = pen + glyph.delta;
    }
    Layout { placements, pen }
}
