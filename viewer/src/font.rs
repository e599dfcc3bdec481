//! Font model: one glyph slot per 8-bit character code plus the line height.
//!
//! A `Font` always holds exactly [`GLYPH_COUNT`] glyphs. Slots the file leaves
//! zeroed are still present as zeroed glyphs; there is no way to remove one.

#[cfg(test)]
#[path = "font_test.rs"]
mod font_test;

use serde::{Deserialize, Serialize};

use crate::consts::GLYPH_COUNT;
use crate::geometry::{BBox, Point};

/// Metrics and atlas rectangle for one character code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    /// The character code this slot represents; equal to its index.
    pub character: u8,
    /// Pen advance applied after drawing this glyph.
    pub delta: Point,
    /// Offset of the drawn box from the pen position.
    pub dst: Point,
    /// Source rectangle in atlas pixel space.
    pub src: BBox,
}

impl Glyph {
    /// A zeroed glyph for `character`.
    #[must_use]
    pub fn empty(character: u8) -> Self {
        Self { character, delta: Point::default(), dst: Point::default(), src: BBox::default() }
    }

    /// Whether the glyph has a drawable source rectangle.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        !self.src.is_empty()
    }

    /// Short tooltip title, e.g. `Glyph: A (U+41)`.
    ///
    /// Control characters are shown as `?`.
    #[must_use]
    pub fn label(&self) -> String {
        let shown = if self.character >= 32 { char::from(self.character) } else { '?' };
        format!("Glyph: {shown} (U+{:02X})", self.character)
    }

    /// Multi-line description: label, source box, destination offset, delta.
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        vec![
            self.label(),
            format!("Source UV: ({}, {}), ({}, {})", self.src.x, self.src.y, self.src.u, self.src.v),
            format!("Destination: ({}, {})", self.dst.x, self.dst.y),
            format!("Delta: {}, {}", self.delta.x, self.delta.y),
        ]
    }
}

/// A decoded PIL bitmap font.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Line height in pixels.
    pub ysize: u32,
    glyphs: [Glyph; GLYPH_COUNT],
}

impl Font {
    /// A font with the given line height and all glyphs zeroed.
    #[must_use]
    pub fn new(ysize: u32) -> Self {
        Self { ysize, glyphs: std::array::from_fn(|i| Glyph::empty(slot_character(i))) }
    }

    /// Build a font from a complete glyph table.
    ///
    /// Each glyph's `character` is reset to its slot index.
    #[must_use]
    pub fn from_glyphs(ysize: u32, mut glyphs: [Glyph; GLYPH_COUNT]) -> Self {
        for (i, glyph) in glyphs.iter_mut().enumerate() {
            glyph.character = slot_character(i);
        }
        Self { ysize, glyphs }
    }

    #[must_use]
    pub fn glyph(&self, character: u8) -> &Glyph {
        &self.glyphs[usize::from(character)]
    }

    pub fn glyph_mut(&mut self, character: u8) -> &mut Glyph {
        &mut self.glyphs[usize::from(character)]
    }

    /// All glyphs in character order.
    #[must_use]
    pub fn glyphs(&self) -> &[Glyph; GLYPH_COUNT] {
        &self.glyphs
    }

    /// Number of glyphs with a drawable source rectangle.
    #[must_use]
    pub fn drawable_count(&self) -> usize {
        self.glyphs.iter().filter(|g| g.is_drawable()).count()
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(0)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn slot_character(index: usize) -> u8 {
    // Slots are 0..GLYPH_COUNT, which is exactly the u8 range.
    index as u8
}
