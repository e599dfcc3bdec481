//! Decoder for PIL `.pil` font metrics files.
//!
//! Layout:
//!
//! ```text
//! offset 0:  14 bytes  "PILfont\n;;;;;;"
//! offset 14: ASCII decimal digits, the line height
//! next:      7 bytes   ";\nDATA\n"
//! next:      256 records of 20 bytes, ten big-endian i16 fields each
//! ```
//!
//! Record fields, by byte offset: `0,2` delta; `4,6` destination offset;
//! `8,10` destination extent (unused, skipped); `12..18` source box
//! `x, y, u, v`. The glyph count is a format constant and is not stored.
//!
//! Decoding is a pure function of the input. The whole required length is
//! checked before the marker and the glyph table are read, so a short buffer
//! never yields a partial font.

#[cfg(test)]
#[path = "decode_test.rs"]
mod decode_test;

use crate::consts::{GLYPH_COUNT, GLYPH_RECORD_SIZE, GLYPH_TABLE_SIZE, PIL_DATA_MARKER, PIL_MAGIC};
use crate::font::{Font, Glyph};
use crate::geometry::{BBox, Point};

/// Error returned by [`decode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// One of the fixed literals did not match.
    #[error("incorrect header at byte {offset}")]
    BadHeader { offset: usize },
    /// The line height field had no digits or did not fit in a `u32`.
    #[error("missing or invalid line height")]
    BadYSize,
    /// The buffer ends before the structure it must contain.
    #[error("truncated font file: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
}

/// Decode a `.pil` metrics buffer into a [`Font`].
///
/// # Errors
///
/// Returns [`DecodeError::BadHeader`] when either literal is wrong,
/// [`DecodeError::BadYSize`] when the line height is empty or overflows, and
/// [`DecodeError::Truncated`] when the buffer is shorter than
/// `14 + digits + 7 + 5120` bytes.
pub fn decode(bytes: &[u8]) -> Result<Font, DecodeError> {
    let mut reader = ByteReader::new(bytes);

    if reader.take(PIL_MAGIC.len())? != PIL_MAGIC {
        return Err(DecodeError::BadHeader { offset: 0 });
    }

    let digits = reader.take_digits()?;
    let ysize = parse_ysize(digits)?;

    let needed = reader.position() + PIL_DATA_MARKER.len() + GLYPH_TABLE_SIZE;
    if bytes.len() < needed {
        return Err(DecodeError::Truncated { needed, actual: bytes.len() });
    }

    let marker_offset = reader.position();
    if reader.take(PIL_DATA_MARKER.len())? != PIL_DATA_MARKER {
        return Err(DecodeError::BadHeader { offset: marker_offset });
    }

    let mut glyphs = [Glyph::empty(0); GLYPH_COUNT];
    for glyph in &mut glyphs {
        *glyph = read_record(reader.take(GLYPH_RECORD_SIZE)?);
    }

    Ok(Font::from_glyphs(ysize, glyphs))
}

fn parse_ysize(digits: &[u8]) -> Result<u32, DecodeError> {
    if digits.is_empty() {
        return Err(DecodeError::BadYSize);
    }
    digits.iter().try_fold(0u32, |acc, d| {
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(d - b'0')))
            .ok_or(DecodeError::BadYSize)
    })
}

fn read_record(record: &[u8]) -> Glyph {
    let field = |index: usize| {
        let at = index * 2;
        f64::from(i16::from_be_bytes([record[at], record[at + 1]]))
    };
    Glyph {
        character: 0,
        delta: Point::new(field(0), field(1)),
        dst: Point::new(field(2), field(3)),
        src: BBox::new(field(6), field(7), field(8), field(9)),
    }
}

/// Position-tracked reader over a byte slice. Every read is bounds-checked.
struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos + len;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(DecodeError::Truncated { needed: end, actual: self.bytes.len() })?;
        self.pos = end;
        Ok(slice)
    }

    /// Consume the run of ASCII digits at the cursor, stopping before the
    /// first non-digit. Running off the end of the buffer is a truncation,
    /// since the marker must follow.
    fn take_digits(&mut self) -> Result<&'a [u8], DecodeError> {
        let rest = &self.bytes[self.pos..];
        let len = rest.iter().take_while(|b| b.is_ascii_digit()).count();
        if len == rest.len() {
            return Err(DecodeError::Truncated {
                needed: self.pos + len + PIL_DATA_MARKER.len() + GLYPH_TABLE_SIZE,
                actual: self.bytes.len(),
            });
        }
        self.take(len)
    }
}
