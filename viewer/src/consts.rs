//! Shared numeric constants for the viewer crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest zoom factor; one atlas pixel per screen pixel.
pub const MIN_ZOOM: f64 = 1.0;

/// Largest zoom factor.
pub const MAX_ZOOM: f64 = 16.0;

/// Factor applied by one discrete wheel tick.
pub const WHEEL_ZOOM_STEP: f64 = 2.0;

/// Divisor turning a ctrl+wheel `dy` into continuous zoom units.
pub const CTRL_WHEEL_ZOOM_DIVISOR: f64 = 10.0;

// ── PIL font format ─────────────────────────────────────────────

/// Literal that opens every `.pil` metrics file.
pub const PIL_MAGIC: &[u8; 14] = b"PILfont\n;;;;;;";

/// Literal that separates the line height from the glyph table.
pub const PIL_DATA_MARKER: &[u8; 7] = b";\nDATA\n";

/// Number of glyph slots; one per 8-bit character code.
pub const GLYPH_COUNT: usize = 256;

/// Size of one glyph record: ten 16-bit fields.
pub const GLYPH_RECORD_SIZE: usize = 20;

/// Size of the full glyph table.
pub const GLYPH_TABLE_SIZE: usize = GLYPH_COUNT * GLYPH_RECORD_SIZE;

// ── Timing ──────────────────────────────────────────────────────

/// Idle gap after which accumulated trackpad wheel motion is discarded.
pub const WHEEL_IDLE_MS: f64 = 20.0;

/// Default frame rate cap.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Number of recent frame deltas averaged for the FPS readout.
pub const FRAME_HISTORY_LEN: usize = 300;

/// Seed value for the frame delta history, in milliseconds.
pub const FRAME_HISTORY_SEED_MS: f64 = 17.0;
