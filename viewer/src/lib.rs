//! Core of the PIL bitmap font viewer and glyph editor.
//!
//! This crate owns everything that does not depend on a window: decoding
//! `.pil` metrics files, the pan/zoom viewport over the glyph atlas, the
//! gesture trackers that drive it, hit-testing, and the glyph edit session.
//! A host feeds input events into [`engine::EngineCore`] and reacts to the
//! [`engine::Action`]s it returns; the core never calls back into the host.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | The viewer session and its handler entry points |
//! | [`decode`] | `.pil` decoder and [`decode::DecodeError`] |
//! | [`font`] | Glyph and font model |
//! | [`geometry`] | `Point` and `BBox` value types |
//! | [`viewport`] | Pan/zoom state and screen/world mapping |
//! | [`gesture`] | Trackpad wheel and multi-touch trackers |
//! | [`input`] | Input event types |
//! | [`hit`] | Hit-testing glyph boxes in screen space |
//! | [`edit`] | Glyph edit session state machine |
//! | [`load`] | Asynchronous single-shot font loading |
//! | [`pacing`] | Frame pacing and FPS average |
//! | [`preview`] | Single-line text layout |
//! | [`consts`] | Zoom limits, format literals, timing constants |

pub mod consts;
pub mod decode;
pub mod edit;
pub mod engine;
pub mod font;
pub mod geometry;
pub mod gesture;
pub mod hit;
pub mod input;
pub mod load;
pub mod pacing;
pub mod preview;
pub mod viewport;
