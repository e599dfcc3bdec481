#![allow(clippy::float_cmp)]

use super::*;
use crate::geometry::BBox;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn ctrl() -> Modifiers {
    Modifiers { ctrl: true, ..Modifiers::default() }
}

fn shift() -> Modifiers {
    Modifiers { shift: true, ..Modifiers::default() }
}

/// Font with 'A' at (10,10)-(20,20) and 'B' at (30,10)-(40,20).
fn sample_font() -> Font {
    let mut font = Font::new(12);
    let a = font.glyph_mut(b'A');
    a.src = BBox::new(10.0, 10.0, 20.0, 20.0);
    a.delta = Point::new(11.0, 0.0);
    a.dst = Point::new(0.0, -10.0);
    font.glyph_mut(b'B').src = BBox::new(30.0, 10.0, 40.0, 20.0);
    font
}

// =============================================================
// EditMode
// =============================================================

#[test]
fn mode_ctrl_wins_over_shift() {
    let both = Modifiers { ctrl: true, shift: true, ..Modifiers::default() };
    assert_eq!(EditMode::from_modifiers(both), EditMode::Delta);
    assert_eq!(EditMode::from_modifiers(shift()), EditMode::Dst);
    assert_eq!(EditMode::from_modifiers(Modifiers::default()), EditMode::Src);
}

#[test]
fn mode_ignores_alt_and_meta() {
    let mods = Modifiers { alt: true, meta: true, ..Modifiers::default() };
    assert_eq!(EditMode::from_modifiers(mods), EditMode::Src);
}

// =============================================================
// Session lifecycle
// =============================================================

#[test]
fn begin_over_glyph_snapshots_it() {
    let font = sample_font();
    let vp = Viewport::default();
    let mut session = EditSession::default();
    assert_eq!(session.begin(&font, &vp, pt(15.0, 15.0)), Some(b'A'));
    let EditSession::Editing(edit) = session else {
        panic!("expected an active session");
    };
    assert_eq!(edit.character, b'A');
    assert_eq!(edit.original, *font.glyph(b'A'));
    assert_eq!(edit.pointer_down, pt(15.0, 15.0));
}

#[test]
fn begin_over_nothing_stays_idle() {
    let font = sample_font();
    let vp = Viewport::default();
    let mut session = EditSession::default();
    assert_eq!(session.begin(&font, &vp, pt(100.0, 100.0)), None);
    assert!(!session.is_active());
}

#[test]
fn begin_while_active_keeps_first_glyph() {
    let font = sample_font();
    let vp = Viewport::default();
    let mut session = EditSession::default();
    session.begin(&font, &vp, pt(15.0, 15.0));
    assert_eq!(session.begin(&font, &vp, pt(35.0, 15.0)), None);
    assert_eq!(session.target(), Some(b'A'));
}

#[test]
fn end_clears_session_and_reports_target() {
    let font = sample_font();
    let vp = Viewport::default();
    let mut session = EditSession::default();
    session.begin(&font, &vp, pt(15.0, 15.0));
    assert_eq!(session.end(), Some(b'A'));
    assert_eq!(session, EditSession::Idle);
    assert_eq!(session.end(), None);
}

// =============================================================
// Applying edits
// =============================================================

#[test]
fn ctrl_drag_subtracts_pointer_delta_from_advance() {
    let mut font = sample_font();
    let mut vp = Viewport::default();
    vp.zoom = 2.0;
    let mut session = EditSession::default();
    let down = pt(30.0, 30.0);
    session.begin(&font, &vp, down);
    // drag by (3, 4) world units: pointer moves to down - (3, 4) * zoom
    let pointer = pt(24.0, 22.0);
    let edited = session.apply(&mut font, vp.zoom, pointer, ctrl()).expect("glyph should change");
    assert_eq!(edited.delta, pt(11.0 - 3.0, 0.0 - 4.0));
    assert_eq!(font.glyph(b'A').delta, pt(8.0, -4.0));
    session.end();
    assert!(!session.is_active());
    assert_eq!(font.glyph(b'A').delta, pt(8.0, -4.0));
}

#[test]
fn shift_drag_adds_pointer_delta_to_destination() {
    let mut font = sample_font();
    let vp = Viewport::default();
    let mut session = EditSession::default();
    session.begin(&font, &vp, pt(15.0, 15.0));
    session.apply(&mut font, 1.0, pt(13.0, 20.0), shift());
    // pointer_delta = (2, -5)
    assert_eq!(font.glyph(b'A').dst, pt(2.0, -15.0));
    assert_eq!(font.glyph(b'A').src, BBox::new(10.0, 10.0, 20.0, 20.0));
}

#[test]
fn plain_drag_moves_source_box() {
    let mut font = sample_font();
    let vp = Viewport::default();
    let mut session = EditSession::default();
    session.begin(&font, &vp, pt(15.0, 15.0));
    session.apply(&mut font, 1.0, pt(18.0, 11.0), Modifiers::default());
    // pointer_delta = (-3, 4), src moves by (3, -4)
    assert_eq!(font.glyph(b'A').src, BBox::new(13.0, 6.0, 23.0, 16.0));
}

#[test]
fn pointer_delta_is_floored_in_world_units() {
    assert_eq!(pointer_delta(pt(10.0, 10.0), pt(7.0, 13.0), 2.0), Some(pt(1.0, -2.0)));
    assert_eq!(pointer_delta(pt(0.0, 0.0), pt(0.0, 0.0), 4.0), Some(pt(0.0, 0.0)));
}

#[test]
fn pointer_delta_rejects_non_finite() {
    assert_eq!(pointer_delta(pt(0.0, 0.0), pt(f64::NAN, 0.0), 1.0), None);
    assert_eq!(pointer_delta(pt(0.0, 0.0), pt(1.0, 0.0), 0.0), None);
}

#[test]
fn edits_are_relative_to_snapshot_not_previous_frame() {
    let mut font = sample_font();
    let vp = Viewport::default();
    let mut session = EditSession::default();
    session.begin(&font, &vp, pt(15.0, 15.0));
    for _ in 0..5 {
        session.apply(&mut font, 1.0, pt(12.0, 15.0), Modifiers::default());
    }
    // pointer_delta = (3, 0) every time; src lands at -3 once, not -15.
    assert_eq!(font.glyph(b'A').src, BBox::new(7.0, 10.0, 17.0, 20.0));
}

#[test]
fn zero_length_drag_changes_nothing() {
    let mut font = sample_font();
    let before = font.clone();
    let vp = Viewport::default();
    let mut session = EditSession::default();
    session.begin(&font, &vp, pt(15.0, 15.0));
    assert!(session.apply(&mut font, 1.0, pt(15.0, 15.0), ctrl()).is_none());
    assert!(session.apply(&mut font, 1.0, pt(15.0, 15.0), shift()).is_none());
    assert!(session.apply(&mut font, 1.0, pt(15.0, 15.0), Modifiers::default()).is_none());
    assert_eq!(font, before);
}

#[test]
fn switching_modifiers_mid_drag_switches_field() {
    let mut font = sample_font();
    let vp = Viewport::default();
    let mut session = EditSession::default();
    session.begin(&font, &vp, pt(15.0, 15.0));
    session.apply(&mut font, 1.0, pt(14.0, 14.0), ctrl());
    assert_eq!(font.glyph(b'A').delta, pt(10.0, -1.0));
    session.apply(&mut font, 1.0, pt(13.0, 13.0), shift());
    assert_eq!(font.glyph(b'A').dst, pt(2.0, -8.0));
    // The advance keeps the value written while ctrl was held.
    assert_eq!(font.glyph(b'A').delta, pt(10.0, -1.0));
}

#[test]
fn session_follows_character_when_box_moves_away() {
    let mut font = sample_font();
    let vp = Viewport::default();
    let mut session = EditSession::default();
    session.begin(&font, &vp, pt(15.0, 15.0));
    // Drag over 'B'; 'A' stays the target.
    session.apply(&mut font, 1.0, pt(35.0, 15.0), Modifiers::default());
    assert_eq!(session.target(), Some(b'A'));
    assert_eq!(font.glyph(b'A').src, BBox::new(30.0, 10.0, 40.0, 20.0));
    assert_eq!(font.glyph(b'B').src, BBox::new(30.0, 10.0, 40.0, 20.0));
}

#[test]
fn apply_while_idle_is_noop() {
    let mut font = sample_font();
    let session = EditSession::default();
    assert!(session.apply(&mut font, 1.0, pt(0.0, 0.0), ctrl()).is_none());
}
