#![allow(clippy::float_cmp)]

use viewer::geometry::BBox;

use super::*;

fn sample_engine() -> EngineCore {
    let mut font = Font::new(12);
    let a = font.glyph_mut(b'A');
    a.src = BBox::new(10.0, 10.0, 20.0, 20.0);
    a.delta = Point::new(11.0, 0.0);
    let mut engine = EngineCore::new();
    engine.install_font(font);
    engine
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn parse_script_applies_defaults() {
    let events = parse_script(
        r#"[
            {"type": "pointer_down", "x": 1, "y": 2},
            {"type": "wheel", "x": 0, "y": 0, "dy": -3},
            {"type": "touch_end"},
            {"type": "mode", "mode": "trackpad"}
        ]"#,
    )
    .unwrap();
    assert_eq!(
        events[0],
        ReplayEvent::PointerDown { x: 1.0, y: 2.0, button: Button::Primary, modifiers: Modifiers::default() }
    );
    assert_eq!(
        events[1],
        ReplayEvent::Wheel { x: 0.0, y: 0.0, dx: 0.0, dy: -3.0, modifiers: Modifiers::default(), at_ms: 0.0 }
    );
    assert_eq!(events[2], ReplayEvent::TouchEnd { remaining: Vec::new() });
    assert_eq!(events[3], ReplayEvent::Mode { mode: InputMode::Trackpad });
}

#[test]
fn parse_script_reads_touch_points_and_buttons() {
    let events = parse_script(
        r#"[
            {"type": "touch_start", "touches": [{"x": 0, "y": 0}, {"x": 10, "y": 5}]},
            {"type": "pointer_up", "x": 3, "y": 4, "button": "secondary", "modifiers": {"shift": true}}
        ]"#,
    )
    .unwrap();
    assert_eq!(events[0], ReplayEvent::TouchStart { touches: vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)] });
    let ReplayEvent::PointerUp { button, modifiers, .. } = &events[1] else {
        panic!("expected pointer_up, got {:?}", events[1]);
    };
    assert_eq!(*button, Button::Secondary);
    assert!(modifiers.shift);
}

#[test]
fn parse_script_rejects_unknown_event() {
    assert!(parse_script(r#"[{"type": "teleport"}]"#).is_err());
}

// =============================================================
// Running
// =============================================================

#[test]
fn run_reports_ctrl_edit() {
    let mut engine = sample_engine();
    let mut pacer = FramePacer::new(60);
    let events = parse_script(
        r#"[
            {"type": "pointer_down", "x": 15, "y": 15, "modifiers": {"ctrl": true}},
            {"type": "pointer_move", "x": 12, "y": 13, "modifiers": {"ctrl": true}},
            {"type": "frame", "at_ms": 16},
            {"type": "pointer_up", "x": 12, "y": 13}
        ]"#,
    )
    .unwrap();
    let report = run(&mut engine, &mut pacer, &events);
    assert_eq!(report.events, 4);
    assert_eq!(report.edit_sessions, 1);
    assert_eq!(report.edited.len(), 1);
    assert_eq!(report.edited[0].character, b'A');
    assert_eq!(report.edited[0].delta, Point::new(8.0, -2.0));
    assert!(!engine.edit.is_active());
}

#[test]
fn run_reports_viewport_and_status() {
    let mut engine = EngineCore::new();
    let mut pacer = FramePacer::new(60);
    let events = parse_script(
        r#"[
            {"type": "resize", "width": 800, "height": 600},
            {"type": "wheel", "x": 400, "y": 300, "dy": -1},
            {"type": "pointer_down", "x": 100, "y": 100, "button": "secondary"},
            {"type": "pointer_move", "x": 60, "y": 100},
            {"type": "pointer_up", "x": 60, "y": 100, "button": "secondary"}
        ]"#,
    )
    .unwrap();
    let report = run(&mut engine, &mut pacer, &events);
    assert_eq!(report.viewport.zoom, 2.0);
    assert_eq!(report.viewport.offset, Point::new(20.0, 0.0));
    assert_eq!(report.status, "20 0 2x");
    assert!(report.edited.is_empty());
}

#[test]
fn frames_feed_the_pacer() {
    let mut engine = EngineCore::new();
    let mut pacer = FramePacer::new(60);
    let events: Vec<ReplayEvent> = (0..=300).map(|i| ReplayEvent::Frame { at_ms: f64::from(i) * 25.0 }).collect();
    let report = run(&mut engine, &mut pacer, &events);
    assert_eq!(report.fps, 40);
}

#[tokio::test]
async fn run_paced_matches_run() {
    let events = parse_script(
        r#"[
            {"type": "pointer_down", "x": 15, "y": 15},
            {"type": "pointer_move", "x": 13, "y": 15},
            {"type": "frame", "at_ms": 0},
            {"type": "frame", "at_ms": 16},
            {"type": "pointer_up", "x": 13, "y": 15}
        ]"#,
    )
    .unwrap();
    let mut fast = sample_engine();
    let fast_report = run(&mut fast, &mut FramePacer::new(1000), &events);
    let mut paced = sample_engine();
    let paced_report = run_paced(&mut paced, &mut FramePacer::new(1000), &events).await;
    assert_eq!(fast_report, paced_report);
    assert_eq!(paced_report.edited[0].src, BBox::new(8.0, 10.0, 18.0, 20.0));
}
