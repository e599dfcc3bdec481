use super::*;

// =============================================================
// Interval
// =============================================================

#[test]
fn sixty_fps_floors_to_sixteen_ms() {
    assert_eq!(FramePacer::new(60).interval(), Duration::from_millis(16));
    assert_eq!(FramePacer::default().interval(), Duration::from_millis(16));
}

#[test]
fn zero_rate_is_treated_as_one() {
    assert_eq!(FramePacer::new(0).interval(), Duration::from_secs(1));
}

#[test]
fn next_delay_returns_remaining_budget() {
    let pacer = FramePacer::new(60);
    assert_eq!(pacer.next_delay(Duration::from_millis(4)), Duration::from_millis(12));
}

#[test]
fn next_delay_is_zero_after_overrun() {
    let pacer = FramePacer::new(60);
    assert_eq!(pacer.next_delay(Duration::from_millis(16)), Duration::ZERO);
    assert_eq!(pacer.next_delay(Duration::from_millis(40)), Duration::ZERO);
}

// =============================================================
// FPS
// =============================================================

#[test]
fn fresh_pacer_reports_seeded_fps() {
    // 1000 / 17 = 58.8
    assert_eq!(FramePacer::new(60).fps(), 58);
}

#[test]
fn first_frame_records_nothing() {
    let mut pacer = FramePacer::new(60);
    pacer.frame_started(5000.0);
    assert_eq!(pacer.fps(), 58);
}

#[test]
fn fps_tracks_recorded_deltas() {
    let mut pacer = FramePacer::new(60);
    let mut now = 0.0;
    for _ in 0..=FRAME_HISTORY_LEN {
        pacer.frame_started(now);
        now += 10.0;
    }
    assert_eq!(pacer.fps(), 100);
}

#[test]
fn history_length_is_fixed() {
    let mut pacer = FramePacer::new(60);
    for i in 0..1000 {
        pacer.frame_started(f64::from(i) * 20.0);
    }
    assert_eq!(pacer.deltas.len(), FRAME_HISTORY_LEN);
    assert_eq!(pacer.fps(), 50);
}

#[test]
fn backwards_clock_is_ignored() {
    let mut pacer = FramePacer::new(60);
    pacer.frame_started(100.0);
    pacer.frame_started(50.0);
    assert_eq!(pacer.fps(), 58);
}
