#![allow(clippy::float_cmp)]

use super::*;
use crate::color::Rgb;

// =============================================================
// Helpers
// =============================================================

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn ctx(lines: &[GuideLine]) -> MeasureContext<'_> {
    MeasureContext {
        resolver: SnapResolver::default(),
        lines,
        scroll: Scroll::default(),
        mode: AnchorMode::Unfrozen,
        element: None,
        ruler_ticks: false,
        suppressed: false,
    }
}

fn enabled() -> MeasureSession {
    let mut m = MeasureSession::new();
    m.enable();
    m
}

fn vline(offset: f64) -> GuideLine {
    GuideLine::new(Axis::Vertical, AnchorMode::Frozen, offset, Rgb::new(255, 0, 0))
}

fn hline(offset: f64) -> GuideLine {
    GuideLine::new(Axis::Horizontal, AnchorMode::Frozen, offset, Rgb::new(255, 0, 0))
}

// =============================================================
// Measurement
// =============================================================

#[test]
fn measurement_length_and_angle() {
    let m = Measurement::between(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
    assert!(approx_eq(m.length, 5.0));
    assert!(approx_eq(m.angle_deg, 4.0_f64.atan2(3.0).to_degrees()));
}

#[test]
fn measurement_angle_of_vertical_down_is_90() {
    let m = Measurement::between(Point::new(10.0, 10.0), Point::new(10.0, 60.0));
    assert!(approx_eq(m.angle_deg, 90.0));
}

#[test]
fn measurement_label_rounds() {
    let m = Measurement::between(Point::new(0.0, 0.0), Point::new(100.4, 0.0));
    assert_eq!(m.label(), "100px");
    let m = Measurement::between(Point::new(0.0, 0.0), Point::new(0.0, 99.6));
    assert_eq!(m.label(), "100px");
}

// =============================================================
// Enable / disable
// =============================================================

#[test]
fn new_session_is_disabled_and_idle() {
    let m = MeasureSession::new();
    assert!(!m.is_enabled());
    assert!(!m.is_active());
    assert!(m.view().is_none());
}

#[test]
fn enable_twice_reports_no_change() {
    let mut m = MeasureSession::new();
    assert!(m.enable());
    assert!(!m.enable());
}

#[test]
fn press_ignored_while_disabled() {
    let mut m = MeasureSession::new();
    assert!(m.press(Point::new(1.0, 1.0), false, &ctx(&[])).is_none());
    assert!(!m.is_active());
}

#[test]
fn disable_while_active_discards_everything() {
    let mut m = enabled();
    m.press(Point::new(1.0, 1.0), false, &ctx(&[]));
    assert!(m.is_active());
    assert!(m.disable());
    assert!(!m.is_active());
    assert!(!m.is_enabled());
    assert!(m.view().is_none());
}

#[test]
fn disable_is_idempotent() {
    let mut m = MeasureSession::new();
    assert!(!m.disable());
    assert!(!m.disable());
}

// =============================================================
// Gesture
// =============================================================

#[test]
fn press_snaps_start_to_lines_only() {
    let lines = [vline(100.0), hline(50.0)];
    let mut c = ctx(&lines);
    c.element = Some(Rect::new(97.0, 47.0, 400.0, 400.0));
    c.ruler_ticks = true;
    let mut m = enabled();
    m.press(Point::new(96.0, 53.0), false, &c);
    let MeasureGesture::Active { start, .. } = m.gesture() else {
        panic!("expected active gesture");
    };
    assert_eq!(start, Point::new(100.0, 50.0));
}

#[test]
fn press_start_uses_viewport_position_of_frozen_lines() {
    let lines = [vline(300.0)];
    let mut c = ctx(&lines);
    c.scroll = Scroll::new(200.0, 0.0);
    let mut m = enabled();
    m.press(Point::new(97.0, 10.0), false, &c);
    let MeasureGesture::Active { start, .. } = m.gesture() else {
        panic!("expected active gesture");
    };
    assert_eq!(start.x, 100.0);
}

#[test]
fn move_snaps_end_to_element_and_ruler() {
    let mut m = enabled();
    m.press(Point::new(0.0, 0.0), false, &ctx(&[]));
    let mut c = ctx(&[]);
    c.element = Some(Rect::new(10.0, 10.0, 203.0, 80.0));
    c.ruler_ticks = true;
    let view = m.move_to(Point::new(201.0, 77.0), false, &c);
    let MeasureGesture::Active { end, .. } = m.gesture() else {
        panic!("expected active gesture");
    };
    assert_eq!(end, Point::new(200.0, 80.0));
    assert!(view.is_some());
}

#[test]
fn axis_lock_keeps_dominant_delta_each_move() {
    let mut m = enabled();
    m.press(Point::new(0.0, 0.0), true, &ctx(&[]));
    m.move_to(Point::new(100.0, 30.0), true, &ctx(&[]));
    let MeasureGesture::Active { end, axis_locked, .. } = m.gesture() else {
        panic!("expected active gesture");
    };
    assert!(axis_locked);
    assert_eq!(end, Point::new(100.0, 0.0));

    m.move_to(Point::new(20.0, 130.0), true, &ctx(&[]));
    let MeasureGesture::Active { end, .. } = m.gesture() else {
        panic!("expected active gesture");
    };
    assert_eq!(end, Point::new(0.0, 130.0));

    m.move_to(Point::new(20.0, 130.0), false, &ctx(&[]));
    let MeasureGesture::Active { end, axis_locked, .. } = m.gesture() else {
        panic!("expected active gesture");
    };
    assert!(!axis_locked);
    assert_eq!(end, Point::new(20.0, 130.0));
}

#[test]
fn lock_tie_keeps_vertical_run() {
    let end = lock_to_dominant_axis(Point::new(0.0, 0.0), Point::new(5.0, 5.0));
    assert_eq!(end, Point::new(0.0, 5.0));
}

#[test]
fn move_without_press_is_ignored() {
    let mut m = enabled();
    assert!(m.move_to(Point::new(5.0, 5.0), false, &ctx(&[])).is_none());
}

#[test]
fn release_returns_to_idle_and_keeps_visual() {
    let mut m = enabled();
    m.press(Point::new(0.0, 0.0), false, &ctx(&[]));
    m.move_to(Point::new(30.0, 40.0), false, &ctx(&[]));
    assert!(m.release());
    assert!(!m.is_active());
    let view = m.view().expect("visual should persist after release");
    assert_eq!(view.label, "50px");
    assert!(!m.release());
}

#[test]
fn new_press_replaces_previous_visual() {
    let mut m = enabled();
    m.press(Point::new(0.0, 0.0), false, &ctx(&[]));
    m.move_to(Point::new(30.0, 40.0), false, &ctx(&[]));
    m.release();
    m.press(Point::new(500.0, 500.0), false, &ctx(&[]));
    let view = m.view().expect("visual");
    assert_eq!(view.origin, Point::new(500.0, 500.0));
    assert_eq!(view.label, "0px");
}

#[test]
fn suppressed_context_skips_all_snapping() {
    let lines = [vline(100.0)];
    let mut c = ctx(&lines);
    c.suppressed = true;
    c.ruler_ticks = true;
    let mut m = enabled();
    m.press(Point::new(97.0, 3.0), false, &c);
    let MeasureGesture::Active { start, end, .. } = m.gesture() else {
        panic!("expected active gesture");
    };
    assert_eq!(start, Point::new(97.0, 3.0));
    assert_eq!(end, Point::new(97.0, 3.0));
}

// =============================================================
// Visual placement and migration
// =============================================================

#[test]
fn frozen_visual_is_pinned_in_page_space() {
    let mut c = ctx(&[]);
    c.mode = AnchorMode::Frozen;
    c.scroll = Scroll::new(10.0, 200.0);
    let mut m = enabled();
    m.press(Point::new(5.0, 5.0), false, &c);
    let view = m.move_to(Point::new(25.0, 5.0), false, &c).expect("view");
    assert_eq!(view.position, Positioning::Absolute);
    assert_eq!(view.origin, Point::new(15.0, 205.0));
    assert_eq!(view.label_at, Point::new(35.0, 205.0));
    assert!(approx_eq(view.measurement.length, 20.0));
}

#[test]
fn migrate_moves_visual_between_spaces() {
    let mut m = enabled();
    m.press(Point::new(5.0, 5.0), false, &ctx(&[]));
    m.move_to(Point::new(25.0, 5.0), false, &ctx(&[]));
    m.release();

    let scroll = Scroll::new(10.0, 200.0);
    let frozen = m.migrate(AnchorMode::Frozen, scroll).expect("migrated");
    assert_eq!(frozen.position, Positioning::Absolute);
    assert_eq!(frozen.origin, Point::new(15.0, 205.0));

    assert!(m.migrate(AnchorMode::Frozen, scroll).is_none());

    let back = m.migrate(AnchorMode::Unfrozen, scroll).expect("migrated");
    assert_eq!(back.origin, Point::new(5.0, 5.0));
    assert_eq!(back.label_at, Point::new(25.0, 5.0));
}

#[test]
fn migrate_without_visual_is_noop() {
    let mut m = enabled();
    assert!(m.migrate(AnchorMode::Frozen, Scroll::new(1.0, 1.0)).is_none());
}
