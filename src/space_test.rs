#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Axis
// =============================================================

#[test]
fn axis_pick_uses_perpendicular_component() {
    let p = Point::new(3.0, 7.0);
    assert_eq!(Axis::Vertical.pick(p), 3.0);
    assert_eq!(Axis::Horizontal.pick(p), 7.0);
}

#[test]
fn axis_edges_follow_orientation() {
    let r = Rect::new(10.0, 20.0, 210.0, 120.0);
    assert_eq!(Axis::Vertical.edges(r), [10.0, 210.0]);
    assert_eq!(Axis::Horizontal.edges(r), [20.0, 120.0]);
}

#[test]
fn axis_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Axis::Vertical).unwrap(), "\"vertical\"");
    assert_eq!(serde_json::to_string(&Axis::Horizontal).unwrap(), "\"horizontal\"");
    assert_eq!(Axis::Vertical.as_str(), "vertical");
}

// =============================================================
// AnchorMode
// =============================================================

#[test]
fn anchor_mode_default_is_frozen() {
    assert_eq!(AnchorMode::default(), AnchorMode::Frozen);
}

#[test]
fn anchor_mode_from_frozen_flag() {
    assert_eq!(AnchorMode::from_frozen(true), AnchorMode::Frozen);
    assert_eq!(AnchorMode::from_frozen(false), AnchorMode::Unfrozen);
    assert!(AnchorMode::Frozen.is_frozen());
    assert!(!AnchorMode::Unfrozen.is_frozen());
}

#[test]
fn anchor_mode_positioning() {
    assert_eq!(AnchorMode::Frozen.positioning(), Positioning::Absolute);
    assert_eq!(AnchorMode::Unfrozen.positioning(), Positioning::Fixed);
}

// =============================================================
// Scroll / Size
// =============================================================

#[test]
fn scroll_along_matches_axis() {
    let s = Scroll::new(50.0, 80.0);
    assert_eq!(s.along(Axis::Vertical), 50.0);
    assert_eq!(s.along(Axis::Horizontal), 80.0);
}

#[test]
fn size_span_and_across() {
    let s = Size::new(1200.0, 800.0);
    assert_eq!(s.span(Axis::Vertical), 800.0);
    assert_eq!(s.span(Axis::Horizontal), 1200.0);
    assert_eq!(s.across(Axis::Vertical), 1200.0);
    assert_eq!(s.across(Axis::Horizontal), 800.0);
}

#[test]
fn rect_dimensions() {
    let r = Rect::new(10.0, 20.0, 210.0, 120.0);
    assert_eq!(r.width(), 200.0);
    assert_eq!(r.height(), 100.0);
}

#[test]
fn page_metrics_default_dpr_is_one() {
    assert_eq!(PageMetrics::default().dpr, 1.0);
}

// =============================================================
// Conversions
// =============================================================

#[test]
fn to_page_adds_axis_scroll_only() {
    let s = Scroll::new(50.0, 300.0);
    assert_eq!(to_page_offset(100.0, Axis::Vertical, s), 150.0);
    assert_eq!(to_page_offset(100.0, Axis::Horizontal, s), 400.0);
}

#[test]
fn to_viewport_subtracts_axis_scroll_only() {
    let s = Scroll::new(50.0, 300.0);
    assert_eq!(to_viewport_offset(150.0, Axis::Vertical, s), 100.0);
    assert_eq!(to_viewport_offset(400.0, Axis::Horizontal, s), 100.0);
}

#[test]
fn page_viewport_round_trip_is_identity() {
    let scrolls = [Scroll::new(0.0, 0.0), Scroll::new(50.0, 0.0), Scroll::new(0.0, 1234.0), Scroll::new(17.0, 9000.0)];
    let offsets = [0.0, 1.0, -25.0, 100.0, 4096.0];
    for axis in [Axis::Vertical, Axis::Horizontal] {
        for s in scrolls {
            for v in offsets {
                assert_eq!(to_viewport_offset(to_page_offset(v, axis, s), axis, s), v);
            }
        }
    }
}

#[test]
fn fractional_round_trip_stays_within_an_ulp() {
    let s = Scroll::new(0.2, 0.7);
    for axis in [Axis::Vertical, Axis::Horizontal] {
        for v in [0.1, 0.3, 12.345, -7.77, 999.999] {
            let back = to_viewport_offset(to_page_offset(v, axis, s), axis, s);
            assert!((back - v).abs() <= 1e-9, "{v} came back as {back}");
        }
    }
    // 0.1 + 0.2 - 0.2 is not 0.1 in IEEE arithmetic.
    let drifted = to_viewport_offset(to_page_offset(0.1, Axis::Vertical, s), Axis::Vertical, s);
    assert!((drifted - 0.1).abs() < f64::EPSILON);
}

#[test]
fn migrate_frozen_to_unfrozen_subtracts_scroll() {
    let s = Scroll::new(50.0, 0.0);
    let out = migrate_anchor_mode(100.0, Axis::Vertical, AnchorMode::Frozen, AnchorMode::Unfrozen, s);
    assert_eq!(out, 50.0);
}

#[test]
fn migrate_unfrozen_to_frozen_adds_scroll() {
    let s = Scroll::new(0.0, 40.0);
    let out = migrate_anchor_mode(10.0, Axis::Horizontal, AnchorMode::Unfrozen, AnchorMode::Frozen, s);
    assert_eq!(out, 50.0);
}

#[test]
fn migrate_same_mode_is_identity() {
    let s = Scroll::new(50.0, 40.0);
    for mode in [AnchorMode::Frozen, AnchorMode::Unfrozen] {
        assert_eq!(migrate_anchor_mode(12.5, Axis::Vertical, mode, mode, s), 12.5);
    }
}

#[test]
fn migrate_point_moves_both_components() {
    let s = Scroll::new(5.0, 7.0);
    let p = migrate_point(Point::new(10.0, 10.0), AnchorMode::Unfrozen, AnchorMode::Frozen, s);
    assert_eq!(p, Point::new(15.0, 17.0));
    let back = migrate_point(p, AnchorMode::Frozen, AnchorMode::Unfrozen, s);
    assert_eq!(back, Point::new(10.0, 10.0));
}
