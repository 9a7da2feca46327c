#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

const RED: Rgb = Rgb::new(255, 0, 0);

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_storage_round_trips_values() {
    let mut s = MemoryStorage::new();
    assert!(s.is_empty());
    s.write("k", "v").unwrap();
    assert_eq!(s.read("k").unwrap().as_deref(), Some("v"));
    assert_eq!(s.get("k"), Some("v"));
    assert_eq!(s.len(), 1);
}

#[test]
fn memory_storage_missing_key_is_none() {
    let s = MemoryStorage::new();
    assert!(s.read("nope").unwrap().is_none());
}

#[test]
fn storage_error_messages() {
    assert_eq!(StorageError::Unavailable.to_string(), "storage is unavailable");
    assert_eq!(StorageError::Backend("quota".into()).to_string(), "storage backend error: quota");
}

// =============================================================
// page_key
// =============================================================

#[test]
fn page_key_joins_origin_and_path() {
    assert_eq!(
        page_key("layout-grid-lines-", "https://example.com", "/docs/a"),
        "layout-grid-lines-https://example.com/docs/a"
    );
}

#[test]
fn distinct_paths_get_distinct_keys() {
    let a = page_key("p-", "https://example.com", "/a");
    let b = page_key("p-", "https://example.com", "/b");
    assert_ne!(a, b);
}

// =============================================================
// encode_lines / decode_lines
// =============================================================

#[test]
fn encode_uses_persisted_record_shape() {
    let lines = [
        GuideLine::new(Axis::Vertical, AnchorMode::Frozen, 100.0, RED),
        GuideLine::new(Axis::Horizontal, AnchorMode::Frozen, 20.5, Rgb::new(0, 0, 255)),
    ];
    let raw = encode_lines(&lines).unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        json!([
            {"type": "vertical", "position": 100.0, "color": "#ff0000"},
            {"type": "horizontal", "position": 20.5, "color": "#0000ff"},
        ])
    );
}

#[test]
fn encode_empty_list() {
    assert_eq!(encode_lines(&[]).unwrap(), "[]");
}

#[test]
fn decode_restores_lines_in_order_with_mode() {
    let raw = json!([
        {"type": "vertical", "position": 10, "color": "#00ff00"},
        {"type": "horizontal", "position": 20.5, "color": "rgb(0, 0, 255)"},
    ])
    .to_string();
    let lines = decode_lines(&raw, AnchorMode::Unfrozen, RED);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].axis, Axis::Vertical);
    assert_eq!(lines[0].offset, 10.0);
    assert_eq!(lines[0].color, Rgb::new(0, 255, 0));
    assert_eq!(lines[1].axis, Axis::Horizontal);
    assert_eq!(lines[1].color, Rgb::new(0, 0, 255));
    assert!(lines.iter().all(|l| l.mode == AnchorMode::Unfrozen));
}

#[test]
fn decode_skips_malformed_records() {
    let raw = json!([
        {"position": 10, "color": "#00ff00"},
        {"type": "diagonal", "position": 10},
        {"type": "vertical"},
        {"type": "vertical", "position": null},
        {"type": "vertical", "position": "12"},
        "garbage",
        {"type": "horizontal", "position": 33, "color": "#123456"},
    ])
    .to_string();
    let lines = decode_lines(&raw, AnchorMode::Frozen, RED);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].offset, 33.0);
}

#[test]
fn decode_bad_color_falls_back_to_default() {
    let raw = json!([
        {"type": "vertical", "position": 1, "color": "chartreuse-ish"},
        {"type": "vertical", "position": 2},
    ])
    .to_string();
    let lines = decode_lines(&raw, AnchorMode::Frozen, RED);
    assert!(lines.iter().all(|l| l.color == RED));
}

#[test]
fn decode_non_array_yields_nothing() {
    assert!(decode_lines("{\"type\":\"vertical\"}", AnchorMode::Frozen, RED).is_empty());
    assert!(decode_lines("not json", AnchorMode::Frozen, RED).is_empty());
}

#[test]
fn encode_then_decode_preserves_geometry() {
    let lines = [
        GuideLine::new(Axis::Vertical, AnchorMode::Frozen, 10.0, RED),
        GuideLine::new(Axis::Horizontal, AnchorMode::Frozen, 99.25, RED),
    ];
    let restored = decode_lines(&encode_lines(&lines).unwrap(), AnchorMode::Frozen, RED);
    let pairs: Vec<(Axis, f64)> = restored.iter().map(|l| (l.axis, l.offset)).collect();
    assert_eq!(pairs, vec![(Axis::Vertical, 10.0), (Axis::Horizontal, 99.25)]);
}

// =============================================================
// Settings
// =============================================================

#[test]
fn settings_defaults() {
    let s = Settings::with_color(RED);
    assert!(!s.ruler_visible);
    assert!(s.freeze_lines);
    assert_eq!(s.mode(), AnchorMode::Frozen);
}

#[test]
fn settings_encode_uses_camel_case() {
    let s = Settings { line_color: RED, ruler_visible: true, freeze_lines: false };
    let value: Value = serde_json::from_str(&s.encode().unwrap()).unwrap();
    assert_eq!(value, json!({"lineColor": "#ff0000", "rulerVisible": true, "freezeLines": false}));
}

#[test]
fn settings_decode_reads_all_keys() {
    let raw = json!({"lineColor": "#00ff00", "rulerVisible": true, "freezeLines": false}).to_string();
    let s = Settings::decode(&raw, Settings::with_color(RED));
    assert_eq!(s.line_color, Rgb::new(0, 255, 0));
    assert!(s.ruler_visible);
    assert_eq!(s.mode(), AnchorMode::Unfrozen);
}

#[test]
fn settings_decode_keeps_defaults_for_bad_keys() {
    let raw = json!({"lineColor": 12, "rulerVisible": "yes"}).to_string();
    let s = Settings::decode(&raw, Settings::with_color(RED));
    assert_eq!(s, Settings::with_color(RED));
    assert_eq!(Settings::decode("{{", Settings::with_color(RED)), Settings::with_color(RED));
}
