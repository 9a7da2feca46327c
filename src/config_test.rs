#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_match_constants() {
    let c = OverlayConfig::default();
    assert_eq!(c.snap_threshold_px, 10.0);
    assert_eq!(c.ruler_tick_spacing_px, 10.0);
    assert_eq!(c.default_color, Rgb::new(255, 0, 0));
    assert_eq!(c.storage_prefix, "layout-grid-lines-");
    assert_eq!(c.settings_key, "layout-grid-settings");
}

#[test]
fn empty_object_yields_defaults() {
    assert_eq!(OverlayConfig::from_json("{}").unwrap(), OverlayConfig::default());
}

#[test]
fn present_keys_override() {
    let c = OverlayConfig::from_json(r##"{"snapThresholdPx": 6, "defaultColor": "#00f", "storagePrefix": "x-"}"##)
        .unwrap();
    assert_eq!(c.snap_threshold_px, 6.0);
    assert_eq!(c.ruler_tick_spacing_px, 10.0);
    assert_eq!(c.default_color, Rgb::new(0, 0, 255));
    assert_eq!(c.storage_prefix, "x-");
}

#[test]
fn resolver_uses_config_values() {
    let c = OverlayConfig::from_json(r#"{"snapThresholdPx": 4, "rulerTickSpacingPx": 8}"#).unwrap();
    let r = c.resolver();
    assert_eq!(r.threshold, 4.0);
    assert_eq!(r.tick_spacing, 8.0);
}

#[test]
fn rejects_non_positive_threshold() {
    let err = OverlayConfig::from_json(r#"{"snapThresholdPx": 0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::NotPositive { field: "snapThresholdPx", .. }));
}

#[test]
fn rejects_negative_spacing() {
    let err = OverlayConfig::from_json(r#"{"rulerTickSpacingPx": -10}"#).unwrap_err();
    assert!(matches!(err, ConfigError::NotPositive { field: "rulerTickSpacingPx", .. }));
}

#[test]
fn rejects_sub_pixel_spacing() {
    let err = OverlayConfig::from_json(r#"{"rulerTickSpacingPx": 1e-9}"#).unwrap_err();
    assert!(matches!(err, ConfigError::BelowMinimum { field: "rulerTickSpacingPx", .. }));
    assert!(OverlayConfig::from_json(r#"{"rulerTickSpacingPx": 0.5}"#).is_err());
    let c = OverlayConfig::from_json(r#"{"rulerTickSpacingPx": 1}"#).unwrap();
    assert_eq!(c.ruler_tick_spacing_px, 1.0);
}

#[test]
fn rejects_bad_color() {
    let err = OverlayConfig::from_json(r#"{"defaultColor": "reddish"}"#).unwrap_err();
    assert_eq!(err.to_string(), "unrecognized color: reddish");
}

#[test]
fn rejects_empty_keys() {
    assert!(matches!(
        OverlayConfig::from_json(r#"{"settingsKey": ""}"#).unwrap_err(),
        ConfigError::Empty("settingsKey")
    ));
}

#[test]
fn rejects_unknown_keys_and_bad_json() {
    assert!(matches!(OverlayConfig::from_json(r#"{"threshold": 3}"#).unwrap_err(), ConfigError::Parse(_)));
    assert!(matches!(OverlayConfig::from_json("nope").unwrap_err(), ConfigError::Parse(_)));
}
