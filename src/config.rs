//! Overlay configuration.
//!
//! Every field has a default; a host may pass a JSON object overriding any
//! subset of them:
//! - `snapThresholdPx`: default 10
//! - `rulerTickSpacingPx`: default 10, at least 1
//! - `defaultColor`: default `#ff0000`
//! - `storagePrefix`: default `layout-grid-lines-`
//! - `settingsKey`: default `layout-grid-settings`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::color::Rgb;
use crate::consts::{
    DEFAULT_LINE_COLOR, MIN_RULER_TICK_SPACING_PX, RULER_TICK_SPACING_PX, SETTINGS_KEY, SNAP_THRESHOLD_PX,
    STORAGE_KEY_PREFIX,
};
use crate::snap::SnapResolver;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum { field: &'static str, value: f64, min: f64 },
    #[error("unrecognized color: {0}")]
    InvalidColor(String),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    pub snap_threshold_px: f64,
    pub ruler_tick_spacing_px: f64,
    pub default_color: Rgb,
    pub storage_prefix: String,
    pub settings_key: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            snap_threshold_px: SNAP_THRESHOLD_PX,
            ruler_tick_spacing_px: RULER_TICK_SPACING_PX,
            default_color: Rgb::parse_or(DEFAULT_LINE_COLOR, Rgb::new(255, 0, 0)),
            storage_prefix: STORAGE_KEY_PREFIX.to_owned(),
            settings_key: SETTINGS_KEY.to_owned(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigOverrides {
    snap_threshold_px: Option<f64>,
    ruler_tick_spacing_px: Option<f64>,
    default_color: Option<String>,
    storage_prefix: Option<String>,
    settings_key: Option<String>,
}

impl OverlayConfig {
    /// Overlay the keys present in `raw` onto the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed JSON, unknown keys, non-positive
    /// or non-finite numbers, a tick spacing under one pixel, unparseable
    /// colors, or empty keys.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let overrides: ConfigOverrides = serde_json::from_str(raw)?;
        let mut config = Self::default();

        if let Some(v) = overrides.snap_threshold_px {
            config.snap_threshold_px = positive("snapThresholdPx", v)?;
        }
        if let Some(v) = overrides.ruler_tick_spacing_px {
            config.ruler_tick_spacing_px = at_least("rulerTickSpacingPx", v, MIN_RULER_TICK_SPACING_PX)?;
        }
        if let Some(raw_color) = overrides.default_color {
            config.default_color = Rgb::parse(&raw_color).ok_or(ConfigError::InvalidColor(raw_color))?;
        }
        if let Some(prefix) = overrides.storage_prefix {
            config.storage_prefix = non_empty("storagePrefix", prefix)?;
        }
        if let Some(key) = overrides.settings_key {
            config.settings_key = non_empty("settingsKey", key)?;
        }
        Ok(config)
    }

    /// Snap resolver using this config's threshold and tick spacing.
    #[must_use]
    pub fn resolver(&self) -> SnapResolver {
        SnapResolver::new(self.snap_threshold_px, self.ruler_tick_spacing_px)
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 { Ok(value) } else { Err(ConfigError::NotPositive { field, value }) }
}

fn at_least(field: &'static str, value: f64, min: f64) -> Result<f64, ConfigError> {
    let value = positive(field, value)?;
    if value < min { Err(ConfigError::BelowMinimum { field, value, min }) } else { Ok(value) }
}

fn non_empty(field: &'static str, value: String) -> Result<String, ConfigError> {
    if value.is_empty() { Err(ConfigError::Empty(field)) } else { Ok(value) }
}
