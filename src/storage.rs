//! Persistence of guide line lists and shared settings.
//!
//! The store itself is an external collaborator behind [`LayoutStorage`]: a
//! string key-value store (a host-supplied extension store in production,
//! [`MemoryStorage`] in tests). Each page path gets its own line list under a
//! key derived from `origin + pathname`; one shared settings record holds the
//! default color, ruler visibility, and the freeze flag.
//!
//! Persistence is best-effort. Callers log failures and carry on; loading
//! skips malformed records instead of rejecting the whole list.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::color::Rgb;
use crate::line::GuideLine;
use crate::space::{AnchorMode, Axis};

/// Error returned by a [`LayoutStorage`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No backing store exists (e.g. storage disabled by the browser).
    #[error("storage is unavailable")]
    Unavailable,
    /// The backend rejected the operation.
    #[error("storage backend error: {0}")]
    Backend(String),
    /// A record could not be serialized.
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key-value store used for persistence.
pub trait LayoutStorage {
    /// Read the raw value for `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend rejects the write.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LayoutStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Key of the line list for the document at `origin` + `pathname`.
///
/// Query strings and fragments are not part of the key.
#[must_use]
pub fn page_key(prefix: &str, origin: &str, pathname: &str) -> String {
    format!("{prefix}{origin}{pathname}")
}

/// Persisted shape of one guide line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedLine {
    #[serde(rename = "type")]
    pub axis: Axis,
    pub position: f64,
    pub color: String,
}

impl From<&GuideLine> for PersistedLine {
    fn from(line: &GuideLine) -> Self {
        Self { axis: line.axis, position: line.offset, color: line.color.to_hex() }
    }
}

/// Serialize `lines` as the persisted list.
///
/// # Errors
///
/// Returns [`StorageError::Encode`] if serialization fails (non-finite
/// offsets serialize as `null` and are skipped again on load).
pub fn encode_lines(lines: &[GuideLine]) -> Result<String, StorageError> {
    let records: Vec<PersistedLine> = lines.iter().map(PersistedLine::from).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Rebuild guide lines from a persisted list.
///
/// Every restored line takes `mode` (the persisted freeze flag). Records with
/// a missing/unknown `type` or a non-finite `position` are skipped; an
/// unparseable color falls back to `default_color`. Anything that is not a
/// JSON array yields no lines.
#[must_use]
pub fn decode_lines(raw: &str, mode: AnchorMode, default_color: Rgb) -> Vec<GuideLine> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "saved line list is not valid JSON; ignoring");
            return Vec::new();
        }
    };
    let Some(records) = value.as_array() else {
        warn!("saved line list is not an array; ignoring");
        return Vec::new();
    };
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let line = decode_record(record, mode, default_color);
            if line.is_none() {
                warn!(index, "skipping malformed saved line");
            }
            line
        })
        .collect()
}

fn decode_record(record: &Value, mode: AnchorMode, default_color: Rgb) -> Option<GuideLine> {
    let axis = match record.get("type").and_then(Value::as_str)? {
        "vertical" => Axis::Vertical,
        "horizontal" => Axis::Horizontal,
        _ => return None,
    };
    let position = record.get("position").and_then(Value::as_f64).filter(|p| p.is_finite())?;
    let color = record
        .get("color")
        .and_then(Value::as_str)
        .map_or(default_color, |c| Rgb::parse_or(c, default_color));
    Some(GuideLine::new(axis, mode, position, color))
}

/// Settings shared by every page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub line_color: Rgb,
    pub ruler_visible: bool,
    pub freeze_lines: bool,
}

impl Settings {
    /// Defaults: the given color, rulers hidden, lines frozen.
    #[must_use]
    pub fn with_color(line_color: Rgb) -> Self {
        Self { line_color, ruler_visible: false, freeze_lines: true }
    }

    /// Parse a settings record, keeping `defaults` for any absent or invalid key.
    #[must_use]
    pub fn decode(raw: &str, defaults: Self) -> Self {
        let value: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "saved settings are not valid JSON; using defaults");
                return defaults;
            }
        };
        Self {
            line_color: value
                .get("lineColor")
                .and_then(Value::as_str)
                .and_then(Rgb::parse)
                .unwrap_or(defaults.line_color),
            ruler_visible: value
                .get("rulerVisible")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.ruler_visible),
            freeze_lines: value
                .get("freezeLines")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.freeze_lines),
        }
    }

    /// Serialize the settings record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Encode`] if serialization fails.
    pub fn encode(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn mode(&self) -> AnchorMode {
        AnchorMode::from_frozen(self.freeze_lines)
    }
}
