//! Control-surface messages and keyboard shortcuts.
//!
//! The popup sends one JSON message per user action, tagged by `action`.
//! Each verb maps 1:1 onto an engine operation.

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

use serde::{Deserialize, Serialize};

use crate::input::{Key, Modifiers};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("malformed command: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One control-surface message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Command {
    AddVertical {
        #[serde(default)]
        color: Option<String>,
    },
    AddHorizontal {
        #[serde(default)]
        color: Option<String>,
    },
    ClearAll,
    UpdateColor {
        color: String,
    },
    ToggleRuler,
    TogglePicker,
    ToggleMeasure,
    UpdateFreeze {
        #[serde(rename = "isFrozen")]
        is_frozen: bool,
    },
}

impl Command {
    /// Parse a control-surface message.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Malformed`] for invalid JSON, an unknown
    /// `action`, or missing fields.
    pub fn from_json(raw: &str) -> Result<Self, CommandError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The `action` verb, for logging.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            Self::AddVertical { .. } => "add-vertical",
            Self::AddHorizontal { .. } => "add-horizontal",
            Self::ClearAll => "clear-all",
            Self::UpdateColor { .. } => "update-color",
            Self::ToggleRuler => "toggle-ruler",
            Self::TogglePicker => "toggle-picker",
            Self::ToggleMeasure => "toggle-measure",
            Self::UpdateFreeze { .. } => "update-freeze",
        }
    }
}

/// Map a key press to its shortcut command.
///
/// Shortcuts are Shift plus a letter (V, H, B, M) and are inert while a text
/// input has focus or Ctrl/Meta is held.
#[must_use]
pub fn shortcut(key: &Key, modifiers: Modifiers, editable_focus: bool) -> Option<Command> {
    if editable_focus || !modifiers.shift || modifiers.ctrl || modifiers.meta {
        return None;
    }
    let mut chars = key.0.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return None;
    };
    match c.to_ascii_uppercase() {
        'V' => Some(Command::AddVertical { color: None }),
        'H' => Some(Command::AddHorizontal { color: None }),
        'B' => Some(Command::TogglePicker),
        'M' => Some(Command::ToggleMeasure),
        _ => None,
    }
}
