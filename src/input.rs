//! Input model: modifier keys, mouse buttons, element probes, and the drag state.
//!
//! The host translates DOM events into these types. Pointer positions are
//! always client (viewport) coordinates. When an event lands on something,
//! the host also reports what it hit as an [`ElementProbe`]: an opaque handle
//! it can resolve back to the DOM node, the node's viewport box, and whether
//! the node is one of the overlay's own.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::line::LineId;
use crate::space::{Axis, Rect};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift: delete a line on press, lock the measure axis.
    pub shift: bool,
    pub ctrl: bool,
    /// Alt / Option: suppress snapping.
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Primary,
    Middle,
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key as reported by the browser (`KeyboardEvent.key`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key(pub String);

/// Host-side handle for a DOM element.
pub type ElementRef = u32;

/// Which overlay-generated node an element is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum OverlayPart {
    Line(LineId),
    Ruler,
    RulerCorner,
    Label,
}

/// The topmost element at the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementProbe {
    pub element: ElementRef,
    /// Viewport box (`getBoundingClientRect`).
    pub rect: Rect,
    /// Set when the element is an overlay node.
    #[serde(default)]
    pub overlay: Option<OverlayPart>,
}

impl ElementProbe {
    /// `true` for ordinary page content.
    #[must_use]
    pub fn is_page_element(&self) -> bool {
        self.overlay.is_none()
    }

    /// The guide line this probe hit, if any.
    #[must_use]
    pub fn line(&self) -> Option<LineId> {
        match self.overlay {
            Some(OverlayPart::Line(id)) => Some(id),
            _ => None,
        }
    }
}

/// Pointer gesture in progress outside the measure/picker tools.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// Waiting for the next pointer-down.
    #[default]
    Idle,
    /// A guide line follows the pointer.
    DraggingLine { id: LineId, axis: Axis },
}
