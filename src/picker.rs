//! Element picker: hover an element, click to drop four guide lines on its box.
//!
//! States: `Disabled → Enabled(no hover) → Enabled(hovering X) → Disabled`.
//! The hovered element is only referenced, never owned; the host applies and
//! reverts the highlight outline when told to. Overlay nodes (guide lines,
//! rulers, labels) are never eligible and resolve to "no hover".

#[cfg(test)]
#[path = "picker_test.rs"]
mod picker_test;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::consts::{PICKER_LABEL_GAP_PX, PICKER_LABEL_MIN_TOP_PX, PICKER_OUTLINE_REACH_PX};
use crate::input::{ElementProbe, ElementRef};
use crate::space::{self, AnchorMode, Axis, Positioning, Rect, Scroll};

/// The element currently under the picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hovered {
    pub element: ElementRef,
    /// Viewport box at the time of the last hover event.
    pub rect: Rect,
}

/// Picker state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PickerState {
    #[default]
    Disabled,
    Enabled { hovered: Option<Hovered> },
}

/// Outcome of a hover event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoverChange {
    /// Element whose highlight must be cleared first.
    pub cleared: Option<ElementRef>,
    /// Newly hovered element, to highlight.
    pub hovered: Option<Hovered>,
}

impl HoverChange {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cleared.is_none() && self.hovered.is_none()
    }
}

/// Size label shown next to the hovered element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerLabelView {
    pub text: String,
    pub position: Positioning,
    pub left: f64,
    pub top: f64,
    /// Label is drawn above `top` (shifted up by its own height).
    pub above: bool,
    pub background: Rgb,
    pub foreground: String,
}

/// Element picker session.
#[derive(Debug, Clone, Default)]
pub struct PickerSession {
    state: PickerState,
}

impl PickerSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> PickerState {
        self.state
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self.state, PickerState::Enabled { .. })
    }

    #[must_use]
    pub fn hovered(&self) -> Option<Hovered> {
        match self.state {
            PickerState::Enabled { hovered } => hovered,
            PickerState::Disabled => None,
        }
    }

    /// Enter `Enabled(no hover)`. Returns `false` if already enabled.
    pub fn enable(&mut self) -> bool {
        if self.is_enabled() {
            return false;
        }
        self.state = PickerState::Enabled { hovered: None };
        true
    }

    /// Leave the picker. Returns the element whose highlight must be cleared.
    ///
    /// Safe to call when already disabled.
    pub fn disable(&mut self) -> Option<ElementRef> {
        let previous = self.hovered().map(|h| h.element);
        self.state = PickerState::Disabled;
        previous
    }

    /// Track the element under the pointer.
    ///
    /// The previous highlight is always reported for clearing before the new
    /// one is reported for applying. Re-hovering the same element with the
    /// same box yields an empty change.
    pub fn hover(&mut self, probe: Option<&ElementProbe>) -> HoverChange {
        let PickerState::Enabled { hovered } = self.state else {
            return HoverChange::default();
        };
        let next = probe
            .filter(|p| p.is_page_element())
            .map(|p| Hovered { element: p.element, rect: p.rect });
        if next == hovered {
            return HoverChange::default();
        }
        self.state = PickerState::Enabled { hovered: next };
        HoverChange { cleared: hovered.map(|h| h.element), hovered: next }
    }

    /// The pointer left the document.
    pub fn leave(&mut self) -> Option<ElementRef> {
        let PickerState::Enabled { hovered: Some(h) } = self.state else {
            return None;
        };
        self.state = PickerState::Enabled { hovered: None };
        Some(h.element)
    }

    /// Confirm the hovered element and exit to `Disabled`.
    ///
    /// Returns `None` (and stays enabled) when nothing is hovered.
    pub fn confirm(&mut self) -> Option<Hovered> {
        let hovered = self.hovered()?;
        self.state = PickerState::Disabled;
        Some(hovered)
    }
}

/// The four guide lines that outline `rect`, in `mode`'s space.
///
/// Order: left, right (vertical), then top, bottom (horizontal). A zero-size
/// box still yields four lines at the coincident positions.
#[must_use]
pub fn box_lines(rect: Rect, mode: AnchorMode, scroll: Scroll) -> [(Axis, f64); 4] {
    let to_mode = |edge: f64, axis: Axis| space::migrate_anchor_mode(edge, axis, AnchorMode::Unfrozen, mode, scroll);
    [
        (Axis::Vertical, to_mode(rect.left, Axis::Vertical)),
        (Axis::Vertical, to_mode(rect.right, Axis::Vertical)),
        (Axis::Horizontal, to_mode(rect.top, Axis::Horizontal)),
        (Axis::Horizontal, to_mode(rect.bottom, Axis::Horizontal)),
    ]
}

/// Place the `W x H` size label at the hovered element's top-left corner.
///
/// The label sits just outside the outline, above the element when there is
/// room and below it otherwise.
#[must_use]
pub fn label_view(rect: Rect, mode: AnchorMode, scroll: Scroll, color: Rgb) -> PickerLabelView {
    let sx = space::migrate_anchor_mode(0.0, Axis::Vertical, AnchorMode::Unfrozen, mode, scroll);
    let sy = space::migrate_anchor_mode(0.0, Axis::Horizontal, AnchorMode::Unfrozen, mode, scroll);
    let above = rect.top >= PICKER_LABEL_MIN_TOP_PX;
    let top = if above {
        rect.top + sy - PICKER_OUTLINE_REACH_PX - PICKER_LABEL_GAP_PX
    } else {
        rect.bottom + sy + PICKER_OUTLINE_REACH_PX + PICKER_LABEL_GAP_PX
    };
    PickerLabelView {
        text: format!("{}px x {}px", rect.width().round(), rect.height().round()),
        position: mode.positioning(),
        left: rect.left + sx - PICKER_OUTLINE_REACH_PX,
        top,
        above,
        background: color,
        foreground: color.contrast_text().to_owned(),
    }
}
