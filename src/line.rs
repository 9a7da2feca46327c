//! Guide line records and the in-memory store that owns them.
//!
//! A [`GuideLine`] is the single source of truth for one overlay line. The DOM
//! node the host draws for it is a derived [`LineView`], regenerated whenever
//! the record or the page geometry changes. [`GuideLineStore`] keeps lines in
//! insertion order (render/z-order only) and owns the bulk operations: clear,
//! recolor, and anchor-mode migration. Persistence is the caller's job; the
//! engine persists after every mutating call.

#[cfg(test)]
#[path = "line_test.rs"]
mod line_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::Rgb;
use crate::space::{self, AnchorMode, Axis, PageMetrics, Positioning, Scroll};

/// Unique identifier for a guide line.
pub type LineId = Uuid;

/// One guide line.
///
/// `offset` is page-relative when `mode` is `Frozen` and viewport-relative
/// when `Unfrozen`; nothing else decides its unit system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub id: LineId,
    pub axis: Axis,
    pub mode: AnchorMode,
    pub offset: f64,
    pub color: Rgb,
}

impl GuideLine {
    #[must_use]
    pub fn new(axis: Axis, mode: AnchorMode, offset: f64, color: Rgb) -> Self {
        Self { id: Uuid::new_v4(), axis, mode, offset, color }
    }

    /// This line's offset expressed in `space`.
    #[must_use]
    pub fn offset_in(&self, space: AnchorMode, scroll: Scroll) -> f64 {
        space::migrate_anchor_mode(self.offset, self.axis, self.mode, space, scroll)
    }

    /// Where the line currently sits on screen.
    #[must_use]
    pub fn viewport_offset(&self, scroll: Scroll) -> f64 {
        self.offset_in(AnchorMode::Unfrozen, scroll)
    }

    /// Re-express the offset in `to`'s space and adopt that mode.
    pub fn migrate(&mut self, to: AnchorMode, scroll: Scroll) {
        self.offset = self.offset_in(to, scroll);
        self.mode = to;
    }

    /// Derive the render view for the current page geometry.
    #[must_use]
    pub fn view(&self, metrics: &PageMetrics) -> LineView {
        LineView {
            id: self.id,
            axis: self.axis,
            position: self.mode.positioning(),
            offset: self.offset,
            color: self.color,
            extent: LineExtent::for_line(self.axis, self.mode, metrics),
        }
    }
}

/// How far a rendered line stretches along its own direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineExtent {
    /// A measured pixel length covering the whole document.
    Document { length: f64 },
    /// Edge-anchored to the viewport (`0` to `100%`), never measured.
    Viewport,
}

impl LineExtent {
    /// Frozen lines span the document; unfrozen lines span the viewport.
    #[must_use]
    pub fn for_line(axis: Axis, mode: AnchorMode, metrics: &PageMetrics) -> Self {
        match mode {
            AnchorMode::Frozen => Self::Document { length: metrics.document.span(axis) },
            AnchorMode::Unfrozen => Self::Viewport,
        }
    }
}

/// Everything the host needs to (re)draw one line node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineView {
    pub id: LineId,
    pub axis: Axis,
    pub position: Positioning,
    /// CSS `left` for vertical lines, CSS `top` for horizontal ones.
    pub offset: f64,
    pub color: Rgb,
    pub extent: LineExtent,
}

/// Ordered, in-memory collection of guide lines.
#[derive(Debug, Clone)]
pub struct GuideLineStore {
    lines: Vec<GuideLine>,
    mode: AnchorMode,
    default_color: Rgb,
}

impl GuideLineStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(mode: AnchorMode, default_color: Rgb) -> Self {
        Self { lines: Vec::new(), mode, default_color }
    }

    /// Global anchor mode applied to new lines.
    #[must_use]
    pub fn mode(&self) -> AnchorMode {
        self.mode
    }

    /// Set the global mode without migrating any line.
    ///
    /// Only valid while the store is empty (settings load before lines).
    pub fn set_mode_unmigrated(&mut self, mode: AnchorMode) {
        self.mode = mode;
    }

    #[must_use]
    pub fn default_color(&self) -> Rgb {
        self.default_color
    }

    pub fn set_default_color(&mut self, color: Rgb) {
        self.default_color = color;
    }

    /// Append a line. A missing `offset` centers the line in the viewport.
    ///
    /// The centered offset is taken in the store's current mode, so a frozen
    /// line gets the scroll added and still appears centered on first paint.
    pub fn create(&mut self, axis: Axis, offset: Option<f64>, color: Option<Rgb>, metrics: &PageMetrics) -> GuideLine {
        let offset = offset.unwrap_or_else(|| {
            let center = metrics.viewport.across(axis) / 2.0;
            space::migrate_anchor_mode(center, axis, AnchorMode::Unfrozen, self.mode, metrics.scroll)
        });
        let line = GuideLine::new(axis, self.mode, offset, color.unwrap_or(self.default_color));
        self.lines.push(line);
        line
    }

    /// Append an already-built line (restore path).
    pub fn push(&mut self, line: GuideLine) {
        self.lines.push(line);
    }

    /// Remove a line by id, returning it if it was present.
    pub fn remove(&mut self, id: &LineId) -> Option<GuideLine> {
        let idx = self.lines.iter().position(|l| l.id == *id)?;
        Some(self.lines.remove(idx))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Set the default for future lines and repaint every existing line.
    pub fn recolor(&mut self, color: Rgb) {
        self.default_color = color;
        for line in &mut self.lines {
            line.color = color;
        }
    }

    /// Move every line into `to`'s space and flip the global mode.
    ///
    /// Returns `false` (and touches nothing) when `to` is already current.
    pub fn migrate_all(&mut self, to: AnchorMode, scroll: Scroll) -> bool {
        if self.mode == to {
            return false;
        }
        for line in &mut self.lines {
            line.migrate(to, scroll);
        }
        self.mode = to;
        true
    }

    /// Overwrite one line's offset. Returns the updated line.
    pub fn set_offset(&mut self, id: &LineId, offset: f64) -> Option<GuideLine> {
        let line = self.lines.iter_mut().find(|l| l.id == *id)?;
        line.offset = offset;
        Some(*line)
    }

    #[must_use]
    pub fn get(&self, id: &LineId) -> Option<&GuideLine> {
        self.lines.iter().find(|l| l.id == *id)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[GuideLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
