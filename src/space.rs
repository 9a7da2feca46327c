//! Coordinate spaces: page-anchored versus viewport-anchored offsets.
//!
//! A guide line stores a single scalar offset measured along the axis
//! perpendicular to the line. Which unit system that scalar lives in is
//! decided by the line's [`AnchorMode`]: `Frozen` offsets are page-relative
//! (they move with the document as it scrolls), `Unfrozen` offsets are
//! viewport-relative (fixed on screen). Every conversion between the two goes
//! through the functions in this module so no bare scalar ever crosses a
//! boundary without its mode.

#[cfg(test)]
#[path = "space_test.rs"]
mod space_test;

use serde::{Deserialize, Serialize};

/// Orientation of a guide line.
///
/// A vertical line's offset is a horizontal coordinate (x); a horizontal
/// line's offset is a vertical coordinate (y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    /// The component of `p` this axis measures along.
    #[must_use]
    pub fn pick(self, p: Point) -> f64 {
        match self {
            Self::Vertical => p.x,
            Self::Horizontal => p.y,
        }
    }

    /// The near and far edges of `rect` along this axis.
    #[must_use]
    pub fn edges(self, rect: Rect) -> [f64; 2] {
        match self {
            Self::Vertical => [rect.left, rect.right],
            Self::Horizontal => [rect.top, rect.bottom],
        }
    }

    /// Persisted name of the axis.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

/// Whether an offset is page-relative (`Frozen`) or viewport-relative (`Unfrozen`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorMode {
    /// Page coordinates; the line scrolls with the document.
    #[default]
    Frozen,
    /// Viewport coordinates; the line stays put on screen.
    Unfrozen,
}

impl AnchorMode {
    #[must_use]
    pub fn from_frozen(frozen: bool) -> Self {
        if frozen { Self::Frozen } else { Self::Unfrozen }
    }

    #[must_use]
    pub fn is_frozen(self) -> bool {
        self == Self::Frozen
    }

    /// CSS positioning scheme that renders an offset in this mode.
    #[must_use]
    pub fn positioning(self) -> Positioning {
        match self {
            Self::Frozen => Positioning::Absolute,
            Self::Unfrozen => Positioning::Fixed,
        }
    }
}

/// CSS `position` value for overlay nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Positioning {
    Absolute,
    Fixed,
}

/// Document scroll position in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scroll {
    pub x: f64,
    pub y: f64,
}

impl Scroll {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The scroll component that applies to offsets on `axis`.
    ///
    /// Vertical lines move horizontally, so they use the x scroll.
    #[must_use]
    pub fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.x,
            Axis::Horizontal => self.y,
        }
    }
}

/// A point in either page or viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in viewport coordinates, as reported by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Width/height pair in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Extent along `axis`'s line direction: a vertical line spans height.
    #[must_use]
    pub fn span(self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }

    /// Extent along the offset direction of `axis`.
    #[must_use]
    pub fn across(self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.width,
            Axis::Horizontal => self.height,
        }
    }
}

/// Snapshot of the host page geometry.
///
/// `document` is `max(documentElement, body)` of the scroll width/height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMetrics {
    pub scroll: Scroll,
    pub viewport: Size,
    pub document: Size,
    pub dpr: f64,
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self { scroll: Scroll::default(), viewport: Size::default(), document: Size::default(), dpr: 1.0 }
    }
}

/// Convert a viewport-relative offset on `axis` into page space.
#[must_use]
pub fn to_page_offset(viewport_offset: f64, axis: Axis, scroll: Scroll) -> f64 {
    viewport_offset + scroll.along(axis)
}

/// Convert a page-relative offset on `axis` into viewport space.
///
/// Inverse of [`to_page_offset`] for the same `scroll`. Exact for integral
/// pixel values; fractional offsets can drift by an ulp per conversion.
#[must_use]
pub fn to_viewport_offset(page_offset: f64, axis: Axis, scroll: Scroll) -> f64 {
    page_offset - scroll.along(axis)
}

/// Re-express `offset` (currently in `from`'s space) in `to`'s space.
///
/// `Frozen → Unfrozen` subtracts the axis scroll, `Unfrozen → Frozen` adds
/// it, and a same-mode migration returns `offset` untouched.
#[must_use]
pub fn migrate_anchor_mode(offset: f64, axis: Axis, from: AnchorMode, to: AnchorMode, scroll: Scroll) -> f64 {
    match (from, to) {
        (AnchorMode::Frozen, AnchorMode::Unfrozen) => to_viewport_offset(offset, axis, scroll),
        (AnchorMode::Unfrozen, AnchorMode::Frozen) => to_page_offset(offset, axis, scroll),
        _ => offset,
    }
}

/// Migrate both coordinates of a point.
#[must_use]
pub fn migrate_point(p: Point, from: AnchorMode, to: AnchorMode, scroll: Scroll) -> Point {
    Point {
        x: migrate_anchor_mode(p.x, Axis::Vertical, from, to, scroll),
        y: migrate_anchor_mode(p.y, Axis::Horizontal, from, to, scroll),
    }
}
