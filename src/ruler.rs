//! Pixel rulers along the top and left viewport edges.
//!
//! Ruler state is a single visibility flag. Tick geometry is never stored:
//! [`RulerLayout::compute`] derives it from the viewport size and device
//! pixel ratio every time the rulers need drawing.

#[cfg(test)]
#[path = "ruler_test.rs"]
mod ruler_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    MIN_RULER_TICK_SPACING_PX, RULER_MAJOR_EVERY_PX, RULER_MAJOR_TICK_PX, RULER_MEDIUM_EVERY_PX,
    RULER_MEDIUM_TICK_PX, RULER_MINOR_TICK_PX, RULER_THICKNESS_PX,
};
use crate::space::Size;

/// Visibility of the rulers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RulerState {
    pub visible: bool,
}

impl RulerState {
    /// Flip visibility, returning the new value.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }
}

/// Tick weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickKind {
    Minor,
    Medium,
    Major,
}

impl TickKind {
    fn at(position: f64) -> Self {
        if position % RULER_MAJOR_EVERY_PX == 0.0 {
            Self::Major
        } else if position % RULER_MEDIUM_EVERY_PX == 0.0 {
            Self::Medium
        } else {
            Self::Minor
        }
    }

    /// Mark length across the strip in CSS pixels.
    #[must_use]
    pub fn length(self) -> f64 {
        match self {
            Self::Minor => RULER_MINOR_TICK_PX,
            Self::Medium => RULER_MEDIUM_TICK_PX,
            Self::Major => RULER_MAJOR_TICK_PX,
        }
    }
}

/// One tick mark on a ruler strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Distance from the strip start in CSS pixels.
    pub position: f64,
    pub kind: TickKind,
    /// Only major ticks are labelled.
    pub label: Option<String>,
}

/// One ruler strip (top or left).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulerStrip {
    /// Length along the strip in CSS pixels.
    pub length: f64,
    /// Backing-store size along the strip in device pixels.
    pub backing_length: u32,
    /// Backing-store thickness in device pixels.
    pub backing_thickness: u32,
    pub ticks: Vec<Tick>,
}

/// Geometry of both rulers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulerLayout {
    pub top: RulerStrip,
    pub left: RulerStrip,
    pub dpr: f64,
}

impl RulerLayout {
    /// Derive tick geometry for `viewport` at device pixel ratio `dpr`.
    ///
    /// Each strip leaves room for the corner square; ticks fall every
    /// `spacing` pixels starting after zero. Spacing below one pixel is
    /// raised to one.
    #[must_use]
    pub fn compute(viewport: Size, dpr: f64, spacing: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self {
            top: strip(viewport.width - RULER_THICKNESS_PX, dpr, spacing),
            left: strip(viewport.height - RULER_THICKNESS_PX, dpr, spacing),
            dpr,
        }
    }
}

fn strip(length: f64, dpr: f64, spacing: f64) -> RulerStrip {
    let length = length.max(0.0);
    let mut ticks = Vec::new();
    if spacing.is_finite() && length.is_finite() {
        let spacing = spacing.max(MIN_RULER_TICK_SPACING_PX);
        for i in 1..=tick_count(length, spacing) {
            let position = f64::from(i) * spacing;
            if position >= length {
                break;
            }
            let kind = TickKind::at(position);
            let label = (kind == TickKind::Major).then(|| format!("{position}"));
            ticks.push(Tick { position, kind, label });
        }
    }
    RulerStrip {
        length,
        backing_length: device_px(length * dpr),
        backing_thickness: device_px(RULER_THICKNESS_PX * dpr),
        ticks,
    }
}

/// Upper bound on ticks strictly inside `(0, length)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn tick_count(length: f64, spacing: f64) -> u32 {
    (length / spacing).ceil().clamp(0.0, f64::from(u32::MAX)) as u32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn device_px(css: f64) -> u32 {
    css.round().clamp(0.0, f64::from(u32::MAX)) as u32
}
