//! Nearest-candidate snapping across guide lines, element edges, and ruler ticks.
//!
//! All three candidate sources are folded into one scan. The winner is the
//! candidate closest to the raw position, regardless of which source produced
//! it; ties keep the first one seen, and sources are visited in the order
//! lines, element, ruler. A winner is applied only when it lies strictly
//! inside the threshold, otherwise the raw position comes back untouched.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use serde::{Deserialize, Serialize};

use crate::consts::{RULER_TICK_SPACING_PX, SNAP_THRESHOLD_PX};
use crate::line::{GuideLine, LineId};
use crate::space::{self, AnchorMode, Axis, Rect, Scroll};

/// What a snapped position locked onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SnapTarget {
    Line(LineId),
    ElementEdge,
    RulerTick,
}

/// Result of a snap query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snap {
    /// Resolved position in the query's space.
    pub position: f64,
    /// `None` when nothing was within threshold.
    pub target: Option<SnapTarget>,
}

/// Inputs for a single snap decision on one axis.
#[derive(Debug, Clone, Copy)]
pub struct SnapQuery<'a> {
    pub axis: Axis,
    /// Raw position, expressed in `space`.
    pub raw: f64,
    /// Coordinate space of `raw` and of the result.
    pub space: AnchorMode,
    pub scroll: Scroll,
    /// Candidate lines; only those on `axis` are considered.
    pub lines: &'a [GuideLine],
    /// Line being dragged, never a candidate for itself.
    pub exclude: Option<LineId>,
    /// Viewport box of the topmost element under the cursor.
    pub element: Option<Rect>,
    pub ruler_ticks: bool,
    /// Skip every source and return `raw`.
    pub suppressed: bool,
}

impl<'a> SnapQuery<'a> {
    /// Query against `lines` only, in `space`.
    #[must_use]
    pub fn lines(axis: Axis, raw: f64, space: AnchorMode, scroll: Scroll, lines: &'a [GuideLine]) -> Self {
        Self {
            axis,
            raw,
            space,
            scroll,
            lines,
            exclude: None,
            element: None,
            ruler_ticks: false,
            suppressed: false,
        }
    }
}

/// Threshold and tick spacing used when resolving snaps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResolver {
    pub threshold: f64,
    pub tick_spacing: f64,
}

impl Default for SnapResolver {
    fn default() -> Self {
        Self { threshold: SNAP_THRESHOLD_PX, tick_spacing: RULER_TICK_SPACING_PX }
    }
}

impl SnapResolver {
    #[must_use]
    pub fn new(threshold: f64, tick_spacing: f64) -> Self {
        Self { threshold, tick_spacing }
    }

    /// Resolve `query.raw` against every enabled candidate source.
    #[must_use]
    pub fn resolve(&self, query: &SnapQuery<'_>) -> Snap {
        let mut best = Nearest::new(query.raw, self.threshold);
        if query.suppressed {
            return best.finish();
        }

        for line in query.lines {
            if line.axis != query.axis || Some(line.id) == query.exclude {
                continue;
            }
            best.offer(line.offset_in(query.space, query.scroll), SnapTarget::Line(line.id));
        }

        if let Some(rect) = query.element {
            for edge in query.axis.edges(rect) {
                let pos = space::migrate_anchor_mode(edge, query.axis, AnchorMode::Unfrozen, query.space, query.scroll);
                best.offer(pos, SnapTarget::ElementEdge);
            }
        }

        if query.ruler_ticks {
            let on_screen =
                space::migrate_anchor_mode(query.raw, query.axis, query.space, AnchorMode::Unfrozen, query.scroll);
            let tick = nearest_tick(on_screen, self.tick_spacing);
            let pos = space::migrate_anchor_mode(tick, query.axis, AnchorMode::Unfrozen, query.space, query.scroll);
            best.offer(pos, SnapTarget::RulerTick);
        }

        best.finish()
    }
}

/// Nearest multiple of `spacing`, rounding an exact half down.
#[must_use]
pub fn nearest_tick(value: f64, spacing: f64) -> f64 {
    if spacing <= 0.0 || !spacing.is_finite() {
        return value;
    }
    let remainder = value.rem_euclid(spacing);
    let floor = value - remainder;
    if remainder > spacing / 2.0 { floor + spacing } else { floor }
}

/// Running minimum over offered candidates.
struct Nearest {
    raw: f64,
    threshold: f64,
    best: Option<(f64, f64, SnapTarget)>,
}

impl Nearest {
    fn new(raw: f64, threshold: f64) -> Self {
        Self { raw, threshold, best: None }
    }

    fn offer(&mut self, pos: f64, target: SnapTarget) {
        let dist = (pos - self.raw).abs();
        if dist.is_nan() || dist >= self.threshold {
            return;
        }
        if self.best.is_none_or(|(best_dist, _, _)| dist < best_dist) {
            self.best = Some((dist, pos, target));
        }
    }

    fn finish(self) -> Snap {
        match self.best {
            Some((_, position, target)) => Snap { position, target: Some(target) },
            None => Snap { position: self.raw, target: None },
        }
    }
}
