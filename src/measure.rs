//! Measure tool: a press-drag-release gesture that reports distance and angle.
//!
//! The tool flag (`enabled`) is layered over the gesture state machine
//! (`Idle → Active → Idle`). While `Active`, the start and live end points
//! are tracked in viewport coordinates. The visual left behind on release
//! stays on screen until the next press or until the tool is disabled; it is
//! stored in the current anchor space so it migrates with the guide lines.

#[cfg(test)]
#[path = "measure_test.rs"]
mod measure_test;

use serde::{Deserialize, Serialize};

use crate::line::GuideLine;
use crate::snap::{SnapQuery, SnapResolver};
use crate::space::{self, AnchorMode, Axis, Point, Positioning, Rect, Scroll};

/// Gesture state of the measure tool.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MeasureGesture {
    #[default]
    Idle,
    Active {
        /// Snapped press point, viewport coordinates.
        start: Point,
        /// Live end point after snapping and axis lock, viewport coordinates.
        end: Point,
        axis_locked: bool,
    },
}

/// Everything the measure tool consults while resolving a point.
#[derive(Debug, Clone, Copy)]
pub struct MeasureContext<'a> {
    pub resolver: SnapResolver,
    pub lines: &'a [GuideLine],
    pub scroll: Scroll,
    /// Global anchor mode; decides where the visual is pinned.
    pub mode: AnchorMode,
    /// Viewport box of the topmost page element under the cursor.
    pub element: Option<Rect>,
    pub ruler_ticks: bool,
    pub suppressed: bool,
}

/// Length and angle of a measured segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub length: f64,
    /// `atan2(dy, dx)` in degrees.
    pub angle_deg: f64,
}

impl Measurement {
    #[must_use]
    pub fn between(start: Point, end: Point) -> Self {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        Self { length: dx.hypot(dy), angle_deg: dy.atan2(dx).to_degrees() }
    }

    /// Label text, rounded to whole pixels.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}px", self.length.round())
    }
}

/// Render view of the measure line and its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureView {
    pub position: Positioning,
    /// Where the line starts (and rotates around), in `position`'s space.
    pub origin: Point,
    /// Where the label sits, in `position`'s space.
    pub label_at: Point,
    pub measurement: Measurement,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct MeasureVisual {
    mode: AnchorMode,
    origin: Point,
    label_at: Point,
    measurement: Measurement,
}

impl MeasureVisual {
    fn view(&self) -> MeasureView {
        MeasureView {
            position: self.mode.positioning(),
            origin: self.origin,
            label_at: self.label_at,
            measurement: self.measurement,
            label: self.measurement.label(),
        }
    }
}

/// Measure tool state.
#[derive(Debug, Clone, Default)]
pub struct MeasureSession {
    enabled: bool,
    gesture: MeasureGesture,
    visual: Option<MeasureVisual>,
}

impl MeasureSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.gesture, MeasureGesture::Active { .. })
    }

    #[must_use]
    pub fn gesture(&self) -> MeasureGesture {
        self.gesture
    }

    /// The visual currently on screen, if any.
    #[must_use]
    pub fn view(&self) -> Option<MeasureView> {
        self.visual.as_ref().map(MeasureVisual::view)
    }

    /// Turn the tool on. Returns `false` if it already was.
    pub fn enable(&mut self) -> bool {
        if self.enabled {
            return false;
        }
        self.enabled = true;
        true
    }

    /// Turn the tool off, dropping any gesture and visual.
    ///
    /// Safe to call when already disabled. Returns `true` when a visual was
    /// on screen and the host must remove it.
    pub fn disable(&mut self) -> bool {
        self.enabled = false;
        self.gesture = MeasureGesture::Idle;
        self.visual.take().is_some()
    }

    /// Start a gesture at `client`.
    ///
    /// The start point snaps to guide lines only; the end point is resolved
    /// like any later move. Ignored while the tool is disabled.
    pub fn press(&mut self, client: Point, axis_lock: bool, ctx: &MeasureContext<'_>) -> Option<MeasureView> {
        if !self.enabled {
            return None;
        }
        let start = snap_start(client, ctx);
        self.gesture = MeasureGesture::Active { start, end: start, axis_locked: axis_lock };
        self.move_to(client, axis_lock, ctx)
    }

    /// Recompute the end point for a pointer at `client`.
    ///
    /// Axis lock is re-evaluated on every move.
    pub fn move_to(&mut self, client: Point, axis_lock: bool, ctx: &MeasureContext<'_>) -> Option<MeasureView> {
        let MeasureGesture::Active { start, .. } = self.gesture else {
            return None;
        };
        let mut end = snap_end(client, ctx);
        if axis_lock {
            end = lock_to_dominant_axis(start, end);
        }
        self.gesture = MeasureGesture::Active { start, end, axis_locked: axis_lock };

        let visual = MeasureVisual {
            mode: ctx.mode,
            origin: space::migrate_point(start, AnchorMode::Unfrozen, ctx.mode, ctx.scroll),
            label_at: space::migrate_point(end, AnchorMode::Unfrozen, ctx.mode, ctx.scroll),
            measurement: Measurement::between(start, end),
        };
        self.visual = Some(visual);
        Some(visual.view())
    }

    /// End the gesture. The visual stays until the next press or disable.
    pub fn release(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.gesture = MeasureGesture::Idle;
        true
    }

    /// Move the on-screen visual into `to`'s space.
    pub fn migrate(&mut self, to: AnchorMode, scroll: Scroll) -> Option<MeasureView> {
        let visual = self.visual.as_mut()?;
        if visual.mode == to {
            return None;
        }
        visual.origin = space::migrate_point(visual.origin, visual.mode, to, scroll);
        visual.label_at = space::migrate_point(visual.label_at, visual.mode, to, scroll);
        visual.mode = to;
        Some(visual.view())
    }
}

/// Zero the smaller of `dx`/`dy`; an exact tie keeps the vertical run.
#[must_use]
pub fn lock_to_dominant_axis(start: Point, end: Point) -> Point {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx.abs() > dy.abs() { Point::new(end.x, start.y) } else { Point::new(start.x, end.y) }
}

fn snap_start(client: Point, ctx: &MeasureContext<'_>) -> Point {
    let snap_axis = |axis: Axis| {
        let mut query = SnapQuery::lines(axis, axis.pick(client), AnchorMode::Unfrozen, ctx.scroll, ctx.lines);
        query.suppressed = ctx.suppressed;
        ctx.resolver.resolve(&query).position
    };
    Point::new(snap_axis(Axis::Vertical), snap_axis(Axis::Horizontal))
}

fn snap_end(client: Point, ctx: &MeasureContext<'_>) -> Point {
    let snap_axis = |axis: Axis| {
        let query = SnapQuery {
            axis,
            raw: axis.pick(client),
            space: AnchorMode::Unfrozen,
            scroll: ctx.scroll,
            lines: ctx.lines,
            exclude: None,
            element: ctx.element,
            ruler_ticks: ctx.ruler_ticks,
            suppressed: ctx.suppressed,
        };
        ctx.resolver.resolve(&query).position
    };
    Point::new(snap_axis(Axis::Vertical), snap_axis(Axis::Horizontal))
}
