//! Rendering: draws the ruler strips onto their 2D canvases.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a computed [`RulerLayout`] and produces pixels; it never
//! mutates overlay state. Everything is drawn in device pixels with the
//! transform reset, so tick marks land on whole pixels at any DPR.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

use std::f64::consts::FRAC_PI_2;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::RULER_THICKNESS_PX;
use crate::ruler::{RulerLayout, RulerStrip, Tick, TickKind};

const TICK_COLOR: &str = "#d1d5db";
const TICK_COLOR_MAJOR: &str = "#9ca3af";
const LABEL_COLOR: &str = "#6b7280";

/// Label font size in CSS pixels.
const LABEL_FONT_PX: f64 = 9.0;
const LABEL_FONT_FAMILY: &str = "system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";

/// Gap between a major tick and its label.
const LABEL_INSET_PX: f64 = 4.0;
/// Label distance from the top strip's upper edge.
const TOP_LABEL_Y_PX: f64 = 3.0;
/// Label baseline distance from the left strip's outer edge.
const LEFT_LABEL_X_PX: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Left,
}

/// Size both canvases' backing stores and draw every tick.
///
/// # Errors
///
/// Returns `Err` if a 2D context can't be obtained or any `Canvas2D` call fails.
pub fn draw_rulers(top: &HtmlCanvasElement, left: &HtmlCanvasElement, layout: &RulerLayout) -> Result<(), JsValue> {
    draw_strip(top, &layout.top, Edge::Top, layout.dpr)?;
    draw_strip(left, &layout.left, Edge::Left, layout.dpr)
}

fn draw_strip(canvas: &HtmlCanvasElement, strip: &RulerStrip, edge: Edge, dpr: f64) -> Result<(), JsValue> {
    match edge {
        Edge::Top => {
            canvas.set_width(strip.backing_length);
            canvas.set_height(strip.backing_thickness);
        }
        Edge::Left => {
            canvas.set_width(strip.backing_thickness);
            canvas.set_height(strip.backing_length);
        }
    }

    let ctx = context_2d(canvas)?;
    ctx.reset_transform()?;
    ctx.clear_rect(0.0, 0.0, f64::from(canvas.width()), f64::from(canvas.height()));
    ctx.set_font(&format!("500 {}px {LABEL_FONT_FAMILY}", LABEL_FONT_PX * dpr));
    ctx.set_text_baseline("top");

    for tick in &strip.ticks {
        draw_tick(&ctx, tick, edge, dpr)?;
    }
    Ok(())
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

fn draw_tick(ctx: &CanvasRenderingContext2d, tick: &Tick, edge: Edge, dpr: f64) -> Result<(), JsValue> {
    let length = tick.kind.length();
    let major = tick.kind == TickKind::Major;
    ctx.set_fill_style_str(if major { TICK_COLOR_MAJOR } else { TICK_COLOR });

    // Snap to device pixels; a hairline is never thinner than one.
    let along = (tick.position * dpr).round();
    let across = ((RULER_THICKNESS_PX - length) * dpr).round();
    let hair = dpr.round().max(1.0);
    let extent = (length * dpr).round();
    match edge {
        Edge::Top => ctx.fill_rect(along, across, hair, extent),
        Edge::Left => ctx.fill_rect(across, along, extent, hair),
    }

    let Some(label) = &tick.label else {
        return Ok(());
    };
    ctx.set_fill_style_str(LABEL_COLOR);
    match edge {
        Edge::Top => ctx.fill_text(label, (tick.position + LABEL_INSET_PX) * dpr, TOP_LABEL_Y_PX * dpr),
        Edge::Left => {
            ctx.save();
            ctx.translate(LEFT_LABEL_X_PX * dpr, (tick.position + LABEL_INSET_PX) * dpr)?;
            ctx.rotate(-FRAC_PI_2)?;
            ctx.fill_text(label, 0.0, 0.0)?;
            ctx.restore();
            Ok(())
        }
    }
}
