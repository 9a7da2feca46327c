//! Shared numeric and string constants for the overlay.

// ── Snapping ────────────────────────────────────────────────────

/// Maximum distance in CSS pixels at which a candidate captures a position.
pub const SNAP_THRESHOLD_PX: f64 = 10.0;

/// Spacing between ruler ticks in CSS pixels; also the ruler snap grid.
pub const RULER_TICK_SPACING_PX: f64 = 10.0;

/// Smallest accepted tick spacing; finer grids are below one CSS pixel.
pub const MIN_RULER_TICK_SPACING_PX: f64 = 1.0;

// ── Ruler ───────────────────────────────────────────────────────

/// Thickness of each ruler strip in CSS pixels.
pub const RULER_THICKNESS_PX: f64 = 20.0;

/// Tick interval that gets a medium-length mark.
pub const RULER_MEDIUM_EVERY_PX: f64 = 50.0;

/// Tick interval that gets a full-length, labelled mark.
pub const RULER_MAJOR_EVERY_PX: f64 = 100.0;

pub const RULER_MINOR_TICK_PX: f64 = 5.0;
pub const RULER_MEDIUM_TICK_PX: f64 = 8.0;
pub const RULER_MAJOR_TICK_PX: f64 = 20.0;

// ── Picker ──────────────────────────────────────────────────────

/// Outline width plus outline offset around a highlighted element.
pub const PICKER_OUTLINE_REACH_PX: f64 = 4.0;

/// Gap between the outline and the size label.
pub const PICKER_LABEL_GAP_PX: f64 = 5.0;

/// Minimum room above an element before the label flips below it.
pub const PICKER_LABEL_MIN_TOP_PX: f64 = 30.0;

// ── Persistence ─────────────────────────────────────────────────

/// Prefix for the per-page guide line list key.
pub const STORAGE_KEY_PREFIX: &str = "layout-grid-lines-";

/// Key of the settings record shared across all pages.
pub const SETTINGS_KEY: &str = "layout-grid-settings";

/// Line color used when nothing else is configured.
pub const DEFAULT_LINE_COLOR: &str = "#ff0000";

// ── Cursors ─────────────────────────────────────────────────────

pub const CURSOR_CROSSHAIR: &str = "crosshair";

/// Empty cursor value restores the page's own cursor.
pub const CURSOR_RESET: &str = "";
