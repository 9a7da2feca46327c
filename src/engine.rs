#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;
use tracing::{debug, warn};

use crate::color::Rgb;
use crate::command::{self, Command};
use crate::config::OverlayConfig;
use crate::consts::{CURSOR_CROSSHAIR, CURSOR_RESET};
use crate::input::{Button, ElementProbe, ElementRef, InputState, Key, Modifiers};
use crate::line::{GuideLine, GuideLineStore, LineId, LineView};
use crate::measure::{MeasureContext, MeasureSession, MeasureView};
use crate::picker::{self, HoverChange, PickerLabelView, PickerSession};
use crate::ruler::{RulerLayout, RulerState};
use crate::schedule::{FrameScheduler, PendingWork};
use crate::snap::SnapQuery;
use crate::space::{self, AnchorMode, Axis, PageMetrics, Point, Rect, Scroll, Size};
use crate::storage::{self, LayoutStorage, Settings};

/// Actions returned from engine operations for the host to apply to the DOM.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Create or redraw the node for one line.
    LineRendered(LineView),
    LineRemoved { id: LineId },
    LinesCleared,
    MeasureRendered(MeasureView),
    MeasureCleared,
    /// Outline `element` with a `2px dashed` border in `color`.
    HighlightElement { element: ElementRef, color: Rgb },
    /// Restore `element`'s original outline.
    ClearHighlight { element: ElementRef },
    PickerLabelShown(PickerLabelView),
    PickerLabelHidden,
    RulerShown,
    RulerHidden,
    RulerRendered(RulerLayout),
    SetCursor { cursor: String },
    /// Call back into [`EngineCore::on_animation_frame`] on the next frame.
    RequestFrame,
}

/// Core engine state for one page.
///
/// Holds every piece of overlay state and all the logic that doesn't touch
/// the DOM, so it can be driven natively in tests. Each instance owns its own
/// lines, sessions, and storage key; two instances never share state.
pub struct EngineCore<S> {
    pub config: OverlayConfig,
    pub storage: S,
    page_key: String,
    pub lines: GuideLineStore,
    pub metrics: PageMetrics,
    pub ruler: RulerState,
    pub measure: MeasureSession,
    pub picker: PickerSession,
    pub input: InputState,
    pub frames: FrameScheduler,
}

impl<S: LayoutStorage> EngineCore<S> {
    /// Create an engine for the document at `origin` + `pathname`.
    ///
    /// Nothing is read from storage until [`EngineCore::load`].
    #[must_use]
    pub fn new(config: OverlayConfig, storage: S, origin: &str, pathname: &str) -> Self {
        let page_key = storage::page_key(&config.storage_prefix, origin, pathname);
        let lines = GuideLineStore::new(AnchorMode::Frozen, config.default_color);
        Self {
            config,
            storage,
            page_key,
            lines,
            metrics: PageMetrics::default(),
            ruler: RulerState::default(),
            measure: MeasureSession::new(),
            picker: PickerSession::new(),
            input: InputState::default(),
            frames: FrameScheduler::new(),
        }
    }

    // --- Persistence ---

    /// Restore settings, then this page's lines.
    ///
    /// Unreadable storage leaves the defaults in place.
    pub fn load(&mut self) -> Vec<Action> {
        let defaults = Settings::with_color(self.config.default_color);
        let settings = match self.storage.read(&self.config.settings_key) {
            Ok(Some(raw)) => Settings::decode(&raw, defaults),
            Ok(None) => defaults,
            Err(e) => {
                warn!(error = %e, "settings unreadable; using defaults");
                defaults
            }
        };

        self.lines.clear();
        self.lines.set_default_color(settings.line_color);
        self.lines.set_mode_unmigrated(settings.mode());
        self.ruler.visible = settings.ruler_visible;

        match self.storage.read(&self.page_key) {
            Ok(Some(raw)) => {
                for line in storage::decode_lines(&raw, settings.mode(), settings.line_color) {
                    self.lines.push(line);
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, key = %self.page_key, "saved lines unreadable; starting empty"),
        }
        debug!(key = %self.page_key, count = self.lines.len(), frozen = settings.freeze_lines, "layout loaded");

        let mut actions = vec![Action::LinesCleared];
        actions.extend(self.line_views());
        if self.ruler.visible {
            actions.push(Action::RulerShown);
            actions.push(Action::RulerRendered(self.ruler_layout()));
        }
        actions
    }

    fn persist_lines(&mut self) {
        let result = storage::encode_lines(self.lines.lines()).and_then(|raw| self.storage.write(&self.page_key, &raw));
        if let Err(e) = result {
            warn!(error = %e, key = %self.page_key, "failed to persist guide lines");
        }
    }

    fn persist_settings(&mut self) {
        let settings = self.settings();
        let result = settings.encode().and_then(|raw| self.storage.write(&self.config.settings_key, &raw));
        if let Err(e) = result {
            warn!(error = %e, "failed to persist settings");
        }
    }

    // --- Commands ---

    /// Apply one control-surface command.
    pub fn apply_command(&mut self, cmd: Command) -> Vec<Action> {
        debug!(action = cmd.verb(), "command");
        match cmd {
            Command::AddVertical { color } => {
                let color = command_color(color.as_deref());
                self.add_line(Axis::Vertical, None, color)
            }
            Command::AddHorizontal { color } => {
                let color = command_color(color.as_deref());
                self.add_line(Axis::Horizontal, None, color)
            }
            Command::ClearAll => self.clear_lines(),
            Command::UpdateColor { color } => match Rgb::parse(&color) {
                Some(rgb) => self.update_color(rgb),
                None => {
                    warn!(color = %color, "ignoring unrecognized color");
                    Vec::new()
                }
            },
            Command::ToggleRuler => self.toggle_ruler(),
            Command::TogglePicker => self.toggle_picker(),
            Command::ToggleMeasure => self.toggle_measure(),
            Command::UpdateFreeze { is_frozen } => self.set_frozen(is_frozen),
        }
    }

    /// Parse and apply a raw JSON command. Malformed messages are ignored.
    pub fn apply_message(&mut self, raw: &str) -> Vec<Action> {
        match Command::from_json(raw) {
            Ok(cmd) => self.apply_command(cmd),
            Err(e) => {
                debug!(error = %e, "ignoring control message");
                Vec::new()
            }
        }
    }

    // --- Line store ---

    /// Append a line; `None` offset centers it in the viewport.
    pub fn add_line(&mut self, axis: Axis, offset: Option<f64>, color: Option<Rgb>) -> Vec<Action> {
        let line = self.lines.create(axis, offset, color, &self.metrics);
        debug!(id = %line.id, axis = axis.as_str(), offset = line.offset, "guide line created");
        self.persist_lines();
        vec![Action::LineRendered(line.view(&self.metrics))]
    }

    /// Remove a line. Unknown ids are a no-op.
    pub fn remove_line(&mut self, id: &LineId) -> Vec<Action> {
        if self.lines.remove(id).is_none() {
            return Vec::new();
        }
        if matches!(self.input, InputState::DraggingLine { id: dragged, .. } if dragged == *id) {
            self.input = InputState::Idle;
        }
        debug!(id = %id, "guide line removed");
        self.persist_lines();
        vec![Action::LineRemoved { id: *id }]
    }

    /// Remove every line and persist the empty list.
    pub fn clear_lines(&mut self) -> Vec<Action> {
        self.lines.clear();
        self.input = InputState::Idle;
        debug!("guide lines cleared");
        self.persist_lines();
        vec![Action::LinesCleared]
    }

    /// Change the default color and repaint every line.
    pub fn update_color(&mut self, color: Rgb) -> Vec<Action> {
        self.lines.recolor(color);
        self.persist_lines();
        self.persist_settings();
        let mut actions = self.line_views();
        if let Some(h) = self.picker.hovered() {
            actions.push(Action::HighlightElement { element: h.element, color });
            actions.push(Action::PickerLabelShown(self.picker_label(h.rect)));
        }
        actions
    }

    /// Switch the global anchor mode, migrating every line and the measure visual.
    ///
    /// Requesting the current mode does nothing.
    pub fn set_frozen(&mut self, frozen: bool) -> Vec<Action> {
        let to = AnchorMode::from_frozen(frozen);
        let scroll = self.metrics.scroll;
        if !self.lines.migrate_all(to, scroll) {
            return Vec::new();
        }
        debug!(frozen, count = self.lines.len(), "anchor mode changed");
        self.persist_lines();
        self.persist_settings();

        let mut actions = self.line_views();
        if let Some(view) = self.measure.migrate(to, scroll) {
            actions.push(Action::MeasureRendered(view));
        }
        if let Some(h) = self.picker.hovered() {
            actions.push(Action::PickerLabelShown(self.picker_label(h.rect)));
        }
        actions
    }

    // --- Tools ---

    pub fn toggle_ruler(&mut self) -> Vec<Action> {
        let visible = self.ruler.toggle();
        self.persist_settings();
        if visible {
            vec![Action::RulerShown, Action::RulerRendered(self.ruler_layout())]
        } else {
            vec![Action::RulerHidden]
        }
    }

    /// Toggle the picker. Enabling it turns the measure tool off.
    pub fn toggle_picker(&mut self) -> Vec<Action> {
        if self.picker.is_enabled() {
            return self.disable_picker();
        }
        let mut actions = self.disable_measure();
        self.picker.enable();
        debug!("picker enabled");
        actions.push(set_cursor(CURSOR_CROSSHAIR));
        actions
    }

    /// Toggle the measure tool. Enabling it turns the picker off.
    pub fn toggle_measure(&mut self) -> Vec<Action> {
        if self.measure.is_enabled() {
            return self.disable_measure();
        }
        let mut actions = self.disable_picker();
        self.measure.enable();
        debug!("measure enabled");
        actions.push(set_cursor(CURSOR_CROSSHAIR));
        actions
    }

    /// Turn the picker off and undo its highlight. Safe when already off.
    pub fn disable_picker(&mut self) -> Vec<Action> {
        if !self.picker.is_enabled() {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if let Some(element) = self.picker.disable() {
            actions.push(Action::ClearHighlight { element });
        }
        debug!("picker disabled");
        actions.push(Action::PickerLabelHidden);
        actions.push(set_cursor(CURSOR_RESET));
        actions
    }

    /// Turn the measure tool off and remove its visual. Safe when already off.
    pub fn disable_measure(&mut self) -> Vec<Action> {
        if !self.measure.is_enabled() {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if self.measure.disable() {
            actions.push(Action::MeasureCleared);
        }
        debug!("measure disabled");
        actions.push(set_cursor(CURSOR_RESET));
        actions
    }

    // --- Input events ---

    /// Pointer pressed at `client`. `probe` is the topmost element there.
    pub fn on_pointer_down(
        &mut self,
        client: Point,
        button: Button,
        modifiers: Modifiers,
        probe: Option<&ElementProbe>,
    ) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }

        if self.measure.is_enabled() {
            let ctx = measure_context(&self.config, &self.lines, &self.metrics, self.ruler, probe, modifiers);
            let view = self.measure.press(client, modifiers.shift, &ctx);
            return view.map(Action::MeasureRendered).into_iter().collect();
        }
        if self.picker.is_enabled() {
            return Vec::new();
        }

        let Some(line) = probe.and_then(ElementProbe::line).and_then(|id| self.lines.get(&id)).copied() else {
            return Vec::new();
        };
        if modifiers.shift {
            return self.remove_line(&line.id);
        }
        self.input = InputState::DraggingLine { id: line.id, axis: line.axis };
        debug!(id = %line.id, "line drag started");
        Vec::new()
    }

    /// Pointer moved to `client`.
    pub fn on_pointer_move(&mut self, client: Point, modifiers: Modifiers, probe: Option<&ElementProbe>) -> Vec<Action> {
        if self.measure.is_active() {
            let ctx = measure_context(&self.config, &self.lines, &self.metrics, self.ruler, probe, modifiers);
            let view = self.measure.move_to(client, modifiers.shift, &ctx);
            return view.map(Action::MeasureRendered).into_iter().collect();
        }
        if self.picker.is_enabled() {
            let change = self.picker.hover(probe);
            return self.hover_actions(change);
        }
        if let InputState::DraggingLine { id, axis } = self.input {
            return self.drag_line(id, axis, client, modifiers, probe);
        }
        Vec::new()
    }

    /// Pointer released. Ends a measure gesture or a line drag.
    pub fn on_pointer_up(&mut self, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        if self.measure.release() {
            return Vec::new();
        }
        if let InputState::DraggingLine { id, .. } = self.input {
            self.input = InputState::Idle;
            debug!(id = %id, "line drag ended");
            self.persist_lines();
        }
        Vec::new()
    }

    /// Click: confirms the picker when something is hovered.
    ///
    /// The element's box is re-read from `probe` when it is still the hovered
    /// element; otherwise the box from the last hover is used.
    pub fn on_click(&mut self, probe: Option<&ElementProbe>) -> Vec<Action> {
        let Some(hovered) = self.picker.confirm() else {
            return Vec::new();
        };
        let rect = probe.filter(|p| p.element == hovered.element).map_or(hovered.rect, |p| p.rect);
        let mode = self.lines.mode();
        let scroll = self.metrics.scroll;

        let mut actions = vec![
            Action::ClearHighlight { element: hovered.element },
            Action::PickerLabelHidden,
            set_cursor(CURSOR_RESET),
        ];
        for (axis, offset) in picker::box_lines(rect, mode, scroll) {
            let line = self.lines.create(axis, Some(offset), None, &self.metrics);
            actions.push(Action::LineRendered(line.view(&self.metrics)));
        }
        debug!(element = hovered.element, "picker confirmed; four lines created");
        self.persist_lines();
        actions
    }

    /// Pointer left the document.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        match self.picker.leave() {
            Some(element) => vec![Action::ClearHighlight { element }, Action::PickerLabelHidden],
            None => Vec::new(),
        }
    }

    /// Key pressed; `editable_focus` is true while a text input has focus.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers, editable_focus: bool) -> Vec<Action> {
        match command::shortcut(key, modifiers, editable_focus) {
            Some(cmd) => self.apply_command(cmd),
            None => Vec::new(),
        }
    }

    // --- Page geometry ---

    /// Document scrolled. Frozen lines need their extents refreshed.
    pub fn on_scroll(&mut self, scroll: Scroll) -> Vec<Action> {
        self.metrics.scroll = scroll;
        if !self.lines.mode().is_frozen() {
            return Vec::new();
        }
        self.schedule(PendingWork { line_extents: true, ruler: false })
    }

    /// Window resized.
    pub fn on_resize(&mut self, viewport: Size, document: Size, dpr: f64) -> Vec<Action> {
        self.metrics.viewport = viewport;
        self.metrics.document = document;
        self.metrics.dpr = dpr;
        self.schedule(PendingWork { line_extents: true, ruler: self.ruler.visible })
    }

    /// Document content changed size.
    pub fn on_content_resize(&mut self, document: Size) -> Vec<Action> {
        self.metrics.document = document;
        self.schedule(PendingWork { line_extents: true, ruler: false })
    }

    /// Run the work coalesced since the last frame.
    pub fn on_animation_frame(&mut self) -> Vec<Action> {
        let work = self.frames.take();
        let mut actions = Vec::new();
        if work.line_extents && self.lines.mode().is_frozen() {
            actions.extend(self.line_views());
        }
        if work.ruler && self.ruler.visible {
            actions.push(Action::RulerRendered(self.ruler_layout()));
        }
        actions
    }

    fn schedule(&mut self, work: PendingWork) -> Vec<Action> {
        if self.frames.request(work) { vec![Action::RequestFrame] } else { Vec::new() }
    }

    // --- Queries ---

    #[must_use]
    pub fn page_key(&self) -> &str {
        &self.page_key
    }

    #[must_use]
    pub fn mode(&self) -> AnchorMode {
        self.lines.mode()
    }

    #[must_use]
    pub fn line(&self, id: &LineId) -> Option<&GuideLine> {
        self.lines.get(id)
    }

    /// Id of the line following the pointer, if any.
    #[must_use]
    pub fn dragging_line(&self) -> Option<LineId> {
        match self.input {
            InputState::DraggingLine { id, .. } => Some(id),
            InputState::Idle => None,
        }
    }

    /// Current shared settings.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            line_color: self.lines.default_color(),
            ruler_visible: self.ruler.visible,
            freeze_lines: self.lines.mode().is_frozen(),
        }
    }

    #[must_use]
    pub fn ruler_layout(&self) -> RulerLayout {
        RulerLayout::compute(self.metrics.viewport, self.metrics.dpr, self.config.ruler_tick_spacing_px)
    }

    // --- Helpers ---

    fn line_views(&self) -> Vec<Action> {
        self.lines.lines().iter().map(|l| Action::LineRendered(l.view(&self.metrics))).collect()
    }

    fn picker_label(&self, rect: Rect) -> PickerLabelView {
        picker::label_view(rect, self.lines.mode(), self.metrics.scroll, self.lines.default_color())
    }

    fn hover_actions(&self, change: HoverChange) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(element) = change.cleared {
            actions.push(Action::ClearHighlight { element });
        }
        match change.hovered {
            Some(h) => {
                actions.push(Action::HighlightElement { element: h.element, color: self.lines.default_color() });
                actions.push(Action::PickerLabelShown(self.picker_label(h.rect)));
            }
            None if change.cleared.is_some() => actions.push(Action::PickerLabelHidden),
            None => {}
        }
        actions
    }

    /// Follow the pointer with a dragged line, snapping in the line's own space.
    fn drag_line(
        &mut self,
        id: LineId,
        axis: Axis,
        client: Point,
        modifiers: Modifiers,
        probe: Option<&ElementProbe>,
    ) -> Vec<Action> {
        let Some(mode) = self.lines.get(&id).map(|l| l.mode) else {
            self.input = InputState::Idle;
            return Vec::new();
        };
        let scroll = self.metrics.scroll;
        let raw = space::migrate_anchor_mode(axis.pick(client), axis, AnchorMode::Unfrozen, mode, scroll);
        let query = SnapQuery {
            axis,
            raw,
            space: mode,
            scroll,
            lines: self.lines.lines(),
            exclude: Some(id),
            element: page_element_rect(probe),
            ruler_ticks: self.ruler.visible,
            suppressed: modifiers.alt,
        };
        let snap = self.config.resolver().resolve(&query);
        match self.lines.set_offset(&id, snap.position) {
            Some(line) => vec![Action::LineRendered(line.view(&self.metrics))],
            None => Vec::new(),
        }
    }
}

fn set_cursor(cursor: &str) -> Action {
    Action::SetCursor { cursor: cursor.to_owned() }
}

fn command_color(raw: Option<&str>) -> Option<Rgb> {
    let raw = raw?;
    let parsed = Rgb::parse(raw);
    if parsed.is_none() {
        warn!(color = %raw, "unrecognized line color; using default");
    }
    parsed
}

fn page_element_rect(probe: Option<&ElementProbe>) -> Option<Rect> {
    probe.filter(|p| p.is_page_element()).map(|p| p.rect)
}

fn measure_context<'a>(
    config: &OverlayConfig,
    lines: &'a GuideLineStore,
    metrics: &PageMetrics,
    ruler: RulerState,
    probe: Option<&ElementProbe>,
    modifiers: Modifiers,
) -> MeasureContext<'a> {
    MeasureContext {
        resolver: config.resolver(),
        lines: lines.lines(),
        scroll: metrics.scroll,
        mode: lines.mode(),
        element: page_element_rect(probe),
        ruler_ticks: ruler.visible,
        suppressed: modifiers.alt,
    }
}
