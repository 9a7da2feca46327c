//! WebAssembly surface for the content script.
//!
//! The host script owns every DOM node. It forwards page events to
//! [`Overlay`] as small JSON payloads and applies the returned JSON array of
//! [`Action`]s. Persistence goes through a [`HostStore`] the host supplies,
//! typically a synchronous cache over extension storage, so settings are
//! shared across sites and out of reach of the page's own scripts.

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::config::OverlayConfig;
use crate::engine::{Action, EngineCore};
use crate::input::{Button, ElementProbe, Key, Modifiers};
use crate::render;
use crate::space::{Point, Scroll, Size};
use crate::storage::{LayoutStorage, StorageError};

#[wasm_bindgen]
extern "C" {
    /// Host-side string store: `get(key)` returns the value or
    /// `null`/`undefined`; `set(key, value)` replaces it. Either may throw.
    pub type HostStore;

    #[wasm_bindgen(method, catch)]
    fn get(this: &HostStore, key: &str) -> Result<Option<String>, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn set(this: &HostStore, key: &str, value: &str) -> Result<(), JsValue>;
}

/// [`LayoutStorage`] backed by a [`HostStore`].
pub struct WebStorage {
    store: HostStore,
}

impl WebStorage {
    #[must_use]
    pub fn new(store: HostStore) -> Self {
        Self { store }
    }
}

impl LayoutStorage for WebStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.store.get(key).map_err(backend_error)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store.set(key, value).map_err(backend_error)
    }
}

fn backend_error(e: JsValue) -> StorageError {
    StorageError::Backend(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

#[derive(Debug, Deserialize)]
struct PointerPayload {
    x: f64,
    y: f64,
    #[serde(default)]
    button: i16,
    #[serde(default)]
    modifiers: Modifiers,
    #[serde(default)]
    probe: Option<ElementProbe>,
}

impl PointerPayload {
    fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyPayload {
    key: String,
    #[serde(default)]
    modifiers: Modifiers,
    #[serde(default)]
    editable_focus: bool,
}

/// One overlay instance per page.
#[wasm_bindgen]
pub struct Overlay {
    core: EngineCore<WebStorage>,
}

#[wasm_bindgen]
impl Overlay {
    /// Create the overlay for `origin` + `pathname` persisting to `store`,
    /// optionally overriding defaults with a JSON config object.
    #[wasm_bindgen(constructor)]
    pub fn new(origin: &str, pathname: &str, store: HostStore, config: Option<String>) -> Result<Overlay, JsValue> {
        let config = match config {
            Some(raw) => OverlayConfig::from_json(&raw).map_err(to_js)?,
            None => OverlayConfig::default(),
        };
        Ok(Self { core: EngineCore::new(config, WebStorage::new(store), origin, pathname) })
    }

    /// Restore persisted state. Call once after construction.
    pub fn load(&mut self) -> Result<String, JsValue> {
        actions_json(&self.core.load())
    }

    /// Apply a control-surface message (`{"action": ...}`).
    pub fn command(&mut self, message: &str) -> Result<String, JsValue> {
        actions_json(&self.core.apply_message(message))
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, event: &str) -> Result<String, JsValue> {
        let e = parse_pointer(event)?;
        actions_json(&self.core.on_pointer_down(e.point(), Button::from_dom(e.button), e.modifiers, e.probe.as_ref()))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, event: &str) -> Result<String, JsValue> {
        let e = parse_pointer(event)?;
        actions_json(&self.core.on_pointer_move(e.point(), e.modifiers, e.probe.as_ref()))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, event: &str) -> Result<String, JsValue> {
        let e = parse_pointer(event)?;
        actions_json(&self.core.on_pointer_up(Button::from_dom(e.button)))
    }

    pub fn click(&mut self, event: &str) -> Result<String, JsValue> {
        let e = parse_pointer(event)?;
        actions_json(&self.core.on_click(e.probe.as_ref()))
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) -> Result<String, JsValue> {
        actions_json(&self.core.on_pointer_leave())
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, event: &str) -> Result<String, JsValue> {
        let e: KeyPayload = serde_json::from_str(event).map_err(to_js)?;
        actions_json(&self.core.on_key_down(&Key(e.key), e.modifiers, e.editable_focus))
    }

    pub fn scroll(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        actions_json(&self.core.on_scroll(Scroll::new(x, y)))
    }

    pub fn resize(
        &mut self,
        viewport_width: f64,
        viewport_height: f64,
        document_width: f64,
        document_height: f64,
        dpr: f64,
    ) -> Result<String, JsValue> {
        let viewport = Size::new(viewport_width, viewport_height);
        let document = Size::new(document_width, document_height);
        actions_json(&self.core.on_resize(viewport, document, dpr))
    }

    #[wasm_bindgen(js_name = contentResize)]
    pub fn content_resize(&mut self, document_width: f64, document_height: f64) -> Result<String, JsValue> {
        actions_json(&self.core.on_content_resize(Size::new(document_width, document_height)))
    }

    #[wasm_bindgen(js_name = animationFrame)]
    pub fn animation_frame(&mut self) -> Result<String, JsValue> {
        actions_json(&self.core.on_animation_frame())
    }

    /// Draw the current ruler layout into the two strip canvases.
    #[wasm_bindgen(js_name = drawRulers)]
    pub fn draw_rulers(&self, top: &HtmlCanvasElement, left: &HtmlCanvasElement) -> Result<(), JsValue> {
        render::draw_rulers(top, left, &self.core.ruler_layout())
    }

    /// Shared settings as JSON, for the control surface.
    pub fn settings(&self) -> Result<String, JsValue> {
        self.core.settings().encode().map_err(to_js)
    }

    #[wasm_bindgen(js_name = isFrozen)]
    pub fn is_frozen(&self) -> bool {
        self.core.mode().is_frozen()
    }
}

fn parse_pointer(event: &str) -> Result<PointerPayload, JsValue> {
    serde_json::from_str(event).map_err(to_js)
}

fn actions_json(actions: &[Action]) -> Result<String, JsValue> {
    serde_json::to_string(actions).map_err(to_js)
}

/// Surface a Rust error to the host as a thrown JS `Error`.
fn to_js(e: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}
