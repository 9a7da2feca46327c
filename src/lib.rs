//! Layout guide overlay: draggable guide lines, rulers, a measure tool, and an
//! element picker drawn over an arbitrary web page.
//!
//! This crate is compiled to WebAssembly and runs inside the page. Its core is
//! the coordinate and snapping engine: every guide line keeps its offset in
//! exactly one of two spaces (page-anchored "frozen" or viewport-anchored
//! "unfrozen"), migrates losslessly between them when the user flips the
//! anchor toggle, and snaps during drags against other lines, the element
//! under the cursor, and ruler ticks. The host script only wires DOM events to
//! [`web::Overlay`] and applies the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Per-page controller [`engine::EngineCore`] and host actions |
//! | [`space`] | Page/viewport coordinates and anchor-mode migration |
//! | [`line`] | Guide line records, the line store, and render views |
//! | [`snap`] | Nearest-candidate snapping across lines, element edges, ruler ticks |
//! | [`measure`] | Measure tool state machine |
//! | [`picker`] | Element picker state machine and size label placement |
//! | [`ruler`] | Ruler visibility and tick geometry |
//! | [`schedule`] | Once-per-frame coalescing of expensive recomputation |
//! | [`storage`] | Persistence trait, page keys, persisted record codec, settings |
//! | [`command`] | Control-surface messages and keyboard shortcuts |
//! | [`input`] | Input event types, element probes, drag state |
//! | [`config`] | Thresholds, spacing, default color, storage keys |
//! | [`color`] | Color parsing and contrast text color |
//! | [`render`] | Canvas2D ruler drawing |
//! | [`web`] | `wasm-bindgen` export and host-supplied storage backend |
//! | [`consts`] | Shared numeric and string constants |

pub mod color;
pub mod command;
pub mod config;
pub mod consts;
pub mod engine;
pub mod input;
pub mod line;
pub mod measure;
pub mod picker;
pub mod render;
pub mod ruler;
pub mod schedule;
pub mod snap;
pub mod space;
pub mod storage;
pub mod web;
