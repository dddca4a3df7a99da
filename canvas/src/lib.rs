//! Drawing engine for the collaborative whiteboard canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of the canvas: translating raw DOM pointer and wheel events
//! into camera moves and committed shapes, keeping the append-only shape list,
//! and redrawing the scene (background, grid, shapes, live preview) through
//! `Canvas2D`. The host JavaScript layer mounts a [`surface::Surface`] and
//! forwards committed shapes to collaborators; remote shapes come back in
//! through [`surface::Surface::apply_remote_json`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`surface`] | DOM event wiring and listener lifetime |
//! | [`doc`] | Shape model, wire format and the append-only shape list |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`geom`] | Rounded-rectangle and diamond outline geometry |
//! | [`input`] | Tools, cursors, input event types and the gesture state machine |
//! | [`render`] | Scene rendering behind the [`render::Painter`] seam |
//! | [`config`] | Visual configuration (colors, stroke, corner radii, grid) |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric constants (zoom limits, tolerances) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geom;
pub mod input;
pub mod render;
pub mod surface;

pub use error::EngineError;

/// Route `log` output to the browser console and install the panic hook.
///
/// # Errors
///
/// Returns [`EngineError::Dom`] if a logger is already installed.
#[cfg(feature = "console")]
pub fn init_logging(level: log::Level) -> Result<(), EngineError> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(level).map_err(|e| EngineError::Dom(e.to_string()))
}
