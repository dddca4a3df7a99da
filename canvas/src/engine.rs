use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point};
use crate::config::CanvasConfig;
use crate::consts::{ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::doc::{Shape, ShapeList};
use crate::error::EngineError;
use crate::input::{Button, Cursor, InputState, Modifiers, Tool, WheelDelta};
use crate::render::{self, Scene, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A drag gesture committed a new shape; forward it to collaborators.
    ShapeCreated(Shape),
    SetCursor(Cursor),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub doc: ShapeList,
    pub camera: Camera,
    pub tool: Tool,
    pub input: InputState,
    /// Uncommitted shape for the active drawing gesture, rebuilt on every move.
    pub preview: Option<Shape>,
    pub viewport: Viewport,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Append a shape delivered by the collaboration channel.
    ///
    /// Remote shapes are appended in delivery order exactly like local ones,
    /// with no coordinate translation or dedup.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidShape`] for non-finite coordinates.
    pub fn apply_remote(&mut self, shape: Shape) -> Result<Vec<Action>, EngineError> {
        self.doc.append(shape)?;
        log::debug!("remote {:?} appended ({} shapes)", shape.kind, self.doc.len());
        Ok(vec![Action::RenderNeeded])
    }

    /// Parse a wire-format shape message and append it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Decode`] or [`EngineError::InvalidShape`].
    pub fn apply_remote_json(&mut self, raw: &str) -> Result<Vec<Action>, EngineError> {
        let shape = Shape::from_json(raw)?;
        self.apply_remote(shape)
    }

    // --- Tool / viewport ---

    /// Set the active tool. The idle cursor follows immediately; an active
    /// gesture keeps the tool it started with.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.tool = tool;
        log::debug!("tool set to {tool}");
        if self.input.is_idle() {
            vec![Action::SetCursor(tool.idle_cursor())]
        } else {
            Vec::new()
        }
    }

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.viewport = Viewport { width: width_css, height: height_css, dpr };
        vec![Action::RenderNeeded]
    }

    /// Actions for a freshly mounted surface: the idle cursor of the active
    /// tool and a first frame.
    #[must_use]
    pub fn attach(&self) -> Vec<Action> {
        vec![Action::SetCursor(self.tool.idle_cursor()), Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button == Button::Secondary {
            return Vec::new();
        }

        let mut actions = Vec::new();
        let abandoned = !self.input.is_idle();
        if abandoned {
            log::debug!("abandoning unfinished gesture {:?}", self.input);
            if self.preview.take().is_some() {
                actions.push(Action::RenderNeeded);
            }
        }

        if button == Button::Middle || self.tool == Tool::Hand {
            self.input = InputState::Panning { last_screen: screen_pt };
            actions.push(Action::SetCursor(Cursor::Grabbing));
        } else {
            let start_world = self.camera.screen_to_world(screen_pt);
            self.input = InputState::Drawing { start_world, tool: self.tool };
            if abandoned {
                actions.push(Action::SetCursor(self.tool.idle_cursor()));
            }
        }
        actions
    }

    /// `buttons` is the DOM `buttons` bitmask. A move with nothing held during
    /// an active gesture means the release was missed, so the gesture is
    /// cancelled instead of continuing.
    pub fn on_pointer_move(&mut self, screen_pt: Point, buttons: u16, _modifiers: Modifiers) -> Vec<Action> {
        if buttons == 0 && !self.input.is_idle() {
            log::debug!("pointer released outside the canvas");
            return self.cancel_gesture();
        }
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::Panning { last_screen } => {
                self.camera.pan(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                self.input = InputState::Panning { last_screen: screen_pt };
                vec![Action::RenderNeeded]
            }
            InputState::Drawing { start_world, tool } => {
                let current = self.camera.screen_to_world(screen_pt);
                self.preview = tool
                    .shape_kind()
                    .map(|kind| Shape::new(kind, start_world, current));
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button == Button::Secondary {
            return Vec::new();
        }

        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Panning { .. } => vec![Action::SetCursor(self.tool.idle_cursor())],
            InputState::Drawing { start_world, tool } => {
                self.preview = None;
                let mut actions = Vec::new();
                let end_world = self.camera.screen_to_world(screen_pt);
                if let Some(kind) = tool.shape_kind() {
                    let shape = Shape::new(kind, start_world, end_world);
                    if shape.is_degenerate() {
                        log::debug!("discarding zero-length {kind:?} drag");
                    } else {
                        match self.doc.append(shape) {
                            Ok(()) => {
                                log::debug!("committed {kind:?} ({} shapes)", self.doc.len());
                                actions.push(Action::ShapeCreated(shape));
                            }
                            Err(e) => log::warn!("dropping drawn shape: {e}"),
                        }
                    }
                }
                actions.push(Action::RenderNeeded);
                actions
            }
        }
    }

    /// Zoom around the cursor when ctrl/meta is held. Plain wheel scrolling is ignored.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if !modifiers.accelerator() || delta.dy == 0.0 || delta.dy.is_nan() {
            return Vec::new();
        }
        let factor = if delta.dy > 0.0 { ZOOM_OUT_FACTOR } else { ZOOM_IN_FACTOR };
        self.camera.zoom_at(screen_pt, factor);
        vec![Action::RenderNeeded]
    }

    /// Abandon the active gesture (pointer cancel, focus loss). No shape is committed.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        if self.input.is_idle() {
            return Vec::new();
        }
        log::debug!("gesture cancelled: {:?}", self.input);
        self.input = InputState::Idle;
        self.preview = None;
        vec![Action::SetCursor(self.tool.idle_cursor()), Action::RenderNeeded]
    }

    // --- Queries ---

    /// The active tool.
    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Committed shapes in paint order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        self.doc.all()
    }

    /// Read-only view of everything the next frame draws.
    #[must_use]
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            shapes: self.doc.all(),
            preview: self.preview.as_ref(),
            camera: &self.camera,
            viewport: self.viewport,
        }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    config: CanvasConfig,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ContextUnavailable`] when the canvas has no 2d
    /// context, or [`EngineError::Dom`] when the lookup itself throws.
    pub fn new(canvas: HtmlCanvasElement, config: CanvasConfig) -> Result<Self, EngineError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| EngineError::dom(&e))?
            .ok_or(EngineError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::ContextUnavailable)?;
        Ok(Self { canvas, ctx, config, core: EngineCore::new() })
    }

    // --- Viewport ---

    /// Resize the backing store to `width_css × height_css` at `dpr` and
    /// record the viewport. Camera and shapes are untouched.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.canvas.set_width((width_css * dpr).round().max(0.0) as u32);
        self.canvas.set_height((height_css * dpr).round().max(0.0) as u32);
        log::debug!("viewport {width_css}x{height_css} @ {dpr}");
        self.core.set_viewport(width_css, height_css, dpr)
    }

    /// Apply a cursor affordance to the canvas element's style.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Dom`] if the style write is rejected.
    pub fn set_cursor(&self, cursor: Cursor) -> Result<(), EngineError> {
        self.canvas
            .style()
            .set_property("cursor", cursor.css())
            .map_err(|e| EngineError::dom(&e))
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        let scene = self.core.scene();
        render::draw(&mut self.ctx, &scene, &self.config)
    }
}
