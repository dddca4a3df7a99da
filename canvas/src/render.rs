//! Rendering: draws the full scene through a [`Painter`].
//!
//! The renderer receives read-only views of the shape list, camera, and
//! in-progress preview and produces pixels; it does not mutate any
//! application state. Every frame repaints everything, so transform changes
//! never leave stale pixels behind.
//!
//! [`CanvasRenderingContext2d`] is the production painter. Fallible calls
//! propagate `Result<(), JsValue>` like the Canvas2D API they wrap; the
//! top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::Camera;
use crate::config::{CanvasConfig, GridConfig};
use crate::doc::{Shape, ShapeKind};
use crate::geom::{self, Path, PathCmd};

/// The drawing operations the renderer needs from a 2D surface.
///
/// Coordinates are in whatever space the current transform establishes.
pub trait Painter {
    /// Reset the transform to a plain device-pixel-ratio scale.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface rejects the transform.
    fn set_pixel_ratio(&mut self, dpr: f64) -> Result<(), JsValue>;
    fn clear(&mut self, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);
    fn save(&mut self);
    fn restore(&mut self);
    /// # Errors
    ///
    /// Returns `Err` if the surface rejects the transform.
    fn translate(&mut self, x: f64, y: f64) -> Result<(), JsValue>;
    /// Uniform scale.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface rejects the transform.
    fn scale(&mut self, factor: f64) -> Result<(), JsValue>;
    /// Stroke color and width, with round caps and joins.
    fn set_stroke(&mut self, color: &str, width: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Full axis-aligned ellipse subpath.
    ///
    /// # Errors
    ///
    /// Returns `Err` for negative radii.
    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) -> Result<(), JsValue>;
    fn close_path(&mut self);
    fn stroke(&mut self);
}

impl Painter for CanvasRenderingContext2d {
    fn set_pixel_ratio(&mut self, dpr: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::set_transform(self, dpr, 0.0, 0.0, dpr, 0.0, 0.0)
    }

    fn clear(&mut self, width: f64, height: f64) {
        CanvasRenderingContext2d::clear_rect(self, 0.0, 0.0, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.set_fill_style_str(color);
        CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::translate(self, x, y)
    }

    fn scale(&mut self, factor: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::scale(self, factor, factor)
    }

    fn set_stroke(&mut self, color: &str, width: f64) {
        self.set_stroke_style_str(color);
        self.set_line_width(width);
        self.set_line_cap("round");
        self.set_line_join("round");
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.quadratic_curve_to(cx, cy, x, y);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::rect(self, x, y, width, height);
    }

    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::ellipse(self, cx, cy, rx, ry, 0.0, 0.0, TAU)
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }
}

/// Surface size in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 0.0, height: 0.0, dpr: 1.0 }
    }
}

/// Everything one frame reads.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub shapes: &'a [Shape],
    pub preview: Option<&'a Shape>,
    pub camera: &'a Camera,
    pub viewport: Viewport,
}

/// World-space stroke parameters for one frame.
struct ShapeStyle {
    corner_radius: f64,
    diamond_ratio: f64,
}

/// Draw the full scene: background, grid, committed shapes, then the preview.
///
/// The world transform is pushed with `save` and popped with `restore`
/// before returning, also on error, so repeated frames never compound.
///
/// # Errors
///
/// Returns `Err` if any fallible painter call fails.
pub fn draw<P: Painter>(painter: &mut P, scene: &Scene<'_>, config: &CanvasConfig) -> Result<(), JsValue> {
    let vp = scene.viewport;

    // Layer 1: clear and background, in screen space.
    painter.set_pixel_ratio(vp.dpr)?;
    painter.clear(vp.width, vp.height);
    painter.fill_rect(0.0, 0.0, vp.width, vp.height, &config.background);

    // Layer 2: grid, still in screen space.
    draw_grid(painter, scene.camera, vp, &config.grid);

    // Layer 3: shapes in world space.
    painter.save();
    let result = draw_world(painter, scene, config);
    painter.restore();
    result
}

fn draw_world<P: Painter>(painter: &mut P, scene: &Scene<'_>, config: &CanvasConfig) -> Result<(), JsValue> {
    let camera = scene.camera;
    painter.translate(camera.pan_x, camera.pan_y)?;
    painter.scale(camera.zoom)?;
    painter.set_stroke(&config.stroke, camera.screen_dist_to_world(config.stroke_width_px));

    let style = ShapeStyle {
        corner_radius: camera.screen_dist_to_world(config.rect_corner_radius_px),
        diamond_ratio: config.diamond_corner_ratio,
    };
    for shape in scene.shapes {
        draw_shape(painter, shape, &style)?;
    }
    if let Some(preview) = scene.preview {
        draw_shape(painter, preview, &style)?;
    }
    Ok(())
}

// =============================================================
// Grid
// =============================================================

/// Screen-space grid whose lines sit on world multiples of `cell_size`.
///
/// World `k * cell_size` maps to screen `pan + k * step`, so the first visible
/// line is at `pan.rem_euclid(step)`, a positive phase rather than a negated one.
fn draw_grid<P: Painter>(painter: &mut P, camera: &Camera, vp: Viewport, grid: &GridConfig) {
    if !grid.enabled {
        return;
    }
    let step = grid.cell_size * camera.zoom;
    if step <= grid.min_cell_px || !step.is_finite() {
        return;
    }

    painter.set_stroke(&grid.color, grid.line_width_px);
    painter.begin_path();
    let mut x = camera.pan_x.rem_euclid(step);
    while x <= vp.width {
        painter.move_to(x, 0.0);
        painter.line_to(x, vp.height);
        x += step;
    }
    let mut y = camera.pan_y.rem_euclid(step);
    while y <= vp.height {
        painter.move_to(0.0, y);
        painter.line_to(vp.width, y);
        y += step;
    }
    painter.stroke();
}

// =============================================================
// Shapes
// =============================================================

fn draw_shape<P: Painter>(painter: &mut P, shape: &Shape, style: &ShapeStyle) -> Result<(), JsValue> {
    let b = shape.bounds();
    match shape.kind {
        ShapeKind::Rectangle => {
            trace_path(painter, &geom::rounded_rect_path(b.x, b.y, b.width, b.height, style.corner_radius));
        }
        ShapeKind::Circle => {
            let c = b.center();
            painter.begin_path();
            painter.ellipse(c.x, c.y, b.width / 2.0, b.height / 2.0)?;
        }
        ShapeKind::Diamond => {
            let radius = b.width.min(b.height) * style.diamond_ratio;
            trace_path(painter, &geom::diamond_path(b.x, b.y, b.width, b.height, radius));
        }
        ShapeKind::Line => {
            painter.begin_path();
            painter.move_to(shape.start_x, shape.start_y);
            painter.line_to(shape.end_x, shape.end_y);
        }
    }
    painter.stroke();
    Ok(())
}

fn trace_path<P: Painter>(painter: &mut P, path: &Path) {
    painter.begin_path();
    for cmd in path.cmds() {
        match *cmd {
            PathCmd::MoveTo(p) => painter.move_to(p.x, p.y),
            PathCmd::LineTo(p) => painter.line_to(p.x, p.y),
            PathCmd::QuadTo { ctrl, to } => painter.quad_to(ctrl.x, ctrl.y, to.x, to.y),
            PathCmd::Rect { x, y, width, height } => painter.rect(x, y, width, height),
            PathCmd::Close => painter.close_path(),
        }
    }
}
