//! Geometry kernel: rounded outlines built as plain path data.
//!
//! Nothing here touches a rendering context. Functions return [`Path`]
//! values in whatever unit the caller passes in (the renderer passes world
//! units); [`crate::render`] replays them onto a painter.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use crate::camera::Point;
use crate::consts::{GEOM_EPSILON, MIN_ROUNDED_EXTENT};

/// One drawing command in a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    /// Start a new subpath at the point.
    MoveTo(Point),
    /// Straight segment to the point.
    LineTo(Point),
    /// Quadratic Bézier to `to` using `ctrl` as its control point.
    QuadTo { ctrl: Point, to: Point },
    /// Closed axis-aligned rectangle subpath.
    Rect { x: f64, y: f64, width: f64, height: f64 },
    /// Close the current subpath.
    Close,
}

/// An ordered list of path commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    cmds: Vec<PathCmd>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: PathCmd) {
        self.cmds.push(cmd);
    }

    pub fn extend(&mut self, cmds: impl IntoIterator<Item = PathCmd>) {
        self.cmds.extend(cmds);
    }

    #[must_use]
    pub fn cmds(&self) -> &[PathCmd] {
        &self.cmds
    }

    /// Every point the path references, anchors and control points alike.
    /// Rectangles contribute their four corners.
    #[cfg(test)]
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.cmds.iter().flat_map(|cmd| match *cmd {
            PathCmd::MoveTo(p) | PathCmd::LineTo(p) => vec![p],
            PathCmd::QuadTo { ctrl, to } => vec![ctrl, to],
            PathCmd::Rect { x, y, width, height } => vec![
                Point::new(x, y),
                Point::new(x + width, y),
                Point::new(x + width, y + height),
                Point::new(x, y + height),
            ],
            PathCmd::Close => Vec::new(),
        })
    }
}

/// Rectangle outline with corners rounded by `radius`.
///
/// `width` and `height` may be negative; corners are rounded toward the
/// interior either way. The radius is clamped to `[0, min(|w|, |h|) / 2]`.
/// When either extent is under [`MIN_ROUNDED_EXTENT`] the outline is a
/// plain rectangle.
#[must_use]
pub fn rounded_rect_path(x: f64, y: f64, width: f64, height: f64, radius: f64) -> Path {
    let mut path = Path::new();
    if width.abs() < MIN_ROUNDED_EXTENT || height.abs() < MIN_ROUNDED_EXTENT {
        path.push(PathCmd::Rect { x, y, width, height });
        path.push(PathCmd::Close);
        return path;
    }

    let r = radius.max(0.0).min(width.abs().min(height.abs()) / 2.0);
    let rx = r.copysign(width);
    let ry = r.copysign(height);
    let right = x + width;
    let bottom = y + height;

    path.push(PathCmd::MoveTo(Point::new(x + rx, y)));
    path.push(PathCmd::LineTo(Point::new(right - rx, y)));
    path.push(PathCmd::QuadTo { ctrl: Point::new(right, y), to: Point::new(right, y + ry) });
    path.push(PathCmd::LineTo(Point::new(right, bottom - ry)));
    path.push(PathCmd::QuadTo { ctrl: Point::new(right, bottom), to: Point::new(right - rx, bottom) });
    path.push(PathCmd::LineTo(Point::new(x + rx, bottom)));
    path.push(PathCmd::QuadTo { ctrl: Point::new(x, bottom), to: Point::new(x, bottom - ry) });
    path.push(PathCmd::LineTo(Point::new(x, y + ry)));
    path.push(PathCmd::QuadTo { ctrl: Point::new(x, y), to: Point::new(x + rx, y) });
    path.push(PathCmd::Close);
    path
}

/// Segment that runs into `corner` and rounds it on the way toward `to`.
///
/// Emits a line to the curve start followed by a quadratic curve with the
/// corner as its control point. The radius is clamped to half the shorter
/// adjacent edge so neighbouring corners never overlap. A zero-length
/// adjacent edge leaves the corner sharp.
#[must_use]
pub fn rounded_corner_segment(from: Point, corner: Point, to: Point, radius: f64) -> Vec<PathCmd> {
    let d1 = from.distance(corner);
    let d2 = corner.distance(to);
    if d1 < GEOM_EPSILON || d2 < GEOM_EPSILON {
        return vec![PathCmd::LineTo(corner)];
    }

    let r = radius.max(0.0).min(d1.min(d2) * 0.5);
    let start = corner.lerp(from, r / d1);
    let end = corner.lerp(to, r / d2);
    vec![PathCmd::LineTo(start), PathCmd::QuadTo { ctrl: corner, to: end }]
}

/// Rhombus with vertices at the midpoints of the box edges, corners rounded.
///
/// `x`, `y`, `width`, `height` describe a normalized (non-negative extent)
/// bounding box.
#[must_use]
pub fn diamond_path(x: f64, y: f64, width: f64, height: f64, radius: f64) -> Path {
    let cx = x + width / 2.0;
    let cy = y + height / 2.0;
    let top = Point::new(cx, y);
    let right = Point::new(x + width, cy);
    let bottom = Point::new(cx, y + height);
    let left = Point::new(x, cy);

    let corners = [(top, right, bottom), (right, bottom, left), (bottom, left, top), (left, top, right)];

    let mut path = Path::new();
    for (i, (from, corner, to)) in corners.into_iter().enumerate() {
        let mut segment = rounded_corner_segment(from, corner, to, radius);
        if i == 0 {
            if let Some(first) = segment.first_mut() {
                if let PathCmd::LineTo(p) = *first {
                    *first = PathCmd::MoveTo(p);
                }
            }
        }
        path.extend(segment);
    }
    path.push(PathCmd::Close);
    path
}
