//! Shape model: committed shape records and the append-only list that owns them.
//!
//! Shapes are stored in world coordinates exactly as they were dragged
//! (start and end are not normalized). The list is insertion-ordered and
//! that order is paint order. Records arrive from two places, the input
//! engine on pointer-up and the collaboration channel, and both go through
//! [`ShapeList::append`].

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::error::EngineError;

/// The kind of a committed shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle with rounded corners.
    Rectangle,
    /// Ellipse inscribed in the drag box.
    Circle,
    /// Rhombus with vertices at the drag box edge midpoints.
    Diamond,
    /// Straight segment from start to end.
    Line,
}

/// A committed shape as stored in the list and sent over the wire.
///
/// Wire form: `{"type": "rectangle", "startX": 0, "startY": 0, "endX": 10, "endY": 10}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Shape type.
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// Drag start x in world coordinates.
    pub start_x: f64,
    /// Drag start y in world coordinates.
    pub start_y: f64,
    /// Drag end x in world coordinates.
    pub end_x: f64,
    /// Drag end y in world coordinates.
    pub end_y: f64,
}

/// Min/max-normalized bounding box of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

impl Shape {
    #[must_use]
    pub fn new(kind: ShapeKind, start: Point, end: Point) -> Self {
        Self { kind, start_x: start.x, start_y: start.y, end_x: end.x, end_y: end.y }
    }

    #[must_use]
    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    #[must_use]
    pub fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }

    /// Axis-aligned box spanned by start and end, with non-negative extent.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.start_x.min(self.end_x),
            y: self.start_y.min(self.end_y),
            width: (self.end_x - self.start_x).abs(),
            height: (self.end_y - self.start_y).abs(),
        }
    }

    /// True when start and end coincide on both axes.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start() == self.end()
    }

    /// Check that every coordinate is finite.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidShape`] naming the first bad field.
    pub fn validate(&self) -> Result<(), EngineError> {
        let fields = [
            ("startX", self.start_x),
            ("startY", self.start_y),
            ("endX", self.end_x),
            ("endY", self.end_y),
        ];
        match fields.iter().find(|(_, v)| !v.is_finite()) {
            Some((name, v)) => Err(EngineError::InvalidShape(format!("{name} is {v}"))),
            None => Ok(()),
        }
    }

    /// Parse a shape from its JSON wire form and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Decode`] for malformed JSON or an unknown
    /// `type` tag, and [`EngineError::InvalidShape`] for non-finite values.
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        let shape: Shape = serde_json::from_str(raw)?;
        shape.validate()?;
        Ok(shape)
    }

    /// Serialize to the JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Decode`] if serialization fails.
    #[cfg(test)]
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Append-only, insertion-ordered list of committed shapes.
#[derive(Debug, Clone, Default)]
pub struct ShapeList {
    shapes: Vec<Shape>,
}

impl ShapeList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Add a shape to the end of the list.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidShape`] if any coordinate is not finite;
    /// the list is unchanged in that case.
    pub fn append(&mut self, shape: Shape) -> Result<(), EngineError> {
        shape.validate()?;
        self.shapes.push(shape);
        Ok(())
    }

    /// All shapes in insertion (paint) order.
    #[must_use]
    pub fn all(&self) -> &[Shape] {
        &self.shapes
    }

    /// Number of shapes in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the list holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
