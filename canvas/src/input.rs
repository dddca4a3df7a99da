//! Input model: tools, modifier keys, mouse buttons, cursors, and the gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InputState` is the active gesture being tracked between
//! pointer-down and pointer-up; it is an enum so a gesture is either idle,
//! panning, or drawing and never a mix.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::ShapeKind;
use crate::error::EngineError;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pointer / select tool. Drags with it create nothing.
    #[serde(alias = "arrow")]
    Select,
    /// Drag to pan the view.
    Hand,
    /// Draw a rounded rectangle.
    #[default]
    Rectangle,
    /// Draw an ellipse.
    Circle,
    /// Draw a rounded diamond.
    Diamond,
    /// Draw a straight line segment.
    Line,
}

impl Tool {
    /// Every tool, in toolbar order.
    pub const ALL: [Tool; 6] = [Self::Select, Self::Hand, Self::Rectangle, Self::Circle, Self::Diamond, Self::Line];

    /// The shape a drag with this tool commits, if any.
    #[must_use]
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Self::Rectangle => Some(ShapeKind::Rectangle),
            Self::Circle => Some(ShapeKind::Circle),
            Self::Diamond => Some(ShapeKind::Diamond),
            Self::Line => Some(ShapeKind::Line),
            Self::Select | Self::Hand => None,
        }
    }

    /// Cursor shown over the canvas while no gesture is active.
    #[must_use]
    pub fn idle_cursor(self) -> Cursor {
        match self {
            Self::Hand => Cursor::Grab,
            Self::Select => Cursor::Default,
            Self::Rectangle | Self::Circle | Self::Diamond | Self::Line => Cursor::Crosshair,
        }
    }

    /// Lowercase name used by hosts and on the wire.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Hand => "hand",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Line => "line",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = EngineError;

    /// Parse a tool name. `"arrow"` is accepted as the select tool.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arrow" => Ok(Self::Select),
            other => Self::ALL
                .into_iter()
                .find(|t| t.name() == other)
                .ok_or_else(|| EngineError::UnknownTool(other.to_owned())),
        }
    }
}

/// Mouse cursor affordance over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Plain arrow.
    Default,
    /// Precision cross for shape tools.
    Crosshair,
    /// Open hand: the view can be dragged.
    Grab,
    /// Closed hand: the view is being dragged.
    Grabbing,
}

impl Cursor {
    /// CSS `cursor` property value.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Crosshair => "crosshair",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn accelerator(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Internal state for the input state machine.
///
/// Each active variant carries the gesture context needed on the next move
/// or on release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is dragging the view.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
    /// The user is dragging out a new shape.
    Drawing {
        /// World-space point where the drag started.
        start_world: Point,
        /// Tool captured at pointer-down; later tool changes do not affect this gesture.
        tool: Tool,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
