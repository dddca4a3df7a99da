//! Visual configuration for the renderer, parsed from JSON with per-field defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const DEFAULT_BACKGROUND: &str = "rgba(18, 18, 18, 1)";
pub const DEFAULT_STROKE: &str = "rgba(240, 240, 240, 1)";
pub const DEFAULT_STROKE_WIDTH_PX: f64 = 2.0;
pub const DEFAULT_RECT_CORNER_RADIUS_PX: f64 = 40.0;
pub const DEFAULT_DIAMOND_CORNER_RATIO: f64 = 0.15;
pub const DEFAULT_GRID_CELL_SIZE: f64 = 20.0;
pub const DEFAULT_GRID_MIN_CELL_PX: f64 = 5.0;
pub const DEFAULT_GRID_COLOR: &str = "rgba(255, 255, 255, 0.06)";
pub const DEFAULT_GRID_LINE_WIDTH_PX: f64 = 1.0;

/// Renderer settings.
///
/// Pixel (`_px`) values are screen-space and are divided by the zoom when
/// drawn in world space, so they look the same at every zoom level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub background: String,
    pub stroke: String,
    pub stroke_width_px: f64,
    pub rect_corner_radius_px: f64,
    /// Diamond corner radius as a fraction of `min(width, height)` in world units.
    pub diamond_corner_ratio: f64,
    pub grid: GridConfig,
}

/// Background grid settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub enabled: bool,
    /// Grid pitch in world units.
    pub cell_size: f64,
    /// The grid is skipped when a cell would be smaller than this on screen.
    pub min_cell_px: f64,
    pub color: String,
    pub line_width_px: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_owned(),
            stroke: DEFAULT_STROKE.to_owned(),
            stroke_width_px: DEFAULT_STROKE_WIDTH_PX,
            rect_corner_radius_px: DEFAULT_RECT_CORNER_RADIUS_PX,
            diamond_corner_ratio: DEFAULT_DIAMOND_CORNER_RATIO,
            grid: GridConfig::default(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cell_size: DEFAULT_GRID_CELL_SIZE,
            min_cell_px: DEFAULT_GRID_MIN_CELL_PX,
            color: DEFAULT_GRID_COLOR.to_owned(),
            line_width_px: DEFAULT_GRID_LINE_WIDTH_PX,
        }
    }
}

impl CanvasConfig {
    /// Parse a (possibly partial) JSON config; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Decode`] for malformed JSON and
    /// [`EngineError::InvalidConfig`] when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), EngineError> {
        positive("stroke_width_px", self.stroke_width_px)?;
        non_negative("rect_corner_radius_px", self.rect_corner_radius_px)?;
        if !(0.0..=0.5).contains(&self.diamond_corner_ratio) {
            return Err(EngineError::InvalidConfig(format!(
                "diamond_corner_ratio must be within 0..=0.5, got {}",
                self.diamond_corner_ratio
            )));
        }
        positive("grid.cell_size", self.grid.cell_size)?;
        non_negative("grid.min_cell_px", self.grid.min_cell_px)?;
        positive("grid.line_width_px", self.grid.line_width_px)?;
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!("{name} must be positive, got {value}")))
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!("{name} must be non-negative, got {value}")))
    }
}
