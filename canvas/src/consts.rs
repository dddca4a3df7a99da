//! Shared numeric constants for the canvas crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest zoom factor the camera accepts.
pub const ZOOM_MIN: f64 = 0.1;

/// Largest zoom factor the camera accepts.
pub const ZOOM_MAX: f64 = 5.0;

/// Per-tick zoom factor when the wheel scrolls up (zoom in).
pub const ZOOM_IN_FACTOR: f64 = 1.1;

/// Per-tick zoom factor when the wheel scrolls down (zoom out).
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

// ── Geometry ────────────────────────────────────────────────────

/// Below this width or height (world units) a rounded rectangle is drawn square.
pub const MIN_ROUNDED_EXTENT: f64 = 2.0;

/// Edge lengths shorter than this are treated as zero when rounding corners.
pub const GEOM_EPSILON: f64 = 1e-9;
