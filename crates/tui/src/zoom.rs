//! Horizontal zoom for the Gantt panel.
//!
//! Zoom only widens or narrows the drawn bar area. Layout percentages are
//! untouched.

/// Smallest zoom factor
pub const MIN_ZOOM: f64 = 0.5;

/// Largest zoom factor
pub const MAX_ZOOM: f64 = 3.0;

/// Multiplier applied per zoom step
pub const ZOOM_STEP: f64 = 1.2;

/// Zoom factor, always within `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom(f64);

impl Default for Zoom {
    fn default() -> Self {
        Self(1.0)
    }
}

impl Zoom {
    pub fn factor(self) -> f64 {
        self.0
    }

    pub fn zoom_in(&mut self) {
        self.0 = (self.0 * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.0 = (self.0 / ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Zoom as a whole percentage, for the status line.
    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}
