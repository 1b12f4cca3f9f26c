//! Numeric tolerances shared by the kernel and its callers.

/// Tolerance thresholds for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Points closer than this are considered coincident (millimetres).
    pub coincidence: f64,
    /// Angles and direction components smaller than this (radians) are zero.
    pub angular: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: 1e-9,
            angular: 1e-9,
        }
    }
}

impl Tolerance {
    pub fn points_coincident(&self, a: &nalgebra::Point2<f64>, b: &nalgebra::Point2<f64>) -> bool {
        nalgebra::distance(a, b) < self.coincidence
    }

    pub fn is_zero_length(&self, length: f64) -> bool {
        length.abs() < self.coincidence
    }

    pub fn is_zero_angle(&self, angle: f64) -> bool {
        angle.abs() < self.angular
    }
}

pub fn default_tolerance() -> Tolerance {
    Tolerance::default()
}
