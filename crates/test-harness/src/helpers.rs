//! Helper functions: error type and planar sampling of solids.

use nalgebra::{Point2, Point3};
use part_ops::SynthesisError;
use sdf_kernel::{Box2, KernelError, Solid3};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("report error: {0}")]
    Report(#[from] serde_json::Error),
}

// ── Slicing ─────────────────────────────────────────────────────────────────

/// Inside/outside samples of a solid on a horizontal plane.
///
/// Samples sit at cell centers of a `resolution × resolution` grid over the
/// solid's bounding box, so two slices of the same solid are cell-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub z: f64,
    pub bounds: Box2,
    pub resolution: usize,
    /// Row-major, `true` where the distance is negative.
    pub cells: Vec<bool>,
}

impl Slice {
    pub fn cell_area(&self) -> f64 {
        let size = self.bounds.size();
        size.x * size.y / (self.resolution * self.resolution) as f64
    }

    pub fn inside_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn area(&self) -> f64 {
        self.inside_count() as f64 * self.cell_area()
    }

    /// Number of cells whose membership differs from `other`.
    pub fn mismatches(&self, other: &Slice) -> usize {
        self.cells
            .iter()
            .zip(&other.cells)
            .filter(|(a, b)| a != b)
            .count()
    }
}

/// Cell center sample points of a grid over `bounds`.
pub fn grid_points(bounds: &Box2, resolution: usize) -> Vec<Point2<f64>> {
    let size = bounds.size();
    let dx = size.x / resolution as f64;
    let dy = size.y / resolution as f64;
    let mut points = Vec::with_capacity(resolution * resolution);
    for j in 0..resolution {
        for i in 0..resolution {
            points.push(Point2::new(
                bounds.min.x + (i as f64 + 0.5) * dx,
                bounds.min.y + (j as f64 + 0.5) * dy,
            ));
        }
    }
    points
}

/// Sample `solid` on the plane at height `z`.
pub fn slice_membership(solid: &Solid3, z: f64, resolution: usize) -> Slice {
    let bb = solid.bounding_box();
    let bounds = Box2::new(Point2::new(bb.min.x, bb.min.y), Point2::new(bb.max.x, bb.max.y));
    let cells = grid_points(&bounds, resolution)
        .iter()
        .map(|p| solid.evaluate(&Point3::new(p.x, p.y, z)) < 0.0)
        .collect();
    Slice {
        z,
        bounds,
        resolution,
        cells,
    }
}

/// Approximate cross-section area of `solid` at height `z`.
pub fn slice_area(solid: &Solid3, z: f64, resolution: usize) -> f64 {
    slice_membership(solid, z, resolution).area()
}

/// Points on a regular 3D lattice filling the bounding box of `solid`.
pub fn lattice_points(solid: &Solid3, per_axis: usize) -> Vec<Point3<f64>> {
    let bb = solid.bounding_box();
    let size = bb.size();
    let mut points = Vec::with_capacity(per_axis.pow(3));
    for k in 0..per_axis {
        for j in 0..per_axis {
            for i in 0..per_axis {
                let t = |n: usize| (n as f64 + 0.5) / per_axis as f64;
                points.push(Point3::new(
                    bb.min.x + t(i) * size.x,
                    bb.min.y + t(j) * size.y,
                    bb.min.z + t(k) * size.z,
                ));
            }
        }
    }
    points
}
