//! Assertion helpers with diagnostic output.
//!
//! Each returns `Err(HarnessError::AssertionFailed)` carrying the caller's
//! context string plus expected and actual values.

use nalgebra::Point3;
use sdf_kernel::Solid3;

use crate::helpers::{slice_membership, HarnessError};

/// Assert the bounding box of a solid matches within tolerance.
pub fn assert_bounding_box(
    solid: &Solid3,
    expected_min: [f64; 3],
    expected_max: [f64; 3],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let bb = solid.bounding_box();
    for i in 0..3 {
        if (bb.min[i] - expected_min[i]).abs() > tol {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] bounding box min[{}]: expected {:.4}, got {:.4} (tol={})",
                    ctx, i, expected_min[i], bb.min[i], tol,
                ),
            });
        }
        if (bb.max[i] - expected_max[i]).abs() > tol {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] bounding box max[{}]: expected {:.4}, got {:.4} (tol={})",
                    ctx, i, expected_max[i], bb.max[i], tol,
                ),
            });
        }
    }
    Ok(())
}

/// Assert every point has a negative distance.
pub fn assert_inside(solid: &Solid3, points: &[Point3<f64>], ctx: &str) -> Result<(), HarnessError> {
    for p in points {
        let d = solid.evaluate(p);
        if d >= 0.0 {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] expected ({:.3}, {:.3}, {:.3}) inside, distance {:.4}",
                    ctx, p.x, p.y, p.z, d,
                ),
            });
        }
    }
    Ok(())
}

/// Assert every point has a positive distance.
pub fn assert_outside(solid: &Solid3, points: &[Point3<f64>], ctx: &str) -> Result<(), HarnessError> {
    for p in points {
        let d = solid.evaluate(p);
        if d <= 0.0 {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] expected ({:.3}, {:.3}, {:.3}) outside, distance {:.4}",
                    ctx, p.x, p.y, p.z, d,
                ),
            });
        }
    }
    Ok(())
}

/// Assert two horizontal cross-sections of a solid cover the same cells.
pub fn assert_slices_congruent(
    solid: &Solid3,
    z0: f64,
    z1: f64,
    resolution: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    let a = slice_membership(solid, z0, resolution);
    let b = slice_membership(solid, z1, resolution);
    let diff = a.mismatches(&b);
    if diff == 0 && a.inside_count() > 0 {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] slices at z={} and z={} differ in {} of {} cells ({} vs {} inside)",
                ctx,
                z0,
                z1,
                diff,
                a.cells.len(),
                a.inside_count(),
                b.inside_count(),
            ),
        })
    }
}
