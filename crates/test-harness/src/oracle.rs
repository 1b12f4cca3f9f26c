//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics,
//! so a test can collect every failure in one pass.

use nalgebra::Point3;
use sdf_kernel::Solid3;
use serde::Serialize;

use crate::helpers::{lattice_points, slice_membership, HarnessError};

/// The result of a single oracle check.
#[derive(Debug, Clone, Serialize)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: Some(value),
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: Some(value),
        }
    }

    /// Turn a failed verdict into an error.
    pub fn into_result(self) -> Result<(), HarnessError> {
        if self.passed {
            Ok(())
        } else {
            Err(HarnessError::OracleFailure {
                oracle: self.oracle_name,
                detail: self.detail,
            })
        }
    }
}

// ── Extent Oracles ──────────────────────────────────────────────────────────

/// Check the bounding box is non-empty and finite.
pub fn check_bounding_box(solid: &Solid3) -> OracleVerdict {
    let bb = solid.bounding_box();
    let finite = (0..3).all(|i| bb.min[i].is_finite() && bb.max[i].is_finite());
    if !finite {
        return OracleVerdict::fail("bounding_box", format!("non-finite box {:?}", bb));
    }
    if bb.is_empty() {
        return OracleVerdict::fail("bounding_box", format!("empty box {:?}", bb));
    }
    let size = bb.size();
    OracleVerdict::pass(
        "bounding_box",
        format!("{:.3} x {:.3} x {:.3}", size.x, size.y, size.z),
    )
}

/// Check the z extent of the bounding box.
pub fn check_height(solid: &Solid3, expected: f64, tol: f64) -> OracleVerdict {
    let h = solid.bounding_box().size().z;
    if (h - expected).abs() <= tol {
        OracleVerdict::pass_val("height", format!("height {:.4}", h), h)
    } else {
        OracleVerdict::fail_val(
            "height",
            format!("expected height {:.4}, got {:.4}", expected, h),
            h,
        )
    }
}

/// Check the bounding box center lies on the z axis.
pub fn check_axis_centered(solid: &Solid3, tol: f64) -> OracleVerdict {
    let c = solid.bounding_box().center();
    let off = c.x.hypot(c.y);
    if off <= tol {
        OracleVerdict::pass_val("axis_centered", format!("center offset {:.2e}", off), off)
    } else {
        OracleVerdict::fail_val(
            "axis_centered",
            format!("center ({:.4}, {:.4}) is off axis", c.x, c.y),
            off,
        )
    }
}

// ── Field Oracles ───────────────────────────────────────────────────────────

/// Check the solid has some interior: at least one lattice sample inside.
pub fn check_non_empty(solid: &Solid3, per_axis: usize) -> OracleVerdict {
    let inside = lattice_points(solid, per_axis)
        .iter()
        .filter(|p| solid.evaluate(p) < 0.0)
        .count();
    if inside > 0 {
        OracleVerdict::pass_val(
            "non_empty",
            format!("{} of {} samples inside", inside, per_axis.pow(3)),
            inside as f64,
        )
    } else {
        OracleVerdict::fail("non_empty", "no samples inside".to_string())
    }
}

/// Check no point outside the bounding box reports a negative distance.
pub fn check_contained_in_bounds(solid: &Solid3, per_axis: usize) -> OracleVerdict {
    let bb = solid.bounding_box();
    // sample a lattice over a box twice the size
    let grown = bb.enlarge(&(bb.size() * 0.5));
    let size = grown.size();
    let t = |n: usize| (n as f64 + 0.5) / per_axis as f64;
    for k in 0..per_axis {
        for j in 0..per_axis {
            for i in 0..per_axis {
                let p = Point3::new(
                    grown.min.x + t(i) * size.x,
                    grown.min.y + t(j) * size.y,
                    grown.min.z + t(k) * size.z,
                );
                if !bb.contains(&p) && solid.evaluate(&p) < 0.0 {
                    return OracleVerdict::fail(
                        "contained_in_bounds",
                        format!("({:.3}, {:.3}, {:.3}) inside but out of bounds", p.x, p.y, p.z),
                    );
                }
            }
        }
    }
    OracleVerdict::pass("contained_in_bounds", "no interior outside box".to_string())
}

/// Check two solids agree on the sign of the distance over a lattice
/// covering the first one.
pub fn check_same_membership(a: &Solid3, b: &Solid3, per_axis: usize) -> OracleVerdict {
    let points = lattice_points(a, per_axis);
    let differing = points
        .iter()
        .filter(|p| (a.evaluate(p) < 0.0) != (b.evaluate(p) < 0.0))
        .count();
    if differing == 0 {
        OracleVerdict::pass(
            "same_membership",
            format!("{} samples agree", points.len()),
        )
    } else {
        OracleVerdict::fail_val(
            "same_membership",
            format!("{} of {} samples differ", differing, points.len()),
            differing as f64,
        )
    }
}

/// Check the largest difference in distance over a lattice is within `tol`.
pub fn check_same_field(a: &Solid3, b: &Solid3, per_axis: usize, tol: f64) -> OracleVerdict {
    let max_diff = lattice_points(a, per_axis)
        .iter()
        .map(|p| (a.evaluate(p) - b.evaluate(p)).abs())
        .fold(0.0, f64::max);
    if max_diff <= tol {
        OracleVerdict::pass_val("same_field", format!("max diff {:.2e}", max_diff), max_diff)
    } else {
        OracleVerdict::fail_val(
            "same_field",
            format!("max diff {:.4e} exceeds {:.1e}", max_diff, tol),
            max_diff,
        )
    }
}

// ── Slice Oracles ───────────────────────────────────────────────────────────

/// Check the cross-section just below the top of the bounding box has the
/// expected area. `depth` is how far below the top the slice is taken.
pub fn check_top_face_area(
    solid: &Solid3,
    expected: f64,
    depth: f64,
    resolution: usize,
    tol: f64,
) -> OracleVerdict {
    let z = solid.bounding_box().max.z - depth;
    let area = slice_membership(solid, z, resolution).area();
    if (area - expected).abs() <= tol {
        OracleVerdict::pass_val("top_face_area", format!("area {:.4} at z={}", area, z), area)
    } else {
        OracleVerdict::fail_val(
            "top_face_area",
            format!("expected area {:.4}, got {:.4} at z={}", expected, area, z),
            area,
        )
    }
}

/// Check cross-sections at two heights cover the same cells.
pub fn check_congruent_slices(solid: &Solid3, z0: f64, z1: f64, resolution: usize) -> OracleVerdict {
    let a = slice_membership(solid, z0, resolution);
    let b = slice_membership(solid, z1, resolution);
    let diff = a.mismatches(&b);
    if diff == 0 {
        OracleVerdict::pass(
            "congruent_slices",
            format!("z={} and z={}: {} cells inside", z0, z1, a.inside_count()),
        )
    } else {
        OracleVerdict::fail_val(
            "congruent_slices",
            format!("z={} and z={} differ in {} cells", z0, z1, diff),
            diff as f64,
        )
    }
}

/// Run the structural checks every synthesized part should pass.
pub fn run_solid_checks(solid: &Solid3, per_axis: usize) -> Vec<OracleVerdict> {
    vec![
        check_bounding_box(solid),
        check_non_empty(solid, per_axis),
        check_contained_in_bounds(solid, per_axis),
    ]
}
