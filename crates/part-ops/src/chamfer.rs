use sdf_kernel::{Kernel, Polygon, Solid3};
use tracing::{debug, instrument};

use crate::types::SynthesisError;

fn check_factor(field: &'static str, factor: f64) -> Result<(), SynthesisError> {
    if !(0.0..1.0).contains(&factor) {
        return Err(SynthesisError::invalid(
            field,
            format!("chamfer factor must be in [0, 1), got {factor}"),
        ));
    }
    Ok(())
}

/// Chamfer the circular edges of a cylinder-like solid centered on the origin.
///
/// The nominal radius and half length are read from the bounding box of
/// `base`. Chamfer sizes are `radius * bottom_factor` and `radius * top_factor`.
#[instrument(skip(kernel, base), level = "debug")]
pub fn chamfered_cylinder(
    kernel: &mut dyn Kernel,
    base: &Solid3,
    bottom_factor: f64,
    top_factor: f64,
) -> Result<Solid3, SynthesisError> {
    check_factor("bottom_factor", bottom_factor)?;
    check_factor("top_factor", top_factor)?;

    let bb = base.bounding_box();
    let half_length = bb.max.z;
    let radius = bb.max.x;
    if !(radius > 0.0) || !(half_length > 0.0) {
        return Err(SynthesisError::invalid(
            "base",
            "bounding box does not enclose the origin",
        ));
    }
    // both cuts share the side wall of length 2 * half_length
    let wall_used = radius * (bottom_factor + top_factor);
    if wall_used > 2.0 * half_length {
        return Err(SynthesisError::invalid(
            "top_factor",
            format!(
                "chamfers of {wall_used} overlap on a side wall of length {}",
                2.0 * half_length
            ),
        ));
    }
    debug!(radius, half_length, "chamfer profile");

    let mut profile = Polygon::new();
    profile.add(0.0, -half_length);
    profile.add(radius, -half_length).chamfer(radius * bottom_factor);
    profile.add(radius, half_length).chamfer(radius * top_factor);
    profile.add(0.0, half_length);

    let shape = kernel.polygon2d(&profile.vertices())?;
    let cutter = kernel.revolve3d(&shape);
    Ok(kernel.intersect3d(&[cutter, base.clone()])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use sdf_kernel::{KernelOp, RecordingKernel};

    #[test]
    fn test_factor_out_of_range_makes_no_kernel_calls() {
        let mut k = RecordingKernel::new();
        let base = k.cylinder3d(4.0, 1.0, 0.0).unwrap();
        k.clear();
        let err = chamfered_cylinder(&mut k, &base, 1.0, 0.0).unwrap_err();
        assert_eq!(err.field(), Some("bottom_factor"));
        let err = chamfered_cylinder(&mut k, &base, 0.0, -0.1).unwrap_err();
        assert_eq!(err.field(), Some("top_factor"));
        assert!(k.ops().is_empty());
    }

    #[test]
    fn test_overlapping_chamfers_on_flat_disk() {
        let mut k = RecordingKernel::new();
        let disk = k.cylinder3d(2.0, 10.0, 0.0).unwrap();
        k.clear();
        let err = chamfered_cylinder(&mut k, &disk, 0.5, 0.5).unwrap_err();
        assert_eq!(err.field(), Some("top_factor"));
        assert!(k.ops().is_empty());

        // each factor alone fits, the pair together does not
        assert!(chamfered_cylinder(&mut k, &disk, 0.15, 0.0).is_ok());
        assert!(chamfered_cylinder(&mut k, &disk, 0.15, 0.1).is_err());
    }

    #[test]
    fn test_revolve_then_intersect() {
        let mut k = RecordingKernel::new();
        let base = k.cylinder3d(4.0, 1.0, 0.0).unwrap();
        k.clear();
        chamfered_cylinder(&mut k, &base, 0.2, 0.2).unwrap();
        assert_eq!(k.op_names(), vec!["polygon2d", "revolve3d", "intersect3d"]);
        // two chamfered corners add one vertex each
        assert_eq!(k.ops()[0], KernelOp::Polygon2d { vertices: 6 });
    }

    #[test]
    fn test_top_edge_removed() {
        let mut k = RecordingKernel::new();
        let base = k.cylinder3d(4.0, 1.0, 0.0).unwrap();
        let c = chamfered_cylinder(&mut k, &base, 0.0, 0.5).unwrap();
        // corner of the top edge is cut away, bottom edge is kept
        assert!(base.evaluate(&Point3::new(0.95, 0.0, 1.95)) < 0.0);
        assert!(c.evaluate(&Point3::new(0.95, 0.0, 1.95)) > 0.0);
        assert!(c.evaluate(&Point3::new(0.95, 0.0, -1.95)) < 0.0);
    }
}
