use std::f64::consts::FRAC_PI_2;

use nalgebra::{Point3, Vector3};
use sdf_kernel::{Kernel, Solid3};
use tracing::{debug, instrument};

use crate::types::{
    require_non_negative, SynthesisError, TruncRectPyramidDims, TruncRectPyramidParms,
};

impl TruncRectPyramidParms {
    pub fn validate(&self) -> Result<(), SynthesisError> {
        require_non_negative("size.x", self.size.x)?;
        require_non_negative("size.y", self.size.y)?;
        // a zero height pyramid has no volume to build
        if !(self.size.z > 0.0) {
            return Err(SynthesisError::invalid(
                "size.z",
                format!("must be > 0, got {}", self.size.z),
            ));
        }
        if !(self.base_angle > 0.0 && self.base_angle <= FRAC_PI_2) {
            return Err(SynthesisError::invalid(
                "base_angle",
                format!("must be in (0, π/2], got {}", self.base_angle),
            ));
        }
        require_non_negative("base_radius", self.base_radius)?;
        require_non_negative("round_radius", self.round_radius)?;
        if self.base_radius == 0.0 && self.base_angle == FRAC_PI_2 {
            return Err(SynthesisError::invalid(
                "base_radius",
                "vertical walls need a base radius > 0",
            ));
        }
        Ok(())
    }

    /// Validate and work out the cone radii, rounding and elongation.
    pub fn derive(&self) -> Result<TruncRectPyramidDims, SynthesisError> {
        self.validate()?;
        let h = self.size.z;
        let dr = if self.base_angle == FRAC_PI_2 {
            0.0
        } else {
            h / self.base_angle.tan()
        };
        let rb = self.base_radius + dr;
        let rt = (self.base_radius - dr).max(0.0);
        // the cone is 2h tall, so the round can't exceed h either
        let round = (0.5 * rt).min(self.round_radius).min(h);
        Ok(TruncRectPyramidDims {
            h,
            dr,
            rb,
            rt,
            round,
            wx: (self.size.x - 2.0 * self.base_radius).max(0.0),
            wy: (self.size.y - 2.0 * self.base_radius).max(0.0),
        })
    }
}

/// Truncated rectangular pyramid with rounded edges, standing on z = 0.
///
/// Built as a rounded cone of twice the height, stretched in x and y and
/// cut at z = 0.
#[instrument(skip(kernel), level = "debug")]
pub fn trunc_rect_pyramid3d(
    kernel: &mut dyn Kernel,
    parms: &TruncRectPyramidParms,
) -> Result<Solid3, SynthesisError> {
    let dims = parms.derive()?;
    debug!(dr = dims.dr, rb = dims.rb, rt = dims.rt, round = dims.round, "pyramid");

    let cone = kernel.cone3d(2.0 * dims.h, dims.rb, dims.rt, dims.round)?;
    let stretched = kernel.elongate3d(&cone, Vector3::new(dims.wx, dims.wy, 0.0))?;
    Ok(kernel.cut3d(&stretched, Point3::origin(), Vector3::z())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sdf_kernel::RecordingKernel;

    fn parms(size: [f64; 3], base_angle: f64, base_radius: f64, round_radius: f64) -> TruncRectPyramidParms {
        TruncRectPyramidParms {
            size: Vector3::new(size[0], size[1], size[2]),
            base_angle,
            base_radius,
            round_radius,
        }
    }

    #[test]
    fn test_vertical_walls() {
        let d = parms([40.0, 30.0, 10.0], FRAC_PI_2, 2.0, 1.0).derive().unwrap();
        assert_eq!(d.dr, 0.0);
        assert_eq!(d.rb, 2.0);
        assert_eq!(d.rt, 2.0);
        assert_eq!(d.round, 1.0);
        assert_eq!(d.wx, 36.0);
        assert_eq!(d.wy, 26.0);
    }

    #[test]
    fn test_round_clamped_to_half_top_radius() {
        let d = parms([10.0, 10.0, 1.0], FRAC_PI_2 / 2.0, 3.0, 5.0).derive().unwrap();
        assert_relative_eq!(d.dr, 1.0, epsilon = 1e-12);
        assert_relative_eq!(d.rt, 2.0, epsilon = 1e-12);
        assert_relative_eq!(d.round, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_round_clamped_to_height() {
        let d = parms([10.0, 10.0, 0.5], FRAC_PI_2, 5.0, 4.0).derive().unwrap();
        assert_eq!(d.round, 0.5);
    }

    #[test]
    fn test_pointed_top() {
        let d = parms([20.0, 10.0, 5.0], 0.5, 0.0, 1.0).derive().unwrap();
        assert_eq!(d.rt, 0.0);
        assert_eq!(d.round, 0.0);
    }

    #[test]
    fn test_validation_fields() {
        let cases = [
            (parms([-1.0, 1.0, 1.0], 1.0, 1.0, 0.0), "size.x"),
            (parms([1.0, -1.0, 1.0], 1.0, 1.0, 0.0), "size.y"),
            (parms([1.0, 1.0, 0.0], 1.0, 1.0, 0.0), "size.z"),
            (parms([1.0, 1.0, 1.0], 0.0, 1.0, 0.0), "base_angle"),
            (parms([1.0, 1.0, 1.0], 1.6, 1.0, 0.0), "base_angle"),
            (parms([1.0, 1.0, 1.0], 1.0, -1.0, 0.0), "base_radius"),
            (parms([1.0, 1.0, 1.0], 1.0, 1.0, -1.0), "round_radius"),
            (parms([1.0, 1.0, 1.0], FRAC_PI_2, 0.0, 0.0), "base_radius"),
        ];
        for (p, field) in cases {
            let mut k = RecordingKernel::new();
            let err = trunc_rect_pyramid3d(&mut k, &p).unwrap_err();
            assert_eq!(err.field(), Some(field), "{p:?}");
            assert!(k.ops().is_empty());
        }
    }

    #[test]
    fn test_composition_order() {
        let mut k = RecordingKernel::new();
        let solid = trunc_rect_pyramid3d(&mut k, &parms([40.0, 30.0, 10.0], FRAC_PI_2, 2.0, 1.0)).unwrap();
        assert_eq!(k.op_names(), vec!["cone3d", "elongate3d", "cut3d"]);
        let bb = solid.bounding_box();
        assert_relative_eq!(bb.min.z, 0.0);
        assert_relative_eq!(bb.max.z, 10.0);
        assert_relative_eq!(bb.size().x, 40.0);
        assert_relative_eq!(bb.size().y, 30.0);
    }
}
