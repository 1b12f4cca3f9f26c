//! SdfKernel: geometry kernel backed by composed distance functions.

use std::f64::consts::TAU;

use nalgebra::{Point2, Point3, Vector3};
use tracing::trace;

use crate::config::Tolerance;
use crate::operations::*;
use crate::primitives::*;
use crate::traits::Kernel;
use crate::types::*;

/// Kernel that builds signed distance field trees.
///
/// Stateless apart from its tolerance; every call returns a fresh handle.
#[derive(Debug, Clone, Default)]
pub struct SdfKernel {
    tolerance: Tolerance,
}

impl SdfKernel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }
}

fn require_positive(operation: &'static str, name: &str, value: f64) -> Result<(), KernelError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(KernelError::invalid(operation, format!("{name} <= 0")))
    }
}

fn require_non_negative(operation: &'static str, name: &str, value: f64) -> Result<(), KernelError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(KernelError::invalid(operation, format!("{name} < 0")))
    }
}

impl Kernel for SdfKernel {
    fn polygon2d(&mut self, vertices: &[Point2<f64>]) -> Result<Shape2, KernelError> {
        let mut points: Vec<Point2<f64>> = Vec::with_capacity(vertices.len());
        for p in vertices {
            if points
                .last()
                .map_or(true, |last| !self.tolerance.points_coincident(last, p))
            {
                points.push(*p);
            }
        }
        while points.len() > 1 && self.tolerance.points_coincident(&points[0], &points[points.len() - 1]) {
            points.pop();
        }
        if points.len() < 3 {
            return Err(KernelError::invalid(
                "polygon2d",
                format!("need at least 3 distinct vertices, got {}", points.len()),
            ));
        }
        trace!(vertices = points.len(), "polygon2d");
        Ok(Shape2::new(PolygonSdf2::new(points)))
    }

    fn offset2d(&mut self, shape: &Shape2, distance: f64) -> Shape2 {
        trace!(distance, "offset2d");
        Shape2::new(OffsetSdf2::new(shape.clone(), distance))
    }

    fn cylinder3d(&mut self, height: f64, radius: f64, round: f64) -> Result<Solid3, KernelError> {
        require_positive("cylinder3d", "height", height)?;
        require_positive("cylinder3d", "radius", radius)?;
        require_non_negative("cylinder3d", "round", round)?;
        if round > radius || round > 0.5 * height {
            return Err(KernelError::invalid(
                "cylinder3d",
                format!("round {round} exceeds radius {radius} or half height {}", 0.5 * height),
            ));
        }
        trace!(height, radius, round, "cylinder3d");
        Ok(Solid3::new(CylinderSdf3::new(height, radius, round)))
    }

    fn cone3d(&mut self, height: f64, r0: f64, r1: f64, round: f64) -> Result<Solid3, KernelError> {
        require_positive("cone3d", "height", height)?;
        require_non_negative("cone3d", "r0", r0)?;
        require_non_negative("cone3d", "r1", r1)?;
        require_non_negative("cone3d", "round", round)?;
        if r0 == 0.0 && r1 == 0.0 {
            return Err(KernelError::invalid("cone3d", "r0 and r1 are both zero"));
        }
        if round > 0.5 * height {
            return Err(KernelError::invalid("cone3d", "round > height/2"));
        }
        trace!(height, r0, r1, round, "cone3d");
        ConeSdf3::new(height, r0, r1, round)
            .map(Solid3::new)
            .ok_or_else(|| KernelError::invalid("cone3d", "round consumes the whole cone"))
    }

    fn sphere3d(&mut self, radius: f64) -> Result<Solid3, KernelError> {
        require_positive("sphere3d", "radius", radius)?;
        trace!(radius, "sphere3d");
        Ok(Solid3::new(SphereSdf3::new(radius)))
    }

    fn extrude3d(&mut self, profile: &Shape2, height: f64) -> Result<Solid3, KernelError> {
        require_positive("extrude3d", "height", height)?;
        trace!(height, "extrude3d");
        Ok(Solid3::new(ExtrudeSdf3::new(profile.clone(), height)))
    }

    fn revolve3d(&mut self, profile: &Shape2) -> Solid3 {
        trace!("revolve3d");
        Solid3::new(RevolveSdf3::new(profile.clone(), None))
    }

    fn revolve_theta3d(&mut self, profile: &Shape2, theta: f64) -> Result<Solid3, KernelError> {
        if theta <= 0.0 || theta > TAU {
            return Err(KernelError::invalid("revolve_theta3d", "theta must be in (0, 2π]"));
        }
        trace!(theta, "revolve_theta3d");
        let theta = if theta >= TAU { None } else { Some(theta) };
        Ok(Solid3::new(RevolveSdf3::new(profile.clone(), theta)))
    }

    fn screw3d(
        &mut self,
        profile: &Shape2,
        length: f64,
        pitch: f64,
        starts: i32,
    ) -> Result<Solid3, KernelError> {
        require_positive("screw3d", "length", length)?;
        require_positive("screw3d", "pitch", pitch)?;
        trace!(length, pitch, starts, "screw3d");
        Ok(Solid3::new(ScrewSdf3::new(profile.clone(), length, pitch, starts)))
    }

    fn union3d(&mut self, solids: &[Solid3]) -> Result<Solid3, KernelError> {
        match solids {
            [] => Err(KernelError::EmptyCombinator { operation: "union3d" }),
            [single] => Ok(single.clone()),
            _ => {
                trace!(operands = solids.len(), "union3d");
                Ok(Solid3::new(UnionSdf3::new(solids.to_vec())))
            }
        }
    }

    fn intersect3d(&mut self, solids: &[Solid3]) -> Result<Solid3, KernelError> {
        match solids {
            [] => Err(KernelError::EmptyCombinator {
                operation: "intersect3d",
            }),
            [single] => Ok(single.clone()),
            _ => {
                trace!(operands = solids.len(), "intersect3d");
                Ok(Solid3::new(IntersectSdf3::new(solids.to_vec())))
            }
        }
    }

    fn difference3d(&mut self, a: &Solid3, b: &Solid3) -> Solid3 {
        trace!("difference3d");
        Solid3::new(DifferenceSdf3::new(a.clone(), b.clone()))
    }

    fn elongate3d(&mut self, solid: &Solid3, h: Vector3<f64>) -> Result<Solid3, KernelError> {
        if h.iter().any(|&c| c < 0.0) {
            return Err(KernelError::invalid("elongate3d", "elongation components < 0"));
        }
        trace!(h = ?h.as_slice(), "elongate3d");
        Ok(Solid3::new(ElongateSdf3::new(solid.clone(), h)))
    }

    fn cut3d(
        &mut self,
        solid: &Solid3,
        point: Point3<f64>,
        normal: Vector3<f64>,
    ) -> Result<Solid3, KernelError> {
        let len = normal.norm();
        if self.tolerance.is_zero_length(len) {
            return Err(KernelError::invalid("cut3d", "normal has zero length"));
        }
        trace!(point = ?point.coords.as_slice(), normal = ?normal.as_slice(), "cut3d");
        Ok(Solid3::new(CutSdf3::new(
            solid.clone(),
            point,
            normal / len,
            self.tolerance.angular,
        )))
    }

    fn translate3d(&mut self, solid: &Solid3, offset: Vector3<f64>) -> Solid3 {
        trace!(offset = ?offset.as_slice(), "translate3d");
        Solid3::new(TranslateSdf3::new(solid.clone(), offset))
    }
}
