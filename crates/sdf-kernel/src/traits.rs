use std::fmt;

use nalgebra::{Point2, Point3, Vector3};

use crate::thread::{iso_thread_profile, ThreadSide};
use crate::types::*;

/// A planar signed distance field. Negative inside, positive outside.
pub trait Sdf2: Send + Sync + fmt::Debug {
    fn evaluate(&self, p: &Point2<f64>) -> f64;
    fn bounding_box(&self) -> Box2;
}

/// A signed distance field in space. Negative inside, positive outside.
pub trait Sdf3: Send + Sync + fmt::Debug {
    fn evaluate(&self, p: &Point3<f64>) -> f64;
    fn bounding_box(&self) -> Box3;
}

impl Sdf2 for Shape2 {
    fn evaluate(&self, p: &Point2<f64>) -> f64 {
        Shape2::evaluate(self, p)
    }

    fn bounding_box(&self) -> Box2 {
        Shape2::bounding_box(self)
    }
}

impl Sdf3 for Solid3 {
    fn evaluate(&self, p: &Point3<f64>) -> f64 {
        Solid3::evaluate(self, p)
    }

    fn bounding_box(&self) -> Box3 {
        Solid3::bounding_box(self)
    }
}

/// Core geometry kernel trait: primitive constructors, sweeps and combinators.
/// Implemented by SdfKernel (distance-field evaluation) and RecordingKernel
/// (wraps another kernel and logs every call).
///
/// Constructors reject physically meaningless arguments. They never inspect
/// the tree they are given, so a well-formed composition is the caller's job.
pub trait Kernel {
    /// Closed polygon from an ordered vertex list. Needs at least 3 distinct vertices.
    fn polygon2d(&mut self, vertices: &[Point2<f64>]) -> Result<Shape2, KernelError>;

    /// Grow a planar shape outward by `distance` (shrink for negative values).
    fn offset2d(&mut self, shape: &Shape2, distance: f64) -> Shape2;

    /// ISO 60° thread profile in the (pitch, radius) plane.
    fn iso_thread(
        &mut self,
        radius: f64,
        pitch: f64,
        side: ThreadSide,
    ) -> Result<Shape2, KernelError> {
        let vertices = iso_thread_profile(radius, pitch, side)?;
        self.polygon2d(&vertices)
    }

    /// Cylinder along the z axis, centered on the origin, with rounded edges.
    fn cylinder3d(&mut self, height: f64, radius: f64, round: f64) -> Result<Solid3, KernelError>;

    /// Truncated cone along the z axis, centered on the origin.
    /// `r0` is the radius at `-height/2`, `r1` at `+height/2`.
    fn cone3d(
        &mut self,
        height: f64,
        r0: f64,
        r1: f64,
        round: f64,
    ) -> Result<Solid3, KernelError>;

    fn sphere3d(&mut self, radius: f64) -> Result<Solid3, KernelError>;

    /// Extrude a planar shape symmetrically along z.
    fn extrude3d(&mut self, profile: &Shape2, height: f64) -> Result<Solid3, KernelError>;

    /// Revolve a (radius, z) profile 360° around the z axis.
    fn revolve3d(&mut self, profile: &Shape2) -> Solid3;

    /// Revolve a (radius, z) profile by `theta` radians, starting from the +x axis.
    fn revolve_theta3d(&mut self, profile: &Shape2, theta: f64) -> Result<Solid3, KernelError>;

    /// Helical sweep of a (pitch, radius) profile along z.
    /// The sign of `starts` selects the handedness; zero gives straight ridges.
    fn screw3d(
        &mut self,
        profile: &Shape2,
        length: f64,
        pitch: f64,
        starts: i32,
    ) -> Result<Solid3, KernelError>;

    fn union3d(&mut self, solids: &[Solid3]) -> Result<Solid3, KernelError>;

    fn intersect3d(&mut self, solids: &[Solid3]) -> Result<Solid3, KernelError>;

    /// `a` minus `b`.
    fn difference3d(&mut self, a: &Solid3, b: &Solid3) -> Solid3;

    /// Stretch a solid by inserting flat segments of total length `h` per axis.
    fn elongate3d(&mut self, solid: &Solid3, h: Vector3<f64>) -> Result<Solid3, KernelError>;

    /// Keep the part of `solid` on the side of the plane the normal points to.
    fn cut3d(
        &mut self,
        solid: &Solid3,
        point: Point3<f64>,
        normal: Vector3<f64>,
    ) -> Result<Solid3, KernelError>;

    fn translate3d(&mut self, solid: &Solid3, offset: Vector3<f64>) -> Solid3;
}
