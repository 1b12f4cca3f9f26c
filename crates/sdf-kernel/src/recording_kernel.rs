//! RecordingKernel: wraps another kernel and logs every constructor call.
//!
//! Used by tests to check which kernel operations a part function issues,
//! in what order and with which arguments.

use nalgebra::{Point2, Point3, Vector3};

use crate::sdf_kernel::SdfKernel;
use crate::thread::ThreadSide;
use crate::traits::Kernel;
use crate::types::*;

/// One recorded kernel call with its scalar arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelOp {
    Polygon2d { vertices: usize },
    Offset2d { distance: f64 },
    IsoThread { radius: f64, pitch: f64, side: ThreadSide },
    Cylinder3d { height: f64, radius: f64, round: f64 },
    Cone3d { height: f64, r0: f64, r1: f64, round: f64 },
    Sphere3d { radius: f64 },
    Extrude3d { height: f64 },
    Revolve3d,
    RevolveTheta3d { theta: f64 },
    Screw3d { length: f64, pitch: f64, starts: i32 },
    Union3d { operands: usize },
    Intersect3d { operands: usize },
    Difference3d,
    Elongate3d { h: Vector3<f64> },
    Cut3d { point: Point3<f64>, normal: Vector3<f64> },
    Translate3d { offset: Vector3<f64> },
}

impl KernelOp {
    pub fn name(&self) -> &'static str {
        match self {
            KernelOp::Polygon2d { .. } => "polygon2d",
            KernelOp::Offset2d { .. } => "offset2d",
            KernelOp::IsoThread { .. } => "iso_thread",
            KernelOp::Cylinder3d { .. } => "cylinder3d",
            KernelOp::Cone3d { .. } => "cone3d",
            KernelOp::Sphere3d { .. } => "sphere3d",
            KernelOp::Extrude3d { .. } => "extrude3d",
            KernelOp::Revolve3d => "revolve3d",
            KernelOp::RevolveTheta3d { .. } => "revolve_theta3d",
            KernelOp::Screw3d { .. } => "screw3d",
            KernelOp::Union3d { .. } => "union3d",
            KernelOp::Intersect3d { .. } => "intersect3d",
            KernelOp::Difference3d => "difference3d",
            KernelOp::Elongate3d { .. } => "elongate3d",
            KernelOp::Cut3d { .. } => "cut3d",
            KernelOp::Translate3d { .. } => "translate3d",
        }
    }
}

/// Kernel decorator that records each call before delegating.
///
/// Calls are recorded whether or not the inner kernel accepts them.
#[derive(Debug, Clone, Default)]
pub struct RecordingKernel<K: Kernel = SdfKernel> {
    inner: K,
    ops: Vec<KernelOp>,
}

impl RecordingKernel<SdfKernel> {
    pub fn new() -> Self {
        Self::wrap(SdfKernel::new())
    }
}

impl<K: Kernel> RecordingKernel<K> {
    pub fn wrap(inner: K) -> Self {
        Self {
            inner,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[KernelOp] {
        &self.ops
    }

    /// Names of the recorded calls, in order.
    pub fn op_names(&self) -> Vec<&'static str> {
        self.ops.iter().map(KernelOp::name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.ops.iter().filter(|op| op.name() == name).count()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn into_inner(self) -> K {
        self.inner
    }
}

impl<K: Kernel> Kernel for RecordingKernel<K> {
    fn polygon2d(&mut self, vertices: &[Point2<f64>]) -> Result<Shape2, KernelError> {
        self.ops.push(KernelOp::Polygon2d {
            vertices: vertices.len(),
        });
        self.inner.polygon2d(vertices)
    }

    fn offset2d(&mut self, shape: &Shape2, distance: f64) -> Shape2 {
        self.ops.push(KernelOp::Offset2d { distance });
        self.inner.offset2d(shape, distance)
    }

    fn iso_thread(
        &mut self,
        radius: f64,
        pitch: f64,
        side: ThreadSide,
    ) -> Result<Shape2, KernelError> {
        self.ops.push(KernelOp::IsoThread {
            radius,
            pitch,
            side,
        });
        self.inner.iso_thread(radius, pitch, side)
    }

    fn cylinder3d(&mut self, height: f64, radius: f64, round: f64) -> Result<Solid3, KernelError> {
        self.ops.push(KernelOp::Cylinder3d {
            height,
            radius,
            round,
        });
        self.inner.cylinder3d(height, radius, round)
    }

    fn cone3d(&mut self, height: f64, r0: f64, r1: f64, round: f64) -> Result<Solid3, KernelError> {
        self.ops.push(KernelOp::Cone3d {
            height,
            r0,
            r1,
            round,
        });
        self.inner.cone3d(height, r0, r1, round)
    }

    fn sphere3d(&mut self, radius: f64) -> Result<Solid3, KernelError> {
        self.ops.push(KernelOp::Sphere3d { radius });
        self.inner.sphere3d(radius)
    }

    fn extrude3d(&mut self, profile: &Shape2, height: f64) -> Result<Solid3, KernelError> {
        self.ops.push(KernelOp::Extrude3d { height });
        self.inner.extrude3d(profile, height)
    }

    fn revolve3d(&mut self, profile: &Shape2) -> Solid3 {
        self.ops.push(KernelOp::Revolve3d);
        self.inner.revolve3d(profile)
    }

    fn revolve_theta3d(&mut self, profile: &Shape2, theta: f64) -> Result<Solid3, KernelError> {
        self.ops.push(KernelOp::RevolveTheta3d { theta });
        self.inner.revolve_theta3d(profile, theta)
    }

    fn screw3d(
        &mut self,
        profile: &Shape2,
        length: f64,
        pitch: f64,
        starts: i32,
    ) -> Result<Solid3, KernelError> {
        self.ops.push(KernelOp::Screw3d {
            length,
            pitch,
            starts,
        });
        self.inner.screw3d(profile, length, pitch, starts)
    }

    fn union3d(&mut self, solids: &[Solid3]) -> Result<Solid3, KernelError> {
        self.ops.push(KernelOp::Union3d {
            operands: solids.len(),
        });
        self.inner.union3d(solids)
    }

    fn intersect3d(&mut self, solids: &[Solid3]) -> Result<Solid3, KernelError> {
        self.ops.push(KernelOp::Intersect3d {
            operands: solids.len(),
        });
        self.inner.intersect3d(solids)
    }

    fn difference3d(&mut self, a: &Solid3, b: &Solid3) -> Solid3 {
        self.ops.push(KernelOp::Difference3d);
        self.inner.difference3d(a, b)
    }

    fn elongate3d(&mut self, solid: &Solid3, h: Vector3<f64>) -> Result<Solid3, KernelError> {
        self.ops.push(KernelOp::Elongate3d { h });
        self.inner.elongate3d(solid, h)
    }

    fn cut3d(
        &mut self,
        solid: &Solid3,
        point: Point3<f64>,
        normal: Vector3<f64>,
    ) -> Result<Solid3, KernelError> {
        self.ops.push(KernelOp::Cut3d { point, normal });
        self.inner.cut3d(solid, point, normal)
    }

    fn translate3d(&mut self, solid: &Solid3, offset: Vector3<f64>) -> Solid3 {
        self.ops.push(KernelOp::Translate3d { offset });
        self.inner.translate3d(solid, offset)
    }
}
