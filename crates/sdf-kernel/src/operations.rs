//! Sweeps, combinators and modifiers over existing shapes.

use std::f64::consts::{FRAC_PI_2, TAU};

use nalgebra::{Point2, Point3, Vector3};

use crate::traits::Sdf3;
use crate::types::*;

/// Map `x` onto a saw-tooth wave of the given period, centered on zero.
pub fn saw_tooth(x: f64, period: f64) -> f64 {
    let x = x + 0.5 * period;
    x - period * (x / period).floor() - 0.5 * period
}

// ── Sweeps ──────────────────────────────────────────────────────────────────

/// Solid of revolution of a (radius, z) profile, optionally limited to a wedge.
#[derive(Debug, Clone)]
pub struct RevolveSdf3 {
    profile: Shape2,
    /// Swept angle starting at +x. `None` is a full turn.
    theta: Option<f64>,
    bb: Box3,
}

impl RevolveSdf3 {
    pub(crate) fn new(profile: Shape2, theta: Option<f64>) -> Self {
        let pb = profile.bounding_box();
        let r = pb.min.x.abs().max(pb.max.x.abs());
        let bb = Box3::new(Point3::new(-r, -r, pb.min.y), Point3::new(r, r, pb.max.y));
        Self { profile, theta, bb }
    }
}

impl Sdf3 for RevolveSdf3 {
    fn evaluate(&self, p: &Point3<f64>) -> f64 {
        let r = p.x.hypot(p.y);
        let d = self.profile.evaluate(&Point2::new(r, p.z));
        let Some(theta) = self.theta else {
            return d;
        };
        let mut a = p.y.atan2(p.x);
        if a < 0.0 {
            a += TAU;
        }
        if a <= theta {
            return d;
        }
        // angular distance to the nearest end of the wedge
        let gap = (a - theta).min(TAU - a).min(FRAC_PI_2);
        d.max(r * gap.sin())
    }

    fn bounding_box(&self) -> Box3 {
        self.bb
    }
}

/// Helical sweep of a (pitch, radius) profile along z.
#[derive(Debug, Clone)]
pub struct ScrewSdf3 {
    profile: Shape2,
    half_length: f64,
    pitch: f64,
    /// Axial advance per turn: `pitch * starts`.
    lead: f64,
    bb: Box3,
}

impl ScrewSdf3 {
    pub(crate) fn new(profile: Shape2, length: f64, pitch: f64, starts: i32) -> Self {
        let half_length = 0.5 * length;
        let r = profile.bounding_box().max.y;
        Self {
            profile,
            half_length,
            pitch,
            lead: pitch * f64::from(starts),
            bb: Box3::symmetric(Vector3::new(r, r, half_length)),
        }
    }
}

impl Sdf3 for ScrewSdf3 {
    fn evaluate(&self, p: &Point3<f64>) -> f64 {
        let r = p.x.hypot(p.y);
        let theta = p.y.atan2(p.x);
        // angle and height both map onto the profile's x axis
        let z = p.z + self.lead * theta / TAU;
        let d0 = self.profile.evaluate(&Point2::new(saw_tooth(z, self.pitch), r));
        let d1 = p.z.abs() - self.half_length;
        d0.max(d1)
    }

    fn bounding_box(&self) -> Box3 {
        self.bb
    }
}

// ── Combinators ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct UnionSdf3 {
    solids: Vec<Solid3>,
    bb: Box3,
}

impl UnionSdf3 {
    /// Caller guarantees a non-empty operand list.
    pub(crate) fn new(solids: Vec<Solid3>) -> Self {
        let bb = solids
            .iter()
            .map(Solid3::bounding_box)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| Box3::symmetric(Vector3::zeros()));
        Self { solids, bb }
    }
}

impl Sdf3 for UnionSdf3 {
    fn evaluate(&self, p: &Point3<f64>) -> f64 {
        self.solids
            .iter()
            .map(|s| s.evaluate(p))
            .fold(f64::INFINITY, f64::min)
    }

    fn bounding_box(&self) -> Box3 {
        self.bb
    }
}

#[derive(Debug, Clone)]
pub struct IntersectSdf3 {
    solids: Vec<Solid3>,
    bb: Box3,
}

impl IntersectSdf3 {
    /// Caller guarantees a non-empty operand list.
    pub(crate) fn new(solids: Vec<Solid3>) -> Self {
        let bb = solids
            .iter()
            .map(Solid3::bounding_box)
            .reduce(|a, b| a.intersection(&b))
            .unwrap_or_else(|| Box3::symmetric(Vector3::zeros()));
        Self { solids, bb }
    }
}

impl Sdf3 for IntersectSdf3 {
    fn evaluate(&self, p: &Point3<f64>) -> f64 {
        self.solids
            .iter()
            .map(|s| s.evaluate(p))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    fn bounding_box(&self) -> Box3 {
        self.bb
    }
}

#[derive(Debug, Clone)]
pub struct DifferenceSdf3 {
    a: Solid3,
    b: Solid3,
}

impl DifferenceSdf3 {
    pub(crate) fn new(a: Solid3, b: Solid3) -> Self {
        Self { a, b }
    }
}

impl Sdf3 for DifferenceSdf3 {
    fn evaluate(&self, p: &Point3<f64>) -> f64 {
        self.a.evaluate(p).max(-self.b.evaluate(p))
    }

    fn bounding_box(&self) -> Box3 {
        self.a.bounding_box()
    }
}

// ── Modifiers ───────────────────────────────────────────────────────────────

/// Stretch a solid by inserting flat segments through the origin planes.
#[derive(Debug, Clone)]
pub struct ElongateSdf3 {
    solid: Solid3,
    half: Vector3<f64>,
}

impl ElongateSdf3 {
    pub(crate) fn new(solid: Solid3, h: Vector3<f64>) -> Self {
        Self {
            solid,
            half: 0.5 * h,
        }
    }
}

impl Sdf3 for ElongateSdf3 {
    fn evaluate(&self, p: &Point3<f64>) -> f64 {
        let clamped = p.coords.zip_map(&self.half, |v, h| v.clamp(-h, h));
        self.solid.evaluate(&Point3::from(p.coords - clamped))
    }

    fn bounding_box(&self) -> Box3 {
        self.solid.bounding_box().enlarge(&self.half)
    }
}

/// Keep the half-space of a solid on the side the plane normal points to.
#[derive(Debug, Clone)]
pub struct CutSdf3 {
    solid: Solid3,
    point: Point3<f64>,
    normal: Vector3<f64>,
    bb: Box3,
}

impl CutSdf3 {
    /// `normal` must be unit length. `axis_tol` decides whether the normal is
    /// aligned with a coordinate axis, in which case the box is clipped.
    pub(crate) fn new(solid: Solid3, point: Point3<f64>, normal: Vector3<f64>, axis_tol: f64) -> Self {
        let mut bb = solid.bounding_box();
        for axis in 0..3 {
            let others_zero = (0..3)
                .filter(|&i| i != axis)
                .all(|i| normal[i].abs() < axis_tol);
            if !others_zero {
                continue;
            }
            if normal[axis] > 0.0 {
                bb.min[axis] = bb.min[axis].max(point[axis]);
            } else {
                bb.max[axis] = bb.max[axis].min(point[axis]);
            }
        }
        Self {
            solid,
            point,
            normal,
            bb,
        }
    }
}

impl Sdf3 for CutSdf3 {
    fn evaluate(&self, p: &Point3<f64>) -> f64 {
        let plane = -self.normal.dot(&(p - self.point));
        self.solid.evaluate(p).max(plane)
    }

    fn bounding_box(&self) -> Box3 {
        self.bb
    }
}

#[derive(Debug, Clone)]
pub struct TranslateSdf3 {
    solid: Solid3,
    offset: Vector3<f64>,
}

impl TranslateSdf3 {
    pub(crate) fn new(solid: Solid3, offset: Vector3<f64>) -> Self {
        Self { solid, offset }
    }
}

impl Sdf3 for TranslateSdf3 {
    fn evaluate(&self, p: &Point3<f64>) -> f64 {
        self.solid.evaluate(&(p - self.offset))
    }

    fn bounding_box(&self) -> Box3 {
        self.solid.bounding_box().translate(&self.offset)
    }
}
