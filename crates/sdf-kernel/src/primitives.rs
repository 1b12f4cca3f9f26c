//! Distance functions for the kernel's primitive shapes.
//!
//! Every 3D primitive is centered on the origin with its axis along z.

use nalgebra::{Point2, Point3, Vector2, Vector3};

use crate::traits::{Sdf2, Sdf3};
use crate::types::*;

// ── Planar ──────────────────────────────────────────────────────────────────

/// Closed polygon. Works for either winding order.
#[derive(Debug, Clone)]
pub struct PolygonSdf2 {
    vertices: Vec<Point2<f64>>,
    bb: Box2,
}

impl PolygonSdf2 {
    /// Caller guarantees at least 3 vertices with no consecutive duplicates.
    pub(crate) fn new(vertices: Vec<Point2<f64>>) -> Self {
        let bb = Box2::from_points(&vertices);
        Self { vertices, bb }
    }
}

impl Sdf2 for PolygonSdf2 {
    fn evaluate(&self, p: &Point2<f64>) -> f64 {
        let v = &self.vertices;
        let n = v.len();
        let mut d = (p - v[0]).norm_squared();
        let mut sign = 1.0;
        let mut j = n - 1;
        for i in 0..n {
            let e = v[j] - v[i];
            let w = p - v[i];
            let t = (w.dot(&e) / e.norm_squared()).clamp(0.0, 1.0);
            let b = w - e * t;
            d = d.min(b.norm_squared());
            // crossing number test for the sign
            let c0 = p.y >= v[i].y;
            let c1 = p.y < v[j].y;
            let c2 = e.x * w.y > e.y * w.x;
            if (c0 && c1 && c2) || (!c0 && !c1 && !c2) {
                sign = -sign;
            }
            j = i;
        }
        sign * d.sqrt()
    }

    fn bounding_box(&self) -> Box2 {
        self.bb
    }
}

#[derive(Debug, Clone)]
pub struct OffsetSdf2 {
    shape: Shape2,
    distance: f64,
}

impl OffsetSdf2 {
    pub(crate) fn new(shape: Shape2, distance: f64) -> Self {
        Self { shape, distance }
    }
}

impl Sdf2 for OffsetSdf2 {
    fn evaluate(&self, p: &Point2<f64>) -> f64 {
        self.shape.evaluate(p) - self.distance
    }

    fn bounding_box(&self) -> Box2 {
        self.shape.bounding_box().enlarge(self.distance.max(0.0))
    }
}

// ── Solids ──────────────────────────────────────────────────────────────────

/// Cylinder with its circular edges rounded by `round`.
#[derive(Debug, Clone)]
pub struct CylinderSdf3 {
    half_height: f64,
    radius: f64,
    round: f64,
}

impl CylinderSdf3 {
    pub(crate) fn new(height: f64, radius: f64, round: f64) -> Self {
        Self {
            half_height: 0.5 * height,
            radius,
            round,
        }
    }
}

impl Sdf3 for CylinderSdf3 {
    fn evaluate(&self, p: &Point3<f64>) -> f64 {
        let d = Vector2::new(
            p.x.hypot(p.y) - self.radius + self.round,
            p.z.abs() - self.half_height + self.round,
        );
        d.x.max(d.y).min(0.0) + Vector2::new(d.x.max(0.0), d.y.max(0.0)).norm() - self.round
    }

    fn bounding_box(&self) -> Box3 {
        Box3::symmetric(Vector3::new(self.radius, self.radius, self.half_height))
    }
}

/// Truncated cone with rounded edges.
///
/// Evaluated as the revolution of a mirrored trapezoid inset by `round`, then
/// offset outward by `round`, which keeps the distance exact away from the axis.
#[derive(Debug, Clone)]
pub struct ConeSdf3 {
    profile: PolygonSdf2,
    round: f64,
    bb: Box3,
}

impl ConeSdf3 {
    /// Returns `None` when the rounding consumes the whole profile.
    pub(crate) fn new(height: f64, r0: f64, r1: f64, round: f64) -> Option<Self> {
        let half = 0.5 * height;
        let side = Vector2::new(r1 - r0, height);
        // outward normal of the slanted side in the (r, z) plane
        let normal_r = height / side.norm();
        let inset = round / normal_r;
        let radius_at = |z: f64| r0 + (r1 - r0) * (z + half) / height - inset;

        let zi = half - round;
        let ri0 = radius_at(-zi).max(0.0);
        let ri1 = radius_at(zi).max(0.0);
        if ri0 <= 0.0 && ri1 <= 0.0 {
            return None;
        }

        let mut vertices = vec![
            Point2::new(-ri0, -zi),
            Point2::new(ri0, -zi),
            Point2::new(ri1, zi),
            Point2::new(-ri1, zi),
        ];
        vertices.dedup();
        let r = r0.max(r1);
        Some(Self {
            profile: PolygonSdf2::new(vertices),
            round,
            bb: Box3::symmetric(Vector3::new(r, r, half)),
        })
    }
}

impl Sdf3 for ConeSdf3 {
    fn evaluate(&self, p: &Point3<f64>) -> f64 {
        self.profile.evaluate(&Point2::new(p.x.hypot(p.y), p.z)) - self.round
    }

    fn bounding_box(&self) -> Box3 {
        self.bb
    }
}

#[derive(Debug, Clone)]
pub struct SphereSdf3 {
    radius: f64,
}

impl SphereSdf3 {
    pub(crate) fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl Sdf3 for SphereSdf3 {
    fn evaluate(&self, p: &Point3<f64>) -> f64 {
        p.coords.norm() - self.radius
    }

    fn bounding_box(&self) -> Box3 {
        Box3::symmetric(Vector3::repeat(self.radius))
    }
}

/// Planar shape extruded symmetrically along z.
#[derive(Debug, Clone)]
pub struct ExtrudeSdf3 {
    profile: Shape2,
    half_height: f64,
}

impl ExtrudeSdf3 {
    pub(crate) fn new(profile: Shape2, height: f64) -> Self {
        Self {
            profile,
            half_height: 0.5 * height,
        }
    }
}

impl Sdf3 for ExtrudeSdf3 {
    fn evaluate(&self, p: &Point3<f64>) -> f64 {
        let d = self.profile.evaluate(&Point2::new(p.x, p.y));
        let w = Vector2::new(d, p.z.abs() - self.half_height);
        w.x.max(w.y).min(0.0) + Vector2::new(w.x.max(0.0), w.y.max(0.0)).norm()
    }

    fn bounding_box(&self) -> Box3 {
        let bb = self.profile.bounding_box();
        Box3::new(
            Point3::new(bb.min.x, bb.min.y, -self.half_height),
            Point3::new(bb.max.x, bb.max.y, self.half_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> PolygonSdf2 {
        PolygonSdf2::new(vec![
            Point2::new(-1.0, -1.0),
            Point2::new(1.0, -1.0),
            Point2::new(1.0, 1.0),
            Point2::new(-1.0, 1.0),
        ])
    }

    #[test]
    fn test_polygon_sign_and_distance() {
        let sq = unit_square();
        assert_relative_eq!(sq.evaluate(&Point2::new(0.0, 0.0)), -1.0);
        assert_relative_eq!(sq.evaluate(&Point2::new(3.0, 0.0)), 2.0);
        assert_relative_eq!(sq.evaluate(&Point2::new(0.5, 0.0)), -0.5);
    }

    #[test]
    fn test_polygon_winding_independent() {
        let cw = PolygonSdf2::new(vec![
            Point2::new(-1.0, -1.0),
            Point2::new(-1.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, -1.0),
        ]);
        let ccw = unit_square();
        for p in [Point2::new(0.2, 0.3), Point2::new(2.0, -4.0)] {
            assert_relative_eq!(cw.evaluate(&p), ccw.evaluate(&p));
        }
    }

    #[test]
    fn test_cylinder_distances() {
        let c = CylinderSdf3::new(4.0, 1.0, 0.0);
        assert_relative_eq!(c.evaluate(&Point3::new(0.0, 0.0, 0.0)), -1.0);
        assert_relative_eq!(c.evaluate(&Point3::new(2.0, 0.0, 0.0)), 1.0);
        assert_relative_eq!(c.evaluate(&Point3::new(0.0, 0.0, 3.0)), 1.0);
        let bb = c.bounding_box();
        assert_relative_eq!(bb.max.z, 2.0);
        assert_relative_eq!(bb.max.x, 1.0);
    }

    #[test]
    fn test_rounded_cylinder_corner() {
        let c = CylinderSdf3::new(4.0, 1.0, 0.25);
        // the sharp corner is outside once rounded
        assert!(c.evaluate(&Point3::new(0.99, 0.0, 1.99)) > 0.0);
        assert_relative_eq!(c.evaluate(&Point3::new(1.0, 0.0, 0.0)), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_straight_cone_matches_cylinder() {
        let cone = ConeSdf3::new(4.0, 1.0, 1.0, 0.0).unwrap();
        let cyl = CylinderSdf3::new(4.0, 1.0, 0.0);
        for p in [
            Point3::new(0.5, 0.1, 0.3),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.3, 0.0, 1.9),
        ] {
            assert_relative_eq!(cone.evaluate(&p), cyl.evaluate(&p), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_pointed_cone() {
        let cone = ConeSdf3::new(2.0, 1.0, 0.0, 0.0).unwrap();
        assert!(cone.evaluate(&Point3::new(0.0, 0.0, 0.99)) < 0.0);
        assert!(cone.evaluate(&Point3::new(0.1, 0.0, 0.99)) > 0.0);
        assert!(cone.evaluate(&Point3::new(0.9, 0.0, -0.99)) < 0.0);
    }

    #[test]
    fn test_over_rounded_cone_rejected() {
        assert!(ConeSdf3::new(2.0, 0.1, 0.1, 0.9).is_none());
    }

    #[test]
    fn test_extrude_square() {
        let sq = Shape2::new(unit_square());
        let e = ExtrudeSdf3::new(sq, 2.0);
        assert_relative_eq!(e.evaluate(&Point3::new(0.0, 0.0, 0.0)), -1.0);
        assert_relative_eq!(e.evaluate(&Point3::new(0.0, 0.0, 3.0)), 2.0);
        assert_relative_eq!(e.bounding_box().max.z, 1.0);
    }
}
