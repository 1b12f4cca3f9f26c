use std::sync::Arc;

use nalgebra::{Point2, Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::traits::{Sdf2, Sdf3};

/// Axis-aligned bounding box in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box2 {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Box2 {
    pub fn new(min: Point2<f64>, max: Point2<f64>) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Point2<f64>]) -> Self {
        let mut bb = Self::empty();
        for p in points {
            bb.expand_to_include(p);
        }
        bb
    }

    pub fn expand_to_include(&mut self, p: &Point2<f64>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Grow (or shrink, for negative `delta`) the box by `delta` on every side.
    pub fn enlarge(&self, delta: f64) -> Self {
        let d = Vector2::new(delta, delta);
        Self {
            min: self.min - d,
            max: self.max + d,
        }
    }

    pub fn size(&self) -> Vector2<f64> {
        self.max - self.min
    }
}

/// Axis-aligned bounding box in space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box3 {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Box3 {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Box centered on the origin with the given half extents.
    pub fn symmetric(half: Vector3<f64>) -> Self {
        Self {
            min: Point3::from(-half),
            max: Point3::from(half),
        }
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Smallest box enclosing both boxes.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Overlap of both boxes. Disjoint boxes produce an empty (inverted) box.
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            min: self.min.sup(&other.min),
            max: self.max.inf(&other.max),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box by `delta` on both sides of each axis.
    pub fn enlarge(&self, delta: &Vector3<f64>) -> Self {
        Self {
            min: self.min - *delta,
            max: self.max + *delta,
        }
    }

    pub fn translate(&self, offset: &Vector3<f64>) -> Self {
        Self {
            min: self.min + *offset,
            max: self.max + *offset,
        }
    }

    pub fn contains(&self, p: &Point3<f64>) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }
}

/// Handle to an immutable planar shape.
///
/// Cloning is cheap: the shape tree is shared, never copied or mutated.
#[derive(Debug, Clone)]
pub struct Shape2(Arc<dyn Sdf2>);

impl Shape2 {
    pub fn new<S: Sdf2 + 'static>(sdf: S) -> Self {
        Self(Arc::new(sdf))
    }

    pub fn evaluate(&self, p: &Point2<f64>) -> f64 {
        self.0.evaluate(p)
    }

    pub fn bounding_box(&self) -> Box2 {
        self.0.bounding_box()
    }
}

/// Handle to an immutable solid.
///
/// Handles are append-only: combinators take handles by reference and
/// return new ones, so a solid can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Solid3(Arc<dyn Sdf3>);

impl Solid3 {
    pub fn new<S: Sdf3 + 'static>(sdf: S) -> Self {
        Self(Arc::new(sdf))
    }

    pub fn evaluate(&self, p: &Point3<f64>) -> f64 {
        self.0.evaluate(p)
    }

    pub fn bounding_box(&self) -> Box3 {
        self.0.bounding_box()
    }

    /// True when both handles refer to the same shared tree.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Errors from kernel constructors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("{operation}: invalid argument: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation}: no operands supplied")]
    EmptyCombinator { operation: &'static str },
}

impl KernelError {
    pub(crate) fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        KernelError::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }
}
