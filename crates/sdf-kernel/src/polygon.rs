//! Incremental polygon builder with per-vertex chamfers and fillets.
//!
//! Vertices are collected first, then [`Polygon::vertices`] resolves every
//! blend once and returns the frozen outline ready for `Kernel::polygon2d`.

use std::f64::consts::{PI, TAU};

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::config::{default_tolerance, Tolerance};

/// How a polygon corner is treated when the outline is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VertexBlend {
    Sharp,
    /// Straight cut through the points `size` away from the corner along both edges.
    Chamfer { size: f64 },
    /// Circular arc of `radius` tangent to both edges, approximated by `facets` segments.
    Fillet { radius: f64, facets: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonVertex {
    pub point: Point2<f64>,
    pub blend: VertexBlend,
}

impl PolygonVertex {
    /// Mark this vertex for chamfering. A zero size leaves the corner sharp.
    pub fn chamfer(&mut self, size: f64) -> &mut Self {
        self.blend = VertexBlend::Chamfer { size };
        self
    }

    /// Mark this vertex for filleting with the given radius and facet count.
    pub fn smooth(&mut self, radius: f64, facets: u32) -> &mut Self {
        self.blend = VertexBlend::Fillet { radius, facets };
        self
    }
}

/// An ordered, implicitly closed outline under construction.
#[derive(Debug, Clone, Default)]
pub struct Polygon {
    vertices: Vec<PolygonVertex>,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex and return it so a blend can be attached.
    pub fn add(&mut self, x: f64, y: f64) -> &mut PolygonVertex {
        let index = self.vertices.len();
        self.vertices.push(PolygonVertex {
            point: Point2::new(x, y),
            blend: VertexBlend::Sharp,
        });
        &mut self.vertices[index]
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Resolve all blends and return the final outline.
    pub fn vertices(&self) -> Vec<Point2<f64>> {
        self.vertices_with(&default_tolerance())
    }

    pub fn vertices_with(&self, tol: &Tolerance) -> Vec<Point2<f64>> {
        let n = self.vertices.len();
        let mut out: Vec<Point2<f64>> = Vec::with_capacity(n);
        for (i, v) in self.vertices.iter().enumerate() {
            let prev = self.vertices[(i + n - 1) % n].point;
            let next = self.vertices[(i + 1) % n].point;
            match v.blend {
                VertexBlend::Sharp => out.push(v.point),
                VertexBlend::Chamfer { size } => chamfer_corner(&mut out, prev, v.point, next, size, tol),
                VertexBlend::Fillet { radius, facets } => {
                    fillet_corner(&mut out, prev, v.point, next, radius, facets, tol)
                }
            }
        }
        dedup_closed(out, tol)
    }
}

/// Regular `n`-gon with vertices on a circle of `radius`, first vertex on +x.
pub fn nagon(n: usize, radius: f64) -> Vec<Point2<f64>> {
    (0..n)
        .map(|i| {
            let a = TAU * i as f64 / n as f64;
            Point2::new(radius * a.cos(), radius * a.sin())
        })
        .collect()
}

/// Unit vectors from `v` toward its neighbours, with the edge lengths.
fn edge_directions(
    prev: Point2<f64>,
    v: Point2<f64>,
    next: Point2<f64>,
    tol: &Tolerance,
) -> Option<(Vector2<f64>, Vector2<f64>)> {
    let a = prev - v;
    let b = next - v;
    if tol.is_zero_length(a.norm()) || tol.is_zero_length(b.norm()) {
        return None;
    }
    Some((a.normalize(), b.normalize()))
}

fn chamfer_corner(
    out: &mut Vec<Point2<f64>>,
    prev: Point2<f64>,
    v: Point2<f64>,
    next: Point2<f64>,
    size: f64,
    tol: &Tolerance,
) {
    match edge_directions(prev, v, next, tol) {
        Some((ua, ub)) if size > 0.0 => {
            out.push(v + ua * size);
            out.push(v + ub * size);
        }
        _ => out.push(v),
    }
}

fn fillet_corner(
    out: &mut Vec<Point2<f64>>,
    prev: Point2<f64>,
    v: Point2<f64>,
    next: Point2<f64>,
    radius: f64,
    facets: u32,
    tol: &Tolerance,
) {
    let Some((ua, ub)) = edge_directions(prev, v, next, tol) else {
        out.push(v);
        return;
    };
    // interior angle between the two edges
    let theta = ua.dot(&ub).clamp(-1.0, 1.0).acos();
    if radius <= 0.0 || tol.is_zero_angle(theta) || tol.is_zero_angle(PI - theta) {
        out.push(v);
        return;
    }
    let half = 0.5 * theta;
    let tangent = radius / half.tan();
    let bisector = (ua + ub).normalize();
    let center = v + bisector * (radius / half.sin());
    let ta = v + ua * tangent;
    let tb = v + ub * tangent;

    let a0 = (ta.y - center.y).atan2(ta.x - center.x);
    let a1 = (tb.y - center.y).atan2(tb.x - center.x);
    let mut sweep = a1 - a0;
    if sweep > PI {
        sweep -= TAU;
    } else if sweep < -PI {
        sweep += TAU;
    }

    let facets = facets.max(1);
    for k in 0..=facets {
        let a = a0 + sweep * k as f64 / facets as f64;
        out.push(center + Vector2::new(a.cos(), a.sin()) * radius);
    }
}

/// Drop consecutive coincident vertices, including the closing pair.
fn dedup_closed(points: Vec<Point2<f64>>, tol: &Tolerance) -> Vec<Point2<f64>> {
    let mut out: Vec<Point2<f64>> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().map_or(true, |last| !tol.points_coincident(last, &p)) {
            out.push(p);
        }
    }
    while out.len() > 1 && tol.points_coincident(&out[0], &out[out.len() - 1]) {
        out.pop();
    }
    out
}
