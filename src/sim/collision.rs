//! Point-in-convex-polygon tests
//!
//! Each edge splits the plane in two with the line `A·x + B·y + C = 0`; a
//! point is inside when it sits on the non-negative side of every edge. The
//! vertex order decides which side that is: vertices must go round with
//! increasing angle in (col, row) space (the order asteroid outlines are
//! generated in). No winding correction is done and concave shapes are
//! not supported.

use glam::Vec2;

use crate::board::{Point, rotate};
use crate::point_to_vec2;

/// A convex outline placed at a (fractional) center
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    /// Vertex offsets from `center`
    pub vertices: Vec<Point>,
    pub center: Vec2,
}

impl ConvexPolygon {
    pub fn new(vertices: Vec<Point>, center: Vec2) -> Self {
        Self { vertices, center }
    }

    /// Outline of a shape turned by `angle`, rounded the same way it is drawn
    pub fn rotated(shape: &[Point], center: Vec2, angle: f32) -> Self {
        Self {
            vertices: shape.iter().map(|&v| rotate(v, angle)).collect(),
            center,
        }
    }

    /// Vertices in board space
    pub fn world_vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.vertices.iter().map(|&v| point_to_vec2(v) + self.center)
    }
}

/// Whether `point + point_offset` lies inside `polygon`.
///
/// Every edge is tested, including the closing edge from the last vertex
/// back to the first. Fewer than three vertices enclose nothing: a point or a
/// segment has no interior, even though with one vertex there are no edges
/// to reject the point.
pub fn contains(point: Vec2, point_offset: Vec2, polygon: &ConvexPolygon) -> bool {
    let n = polygon.vertices.len();
    if n < 3 {
        return false;
    }

    let p = point + point_offset;
    let vertex = |i: usize| point_to_vec2(polygon.vertices[i % n]) + polygon.center;

    (0..n).all(|i| {
        let (pa, pb) = (vertex(i), vertex(i + 1));
        let a = -(pb.y - pa.y);
        let b = pb.x - pa.x;
        let c = -(a * pa.x + b * pa.y);
        a * p.x + b * p.y + c >= 0.0
    })
}

/// Like [`contains`], but on a `height` x `width` torus: the point is also
/// tried one board-width/height away in every direction, so shapes that
/// straddle the seam still catch it.
pub fn contains_on_torus(
    point: Vec2,
    point_offset: Vec2,
    polygon: &ConvexPolygon,
    height: usize,
    width: usize,
) -> bool {
    let (h, w) = (height as f32, width as f32);
    [-1.0, 0.0, 1.0].iter().any(|&dy| {
        [-1.0, 0.0, 1.0]
            .iter()
            .any(|&dx| contains(point, point_offset + Vec2::new(dx * w, dy * h), polygon))
    })
}
