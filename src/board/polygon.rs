//! Closed polygon ("object") drawing with optional rotation and recentring

use std::f32::consts::PI;

use super::grid::{Color, Point, Surface};
use super::raster::rasterize;

/// How an object is placed and colored
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectOptions {
    /// Offset added to every vertex; wrapped onto the board first
    pub center: Option<Point>,
    /// Rotation about the center (radians)
    pub rotation: Option<f32>,
    pub color: Color,
}

/// Rotate a vertex offset about the origin by `angle` radians
pub fn rotate(p: Point, angle: f32) -> Point {
    let (row, col) = (p.row as f32, p.col as f32);
    let r = (row * row + col * col).sqrt();
    if r == 0.0 {
        return p;
    }

    let mut base = (row / r).clamp(-1.0, 1.0).asin();
    if row >= 0.0 && col < 0.0 {
        base = PI - base;
    } else if row < 0.0 && col <= 0.0 {
        base = -PI - base;
    }

    let theta = base + angle;
    Point::new(
        (r * theta.sin()).round() as i32,
        (r * theta.cos()).round() as i32,
    )
}

/// Unwrapped outline points of a polygon placed at `center`.
///
/// Edge `i` joins vertex `i` to vertex `(i + 1) % n`. Fewer than two
/// vertices has no outline.
pub fn polygon_points(vertices: &[Point], center: Point, rotation: Option<f32>) -> Vec<Point> {
    if vertices.len() < 2 {
        return Vec::new();
    }

    let place = |v: Point| {
        let v = match rotation {
            Some(angle) => rotate(v, angle),
            None => v,
        };
        v + center
    };

    let mut points = Vec::new();
    for (i, &vertex) in vertices.iter().enumerate() {
        let next = vertices[(i + 1) % vertices.len()];
        points.extend(rasterize(place(vertex), place(next)));
    }
    points
}

/// Draw a closed polygon on a surface, wrapping every point
pub fn render_polygon<S: Surface + ?Sized>(surface: &mut S, vertices: &[Point], options: &ObjectOptions) {
    let center = options
        .center
        .map(|c| surface.wrap(c))
        .unwrap_or(Point::ORIGIN);

    for p in polygon_points(vertices, center, options.rotation) {
        surface.draw(p, options.color);
    }
}
