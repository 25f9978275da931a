//! Line rasterization in grid space
//!
//! Lines are walked column by column. Shallow lines get one row per column
//! from the line equation; steep lines get a batch of rows per column so the
//! vertical extent is spread evenly across the columns the segment spans.
//! Points come out unwrapped; callers wrap each one when plotting, which lets
//! a segment run across the board's seam.

use super::grid::Point;

/// Grid points approximating the segment from `p1` to `p2` (both inclusive)
pub fn rasterize(p1: Point, p2: Point) -> Vec<Point> {
    // Vertical (also covers p1 == p2)
    if p1.col == p2.col {
        let (top, bottom) = (p1.row.min(p2.row), p1.row.max(p2.row));
        return (top..=bottom).map(|row| Point::new(row, p1.col)).collect();
    }

    let (start, end) = if p1.col < p2.col { (p1, p2) } else { (p2, p1) };
    let d_row = end.row - start.row;
    let d_col = end.col - start.col;

    let pixels_per_col = (d_row.abs() as f32 / (d_col + 1) as f32).round() as i32;

    if pixels_per_col == 0 {
        let slope = d_row as f32 / d_col as f32;
        let intercept = start.row as f32 - slope * start.col as f32;
        return (start.col..=end.col)
            .map(|col| Point::new((slope * col as f32 + intercept).round() as i32, col))
            .collect();
    }

    let step = d_row.signum();
    let (min_row, max_row) = (start.row.min(end.row), start.row.max(end.row));
    let mut points = Vec::with_capacity(d_row.unsigned_abs().max(d_col as u32) as usize + 1);
    let mut from_row = start.row;

    for col in start.col..=end.col {
        // A cursor that ran past the box still lights one cell per column
        let first = from_row.clamp(min_row, max_row);
        let count = if col == end.col {
            (end.row - first).abs() + 1
        } else {
            pixels_per_col
        };

        for k in 0..count {
            let row = first + step * k;
            if row < min_row || row > max_row {
                break;
            }
            points.push(Point::new(row, col));
        }

        from_row += step * pixels_per_col;
    }

    points
}
