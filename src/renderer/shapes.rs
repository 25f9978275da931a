//! Turning the board into triangles

use super::vertex::Vertex;
use crate::board::Grid;

/// Two triangles covering the cell at (`row`, `col`), in board coordinates
/// (x = col, y = row, one unit per cell)
pub fn cell_quad(row: usize, col: usize, color: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0) = (col as f32, row as f32);
    let (x1, y1) = (x0 + 1.0, y0 + 1.0);

    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// One quad per colored cell; empty cells are left to the clear color
pub fn grid_quads(grid: &Grid) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(grid.colored_count() * 6);
    for (row, col, color) in grid.colored_cells() {
        vertices.extend_from_slice(&cell_quad(row, col, color.to_rgba()));
    }
    vertices
}

/// Map a board position to normalized device coordinates.
///
/// The board keeps square cells and is letterboxed to fit the viewport; row 0
/// is at the top of the screen.
pub fn board_to_ndc(x: f32, y: f32, viewport: (u32, u32), board: (usize, usize)) -> (f32, f32) {
    let (vw, vh) = (viewport.0.max(1) as f32, viewport.1.max(1) as f32);
    let (rows, cols) = (board.0.max(1) as f32, board.1.max(1) as f32);

    // Pixels per cell
    let scale = (vw / cols).min(vh / rows);

    let px = (x - cols / 2.0) * scale;
    let py = (y - rows / 2.0) * scale;
    (px * 2.0 / vw, -py * 2.0 / vh)
}
