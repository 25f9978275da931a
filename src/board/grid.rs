//! Board cells, colors and the drawing surface contract

use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// A grid coordinate. Rows and columns wrap independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.row, -self.col)
    }
}

/// Packed 0xRRGGBB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xffffff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Linear RGBA in 0..1 for the GPU
    pub fn to_rgba(self) -> [f32; 4] {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        [r, g, b, 1.0]
    }
}

/// State of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Colored(Color),
}

/// Wrap one axis into `[0, dimension)`, whatever the sign of `value`
#[inline]
pub fn wrap_axis(value: i32, dimension: usize) -> i32 {
    let dimension = dimension.max(1) as i32;
    value.rem_euclid(dimension)
}

/// Anything cells can be lit on.
///
/// Implementors only receive coordinates inside `[0, height) x [0, width)`;
/// the provided methods do the wrapping.
pub trait Surface {
    fn height(&self) -> usize;
    fn width(&self) -> usize;
    fn plot(&mut self, row: usize, col: usize, color: Color);
    fn clear(&mut self, row: usize, col: usize);

    /// Wrap a point onto the torus
    fn wrap(&self, p: Point) -> Point {
        Point::new(wrap_axis(p.row, self.height()), wrap_axis(p.col, self.width()))
    }

    /// Wrap and plot a single point
    fn draw(&mut self, p: Point, color: Color) {
        let p = self.wrap(p);
        self.plot(p.row as usize, p.col as usize, color);
    }
}

/// Fixed-size board of cells, stored row-major (`grid[row][col]`)
#[derive(Debug, Clone)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(height: usize, width: usize) -> Self {
        if height == 0 || width == 0 {
            log::warn!("Grid {}x{} has an empty axis, using 1", height, width);
        }
        let height = height.max(1);
        let width = width.max(1);
        Self {
            height,
            width,
            cells: vec![Cell::Empty; height * width],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Cell at a point after wrapping
    pub fn at(&self, p: Point) -> Cell {
        let p = self.wrap(p);
        self.cells[p.row as usize * self.width + p.col as usize]
    }

    pub fn is_colored(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Cell::Colored(_)))
    }

    /// Reset every cell to empty (start of a frame)
    pub fn clear_all(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    pub fn colored_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Cell::Colored(_)))
            .count()
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Every lit cell as (row, col, color)
    pub fn colored_cells(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| match cell {
            Cell::Colored(color) => Some((i / self.width, i % self.width, *color)),
            Cell::Empty => None,
        })
    }
}

impl Surface for Grid {
    fn height(&self) -> usize {
        self.height
    }

    fn width(&self) -> usize {
        self.width
    }

    fn plot(&mut self, row: usize, col: usize, color: Color) {
        if row >= self.height || col >= self.width {
            log::warn!("Dropping plot outside the board at ({}, {})", row, col);
            return;
        }
        self.cells[row * self.width + col] = Cell::Colored(color);
    }

    fn clear(&mut self, row: usize, col: usize) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = Cell::Empty;
        }
    }
}
