//! Toroidal pixel board
//!
//! Everything that turns geometry into lit cells:
//! - Coordinates wrap on both axes (the board is a torus)
//! - Lines are rasterized in grid space, then wrapped point by point
//! - Polygons are drawn edge by edge, optionally rotated about their center

pub mod grid;
pub mod polygon;
pub mod raster;

pub use grid::{Cell, Color, Grid, Point, Surface, wrap_axis};
pub use polygon::{ObjectOptions, polygon_points, render_polygon, rotate};
pub use raster::rasterize;
