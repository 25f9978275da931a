//! Edge Grid - a toroidal pixel board with an asteroids demo
//!
//! Core modules:
//! - `board`: Wrapping grid, line rasterization, polygon rendering
//! - `sim`: Deterministic simulation (motion, collisions, game state)
//! - `renderer`: WebGPU rendering of the board
//! - `platform`: Frame clock and keyboard input sampling
//! - `settings`: Board size, tuning and palette

pub mod board;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use board::{Cell, Color, Grid, Point, Surface};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default board size in cells
    pub const BOARD_HEIGHT: usize = 200;
    pub const BOARD_WIDTH: usize = 200;

    /// Longest frame delta fed to the simulation (ms); hides tab-switch stalls
    pub const MAX_ELAPSED_MS: f32 = 100.0;

    /// Plane handling
    pub const PLANE_SIZE: i32 = 2;
    /// Turn rate while an arrow key is held (radians/s)
    pub const PLANE_TURN_RATE: f32 = 3.0;
    /// Velocity added per frame while accelerating (cells/s)
    pub const PLANE_THRUST: f32 = 3.0;

    /// Bullet muzzle speed (cells/s)
    pub const BULLET_SPEED: f32 = 50.0;

    /// Asteroid outline resolution and radius distortion
    pub const ASTEROID_POINTS: usize = 15;
    pub const ASTEROID_DISTORTION: f32 = 0.15;
    /// Number of asteroids in a fresh field, and the most a field may hold
    pub const ASTEROID_COUNT: usize = 3;
    pub const MAX_ASTEROID_COUNT: usize = 64;
    /// Speed given to each half of a split asteroid (cells/s)
    pub const ASTEROID_SPLIT_SPEED: f32 = 15.0;
}

/// Round a fractional (col, row) position to the nearest grid point
#[inline]
pub fn round_to_point(pos: Vec2) -> Point {
    Point::new(pos.y.round() as i32, pos.x.round() as i32)
}

/// A grid point as a fractional (col, row) position
#[inline]
pub fn point_to_vec2(p: Point) -> Vec2 {
    Vec2::new(p.col as f32, p.row as f32)
}

/// Wrap a fractional position onto a `height` x `width` torus
#[inline]
pub fn wrap_center(pos: Vec2, height: usize, width: usize) -> Vec2 {
    Vec2::new(
        pos.x.rem_euclid(width as f32),
        pos.y.rem_euclid(height as f32),
    )
}

/// Unit heading for a rotation; 0 rad points toward increasing rows
#[inline]
pub fn heading(rotate: f32) -> Vec2 {
    let (sin, cos) = rotate.sin_cos();
    Vec2::new(-sin, cos)
}
