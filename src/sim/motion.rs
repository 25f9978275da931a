//! Euler motion integration for anything that moves on the board

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::heading;

/// Kinematic state of a moving entity.
///
/// `center` is fractional and only rounded when drawn; `x` is the column and
/// `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Kinematics {
    pub center: Vec2,
    /// Heading (radians)
    pub rotate: f32,
    /// Linear velocity (cells/s)
    pub vel: Vec2,
    /// Angular velocity (radians/s)
    pub vr: f32,
    /// Forward thrust along the heading, added to the velocity on every
    /// integrate call (cells/s per call)
    pub a: f32,
}

impl Kinematics {
    pub fn at(center: Vec2) -> Self {
        Self {
            center,
            ..Default::default()
        }
    }

    /// Advance by `elapsed_ms`. Thrust is a per-call velocity increment
    /// applied before the position step, so a thrusting body moves on its new
    /// velocity. Only position and rotation scale with elapsed time.
    pub fn integrate(&mut self, elapsed_ms: f32) {
        let dt = seconds(elapsed_ms);

        if self.a != 0.0 {
            self.vel += heading(self.rotate) * self.a;
        }

        self.center += self.vel * dt;
        self.rotate += self.vr * dt;
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Frame delta in seconds; unusable deltas count as no time at all
#[inline]
pub fn seconds(elapsed_ms: f32) -> f32 {
    if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
        elapsed_ms / 1000.0
    } else {
        0.0
    }
}

/// Whether a center has left the `[0, width] x [0, height]` rectangle
#[inline]
pub fn out_of_bounds(center: Vec2, height: usize, width: usize) -> bool {
    center.x < 0.0 || center.y < 0.0 || center.x > width as f32 || center.y > height as f32
}
