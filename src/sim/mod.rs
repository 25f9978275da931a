//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes in from the caller; nothing here owns a clock
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - Draws through the `Surface` contract only

pub mod collision;
pub mod motion;
pub mod scene;
pub mod state;
pub mod tick;

pub use collision::{ConvexPolygon, contains, contains_on_torus};
pub use motion::Kinematics;
pub use scene::{draw_entity, draw_scene, step_frame};
pub use state::{AsteroidSize, Entity, EntityKind, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
