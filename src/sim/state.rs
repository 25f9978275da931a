//! Entities and game state
//!
//! Every moving thing is one `Entity`: shared kinematics plus a tagged kind
//! that carries whatever only that kind needs (shape, size, liveness).

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::ConvexPolygon;
use super::motion::{Kinematics, out_of_bounds};
use crate::board::Point;
use crate::consts::*;
use crate::settings::{Settings, Tuning};
use crate::{heading, wrap_center};

/// Asteroid size tiers; the value is the outline radius in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidSize {
    Max,
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Max => 32.0,
            AsteroidSize::Large => 16.0,
            AsteroidSize::Medium => 10.0,
            AsteroidSize::Small => 5.0,
        }
    }

    /// Size of the pieces a hit breaks this into, if any
    pub fn smaller(self) -> Option<Self> {
        match self {
            AsteroidSize::Max => Some(AsteroidSize::Large),
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

/// What an entity is, with the data only that kind carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Asteroid { size: AsteroidSize, shape: Vec<Point> },
    Plane { size: i32, shape: Vec<Point> },
    /// Single shot; dies when it leaves the board or hits something
    Bullet { alive: bool },
}

/// Anything that moves on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub body: Kinematics,
    pub kind: EntityKind,
}

/// Lumpy circle: `ASTEROID_POINTS` vertices at increasing angle, each radius
/// jittered by up to `ASTEROID_DISTORTION` of the size
pub fn asteroid_shape(size: AsteroidSize, rng: &mut impl Rng) -> Vec<Point> {
    let radius = size.radius();
    let distortion = radius * ASTEROID_DISTORTION;
    let step = TAU / ASTEROID_POINTS as f32;

    (0..ASTEROID_POINTS)
        .map(|i| {
            let theta = i as f32 * step;
            let r = radius - distortion + rng.random::<f32>() * distortion * 2.0;
            Point::new((r * theta.sin()).round() as i32, (r * theta.cos()).round() as i32)
        })
        .collect()
}

/// Arrowhead pointing along +row, wound the same way as asteroid outlines
pub fn plane_shape(size: i32) -> Vec<Point> {
    vec![
        Point::new(size * 5, 0),
        Point::new(size * -2, size * -2),
        Point::new(size * -2, size * 2),
    ]
}

impl Entity {
    pub fn asteroid(id: u32, body: Kinematics, size: AsteroidSize, rng: &mut impl Rng) -> Self {
        Self {
            id,
            body,
            kind: EntityKind::Asteroid {
                size,
                shape: asteroid_shape(size, rng),
            },
        }
    }

    pub fn plane(id: u32, body: Kinematics, size: i32) -> Self {
        Self {
            id,
            body,
            kind: EntityKind::Plane {
                size,
                shape: plane_shape(size),
            },
        }
    }

    pub fn bullet(id: u32, body: Kinematics) -> Self {
        Self {
            id,
            body,
            kind: EntityKind::Bullet { alive: true },
        }
    }

    /// Outline vertex offsets, for kinds that are drawn as polygons
    pub fn shape(&self) -> Option<&[Point]> {
        match &self.kind {
            EntityKind::Asteroid { shape, .. } | EntityKind::Plane { shape, .. } => {
                Some(shape.as_slice())
            }
            EntityKind::Bullet { .. } => None,
        }
    }

    /// Outline turned to the current heading, for collision tests
    pub fn outline(&self) -> Option<ConvexPolygon> {
        self.shape()
            .map(|shape| ConvexPolygon::rotated(shape, self.body.center, self.body.rotate))
    }

    pub fn is_alive(&self) -> bool {
        match self.kind {
            EntityKind::Bullet { alive } => alive,
            _ => true,
        }
    }

    /// Mark a bullet spent; other kinds are removed by game logic instead
    pub fn kill(&mut self) {
        if let EntityKind::Bullet { alive } = &mut self.kind {
            *alive = false;
        }
    }

    /// Integrate one frame. Bullets die once they leave the board; everything
    /// else wraps around it.
    pub fn advance(&mut self, elapsed_ms: f32, height: usize, width: usize) {
        self.body.integrate(elapsed_ms);

        match &mut self.kind {
            EntityKind::Bullet { alive } => {
                if out_of_bounds(self.body.center, height, width) {
                    *alive = false;
                }
            }
            EntityKind::Asteroid { .. } | EntityKind::Plane { .. } => {
                self.body.center = wrap_center(self.body.center, height, width);
            }
        }
    }

    /// Fire a bullet from a plane's center along its heading
    pub fn shoot(&self, id: u32, speed: f32) -> Option<Entity> {
        match self.kind {
            EntityKind::Plane { .. } => Some(Entity::bullet(
                id,
                Kinematics {
                    center: self.body.center,
                    vel: heading(self.body.rotate) * speed,
                    ..Default::default()
                },
            )),
            _ => None,
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// The plane ran into an asteroid
    GameOver,
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BulletHit { bullet: u32, asteroid: u32 },
    /// Broke into two smaller pieces
    AsteroidSplit { asteroid: u32 },
    /// Smallest size, gone for good
    AsteroidDestroyed { asteroid: u32 },
    PlaneHit { asteroid: u32 },
    FieldCleared { field: u32 },
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Fresh generator on the next stream, so every draw site is reproducible
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub seed: u64,
    pub rng_state: RngState,
    /// Board rows
    pub height: usize,
    /// Board columns
    pub width: usize,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated time (ms)
    pub time_ms: f64,
    /// Fields cleared so far
    pub field_index: u32,
    pub plane: Entity,
    /// Sorted by id
    pub asteroids: Vec<Entity>,
    /// Sorted by id
    pub bullets: Vec<Entity>,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// New game on a `height` x `width` board with default tuning
    pub fn new(seed: u64, height: usize, width: usize) -> Self {
        Self::with_tuning(seed, height, width, Tuning::default())
    }

    pub fn from_settings(seed: u64, settings: &Settings) -> Self {
        Self::with_tuning(seed, settings.board_height, settings.board_width, settings.tuning)
    }

    pub fn with_tuning(seed: u64, height: usize, width: usize, mut tuning: Tuning) -> Self {
        let height = height.max(1);
        let width = width.max(1);
        tuning.asteroid_count = tuning.asteroid_count.clamp(1, MAX_ASTEROID_COUNT);
        let plane_body = Kinematics {
            center: Vec2::new(width as f32 / 2.0, height as f32 / 2.0),
            rotate: PI,
            ..Default::default()
        };

        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            height,
            width,
            tuning,
            phase: GamePhase::Playing,
            time_ticks: 0,
            time_ms: 0.0,
            field_index: 0,
            plane: Entity::plane(0, plane_body, PLANE_SIZE),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        state.spawn_field();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Scatter a fresh set of full-size asteroids, none on top of the plane
    pub fn spawn_field(&mut self) {
        let mut rng = self.rng_state.next_rng();
        let (w, h) = (self.width as f32, self.height as f32);
        let keep_clear = AsteroidSize::Max.radius() * 2.0;

        for _ in 0..self.tuning.asteroid_count {
            let mut center = Vec2::new(rng.random::<f32>() * w, rng.random::<f32>() * h);
            for _ in 0..16 {
                if self.torus_distance(center, self.plane.body.center) >= keep_clear {
                    break;
                }
                center = Vec2::new(rng.random::<f32>() * w, rng.random::<f32>() * h);
            }

            let direction = rng.random::<f32>() * TAU;
            let speed = rng.random_range(10.0f32..25.0);
            let body = Kinematics {
                center,
                vel: Vec2::new(direction.cos(), direction.sin()) * speed,
                vr: rng.random_range(-FRAC_PI_2..FRAC_PI_2),
                ..Default::default()
            };

            let id = self.next_entity_id();
            self.asteroids
                .push(Entity::asteroid(id, body, AsteroidSize::Max, &mut rng));
        }

        log::info!(
            "Field {}: {} asteroids on a {}x{} board",
            self.field_index,
            self.asteroids.len(),
            self.height,
            self.width
        );
    }

    /// Break the asteroid with `id` into two smaller ones flying apart.
    /// Returns false if it was the smallest size and is simply gone.
    pub fn split_asteroid(&mut self, id: u32) -> bool {
        let Some(index) = self.asteroids.iter().position(|a| a.id == id) else {
            return false;
        };
        let asteroid = self.asteroids.remove(index);
        let EntityKind::Asteroid { size, .. } = asteroid.kind else {
            return false;
        };
        let Some(smaller) = size.smaller() else {
            return false;
        };

        let mut rng = self.rng_state.next_rng();
        let body = asteroid.body;
        let apart = if body.vel.length_squared() > 0.0 {
            body.vel.perp().normalize()
        } else {
            Vec2::X
        };

        for side in [1.0, -1.0] {
            let id = self.next_entity_id();
            let piece = Kinematics {
                center: body.center + apart * side * smaller.radius(),
                vel: body.vel + apart * side * ASTEROID_SPLIT_SPEED,
                vr: body.vr * side,
                ..body
            };
            let mut piece = Entity::asteroid(id, piece, smaller, &mut rng);
            piece.body.center = wrap_center(piece.body.center, self.height, self.width);
            self.asteroids.push(piece);
        }
        true
    }

    /// Shortest distance between two centers on the torus
    pub fn torus_distance(&self, a: Vec2, b: Vec2) -> f32 {
        let (w, h) = (self.width as f32, self.height as f32);
        let dx = (a.x - b.x).abs() % w;
        let dy = (a.y - b.y).abs() % h;
        Vec2::new(dx.min(w - dx), dy.min(h - dy)).length()
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.asteroids.sort_by_key(|a| a.id);
        self.bullets.sort_by_key(|b| b.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::contains;
    use rand::SeedableRng;

    #[test]
    fn test_asteroid_shape_radius_and_winding() {
        let mut rng = Pcg32::seed_from_u64(7);
        let shape = asteroid_shape(AsteroidSize::Max, &mut rng);
        assert_eq!(shape.len(), ASTEROID_POINTS);

        for p in &shape {
            let r = ((p.row * p.row + p.col * p.col) as f32).sqrt();
            assert!(r > 32.0 * 0.85 - 1.0 && r < 32.0 * 1.15 + 1.0, "radius {}", r);
        }

        let polygon = ConvexPolygon::new(shape, Vec2::ZERO);
        assert!(contains(Vec2::ZERO, Vec2::ZERO, &polygon));
    }

    #[test]
    fn test_plane_shape_contains_its_center() {
        let polygon = ConvexPolygon::new(plane_shape(2), Vec2::ZERO);
        assert!(contains(Vec2::ZERO, Vec2::ZERO, &polygon));
        assert!(contains(Vec2::new(0.0, 9.0), Vec2::ZERO, &polygon));
    }

    #[test]
    fn test_shoot_only_from_planes() {
        let plane = Entity::plane(
            1,
            Kinematics {
                center: Vec2::new(10.0, 20.0),
                ..Default::default()
            },
            2,
        );
        let bullet = plane.shoot(2, 50.0).expect("planes shoot");
        assert_eq!(bullet.body.center, Vec2::new(10.0, 20.0));
        assert!(bullet.body.vel.x.abs() < 1e-4);
        assert!((bullet.body.vel.y - 50.0).abs() < 1e-4);
        assert!(bullet.is_alive());
        assert!(bullet.shape().is_none());

        assert!(bullet.shoot(3, 50.0).is_none());
    }

    #[test]
    fn test_bullet_dies_leaving_board() {
        let mut bullet = Entity::bullet(
            1,
            Kinematics {
                center: Vec2::new(5.0, 98.0),
                vel: Vec2::new(0.0, 50.0),
                ..Default::default()
            },
        );
        bullet.advance(16.0, 100, 100);
        assert!(bullet.is_alive());
        bullet.advance(100.0, 100, 100);
        assert!(!bullet.is_alive());
        // No wrap for bullets
        assert!(bullet.body.center.y > 100.0);
    }

    #[test]
    fn test_asteroid_wraps() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut asteroid = Entity::asteroid(
            1,
            Kinematics {
                center: Vec2::new(99.0, 1.0),
                vel: Vec2::new(20.0, -20.0),
                ..Default::default()
            },
            AsteroidSize::Small,
            &mut rng,
        );
        asteroid.advance(100.0, 100, 100);
        assert!((asteroid.body.center.x - 1.0).abs() < 1e-3);
        assert!((asteroid.body.center.y - 99.0).abs() < 1e-3);
        assert!(asteroid.is_alive());

        asteroid.kill();
        assert!(asteroid.is_alive());
    }

    #[test]
    fn test_new_state_is_deterministic() {
        let a = GameState::new(42, 200, 200);
        let b = GameState::new(42, 200, 200);
        assert_eq!(a.asteroids, b.asteroids);
        assert_eq!(a.asteroids.len(), ASTEROID_COUNT);
        assert_eq!(a.phase, GamePhase::Playing);
        assert!((a.plane.body.rotate - PI).abs() < 1e-6);
    }

    #[test]
    fn test_split_asteroid() {
        let mut state = GameState::new(3, 200, 200);
        let id = state.asteroids[0].id;
        let before = state.asteroids.len();

        assert!(state.split_asteroid(id));
        assert_eq!(state.asteroids.len(), before + 1);
        assert!(state.asteroids.iter().all(|a| a.id != id));
        let pieces: Vec<_> = state
            .asteroids
            .iter()
            .filter(|a| matches!(a.kind, EntityKind::Asteroid { size: AsteroidSize::Large, .. }))
            .collect();
        assert_eq!(pieces.len(), 2);

        // Smallest size just disappears
        let mut rng = Pcg32::seed_from_u64(9);
        let small_id = state.next_entity_id();
        state.asteroids.push(Entity::asteroid(
            small_id,
            Kinematics::default(),
            AsteroidSize::Small,
            &mut rng,
        ));
        let count = state.asteroids.len();
        assert!(!state.split_asteroid(small_id));
        assert_eq!(state.asteroids.len(), count - 1);
    }

    #[test]
    fn test_asteroid_count_is_clamped() {
        let empty = Tuning {
            asteroid_count: 0,
            ..Default::default()
        };
        let state = GameState::with_tuning(4, 200, 200, empty);
        assert_eq!(state.tuning.asteroid_count, 1);
        assert_eq!(state.asteroids.len(), 1);

        let crowded = Tuning {
            asteroid_count: usize::MAX,
            ..Default::default()
        };
        let state = GameState::with_tuning(4, 200, 200, crowded);
        assert_eq!(state.asteroids.len(), MAX_ASTEROID_COUNT);
    }

    #[test]
    fn test_torus_distance() {
        let state = GameState::new(1, 100, 100);
        let d = state.torus_distance(Vec2::new(1.0, 50.0), Vec2::new(99.0, 50.0));
        assert!((d - 2.0).abs() < 1e-4);
    }
}
