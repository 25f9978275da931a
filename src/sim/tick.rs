//! Per-frame simulation tick
//!
//! Within a tick, input is applied first, then every entity moves, and only
//! then are collisions checked, so all tests see the same moment in time.

use glam::Vec2;

use super::collision::{ConvexPolygon, contains_on_torus};
use super::motion::seconds;
use super::state::{GameEvent, GamePhase, GameState};
use crate::{point_to_vec2, wrap_center};

/// Input commands for a single tick, sampled once per frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Turn counter-clockwise (toward negative rotation)
    pub left: bool,
    /// Turn clockwise
    pub right: bool,
    pub thrust: bool,
    /// Fire one bullet this tick
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game by `elapsed_ms` of wall-clock time
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f32) {
    state.events.clear();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    state.time_ms += seconds(elapsed_ms) as f64 * 1000.0;

    steer(state, input);
    if input.fire {
        fire(state);
    }

    // Everything moves before anything collides
    let (height, width) = (state.height, state.width);
    for asteroid in &mut state.asteroids {
        asteroid.advance(elapsed_ms, height, width);
    }
    state.plane.advance(elapsed_ms, height, width);
    for bullet in &mut state.bullets {
        bullet.advance(elapsed_ms, height, width);
    }

    resolve_bullet_hits(state);
    check_plane(state);

    state.bullets.retain(|b| b.is_alive());

    if state.asteroids.is_empty() {
        state.events.push(GameEvent::FieldCleared {
            field: state.field_index,
        });
        state.field_index += 1;
        log::info!("Field cleared after {} ticks", state.time_ticks);
        state.spawn_field();
    }

    state.normalize_order();
}

/// Map held keys onto the plane's angular velocity and thrust
fn steer(state: &mut GameState, input: &TickInput) {
    let tuning = state.tuning;
    let body = &mut state.plane.body;

    body.vr = match (input.left, input.right) {
        (true, false) => -tuning.turn_rate,
        (false, true) => tuning.turn_rate,
        _ => 0.0,
    };
    body.a = if input.thrust { tuning.thrust } else { 0.0 };
}

fn fire(state: &mut GameState) {
    let id = state.next_entity_id();
    if let Some(mut bullet) = state.plane.shoot(id, state.tuning.bullet_speed) {
        bullet.body.center = wrap_center(bullet.body.center, state.height, state.width);
        state.bullets.push(bullet);
    }
}

fn asteroid_outlines(state: &GameState) -> Vec<(u32, ConvexPolygon)> {
    state
        .asteroids
        .iter()
        .filter_map(|a| a.outline().map(|outline| (a.id, outline)))
        .collect()
}

/// Bullets inside an asteroid die and the asteroid breaks up
fn resolve_bullet_hits(state: &mut GameState) {
    let outlines = asteroid_outlines(state);
    let (height, width) = (state.height, state.width);
    let mut struck: Vec<u32> = Vec::new();

    for bullet in state.bullets.iter_mut().filter(|b| b.is_alive()) {
        let hit = outlines
            .iter()
            .find(|(_, outline)| contains_on_torus(bullet.body.center, Vec2::ZERO, outline, height, width));

        if let Some((asteroid, _)) = hit {
            bullet.kill();
            state.events.push(GameEvent::BulletHit {
                bullet: bullet.id,
                asteroid: *asteroid,
            });
            log::debug!("Bullet {} hit asteroid {}", bullet.id, asteroid);
            if !struck.contains(asteroid) {
                struck.push(*asteroid);
            }
        }
    }

    for asteroid in struck {
        if state.split_asteroid(asteroid) {
            state.events.push(GameEvent::AsteroidSplit { asteroid });
            log::debug!("Asteroid {} split", asteroid);
        } else {
            state.events.push(GameEvent::AsteroidDestroyed { asteroid });
            log::debug!("Asteroid {} destroyed", asteroid);
        }
    }
}

/// Any plane vertex inside an asteroid ends the run
fn check_plane(state: &mut GameState) {
    let Some(plane) = state.plane.outline() else {
        return;
    };
    let center = state.plane.body.center;
    let (height, width) = (state.height, state.width);

    for (asteroid, outline) in asteroid_outlines(state) {
        let hit = plane
            .vertices
            .iter()
            .any(|&v| contains_on_torus(center, point_to_vec2(v), &outline, height, width));

        if hit {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::PlaneHit { asteroid });
            log::info!(
                "Plane hit asteroid {} after {:.1}s",
                asteroid,
                state.time_ms / 1000.0
            );
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::motion::Kinematics;
    use crate::sim::state::{AsteroidSize, Entity, EntityKind};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const FRAME_MS: f32 = 16.0;

    /// Board with the plane at (100, 100) facing -row and no asteroids
    fn empty_field() -> GameState {
        let mut state = GameState::new(12345, 200, 200);
        state.asteroids.clear();
        state
    }

    fn place_asteroid(state: &mut GameState, center: Vec2, size: AsteroidSize) -> u32 {
        let mut rng = Pcg32::seed_from_u64(5);
        let id = state.next_entity_id();
        state
            .asteroids
            .push(Entity::asteroid(id, Kinematics::at(center), size, &mut rng));
        id
    }

    #[test]
    fn test_pause_freezes_the_board() {
        let mut state = GameState::new(1, 200, 200);
        let before = state.asteroids.clone();

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Paused);

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.asteroids, before);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &pause, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_steering_and_thrust() {
        let mut state = empty_field();
        place_asteroid(&mut state, Vec2::new(20.0, 20.0), AsteroidSize::Small);

        let input = TickInput {
            left: true,
            thrust: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.plane.body.vr, -state.tuning.turn_rate);
        assert_eq!(state.plane.body.a, state.tuning.thrust);
        assert!(state.plane.body.speed() > 0.0);

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.plane.body.vr, 0.0);
        assert_eq!(state.plane.body.a, 0.0);

        // Both arrows cancel out
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &both, FRAME_MS);
        assert_eq!(state.plane.body.vr, 0.0);
    }

    #[test]
    fn test_fire_spawns_moving_bullet() {
        let mut state = empty_field();
        place_asteroid(&mut state, Vec2::new(20.0, 20.0), AsteroidSize::Small);

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, FRAME_MS);
        assert_eq!(state.bullets.len(), 1);

        // Plane faces -row, so the bullet heads up the board
        let bullet = &state.bullets[0];
        assert!(bullet.body.center.y < 100.0);
        assert!(bullet.is_alive());
    }

    #[test]
    fn test_bullet_leaves_board_and_is_removed() {
        let mut state = empty_field();
        place_asteroid(&mut state, Vec2::new(20.0, 180.0), AsteroidSize::Small);
        let id = state.next_entity_id();
        state.bullets.push(Entity::bullet(
            id,
            Kinematics {
                center: Vec2::new(150.0, 1.0),
                vel: Vec2::new(0.0, -50.0),
                ..Default::default()
            },
        ));

        tick(&mut state, &TickInput::default(), 100.0);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_bullet_hit_splits_asteroid() {
        let mut state = empty_field();
        let asteroid = place_asteroid(&mut state, Vec2::new(100.0, 40.0), AsteroidSize::Max);
        let bullet = state.next_entity_id();
        // Starts outside the outline and moves into it during the tick
        state.bullets.push(Entity::bullet(
            bullet,
            Kinematics {
                center: Vec2::new(100.0, 80.0),
                vel: Vec2::new(0.0, -500.0),
                ..Default::default()
            },
        ));

        tick(&mut state, &TickInput::default(), 100.0);

        assert!(state.events.contains(&GameEvent::BulletHit { bullet, asteroid }));
        assert!(state.events.contains(&GameEvent::AsteroidSplit { asteroid }));
        assert!(!state.events.contains(&GameEvent::AsteroidDestroyed { asteroid }));
        assert!(state.bullets.is_empty());
        assert_eq!(state.asteroids.len(), 2);
        assert!(state.asteroids.iter().all(|a| matches!(
            a.kind,
            EntityKind::Asteroid {
                size: AsteroidSize::Large,
                ..
            }
        )));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_hit_across_the_seam() {
        let mut state = empty_field();
        let asteroid = place_asteroid(&mut state, Vec2::new(2.0, 40.0), AsteroidSize::Medium);
        let bullet = state.next_entity_id();
        state.bullets.push(Entity::bullet(bullet, Kinematics::at(Vec2::new(197.0, 40.0))));

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!(state.events.contains(&GameEvent::BulletHit { bullet, asteroid }));
    }

    #[test]
    fn test_clearing_the_field_spawns_a_new_one() {
        let mut state = empty_field();
        let asteroid = place_asteroid(&mut state, Vec2::new(40.0, 40.0), AsteroidSize::Small);
        let id = state.next_entity_id();
        state
            .bullets
            .push(Entity::bullet(id, Kinematics::at(Vec2::new(40.0, 40.0))));

        tick(&mut state, &TickInput::default(), FRAME_MS);

        assert!(state.events.contains(&GameEvent::AsteroidDestroyed { asteroid }));
        assert!(!state.events.contains(&GameEvent::AsteroidSplit { asteroid }));
        assert!(state.events.contains(&GameEvent::FieldCleared { field: 0 }));
        assert_eq!(state.field_index, 1);
        assert_eq!(state.asteroids.len(), state.tuning.asteroid_count);
    }

    #[test]
    fn test_plane_collision_ends_the_game() {
        let mut state = empty_field();
        let asteroid = place_asteroid(&mut state, Vec2::new(100.0, 100.0), AsteroidSize::Large);

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::PlaneHit { asteroid }));

        // Nothing moves after game over
        let ticks = state.time_ticks;
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, FRAME_MS);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, 200, 200);
        let mut state2 = GameState::new(99999, 200, 200);

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                thrust: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..30 {
            for input in &inputs {
                tick(&mut state1, input, FRAME_MS);
                tick(&mut state2, input, FRAME_MS);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.asteroids, state2.asteroids);
        assert_eq!(state1.bullets, state2.bullets);
        assert_eq!(state1.plane, state2.plane);
    }
}
