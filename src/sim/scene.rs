//! Drawing the game state onto a board surface

use super::state::{Entity, GameState};
use super::tick::{TickInput, tick};
use crate::board::{Color, Grid, ObjectOptions, Surface, render_polygon};
use crate::round_to_point;
use crate::settings::Palette;

/// Draw one entity: its outline if it has a shape, otherwise a single cell
pub fn draw_entity<S: Surface + ?Sized>(surface: &mut S, entity: &Entity, color: Color) {
    let center = round_to_point(entity.body.center);
    match entity.shape() {
        Some(shape) => render_polygon(
            surface,
            shape,
            &ObjectOptions {
                center: Some(center),
                rotation: Some(entity.body.rotate),
                color,
            },
        ),
        None => surface.draw(center, color),
    }
}

/// Draw every live entity. Call after the tick so the picture matches the
/// state collisions were checked against.
pub fn draw_scene<S: Surface + ?Sized>(state: &GameState, surface: &mut S, palette: &Palette) {
    for asteroid in &state.asteroids {
        draw_entity(surface, asteroid, palette.asteroid);
    }
    draw_entity(surface, &state.plane, palette.plane);
    for bullet in state.bullets.iter().filter(|b| b.is_alive()) {
        draw_entity(surface, bullet, palette.bullet);
    }
}

/// One full frame: tick, wipe the board, redraw
pub fn step_frame(
    state: &mut GameState,
    grid: &mut Grid,
    input: &TickInput,
    elapsed_ms: f32,
    palette: &Palette,
) {
    tick(state, input, elapsed_ms);
    grid.clear_all();
    draw_scene(state, grid, palette);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::sim::motion::Kinematics;
    use glam::Vec2;

    fn palette() -> Palette {
        Palette {
            asteroid: Color(1),
            plane: Color(2),
            bullet: Color(3),
            background: Color(0),
        }
    }

    #[test]
    fn test_draw_scene_uses_palette() {
        let mut state = GameState::new(8, 200, 200);
        let id = state.next_entity_id();
        state
            .bullets
            .push(Entity::bullet(id, Kinematics::at(Vec2::new(10.4, 20.6))));

        let mut grid = Grid::new(200, 200);
        draw_scene(&state, &mut grid, &palette());

        // Plane nose: center (100, 100) facing -row
        assert_eq!(grid.get(90, 100), Some(Cell::Colored(Color(2))));
        assert_eq!(grid.get(21, 10), Some(Cell::Colored(Color(3))));
        assert!(grid.colored_cells().any(|(_, _, c)| c == Color(1)));
    }

    #[test]
    fn test_dead_bullets_are_not_drawn() {
        let mut state = GameState::new(8, 200, 200);
        state.asteroids.clear();
        let id = state.next_entity_id();
        let mut bullet = Entity::bullet(id, Kinematics::at(Vec2::new(10.0, 10.0)));
        bullet.kill();
        state.bullets.push(bullet);

        let mut grid = Grid::new(200, 200);
        draw_scene(&state, &mut grid, &palette());
        assert!(!grid.is_colored(10, 10));
    }

    #[test]
    fn test_entity_outline_wraps_over_the_edge() {
        let mut state = GameState::new(8, 50, 50);
        state.asteroids.clear();
        state.plane.body.center = Vec2::new(0.0, 0.0);

        let mut grid = Grid::new(50, 50);
        draw_scene(&state, &mut grid, &palette());

        // Nose points to row -10, which wraps to row 40
        assert!(grid.is_colored(40, 0));
        assert!(grid.colored_count() > 10);
    }

    #[test]
    fn test_step_frame_redraws_from_scratch() {
        let mut state = GameState::new(8, 200, 200);
        let mut grid = Grid::new(200, 200);
        grid.plot(0, 0, Color(9));

        step_frame(&mut state, &mut grid, &TickInput::default(), 16.0, &palette());

        assert!(!grid.colored_cells().any(|(_, _, c)| c == Color(9)));
        assert!(grid.colored_count() > 0);
        assert_eq!(state.time_ticks, 1);
    }
}
