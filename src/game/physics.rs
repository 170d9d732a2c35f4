//! Runner Physics
//!
//! Platformer rules for the head: gravity accumulates into a vertical
//! velocity, jumps only leave the ground, and platforms are resolved on
//! the vertical axis only. Horizontal motion is grid-stepped and wraps
//! at the world edges.

use super::entity::Runner;
use super::world::WorldState;
use crate::config::GameConfig;

/// Result of a vertical physics step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VerticalResult {
    /// Jump impulse was applied this step
    pub jumped: bool,
    /// Fell onto a platform this step
    pub landed: bool,
    /// Head bumped the underside of a platform
    pub hit_ceiling: bool,
}

/// Outcome of one horizontal grid step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Moved,
    /// A platform is in the way; nothing changed
    Blocked,
}

/// Apply gravity, an optional jump, and vertical platform collision.
pub fn vertical_step(runner: &mut Runner, world: &WorldState, config: &GameConfig, jump: bool) -> VerticalResult {
    let cell = world.grid.cell();
    let mut result = VerticalResult::default();

    // Gravity only accumulates while airborne
    if !runner.on_ground {
        runner.velocity_y = (runner.velocity_y + config.gravity).min(config.max_fall_speed);
    }

    if jump && runner.on_ground {
        runner.velocity_y = config.jump_impulse;
        runner.on_ground = false;
        result.jumped = true;
    }

    runner.y += runner.velocity_y;
    runner.on_ground = false;

    for platform in &world.platforms {
        let body = runner.rect(cell);
        if !body.overlaps(platform) {
            continue;
        }
        if runner.velocity_y > 0.0 {
            runner.y = platform.y - body.h;
            runner.velocity_y = 0.0;
            runner.on_ground = true;
            result.landed = true;
        } else if runner.velocity_y < 0.0 {
            runner.y = platform.bottom();
            runner.velocity_y = 0.0;
            result.hit_ceiling = true;
        }
    }

    // No overlap to resolve, but the feet are on a platform
    if !runner.on_ground && runner.velocity_y >= 0.0 {
        if let Some(top) = support_top(runner, world) {
            // A fall that ends flush with the platform top is still a landing
            if runner.velocity_y > 0.0 {
                runner.y = top - cell;
                runner.velocity_y = 0.0;
                result.landed = true;
            }
            runner.on_ground = true;
        }
    }

    result
}

/// Is there a platform directly under the runner's feet (within 1px)?
pub fn is_supported(runner: &Runner, world: &WorldState) -> bool {
    support_top(runner, world).is_some()
}

/// Top edge of the highest platform within 1px under the runner's feet
fn support_top(runner: &Runner, world: &WorldState) -> Option<f32> {
    let probe = runner.rect(world.grid.cell()).offset(0.0, 1.0);
    world
        .platforms
        .iter()
        .filter(|p| p.overlaps(&probe))
        .map(|p| p.y)
        .reduce(f32::min)
}

/// Move the head one cell in its direction, wrapping at the world edges.
///
/// The trail only advances when the head actually moves.
pub fn horizontal_step(runner: &mut Runner, world: &WorldState) -> StepResult {
    let cell = world.grid.cell();
    let next_x = world.grid.wrap_x(runner.x + runner.direction.dx() as f32 * cell);
    let mut candidate = runner.rect(cell);
    candidate.x = next_x;

    if world.hits_platform(&candidate) {
        return StepResult::Blocked;
    }

    runner.push_head(cell);
    runner.x = next_x;

    // Walking off a ledge
    if runner.on_ground && !is_supported(runner, world) {
        runner.on_ground = false;
    }

    StepResult::Moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::geometry::{Cell, Direction, Grid, Rect};

    const CELL: f32 = 20.0;

    fn world() -> WorldState {
        WorldState::empty(Grid::new(800, 600, 20))
    }

    /// Runner standing on the floor at column `col`
    fn grounded_runner(col: i32) -> Runner {
        let mut runner = Runner::new(Cell::new(col, 28), CELL);
        runner.on_ground = true;
        runner
    }

    #[test]
    fn test_landing_sets_ground_and_zeroes_velocity() {
        let world = world();
        let config = GameConfig::default();
        let mut runner = Runner::new(Cell::new(2, 27), CELL);
        runner.y += 10.0;
        runner.velocity_y = 10.0;

        let result = vertical_step(&mut runner, &world, &config, false);
        assert!(result.landed);
        assert!(runner.on_ground);
        assert_eq!(runner.velocity_y, 0.0);
        assert_eq!(runner.y, 560.0);
    }

    #[test]
    fn test_fall_ending_flush_with_floor_is_a_landing() {
        let world = world();
        let config = GameConfig::default();
        let mut runner = Runner::new(Cell::new(2, 27), CELL);
        runner.velocity_y = 16.0;

        let result = vertical_step(&mut runner, &world, &config, false);
        assert!(result.landed);
        assert!(runner.on_ground);
        assert_eq!(runner.y, 560.0);
        assert_eq!(runner.velocity_y, 0.0);
    }

    #[test]
    fn test_jump_from_rest() {
        let world = world();
        let config = GameConfig::default();
        let mut runner = grounded_runner(2);

        let result = vertical_step(&mut runner, &world, &config, true);
        assert!(result.jumped);
        assert_eq!(runner.velocity_y, config.jump_impulse);
        assert!(!runner.on_ground);
        assert_eq!(runner.y, 560.0 + config.jump_impulse);
    }

    #[test]
    fn test_no_double_jump() {
        let world = world();
        let config = GameConfig::default();
        let mut runner = grounded_runner(2);
        vertical_step(&mut runner, &world, &config, true);
        let result = vertical_step(&mut runner, &world, &config, true);
        assert!(!result.jumped);
        assert_eq!(runner.velocity_y, config.jump_impulse + config.gravity);
    }

    #[test]
    fn test_resting_runner_stays_grounded() {
        let world = world();
        let config = GameConfig::default();
        let mut runner = grounded_runner(2);
        for _ in 0..5 {
            vertical_step(&mut runner, &world, &config, false);
            assert!(runner.on_ground);
            assert_eq!(runner.y, 560.0);
        }
    }

    #[test]
    fn test_fall_speed_is_clamped() {
        let mut world = world();
        world.platforms.clear();
        let config = GameConfig::default();
        let mut runner = Runner::new(Cell::new(2, 1), CELL);
        for _ in 0..20 {
            vertical_step(&mut runner, &world, &config, false);
            assert!(runner.velocity_y <= config.max_fall_speed);
        }
        assert_eq!(runner.velocity_y, config.max_fall_speed);
    }

    #[test]
    fn test_head_bump_snaps_below_platform() {
        let mut world = world();
        world.platforms.push(Rect::new(0.0, 500.0, 800.0, 20.0));
        let config = GameConfig::default();
        let mut runner = Runner::new(Cell::new(2, 26), CELL);
        runner.y = 525.0;
        runner.velocity_y = -12.0;

        let result = vertical_step(&mut runner, &world, &config, false);
        assert!(result.hit_ceiling);
        assert_eq!(runner.y, 520.0);
        assert_eq!(runner.velocity_y, 0.0);
    }

    #[test]
    fn test_wrap_past_right_edge() {
        let world = world();
        let mut runner = grounded_runner(39);
        runner.direction = Direction::Right;
        assert_eq!(horizontal_step(&mut runner, &world), StepResult::Moved);
        assert_eq!(runner.x, 0.0);
    }

    #[test]
    fn test_wrap_past_left_edge() {
        let world = world();
        let mut runner = grounded_runner(0);
        runner.direction = Direction::Left;
        horizontal_step(&mut runner, &world);
        assert_eq!(runner.x, 780.0);
    }

    #[test]
    fn test_platform_blocks_step() {
        let mut world = world();
        world.platforms.push(Rect::from_cell(Cell::new(3, 28), CELL));
        let mut runner = grounded_runner(2);
        runner.grow_by(1);
        let trail_before = runner.trail().clone();

        assert_eq!(horizontal_step(&mut runner, &world), StepResult::Blocked);
        assert_eq!(runner.x, 40.0);
        assert_eq!(runner.trail(), &trail_before);
    }

    #[test]
    fn test_walking_off_ledge_clears_ground() {
        let mut world = world();
        world.platforms.clear();
        world.platforms.push(Rect::from_cells(Cell::new(0, 10), 3, 1, CELL));
        let mut runner = Runner::new(Cell::new(2, 9), CELL);
        runner.on_ground = true;

        horizontal_step(&mut runner, &world);
        assert!(!runner.on_ground);
    }
}
