//! Enemy patrol rule
//!
//! Enemies walk a fixed number of cells per tick, turn around at the
//! screen edges or when a platform or spike is in the way, and drop one
//! cell per tick when nothing is underneath.

use super::entity::Enemy;
use super::world::WorldState;

/// What happened to an enemy this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnemyStep {
    pub turned: bool,
    pub fell: bool,
    /// Dropped out of the bottom of the world
    pub lost: bool,
}

/// Advance one enemy by one tick.
pub fn step_enemy(enemy: &mut Enemy, world: &WorldState) -> EnemyStep {
    let cell = world.grid.cell();
    let mut step = EnemyStep::default();

    let ahead = enemy
        .rect(cell)
        .offset(enemy.direction.dx() as f32 * enemy.speed as f32 * cell, 0.0);
    let off_screen = ahead.x < 0.0 || ahead.right() > world.grid.width();

    if off_screen || world.hits_platform(&ahead) || world.hits_obstacle(&ahead) {
        enemy.direction = enemy.direction.opposite();
        step.turned = true;
    } else {
        enemy.x = ahead.x;
    }

    // One-cell look-ahead below
    let below = enemy.rect(cell).offset(0.0, cell);
    if !world.hits_platform(&below) {
        enemy.y += cell;
        step.fell = true;
    }

    step.lost = enemy.y >= world.grid.height();
    step
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::geometry::{Cell, Direction, Grid, Rect};

    const CELL: f32 = 20.0;

    fn world() -> WorldState {
        WorldState::empty(Grid::new(800, 600, 20))
    }

    #[test]
    fn test_walks_along_floor() {
        let world = world();
        let mut enemy = Enemy::new(Cell::new(10, 28), CELL, Direction::Right, 1);
        let step = step_enemy(&mut enemy, &world);
        assert_eq!(step, EnemyStep::default());
        assert_eq!(enemy.x, 220.0);
        assert_eq!(enemy.y, 560.0);
    }

    #[test]
    fn test_turns_at_screen_edge() {
        let world = world();
        let mut enemy = Enemy::new(Cell::new(39, 28), CELL, Direction::Right, 1);
        let step = step_enemy(&mut enemy, &world);
        assert!(step.turned);
        assert_eq!(enemy.direction, Direction::Left);
        assert_eq!(enemy.x, 780.0);

        step_enemy(&mut enemy, &world);
        assert_eq!(enemy.x, 760.0);
    }

    #[test]
    fn test_turns_at_wall_and_spike() {
        let mut world = world();
        world.platforms.push(Rect::from_cell(Cell::new(11, 28), CELL));
        world.obstacles.push(Cell::new(8, 28));
        let mut enemy = Enemy::new(Cell::new(10, 28), CELL, Direction::Right, 1);

        assert!(step_enemy(&mut enemy, &world).turned);
        assert_eq!(enemy.direction, Direction::Left);
        step_enemy(&mut enemy, &world);
        assert_eq!(enemy.x, 180.0);
        assert!(step_enemy(&mut enemy, &world).turned);
        assert_eq!(enemy.direction, Direction::Right);
    }

    #[test]
    fn test_falls_when_unsupported() {
        let world = world();
        let mut enemy = Enemy::new(Cell::new(20, 10), CELL, Direction::Left, 1);
        let step = step_enemy(&mut enemy, &world);
        assert!(step.fell);
        assert_eq!(enemy.y, 220.0);
    }

    #[test]
    fn test_stands_on_floating_platform() {
        let world = world();
        // Platform at columns 5..12, row 24
        let mut enemy = Enemy::new(Cell::new(8, 23), CELL, Direction::Right, 1);
        let step = step_enemy(&mut enemy, &world);
        assert!(!step.fell);
        assert_eq!(enemy.y, 460.0);
    }

    #[test]
    fn test_lost_below_world() {
        let mut world = world();
        world.platforms.clear();
        let mut enemy = Enemy::new(Cell::new(3, 29), CELL, Direction::Left, 1);
        assert!(step_enemy(&mut enemy, &world).lost);
    }
}
