//! World State
//!
//! Static level geometry (platforms, spikes) plus the collections that
//! change during play (items, enemies). Built once per run or reset and
//! dropped wholesale; nothing here is persisted.

use std::collections::HashSet;

use rand::Rng;

use super::entity::{Enemy, Item, ItemKind, Runner};
use super::geometry::{Cell, Direction, Grid, Rect};
use super::spawn::{sample_free_cell, SpawnArea};
use crate::config::GameConfig;

/// Floating platforms as (first column, rows above the floor, length in cells)
const PLATFORM_LAYOUT: [(i32, i32, i32); 4] = [(5, 5, 7), (15, 7, 5), (25, 3, 6), (32, 6, 5)];

/// Columns in front of the runner's start kept clear of spikes and enemies
const SAFE_RUN: i32 = 6;

/// Everything in the level except the runner
#[derive(Debug, Clone)]
pub struct WorldState {
    pub grid: Grid,
    /// Solid rectangles; never change after creation
    pub platforms: Vec<Rect>,
    /// Deadly cells; never change after creation
    pub obstacles: Vec<Cell>,
    pub items: Vec<Item>,
    pub enemies: Vec<Enemy>,
}

impl WorldState {
    /// Level geometry only: floor plus floating platforms, nothing to collect.
    pub fn empty(grid: Grid) -> Self {
        let cell = grid.cell();
        let floor_row = grid.rows - 1;

        let mut platforms = vec![Rect::from_cells(Cell::new(0, floor_row), grid.cols, 1, cell)];
        for (col, above, len) in PLATFORM_LAYOUT {
            let row = floor_row - above;
            if row < 1 || col >= grid.cols {
                continue;
            }
            let len = len.min(grid.cols - col);
            platforms.push(Rect::from_cells(Cell::new(col, row), len, 1, cell));
        }

        Self {
            grid,
            platforms,
            obstacles: Vec::new(),
            items: Vec::new(),
            enemies: Vec::new(),
        }
    }

    /// Build a playable level: layout plus randomly placed spikes, items and enemies.
    pub fn generate<R: Rng + ?Sized>(config: &GameConfig, grid: Grid, runner: &Runner, rng: &mut R) -> Self {
        let mut world = Self::empty(grid);
        let cell = grid.cell();

        // Keep the runway in front of the runner clear so a fresh run cannot die on tick one
        let start = runner.head_cell(cell);
        let mut reserved = world.occupied(runner);
        for dc in -1..=SAFE_RUN {
            for dr in -1..=0 {
                reserved.insert(Cell::new(start.col + dc, start.row + dr));
            }
        }

        for _ in 0..config.obstacle_count {
            match sample_free_cell(&reserved, world.spawn_area(), rng) {
                Some(c) => {
                    world.obstacles.push(c);
                    reserved.insert(c);
                }
                None => log::warn!("No free cell left for an obstacle"),
            }
        }

        for _ in 0..config.enemy_count {
            match sample_free_cell(&reserved, world.spawn_area(), rng) {
                Some(c) => {
                    let direction = if rng.gen_bool(0.5) { Direction::Left } else { Direction::Right };
                    world.enemies.push(Enemy::new(c, cell, direction, config.enemy_speed));
                    reserved.insert(c);
                }
                None => log::warn!("No free cell left for an enemy"),
            }
        }

        for (kind, count) in [(ItemKind::Coin, config.coin_count), (ItemKind::Mushroom, config.mushroom_count)] {
            for _ in 0..count {
                match sample_free_cell(&reserved, world.spawn_area(), rng) {
                    Some(c) => {
                        world.items.push(Item::new(c, kind));
                        reserved.insert(c);
                    }
                    None => log::warn!("No free cell left for a {:?}", kind),
                }
            }
        }

        world
    }

    /// Where items and enemies may be sampled: every column, skipping the
    /// HUD row at the top and the floor row at the bottom.
    pub fn spawn_area(&self) -> SpawnArea {
        SpawnArea::new(Cell::new(0, 1), Cell::new(self.grid.cols, self.grid.rows - 1))
    }

    /// Every cell currently taken by geometry, items, enemies or the runner.
    pub fn occupied(&self, runner: &Runner) -> HashSet<Cell> {
        let cell = self.grid.cell();
        let mut occupied: HashSet<Cell> = self.platforms.iter().flat_map(|p| p.cells(cell)).collect();
        occupied.extend(self.obstacles.iter().copied());
        occupied.extend(self.items.iter().filter(|i| i.active).map(|i| i.cell));
        occupied.extend(self.enemies.iter().map(|e| e.cell(cell)));
        occupied.insert(runner.head_cell(cell));
        // Mid-jump the head can straddle two rows
        occupied.extend(runner.rect(cell).cells(cell));
        occupied.extend(runner.trail().iter().copied());
        occupied
    }

    /// Does `rect` overlap any platform?
    pub fn hits_platform(&self, rect: &Rect) -> bool {
        self.platforms.iter().any(|p| p.overlaps(rect))
    }

    /// Does `rect` overlap any spike cell?
    pub fn hits_obstacle(&self, rect: &Rect) -> bool {
        let cell = self.grid.cell();
        self.obstacles.iter().any(|&o| Rect::from_cell(o, cell).overlaps(rect))
    }

    /// Place a new item of `kind` on a free cell. Returns the cell used.
    pub fn spawn_item<R: Rng + ?Sized>(&mut self, kind: ItemKind, runner: &Runner, rng: &mut R) -> Option<Cell> {
        let cell = sample_free_cell(&self.occupied(runner), self.spawn_area(), rng)?;
        self.items.push(Item::new(cell, kind));
        Some(cell)
    }

    /// Place a new enemy on a free cell. Returns the cell used.
    pub fn spawn_enemy<R: Rng + ?Sized>(&mut self, speed: i32, runner: &Runner, rng: &mut R) -> Option<Cell> {
        let cell = sample_free_cell(&self.occupied(runner), self.spawn_area(), rng)?;
        let direction = if rng.gen_bool(0.5) { Direction::Left } else { Direction::Right };
        self.enemies.push(Enemy::new(cell, self.grid.cell(), direction, speed));
        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid() -> Grid {
        Grid::new(800, 600, 20)
    }

    #[test]
    fn test_layout_has_full_width_floor() {
        let world = WorldState::empty(grid());
        let floor = world.platforms[0];
        assert_eq!(floor.y, 580.0);
        assert_eq!(floor.w, 800.0);
        assert_eq!(world.platforms.len(), 1 + PLATFORM_LAYOUT.len());
    }

    #[test]
    fn test_generate_respects_counts_and_occupancy() {
        let config = GameConfig::default();
        let runner = Runner::new(Cell::new(2, 28), 20.0);
        let mut rng = StdRng::seed_from_u64(5);
        let world = WorldState::generate(&config, grid(), &runner, &mut rng);

        assert_eq!(world.obstacles.len(), config.obstacle_count);
        assert_eq!(world.enemies.len(), config.enemy_count);
        assert_eq!(world.items.len(), config.coin_count + config.mushroom_count);

        let platform_cells: HashSet<Cell> = world.platforms.iter().flat_map(|p| p.cells(20.0)).collect();
        let mut seen = HashSet::new();
        for c in world.obstacles.iter().chain(world.items.iter().map(|i| &i.cell)) {
            assert!(!platform_cells.contains(c));
            assert!(seen.insert(*c), "two things spawned on {:?}", c);
        }
    }

    #[test]
    fn test_runway_is_clear() {
        let config = GameConfig { obstacle_count: 200, enemy_count: 0, coin_count: 0, mushroom_count: 0, ..GameConfig::default() };
        let runner = Runner::new(Cell::new(2, 28), 20.0);
        let mut rng = StdRng::seed_from_u64(11);
        let world = WorldState::generate(&config, grid(), &runner, &mut rng);
        for col in 2..=2 + SAFE_RUN {
            assert!(!world.obstacles.contains(&Cell::new(col, 28)));
        }
    }

    #[test]
    fn test_spawn_item_avoids_runner_body() {
        let mut world = WorldState::empty(grid());
        let mut runner = Runner::new(Cell::new(2, 28), 20.0);
        runner.grow_by(5);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let cell = world.spawn_item(ItemKind::Coin, &runner, &mut rng).unwrap();
            assert!(!runner.occupies(cell, 20.0));
        }
    }
}
