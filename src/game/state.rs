//! Game State and the update step
//!
//! `GameState` owns everything a run needs: the runner, the world, score,
//! level, power-up timer and the RNG. `update` advances it by exactly one
//! tick from one `TickInput`; it never touches the window, so the whole
//! game can be driven from tests.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::enemy::step_enemy;
use super::entity::{ItemKind, Runner};
use super::event::{DeathCause, EventQueue, GameEvent};
use super::geometry::{Cell, Direction, Grid, Rect};
use super::physics::{self, StepResult};
use super::world::WorldState;
use crate::config::GameConfig;

/// What a fatal collision does to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Start over immediately with a fresh level
    #[default]
    Reset,
    /// Stop the run; the loop shows the banner and exits
    GameOver,
}

/// Loop phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

/// Everything the player asked for since the previous tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub steer: Option<Direction>,
    pub jump: bool,
    pub restart: bool,
}

/// What one call to `update` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Died and the run was reset
    Reset(DeathCause),
    /// Died and the run is over
    GameOver(DeathCause),
    /// Already game over; nothing was simulated
    Halted,
}

/// The complete state of one game.
pub struct GameState {
    pub config: GameConfig,
    pub grid: Grid,
    pub runner: Runner,
    pub world: WorldState,
    pub score: u32,
    pub level: u32,
    /// Ticks of speed boost left (0 = inactive)
    pub powerup_ticks: u32,
    pub phase: Phase,
    /// Ticks simulated since the process started
    pub ticks: u64,
    /// Deaths since the process started
    pub deaths: u32,
    /// Events produced by `update`, drained by the loop
    pub events: EventQueue<GameEvent>,
    rng: StdRng,
}

impl GameState {
    /// Create a game with a freshly generated level.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let grid = Grid::new(config.window_width, config.window_height, config.cell_size);
        let runner = Runner::new(Self::start_cell(grid), grid.cell());
        let mut state = Self {
            world: WorldState::empty(grid),
            config,
            grid,
            runner,
            score: 0,
            level: 1,
            powerup_ticks: 0,
            phase: Phase::Running,
            ticks: 0,
            deaths: 0,
            events: EventQueue::new(),
            rng: StdRng::seed_from_u64(seed),
        };
        state.reset();
        state
    }

    /// Where the runner appears: near the left edge, standing on the floor
    pub fn start_cell(grid: Grid) -> Cell {
        Cell::new(2.min(grid.cols - 1), grid.rows - 2)
    }

    /// Throw away the run and build a new one.
    pub fn reset(&mut self) {
        let cell = self.grid.cell();
        self.runner = Runner::new(Self::start_cell(self.grid), cell);
        self.world = WorldState::generate(&self.config, self.grid, &self.runner, &mut self.rng);
        self.runner.on_ground = physics::is_supported(&self.runner, &self.world);
        self.score = 0;
        self.level = 1;
        self.powerup_ticks = 0;
        self.phase = Phase::Running;
    }

    /// Ticks per second for the current level
    pub fn tick_rate(&self) -> u32 {
        (self.config.tick_rate + self.level.saturating_sub(1)).min(self.config.max_tick_rate)
    }

    pub fn powerup_active(&self) -> bool {
        self.powerup_ticks > 0
    }

    /// Advance the game by one tick.
    pub fn update(&mut self, input: &TickInput) -> TickOutcome {
        if self.phase == Phase::GameOver {
            if input.restart {
                log::info!("Restarting after game over");
                self.reset();
                return TickOutcome::Continue;
            }
            return TickOutcome::Halted;
        }
        self.ticks += 1;

        if let Some(direction) = input.steer {
            self.runner.steer(direction);
        }

        let steps = if self.powerup_active() { self.config.powerup_steps } else { 1 };
        if self.powerup_active() {
            self.powerup_ticks -= 1;
            if self.powerup_ticks == 0 {
                self.events.send(GameEvent::PowerUpExpired);
            }
        }

        self.update_enemies();

        let vertical = physics::vertical_step(&mut self.runner, &self.world, &self.config, input.jump);
        if let Some(cause) = self.resolve_contacts(vertical.landed) {
            return self.die(cause);
        }

        for _ in 0..steps {
            if physics::horizontal_step(&mut self.runner, &self.world) == StepResult::Blocked {
                break;
            }
            if let Some(cause) = self.resolve_contacts(false) {
                return self.die(cause);
            }
        }

        self.update_level();
        TickOutcome::Continue
    }

    fn update_enemies(&mut self) {
        // Enemies only look at platforms and spikes, so step them outside the world
        let mut enemies = std::mem::take(&mut self.world.enemies);
        let mut lost = 0;
        for enemy in &mut enemies {
            if step_enemy(enemy, &self.world).lost {
                lost += 1;
            }
        }
        let height = self.grid.height();
        enemies.retain(|e| e.y < height);
        self.world.enemies = enemies;

        for _ in 0..lost {
            if self
                .world
                .spawn_enemy(self.config.enemy_speed, &self.runner, &mut self.rng)
                .is_none()
            {
                log::warn!("No free cell to respawn a fallen enemy");
            }
        }
    }

    /// Check the runner against everything it can touch. Returns the cause
    /// of death if the contact was fatal.
    ///
    /// `landed` is set when this step's fall ended on a platform: the runner
    /// is already grounded, but it came down onto whatever it now touches.
    fn resolve_contacts(&mut self, landed: bool) -> Option<DeathCause> {
        let cell = self.grid.cell();
        let body = self.runner.rect(cell);

        if self.runner.y >= self.grid.height() {
            return Some(DeathCause::FellOut);
        }
        if self.runner.bites_self(cell) {
            return Some(DeathCause::SelfBite);
        }
        if self.world.hits_obstacle(&body) {
            return Some(DeathCause::Obstacle);
        }

        if let Some(index) = self.world.enemies.iter().position(|e| e.rect(cell).overlaps(&body)) {
            let stomping = landed || (self.runner.velocity_y > 0.0 && !self.runner.on_ground);
            if !stomping {
                return Some(DeathCause::Enemy);
            }
            let enemy = self.world.enemies.remove(index);
            self.score += self.config.stomp_score;
            self.runner.velocity_y = self.config.jump_impulse * 0.5;
            self.runner.on_ground = false;
            self.events.send(GameEvent::EnemyStomped { cell: enemy.cell(cell) });
            if self
                .world
                .spawn_enemy(self.config.enemy_speed, &self.runner, &mut self.rng)
                .is_none()
            {
                log::warn!("No free cell to respawn a stomped enemy");
            }
        }

        self.collect_items(&body);
        None
    }

    fn collect_items(&mut self, body: &Rect) {
        let cell = self.grid.cell();
        let mut eaten = Vec::new();
        for item in self.world.items.iter_mut().filter(|i| i.active) {
            if Rect::from_cell(item.cell, cell).overlaps(body) {
                item.active = false;
                eaten.push(*item);
            }
        }
        if eaten.is_empty() {
            return;
        }
        self.world.items.retain(|i| i.active);

        for item in eaten {
            let (score, growth) = match item.kind {
                ItemKind::Coin => (self.config.coin_score, self.config.coin_growth),
                ItemKind::Mushroom => (self.config.mushroom_score, self.config.mushroom_growth),
            };
            self.score += score;
            self.runner.grow_by(growth);

            if item.kind == ItemKind::Mushroom {
                self.powerup_ticks = self.config.powerup_ticks;
                self.events.send(GameEvent::PowerUpStarted { ticks: self.powerup_ticks });
            }

            let respawned_at = self.world.spawn_item(item.kind, &self.runner, &mut self.rng);
            if respawned_at.is_none() {
                log::warn!("No free cell to respawn a {:?}", item.kind);
            }
            self.events.send(GameEvent::ItemCollected {
                kind: item.kind,
                cell: item.cell,
                respawned_at,
            });
        }
    }

    fn update_level(&mut self) {
        let level = 1 + self.score / self.config.points_per_level;
        if level > self.level {
            self.level = level;
            self.events.send(GameEvent::LevelUp { level });
        }
    }

    fn die(&mut self, cause: DeathCause) -> TickOutcome {
        self.deaths += 1;
        self.events.send(GameEvent::Died { cause });
        match self.config.on_death {
            FailurePolicy::Reset => {
                self.reset();
                TickOutcome::Reset(cause)
            }
            FailurePolicy::GameOver => {
                self.phase = Phase::GameOver;
                TickOutcome::GameOver(cause)
            }
        }
    }
}
