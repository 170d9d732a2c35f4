//! Game tuning
//!
//! Every number the game loop depends on lives in [`GameConfig`]. The
//! defaults are the shipped tuning; an optional `mario_snake.ron` in the
//! working directory can override any subset of fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::FailurePolicy;

/// File looked up in the working directory at startup
pub const CONFIG_FILE: &str = "mario_snake.ron";

/// Sanity limits for loaded configs
pub mod limits {
    /// Smallest usable cell (pixels)
    pub const MIN_CELL_SIZE: u32 = 4;
    /// Smallest grid in either dimension (cells)
    pub const MIN_GRID_CELLS: u32 = 8;
    /// Largest window dimension (pixels)
    pub const MAX_WINDOW: u32 = 4096;
    /// Ticks per second ceiling
    pub const MAX_TICK_RATE: u32 = 120;
}

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
    Validation(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// All gameplay tuning.
///
/// Distances are pixels, velocities are pixels per tick, durations are ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Window / grid ===
    pub window_width: u32,
    pub window_height: u32,
    pub cell_size: u32,

    // === Pacing ===
    /// Ticks per second at level 1
    pub tick_rate: u32,
    /// Ticks per second never exceeds this, whatever the level
    pub max_tick_rate: u32,
    /// Score needed per level
    pub points_per_level: u32,

    // === Runner physics ===
    pub gravity: f32,
    /// Upward velocity set by a jump (negative = up)
    pub jump_impulse: f32,
    /// Terminal fall speed; must not exceed a cell or the runner can tunnel
    pub max_fall_speed: f32,

    // === Pickups ===
    pub coin_count: usize,
    pub coin_score: u32,
    pub coin_growth: usize,
    pub mushroom_count: usize,
    pub mushroom_score: u32,
    pub mushroom_growth: usize,
    /// How long a mushroom's speed boost lasts
    pub powerup_ticks: u32,
    /// Horizontal steps per tick while boosted
    pub powerup_steps: u32,

    // === Hazards ===
    pub enemy_count: usize,
    /// Enemy speed in cells per tick
    pub enemy_speed: i32,
    pub stomp_score: u32,
    pub obstacle_count: usize,

    // === Loop policy ===
    pub on_death: FailurePolicy,
    /// How long the game-over banner stays up before the loop exits (seconds)
    pub game_over_hold_secs: f64,
    /// Fixed RNG seed; None seeds from the clock
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            cell_size: 20,

            tick_rate: 10,
            max_tick_rate: 20,
            points_per_level: 50,

            gravity: 4.0,
            jump_impulse: -20.0,
            max_fall_speed: 20.0,

            coin_count: 5,
            coin_score: 10,
            coin_growth: 1,
            mushroom_count: 1,
            mushroom_score: 50,
            mushroom_growth: 3,
            powerup_ticks: 50,
            powerup_steps: 2,

            enemy_count: 3,
            enemy_speed: 1,
            stomp_score: 30,
            obstacle_count: 6,

            on_death: FailurePolicy::Reset,
            game_over_hold_secs: 2.0,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse a RON document; missing fields fall back to defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Load `path` if it exists, otherwise return defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject tuning the game loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Validation(msg));

        if self.cell_size < limits::MIN_CELL_SIZE {
            return invalid(format!("cell_size {} is below {}", self.cell_size, limits::MIN_CELL_SIZE));
        }
        if self.window_width > limits::MAX_WINDOW || self.window_height > limits::MAX_WINDOW {
            return invalid(format!(
                "window {}x{} exceeds {}",
                self.window_width, self.window_height, limits::MAX_WINDOW
            ));
        }
        if self.window_width / self.cell_size < limits::MIN_GRID_CELLS
            || self.window_height / self.cell_size < limits::MIN_GRID_CELLS
        {
            return invalid(format!(
                "grid must be at least {} cells in each direction",
                limits::MIN_GRID_CELLS
            ));
        }
        if self.tick_rate == 0 || self.max_tick_rate < self.tick_rate || self.max_tick_rate > limits::MAX_TICK_RATE {
            return invalid(format!(
                "tick rates must satisfy 0 < tick_rate ({}) <= max_tick_rate ({}) <= {}",
                self.tick_rate, self.max_tick_rate, limits::MAX_TICK_RATE
            ));
        }
        if self.points_per_level == 0 {
            return invalid("points_per_level must be positive".to_string());
        }
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return invalid(format!("gravity must be positive, got {}", self.gravity));
        }
        if !(self.jump_impulse.is_finite() && self.jump_impulse < 0.0) {
            return invalid(format!("jump_impulse must be negative, got {}", self.jump_impulse));
        }
        if !(self.max_fall_speed > 0.0 && self.max_fall_speed <= self.cell_size as f32) {
            return invalid(format!(
                "max_fall_speed must be in (0, {}], got {}",
                self.cell_size, self.max_fall_speed
            ));
        }
        if self.powerup_steps == 0 {
            return invalid("powerup_steps must be at least 1".to_string());
        }
        if self.enemy_speed <= 0 {
            return invalid(format!("enemy_speed must be positive, got {}", self.enemy_speed));
        }
        if !(self.game_over_hold_secs.is_finite() && self.game_over_hold_secs >= 0.0) {
            return invalid("game_over_hold_secs must be non-negative".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = GameConfig::from_ron_str("(tick_rate: 12, on_death: GameOver, seed: Some(7))").unwrap();
        assert_eq!(config.tick_rate, 12);
        assert_eq!(config.on_death, FailurePolicy::GameOver);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.coin_count, 5);
    }

    #[test]
    fn test_rejects_tunneling_fall_speed() {
        let err = GameConfig::from_ron_str("(max_fall_speed: 25.0)").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_rejects_upward_gravity() {
        assert!(GameConfig::from_ron_str("(gravity: -1.0)").is_err());
        assert!(GameConfig::from_ron_str("(jump_impulse: 5.0)").is_err());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = GameConfig::from_ron_str("(tick_rate: \"fast\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(coin_count: 9)").unwrap();
        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.coin_count, 9);
    }

    #[test]
    fn test_shipped_sample_matches_defaults() {
        let config = GameConfig::from_ron_str(include_str!("../mario_snake.ron")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
