//! Mario Snake: a platformer runner that grows like a snake
//!
//! The runner never stops moving sideways. Jump between platforms, collect
//! coins and mushrooms to grow a trailing body, stomp enemies and avoid
//! spikes, the world edges wrap around, and biting your own tail ends the run.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod game;
mod input;

use config::GameConfig;
use game::{render, FramePacer, GameEvent, GameState, MacroquadCanvas, Phase, TickOutcome};
use input::{tick_input, Action, InputState};
use macroquad::prelude::*;

fn window_conf() -> Conf {
    let defaults = GameConfig::default();
    Conf {
        window_title: format!("Mario Snake v{}", VERSION),
        window_width: defaults.window_width as i32,
        window_height: defaults.window_height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Native: read the optional config file next to the binary's working directory
#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> GameConfig {
    let path = std::path::Path::new(config::CONFIG_FILE);
    match GameConfig::load_or_default(path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Ignoring {}: {}", path.display(), e);
            GameConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> GameConfig {
    GameConfig::default()
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::ItemCollected { kind, cell, respawned_at } => {
            log::debug!("Collected {:?} at {:?}, replacement at {:?}", kind, cell, respawned_at)
        }
        GameEvent::EnemyStomped { cell } => log::debug!("Stomped enemy at {:?}", cell),
        GameEvent::PowerUpStarted { ticks } => log::debug!("Speed boost for {} ticks", ticks),
        GameEvent::PowerUpExpired => log::debug!("Speed boost expired"),
        GameEvent::LevelUp { level } => log::info!("Level {}", level),
        GameEvent::Died { cause } => log::info!("Died: {:?}", cause),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    {
        crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let config = load_config();
    if config.window_width != GameConfig::default().window_width
        || config.window_height != GameConfig::default().window_height
    {
        request_new_screen_size(config.window_width as f32, config.window_height as f32);
    }

    let seed = config.seed.unwrap_or_else(|| (miniquad::date::now() * 1000.0) as u64);
    log::info!("Mario Snake v{} (seed {})", VERSION, seed);

    // Window close goes through the Quit action so the loop can log and exit cleanly
    prevent_quit();

    let mut game = GameState::new(config, seed);
    let mut input = InputState::new();
    if input.has_gamepad() {
        log::info!("Gamepad detected");
    }
    let mut canvas = MacroquadCanvas;
    let mut pacer = FramePacer::new();
    let mut game_over_at: Option<f64> = None;

    loop {
        pacer.begin();

        let actions = input.poll();
        if actions.contains(Action::Quit) {
            log::info!("Quit requested");
            break;
        }

        match game.update(&tick_input(actions)) {
            TickOutcome::GameOver(cause) => {
                log::info!("Game over ({:?}), final score {}", cause, game.score);
                game_over_at = Some(get_time());
            }
            TickOutcome::Reset(cause) => {
                log::info!("Run reset after {:?} (deaths: {})", cause, game.deaths);
            }
            TickOutcome::Continue | TickOutcome::Halted => {}
        }
        if game.phase == Phase::Running {
            game_over_at = None;
        }

        for event in game.events.drain() {
            log_event(&event);
        }

        render(&game, &mut canvas);
        next_frame().await;

        if let Some(since) = game_over_at {
            if get_time() - since >= game.config.game_over_hold_secs {
                break;
            }
        }

        pacer.wait(game.tick_rate());
    }

    log::info!("Final score {} after {} ticks", game.score, game.ticks);
}
