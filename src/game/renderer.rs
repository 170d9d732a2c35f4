//! Game Renderer
//!
//! Draws a `GameState` through a [`Canvas`]. Rendering only reads the
//! state; the canvas seam keeps macroquad out of the draw logic so tests
//! can count draw calls without a window.

use macroquad::prelude::Color;

use super::geometry::Rect;
use super::state::{GameState, Phase};
use super::entity::ItemKind;

// =============================================================================
// Palette
// =============================================================================

pub const SKY: Color = Color::new(0.53, 0.81, 0.92, 1.0);
pub const BRICK: Color = Color::new(0.55, 0.27, 0.07, 1.0);
pub const SPIKE: Color = Color::new(0.2, 0.2, 0.85, 1.0);
pub const COIN: Color = Color::new(1.0, 0.85, 0.0, 1.0);
pub const MUSHROOM: Color = Color::new(0.9, 0.1, 0.1, 1.0);
pub const ENEMY: Color = Color::new(0.1, 0.1, 0.1, 1.0);
pub const BODY: Color = Color::new(0.1, 0.75, 0.2, 1.0);
/// Body colour while the speed boost is active
pub const BODY_BOOSTED: Color = Color::new(1.0, 0.6, 0.1, 1.0);
pub const HEAD: Color = Color::new(0.85, 0.1, 0.15, 1.0);
pub const HUD_TEXT: Color = Color::new(1.0, 1.0, 1.0, 1.0);
pub const BANNER: Color = Color::new(0.9, 0.05, 0.05, 1.0);

/// HUD text size
pub const FONT_SIZE_HUD: f32 = 20.0;
/// Game-over banner size
pub const FONT_SIZE_BANNER: f32 = 48.0;

/// The drawing surface the renderer targets
pub trait Canvas {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    /// `y` is the text baseline
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
}

/// Canvas backed by the macroquad window
pub struct MacroquadCanvas;

impl Canvas for MacroquadCanvas {
    fn clear(&mut self, color: Color) {
        macroquad::prelude::clear_background(color);
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        macroquad::prelude::draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        macroquad::prelude::draw_text(text, x, y, size, color);
    }
}

/// Draw one frame of the game.
pub fn render<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    let cell = state.grid.cell();
    let world = &state.world;

    canvas.clear(SKY);

    for platform in &world.platforms {
        canvas.draw_rect(*platform, BRICK);
    }

    for &obstacle in &world.obstacles {
        canvas.draw_rect(Rect::from_cell(obstacle, cell), SPIKE);
    }

    for item in world.items.iter().filter(|i| i.active) {
        let color = match item.kind {
            ItemKind::Coin => COIN,
            ItemKind::Mushroom => MUSHROOM,
        };
        canvas.draw_rect(Rect::from_cell(item.cell, cell), color);
    }

    for enemy in &world.enemies {
        canvas.draw_rect(enemy.rect(cell), ENEMY);
    }

    // Tail first so the newer segments and the head draw on top
    let body = if state.powerup_active() { BODY_BOOSTED } else { BODY };
    for &segment in state.runner.trail().iter().rev() {
        canvas.draw_rect(Rect::from_cell(segment, cell), body);
    }
    canvas.draw_rect(state.runner.rect(cell), HEAD);

    draw_hud(state, canvas);
}

fn draw_hud<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    let width = state.grid.width();
    let height = state.grid.height();

    canvas.draw_text(&format!("Score: {}", state.score), 10.0, FONT_SIZE_HUD, FONT_SIZE_HUD, HUD_TEXT);
    canvas.draw_text(
        &format!("Level: {}", state.level),
        width - 110.0,
        FONT_SIZE_HUD,
        FONT_SIZE_HUD,
        HUD_TEXT,
    );
    if state.powerup_active() {
        canvas.draw_text(
            &format!("Speed: {}", state.powerup_ticks),
            width * 0.5 - 50.0,
            FONT_SIZE_HUD,
            FONT_SIZE_HUD,
            HUD_TEXT,
        );
    }

    if state.phase == Phase::GameOver {
        canvas.draw_text("GAME OVER", width * 0.5 - 120.0, height * 0.5, FONT_SIZE_BANNER, BANNER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::entity::{Enemy, Item};
    use crate::game::geometry::{Cell, Direction};
    use crate::game::state::FailurePolicy;

    /// Records draw calls instead of drawing
    #[derive(Default)]
    struct RecordingCanvas {
        clears: usize,
        rects: Vec<(Rect, Color)>,
        texts: Vec<String>,
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self, _color: Color) {
            self.clears += 1;
        }

        fn draw_rect(&mut self, rect: Rect, color: Color) {
            self.rects.push((rect, color));
        }

        fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _size: f32, _color: Color) {
            self.texts.push(text.to_string());
        }
    }

    fn game() -> GameState {
        GameState::new(GameConfig { seed: Some(3), ..GameConfig::default() }, 3)
    }

    #[test]
    fn test_one_draw_per_thing() {
        let mut state = game();
        state.runner.grow_by(4);

        let mut canvas = RecordingCanvas::default();
        render(&state, &mut canvas);

        let world = &state.world;
        let expected = world.platforms.len()
            + world.obstacles.len()
            + world.items.len()
            + world.enemies.len()
            + state.runner.trail().len()
            + 1;
        assert_eq!(canvas.clears, 1);
        assert_eq!(canvas.rects.len(), expected);
        assert_eq!(canvas.rects.last().map(|r| r.1), Some(HEAD));
        assert_eq!(canvas.texts, vec!["Score: 0".to_string(), "Level: 1".to_string()]);
    }

    #[test]
    fn test_inactive_items_are_not_drawn() {
        let mut state = game();
        state.world.items.clear();
        state.world.enemies.clear();
        let mut item = Item::new(Cell::new(10, 10), ItemKind::Coin);
        item.active = false;
        state.world.items.push(item);
        state.world.enemies.push(Enemy::new(Cell::new(4, 4), 20.0, Direction::Left, 1));

        let mut canvas = RecordingCanvas::default();
        render(&state, &mut canvas);
        assert!(!canvas.rects.iter().any(|r| r.1 == COIN));
        assert_eq!(canvas.rects.iter().filter(|r| r.1 == ENEMY).count(), 1);
    }

    #[test]
    fn test_hud_shows_boost_and_banner() {
        let config = GameConfig { on_death: FailurePolicy::GameOver, ..GameConfig::default() };
        let mut state = GameState::new(config, 3);
        state.powerup_ticks = 12;
        state.phase = Phase::GameOver;

        let mut canvas = RecordingCanvas::default();
        render(&state, &mut canvas);
        assert!(canvas.texts.contains(&"Speed: 12".to_string()));
        assert!(canvas.texts.contains(&"GAME OVER".to_string()));
    }

    #[test]
    fn test_boosted_body_colour() {
        let mut state = game();
        state.runner.grow_by(2);
        state.powerup_ticks = 5;

        let mut canvas = RecordingCanvas::default();
        render(&state, &mut canvas);
        assert_eq!(canvas.rects.iter().filter(|r| r.1 == BODY_BOOSTED).count(), 2);
        assert!(!canvas.rects.iter().any(|r| r.1 == BODY));
    }

    #[test]
    fn test_render_does_not_change_state() {
        let state = game();
        let score = state.score;
        let items = state.world.items.clone();
        let mut canvas = RecordingCanvas::default();
        render(&state, &mut canvas);
        render(&state, &mut canvas);
        assert_eq!(state.score, score);
        assert_eq!(state.world.items, items);
    }
}
