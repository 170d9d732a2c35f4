//! Game Module
//!
//! A platformer runner that grows a snake-like trail as it collects items.
//!
//! Key concepts:
//! - Grid: Fixed cell lattice; horizontal motion is one cell per step and
//!   wraps around the screen edges
//! - Runner: The player's head (free vertical motion) plus its trail
//! - World: Platforms, spikes, items and enemies
//! - Event: Record of what a tick did, drained by the main loop
//!
//! The simulation never touches macroquad directly except through the
//! renderer's `Canvas` and the frame pacer, so all of it is testable
//! without a window.

pub mod geometry;
pub mod entity;
pub mod spawn;
pub mod world;
pub mod physics;
pub mod enemy;
pub mod event;
pub mod state;
pub mod renderer;
pub mod timing;

// Re-export main types
pub use geometry::{Cell, Direction, Grid, Rect};
pub use event::{DeathCause, GameEvent};
pub use state::{FailurePolicy, GameState, Phase, TickInput, TickOutcome};
pub use renderer::{render, Canvas, MacroquadCanvas};
pub use timing::FramePacer;
