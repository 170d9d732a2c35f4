//! Input handling with gamepad support
//!
//! Keyboard and gamepad both feed one action-based API, which is folded
//! into the `TickInput` the game consumes each tick.
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: Keyboard only

mod actions;
mod gamepad;
mod state;

pub use actions::*;
pub use gamepad::{button, Gamepad};
pub use state::*;
