//! Terminal input.
//!
//! Maps `crossterm` key presses into [`crate::types::GameAction`]s. Each press
//! is one command; there is no auto-shift or auto-repeat.

pub mod map;

pub use tetris_duel_types as types;

pub use map::{handle_event, handle_key_event, should_quit};
