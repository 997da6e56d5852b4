//! Tetris duel (workspace facade crate).
//!
//! Re-exports the workspace crates under short names so binaries, tests and
//! benches can write `tetris_duel::core::GameSession` and so on.

pub mod logging;

pub use tetris_duel_agent as agent;
pub use tetris_duel_arena as arena;
pub use tetris_duel_core as core;
pub use tetris_duel_input as input;
pub use tetris_duel_term as term;
pub use tetris_duel_types as types;
