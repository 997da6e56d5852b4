//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the board rules for one player: the grid, piece
//! matrices, collision, locking, line clearing, scoring and the session
//! lifecycle. It has no dependency on the terminal, the agent or the other
//! player; cross-player effects leave a session as [`types::SessionEvent`]s.
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 playfield with collision detection and line clearing
//! - [`pieces`]: shape matrices and clockwise matrix rotation
//! - [`rng`]: seeded uniform shape selection
//! - [`scoring`]: line-clear points and score thresholds
//! - [`session`]: one player's state machine (`NotStarted → Running → GameOver`)
//! - [`snapshot`]: copyable views for rendering
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each spawn picks one of seven kinds at random
//! - **Plain rotation**: clockwise matrix rotation, no kicks; a colliding
//!   rotation is discarded
//! - **Immediate lock**: a blocked downward move locks the piece at once
//! - **Top-out**: any filled cell in the top two rows after a lock ends the
//!   session, as does a spawn that collides
//! - **Scoring**: 50 per line plus 100/200/300 for 2/3/4 lines
//!
//! # Example
//!
//! ```
//! use tetris_duel_core::{GameSession, MoveOutcome};
//!
//! let mut session = GameSession::new(12345);
//! session.start();
//!
//! assert_eq!(session.try_move(0, 1), MoveOutcome::Moved);
//! while session.try_move(0, 1) != MoveOutcome::Locked {}
//! assert_eq!(session.pieces_locked(), 1);
//! ```
//!
//! # Timing
//!
//! Gravity is driven from outside: call
//! [`GameSession::tick`](session::GameSession::tick) every frame with the
//! elapsed time and the session steps down once per drop interval (500 ms,
//! 600 ms while slowed).

pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tetris_duel_types as types;

// Re-export commonly used types for convenience
pub use grid::{Grid, EMPTY_ROW};
pub use pieces::{base_shape, spawn_x, Piece, ShapeMatrix};
pub use rng::{ShapeRandomizer, SimpleRng};
pub use scoring::{crossed_step, line_clear_points};
pub use session::{GameSession, MoveOutcome, SessionPhase};
pub use snapshot::{ActiveSnapshot, SessionSnapshot};
