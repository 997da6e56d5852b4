//! Arena - the human-versus-agent match
//!
//! Two [`GameSession`](tetris_duel_core::GameSession)s, one steered by the
//! player and one by the [`AgentController`](tetris_duel_agent::AgentController),
//! joined by a referee that turns each side's events into effects on the
//! other:
//!
//! - **Gift**: clearing exactly two lines replaces the opponent's active
//!   piece with an O or an I
//! - **Line exchange**: clearing exactly four lines copies one of them into
//!   the opponent's lowest empty row
//! - **Slowdown**: crossing a multiple of 1000 points slows both boards by
//!   20% for ten seconds
//! - **Game over**: when one board tops out the other one stops too
//!
//! # Configuration
//!
//! See [`config`] for the environment variables read by
//! [`DuelConfig::from_env`].

pub mod config;
pub mod duel;
pub mod notice;
pub mod scheduler;
pub mod sink;

pub use tetris_duel_core::types;

pub use config::{ConfigError, DuelConfig};
pub use duel::{ArenaTask, Duel, DuelSnapshot, MatchSummary};
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use scheduler::{Scheduler, TaskId};
pub use sink::{GameOverSink, RenderSink, ScoreSink};
