//! Heuristic agent - greedy one-piece placement search
//!
//! For the active piece the agent tries every rotation of the spawn matrix
//! and every column it fits in, drops it, and scores the resulting grid with
//! a weighted sum of five features:
//!
//! `500·lines − 50·holes − 15·aggHeight + 30·fill − 20·unevenness`
//!
//! The agent keeps no state between decisions. [`AgentController`] paces
//! decision cycles and replays each one through the session's ordinary move
//! API, so the agent obeys exactly the same rules as the human.

pub mod driver;
pub mod evaluation;
pub mod search;

pub use driver::{decide_and_step, replay_step, rotations_needed, AgentController, StepOutcome};
pub use evaluation::{Features, Weights, INVALID_PLACEMENT_SCORE};
pub use search::{evaluate_placement, find_best_move, landing_row, Placement, ScoredPlacement};
