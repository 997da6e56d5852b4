//! Decision replay and pacing
//!
//! The agent does not teleport pieces. Each decision cycle it searches
//! again from the current position, then performs a bounded step toward the
//! target through the session's ordinary move API: the rotations needed, one
//! column, one row down.

use tracing::debug;

use tetris_duel_core::{GameSession, MoveOutcome};
use tetris_duel_core::types::{slowed_interval, BASE_AI_DELAY_MS};

use crate::evaluation::Weights;
use crate::search::{find_best_move, Placement};

/// What one decision cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The session is not running or has no active piece.
    Idle,
    /// No candidate could land; the cycle did nothing.
    NoPlacement,
    /// The step was replayed; `down` is the outcome of the final down-move.
    Stepped {
        target: Placement,
        rotations: u8,
        down: MoveOutcome,
    },
}

/// Quarter turns needed to reach `target` from `current`.
pub fn rotations_needed(current: u8, target: u8) -> u8 {
    (target % 4 + 4 - current % 4) % 4
}

/// Replay one bounded step toward `target` on `session`.
///
/// Rotation failures are tolerated; the next cycle searches again.
pub fn replay_step(session: &mut GameSession, target: Placement) -> StepOutcome {
    let Some(active) = session.active() else {
        return StepOutcome::Idle;
    };

    let rotations = rotations_needed(active.rotation, target.rotation);
    for _ in 0..rotations {
        session.rotate();
    }

    if let Some(active) = session.active() {
        let dx = (target.x - active.x).signum();
        if dx != 0 {
            session.try_move(dx, 0);
        }
    }

    let down = session.try_move(0, 1);
    StepOutcome::Stepped {
        target,
        rotations,
        down,
    }
}

/// Search and replay once.
pub fn decide_and_step(session: &mut GameSession, weights: &Weights) -> StepOutcome {
    if !session.is_running() {
        return StepOutcome::Idle;
    }
    let Some(active) = session.active() else {
        return StepOutcome::Idle;
    };
    match find_best_move(session.grid(), &active, weights) {
        Some(target) => {
            debug!(
                kind = active.kind.letter(),
                x = target.x,
                rotation = target.rotation,
                "agent decision"
            );
            replay_step(session, target)
        }
        None => {
            debug!(kind = active.kind.letter(), "agent found no placement");
            StepOutcome::NoPlacement
        }
    }
}

/// Runs a decision cycle every `move_delay_ms` of accumulated time.
#[derive(Debug, Clone)]
pub struct AgentController {
    weights: Weights,
    base_delay_ms: u32,
    delay_ms: u32,
    counter_ms: u32,
    slowed: bool,
    decisions: u64,
}

impl AgentController {
    pub fn new(base_delay_ms: u32) -> Self {
        Self::with_weights(base_delay_ms, Weights::default())
    }

    pub fn with_weights(base_delay_ms: u32, weights: Weights) -> Self {
        Self {
            weights,
            base_delay_ms,
            delay_ms: base_delay_ms,
            counter_ms: 0,
            slowed: false,
            decisions: 0,
        }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn move_delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn is_slowed(&self) -> bool {
        self.slowed
    }

    pub fn decisions(&self) -> u64 {
        self.decisions
    }

    /// Switch between the base and the slowed delay. Always derived from
    /// the base, so repeated slowdowns never compound.
    pub fn set_slowed(&mut self, slowed: bool) {
        self.slowed = slowed;
        self.delay_ms = if slowed {
            slowed_interval(self.base_delay_ms)
        } else {
            self.base_delay_ms
        };
    }

    pub fn reset(&mut self) {
        self.counter_ms = 0;
        self.decisions = 0;
        self.set_slowed(false);
    }

    /// Accumulate time; run one cycle once the counter passes the delay.
    pub fn tick(&mut self, session: &mut GameSession, elapsed_ms: u32) -> Option<StepOutcome> {
        if !session.is_running() {
            return None;
        }
        self.counter_ms = self.counter_ms.saturating_add(elapsed_ms);
        if self.counter_ms <= self.delay_ms {
            return None;
        }
        self.counter_ms = 0;
        self.decisions += 1;
        Some(decide_and_step(session, &self.weights))
    }
}

impl Default for AgentController {
    fn default() -> Self {
        Self::new(BASE_AI_DELAY_MS)
    }
}
