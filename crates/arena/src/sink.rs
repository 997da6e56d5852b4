//! Outbound hooks of a match

use crate::duel::DuelSnapshot;
use crate::types::Side;

/// Told the current score of a side after every scoring lock.
pub trait ScoreSink {
    fn score_changed(&mut self, side: Side, score: u32);
}

/// Told once per session transition into game over.
pub trait GameOverSink {
    fn game_over(&mut self, side: Side, final_score: u32);
}

/// Draws a frame.
pub trait RenderSink {
    fn render(&mut self, snapshot: &DuelSnapshot) -> anyhow::Result<()>;
}

impl<F: FnMut(Side, u32)> ScoreSink for F {
    fn score_changed(&mut self, side: Side, score: u32) {
        self(side, score)
    }
}

impl<F: FnMut(Side, u32)> GameOverSink for F {
    fn game_over(&mut self, side: Side, final_score: u32) {
        self(side, final_score)
    }
}
