//! Headless agent run.
//!
//! Plays one session with the heuristic agent alone, one decision per step
//! and no timers, until the board tops out or the piece budget is spent.
//! Prints the final score.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use tetris_duel::agent::{decide_and_step, StepOutcome, Weights};
use tetris_duel::arena::config::clock_seed;
use tetris_duel::core::GameSession;
use tetris_duel::logging;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Stop after this many pieces have locked
    #[arg(long, default_value_t = 500)]
    pieces: u32,

    /// RNG seed (default: clock-derived)
    #[arg(long)]
    seed: Option<u32>,

    /// Log filter directive for stderr logging
    #[arg(long, default_value = "warn")]
    log: String,
}

/// Upper bound on decision cycles per piece; a piece needs at most one
/// cycle per row plus a few for rotation.
const MAX_STEPS_PER_PIECE: u32 = 64;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_stderr(&args.log)?;

    let seed = args.seed.unwrap_or_else(clock_seed);
    let weights = Weights::default();
    let mut session = GameSession::new(seed);
    session.start();
    info!(seed, pieces = args.pieces, "soak started");

    let mut steps = 0u32;
    let budget = args.pieces.saturating_mul(MAX_STEPS_PER_PIECE);
    while session.is_running() && session.pieces_locked() < args.pieces && steps < budget {
        steps += 1;
        if decide_and_step(&mut session, &weights) == StepOutcome::NoPlacement {
            // Nothing can land; let gravity force the issue.
            session.try_move(0, 1);
        }
        session.drain_events();
    }

    info!(steps, "soak finished");
    println!(
        "seed={} pieces={} lines={} score={} topped_out={}",
        seed,
        session.pieces_locked(),
        session.lines(),
        session.score(),
        session.game_over()
    );
    Ok(())
}
