//! Terminal duel runner (default binary).
//!
//! The player steers the left board, the heuristic agent the right one.
//! Crossterm provides input; drawing goes through the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{error, info, warn};

use tetris_duel::arena::{Duel, DuelConfig};
use tetris_duel::input::handle_event;
use tetris_duel::logging;
use tetris_duel::term::{DuelView, Screen, Viewport};
use tetris_duel::types::{GameAction, Side, TICK_MS};

fn main() -> Result<()> {
    let config = DuelConfig::from_env().context("invalid configuration")?;
    if let Some(path) = &config.log_file {
        logging::init_file(path, &config.log_filter)?;
    }

    let mut screen = Screen::enter()?;
    let result = run(&mut screen, config);

    // Always try to restore terminal state.
    if let Err(err) = screen.exit() {
        error!(?err, "failed to restore terminal");
    }
    result
}

fn check_viewport(viewport: Viewport) {
    let need = DuelView::default().required_size();
    if viewport.width < need.width || viewport.height < need.height {
        warn!(
            width = viewport.width,
            height = viewport.height,
            need_width = need.width,
            need_height = need.height,
            "terminal smaller than the duel layout"
        );
    }
}

fn run(screen: &mut Screen, config: DuelConfig) -> Result<()> {
    let mut duel = Duel::new(config);
    duel.set_game_over_sink(|side: Side, score: u32| {
        info!(side = side.as_str(), score, "game over");
    });
    duel.start();
    check_viewport(screen.viewport());

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        duel.render(screen)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Resize(width, height) => check_viewport(Viewport::new(width, height)),
                ev => match handle_event(&ev) {
                    Some(GameAction::Quit) => {
                        info!("quit requested");
                        return Ok(());
                    }
                    Some(action) => {
                        duel.apply_input(action);
                    }
                    None => {}
                },
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            duel.tick(TICK_MS);
        }
    }
}
