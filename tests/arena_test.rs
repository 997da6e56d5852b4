//! Headless matches driven the way the binary drives them: fixed ticks plus
//! occasional human input.

use std::cell::RefCell;
use std::rc::Rc;

use tetris_duel::arena::{Duel, DuelConfig, NoticeKind};
use tetris_duel::core::{Grid, Piece};
use tetris_duel::types::{GameAction, ShapeKind, Side, TICK_MS};

const MAX_TICKS: u32 = 200_000;

fn started(seed: u32) -> Duel {
    let mut duel = Duel::new(DuelConfig::default().with_seed(seed));
    duel.start();
    duel
}

fn run_to_end(duel: &mut Duel) -> u32 {
    let mut ticks = 0;
    while !duel.is_over() {
        duel.tick(TICK_MS);
        ticks += 1;
        assert!(ticks < MAX_TICKS, "match did not finish");
    }
    ticks
}

#[test]
fn test_idle_human_loses_to_agent() {
    let mut duel = started(2024);
    run_to_end(&mut duel);

    let summary = duel.summary().unwrap();
    assert!(duel.session(Side::Human).game_over());
    assert!(duel.session(Side::Ai).game_over());
    assert_eq!(summary.human_score, duel.session(Side::Human).score());
    assert_eq!(summary.ai_score, duel.session(Side::Ai).score());
    // Pieces dropped straight down the middle never complete a row.
    assert_eq!(summary.topped_out, Side::Human);
    assert!(duel.agent().decisions() > 0);
    assert!(duel.session(Side::Ai).pieces_locked() > 0);
}

#[test]
fn test_game_over_is_reported_once_per_side() {
    let seen: Rc<RefCell<Vec<Side>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let mut duel = started(7);
    duel.set_game_over_sink(move |side, _score| sink.borrow_mut().push(side));

    run_to_end(&mut duel);
    for _ in 0..1_000 {
        duel.tick(TICK_MS);
    }

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert!(seen.contains(&Side::Human));
    assert!(seen.contains(&Side::Ai));
}

#[test]
fn test_same_seed_same_match() {
    let mut a = started(99);
    let mut b = started(99);
    for i in 0..5_000u32 {
        if i % 97 == 0 {
            a.apply_input(GameAction::MoveLeft);
            b.apply_input(GameAction::MoveLeft);
        }
        if i % 131 == 0 {
            a.apply_input(GameAction::Rotate);
            b.apply_input(GameAction::Rotate);
        }
        a.tick(TICK_MS);
        b.tick(TICK_MS);
    }
    let (sa, sb) = (a.snapshot(), b.snapshot());
    assert_eq!(sa.human, sb.human);
    assert_eq!(sa.ai, sb.ai);
    assert_eq!(sa.summary, sb.summary);
}

#[test]
fn test_human_tetris_reaches_agent_board() {
    let mut duel = started(5);
    let human = duel.session_mut(Side::Human);
    *human.grid_mut() = Grid::from_pattern(&[
        "#########.",
        "#########.",
        "#########.",
        "#########.",
    ]);
    let mut i = Piece::spawn(ShapeKind::I).rotated_cw();
    i.x = 9;
    i.y = 16;
    assert!(human.place_active(i));

    assert!(duel.apply_input(GameAction::SoftDrop));

    assert_eq!(duel.session(Side::Human).score(), 500);
    let ai = duel.session(Side::Ai);
    assert!(ai.grid().is_row_full(19));
    let kinds: Vec<_> = duel.notices().iter().map(|n| (n.kind, n.side)).collect();
    assert!(kinds.contains(&(NoticeKind::LineGiven, Side::Human)));
    assert!(kinds.contains(&(NoticeKind::LineReceived, Side::Ai)));
}

#[test]
fn test_human_double_sends_gift() {
    let mut duel = started(6);
    let human = duel.session_mut(Side::Human);
    *human.grid_mut() = Grid::from_pattern(&["..########", "..########"]);
    let mut o = Piece::spawn(ShapeKind::O);
    o.x = 0;
    o.y = 18;
    assert!(human.place_active(o));

    assert!(duel.apply_input(GameAction::SoftDrop));

    assert_eq!(duel.session(Side::Human).score(), 200);
    let ai_active = duel.session(Side::Ai).active().unwrap();
    assert!(ShapeKind::GIFTS.contains(&ai_active.kind));
    assert!(matches!(
        duel.notices().last().map(|n| (n.kind, n.side)),
        Some((NoticeKind::Gift(_), Side::Ai))
    ));
}

#[test]
fn test_notices_expire_with_time() {
    let mut duel = started(6);
    let human = duel.session_mut(Side::Human);
    *human.grid_mut() = Grid::from_pattern(&["..########", "..########"]);
    let mut o = Piece::spawn(ShapeKind::O);
    o.x = 0;
    o.y = 18;
    assert!(human.place_active(o));
    duel.apply_input(GameAction::SoftDrop);
    assert!(!duel.notices().is_empty());

    for _ in 0..(1_000 / TICK_MS + 2) {
        duel.tick(TICK_MS);
    }
    assert!(duel.notices().is_empty());
}

#[test]
fn test_restart_after_match_over() {
    let mut duel = started(31);
    run_to_end(&mut duel);

    assert!(duel.apply_input(GameAction::Restart));
    assert!(!duel.is_over());
    for side in [Side::Human, Side::Ai] {
        let s = duel.session(side);
        assert!(s.is_running());
        assert_eq!(s.score(), 0);
        assert_eq!(s.episode_id(), 1);
        assert!(s.active().is_some());
    }
}
