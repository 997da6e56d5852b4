use tetris_duel::agent::{
    decide_and_step, evaluate_placement, find_best_move, AgentController, Features, Placement,
    StepOutcome, Weights,
};
use tetris_duel::core::{GameSession, Grid, MoveOutcome, Piece};
use tetris_duel::types::{ShapeKind, BASE_AI_DELAY_MS};

#[test]
fn test_o_on_empty_grid_lands_flat_against_the_wall() {
    let grid = Grid::new();
    let piece = Piece::spawn(ShapeKind::O);
    let best = find_best_move(&grid, &piece, &Weights::default()).unwrap();
    assert_eq!(best, Placement { x: 0, rotation: 0 });

    let scored = evaluate_placement(&grid, ShapeKind::O, best, piece.y, &Weights::default());
    assert_eq!(scored.landing_row, 18);
}

#[test]
fn test_hole_is_scored_below_flat_placement() {
    // One cell at the bottom left: a flat I at column 0 would bridge three
    // holes, one column to the right it rests on the floor.
    let grid = Grid::from_pattern(&["#........."]);
    let weights = Weights::default();
    let at = |x| Placement { x, rotation: 0 };
    let bridged = evaluate_placement(&grid, ShapeKind::I, at(0), 0, &weights);
    let flat = evaluate_placement(&grid, ShapeKind::I, at(1), 0, &weights);

    assert_eq!(bridged.landing_row, 18);
    assert_eq!(flat.landing_row, 19);
    assert!(flat.score > bridged.score);
}

#[test]
fn test_agent_takes_the_open_line() {
    let grid = Grid::from_pattern(&["#########."]);
    let piece = Piece::spawn(ShapeKind::I);
    let best = find_best_move(&grid, &piece, &Weights::default()).unwrap();
    // Vertical I in the gap completes the row.
    assert_eq!(best.x, 9);
    assert_eq!(best.rotation % 2, 1);
}

#[test]
fn test_features_count_complete_rows_without_clearing() {
    let grid = Grid::from_pattern(&[
        "#.........",
        "..........",
        "..........",
        "##########",
        "##########",
    ]);
    let f = Features::measure(&grid);
    assert_eq!(f.lines, 2);
    // Two covered empties in column 0, squared.
    assert_eq!(f.holes, 4);
    assert!(grid.is_row_full(19));
}

#[test]
fn test_no_placement_when_grid_blocks_every_column() {
    let mut grid = Grid::new();
    for y in 0..20 {
        for x in 0..10 {
            grid.set(x, y, Some(ShapeKind::Z));
        }
    }
    assert_eq!(find_best_move(&grid, &Piece::spawn(ShapeKind::T), &Weights::default()), None);
}

#[test]
fn test_decision_cycles_walk_the_piece_down() {
    let mut s = GameSession::new(17);
    s.start();
    let weights = Weights::default();
    let start_y = s.active().unwrap().y;

    match decide_and_step(&mut s, &weights) {
        StepOutcome::Stepped { down, .. } => assert_eq!(down, MoveOutcome::Moved),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(s.active().unwrap().y, start_y + 1);

    let mut cycles = 0;
    while s.pieces_locked() == 0 {
        decide_and_step(&mut s, &weights);
        cycles += 1;
        assert!(cycles < 40);
    }
    assert!(s.is_running());
}

#[test]
fn test_controller_paces_decisions() {
    let mut s = GameSession::new(17);
    s.start();
    let mut agent = AgentController::new(BASE_AI_DELAY_MS);

    assert_eq!(agent.tick(&mut s, BASE_AI_DELAY_MS - 1), None);
    assert_eq!(agent.tick(&mut s, 1), None);
    assert!(agent.tick(&mut s, 1).is_some());
    assert_eq!(agent.decisions(), 1);
}

#[test]
fn test_agent_clears_lines_over_a_long_game() {
    let mut s = GameSession::new(2024);
    s.start();
    let weights = Weights::default();
    for _ in 0..4_000 {
        if !s.is_running() {
            break;
        }
        decide_and_step(&mut s, &weights);
    }
    assert!(s.lines() > 0, "agent never cleared a line");
    assert!(s.pieces_locked() > 20);
}
