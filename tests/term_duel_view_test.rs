use tetris_duel::arena::{Duel, DuelConfig, MatchSummary};
use tetris_duel::term::{encode_full_into, DuelView, FrameBuffer, Viewport};
use tetris_duel::types::Side;

fn snapshot() -> tetris_duel::arena::DuelSnapshot {
    let mut duel = Duel::new(DuelConfig::default().with_seed(12));
    duel.start();
    duel.snapshot()
}

fn find_row(fb: &FrameBuffer, needle: &str) -> Option<u16> {
    (0..fb.height()).find(|&y| fb.row_text(y).contains(needle))
}

#[test]
fn test_both_boards_are_framed() {
    let view = DuelView::default();
    let vp = view.required_size();
    let fb = view.render(&snapshot(), vp);

    let title = fb.row_text(0);
    assert!(title.contains("YOU"));
    assert!(title.contains("AI"));

    let top = fb.row_text(1);
    assert_eq!(top.matches('┌').count(), 2);
    assert_eq!(top.matches('┐').count(), 2);
    let bottom = fb.row_text(vp.height - 1);
    assert_eq!(bottom.matches('└').count(), 2);
    assert_eq!(bottom.matches('┘').count(), 2);
}

#[test]
fn test_panels_show_score_lines_and_next() {
    let view = DuelView::default();
    let fb = view.render(&snapshot(), view.required_size());

    let score_row = find_row(&fb, "SCORE").unwrap();
    assert_eq!(fb.row_text(score_row).matches("SCORE").count(), 2);
    assert_eq!(fb.row_text(score_row + 1).matches('0').count(), 2);
    assert!(find_row(&fb, "LINES").is_some());
    assert!(find_row(&fb, "NEXT").is_some());
}

#[test]
fn test_active_pieces_are_drawn() {
    let view = DuelView::default();
    let fb = view.render(&snapshot(), view.required_size());
    // Four cells per active piece plus two next previews, two columns each.
    let blocks = fb.cells().iter().filter(|c| c.ch == '█').count();
    assert_eq!(blocks, 4 * 2 * 4);
}

#[test]
fn test_summary_overlay() {
    let view = DuelView::default();
    let mut snap = snapshot();
    snap.summary = Some(MatchSummary::new(1200, 350, Side::Ai));
    let fb = view.render(&snap, view.required_size());

    assert!(find_row(&fb, "GAME OVER").is_some());
    assert!(find_row(&fb, "You win!").is_some());
    assert!(find_row(&fb, "1200").is_some());
    assert!(find_row(&fb, "r restart").is_some());
}

#[test]
fn test_draw_verdict() {
    let view = DuelView::default();
    let mut snap = snapshot();
    snap.summary = Some(MatchSummary::new(0, 0, Side::Human));
    let fb = view.render(&snap, view.required_size());
    assert!(find_row(&fb, "Draw").is_some());
}

#[test]
fn test_small_viewport_does_not_panic() {
    let view = DuelView::default();
    let fb = view.render(&snapshot(), Viewport::new(20, 5));
    assert_eq!((fb.width(), fb.height()), (20, 5));
}

#[test]
fn test_full_frame_encodes_every_row() {
    let view = DuelView::default();
    let fb = view.render(&snapshot(), view.required_size());
    let mut out = Vec::new();
    encode_full_into(&fb, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("SCORE"));
    assert!(text.contains('┌'));
}
