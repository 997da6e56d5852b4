//! Placement search - exhaustive over rotations and columns
//!
//! Every candidate uses the spawn matrix of the piece turned `rotation`
//! times, dropped straight down from the piece's current row. The first
//! strictly best candidate wins, so ties go to the lower rotation and then
//! the lower column.

use tetris_duel_core::{base_shape, Grid, Piece, ShapeMatrix};
use tetris_duel_core::types::{ShapeKind, GRID_WIDTH};

use crate::evaluation::{Features, Weights, INVALID_PLACEMENT_SCORE};

/// Target chosen by the agent: column of the matrix anchor and rotation
/// index (quarter turns from spawn).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub x: i8,
    pub rotation: u8,
}

/// Candidate with its score, for inspection and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPlacement {
    pub placement: Placement,
    pub landing_row: i8,
    pub score: f64,
}

/// Hard-drop row: advance from `start_y` while the matrix fits, then back off
/// one. Below zero means the matrix cannot rest inside the grid.
pub fn landing_row(grid: &Grid, shape: &ShapeMatrix, x: i8, start_y: i8) -> i8 {
    let mut y = start_y;
    while !grid.collides(shape, x, y) {
        y += 1;
    }
    y - 1
}

/// Columns a matrix of this width can occupy; empty when it is wider than
/// the grid.
pub fn candidate_columns(shape: &ShapeMatrix) -> std::ops::Range<i8> {
    let last = GRID_WIDTH as i8 - shape.cols() as i8;
    0..(last + 1).max(0)
}

/// Score a single candidate. Returns the landing row alongside; an invalid
/// landing scores [`INVALID_PLACEMENT_SCORE`].
pub fn evaluate_placement(
    grid: &Grid,
    kind: ShapeKind,
    placement: Placement,
    start_y: i8,
    weights: &Weights,
) -> ScoredPlacement {
    let shape = base_shape(kind).rotated(placement.rotation);
    let landing = landing_row(grid, &shape, placement.x, start_y);
    if landing < 0 {
        return ScoredPlacement {
            placement,
            landing_row: landing,
            score: INVALID_PLACEMENT_SCORE,
        };
    }

    let mut scratch = grid.clone();
    scratch.stamp(&Piece {
        kind,
        shape,
        x: placement.x,
        y: landing,
        rotation: placement.rotation,
    });

    ScoredPlacement {
        placement,
        landing_row: landing,
        score: weights.score(&Features::measure(&scratch)),
    }
}

/// Every valid candidate, in search order.
pub fn scored_placements(grid: &Grid, piece: &Piece, weights: &Weights) -> Vec<ScoredPlacement> {
    let base = base_shape(piece.kind);
    let mut out = Vec::new();
    for rotation in 0..4u8 {
        let shape = base.rotated(rotation);
        for x in candidate_columns(&shape) {
            let placement = Placement { x, rotation };
            let scored = evaluate_placement(grid, piece.kind, placement, piece.y, weights);
            if scored.landing_row >= 0 {
                out.push(scored);
            }
        }
    }
    out
}

/// Best placement for `piece` on `grid`, or `None` when nothing can land.
pub fn find_best_move(grid: &Grid, piece: &Piece, weights: &Weights) -> Option<Placement> {
    let mut best: Option<ScoredPlacement> = None;
    for candidate in scored_placements(grid, piece, weights) {
        if best.map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best.map(|b| b.placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_duel_core::types::GRID_HEIGHT;

    #[test]
    fn test_landing_row_on_empty_grid() {
        let grid = Grid::new();
        let o = base_shape(ShapeKind::O);
        assert_eq!(landing_row(&grid, &o, 4, 0), GRID_HEIGHT as i8 - 2);
    }

    #[test]
    fn test_landing_row_negative_when_blocked_at_start() {
        let mut grid = Grid::new();
        grid.set(4, 0, Some(ShapeKind::Z));
        let o = base_shape(ShapeKind::O);
        assert!(landing_row(&grid, &o, 4, 0) < 0);
    }

    #[test]
    fn test_candidate_columns_cover_full_width() {
        assert_eq!(candidate_columns(&base_shape(ShapeKind::I)), 0..7);
        assert_eq!(candidate_columns(&base_shape(ShapeKind::I).rotated_cw()), 0..10);
        assert_eq!(candidate_columns(&base_shape(ShapeKind::O)), 0..9);
    }

    #[test]
    fn test_invalid_candidates_are_discarded() {
        let mut grid = Grid::new();
        for x in 0..GRID_WIDTH as i8 {
            grid.set(x, 0, Some(ShapeKind::Z));
        }
        let piece = Piece::spawn(ShapeKind::T);
        let weights = Weights::default();
        assert!(scored_placements(&grid, &piece, &weights).is_empty());
        assert_eq!(find_best_move(&grid, &piece, &weights), None);
    }

    #[test]
    fn test_prefers_completing_a_line() {
        let grid = Grid::from_pattern(&["#########."]);
        let best = find_best_move(&grid, &Piece::spawn(ShapeKind::I), &Weights::default()).unwrap();
        assert_eq!(best, Placement { x: 9, rotation: 1 });
    }
}
