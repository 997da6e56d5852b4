//! Board evaluation - the weighted feature sum the agent maximises
//!
//! All features are measured on a grid that already contains the candidate
//! piece; complete rows are counted, not removed.

use tetris_duel_core::Grid;
use tetris_duel_core::types::{GRID_HEIGHT, GRID_WIDTH};

const WIDTH: usize = GRID_WIDTH as usize;
const HEIGHT: usize = GRID_HEIGHT as usize;

/// Score given to a placement that cannot land inside the grid.
pub const INVALID_PLACEMENT_SCORE: f64 = -999_999.0;

/// Feature weights. Positive features are rewarded, the rest penalised.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub lines: f64,
    pub holes: f64,
    pub aggregate_height: f64,
    pub fill: f64,
    pub unevenness: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            lines: 500.0,
            holes: 50.0,
            aggregate_height: 15.0,
            fill: 30.0,
            unevenness: 20.0,
        }
    }
}

impl Weights {
    pub fn score(&self, f: &Features) -> f64 {
        self.lines * f.lines as f64 - self.holes * f.holes as f64
            - self.aggregate_height * f.aggregate_height
            + self.fill * f.fill
            - self.unevenness * f.unevenness as f64
    }
}

/// Raw feature values of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features {
    pub lines: u32,
    pub holes: u32,
    pub aggregate_height: f64,
    pub fill: f64,
    pub unevenness: u32,
}

impl Features {
    pub fn measure(grid: &Grid) -> Self {
        Self {
            lines: complete_lines(grid),
            holes: holes(grid),
            aggregate_height: aggregate_height(grid),
            fill: horizontal_fill(grid),
            unevenness: unevenness(grid),
        }
    }
}

pub fn complete_lines(grid: &Grid) -> u32 {
    grid.full_row_count() as u32
}

/// Per column, empty cells below the topmost filled cell, squared, summed.
pub fn holes(grid: &Grid) -> u32 {
    (0..WIDTH)
        .map(|x| {
            let covered = match grid.column_top(x) {
                Some(top) => (top + 1..HEIGHT)
                    .filter(|&y| grid.row(y)[x].is_none())
                    .count() as u32,
                None => 0,
            };
            covered * covered
        })
        .sum()
}

/// Sum of column heights over non-empty columns, divided by the width.
pub fn aggregate_height(grid: &Grid) -> f64 {
    let total: usize = (0..WIDTH)
        .filter_map(|x| grid.column_top(x))
        .map(|top| HEIGHT - top)
        .sum();
    total as f64 / WIDTH as f64
}

/// Cubic reward for nearly complete rows plus a bonus for rows resting on a
/// non-empty row.
pub fn horizontal_fill(grid: &Grid) -> f64 {
    let mut score = 0.0;
    for y in (0..HEIGHT).rev() {
        let count = grid.row_fill(y);
        if count == 0 {
            continue;
        }
        score += (count as f64 / WIDTH as f64).powi(3) * 100.0;
        if y < HEIGHT - 1 && !grid.is_row_empty(y + 1) {
            score += count as f64 * 2.0;
        }
    }
    score
}

/// Sum of absolute top-row differences between neighbouring columns; an
/// empty column counts as `GRID_HEIGHT`.
pub fn unevenness(grid: &Grid) -> u32 {
    let tops: [usize; WIDTH] =
        std::array::from_fn(|x| grid.column_top(x).unwrap_or(HEIGHT));
    tops.windows(2)
        .map(|w| w[0].abs_diff(w[1]) as u32)
        .sum()
}
