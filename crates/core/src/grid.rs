//! Grid module - the 10x20 playfield
//!
//! Each cell is empty or holds the kind of the piece that filled it.
//! Rows are stored top to bottom so whole rows can be moved, swapped and
//! donated without re-indexing.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::pieces::{Piece, ShapeMatrix};
use crate::types::{Cell, Row, ShapeKind, GRID_HEIGHT, GRID_WIDTH};

const WIDTH: usize = GRID_WIDTH as usize;
const HEIGHT: usize = GRID_HEIGHT as usize;

/// An empty row.
pub const EMPTY_ROW: Row = [None; WIDTH];

/// The playfield - 20 rows of 10 cells
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: [Row; HEIGHT],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            rows: [EMPTY_ROW; HEIGHT],
        }
    }

    /// Build a grid whose bottom rows follow `pattern`.
    ///
    /// Each string is one row, `#` for a filled cell and anything else for an
    /// empty one; the last string is the floor. Missing columns are empty.
    ///
    /// ```
    /// use tetris_duel_core::Grid;
    ///
    /// let grid = Grid::from_pattern(&["#.........", "##########"]);
    /// assert!(grid.is_row_full(19));
    /// assert!(grid.is_occupied(0, 18));
    /// assert!(!grid.is_occupied(1, 18));
    /// ```
    pub fn from_pattern(pattern: &[&str]) -> Self {
        let mut grid = Self::new();
        let skip = pattern.len().saturating_sub(HEIGHT);
        let first_row = HEIGHT - (pattern.len() - skip);
        for (i, line) in pattern.iter().skip(skip).enumerate() {
            for (x, ch) in line.chars().take(WIDTH).enumerate() {
                if ch == '#' {
                    grid.rows[first_row + i][x] = Some(ShapeKind::I);
                }
            }
        }
        grid
    }

    #[inline(always)]
    fn in_bounds(x: i8, y: i8) -> bool {
        x >= 0 && (x as usize) < WIDTH && y >= 0 && (y as usize) < HEIGHT
    }

    /// Get width of the grid
    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    /// Get height of the grid
    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        if Self::in_bounds(x, y) {
            Some(self.rows[y as usize][x as usize])
        } else {
            None
        }
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        if !Self::in_bounds(x, y) {
            return false;
        }
        self.rows[y as usize][x as usize] = cell;
        true
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn row(&self, y: usize) -> &Row {
        &self.rows[y]
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Overwrite a whole row. Returns false if `y` is out of range.
    pub fn replace_row(&mut self, y: usize, row: Row) -> bool {
        match self.rows.get_mut(y) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT && self.rows[y].iter().all(|cell| cell.is_some())
    }

    /// Check if a row has no filled cell
    pub fn is_row_empty(&self, y: usize) -> bool {
        y < HEIGHT && self.rows[y].iter().all(|cell| cell.is_none())
    }

    /// Number of filled cells in a row.
    pub fn row_fill(&self, y: usize) -> usize {
        self.rows[y].iter().filter(|cell| cell.is_some()).count()
    }

    pub fn full_row_count(&self) -> usize {
        (0..HEIGHT).filter(|&y| self.is_row_full(y)).count()
    }

    /// Lowest (largest index) full row, if any.
    pub fn bottom_most_full_row(&self) -> Option<usize> {
        (0..HEIGHT).rev().find(|&y| self.is_row_full(y))
    }

    /// Lowest empty row that satisfies `accept`.
    pub fn bottom_most_empty_row_where(&self, accept: impl Fn(usize) -> bool) -> Option<usize> {
        (0..HEIGHT)
            .rev()
            .find(|&y| self.is_row_empty(y) && accept(y))
    }

    /// Row index of the topmost filled cell in column `x`.
    pub fn column_top(&self, x: usize) -> Option<usize> {
        (0..HEIGHT).find(|&y| self.rows[y][x].is_some())
    }

    /// Whether any of the first `count` rows holds a filled cell.
    pub fn any_occupied_in_top(&self, count: u8) -> bool {
        self.rows
            .iter()
            .take(count as usize)
            .any(|row| row.iter().any(|cell| cell.is_some()))
    }

    /// Collision test for a matrix anchored at `(x, y)`.
    ///
    /// An occupied cell collides when it is left of column 0, at or past the
    /// right wall, at or below the floor, or (for rows inside the grid) on a
    /// filled cell. Cells above row 0 are only bounded horizontally.
    pub fn collides(&self, shape: &ShapeMatrix, x: i8, y: i8) -> bool {
        shape.offsets().any(|(dx, dy)| {
            let cx = x + dx;
            let cy = y + dy;
            cx < 0
                || cx >= GRID_WIDTH as i8
                || cy >= GRID_HEIGHT as i8
                || (cy >= 0 && self.rows[cy as usize][cx as usize].is_some())
        })
    }

    /// Collision test for a positioned piece
    pub fn piece_collides(&self, piece: &Piece) -> bool {
        self.collides(&piece.shape, piece.x, piece.y)
    }

    /// Write a piece's cells into the grid.
    ///
    /// Cells above the grid are skipped. Returns the number of cells written.
    pub fn stamp(&mut self, piece: &Piece) -> usize {
        let mut written = 0;
        for (x, y) in piece.cells() {
            if y >= 0 && self.set(x, y, Some(piece.kind)) {
                written += 1;
            }
        }
        written
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    ///
    /// Remaining rows keep their relative order and drop down; the same
    /// number of empty rows appear at the top. Two-pointer pass, no allocation.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, HEIGHT> {
        let mut cleared_rows = ArrayVec::new();
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    self.rows[write_y] = self.rows[read_y];
                }
            }
        }

        for row in &mut self.rows[..write_y] {
            *row = EMPTY_ROW;
        }

        cleared_rows
    }

    /// Export as a compact u8 grid (0 = empty, see [`ShapeKind::to_u8`]).
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows.iter()) {
            for (d, s) in dst.iter_mut().zip(src.iter()) {
                *d = s.map(ShapeKind::to_u8).unwrap_or(0);
            }
        }
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.rows = [EMPTY_ROW; HEIGHT];
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::base_shape;

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new();
        assert_eq!(grid.get(0, 0), Some(None));
        assert_eq!(grid.get(9, 19), Some(None));
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(10, 0), None);
        assert_eq!(grid.get(0, 20), None);
    }

    #[test]
    fn test_from_pattern_places_rows_at_bottom() {
        let grid = Grid::from_pattern(&["#.#", "##########"]);
        assert!(grid.is_occupied(0, 18));
        assert!(!grid.is_occupied(1, 18));
        assert!(grid.is_occupied(2, 18));
        assert!(grid.is_row_full(19));
        assert!(grid.is_row_empty(17));
    }

    #[test]
    fn test_collides_above_grid_is_only_bounded_horizontally() {
        let mut grid = Grid::new();
        for x in 0..10 {
            grid.set(x, 0, Some(ShapeKind::Z));
        }
        let i = base_shape(ShapeKind::I).rotated_cw();
        // Column 0 rows -4..-1: entirely above the grid, nothing to hit.
        assert!(!grid.collides(&i, 0, -4));
        // One row lower reaches the filled row 0.
        assert!(grid.collides(&i, 0, -3));
        // Off the left wall even while above the grid.
        assert!(grid.collides(&i, -1, -4));
    }

    #[test]
    fn test_clear_full_rows_keeps_order() {
        let mut grid = Grid::from_pattern(&[
            "#.........",
            "##########",
            ".#........",
            "##########",
        ]);
        let cleared = grid.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 17]);
        assert!(grid.is_occupied(1, 19));
        assert!(grid.is_occupied(0, 18));
        assert!(grid.is_row_empty(17));
    }

    #[test]
    fn test_stamp_skips_rows_above_grid() {
        let mut grid = Grid::new();
        let mut piece = Piece::spawn(ShapeKind::L);
        piece.y = -1;
        assert_eq!(grid.stamp(&piece), 3);
        assert!(grid.is_occupied(4, 0));
        assert!(grid.is_occupied(4, 1));
        assert!(grid.is_occupied(5, 1));
    }

    #[test]
    fn test_bottom_most_rows() {
        let grid = Grid::from_pattern(&["##########", "#.........", "##########"]);
        assert_eq!(grid.bottom_most_full_row(), Some(19));
        assert_eq!(grid.bottom_most_empty_row_where(|_| true), Some(16));
        assert_eq!(grid.bottom_most_empty_row_where(|y| y < 10), Some(9));
        assert_eq!(grid.column_top(0), Some(17));
        assert_eq!(grid.column_top(1), Some(17));
    }
}
