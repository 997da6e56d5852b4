//! Pieces module - shape matrices and matrix rotation
//!
//! A piece is a small rectangular occupancy matrix anchored at its top-left
//! cell. Rotation re-derives the matrix (transpose, then reverse each row),
//! which is a clockwise quarter turn. There is no kick table: a rotation that
//! would collide simply does not happen.

use crate::types::{ShapeKind, GRID_WIDTH};

/// Offset of a single occupied cell relative to the matrix's top-left corner
pub type MinoOffset = (i8, i8);

/// Largest matrix side any shape reaches (the I piece is 1x4 / 4x1).
pub const MAX_SHAPE_SIDE: usize = 4;

/// Rectangular occupancy matrix, stored inline so pieces stay `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl ShapeMatrix {
    /// Build a matrix from 0/1 rows. All rows must have the same length.
    pub fn from_rows<const R: usize, const C: usize>(rows: [[u8; C]; R]) -> Self {
        assert!(R > 0 && C > 0 && R <= MAX_SHAPE_SIDE && C <= MAX_SHAPE_SIDE);
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                cells[r][c] = v != 0;
            }
        }
        Self {
            rows: R as u8,
            cols: C as u8,
            cells,
        }
    }

    /// Number of matrix rows (piece height).
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of matrix columns (piece width).
    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    /// Rotate a quarter turn clockwise: transpose, then reverse each new row.
    ///
    /// Row `i` of the result is column `i` of `self` read bottom to top.
    pub fn rotated_cw(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (i, out_row) in cells.iter_mut().enumerate().take(cols) {
            for (j, out) in out_row.iter_mut().enumerate().take(rows) {
                *out = self.cells[rows - 1 - j][i];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Apply [`ShapeMatrix::rotated_cw`] `turns` times.
    pub fn rotated(&self, turns: u8) -> Self {
        let mut m = *self;
        for _ in 0..turns % 4 {
            m = m.rotated_cw();
        }
        m
    }

    /// Offsets of every occupied cell, row-major.
    pub fn offsets(&self) -> impl Iterator<Item = MinoOffset> {
        let m = *self;
        (0..m.rows as usize).flat_map(move |r| {
            (0..m.cols as usize)
                .filter(move |&c| m.cells[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.offsets().count()
    }
}

/// Spawn-orientation matrix for a shape kind
pub fn base_shape(kind: ShapeKind) -> ShapeMatrix {
    match kind {
        ShapeKind::I => ShapeMatrix::from_rows([[1, 1, 1, 1]]),
        ShapeKind::O => ShapeMatrix::from_rows([[1, 1], [1, 1]]),
        ShapeKind::T => ShapeMatrix::from_rows([[0, 1, 0], [1, 1, 1]]),
        ShapeKind::L => ShapeMatrix::from_rows([[1, 0], [1, 0], [1, 1]]),
        ShapeKind::J => ShapeMatrix::from_rows([[0, 1], [0, 1], [1, 1]]),
        ShapeKind::S => ShapeMatrix::from_rows([[0, 1, 1], [1, 1, 0]]),
        ShapeKind::Z => ShapeMatrix::from_rows([[1, 1, 0], [0, 1, 1]]),
    }
}

/// Horizontally centered spawn column for a matrix.
pub fn spawn_x(shape: &ShapeMatrix) -> i8 {
    (GRID_WIDTH / 2) as i8 - (shape.cols() / 2) as i8
}

/// Active or candidate piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub shape: ShapeMatrix,
    pub x: i8,
    pub y: i8,
    /// Quarter turns applied since spawn, mod 4.
    pub rotation: u8,
}

impl Piece {
    /// Create a piece in spawn orientation, centered on row 0.
    pub fn spawn(kind: ShapeKind) -> Self {
        let shape = base_shape(kind);
        Self {
            kind,
            shape,
            x: spawn_x(&shape),
            y: 0,
            rotation: 0,
        }
    }

    /// Same piece translated by `(dx, dy)`.
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece rotated one quarter turn clockwise in place (anchor unchanged).
    pub fn rotated_cw(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            rotation: (self.rotation + 1) % 4,
            ..*self
        }
    }

    /// Absolute grid coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.shape.offsets().map(move |(dx, dy)| (x + dx, y + dy))
    }

    /// Whether any occupied cell lies on grid row `row`.
    pub fn occupies_row(&self, row: i8) -> bool {
        self.cells().any(|(_, y)| y == row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in ShapeKind::ALL {
            assert_eq!(base_shape(kind).cell_count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        // .#.      #.
        // ###  ->  ##
        //          #.
        let r = base_shape(ShapeKind::T).rotated_cw();
        assert_eq!(r.rows(), 3);
        assert_eq!(r.cols(), 2);
        assert_eq!(r, ShapeMatrix::from_rows([[1, 0], [1, 1], [1, 0]]));
    }

    #[test]
    fn test_rotate_i_swaps_dimensions() {
        let r = base_shape(ShapeKind::I).rotated_cw();
        assert_eq!((r.rows(), r.cols()), (4, 1));
        assert_eq!(r.offsets().collect::<Vec<_>>(), vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn test_four_rotations_restore_every_shape() {
        for kind in ShapeKind::ALL {
            let base = base_shape(kind);
            assert_eq!(base.rotated(4), base, "{:?}", kind);
            assert_eq!(base.rotated_cw().rotated_cw().rotated_cw().rotated_cw(), base);
        }
    }

    #[test]
    fn test_spawn_is_centered() {
        assert_eq!(Piece::spawn(ShapeKind::I).x, 3);
        assert_eq!(Piece::spawn(ShapeKind::O).x, 4);
        assert_eq!(Piece::spawn(ShapeKind::T).x, 4);
        assert_eq!(Piece::spawn(ShapeKind::L).x, 4);
        assert_eq!(Piece::spawn(ShapeKind::I).y, 0);
    }

    #[test]
    fn test_piece_rotation_index_wraps() {
        let mut p = Piece::spawn(ShapeKind::S);
        for expected in [1, 2, 3, 0] {
            p = p.rotated_cw();
            assert_eq!(p.rotation, expected);
        }
    }

    #[test]
    fn test_piece_cells_are_absolute() {
        let p = Piece::spawn(ShapeKind::O).shifted(0, 5);
        let cells: Vec<_> = p.cells().collect();
        assert_eq!(cells, vec![(4, 5), (5, 5), (4, 6), (5, 6)]);
        assert!(p.occupies_row(6));
        assert!(!p.occupies_row(7));
    }
}
