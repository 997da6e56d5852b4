//! Copyable per-frame views of a session for the front end.

use crate::pieces::{base_shape, Piece};
use crate::session::SessionPhase;
use crate::types::{ShapeKind, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Absolute cells of the piece. The matrix is always the spawn matrix
    /// turned `rotation` times, so it can be rebuilt from the kind.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        base_shape(self.kind)
            .rotated(self.rotation)
            .offsets()
            .map(move |(dx, dy)| (x + dx, y + dy))
    }
}

/// Render/observation view of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    /// 0 = empty, otherwise [`ShapeKind::to_u8`].
    pub grid: [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: Option<ShapeKind>,
    pub phase: SessionPhase,
    pub score: u32,
    pub lines: u32,
    pub slowed: bool,
    pub episode_id: u32,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    pub fn playable(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Grid cell with the active piece overlaid (`None` out of bounds).
    pub fn cell_with_active(&self, x: i8, y: i8) -> Option<u8> {
        if x < 0 || y < 0 || x >= GRID_WIDTH as i8 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        if let Some(active) = self.active {
            if active.cells().any(|c| c == (x, y)) {
                return Some(active.kind.to_u8());
            }
        }
        Some(self.grid[y as usize][x as usize])
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            grid: [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: None,
            next: None,
            phase: SessionPhase::NotStarted,
            score: 0,
            lines: 0,
            slowed: false,
            episode_id: 0,
        }
    }
}
