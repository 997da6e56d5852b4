//! Shared types and constants for the duel.
//!
//! Everything in here is plain data with no dependencies, so it can be used by
//! the engine, the agent, the arena and the terminal front end alike.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom; row 0 is the spawn edge)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the front end (~60 FPS) |
//! | `BASE_DROP_MS` | 500 | Gravity interval of the human session |
//! | `BASE_AI_DELAY_MS` | 500 | Interval between agent decision cycles |
//! | `SLOWDOWN_DURATION_MS` | 10000 | Lifetime of a slowdown before it reverts |
//! | `NOTICE_MS` | 1000 | Lifetime of a transient notice |
//!
//! # Examples
//!
//! ```
//! use tetris_duel_types::{ShapeKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(ShapeKind::from_u8(ShapeKind::T.to_u8()), Some(ShapeKind::T));
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Number of rows at the top of the grid that end the game when occupied after a lock.
pub const DANGER_ROWS: u8 = 2;

/// Fixed frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval of a session at normal speed.
pub const BASE_DROP_MS: u32 = 500;

/// Interval between two decision cycles of the agent at normal speed.
pub const BASE_AI_DELAY_MS: u32 = 500;

/// Slowdown multiplier numerator (6/5 = 1.2x slower).
pub const SLOWDOWN_NUMERATOR: u32 = 6;

/// Slowdown multiplier denominator.
pub const SLOWDOWN_DENOMINATOR: u32 = 5;

/// How long a slowdown lasts before the scheduled reversion fires.
pub const SLOWDOWN_DURATION_MS: u32 = 10_000;

/// Crossing a multiple of this score triggers a slowdown for both players.
pub const SLOWDOWN_SCORE_STEP: u32 = 1000;

/// Lifetime of an arena notice ("Gift!", "Line received!").
pub const NOTICE_MS: u32 = 1000;

/// Base points per cleared line.
pub const LINE_BASE_POINTS: u32 = 50;

/// Bonus by number of lines cleared at once, indexed by line count.
///
/// - 0 or 1 line: no bonus
/// - 2 lines: 100
/// - 3 lines: 200
/// - 4 lines: 300
pub const LINE_BONUS_POINTS: [u32; 5] = [0, 0, 100, 200, 300];

/// Apply the slowdown multiplier to an interval.
pub const fn slowed_interval(base_ms: u32) -> u32 {
    base_ms * SLOWDOWN_NUMERATOR / SLOWDOWN_DENOMINATOR
}

/// The seven shape kinds
///
/// Each kind has a fixed color, used as the opaque identity token stored in
/// grid cells once a piece locks:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple
/// - **L**: Orange
/// - **J**: Blue
/// - **S**: Green
/// - **Z**: Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl ShapeKind {
    /// All kinds in table order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Kinds handed out as a gift to the opponent.
    pub const GIFTS: [ShapeKind; 2] = [ShapeKind::O, ShapeKind::I];

    /// Uppercase letter used in panels and logs.
    pub fn letter(self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
            ShapeKind::L => "L",
            ShapeKind::J => "J",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
        }
    }

    /// Position in [`ShapeKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            ShapeKind::I => 0,
            ShapeKind::O => 1,
            ShapeKind::T => 2,
            ShapeKind::L => 3,
            ShapeKind::J => 4,
            ShapeKind::S => 5,
            ShapeKind::Z => 6,
        }
    }

    /// Compact non-zero encoding used by snapshots (0 means empty).
    pub fn to_u8(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1..=7 => Some(Self::ALL[(v - 1) as usize]),
            _ => None,
        }
    }

    /// Display color as `(r, g, b)`.
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            ShapeKind::I => (0x00, 0xf0, 0xf0),
            ShapeKind::O => (0xf0, 0xf0, 0x00),
            ShapeKind::T => (0xa0, 0x00, 0xf0),
            ShapeKind::L => (0xf0, 0xa0, 0x00),
            ShapeKind::J => (0x00, 0x00, 0xf0),
            ShapeKind::S => (0x00, 0xf0, 0x00),
            ShapeKind::Z => (0xf0, 0x00, 0x00),
        }
    }
}

/// Commands a player can issue against a session.
///
/// The four movement commands are the whole input surface of a session;
/// `Restart` and `Quit` are handled by the arena and the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down (locks when blocked)
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Reset both sessions
    Restart,
    /// Leave the game
    Quit,
}

/// Which player a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Human,
    Ai,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Human => Side::Ai,
            Side::Ai => Side::Human,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Human => "human",
            Side::Ai => "ai",
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(ShapeKind)`: Filled by a piece of that kind
pub type Cell = Option<ShapeKind>;

/// One full grid row.
pub type Row = [Cell; GRID_WIDTH as usize];

/// Session-side event, emitted by the engine and consumed by the arena.
///
/// Sessions never reach into each other; every cross-session effect travels
/// through one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A lock cleared `count` lines. `donated_row` is the bottom-most cleared
    /// row, captured before removal, when exactly four lines went at once.
    LinesCleared {
        count: u32,
        score: u32,
        donated_row: Option<Row>,
    },
    /// The score passed a multiple of [`SLOWDOWN_SCORE_STEP`].
    ScoreCrossedStep { score: u32 },
    /// The session entered `GameOver`.
    ToppedOut { final_score: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duel_timing_defaults() {
        assert_eq!(BASE_DROP_MS, 500);
        assert_eq!(BASE_AI_DELAY_MS, 500);
        assert_eq!(SLOWDOWN_DURATION_MS, 10_000);
        assert_eq!(slowed_interval(500), 600);
        assert_eq!(slowed_interval(1000), 1200);
    }

    #[test]
    fn shape_kind_round_trips_through_index() {
        for (i, kind) in ShapeKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(ShapeKind::from_u8(kind.to_u8()), Some(*kind));
        }
        assert_eq!(ShapeKind::from_u8(0), None);
    }
}
