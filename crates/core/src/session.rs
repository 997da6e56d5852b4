//! Session module - one player's board engine
//!
//! A session owns its grid, the active piece and the pre-generated next
//! piece, and enforces every movement and locking rule. It never touches the
//! opponent: anything that should affect the other player is queued as a
//! [`SessionEvent`] for the arena to route.
//!
//! Lifecycle: `NotStarted → Running → GameOver`. Only `Running` accepts
//! moves, rotations and spawns; `GameOver` is absorbing until [`GameSession::reset`].

use tracing::debug;

use crate::grid::Grid;
use crate::pieces::Piece;
use crate::rng::ShapeRandomizer;
use crate::scoring::{crossed_step, line_clear_points};
use crate::snapshot::{ActiveSnapshot, SessionSnapshot};
use crate::types::{
    slowed_interval, Row, SessionEvent, ShapeKind, BASE_DROP_MS, DANGER_ROWS,
    SLOWDOWN_SCORE_STEP,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    NotStarted,
    Running,
    GameOver,
}

/// Result of a translation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece moved.
    Moved,
    /// The move collided sideways (or upwards) and was rolled back.
    Blocked,
    /// A downward move collided: the piece locked and the next one spawned
    /// (or the session topped out).
    Locked,
    /// Nothing to move: not running or no active piece.
    Ignored,
}

impl MoveOutcome {
    /// Whether the piece moved or locked.
    pub fn changed(self) -> bool {
        matches!(self, MoveOutcome::Moved | MoveOutcome::Locked)
    }
}

/// Complete state of one player's game
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    active: Option<Piece>,
    next: Option<Piece>,
    randomizer: ShapeRandomizer,
    phase: SessionPhase,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    base_drop_interval_ms: u32,
    drop_interval_ms: u32,
    drop_counter_ms: u32,
    slowed: bool,
    events: Vec<SessionEvent>,
}

impl GameSession {
    /// Create a new session with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_drop_interval(seed, BASE_DROP_MS)
    }

    pub fn with_drop_interval(seed: u32, drop_interval_ms: u32) -> Self {
        Self {
            grid: Grid::new(),
            active: None,
            next: None,
            randomizer: ShapeRandomizer::new(seed),
            phase: SessionPhase::NotStarted,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            episode_id: 0,
            base_drop_interval_ms: drop_interval_ms,
            drop_interval_ms,
            drop_counter_ms: 0,
            slowed: false,
            events: Vec::new(),
        }
    }

    /// Start the session and spawn the first piece
    pub fn start(&mut self) {
        if self.phase != SessionPhase::NotStarted {
            return;
        }
        self.phase = SessionPhase::Running;
        self.spawn_piece();
    }

    /// Back to `NotStarted` with an empty grid and a zero score.
    ///
    /// The shape sequence continues from the current RNG state so that a new
    /// round does not replay the previous one.
    pub fn reset(&mut self) {
        let seed = self.randomizer.seed();
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::with_drop_interval(seed, self.base_drop_interval_ms);
        self.episode_id = next_episode;
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access, for scenario setup and replays.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn is_slowed(&self) -> bool {
        self.slowed
    }

    /// Switch between the base and the slowed drop interval.
    pub fn set_slowed(&mut self, slowed: bool) {
        self.slowed = slowed;
        self.drop_interval_ms = if slowed {
            slowed_interval(self.base_drop_interval_ms)
        } else {
            self.base_drop_interval_ms
        };
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether `piece` overlaps a wall, the floor or a filled cell.
    pub fn check_collision(&self, piece: &Piece) -> bool {
        self.grid.piece_collides(piece)
    }

    /// Whether the active piece currently collides (false without one).
    pub fn active_collides(&self) -> bool {
        self.active
            .map(|p| self.check_collision(&p))
            .unwrap_or(false)
    }

    /// Promote the next piece (or a fresh random one) to active and
    /// pre-generate a new next piece.
    ///
    /// If the new piece collides at its spawn position the session tops out
    /// and the piece is not placed. Returns whether a piece was placed.
    pub fn spawn_piece(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        let piece = match self.next.take() {
            Some(next) => next,
            None => Piece::spawn(self.randomizer.next_kind()),
        };
        self.next = Some(Piece::spawn(self.randomizer.next_kind()));

        if self.check_collision(&piece) {
            debug!(kind = piece.kind.letter(), "spawn blocked");
            self.active = None;
            self.top_out();
            return false;
        }

        self.active = Some(piece);
        self.drop_counter_ms = 0;
        true
    }

    /// Replace the active piece with `piece` if it fits where it stands.
    pub fn place_active(&mut self, piece: Piece) -> bool {
        if !self.is_running() || self.check_collision(&piece) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Try to move the active piece.
    ///
    /// A blocked downward move locks the piece, clears lines, scores and
    /// spawns the next piece.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> MoveOutcome {
        if !self.is_running() {
            return MoveOutcome::Ignored;
        }
        let Some(active) = self.active else {
            return MoveOutcome::Ignored;
        };

        let moved = active.shifted(dx, dy);
        if !self.check_collision(&moved) {
            self.active = Some(moved);
            return MoveOutcome::Moved;
        }

        if dy > 0 {
            self.lock_piece();
            if self.is_running() {
                self.spawn_piece();
            }
            return MoveOutcome::Locked;
        }

        MoveOutcome::Blocked
    }

    /// Rotate the active piece a quarter turn clockwise.
    ///
    /// No kicks: a rotation that collides is discarded and the piece keeps
    /// its matrix and rotation index.
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.rotated_cw();
        if self.check_collision(&rotated) {
            return false;
        }
        self.active = Some(rotated);
        true
    }

    /// Lock the active piece into the grid, then check for top-out, clear
    /// complete rows and score them.
    ///
    /// Does not spawn; [`GameSession::try_move`] does that after a landing.
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.grid.stamp(&active);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        self.check_game_over();

        let donated_row = self.donated_row();
        let lines = self.clear_lines();
        let points = self.update_score(lines);
        debug!(
            kind = active.kind.letter(),
            x = active.x,
            y = active.y,
            lines,
            points,
            "piece locked"
        );

        if lines > 0 {
            self.events.push(SessionEvent::LinesCleared {
                count: lines,
                score: self.score,
                donated_row,
            });
        }
    }

    /// Bottom-most full row, when exactly four rows are about to clear.
    fn donated_row(&self) -> Option<Row> {
        if self.grid.full_row_count() != 4 {
            return None;
        }
        self.grid
            .bottom_most_full_row()
            .map(|y| *self.grid.row(y))
    }

    /// Remove every complete row; returns how many went.
    pub fn clear_lines(&mut self) -> u32 {
        let cleared = self.grid.clear_full_rows().len() as u32;
        self.lines += cleared;
        cleared
    }

    /// Award points for `lines` cleared rows; returns the points added.
    pub fn update_score(&mut self, lines: u32) -> u32 {
        let points = line_clear_points(lines);
        if points == 0 {
            return 0;
        }
        let before = self.score;
        self.score = self.score.saturating_add(points);
        if crossed_step(before, self.score, SLOWDOWN_SCORE_STEP) {
            self.events.push(SessionEvent::ScoreCrossedStep { score: self.score });
        }
        points
    }

    /// Top out when anything sits in the danger rows.
    pub fn check_game_over(&mut self) -> bool {
        if self.grid.any_occupied_in_top(DANGER_ROWS) {
            self.top_out();
            return true;
        }
        false
    }

    fn top_out(&mut self) {
        if self.phase == SessionPhase::GameOver {
            return;
        }
        self.phase = SessionPhase::GameOver;
        self.active = None;
        debug!(score = self.score, "session topped out");
        self.events.push(SessionEvent::ToppedOut {
            final_score: self.score,
        });
    }

    /// Stop the session because the opponent finished. Returns whether the
    /// session was still live.
    pub fn halt(&mut self) -> bool {
        if self.phase == SessionPhase::GameOver {
            return false;
        }
        self.phase = SessionPhase::GameOver;
        true
    }

    /// Replace the active piece with a gift of `kind` at its spawn position.
    ///
    /// Skipped when the gift would not fit.
    pub fn receive_gift(&mut self, kind: ShapeKind) -> bool {
        if self.active.is_none() {
            return false;
        }
        self.place_active(Piece::spawn(kind))
    }

    /// Write a donated row over the lowest empty row that the active piece
    /// does not touch. Returns the row index used.
    pub fn receive_row(&mut self, row: Row) -> Option<usize> {
        if !self.is_running() {
            return None;
        }
        let active = self.active;
        let target = self.grid.bottom_most_empty_row_where(|y| {
            active
                .map(|p| !p.occupies_row(y as i8))
                .unwrap_or(true)
        })?;
        self.grid.replace_row(target, row);
        Some(target)
    }

    /// Gravity: one downward step whenever the accumulated time exceeds the
    /// drop interval. Returns whether a step was taken.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_running() {
            return false;
        }
        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms <= self.drop_interval_ms {
            return false;
        }
        self.drop_counter_ms = 0;
        self.try_move(0, 1);
        true
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.grid.write_u8_grid(&mut out.grid);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next.map(|p| p.kind);
        out.phase = self.phase;
        out.score = self.score;
        out.lines = self.lines;
        out.slowed = self.slowed;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
