//! Short-lived status messages for the front end
//!
//! Nothing in the match depends on these; they only tell the player what
//! just happened to whom.

use arrayvec::ArrayVec;

use crate::types::{ShapeKind, Side};

/// At most this many notices are kept; the oldest goes first.
pub const MAX_NOTICES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// `side` cleared four lines and sent one to the opponent.
    LineGiven,
    /// `side` received a row from the opponent.
    LineReceived,
    /// `side` had its active piece replaced by a gift.
    Gift(ShapeKind),
    /// `side` crossed a score step and slowed both boards.
    Slowdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub side: Side,
    pub expires_at_ms: u64,
}

impl Notice {
    pub fn text(&self) -> String {
        match self.kind {
            NoticeKind::LineGiven => "Line sent!".to_string(),
            NoticeKind::LineReceived => "Line received!".to_string(),
            NoticeKind::Gift(kind) => format!("Gift: {} piece", kind.letter()),
            NoticeKind::Slowdown => "Slowdown!".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    items: ArrayVec<Notice, MAX_NOTICES>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NoticeKind, side: Side, now_ms: u64, lifetime_ms: u32) {
        if self.items.is_full() {
            self.items.remove(0);
        }
        self.items.push(Notice {
            kind,
            side,
            expires_at_ms: now_ms + lifetime_ms as u64,
        });
    }

    /// Drop every notice whose lifetime has ended.
    pub fn prune(&mut self, now_ms: u64) {
        self.items.retain(|n| n.expires_at_ms > now_ms);
    }

    pub fn items(&self) -> &[Notice] {
        &self.items
    }

    pub fn latest_for(&self, side: Side) -> Option<&Notice> {
        self.items.iter().rev().find(|n| n.side == side)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
