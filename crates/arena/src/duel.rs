//! Duel - the match arbiter
//!
//! Owns both sessions, the agent controller and the scheduler. Sessions
//! never see each other; after every step the arena drains the stepping
//! session's events and applies their effects to the opponent before the
//! other side runs.
//!
//! Per tick:
//! 1. advance the scheduler and run due tasks (slowdown reversion)
//! 2. human gravity, then route human events
//! 3. agent decision cycle, then route agent events

use arrayvec::ArrayVec;
use tracing::{debug, info};

use tetris_duel_agent::AgentController;
use tetris_duel_core::{GameSession, SessionSnapshot, ShapeRandomizer};

use crate::config::DuelConfig;
use crate::notice::{Notice, NoticeBoard, NoticeKind, MAX_NOTICES};
use crate::scheduler::{Scheduler, TaskId};
use crate::sink::{GameOverSink, RenderSink, ScoreSink};
use crate::types::{GameAction, Row, SessionEvent, Side, NOTICE_MS};

const AI_SEED_SALT: u32 = 0x9E37_79B9;
const GIFT_SEED_SALT: u32 = 0x2545_F491;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaTask {
    RevertSlowdown,
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSummary {
    pub human_score: u32,
    pub ai_score: u32,
    /// The side whose board filled up.
    pub topped_out: Side,
    /// Higher score wins; `None` on a tie.
    pub winner: Option<Side>,
}

impl MatchSummary {
    pub fn new(human_score: u32, ai_score: u32, topped_out: Side) -> Self {
        let winner = match human_score.cmp(&ai_score) {
            std::cmp::Ordering::Greater => Some(Side::Human),
            std::cmp::Ordering::Less => Some(Side::Ai),
            std::cmp::Ordering::Equal => None,
        };
        Self {
            human_score,
            ai_score,
            topped_out,
            winner,
        }
    }
}

/// Everything the front end needs for one frame.
#[derive(Debug, Clone, Default)]
pub struct DuelSnapshot {
    pub human: SessionSnapshot,
    pub ai: SessionSnapshot,
    pub notices: ArrayVec<Notice, MAX_NOTICES>,
    pub slowdown_remaining_ms: Option<u64>,
    pub summary: Option<MatchSummary>,
    pub now_ms: u64,
}

impl DuelSnapshot {
    pub fn side(&self, side: Side) -> &SessionSnapshot {
        match side {
            Side::Human => &self.human,
            Side::Ai => &self.ai,
        }
    }
}

pub struct Duel {
    config: DuelConfig,
    human: GameSession,
    ai: GameSession,
    agent: AgentController,
    scheduler: Scheduler<ArenaTask>,
    slowdown: Option<TaskId>,
    gifts: ShapeRandomizer,
    notices: NoticeBoard,
    summary: Option<MatchSummary>,
    score_sink: Option<Box<dyn ScoreSink>>,
    game_over_sink: Option<Box<dyn GameOverSink>>,
}

impl Duel {
    pub fn new(config: DuelConfig) -> Self {
        let seed = config.seed;
        Self {
            human: GameSession::with_drop_interval(seed, config.drop_interval_ms),
            ai: GameSession::with_drop_interval(seed ^ AI_SEED_SALT, config.drop_interval_ms),
            agent: AgentController::new(config.ai_delay_ms),
            scheduler: Scheduler::new(),
            slowdown: None,
            gifts: ShapeRandomizer::new(seed.wrapping_add(GIFT_SEED_SALT)),
            notices: NoticeBoard::new(),
            summary: None,
            score_sink: None,
            game_over_sink: None,
            config,
        }
    }

    pub fn set_score_sink(&mut self, sink: impl ScoreSink + 'static) {
        self.score_sink = Some(Box::new(sink));
    }

    pub fn set_game_over_sink(&mut self, sink: impl GameOverSink + 'static) {
        self.game_over_sink = Some(Box::new(sink));
    }

    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    pub fn session(&self, side: Side) -> &GameSession {
        match side {
            Side::Human => &self.human,
            Side::Ai => &self.ai,
        }
    }

    /// Direct session access, for scenario setup.
    pub fn session_mut(&mut self, side: Side) -> &mut GameSession {
        match side {
            Side::Human => &mut self.human,
            Side::Ai => &mut self.ai,
        }
    }

    pub fn agent(&self) -> &AgentController {
        &self.agent
    }

    pub fn notices(&self) -> &[Notice] {
        self.notices.items()
    }

    pub fn summary(&self) -> Option<MatchSummary> {
        self.summary
    }

    pub fn is_over(&self) -> bool {
        self.summary.is_some()
    }

    pub fn is_slowed(&self) -> bool {
        self.slowdown.is_some()
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Start both sessions.
    pub fn start(&mut self) {
        self.human.start();
        self.ai.start();
        info!(seed = self.config.seed, "match started");
    }

    /// Both sessions back to a fresh start with speeds restored and every
    /// pending task dropped.
    pub fn reset(&mut self) {
        self.scheduler.clear();
        self.slowdown = None;
        self.notices.clear();
        self.summary = None;
        self.human.reset();
        self.ai.reset();
        self.agent.reset();
        info!("match reset");
        self.start();
    }

    /// Advance the match by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) {
        for task in self.scheduler.advance(elapsed_ms as u64) {
            self.run_task(task);
        }
        self.notices.prune(self.scheduler.now_ms());

        if self.is_over() {
            return;
        }

        self.human.tick(elapsed_ms);
        self.route_events(Side::Human);

        if let Some(outcome) = self.agent.tick(&mut self.ai, elapsed_ms) {
            debug!(?outcome, "agent cycle");
        }
        self.route_events(Side::Ai);
    }

    /// Apply a human command. Returns whether it changed anything.
    pub fn apply_input(&mut self, action: GameAction) -> bool {
        let changed = match action {
            GameAction::MoveLeft => self.human.try_move(-1, 0).changed(),
            GameAction::MoveRight => self.human.try_move(1, 0).changed(),
            GameAction::SoftDrop => self.human.try_move(0, 1).changed(),
            GameAction::Rotate => self.human.rotate(),
            GameAction::Restart => {
                self.reset();
                true
            }
            GameAction::Quit => false,
        };
        self.route_events(Side::Human);
        changed
    }

    pub fn snapshot_into(&self, out: &mut DuelSnapshot) {
        self.human.snapshot_into(&mut out.human);
        self.ai.snapshot_into(&mut out.ai);
        out.notices.clear();
        out.notices.extend(self.notices.items().iter().copied());
        out.slowdown_remaining_ms = self.slowdown.and_then(|id| self.scheduler.remaining_ms(id));
        out.summary = self.summary;
        out.now_ms = self.scheduler.now_ms();
    }

    pub fn snapshot(&self) -> DuelSnapshot {
        let mut s = DuelSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    pub fn render(&self, sink: &mut dyn RenderSink) -> anyhow::Result<()> {
        sink.render(&self.snapshot())
    }

    fn run_task(&mut self, task: ArenaTask) {
        match task {
            ArenaTask::RevertSlowdown => {
                self.slowdown = None;
                self.set_speeds(false);
                info!("slowdown ended");
            }
        }
    }

    fn set_speeds(&mut self, slowed: bool) {
        self.human.set_slowed(slowed);
        self.ai.set_slowed(slowed);
        self.agent.set_slowed(slowed);
    }

    fn route_events(&mut self, side: Side) {
        let events = self.session_mut(side).drain_events();
        for event in events {
            match event {
                SessionEvent::LinesCleared {
                    count,
                    score,
                    donated_row,
                } => {
                    self.notify_score(side, score);
                    match (count, donated_row) {
                        (2, _) => self.send_gift(side),
                        (4, Some(row)) => self.send_row(side, row),
                        _ => {}
                    }
                }
                SessionEvent::ScoreCrossedStep { score } => self.activate_slowdown(side, score),
                SessionEvent::ToppedOut { final_score } => self.finish(side, final_score),
            }
        }
    }

    fn send_gift(&mut self, from: Side) {
        let to = from.opponent();
        let kind = self.gifts.gift_kind();
        if self.session_mut(to).receive_gift(kind) {
            debug!(from = from.as_str(), kind = kind.letter(), "gift delivered");
            self.push_notice(NoticeKind::Gift(kind), to);
        } else {
            debug!(from = from.as_str(), kind = kind.letter(), "gift skipped");
        }
    }

    fn send_row(&mut self, from: Side, row: Row) {
        let to = from.opponent();
        match self.session_mut(to).receive_row(row) {
            Some(y) => {
                debug!(from = from.as_str(), row = y, "line exchanged");
                self.push_notice(NoticeKind::LineGiven, from);
                self.push_notice(NoticeKind::LineReceived, to);
            }
            None => debug!(from = from.as_str(), "no empty row to receive line"),
        }
    }

    fn activate_slowdown(&mut self, by: Side, score: u32) {
        if self.is_over() {
            return;
        }
        self.set_speeds(true);
        if let Some(id) = self.slowdown.take() {
            self.scheduler.cancel(id);
        }
        self.slowdown = Some(
            self.scheduler
                .schedule_after(self.config.slowdown_ms as u64, ArenaTask::RevertSlowdown),
        );
        info!(by = by.as_str(), score, "slowdown started");
        self.push_notice(NoticeKind::Slowdown, by);
    }

    fn finish(&mut self, side: Side, final_score: u32) {
        self.notify_game_over(side, final_score);

        let opponent = side.opponent();
        if self.session_mut(opponent).halt() {
            let score = self.session(opponent).score();
            self.notify_game_over(opponent, score);
        }

        if self.summary.is_none() {
            let summary = MatchSummary::new(self.human.score(), self.ai.score(), side);
            info!(
                human = summary.human_score,
                ai = summary.ai_score,
                topped_out = side.as_str(),
                "match over"
            );
            self.summary = Some(summary);
        }
    }

    fn push_notice(&mut self, kind: NoticeKind, side: Side) {
        let now = self.scheduler.now_ms();
        self.notices.push(kind, side, now, NOTICE_MS);
    }

    fn notify_score(&mut self, side: Side, score: u32) {
        if let Some(sink) = self.score_sink.as_mut() {
            sink.score_changed(side, score);
        }
    }

    fn notify_game_over(&mut self, side: Side, final_score: u32) {
        if let Some(sink) = self.game_over_sink.as_mut() {
            sink.game_over(side, final_score);
        }
    }
}
