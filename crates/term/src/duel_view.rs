//! DuelView: lays both boards of a match out in a terminal framebuffer.
//!
//! ```text
//!          YOU                                     AI
//! ┌────────────────────┐ SCORE          ┌────────────────────┐ SCORE
//! │· · · · · · · · · · │ 1200           │                    │ 850
//! │                    │ LINES          │                    │ LINES
//! ...
//! ```
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::arena::{DuelSnapshot, MatchSummary, Notice};
use crate::core::{base_shape, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ShapeKind, Side, GRID_HEIGHT, GRID_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PANEL_W: u16 = 14;
const PANEL_GAP: u16 = 1;
const BOARD_GAP: u16 = 2;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const LABEL: CellStyle = CellStyle::plain(Rgb::new(220, 220, 220), SCREEN_BG).emphasized();
const VALUE: CellStyle = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);
const NOTICE: CellStyle = CellStyle::plain(Rgb::new(255, 215, 0), SCREEN_BG).emphasized();
const ALERT: CellStyle = CellStyle::plain(Rgb::new(255, 110, 110), SCREEN_BG).emphasized();
const BORDER: CellStyle = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);
const EMPTY: CellStyle = CellStyle::plain(Rgb::new(90, 90, 100), BOARD_BG).dimmed();
const OVERLAY: CellStyle = CellStyle::plain(Rgb::new(255, 255, 255), SCREEN_BG).emphasized();

/// Renders a [`DuelSnapshot`].
#[derive(Debug, Clone, Copy)]
pub struct DuelView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for DuelView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl DuelView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            GRID_WIDTH as u16 * self.cell_w + 2,
            GRID_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Smallest viewport that shows everything (title row included).
    pub fn required_size(&self) -> Viewport {
        let (frame_w, frame_h) = self.frame_size();
        let side_w = frame_w + PANEL_GAP + PANEL_W;
        Viewport::new(side_w * 2 + BOARD_GAP, frame_h + 1)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &DuelSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let need = self.required_size();
        let (frame_w, frame_h) = self.frame_size();
        let origin_x = viewport.width.saturating_sub(need.width) / 2;
        let origin_y = viewport.height.saturating_sub(need.height) / 2;

        let side_w = frame_w + PANEL_GAP + PANEL_W;
        for (i, side) in [Side::Human, Side::Ai].into_iter().enumerate() {
            let x = origin_x + i as u16 * (side_w + BOARD_GAP);
            let title = match side {
                Side::Human => "YOU",
                Side::Ai => "AI",
            };
            fb.put_str_centered(x, frame_w, origin_y, title, LABEL);

            let board_y = origin_y + 1;
            let session = snap.side(side);
            self.draw_board(fb, session, x, board_y);
            self.draw_panel(fb, snap, side, x + frame_w + PANEL_GAP, board_y + 1);

            if session.game_over() && snap.summary.is_none() {
                let mid = board_y + frame_h / 2;
                fb.put_str_centered(x, frame_w, mid, "GAME OVER", OVERLAY);
            }
        }

        if let Some(summary) = snap.summary {
            self.draw_summary(fb, &summary, origin_x, origin_y, need);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &DuelSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, x: u16, y: u16) {
        let (frame_w, frame_h) = self.frame_size();
        draw_border(fb, x, y, frame_w, frame_h, BORDER);

        for row in 0..GRID_HEIGHT as i8 {
            for col in 0..GRID_WIDTH as i8 {
                let cell = snap.cell_with_active(col, row).and_then(ShapeKind::from_u8);
                let (ch, style) = match cell {
                    Some(kind) => ('█', CellStyle::plain(Rgb::of_kind(kind), BOARD_BG)),
                    None => ('·', EMPTY),
                };
                let px = x + 1 + col as u16 * self.cell_w;
                let py = y + 1 + row as u16 * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &DuelSnapshot, side: Side, x: u16, y: u16) {
        let session = snap.side(side);
        let mut y = y;

        fb.put_str(x, y, "SCORE", LABEL);
        fb.put_u32(x, y + 1, session.score, VALUE);
        y += 3;

        fb.put_str(x, y, "LINES", LABEL);
        fb.put_u32(x, y + 1, session.lines, VALUE);
        y += 3;

        fb.put_str(x, y, "NEXT", LABEL);
        if let Some(kind) = session.next {
            draw_preview(fb, kind, x, y + 1);
        }
        y += 6;

        if let Some(remaining) = snap.slowdown_remaining_ms {
            let end = fb.put_str(x, y, "SLOW ", ALERT);
            let end = fb.put_u32(end, y, remaining.div_ceil(1000) as u32, ALERT);
            fb.put_char(end, y, 's', ALERT);
        }
        y += 2;

        if let Some(notice) = latest_notice(snap, side) {
            fb.put_str(x, y, &notice.text(), NOTICE);
        }
    }

    fn draw_summary(
        &self,
        fb: &mut FrameBuffer,
        summary: &MatchSummary,
        x: u16,
        y: u16,
        area: Viewport,
    ) {
        const BOX_W: u16 = 30;
        const BOX_H: u16 = 7;
        let bx = x + area.width.saturating_sub(BOX_W) / 2;
        let by = y + area.height.saturating_sub(BOX_H) / 2;

        fb.fill_rect(bx, by, BOX_W, BOX_H, ' ', OVERLAY);
        draw_border(fb, bx, by, BOX_W, BOX_H, BORDER);
        fb.put_str_centered(bx, BOX_W, by + 1, "GAME OVER", OVERLAY);

        let scores_x = bx + 3;
        let end = fb.put_str(scores_x, by + 3, "YOU ", LABEL);
        let end = fb.put_u32(end, by + 3, summary.human_score, VALUE);
        let end = fb.put_str(end + 2, by + 3, "AI ", LABEL);
        fb.put_u32(end, by + 3, summary.ai_score, VALUE);

        let verdict = match summary.winner {
            Some(Side::Human) => "You win!",
            Some(Side::Ai) => "AI wins!",
            None => "Draw",
        };
        fb.put_str_centered(bx, BOX_W, by + 4, verdict, NOTICE);
        fb.put_str_centered(bx, BOX_W, by + 5, "r restart   q quit", VALUE.dimmed());
    }
}

fn latest_notice(snap: &DuelSnapshot, side: Side) -> Option<&Notice> {
    snap.notices.iter().rev().find(|n| n.side == side)
}

/// Next-piece preview in spawn orientation, two columns per cell.
fn draw_preview(fb: &mut FrameBuffer, kind: ShapeKind, x: u16, y: u16) {
    let style = CellStyle::plain(Rgb::of_kind(kind), SCREEN_BG);
    for (dx, dy) in base_shape(kind).offsets() {
        let px = x + dx as u16 * 2;
        let py = y + dy as u16;
        fb.put_char(px, py, '█', style);
        fb.put_char(px + 1, py, '█', style);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}
