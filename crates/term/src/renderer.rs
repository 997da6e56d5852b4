//! TerminalRenderer: flushes duel frames to a terminal.
//!
//! A frame is a full redraw when there is no previous frame of the same size
//! (first draw, resize, [`TerminalRenderer::invalidate`]). Otherwise only the
//! horizontal runs of cells that differ from the previous frame are sent.
//! Commands are queued into a byte buffer and written with a single flush.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    previous: Option<FrameBuffer>,
    pending: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            previous: None,
            pending: Vec::with_capacity(32 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Raw mode, alternate screen, hidden cursor, no wrapping.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.pending.clear();
        self.pending
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush_pending()
    }

    /// Undo [`TerminalRenderer::enter`]. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        self.pending.clear();
        self.pending
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush_pending()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Draw `fb`, then hand back the previous frame in its place.
    ///
    /// The caller keeps a single framebuffer alive and redraws into whatever
    /// it gets back, so steady-state frames allocate nothing.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.pending.clear();
        let same_size = self
            .previous
            .as_ref()
            .is_some_and(|p| (p.width(), p.height()) == (fb.width(), fb.height()));

        let mut spare = match self.previous.take() {
            Some(prev) if same_size => {
                encode_diff_into(&prev, fb, &mut self.pending)?;
                prev
            }
            Some(mut prev) => {
                encode_full_into(fb, &mut self.pending)?;
                prev.resize(fb.width(), fb.height());
                prev
            }
            None => {
                encode_full_into(fb, &mut self.pending)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush_pending()?;

        std::mem::swap(&mut spare, fb);
        self.previous = Some(spare);
        Ok(())
    }

    fn flush_pending(&mut self) -> Result<()> {
        self.out.write_all(&self.pending)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Queues cells into a byte buffer, emitting style changes and cursor moves
/// only when they are needed.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
    cursor: Option<(u16, u16)>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            style: None,
            cursor: None,
        }
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        if self.cursor != Some((x, y)) {
            self.out.queue(cursor::MoveTo(x, y))?;
            self.cursor = Some((x, y));
        }
        Ok(())
    }

    fn paint(&mut self, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            queue_style(self.out, cell.style)?;
            self.style = Some(cell.style);
        }
        self.out.queue(Print(cell.ch))?;
        self.cursor = self.cursor.map(|(x, y)| (x.saturating_add(1), y));
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Encode a complete repaint of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut painter = Painter::new(out);
    for y in 0..fb.height() {
        painter.move_to(0, y)?;
        for x in 0..fb.width() {
            painter.paint(fb.get(x, y).unwrap_or_default())?;
        }
    }
    painter.finish()
}

/// Encode only what changed between `prev` and `next` into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut painter = Painter::new(out);
    for run in ChangedRuns::new(prev, next) {
        painter.move_to(run.x, run.y)?;
        for dx in 0..run.len {
            painter.paint(next.get(run.x + dx, run.y).unwrap_or_default())?;
        }
    }
    painter.finish()
}

fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?
        .queue(SetForegroundColor(truecolor(style.fg)))?
        .queue(SetBackgroundColor(truecolor(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn truecolor(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// A horizontal stretch of differing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

/// Row-major iterator over the maximal runs of cells that differ between two
/// frames. Frames of different sizes yield one run per row of `next`.
struct ChangedRuns<'a> {
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    resized: bool,
    x: u16,
    y: u16,
}

impl<'a> ChangedRuns<'a> {
    fn new(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> Self {
        Self {
            prev,
            next,
            resized: (prev.width(), prev.height()) != (next.width(), next.height()),
            x: 0,
            y: 0,
        }
    }

    fn differs(&self, x: u16, y: u16) -> bool {
        self.prev.get(x, y) != self.next.get(x, y)
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let (w, h) = (self.next.width(), self.next.height());
        if self.resized {
            if self.y >= h {
                return None;
            }
            let run = Run {
                x: 0,
                y: self.y,
                len: w,
            };
            self.y += 1;
            return Some(run);
        }

        while self.y < h {
            while self.x < w && !self.differs(self.x, self.y) {
                self.x += 1;
            }
            if self.x < w {
                let start = self.x;
                while self.x < w && self.differs(self.x, self.y) {
                    self.x += 1;
                }
                return Some(Run {
                    x: start,
                    y: self.y,
                    len: self.x - start,
                });
            }
            self.x = 0;
            self.y += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(w: u16, h: u16, ch: char) -> FrameBuffer {
        let mut fb = FrameBuffer::new(w, h);
        fb.clear(CellStyle::default().cell(ch));
        fb
    }

    #[test]
    fn test_runs_coalesce_and_split() {
        let a = FrameBuffer::new(8, 2);
        let mut b = FrameBuffer::new(8, 2);
        let x = CellStyle::default().cell('X');
        for col in [1, 2, 3, 6] {
            b.set(col, 0, x);
        }
        b.set(0, 1, x);

        let runs: Vec<_> = ChangedRuns::new(&a, &b).map(|r| (r.x, r.y, r.len)).collect();
        assert_eq!(runs, vec![(1, 0, 3), (6, 0, 1), (0, 1, 1)]);
    }

    #[test]
    fn test_runs_cover_rows_after_resize() {
        let a = FrameBuffer::new(2, 1);
        let b = FrameBuffer::new(3, 2);
        let runs: Vec<_> = ChangedRuns::new(&a, &b).collect();
        assert_eq!(runs.len(), 2);
        assert!(runs.iter().all(|r| r.x == 0 && r.len == 3));
    }

    #[test]
    fn test_identical_frame_writes_no_cells() {
        let mut r = TerminalRenderer::with_writer(Vec::new());
        r.draw_swap(&mut filled(4, 2, 'Z')).unwrap();
        let first = r.writer().len();
        assert!(first > 0);

        r.draw_swap(&mut filled(4, 2, 'Z')).unwrap();
        assert!(!r.writer()[first..].contains(&b'Z'));
    }

    #[test]
    fn test_resize_repaints_everything() {
        let mut r = TerminalRenderer::with_writer(Vec::new());
        r.draw_swap(&mut filled(2, 1, 'A')).unwrap();
        let first = r.writer().len();
        r.draw_swap(&mut filled(3, 1, 'A')).unwrap();
        let repaint = &r.writer()[first..];
        assert_eq!(repaint.iter().filter(|&&b| b == b'A').count(), 3);
    }

    #[test]
    fn test_invalidate_forces_full_repaint() {
        let mut r = TerminalRenderer::with_writer(Vec::new());
        r.draw_swap(&mut filled(3, 1, 'B')).unwrap();
        r.invalidate();
        let first = r.writer().len();
        r.draw_swap(&mut filled(3, 1, 'B')).unwrap();
        assert_eq!(r.writer()[first..].iter().filter(|&&b| b == b'B').count(), 3);
    }

    #[test]
    fn test_swap_returns_previous_frame() {
        let mut r = TerminalRenderer::with_writer(Vec::new());
        let mut fb = filled(2, 1, 'P');
        r.draw_swap(&mut fb).unwrap();
        // First swap hands back a blank frame of the same size.
        assert_eq!((fb.width(), fb.height()), (2, 1));
        assert_eq!(fb.get(0, 0).unwrap().ch, ' ');
    }
}
