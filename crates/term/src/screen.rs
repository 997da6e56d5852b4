//! Screen: the interactive render sink.
//!
//! Owns the renderer, the view and a reusable framebuffer; the viewport is
//! re-read from the terminal every frame so resizes are picked up.

use std::io::Write;

use anyhow::Result;
use crossterm::terminal;

use crate::arena::{DuelSnapshot, RenderSink};
use crate::duel_view::{DuelView, Viewport};
use crate::fb::FrameBuffer;
use crate::renderer::TerminalRenderer;

pub struct Screen<W: Write = std::io::Stdout> {
    renderer: TerminalRenderer<W>,
    view: DuelView,
    fb: FrameBuffer,
    viewport: Viewport,
}

impl Screen {
    /// Take over the terminal.
    pub fn enter() -> Result<Self> {
        let mut renderer = TerminalRenderer::new();
        renderer.enter()?;
        let (w, h) = terminal::size()?;
        Ok(Self::from_parts(renderer, Viewport::new(w, h)))
    }

    /// Give the terminal back.
    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    fn refresh_viewport(&mut self) -> Result<()> {
        let (w, h) = terminal::size()?;
        self.set_viewport(Viewport::new(w, h));
        Ok(())
    }
}

impl<W: Write> Screen<W> {
    pub fn from_parts(renderer: TerminalRenderer<W>, viewport: Viewport) -> Self {
        Self {
            renderer,
            view: DuelView::default(),
            fb: FrameBuffer::new(viewport.width, viewport.height),
            viewport,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.renderer.invalidate();
        }
    }

    pub fn draw(&mut self, snap: &DuelSnapshot) -> Result<()> {
        self.view.render_into(snap, self.viewport, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}

impl RenderSink for Screen {
    fn render(&mut self, snapshot: &DuelSnapshot) -> Result<()> {
        self.refresh_viewport()?;
        self.draw(snapshot)
    }
}
