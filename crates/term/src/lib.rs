//! Terminal front end for a duel.
//!
//! A small, game-oriented rendering layer: the view paints a
//! [`DuelSnapshot`](arena::DuelSnapshot) into a framebuffer of styled
//! character cells, and the renderer flushes only what changed since the
//! previous frame. No widget toolkit is involved.
//!
//! Board cells are two terminal columns wide to compensate for the glyph
//! aspect ratio.

pub mod duel_view;
pub mod fb;
pub mod renderer;
pub mod screen;

pub use tetris_duel_arena as arena;
pub use tetris_duel_core as core;
pub use tetris_duel_core::types;

pub use duel_view::{DuelView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use screen::Screen;
