//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the view draws a snapshot into a
//! framebuffer of styled glyphs, and the renderer flushes only what changed.
//! There are no widgets or layout engines.
//!
//! Grid cells are drawn 2 columns wide by default to compensate for the
//! aspect ratio of terminal glyphs.

pub mod fb;
pub mod flash;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use flash::{LitRow, RowFlashes};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{
    changed_runs, encode_diff_into, encode_full_into, for_each_changed_run, TerminalRenderer,
};
