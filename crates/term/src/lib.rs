//! Terminal presentation for the `blockfall` binary.
//!
//! A snapshot is drawn into a [`FrameBuffer`] by [`BoardView`] (pure, testable)
//! and flushed to the terminal by [`TerminalRenderer`] (crossterm).

pub mod fb;
pub mod renderer;
pub mod view;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use view::{BoardView, Viewport};
