//! Terminal input for the `blockfall` binary.
//!
//! Maps `crossterm` key events into [`crate::types::Command`] values for the
//! round and [`crate::types::Control`] signals for the driver. The engine
//! crates never see a key event.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit, KeyAction};
