//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates as `blockfall::{types, core, input, term}`.
//! The engine lives in `core` and has no I/O; `input` and `term` are the
//! terminal glue used by the `blockfall` binary.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
