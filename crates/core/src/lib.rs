//! Core engine - pure, deterministic, and testable
//!
//! Everything that decides what happens in a round lives here: the grid, the
//! piece catalog, SRS rotation, scoring and the round state machine. There is
//! no I/O; a driver feeds commands and elapsed time and reads snapshots back.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with legality checks and line clearing
//! - [`shapes`]: square shape matrices and their quarter-turn rotations
//! - [`piece`]: a shape posed on the board
//! - [`rotation`]: SRS kick tables and kick search
//! - [`scoring`]: line clear, T-spin and drop points, level from lines
//! - [`rng`]: seeded uniform or 7-bag piece generation
//! - [`config`]: round parameters and their environment overrides
//! - [`round`]: the round controller
//! - [`snapshot`]: read-only views for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::{CommandOutcome, RoundState};
//! use blockfall_types::Command;
//!
//! let mut round = RoundState::with_seed(12345);
//! round.start();
//!
//! round.apply_command(Command::Right);
//! round.apply_command(Command::RotateCw);
//! assert_eq!(round.apply_command(Command::HardDrop), CommandOutcome::Locked);
//!
//! // Hard drops award two points per cell travelled
//! assert!(round.score() > 0);
//! ```
//!
//! # Timing
//!
//! Call [`RoundState::advance_time`] with elapsed milliseconds. Gravity moves
//! the piece one row per interval, starting at 1000ms on level 1 and speeding
//! up by 100ms per level down to 100ms.

pub mod board;
pub mod config;
pub mod piece;
pub mod rng;
pub mod rotation;
pub mod round;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::{Board, ClearedRows, TagGrid};
pub use config::{GravityCurve, RoundConfig, Randomizer};
pub use piece::Piece;
pub use rng::{PieceGenerator, SimpleRng};
pub use rotation::{kick_candidates, try_rotate, Rotated};
pub use round::{CommandOutcome, Phase, RoundState};
pub use scoring::{drop_points, level_for_lines, line_clear_points};
pub use shapes::{orientation, spawn_matrix, ShapeMatrix};
pub use snapshot::{PieceSnapshot, RoundSnapshot};
