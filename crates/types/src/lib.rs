//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by the engine and by any
//! driver that feeds it. All types are plain data with no behaviour beyond
//! conversions, which keeps them usable from the engine, a renderer or a
//! recorder alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19), row 0 is the top
//!
//! # Cell Tags
//!
//! A locked cell carries the kind of the piece that produced it. As an
//! integer tag, 0 is empty and 1..=7 map to I, J, L, O, S, T, Z.
//!
//! # Gravity by Level
//!
//! Levels start at 1. The interval per row is
//! `max(GRAVITY_FLOOR_MS, BASE_GRAVITY_MS - (level - 1) * GRAVITY_STEP_MS)`:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 900ms |
//! | 5 | 600ms |
//! | 10+ | 100ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, RotationState, TurnDirection, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.tag(), 6);
//! assert_eq!(PieceKind::from_tag(6), Some(PieceKind::T));
//!
//! let state = RotationState::Spawn.turned(TurnDirection::Clockwise);
//! assert_eq!(state, RotationState::Right);
//!
//! let cmd: Command = "hardDrop".parse().unwrap();
//! assert_eq!(cmd, Command::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed timestep used by the terminal driver (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1
pub const BASE_GRAVITY_MS: u32 = 1000;

/// Gravity speed-up per level
pub const GRAVITY_STEP_MS: u32 = 100;

/// Fastest gravity interval
pub const GRAVITY_FLOOR_MS: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per cell for a manual soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell for a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// Maximum number of lock timer restarts per piece when a lock delay is configured
pub const DEFAULT_LOCK_RESET_LIMIT: u8 = 15;

/// Line clear multipliers without a T-spin, indexed by lines cleared.
///
/// Points are multiplied by the current level (levels start at 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Line clear multipliers for a T-spin, indexed by lines cleared.
///
/// A T piece spans three rows, so four lines is never a T-spin.
pub const TSPIN_SCORES: [u32; 4] = [400, 800, 1200, 1600];

/// Violation of a caller contract.
///
/// Legality failures (a blocked move or rotation) are not errors; they are
/// reported as ordinary outcomes by the engine. This type covers input that
/// could never be valid, such as a turn of +2 or an unknown command name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("turn delta must be +1 or -1, got {0}")]
    InvalidTurn(i8),
    #[error("rotation index must be in 0..4, got {0}")]
    InvalidRotationIndex(u8),
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),
    #[error("unknown piece kind: {0:?}")]
    UnknownPieceKind(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// The seven tetromino piece kinds
///
/// The declaration order matches the cell tags 1..=7:
/// - **I**: horizontal bar, 4x4 matrix
/// - **J**: 3x3 matrix
/// - **L**: 3x3 matrix (mirror of J)
/// - **O**: 2x2 square
/// - **S**: 3x3 matrix
/// - **T**: 3x3 matrix
/// - **Z**: 3x3 matrix (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in tag order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Integer cell tag (1..=7)
    pub fn tag(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Kind for a non-empty cell tag
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_tag(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_tag(0), None);
    /// ```
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1..=7 => Some(Self::ALL[(tag - 1) as usize]),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

impl FromStr for PieceKind {
    type Err = ContractError;

    /// Parse piece kind from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "i" => Ok(PieceKind::I),
            "j" => Ok(PieceKind::J),
            "l" => Ok(PieceKind::L),
            "o" => Ok(PieceKind::O),
            "s" => Ok(PieceKind::S),
            "t" => Ok(PieceKind::T),
            "z" => Ok(PieceKind::Z),
            _ => Err(ContractError::UnknownPieceKind(s.to_string())),
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell (tag 0)
/// - `Some(PieceKind)`: Cell locked by a piece of that kind
pub type Cell = Option<PieceKind>;

/// Integer tag of a cell (0 = empty)
pub fn cell_tag(cell: Cell) -> u8 {
    cell.map_or(0, PieceKind::tag)
}

/// Direction of a single rotation command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnDirection {
    Clockwise,
    CounterClockwise,
}

impl TurnDirection {
    /// +1 for clockwise, -1 for counter-clockwise
    pub fn delta(self) -> i8 {
        match self {
            TurnDirection::Clockwise => 1,
            TurnDirection::CounterClockwise => -1,
        }
    }

    /// Column in direction-keyed lookup tables
    pub fn index(self) -> usize {
        match self {
            TurnDirection::Clockwise => 0,
            TurnDirection::CounterClockwise => 1,
        }
    }
}

impl TryFrom<i8> for TurnDirection {
    type Error = ContractError;

    fn try_from(delta: i8) -> Result<Self, Self::Error> {
        match delta {
            1 => Ok(TurnDirection::Clockwise),
            -1 => Ok(TurnDirection::CounterClockwise),
            other => Err(ContractError::InvalidTurn(other)),
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **Spawn** (0): spawn orientation
/// - **Right** (1): rotated 90° clockwise
/// - **Half** (2): rotated 180°
/// - **Left** (3): rotated 90° counter-clockwise
///
/// The cycle goes: Spawn → Right → Half → Left → Spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RotationState {
    #[default]
    Spawn,
    Right,
    Half,
    Left,
}

impl RotationState {
    pub const ALL: [RotationState; 4] = [
        RotationState::Spawn,
        RotationState::Right,
        RotationState::Half,
        RotationState::Left,
    ];

    /// Number of clockwise quarter turns from spawn (0..4)
    pub fn index(self) -> usize {
        match self {
            RotationState::Spawn => 0,
            RotationState::Right => 1,
            RotationState::Half => 2,
            RotationState::Left => 3,
        }
    }

    /// State for a quarter-turn count.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`; use [`RotationState::try_from`] for untrusted input.
    pub fn from_index(index: u8) -> Self {
        match Self::try_from(index) {
            Ok(state) => state,
            Err(err) => panic!("{err}"),
        }
    }

    /// State after one turn in `direction`
    pub fn turned(self, direction: TurnDirection) -> Self {
        let next = (self.index() as i8 + direction.delta()).rem_euclid(4);
        Self::ALL[next as usize]
    }

    /// Rotate clockwise (90°)
    pub fn cw(self) -> Self {
        self.turned(TurnDirection::Clockwise)
    }

    /// Rotate counter-clockwise (-90°)
    pub fn ccw(self) -> Self {
        self.turned(TurnDirection::CounterClockwise)
    }
}

impl TryFrom<u8> for RotationState {
    type Error = ContractError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(ContractError::InvalidRotationIndex(index))
    }
}

/// Gameplay commands accepted by the round controller
///
/// These are the only stimuli besides elapsed time that change game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Move piece one cell left
    Left,
    /// Move piece one cell right
    Right,
    /// Drop piece one cell down (+1 point)
    SoftDrop,
    /// Drop piece to the lowest legal row and lock it (+2 points per row)
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Set the active piece aside (once per spawn)
    Hold,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::Left,
        Command::Right,
        Command::SoftDrop,
        Command::HardDrop,
        Command::RotateCw,
        Command::RotateCcw,
        Command::Hold,
    ];

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Left => "moveLeft",
            Command::Right => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::Hold => "hold",
        }
    }
}

impl FromStr for Command {
    type Err = ContractError;

    /// Parse command from its camelCase name (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "moveleft" | "left" => Ok(Command::Left),
            "moveright" | "right" => Ok(Command::Right),
            "softdrop" => Ok(Command::SoftDrop),
            "harddrop" => Ok(Command::HardDrop),
            "rotatecw" => Ok(Command::RotateCw),
            "rotateccw" => Ok(Command::RotateCcw),
            "hold" => Ok(Command::Hold),
            _ => Err(ContractError::UnknownCommand(s.to_string())),
        }
    }
}

/// Driver-level control signals
///
/// These come from the presentation layer and are not gameplay commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    TogglePause,
    Reset,
}

/// Report of the most recent lock, for presentation layers that animate clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub tspin: bool,
    /// Line clear points awarded for this lock (drop points excluded)
    pub points: u32,
    /// The following spawn was blocked
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_defaults() {
        assert_eq!(BASE_GRAVITY_MS, 1000);
        assert_eq!(GRAVITY_STEP_MS, 100);
        assert_eq!(GRAVITY_FLOOR_MS, 100);
        assert_eq!(LINES_PER_LEVEL, 10);
    }

    #[test]
    fn test_tags_round_trip_for_every_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(PieceKind::from_tag(0), None);
        assert_eq!(PieceKind::from_tag(8), None);
    }

    #[test]
    fn test_cell_tag_of_empty_is_zero() {
        assert_eq!(cell_tag(None), 0);
        assert_eq!(cell_tag(Some(PieceKind::Z)), 7);
    }

    #[test]
    fn test_turn_direction_rejects_other_deltas() {
        assert_eq!(TurnDirection::try_from(1i8), Ok(TurnDirection::Clockwise));
        assert_eq!(TurnDirection::try_from(-1i8), Ok(TurnDirection::CounterClockwise));
        assert_eq!(TurnDirection::try_from(2i8), Err(ContractError::InvalidTurn(2)));
        assert_eq!(TurnDirection::try_from(0i8), Err(ContractError::InvalidTurn(0)));
    }

    #[test]
    #[should_panic(expected = "rotation index")]
    fn test_rotation_from_index_panics_out_of_range() {
        let _ = RotationState::from_index(4);
    }

    #[test]
    fn test_rotation_cycle_has_length_four() {
        let mut state = RotationState::Spawn;
        for _ in 0..4 {
            state = state.cw();
        }
        assert_eq!(state, RotationState::Spawn);
        assert_eq!(RotationState::Spawn.ccw(), RotationState::Left);
    }

    #[test]
    fn test_command_names_round_trip() {
        for cmd in Command::ALL {
            assert_eq!(cmd.as_str().parse::<Command>(), Ok(cmd));
        }
        assert_eq!(
            "teleport".parse::<Command>(),
            Err(ContractError::UnknownCommand("teleport".to_string()))
        );
    }
}
