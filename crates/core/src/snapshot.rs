//! Read-only views of a round for renderers and recorders

use serde::{Deserialize, Serialize};

use crate::board::TagGrid;
use crate::piece::Piece;
use crate::round::Phase;
use crate::types::{PieceKind, RotationState, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: RotationState,
    pub x: i8,
    pub y: i8,
    /// Absolute board cells, some may be above the grid (y < 0)
    pub cells: [(i8, i8); 4],
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            x: value.x(),
            y: value.y(),
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Locked cells as tags (0 = empty, 1..=7 = I, J, L, O, S, T, Z)
    pub grid: TagGrid,
    pub active: Option<PieceSnapshot>,
    /// Row the active piece would land on
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub gravity_interval_ms: u32,
    pub phase: Phase,
    pub game_over: bool,
    pub paused: bool,
}

impl RoundSnapshot {
    /// Whether the active piece covers `(x, y)`
    pub fn active_covers(&self, x: i8, y: i8) -> bool {
        self.active
            .map(|active| active.cells.contains(&(x, y)))
            .unwrap_or(false)
    }

    /// Whether the ghost of the active piece covers `(x, y)`
    pub fn ghost_covers(&self, x: i8, y: i8) -> bool {
        match (self.active, self.ghost_y) {
            (Some(active), Some(ghost_y)) => {
                let dy = ghost_y - active.y;
                active.cells.iter().any(|&(cx, cy)| (cx, cy + dy) == (x, y))
            }
            _ => false,
        }
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for RoundSnapshot {
    fn default() -> Self {
        Self {
            grid: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            hold: None,
            can_hold: true,
            score: 0,
            lines: 0,
            level: 1,
            gravity_interval_ms: 0,
            phase: Phase::Ready,
            game_over: false,
            paused: false,
        }
    }
}
