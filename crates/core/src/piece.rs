//! Piece - a tetromino posed on the board
//!
//! A piece is a small `Copy` value. Speculative moves (kick search, ghost,
//! hard drop) work on copies and never touch the original.

use crate::shapes::{orientation, MinoOffset, ShapeMatrix};
use crate::types::{PieceKind, RotationState, BOARD_WIDTH};

/// Falling piece: kind, rotation state, and the board position of its matrix's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rotation: RotationState,
    x: i8,
    y: i8,
    matrix: ShapeMatrix,
}

impl Piece {
    /// Piece of `kind` in `rotation` with its matrix anchored at `(x, y)`
    pub fn new(kind: PieceKind, rotation: RotationState, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
            matrix: orientation(kind, rotation),
        }
    }

    /// Canonical spawn pose: spawn orientation, horizontally centred, top row 0
    pub fn spawn(kind: PieceKind) -> Self {
        let size = orientation(kind, RotationState::Spawn).size() as i8;
        Self::new(kind, RotationState::Spawn, (BOARD_WIDTH as i8 - size) / 2, 0)
    }

    /// Kind of the piece
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Current rotation state
    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    /// Column of the matrix's top-left corner
    pub fn x(&self) -> i8 {
        self.x
    }

    /// Row of the matrix's top-left corner (negative above the grid)
    pub fn y(&self) -> i8 {
        self.y
    }

    /// Shape matrix for the current rotation state
    pub fn matrix(&self) -> &ShapeMatrix {
        &self.matrix
    }

    /// Same piece moved by `(dx, dy)`
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same anchor, new rotation state (matrix re-derived from the catalog)
    pub fn with_rotation(&self, rotation: RotationState) -> Self {
        Self::new(self.kind, rotation, self.x, self.y)
    }

    /// Mino offsets relative to the anchor
    pub fn minos(&self) -> [MinoOffset; 4] {
        self.matrix.minos()
    }

    /// Absolute board coordinates of the four occupied cells
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.minos().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }
}
