//! Rotation system - SRS rotation with wall kicks
//!
//! Rotation never mutates: it derives the target orientation from the shape
//! catalog, then tries each kick offset of the transition in table order and
//! returns the first legal pose. First match wins.
//!
//! Kick tables are written in the SRS convention where +y is up. The grid
//! grows downward, so [`to_grid_offset`] negates y before a kick is applied.
//! The values are the published SRS tables, unflipped; the y negation happens
//! once, at lookup.
//!
//! Reference: https://tetris.wiki/Super_Rotation_System

use crate::board::Board;
use crate::piece::Piece;
use crate::shapes::{orientation, ShapeMatrix};
use crate::types::{PieceKind, RotationState, TurnDirection};

/// Kick offset (dx, dy) with +y up
pub type KickOffset = (i8, i8);

/// Kicks for one transition, first entry is the unkicked rotation
pub type KickRow = [KickOffset; 5];

/// Kick table indexed by `[from.index()][direction.index()]`
pub type KickTable = [[KickRow; 2]; 4];

/// JLSTZ kick table (shared by J, L, S, T, Z)
static JLSTZ_KICKS: KickTable = [
    [
        // 0->R
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        // 0->L
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    ],
    [
        // R->2
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        // R->0
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    ],
    [
        // 2->L
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
        // 2->R
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    ],
    [
        // L->0
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        // L->2
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    ],
];

/// I piece kick table
static I_KICKS: KickTable = [
    [
        // 0->R
        [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
        // 0->L
        [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    ],
    [
        // R->2
        [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
        // R->0
        [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    ],
    [
        // 2->L
        [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
        // 2->R
        [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    ],
    [
        // L->0
        [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
        // L->2
        [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    ],
];

/// O piece never needs a kick
static O_KICKS: [KickOffset; 1] = [(0, 0)];

/// Convert an SRS (+y up) offset into grid (+y down) coordinates
pub fn to_grid_offset((dx, dy): KickOffset) -> (i8, i8) {
    (dx, -dy)
}

/// Direction of a quarter-turn transition.
///
/// # Panics
///
/// Panics if `to` is not one quarter turn away from `from`.
fn direction_between(from: RotationState, to: RotationState) -> TurnDirection {
    if from.cw() == to {
        TurnDirection::Clockwise
    } else if from.ccw() == to {
        TurnDirection::CounterClockwise
    } else {
        panic!("kick lookup needs a quarter turn, got {from:?} -> {to:?}")
    }
}

/// Ordered kick offsets (SRS convention) for `kind` turning `from -> to`
pub fn kick_candidates(
    kind: PieceKind,
    from: RotationState,
    to: RotationState,
) -> &'static [KickOffset] {
    let direction = direction_between(from, to);
    match kind {
        PieceKind::O => &O_KICKS,
        PieceKind::I => &I_KICKS[from.index()][direction.index()],
        _ => &JLSTZ_KICKS[from.index()][direction.index()],
    }
}

/// Matrix of `kind` after turning from `from` in `direction`
pub fn rotated_matrix(
    kind: PieceKind,
    from: RotationState,
    direction: TurnDirection,
) -> ShapeMatrix {
    orientation(kind, from.turned(direction))
}

/// A successful rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotated {
    /// The rotated piece, kick applied
    pub piece: Piece,
    /// Position of the winning kick in the table (0 = no kick)
    pub kick_index: usize,
    /// Applied offset in grid coordinates
    pub offset: (i8, i8),
}

/// Try to rotate `piece` one quarter turn on `board`.
///
/// Returns `None` if every kick is blocked; the caller's piece is untouched either way.
pub fn try_rotate(board: &Board, piece: &Piece, direction: TurnDirection) -> Option<Rotated> {
    let to = piece.rotation().turned(direction);
    let turned = piece.with_rotation(to);

    kick_candidates(piece.kind(), piece.rotation(), to)
        .iter()
        .enumerate()
        .find_map(|(kick_index, &kick)| {
            let (dx, dy) = to_grid_offset(kick);
            let candidate = turned.translated(dx, dy);
            board.is_legal(&candidate).then_some(Rotated {
                piece: candidate,
                kick_index,
                offset: (dx, dy),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BOARD_WIDTH;

    #[test]
    fn test_o_has_single_zero_kick() {
        for from in RotationState::ALL {
            assert_eq!(kick_candidates(PieceKind::O, from, from.cw()), &[(0, 0)]);
        }
    }

    #[test]
    fn test_every_table_starts_unkicked() {
        for kind in PieceKind::ALL {
            for from in RotationState::ALL {
                for to in [from.cw(), from.ccw()] {
                    assert_eq!(kick_candidates(kind, from, to)[0], (0, 0));
                }
            }
        }
    }

    #[test]
    fn test_opposite_transitions_mirror_each_other() {
        // SRS tables are antisymmetric: A->B kicks are the negation of B->A kicks
        for table_kind in [PieceKind::T, PieceKind::I] {
            for from in RotationState::ALL {
                let to = from.cw();
                let forward = kick_candidates(table_kind, from, to);
                let back = kick_candidates(table_kind, to, from);
                for (f, b) in forward.iter().zip(back) {
                    assert_eq!((f.0, f.1), (-b.0, -b.1));
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "quarter turn")]
    fn test_half_turn_lookup_is_a_contract_violation() {
        kick_candidates(PieceKind::T, RotationState::Spawn, RotationState::Half);
    }

    #[test]
    fn test_y_is_negated_for_grid() {
        assert_eq!(to_grid_offset((-1, 1)), (-1, -1));
        assert_eq!(to_grid_offset((0, -2)), (0, 2));
    }

    #[test]
    fn test_rotated_matrix_matches_orientation() {
        for kind in PieceKind::ALL {
            for from in RotationState::ALL {
                let m = orientation(kind, from);
                assert_eq!(
                    rotated_matrix(kind, from, TurnDirection::Clockwise),
                    m.rotate_cw()
                );
                assert_eq!(
                    rotated_matrix(kind, from, TurnDirection::CounterClockwise),
                    m.rotate_ccw()
                );
            }
        }
    }

    #[test]
    fn test_free_rotation_uses_first_kick() {
        let board = Board::new();
        let piece = Piece::new(PieceKind::T, RotationState::Spawn, 4, 10);
        let rotated = try_rotate(&board, &piece, TurnDirection::Clockwise).unwrap();
        assert_eq!(rotated.kick_index, 0);
        assert_eq!(rotated.piece.rotation(), RotationState::Right);
        assert_eq!((rotated.piece.x(), rotated.piece.y()), (4, 10));
    }

    #[test]
    fn test_i_against_right_wall_kicks_left() {
        let board = Board::new();
        // Vertical I in the right-most column (matrix column 2)
        let piece = Piece::new(PieceKind::I, RotationState::Right, BOARD_WIDTH as i8 - 3, 5);
        assert!(board.is_legal(&piece));
        let rotated = try_rotate(&board, &piece, TurnDirection::Clockwise).unwrap();
        assert!(rotated.kick_index > 0);
        assert!(board.is_legal(&rotated.piece));
        assert!(rotated.piece.cells().iter().all(|&(x, _)| x < BOARD_WIDTH as i8));
    }

    #[test]
    fn test_fully_blocked_rotation_fails() {
        let mut board = Board::new();
        for y in 0..20 {
            for x in 0..10 {
                board.set(x, y, Some(PieceKind::Z));
            }
        }
        // Carve exactly the spawn T footprint at the top
        let piece = Piece::spawn(PieceKind::T).translated(0, 5);
        for (x, y) in piece.cells() {
            board.set(x, y, None);
        }
        assert!(board.is_legal(&piece));
        assert!(try_rotate(&board, &piece, TurnDirection::Clockwise).is_none());
        assert!(try_rotate(&board, &piece, TurnDirection::CounterClockwise).is_none());
    }
}
