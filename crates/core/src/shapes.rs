//! Shape catalog - spawn matrices for the seven kinds
//!
//! Every kind is defined once, in its spawn orientation, as a square matrix
//! of cell tags (0 or the kind's tag). The other three orientations are
//! derived by quarter turns, so an orientation depends only on
//! `(kind, rotation state)` and never on the rotation history.
//!
//! Matrix coordinates: `(col, row)` with row 0 at the top, matching the grid.

use crate::types::{PieceKind, RotationState};

/// Largest matrix side (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of a single mino relative to the matrix's top-left corner
pub type MinoOffset = (i8, i8);

/// Square matrix of cell tags, `size` x `size` used out of a 4x4 buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    size: u8,
    rows: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeMatrix {
    const fn new(size: u8, rows: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        Self { size, rows }
    }

    /// Side length (2, 3 or 4)
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Tag at `(col, row)`, 0 outside the matrix
    pub fn get(&self, col: usize, row: usize) -> u8 {
        if col >= self.size() || row >= self.size() {
            return 0;
        }
        self.rows[row][col]
    }

    /// Rows of the used part of the matrix
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.rows[..self.size()].iter().map(|row| &row[..self.size()])
    }

    /// Quarter turn clockwise: transpose, then reverse each row
    pub fn rotate_cw(&self) -> Self {
        let n = self.size();
        let mut out = [[0u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, out_row) in out.iter_mut().enumerate().take(n) {
            for (c, cell) in out_row.iter_mut().enumerate().take(n) {
                // transpose gives t[r][c] = m[c][r]; reversing the row reads t[r][n-1-c]
                *cell = self.rows[n - 1 - c][r];
            }
        }
        Self::new(self.size, out)
    }

    /// Quarter turn counter-clockwise: reverse each row, then transpose
    pub fn rotate_ccw(&self) -> Self {
        let n = self.size();
        let mut out = [[0u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, out_row) in out.iter_mut().enumerate().take(n) {
            for (c, cell) in out_row.iter_mut().enumerate().take(n) {
                *cell = self.rows[c][n - 1 - r];
            }
        }
        Self::new(self.size, out)
    }

    /// Offsets of the four occupied cells, row-major order
    pub fn minos(&self) -> [MinoOffset; 4] {
        let mut out = [(0i8, 0i8); 4];
        let mut i = 0;
        for (r, row) in self.rows().enumerate() {
            for (c, &tag) in row.iter().enumerate() {
                if tag != 0 && i < out.len() {
                    out[i] = (c as i8, r as i8);
                    i += 1;
                }
            }
        }
        debug_assert_eq!(i, 4, "every tetromino has four minos");
        out
    }
}

const I_SHAPE: ShapeMatrix = ShapeMatrix::new(
    4,
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const J_SHAPE: ShapeMatrix = ShapeMatrix::new(
    3,
    [[2, 0, 0, 0], [2, 2, 2, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const L_SHAPE: ShapeMatrix = ShapeMatrix::new(
    3,
    [[0, 0, 3, 0], [3, 3, 3, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const O_SHAPE: ShapeMatrix = ShapeMatrix::new(
    2,
    [[4, 4, 0, 0], [4, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const S_SHAPE: ShapeMatrix = ShapeMatrix::new(
    3,
    [[0, 5, 5, 0], [5, 5, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const T_SHAPE: ShapeMatrix = ShapeMatrix::new(
    3,
    [[0, 6, 0, 0], [6, 6, 6, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const Z_SHAPE: ShapeMatrix = ShapeMatrix::new(
    3,
    [[7, 7, 0, 0], [0, 7, 7, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

/// Spawn-orientation matrix for a kind
pub fn spawn_matrix(kind: PieceKind) -> ShapeMatrix {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// Matrix of `kind` in `state`, derived from the spawn matrix by clockwise quarter turns
pub fn orientation(kind: PieceKind, state: RotationState) -> ShapeMatrix {
    let mut matrix = spawn_matrix(kind);
    if kind == PieceKind::O {
        return matrix;
    }
    for _ in 0..state.index() {
        matrix = matrix.rotate_cw();
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_matrices_carry_their_tag() {
        for kind in PieceKind::ALL {
            let m = spawn_matrix(kind);
            for row in m.rows() {
                for &tag in row {
                    assert!(tag == 0 || tag == kind.tag());
                }
            }
            assert_eq!(m.minos().len(), 4);
        }
    }

    #[test]
    fn test_t_orientations_point_the_right_way() {
        // Right: stem on the right
        assert_eq!(
            orientation(PieceKind::T, RotationState::Right).minos(),
            [(1, 0), (1, 1), (2, 1), (1, 2)]
        );
        // Half: stem down
        assert_eq!(
            orientation(PieceKind::T, RotationState::Half).minos(),
            [(0, 1), (1, 1), (2, 1), (1, 2)]
        );
        // Left: stem on the left
        assert_eq!(
            orientation(PieceKind::T, RotationState::Left).minos(),
            [(1, 0), (0, 1), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn test_i_orientations_match_srs_columns() {
        assert_eq!(
            orientation(PieceKind::I, RotationState::Right).minos(),
            [(2, 0), (2, 1), (2, 2), (2, 3)]
        );
        assert_eq!(
            orientation(PieceKind::I, RotationState::Half).minos(),
            [(0, 2), (1, 2), (2, 2), (3, 2)]
        );
        assert_eq!(
            orientation(PieceKind::I, RotationState::Left).minos(),
            [(1, 0), (1, 1), (1, 2), (1, 3)]
        );
    }

    #[test]
    fn test_ccw_undoes_cw() {
        for kind in PieceKind::ALL {
            let m = spawn_matrix(kind);
            assert_eq!(m.rotate_cw().rotate_ccw(), m);
            assert_eq!(m.rotate_ccw(), m.rotate_cw().rotate_cw().rotate_cw());
        }
    }

    #[test]
    fn test_o_is_rotation_invariant() {
        let m = spawn_matrix(PieceKind::O);
        assert_eq!(m.rotate_cw(), m);
        for state in RotationState::ALL {
            assert_eq!(orientation(PieceKind::O, state), m);
        }
    }
}
