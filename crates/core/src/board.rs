//! Board module - the grid of locked cells
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that was locked there. It uses a flat array for cache locality and
//! never allocates.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right) and y ranges 0..19
//! (top to bottom). Rows above the grid (y < 0) are open space: a piece may
//! overhang them, but nothing is ever stored there.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{cell_tag, Cell, ContractError, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by one line clear, bottom to top
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// Grid of tags, one `[u8; 10]` per row
pub type TagGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from integer tags (0 = empty, 1..=7 = kind)
    pub fn from_tags(rows: &TagGrid) -> Result<Self, ContractError> {
        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &tag) in row.iter().enumerate() {
                let cell = match tag {
                    0 => None,
                    _ => Some(PieceKind::from_tag(tag).ok_or_else(|| {
                        ContractError::InvalidConfig(format!("cell tag {tag} at ({x}, {y})"))
                    })?),
                };
                board.cells[y * BOARD_WIDTH as usize + x] = cell;
            }
        }
        Ok(board)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a mino may occupy (x, y).
    ///
    /// Inside the side walls and above the floor, and either above the grid
    /// (always open) or on an empty grid cell.
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        y < 0 || matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Occupancy used for T-spin corners: walls and floor count as filled,
    /// the open space above the grid does not.
    pub fn is_solid(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        self.is_occupied(x, y)
    }

    /// Whether every occupied cell of `piece` is free
    pub fn is_legal(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&(x, y)| self.is_free(x, y))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Write every occupied cell of `piece` into the grid with its kind.
    ///
    /// Cells above the grid are discarded. Returns false if any were.
    pub fn lock(&mut self, piece: &Piece) -> bool {
        let mut visible = true;
        for (x, y) in piece.cells() {
            if !self.set(x, y, Some(piece.kind())) {
                visible = false;
            }
        }
        visible
    }

    /// Remove every full row and drop the rows above into place.
    ///
    /// Fullness is judged on the grid as it is when called: a single
    /// bottom-to-top pass with a read and a write cursor, so a removal never
    /// shifts a row past the read cursor. Returns the removed row indices
    /// (bottom to top); empty rows are inserted at the top.
    pub fn clear_lines(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows
    }

    /// Number of unit steps `piece` can fall before it would become illegal
    pub fn hard_drop_distance(&self, piece: &Piece) -> u32 {
        let mut distance: i8 = 0;
        while self.is_legal(&piece.translated(0, distance + 1)) {
            distance += 1;
        }
        distance as u32
    }

    /// Lowest pose reachable by straight downward translation (ghost preview)
    pub fn ghost_drop(&self, piece: &Piece) -> Piece {
        piece.translated(0, self.hard_drop_distance(piece) as i8)
    }

    /// Whether `piece` cannot fall any further
    pub fn is_grounded(&self, piece: &Piece) -> bool {
        !self.is_legal(&piece.translated(0, 1))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row `y` as a slice of cells
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = BOARD_WIDTH as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Copy the grid as integer tags into `out`
    pub fn write_tags(&self, out: &mut TagGrid) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, tag) in row.iter_mut().enumerate() {
                *tag = cell_tag(self.cells[y * BOARD_WIDTH as usize + x]);
            }
        }
    }

    /// Grid as integer tags
    pub fn to_tags(&self) -> TagGrid {
        let mut out = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.write_tags(&mut out);
        out
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
