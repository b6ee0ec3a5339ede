use crate::types::{BOARD_SIZE, Cell, Position, Side};

const NUM_SQUARES: usize = (BOARD_SIZE * BOARD_SIZE) as usize;
const TOP_ROW: u16 = 0x000F;
const BOTTOM_ROW: u16 = 0xF000;

/// 4x4 board state represented by two bitboards, bit `i` = row-major cell `i`.
///
/// `Board` is `Copy` and every edit returns a new value, so a board handed to
/// the engine is never changed behind the caller's back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    red: u16,
    blue: u16,
}

impl Board {
    /// Creates the initial board: top row red, bottom row blue.
    pub fn new() -> Self {
        Self {
            red: TOP_ROW,
            blue: BOTTOM_ROW,
        }
    }

    /// Alias of [`Board::new`] for callers resetting a finished game.
    pub fn initial() -> Self {
        Self::new()
    }

    /// Builds a board from raw bitboards. Overlapping bits are resolved in
    /// favour of red.
    pub fn from_bitboards(red: u16, blue: u16) -> Self {
        Self {
            red,
            blue: blue & !red,
        }
    }

    pub fn empty() -> Self {
        Self { red: 0, blue: 0 }
    }

    pub fn cell_at(&self, pos: Position) -> Cell {
        let square = bit(pos.index());
        if (self.red & square) != 0 {
            Cell::Occupied(Side::Red)
        } else if (self.blue & square) != 0 {
            Cell::Occupied(Side::Blue)
        } else {
            Cell::Empty
        }
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        (self.occupied() & bit(pos.index())) == 0
    }

    pub fn piece_count(&self, side: Side) -> u8 {
        self.bits(side).count_ones() as u8
    }

    /// Returns `(red_count, blue_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.red.count_ones() as u8, self.blue.count_ones() as u8)
    }

    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - self.occupied().count_ones() as u8
    }

    /// Positions of `side`'s pieces in row-major order.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = Position> {
        let mut mask = self.bits(side);
        std::iter::from_fn(move || {
            if mask == 0 {
                return None;
            }
            let idx = mask.trailing_zeros() as usize;
            mask &= mask - 1;
            Some(Position::from_index(idx))
        })
    }

    /// Returns a copy with `pos` holding a `side` piece.
    pub fn with_piece(&self, pos: Position, side: Side) -> Self {
        let square = bit(pos.index());
        let mut next = self.without_piece(pos);
        match side {
            Side::Red => next.red |= square,
            Side::Blue => next.blue |= square,
        }
        next
    }

    /// Returns a copy with `pos` cleared.
    pub fn without_piece(&self, pos: Position) -> Self {
        let keep = !bit(pos.index());
        Self {
            red: self.red & keep,
            blue: self.blue & keep,
        }
    }

    /// Returns a copy with the piece on `from` moved to `to`. A no-op when
    /// `from` is empty.
    pub fn relocate(&self, from: Position, to: Position) -> Self {
        match self.cell_at(from) {
            Cell::Occupied(side) => self.without_piece(from).with_piece(to, side),
            Cell::Empty => *self,
        }
    }

    /// Converts board to `[u8; 16]` where 0=empty, 1=red, 2=blue.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (idx, cell) in board.iter_mut().enumerate() {
            *cell = match self.cell_at(Position::from_index(idx)) {
                Cell::Occupied(side) => side.code(),
                Cell::Empty => 0,
            };
        }
        board
    }

    fn bits(&self, side: Side) -> u16 {
        match side {
            Side::Red => self.red,
            Side::Blue => self.blue,
        }
    }

    fn occupied(&self) -> u16 {
        self.red | self.blue
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Board {
    /// Parses four rows of `R`, `B` and `.`, top row first.
    pub(crate) fn from_rows(rows: [&str; 4]) -> Self {
        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), BOARD_SIZE as usize, "row {row} must have 4 cells");
            for (col, ch) in line.chars().enumerate() {
                let pos = Position::new(row as u8, col as u8).unwrap();
                board = match ch {
                    'R' => board.with_piece(pos, Side::Red),
                    'B' => board.with_piece(pos, Side::Blue),
                    '.' => board,
                    other => panic!("unexpected cell character {other:?}"),
                };
            }
        }
        board
    }
}

fn bit(idx: usize) -> u16 {
    if idx < NUM_SQUARES { 1u16 << idx } else { 0 }
}
