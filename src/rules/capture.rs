//! Flanking capture: two of the mover's pieces in a row pin one enemy piece
//! at the end of a three-square window.
//!
//! Only the row and the column through the square the mover landed on are
//! inspected, and only windows containing that square count. A completely
//! occupied line never yields a capture.

use tracing::debug;

use crate::board::Board;
use crate::types::{BOARD_SIZE, Cell, Position, Side};

const LINE_LEN: usize = BOARD_SIZE as usize;
const WINDOW: usize = 3;

/// One row or column, as positions in ascending order.
type Line = [Position; LINE_LEN];

/// Board after captures, plus the captured squares in discovery order
/// (row scan before column scan, ascending within each scan).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOutcome {
    pub board: Board,
    pub captured: Vec<Position>,
}

/// Applies every capture formed by `mover` landing on `moved_to`.
///
/// Assumes `moved_to` holds a `mover` piece. The input board is untouched.
pub fn resolve_captures(board: &Board, moved_to: Position, mover: Side) -> CaptureOutcome {
    let enemy = Cell::Occupied(mover.opponent());
    let mut next = *board;
    let mut captured = Vec::new();

    for line in [row_line(moved_to.row()), col_line(moved_to.col())] {
        for victim in line_victims(&next, &line, moved_to, mover) {
            if next.cell_at(victim) == enemy {
                next = next.without_piece(victim);
                captured.push(victim);
            }
        }
    }

    if !captured.is_empty() {
        debug!(%mover, %moved_to, count = captured.len(), "captured pieces");
    }

    CaptureOutcome {
        board: next,
        captured,
    }
}

/// Would `mover` landing on `moved_to` capture anything? Same rules as
/// [`resolve_captures`] without building the result.
pub fn capture_count(board: &Board, moved_to: Position, mover: Side) -> usize {
    [row_line(moved_to.row()), col_line(moved_to.col())]
        .iter()
        .map(|line| line_victims(board, line, moved_to, mover).len())
        .sum()
}

fn line_victims(board: &Board, line: &Line, moved_to: Position, mover: Side) -> Vec<Position> {
    let cells = line.map(|pos| board.cell_at(pos));
    if cells.iter().all(|cell| !cell.is_empty()) {
        return Vec::new();
    }

    let own = Cell::Occupied(mover);
    let enemy = Cell::Occupied(mover.opponent());
    let mut victims = Vec::new();

    for start in 0..=LINE_LEN - WINDOW {
        let window = &line[start..start + WINDOW];
        if !window.contains(&moved_to) {
            continue;
        }

        match (cells[start], cells[start + 1], cells[start + 2]) {
            (a, b, c) if a == own && b == own && c == enemy => victims.push(window[2]),
            (a, b, c) if a == enemy && b == own && c == own => victims.push(window[0]),
            _ => {}
        }
    }

    victims
}

fn row_line(row: u8) -> Line {
    line_from(|i| row * BOARD_SIZE + i)
}

fn col_line(col: u8) -> Line {
    line_from(|i| i * BOARD_SIZE + col)
}

fn line_from(index_of: impl Fn(u8) -> u8) -> Line {
    [0, 1, 2, 3].map(|i| Position::from_index(index_of(i) as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn own_own_enemy_removes_third_cell() {
        // Red stepped from (0,1) into (1,1), forming R R B on row 1.
        let board = Board::from_rows(["....", "RRB.", "....", "...."]);

        let outcome = resolve_captures(&board, pos(1, 1), Side::Red);

        assert_eq!(outcome.captured, vec![pos(1, 2)]);
        assert_eq!(outcome.board.cell_at(pos(1, 2)), Cell::Empty);
        assert_eq!(outcome.board.count(), (2, 0));
    }

    #[test]
    fn enemy_own_own_removes_first_cell() {
        let board = Board::from_rows(["....", ".BRR", "....", "...."]);

        let outcome = resolve_captures(&board, pos(1, 2), Side::Red);

        assert_eq!(outcome.captured, vec![pos(1, 1)]);
    }

    #[test]
    fn safe_approach_captures_nothing() {
        // Red moves next to an existing blue pair: B B R is not a pattern.
        let board = Board::from_rows(["....", "BBR.", "....", "...."]);

        let outcome = resolve_captures(&board, pos(1, 2), Side::Red);

        assert!(outcome.captured.is_empty());
        assert_eq!(outcome.board, board);
    }

    #[test]
    fn pattern_without_the_moved_piece_is_ignored() {
        // R R B sits on row 1 but the piece that moved is on row 2.
        let board = Board::from_rows(["....", "RRB.", "....", "...."]);
        let board = board.with_piece(pos(2, 3), Side::Red);

        let outcome = resolve_captures(&board, pos(2, 3), Side::Red);

        assert!(outcome.captured.is_empty());
    }

    #[test]
    fn full_row_is_immune_while_column_capture_still_applies() {
        // Red steps down from (0,2) into the last gap of row 1, which becomes
        // R R R B. Column 2 becomes . R R B.
        let before = Board::from_rows(["..R.", "RR.B", "..R.", "..B."]);
        let board = before.relocate(pos(0, 2), pos(1, 2));

        let outcome = resolve_captures(&board, pos(1, 2), Side::Red);

        assert_eq!(outcome.captured, vec![pos(3, 2)]);
        assert_eq!(outcome.board.cell_at(pos(1, 3)), Cell::Occupied(Side::Blue));
    }

    #[test]
    fn full_row_alone_yields_no_capture() {
        let board = Board::from_rows(["....", "RRRB", "....", "...."]);

        let outcome = resolve_captures(&board, pos(1, 1), Side::Red);

        assert!(outcome.captured.is_empty());
    }

    #[test]
    fn row_and_column_captures_are_both_applied_row_first() {
        // Red lands on (1,1): both its row and its column read B R R .
        let board = Board::from_rows([".B..", "BRR.", ".R..", "...."]);

        let outcome = resolve_captures(&board, pos(1, 1), Side::Red);

        assert_eq!(outcome.captured, vec![pos(1, 0), pos(0, 1)]);
        assert_eq!(outcome.board.piece_count(Side::Blue), 0);
        assert_eq!(capture_count(&board, pos(1, 1), Side::Red), 2);
    }

    #[test]
    fn blue_captures_symmetrically() {
        let board = Board::from_rows(["R...", "B...", "B...", "...."]);

        let outcome = resolve_captures(&board, pos(1, 0), Side::Blue);

        assert_eq!(outcome.captured, vec![pos(0, 0)]);
    }

    #[test]
    fn resolve_captures_is_pure() {
        let board = Board::from_rows(["....", "RRB.", "....", "...."]);

        let first = resolve_captures(&board, pos(1, 1), Side::Red);
        let second = resolve_captures(&board, pos(1, 1), Side::Red);

        assert_eq!(first, second);
        assert_eq!(board, Board::from_rows(["....", "RRB.", "....", "...."]));
    }
}
