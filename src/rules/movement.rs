//! Movement rules: one orthogonal step into an empty square.

use crate::board::Board;
use crate::types::{Move, Position, Side};

/// Empty orthogonal neighbours of `pos`, in the order up, down, left, right.
///
/// Does not look at who owns `pos`; an empty or enemy square gets the same
/// answer. Illegal destinations are simply absent.
pub fn legal_destinations(board: &Board, pos: Position) -> Vec<Position> {
    pos.neighbors().filter(|&n| board.is_empty_at(n)).collect()
}

/// Every legal move for `side`: own pieces in row-major order, each crossed
/// with its destinations.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    board
        .pieces(side)
        .flat_map(|from| {
            legal_destinations(board, from)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

/// Number of legal moves for `side`, without allocating.
pub fn mobility(board: &Board, side: Side) -> usize {
    board
        .pieces(side)
        .map(|from| from.neighbors().filter(|&n| board.is_empty_at(n)).count())
        .sum()
}

pub fn has_legal_move(board: &Board, side: Side) -> bool {
    board
        .pieces(side)
        .any(|from| from.neighbors().any(|n| board.is_empty_at(n)))
}
