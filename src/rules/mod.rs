//! Game rules for the 4x4 flanking game.
//!
//! - [`movement`]: one orthogonal step into an empty square
//! - [`capture`]: two-against-one flank along a row or column
//! - [`win`]: a side below two pieces has lost
//!
//! [`apply_move`] composes the three and is the only way game state advances.

pub mod capture;
pub mod movement;
pub mod win;

pub use capture::{CaptureOutcome, capture_count, resolve_captures};
pub use movement::{has_legal_move, legal_destinations, legal_moves, mobility};
pub use win::{MIN_PIECES, is_eliminated, winner};

use crate::board::Board;
use crate::error::GameError;
use crate::types::{Cell, Move, Position, Side};

/// Result of [`apply_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    pub captured: Vec<Position>,
    pub winner: Option<Side>,
}

/// Checks that `mv` moves a `mover` piece one step into an empty square.
pub fn validate_move(board: &Board, mv: Move, mover: Side) -> Result<(), GameError> {
    let owned = board.cell_at(mv.from) == Cell::Occupied(mover);
    if !owned || !mv.from.is_adjacent(mv.to) || !board.is_empty_at(mv.to) {
        return Err(GameError::InvalidMove {
            from: mv.from,
            to: mv.to,
        });
    }
    Ok(())
}

/// Moves the piece and resolves captures, skipping validation and win
/// detection. Search uses this on moves it generated itself.
pub fn simulate(board: &Board, mv: Move, mover: Side) -> CaptureOutcome {
    resolve_captures(&board.relocate(mv.from, mv.to), mv.to, mover)
}

/// Validates and applies `mv` for `mover`: relocate, capture, detect victory.
pub fn apply_move(board: &Board, mv: Move, mover: Side) -> Result<MoveOutcome, GameError> {
    validate_move(board, mv, mover)?;

    let CaptureOutcome { board, captured } = simulate(board, mv, mover);
    let winner = winner(&board)?;

    Ok(MoveOutcome {
        board,
        captured,
        winner,
    })
}
