//! Victory: a side reduced to fewer than two pieces has lost.

use crate::board::Board;
use crate::error::GameError;
use crate::types::Side;

/// Fewer pieces than this and a side can no longer form a flank.
pub const MIN_PIECES: u8 = 2;

/// Returns the winning side, if any.
///
/// Both sides below [`MIN_PIECES`] at once cannot arise from legal play and is
/// reported as [`GameError::BothSidesEliminated`].
pub fn winner(board: &Board) -> Result<Option<Side>, GameError> {
    let (red, blue) = board.count();
    match (red < MIN_PIECES, blue < MIN_PIECES) {
        (true, true) => Err(GameError::BothSidesEliminated),
        (true, false) => Ok(Some(Side::Blue)),
        (false, true) => Ok(Some(Side::Red)),
        (false, false) => Ok(None),
    }
}

/// True when `side` has been reduced below [`MIN_PIECES`].
pub fn is_eliminated(board: &Board, side: Side) -> bool {
    board.piece_count(side) < MIN_PIECES
}
