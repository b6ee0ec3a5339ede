use thiserror::Error;

use crate::types::{Position, Side};

/// Errors raised at the rule-engine and session boundaries.
///
/// The pure queries (destinations, capture resolution, move selection) never
/// fail; only state-advancing calls and input parsing do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("row/col out of range: ({row}, {col})")]
    OutOfRange { row: u8, col: u8 },

    #[error("invalid move from {from} to {to}")]
    InvalidMove { from: Position, to: Position },

    #[error("game is already over")]
    GameOver,

    #[error("it is not {0}'s turn")]
    NotYourTurn(Side),

    #[error("{0} has no legal moves")]
    NoLegalMoves(Side),

    /// Both sides fell below two pieces on the same board. Unreachable through
    /// `apply_move`; indicates a corrupted board.
    #[error("both sides are below two pieces")]
    BothSidesEliminated,

    #[error("unknown game mode: '{0}'")]
    UnknownMode(String),

    #[error("unknown difficulty: '{0}'")]
    UnknownDifficulty(String),

    #[error("unknown side: '{0}'")]
    UnknownSide(String),
}
