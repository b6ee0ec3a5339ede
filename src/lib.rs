//! Rule engine and computer opponent for a two-player flanking game on a
//! 4x4 board.
//!
//! Each side starts with a full home row. A piece steps one square
//! orthogonally into an empty square; two of a side's pieces in a line with
//! an enemy piece at the end capture it, provided the piece that just moved
//! is part of the pattern and the line is not full. A side left with fewer
//! than two pieces loses.
//!
//! - [`board`]: immutable bitboard value
//! - [`rules`]: destinations, captures, victory and [`rules::apply_move`]
//! - [`ai`]: random, greedy and minimax move selection
//! - [`game`]: turn-keeping session for local, bot and online play
//! - [`protocol`]: relay messages exchanged between online peers
//! - [`wasm`]: JavaScript bindings

use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod protocol;
pub mod rules;
pub mod types;
pub mod wasm;

pub use ai::{AiEngine, select_move};
pub use board::Board;
pub use error::GameError;
pub use game::{GameMode, GameSession, MoveSelector};
pub use rules::{CaptureOutcome, MoveOutcome, apply_move, legal_destinations, resolve_captures, winner};
pub use types::{Cell, Difficulty, GameStatus, Move, Position, Side};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
