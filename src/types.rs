use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const BOARD_SIZE: u8 = 4;

/// One of the two competing players. `Red` starts on the top row and moves
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Red, Side::Blue];

    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    /// Cell code used in `GameState::board`.
    pub fn code(self) -> u8 {
        match self {
            Side::Red => 1,
            Side::Blue => 2,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Red => "red",
            Side::Blue => "blue",
        })
    }
}

impl FromStr for Side {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Side::Red),
            "blue" => Ok(Side::Blue),
            other => Err(GameError::UnknownSide(other.to_string())),
        }
    }
}

/// A board coordinate. Always on the grid: the only constructor checks range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    row: u8,
    col: u8,
}

#[derive(Deserialize)]
struct RawPosition {
    row: u8,
    col: u8,
}

impl TryFrom<RawPosition> for Position {
    type Error = GameError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.row, raw.col)
    }
}

impl Position {
    pub fn new(row: u8, col: u8) -> Result<Self, GameError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(GameError::OutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    /// Inverse of [`Position::index`]. Callers pass `0..16`.
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < (BOARD_SIZE * BOARD_SIZE) as usize);
        Self {
            row: index as u8 / BOARD_SIZE,
            col: index as u8 % BOARD_SIZE,
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Row-major cell index in `0..16`.
    pub fn index(self) -> usize {
        (self.row * BOARD_SIZE + self.col) as usize
    }

    /// Orthogonal neighbours on the grid, in the order up, down, left, right.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        const STEPS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        STEPS.into_iter().filter_map(move |(dr, dc)| {
            let row = self.row as i8 + dr;
            let col = self.col as i8 + dc;
            if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
                Some(Position {
                    row: row as u8,
                    col: col as u8,
                })
            } else {
                None
            }
        })
    }

    pub fn is_adjacent(self, other: Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Contents of one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Side),
}

impl Cell {
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(side) => Some(side),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A one-step move of the piece at `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

/// AI strength. Configuration only; it never appears in board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(GameError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Whether the game is still running, and how it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "side", rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won(Side),
    /// The side to move has no legal moves while both sides still hold two
    /// or more pieces. Scored as a draw.
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// Entries of the session's event log, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    Started,
    Captured { side: Side, count: u8 },
    Won { side: Side },
    Stalemate { side: Side },
    Reset,
    OpponentReset,
    PlayerJoined,
}

/// Outcome of one applied move, as reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    #[serde(rename = "move")]
    pub mv: Move,
    pub mover: Side,
    pub captured: Vec<Position>,
    pub status: GameStatus,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// 16 cells, row-major: 0=empty, 1=red, 2=blue.
    pub board: Vec<u8>,
    pub turn: Side,
    pub red_count: u8,
    pub blue_count: u8,
    pub status: GameStatus,
    pub winner: Option<Side>,
    pub last_move: Option<Move>,
    /// Positions removed by the last move; empty after a reset.
    pub captured: Vec<Position>,
    pub log: Vec<GameEvent>,
    pub online_count: Option<u32>,
}
