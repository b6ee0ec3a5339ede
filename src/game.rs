use std::collections::VecDeque;
use std::str::FromStr;

use tracing::{info, warn};

use crate::ai::AiEngine;
use crate::board::Board;
use crate::error::GameError;
use crate::protocol::NetworkMessage;
use crate::rules::{apply_move, has_legal_move, legal_destinations, legal_moves};
use crate::types::{
    Cell, Difficulty, GameEvent, GameState, GameStatus, Move, MoveReport, Position, Side,
};

/// Side the computer plays in [`GameMode::Bot`].
pub const BOT_SIDE: Side = Side::Blue;
const LOG_CAPACITY: usize = 5;

pub trait MoveSelector: Send {
    fn select_move(&mut self, board: &Board, side: Side, difficulty: Difficulty) -> Option<Move>;
}

impl MoveSelector for AiEngine {
    fn select_move(&mut self, board: &Board, side: Side, difficulty: Difficulty) -> Option<Move> {
        AiEngine::select_move(self, board, side, difficulty)
    }
}

/// Plays the first enumerated legal move regardless of difficulty.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&mut self, board: &Board, side: Side, _difficulty: Difficulty) -> Option<Move> {
        legal_moves(board, side).first().copied()
    }
}

/// Who this client controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Both sides on one device.
    Local,
    /// Human plays red against the engine.
    Bot,
    /// Only the given side; the other arrives over the relay.
    Online(Side),
}

impl GameMode {
    /// Parses `"local"`, `"bot"` or `"online"`; online needs `local_side`.
    pub fn parse(mode: &str, local_side: Option<&str>) -> Result<Self, GameError> {
        match (mode, local_side) {
            ("local", _) => Ok(GameMode::Local),
            ("bot", _) => Ok(GameMode::Bot),
            ("online", Some(side)) => Ok(GameMode::Online(Side::from_str(side)?)),
            (other, _) => Err(GameError::UnknownMode(other.to_string())),
        }
    }

    pub fn controls(self, side: Side) -> bool {
        match self {
            GameMode::Local => true,
            GameMode::Bot => side != BOT_SIDE,
            GameMode::Online(local) => side == local,
        }
    }
}

pub struct GameSession {
    board: Board,
    turn: Side,
    status: GameStatus,
    mode: GameMode,
    difficulty: Difficulty,
    last_move: Option<Move>,
    captured: Vec<Position>,
    log: VecDeque<GameEvent>,
    online_count: Option<u32>,
    selector: Box<dyn MoveSelector>,
}

impl GameSession {
    pub fn new(mode: GameMode, difficulty: Difficulty, selector: Box<dyn MoveSelector>) -> Self {
        let mut session = Self {
            board: Board::initial(),
            turn: Side::Red,
            status: GameStatus::InProgress,
            mode,
            difficulty,
            last_move: None,
            captured: Vec::new(),
            log: VecDeque::with_capacity(LOG_CAPACITY),
            online_count: None,
            selector,
        };
        session.record(GameEvent::Started);
        session
    }

    pub fn with_engine(mode: GameMode, difficulty: Difficulty, seed: u64) -> Self {
        Self::new(mode, difficulty, Box::new(AiEngine::new(seed)))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Destinations to highlight for the piece on `pos`. Empty unless the game
    /// is running, the piece belongs to the side to move and this client
    /// controls that side.
    pub fn destinations_for(&self, pos: Position) -> Vec<Position> {
        let selectable = !self.status.is_over()
            && self.mode.controls(self.turn)
            && self.board.cell_at(pos) == Cell::Occupied(self.turn);
        if selectable {
            legal_destinations(&self.board, pos)
        } else {
            Vec::new()
        }
    }

    /// Plays a move entered on this client.
    pub fn play(&mut self, mv: Move) -> Result<MoveReport, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        if !self.mode.controls(self.turn) {
            return Err(GameError::NotYourTurn(self.turn));
        }
        self.advance(mv)
    }

    /// Applies a move relayed from the other peer. Echoes of this client's own
    /// moves are ignored.
    pub fn apply_remote(
        &mut self,
        mv: Move,
        sender: Option<Side>,
    ) -> Result<Option<MoveReport>, GameError> {
        if let (GameMode::Online(local), Some(sender)) = (self.mode, sender)
            && sender == local
        {
            return Ok(None);
        }
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        if let Some(sender) = sender
            && sender != self.turn
        {
            return Err(GameError::NotYourTurn(sender));
        }
        self.advance(mv).map(Some)
    }

    /// Lets the engine play the bot's turn.
    pub fn ai_move(&mut self) -> Result<MoveReport, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        if self.mode != GameMode::Bot || self.turn != BOT_SIDE {
            return Err(GameError::NotYourTurn(BOT_SIDE));
        }

        let selected = self
            .selector
            .select_move(&self.board, self.turn, self.difficulty)
            .ok_or(GameError::NoLegalMoves(self.turn))?;

        self.advance(selected)
    }

    pub fn reset(&mut self) {
        self.restart(GameEvent::Reset);
    }

    /// Dispatches one relay message. Returns the report when it carried a
    /// move that was applied.
    pub fn handle_message(&mut self, msg: NetworkMessage) -> Result<Option<MoveReport>, GameError> {
        match msg {
            NetworkMessage::Move { payload, sender } => self.apply_remote(payload.to_move()?, sender),
            NetworkMessage::Reset => {
                self.restart(GameEvent::OpponentReset);
                Ok(None)
            }
            NetworkMessage::Join => {
                self.restart(GameEvent::PlayerJoined);
                Ok(None)
            }
            NetworkMessage::OnlineCount { payload } => {
                if payload.is_some() {
                    self.online_count = payload;
                }
                Ok(None)
            }
            NetworkMessage::Sync
            | NetworkMessage::Emoji
            | NetworkMessage::PlayerLeft
            | NetworkMessage::Unknown => Ok(None),
        }
    }

    pub fn to_game_state(&self) -> GameState {
        let (red_count, blue_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            turn: self.turn,
            red_count,
            blue_count,
            status: self.status,
            winner: match self.status {
                GameStatus::Won(side) => Some(side),
                _ => None,
            },
            last_move: self.last_move,
            captured: self.captured.clone(),
            log: self.log.iter().cloned().collect(),
            online_count: self.online_count,
        }
    }

    fn advance(&mut self, mv: Move) -> Result<MoveReport, GameError> {
        let mover = self.turn;
        let outcome = apply_move(&self.board, mv, mover).inspect_err(|err| {
            warn!(%mover, from = %mv.from, to = %mv.to, %err, "move rejected");
        })?;

        self.board = outcome.board;
        self.last_move = Some(mv);
        self.captured = outcome.captured;

        if !self.captured.is_empty() {
            self.record(GameEvent::Captured {
                side: mover,
                count: self.captured.len() as u8,
            });
        }

        if let Some(winner) = outcome.winner {
            self.status = GameStatus::Won(winner);
            self.record(GameEvent::Won { side: winner });
            info!(%winner, "game over");
        } else {
            self.turn = mover.opponent();
            if !has_legal_move(&self.board, self.turn) {
                self.status = GameStatus::Stalemate;
                self.record(GameEvent::Stalemate { side: self.turn });
                info!(side = %self.turn, "stalemate: side to move is blockaded");
            }
        }

        Ok(MoveReport {
            mv,
            mover,
            captured: self.captured.clone(),
            status: self.status,
        })
    }

    fn restart(&mut self, event: GameEvent) {
        self.board = Board::initial();
        self.turn = Side::Red;
        self.status = GameStatus::InProgress;
        self.last_move = None;
        self.captured.clear();
        self.log.clear();
        info!(?event, "game restarted");
        self.record(event);
    }

    fn record(&mut self, event: GameEvent) {
        self.log.push_front(event);
        self.log.truncate(LOG_CAPACITY);
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, turn: Side) {
        self.board = board;
        self.turn = turn;
        self.status = GameStatus::InProgress;
        self.last_move = None;
        self.captured.clear();
    }
}
