use tracing::debug;
use web_time::Instant;

use crate::board::Board;
use crate::rules::{is_eliminated, legal_moves, mobility, simulate};
use crate::types::{Move, Side};

/// Plies searched by the hard opponent.
pub const SEARCH_DEPTH: u8 = 4;
/// Base score of a decided game; remaining depth is added so faster wins
/// (and slower losses) are preferred.
pub const WIN_SCORE: i32 = 1000;
/// Score of a node whose side to move is blockaded.
pub const DRAW_SCORE: i32 = 0;

const PIECE_WEIGHT: i32 = 20;
const MOBILITY_WEIGHT: i32 = 1;
const MIN_SCORE: i32 = i32::MIN;
const MAX_SCORE: i32 = i32::MAX;

/// Counters collected during one [`Searcher::search`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Fixed-depth minimax with alpha-beta pruning, scored from `side`'s point of
/// view.
pub struct Searcher {
    side: Side,
    max_depth: u8,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(side: Side, max_depth: u8) -> Self {
        Self {
            side,
            max_depth: max_depth.max(1),
            stats: SearchStats::default(),
        }
    }

    /// Searches the best move for `side`. Returns `None` only when `side` has
    /// no legal move; otherwise falls back to the first enumerated move.
    pub fn search(&mut self, board: &Board) -> Option<Move> {
        let start_time = Instant::now();
        self.stats = SearchStats::default();

        let moves = legal_moves(board, self.side);
        let mut best_move = *moves.first()?;
        if moves.len() == 1 {
            return Some(best_move);
        }

        let mut best_score = MIN_SCORE;
        let mut alpha = MIN_SCORE;

        for mv in moves {
            let child = simulate(board, mv, self.side).board;
            let score = self.minimax(&child, self.max_depth - 1, false, alpha, MAX_SCORE);
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            alpha = alpha.max(score);
        }

        debug!(
            side = %self.side,
            nodes = self.stats.nodes,
            cutoffs = self.stats.cutoffs,
            score = best_score,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "search finished"
        );

        Some(best_move)
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.stats.nodes += 1;

        let opponent = self.side.opponent();
        if is_eliminated(board, opponent) {
            return WIN_SCORE + depth as i32;
        }
        if is_eliminated(board, self.side) {
            return -WIN_SCORE - depth as i32;
        }
        if depth == 0 {
            return evaluate(board, self.side);
        }

        let to_move = if maximizing { self.side } else { opponent };
        let moves = legal_moves(board, to_move);
        if moves.is_empty() {
            return DRAW_SCORE;
        }

        if maximizing {
            let mut best = MIN_SCORE;
            for mv in moves {
                let child = simulate(board, mv, to_move).board;
                let score = self.minimax(&child, depth - 1, false, alpha, beta);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        } else {
            let mut best = MAX_SCORE;
            for mv in moves {
                let child = simulate(board, mv, to_move).board;
                let score = self.minimax(&child, depth - 1, true, alpha, beta);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        }
    }
}

/// Static evaluation from `side`'s point of view: material first, mobility as
/// a tie-breaker.
pub fn evaluate(board: &Board, side: Side) -> i32 {
    let opponent = side.opponent();
    let material = board.piece_count(side) as i32 - board.piece_count(opponent) as i32;
    let freedom = mobility(board, side) as i32 - mobility(board, opponent) as i32;
    PIECE_WEIGHT * material + MOBILITY_WEIGHT * freedom
}
