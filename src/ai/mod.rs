//! Computer opponent.
//!
//! Three strengths share one move list: every legal move of the side to
//! play, own pieces in row-major order crossed with their destinations.
//!
//! - easy: uniform random move
//! - medium: greedy, maximises pieces captured this turn
//! - hard: [`search::Searcher`], minimax to [`SEARCH_DEPTH`] plies

pub mod search;

pub use search::{DRAW_SCORE, SEARCH_DEPTH, SearchStats, Searcher, WIN_SCORE, evaluate};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::instrument;

use crate::board::Board;
use crate::rules::{capture_count, legal_moves};
use crate::types::{Difficulty, Move, Side};

/// Score per piece captured, used by the greedy strategy.
const CAPTURE_SCORE: i32 = 10;

/// Picks a move for `side` at the given difficulty.
///
/// Returns `None` when `side` has no legal move (a blockade); the caller
/// reports that as a stalemate.
#[instrument(level = "debug", skip(board, rng))]
pub fn select_move(
    board: &Board,
    side: Side,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Option<Move> {
    let moves = legal_moves(board, side);
    if moves.is_empty() {
        return None;
    }

    match difficulty {
        Difficulty::Easy => random_move(&moves, rng),
        Difficulty::Medium => greedy_move(board, side, &moves, rng),
        Difficulty::Hard => Searcher::new(side, SEARCH_DEPTH).search(board),
    }
}

/// Uniformly random element of `moves`.
pub fn random_move(moves: &[Move], rng: &mut impl Rng) -> Option<Move> {
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.gen_range(0..moves.len())])
}

/// Highest-capturing move; equally scored moves are chosen between at random.
pub fn greedy_move(board: &Board, side: Side, moves: &[Move], rng: &mut impl Rng) -> Option<Move> {
    let scored: Vec<(Move, i32)> = moves
        .iter()
        .map(|&mv| (mv, greedy_score(board, side, mv)))
        .collect();
    let best_score = scored.iter().map(|&(_, score)| score).max()?;
    let best: Vec<Move> = scored
        .into_iter()
        .filter(|&(_, score)| score == best_score)
        .map(|(mv, _)| mv)
        .collect();

    random_move(&best, rng)
}

fn greedy_score(board: &Board, side: Side, mv: Move) -> i32 {
    let landed = board.relocate(mv.from, mv.to);
    CAPTURE_SCORE * capture_count(&landed, mv.to, side) as i32
}

/// Seeded move selector holding its own RNG.
#[derive(Debug, Clone)]
pub struct AiEngine {
    rng: SmallRng,
}

impl AiEngine {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: SmallRng) -> Self {
        Self { rng }
    }

    pub fn select_move(&mut self, board: &Board, side: Side, difficulty: Difficulty) -> Option<Move> {
        select_move(board, side, difficulty, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::simulate;
    use crate::types::Position;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn seeded_rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    #[test]
    fn easy_always_returns_an_enumerated_legal_move() {
        let boards = [
            Board::new(),
            Board::from_rows(["R.R.", ".B..", "..R.", "B..B"]),
            Board::from_rows(["BB..", "RR..", "....", "...."]),
        ];

        for board in boards {
            let legal = legal_moves(&board, Side::Blue);
            for seed in 0..32 {
                let mv = select_move(&board, Side::Blue, Difficulty::Easy, &mut seeded_rng(seed)).unwrap();
                assert!(legal.contains(&mv), "{mv:?} not legal on {board:?}");
            }
        }
    }

    #[test]
    fn easy_eventually_explores_more_than_one_move() {
        let mut rng = seeded_rng(7);
        let picks: std::collections::HashSet<Move> = (0..64)
            .filter_map(|_| select_move(&Board::new(), Side::Red, Difficulty::Easy, &mut rng))
            .collect();

        assert!(picks.len() > 1);
    }

    #[test]
    fn medium_takes_the_capturing_move() {
        let board = Board::from_rows([".R..", "R...", "B...", "...B"]);

        for seed in 0..8 {
            let mv = select_move(&board, Side::Red, Difficulty::Medium, &mut seeded_rng(seed));
            assert_eq!(mv, Some(Move::new(pos(0, 1), pos(0, 0))));
        }
    }

    #[test]
    fn medium_prefers_double_capture_over_single() {
        // (1,3) -> (1,2) flanks (1,0) along row 1 and (0,2) down column 2.
        let board = Board::from_rows(["..B.", "BR.R", "..R.", "...."]);
        let double = Move::new(pos(1, 3), pos(1, 2));

        assert_eq!(greedy_score(&board, Side::Red, double), 2 * CAPTURE_SCORE);
        let best = select_move(&board, Side::Red, Difficulty::Medium, &mut seeded_rng(1)).unwrap();

        assert_eq!(best, double);
        assert_eq!(simulate(&board, best, Side::Red).captured.len(), 2);
    }

    #[test]
    fn medium_breaks_ties_among_equal_scores_only() {
        let board = Board::new();
        let legal = legal_moves(&board, Side::Red);

        for seed in 0..16 {
            let mv = select_move(&board, Side::Red, Difficulty::Medium, &mut seeded_rng(seed)).unwrap();
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn every_difficulty_reports_blockade_as_no_move() {
        let board = Board::from_rows(["RBBR", "B..B", "....", "...."]);

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(select_move(&board, Side::Red, difficulty, &mut seeded_rng(0)), None);
        }
    }

    #[test]
    fn engine_with_same_seed_repeats_its_choices() {
        let board = Board::new();
        let mut first = AiEngine::new(42);
        let mut second = AiEngine::new(42);

        for _ in 0..8 {
            assert_eq!(
                first.select_move(&board, Side::Blue, Difficulty::Easy),
                second.select_move(&board, Side::Blue, Difficulty::Easy)
            );
        }
    }

    #[test]
    fn hard_returns_a_legal_move_from_the_start() {
        let board = Board::new();
        let mv = select_move(&board, Side::Blue, Difficulty::Hard, &mut seeded_rng(0)).unwrap();

        assert!(legal_moves(&board, Side::Blue).contains(&mv));
    }
}
