//! Minimax search with alpha-beta pruning
//!
//! This module implements the decision core of the Amazons engine: a
//! depth-limited minimax over full (slide, arrow) moves with alpha-beta
//! pruning and heuristic move ordering.
//!
//! # Features
//!
//! - Children ordered by static evaluation before recursing, so the
//!   likely-best move is searched first and the window tightens early
//! - Wall-clock time budget checked at every node entry; an exhausted
//!   budget truncates the node to its static evaluation
//! - Pure recursion over immutable board snapshots: sibling branches
//!   never share state
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use amazons::board::{Board, Player};
//! use amazons::search::Searcher;
//!
//! let mut searcher = Searcher::new(Duration::from_millis(200));
//! let board = Board::new();
//!
//! // Shallow search for a fast example
//! let result = searcher.search(&board, Player::White, 1);
//! if let Some(best_move) = result.best_move {
//!     println!("Best move: {best_move}");
//! }
//! ```

use std::time::{Duration, Instant};

use crate::board::{Board, Player};
use crate::eval::{evaluate, Weight};
use crate::movegen::{apply_move_unchecked, has_any_legal_move, legal_moves, Move};

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found. Absent only when no child of the root was scored:
    /// the root is a terminal position (either side is out of moves), or
    /// the time budget was already spent on entry.
    pub best_move: Option<Move>,
    /// Minimax score of the position, from the maximizer's perspective
    pub score: i32,
    /// Total nodes visited
    pub nodes: u64,
}

/// Minimax searcher with alpha-beta pruning.
///
/// One `search` call performs a blocking depth-first traversal. The
/// searcher holds no position state between calls; it only carries the
/// time budget and per-search bookkeeping, so separate instances can
/// analyze different positions concurrently.
pub struct Searcher {
    /// Maximizing player for the current search
    player: Player,
    /// Wall-clock budget for one `search` call
    time_limit: Duration,
    /// Start of the current search
    start: Instant,
    nodes: u64,
}

impl Searcher {
    /// Create a searcher with the given per-search time budget.
    #[must_use]
    pub fn new(time_limit: Duration) -> Self {
        Self {
            player: Player::Black,
            time_limit,
            start: Instant::now(),
            nodes: 0,
        }
    }

    /// Search for the best move for `player`, looking `depth` plies ahead.
    ///
    /// The root is always a maximizing node for `player`; the time budget
    /// starts counting when this is called.
    ///
    /// # Arguments
    ///
    /// * `board` - Position to search from
    /// * `player` - The maximizing player
    /// * `depth` - Maximum search depth in plies
    ///
    /// # Returns
    ///
    /// `SearchResult` with the best move (if any child was scored), the
    /// backed-up score, and the node count.
    #[must_use]
    pub fn search(&mut self, board: &Board, player: Player, depth: i8) -> SearchResult {
        self.player = player;
        self.start = Instant::now();
        self.nodes = 0;

        let (score, best_move) = self.minimax(board, depth, true, -Weight::WIN, Weight::WIN);

        SearchResult {
            best_move,
            score,
            nodes: self.nodes,
        }
    }

    /// Recursive minimax with alpha-beta pruning.
    ///
    /// Each call is one node, identified by (board, depth, maximizing,
    /// alpha, beta). Returns the backed-up score and the best move at
    /// this node, or no move when the node was scored statically.
    fn minimax(
        &mut self,
        board: &Board,
        depth: i8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> (i32, Option<Move>) {
        self.nodes += 1;

        // Time cutoff: past the budget every node collapses to its static
        // evaluation, whatever its depth. Truncation depends on wall-clock
        // timing, which makes results under time pressure vary run to run.
        if self.start.elapsed() >= self.time_limit {
            return (evaluate(board, self.player), None);
        }

        // Base cases: depth exhausted, or the game is over here because
        // either side has no legal move.
        if depth <= 0
            || !has_any_legal_move(board, self.player)
            || !has_any_legal_move(board, self.player.opponent())
        {
            return (evaluate(board, self.player), None);
        }

        let mover = if maximizing {
            self.player
        } else {
            self.player.opponent()
        };
        let children = self.ordered_children(board, mover, maximizing);

        if maximizing {
            let mut best: Option<(i32, Move)> = None;
            for (mv, child) in children {
                let (score, _) = self.minimax(&child, depth - 1, false, alpha, beta);
                if best.map_or(true, |(best_score, _)| score > best_score) {
                    best = Some((score, mv));
                }
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            match best {
                Some((score, mv)) => (score, Some(mv)),
                None => (evaluate(board, self.player), None),
            }
        } else {
            let mut worst: Option<(i32, Move)> = None;
            for (mv, child) in children {
                let (score, _) = self.minimax(&child, depth - 1, true, alpha, beta);
                if worst.map_or(true, |(worst_score, _)| score < worst_score) {
                    worst = Some((score, mv));
                }
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            match worst {
                Some((score, mv)) => (score, Some(mv)),
                None => (evaluate(board, self.player), None),
            }
        }
    }

    /// Expand a node's children, ordered for pruning.
    ///
    /// Applies every legal move of `mover` once and sorts the successors
    /// by static evaluation: descending when the mover maximizes,
    /// ascending when it minimizes. Trying the heuristically best child
    /// first is what makes the alpha-beta window cut early; the ordering
    /// key is the static heuristic, not a recursive result.
    fn ordered_children(
        &self,
        board: &Board,
        mover: Player,
        maximizing: bool,
    ) -> Vec<(Move, Board)> {
        let mut scored: Vec<(Move, Board, i32)> = legal_moves(board, mover)
            .into_iter()
            .map(|mv| {
                let child = apply_move_unchecked(board, mv);
                let score = evaluate(&child, self.player);
                (mv, child, score)
            })
            .collect();

        if maximizing {
            scored.sort_unstable_by(|a, b| b.2.cmp(&a.2));
        } else {
            scored.sort_unstable_by(|a, b| a.2.cmp(&b.2));
        }

        scored.into_iter().map(|(mv, child, _)| (mv, child)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Pos};

    /// Generous budget so tests never hit the wall-clock cutoff.
    const NO_PRESSURE: Duration = Duration::from_secs(600);

    /// A small closed arena: two pieces each in a 4x4 corner, the rest of
    /// the board walled off. Keeps full-width search cheap.
    fn small_arena() -> Board {
        let mut board = Board::empty();
        for row in 0..4u8 {
            board.set(Pos::new(row, 4), Cell::Blocked);
        }
        for col in 0..5u8 {
            board.set(Pos::new(4, col), Cell::Blocked);
        }
        board.set(Pos::new(0, 0), Cell::Occupied(Player::Black));
        board.set(Pos::new(0, 3), Cell::Occupied(Player::Black));
        board.set(Pos::new(3, 0), Cell::Occupied(Player::White));
        board.set(Pos::new(3, 3), Cell::Occupied(Player::White));
        board
    }

    /// Plain full-width minimax with no pruning, for equivalence checks.
    fn minimax_unpruned(board: &Board, player: Player, depth: i8, maximizing: bool) -> i32 {
        if depth <= 0
            || !has_any_legal_move(board, player)
            || !has_any_legal_move(board, player.opponent())
        {
            return evaluate(board, player);
        }

        let mover = if maximizing { player } else { player.opponent() };
        let scores = legal_moves(board, mover).into_iter().map(|mv| {
            let child = apply_move_unchecked(board, mv);
            minimax_unpruned(&child, player, depth - 1, !maximizing)
        });

        if maximizing {
            scores.max().unwrap_or_else(|| evaluate(board, player))
        } else {
            scores.min().unwrap_or_else(|| evaluate(board, player))
        }
    }

    #[test]
    fn test_search_returns_legal_move() {
        let board = small_arena();
        let mut searcher = Searcher::new(NO_PRESSURE);
        let result = searcher.search(&board, Player::White, 2);

        let mv = result.best_move.expect("open position must yield a move");
        assert!(legal_moves(&board, Player::White).contains(&mv));
        assert!(result.nodes > 1);
    }

    #[test]
    fn test_pruning_preserves_minimax_value() {
        // Alpha-beta must change the work done, never the value computed.
        let board = small_arena();
        let mut searcher = Searcher::new(NO_PRESSURE);

        let pruned = searcher.search(&board, Player::White, 2);
        let full = minimax_unpruned(&board, Player::White, 2, true);
        assert_eq!(pruned.score, full);
    }

    #[test]
    fn test_pruning_preserves_minimax_value_for_black() {
        let board = small_arena();
        let mut searcher = Searcher::new(NO_PRESSURE);

        let pruned = searcher.search(&board, Player::Black, 2);
        let full = minimax_unpruned(&board, Player::Black, 2, true);
        assert_eq!(pruned.score, full);
    }

    #[test]
    fn test_depth_one_picks_best_static_child() {
        // At depth 1 the search is exactly argmax over child evaluations.
        let board = small_arena();
        let mut searcher = Searcher::new(NO_PRESSURE);
        let result = searcher.search(&board, Player::White, 1);

        let best_static = legal_moves(&board, Player::White)
            .into_iter()
            .map(|mv| evaluate(&apply_move_unchecked(&board, mv), Player::White))
            .max()
            .expect("arena has moves");

        assert_eq!(result.score, best_static);
        let chosen = result.best_move.expect("arena has moves");
        let chosen_score = evaluate(&apply_move_unchecked(&board, chosen), Player::White);
        assert_eq!(chosen_score, best_static);
    }

    #[test]
    fn test_terminal_position_has_no_move() {
        // The searching player is mated: score is the loss sentinel and
        // no move comes back.
        let mut board = Board::empty();
        board.set(Pos::new(0, 0), Cell::Occupied(Player::White));
        board.set(Pos::new(0, 1), Cell::Blocked);
        board.set(Pos::new(1, 0), Cell::Blocked);
        board.set(Pos::new(1, 1), Cell::Blocked);
        board.set(Pos::new(5, 5), Cell::Occupied(Player::Black));

        let mut searcher = Searcher::new(NO_PRESSURE);
        let result = searcher.search(&board, Player::White, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -Weight::WIN);
    }

    #[test]
    fn test_won_position_scores_win() {
        let mut board = Board::empty();
        board.set(Pos::new(0, 0), Cell::Occupied(Player::Black));
        board.set(Pos::new(0, 1), Cell::Blocked);
        board.set(Pos::new(1, 0), Cell::Blocked);
        board.set(Pos::new(1, 1), Cell::Blocked);
        board.set(Pos::new(5, 5), Cell::Occupied(Player::White));

        let mut searcher = Searcher::new(NO_PRESSURE);
        let result = searcher.search(&board, Player::White, 3);
        // Terminal for the opponent: static win score, no move needed.
        assert_eq!(result.score, Weight::WIN);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_search_finds_forced_mate_in_one() {
        // Black's piece at (0,5) has a single liberty left, (1,5), and
        // White can fill it from below on the open column.
        let mut board = Board::empty();
        board.set(Pos::new(0, 5), Cell::Occupied(Player::Black));
        board.set(Pos::new(0, 4), Cell::Blocked);
        board.set(Pos::new(0, 6), Cell::Blocked);
        board.set(Pos::new(1, 4), Cell::Blocked);
        board.set(Pos::new(1, 6), Cell::Blocked);
        board.set(Pos::new(5, 5), Cell::Occupied(Player::White));

        let mut searcher = Searcher::new(NO_PRESSURE);
        let result = searcher.search(&board, Player::White, 2);

        assert_eq!(result.score, Weight::WIN);
        let mv = result.best_move.expect("White has moves");
        let after = apply_move_unchecked(&board, mv);
        assert!(
            !has_any_legal_move(&after, Player::Black),
            "chosen move must mate: {mv}"
        );
    }

    #[test]
    fn test_exhausted_budget_returns_static_eval() {
        let board = small_arena();
        let mut searcher = Searcher::new(Duration::ZERO);
        let result = searcher.search(&board, Player::White, 4);

        assert_eq!(result.best_move, None);
        assert_eq!(result.score, evaluate(&board, Player::White));
        assert_eq!(result.nodes, 1);
    }
}
