//! Main AI engine: difficulty control over the minimax search
//!
//! This module maps a difficulty level to search parameters and exposes
//! the engine's single decision entry point. The flow is:
//!
//! 1. Clamp the difficulty and map it to a search depth
//! 2. Run the alpha-beta search rooted at the maximizing player
//! 3. If the search produced no move, fall back to a uniformly random
//!    legal move
//! 4. If there is no legal move at all, report that: the position is
//!    already lost and the caller must treat it as game over
//!
//! # Example
//!
//! ```
//! use amazons::{AIEngine, Board, Player};
//!
//! // Shallow config for a fast example
//! let engine = AIEngine::with_config(1, 200);
//! let board = Board::new();
//!
//! if let Some(mv) = engine.get_move(&board, Player::White, 1) {
//!     println!("AI plays {mv}");
//! }
//! ```

use std::time::{Duration, Instant};

use rand::seq::IndexedRandom;
use tracing::debug;

use crate::board::{Board, Player};
use crate::movegen::{legal_moves, Move};
use crate::search::Searcher;

/// Hard ceiling on search depth, whatever the difficulty asks for.
pub const MAX_DEPTH: i8 = 4;

/// Wall-clock budget per move, shared by all difficulty levels.
pub const TIME_LIMIT_MS: u64 = 5_000;

/// Which path produced the chosen move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Regular alpha-beta search result
    AlphaBeta,
    /// Search came back empty; a random legal move was chosen instead
    RandomFallback,
}

/// Result of a move decision with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Chosen move; `None` means the player has no legal move at all
    pub best_move: Option<Move>,
    /// Score the search assigned to the position
    pub score: i32,
    /// Which path produced the move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn from_search(mv: Move, score: i32, time_ms: u64, nodes: u64) -> Self {
        Self {
            best_move: Some(mv),
            score,
            search_type: SearchType::AlphaBeta,
            time_ms,
            nodes,
        }
    }

    #[inline]
    fn fallback(mv: Option<Move>, score: i32, time_ms: u64, nodes: u64) -> Self {
        Self {
            best_move: mv,
            score,
            search_type: SearchType::RandomFallback,
            time_ms,
            nodes,
        }
    }
}

/// Synthetic Amazons opponent.
///
/// Stateless between calls: every decision is a fresh search over the
/// given board, so one engine value can serve any number of games or
/// positions, including concurrently from independent call sites.
///
/// # Configuration
///
/// * Maximum search depth (difficulty is clamped into it)
/// * Per-move wall-clock time limit
///
/// # Example
///
/// ```
/// use amazons::{AIEngine, Board, Player};
///
/// let engine = AIEngine::with_config(1, 200);
/// let board = Board::new();
/// let result = engine.get_move_with_stats(&board, Player::White, 1);
/// println!("move {:?} after {}ms", result.best_move, result.time_ms);
/// ```
pub struct AIEngine {
    /// Maximum search depth for alpha-beta
    max_depth: i8,
    /// Per-move time budget
    time_limit: Duration,
}

impl AIEngine {
    /// Create an engine with the standard settings: depth capped at
    /// [`MAX_DEPTH`], [`TIME_LIMIT_MS`] milliseconds per move.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            time_limit: Duration::from_millis(TIME_LIMIT_MS),
        }
    }

    /// Create an engine with custom limits.
    ///
    /// # Arguments
    ///
    /// * `max_depth` - Maximum search depth for alpha-beta
    /// * `time_limit_ms` - Per-move time budget in milliseconds
    #[must_use]
    pub fn with_config(max_depth: i8, time_limit_ms: u64) -> Self {
        Self {
            max_depth,
            time_limit: Duration::from_millis(time_limit_ms),
        }
    }

    /// Search depth for a difficulty level.
    ///
    /// Difficulty 1-5 maps to `difficulty + 1`, capped at the engine's
    /// maximum depth. Out-of-range difficulties clamp into 1-5.
    #[must_use]
    pub fn depth_for_difficulty(&self, difficulty: u8) -> i8 {
        let difficulty = difficulty.clamp(1, 5) as i8;
        (difficulty + 1).min(self.max_depth)
    }

    /// Get the best move for the given position.
    ///
    /// Convenience wrapper around [`AIEngine::get_move_with_stats`] that
    /// returns only the move.
    ///
    /// # Returns
    ///
    /// The chosen move, or `None` if `player` has no legal move. In that
    /// case the game is already over for that player, which the caller
    /// must detect before asking again.
    #[must_use]
    pub fn get_move(&self, board: &Board, player: Player, difficulty: u8) -> Option<Move> {
        self.get_move_with_stats(board, player, difficulty).best_move
    }

    /// Get the best move with detailed statistics.
    ///
    /// Runs a depth- and time-bounded alpha-beta search with `player` as
    /// the maximizer. If the search returns no move (the time budget
    /// expired before any root child was scored, or the player is already
    /// mated) the engine falls back to a uniformly random legal move.
    ///
    /// # Arguments
    ///
    /// * `board` - Current board state
    /// * `player` - The player to move (the search's maximizer)
    /// * `difficulty` - Difficulty level 1-5
    #[must_use]
    pub fn get_move_with_stats(&self, board: &Board, player: Player, difficulty: u8) -> MoveResult {
        let start = Instant::now();
        let depth = self.depth_for_difficulty(difficulty);
        debug!(difficulty, depth, "computing move");

        let mut searcher = Searcher::new(self.time_limit);
        let result = searcher.search(board, player, depth);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        if let Some(mv) = result.best_move {
            debug!(
                score = result.score,
                nodes = result.nodes,
                elapsed_ms,
                "search selected a move"
            );
            return MoveResult::from_search(mv, result.score, elapsed_ms, result.nodes);
        }

        // Degraded outcomes, not errors: the budget ran out before any
        // root child was scored, or the player cannot move at all.
        let moves = legal_moves(board, player);
        let mv = moves.choose(&mut rand::rng()).copied();
        match mv {
            Some(_) => debug!(elapsed_ms, "search returned no move, using random fallback"),
            None => debug!(elapsed_ms, "no legal move available, game is over"),
        }

        MoveResult::fallback(
            mv,
            result.score,
            start.elapsed().as_millis() as u64,
            result.nodes,
        )
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}
