//! Search module for the Amazons engine
//!
//! Contains:
//! - Minimax with alpha-beta pruning and heuristic move ordering
//! - Wall-clock time budget enforcement

pub mod alphabeta;

pub use alphabeta::{SearchResult, Searcher};
