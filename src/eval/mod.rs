//! Position evaluation for the Amazons engine
//!
//! Contains:
//! - Fixed term weights and the win sentinel ([`weights`])
//! - The multi-factor heuristic evaluation ([`heuristic`])

pub mod heuristic;
pub mod weights;

pub use heuristic::evaluate;
pub use weights::Weight;
