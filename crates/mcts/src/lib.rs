//! Monte Carlo Tree Search over any [`quorzero_core::Game`].
//!
//! The search keeps its tree between moves: after the driver commits an
//! action, [`Mcts::advance`] promotes the matching child subtree to be the
//! new root and releases every sibling, so memory does not grow with game
//! length and accumulated statistics carry over.
//!
//! Selection uses the PUCT rule with a fixed tie-break (lowest action id),
//! so runs are bit-for-bit reproducible given the same seed, evaluator, and
//! simulation budget.

pub mod config;
pub mod evaluator;
mod node;
pub mod search;
mod tree;

pub use config::MctsConfig;
pub use evaluator::{Evaluation, Evaluator, RolloutEvaluator};
pub use node::{Node, NodeId, NodeStats};
pub use search::Mcts;
