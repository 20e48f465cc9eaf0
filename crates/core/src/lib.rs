//! QuorZero core - game abstraction and shared domain types.
//!
//! This crate defines the [`Game`] trait the tree search is generic over,
//! together with the [`Policy`] and [`Value`] types that carry the
//! distribution/range invariants the rest of the system relies on.

mod error;
mod game;
mod types;

pub use error::{EngineError, Result};
pub use game::Game;
pub use types::{Policy, Value};
