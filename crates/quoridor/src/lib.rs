//! Quoridor-style board and rules engine.
//!
//! Coordinates are 1-based cell coordinates with row 1 at the top: Blue
//! starts at the bottom centre (5, 9) and races to row 1, Red starts at the
//! top centre (5, 1) and races to row 9. Wall slots live on an extended
//! grid (0..=BOARD_SIZE+1 per axis) so border queries never need special
//! cases.

mod action;
mod environment;
mod game_impl;
pub mod observation;
mod point;
mod wall_board;

pub use action::{Action, ACTION_SPACE_SIZE};
pub use environment::{Environment, WALLS_PER_PLAYER};
pub use game_impl::Quoridor;
pub use observation::STATE_SIZE;
pub use point::{Direction, Player, Point};
pub use wall_board::{Wall, WallBoard, WallOrientation};

/// Cells per board axis.
pub const BOARD_SIZE: i32 = 9;
