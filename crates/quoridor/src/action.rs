use std::fmt;

use crate::{Point, BOARD_SIZE};

/// Wall anchors range over 1..=BOARD_SIZE-1 per axis.
const WALL_GRID: i32 = BOARD_SIZE - 1;

const MOVE_COUNT: usize = (BOARD_SIZE * BOARD_SIZE) as usize;
const WALL_COUNT: usize = (WALL_GRID * WALL_GRID) as usize;

const HORIZONTAL_BASE: usize = MOVE_COUNT;
const VERTICAL_BASE: usize = MOVE_COUNT + WALL_COUNT;

/// Size of the dense action space: 81 pawn destinations plus 64 anchors per
/// wall orientation.
pub const ACTION_SPACE_SIZE: usize = MOVE_COUNT + 2 * WALL_COUNT;

/// One move: step/jump the pawn to a cell, or place a wall.
///
/// The two kinds share only an identity and a legality check, so they are a
/// tagged variant rather than anything behavioral.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Action {
    /// Move the current player's pawn to this cell.
    Move(Point),
    /// Place a horizontal wall anchored at this intersection.
    PlaceHorizontalWall(Point),
    /// Place a vertical wall anchored at this intersection.
    PlaceVerticalWall(Point),
}

impl Action {
    /// Dense id in `0..ACTION_SPACE_SIZE`: pawn destinations row-major
    /// first, then horizontal-wall anchors, then vertical-wall anchors.
    ///
    /// This id indexes policy vectors and is the fixed total order used for
    /// every deterministic tie-break.
    pub fn index(self) -> usize {
        match self {
            Action::Move(p) => ((p.y - 1) * BOARD_SIZE + (p.x - 1)) as usize,
            Action::PlaceHorizontalWall(p) => {
                HORIZONTAL_BASE + ((p.y - 1) * WALL_GRID + (p.x - 1)) as usize
            }
            Action::PlaceVerticalWall(p) => {
                VERTICAL_BASE + ((p.y - 1) * WALL_GRID + (p.x - 1)) as usize
            }
        }
    }

    /// Inverse of [`Action::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        if index < HORIZONTAL_BASE {
            let i = index as i32;
            Some(Action::Move(Point::new(
                i % BOARD_SIZE + 1,
                i / BOARD_SIZE + 1,
            )))
        } else if index < VERTICAL_BASE {
            let i = (index - HORIZONTAL_BASE) as i32;
            Some(Action::PlaceHorizontalWall(Point::new(
                i % WALL_GRID + 1,
                i / WALL_GRID + 1,
            )))
        } else if index < ACTION_SPACE_SIZE {
            let i = (index - VERTICAL_BASE) as i32;
            Some(Action::PlaceVerticalWall(Point::new(
                i % WALL_GRID + 1,
                i / WALL_GRID + 1,
            )))
        } else {
            None
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(p) => write!(f, "move {:?}", p),
            Action::PlaceHorizontalWall(p) => write!(f, "hwall {:?}", p),
            Action::PlaceVerticalWall(p) => write!(f, "vwall {:?}", p),
        }
    }
}
