use std::fmt;

use crate::BOARD_SIZE;

/// A grid coordinate. Cells use 1..=BOARD_SIZE on both axes; wall anchors
/// may carry coordinates outside that range (see `WallBoard::rotate`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True iff this point is a playable cell.
    pub fn in_board(self) -> bool {
        (1..=BOARD_SIZE).contains(&self.x) && (1..=BOARD_SIZE).contains(&self.y)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four orthogonal directions. `ALL` fixes the enumeration order used
/// wherever iteration order is observable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Cell-coordinate delta; up means toward row 1.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The two directions orthogonal to this one, in `ALL` order.
    pub const fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }
}

/// The two sides. Blue moves first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Player {
    Blue,
    Red,
}

impl Player {
    pub const fn opponent(self) -> Self {
        match self {
            Player::Blue => Player::Red,
            Player::Red => Player::Blue,
        }
    }

    /// Row this player must reach to win.
    pub const fn goal_row(self) -> i32 {
        match self {
            Player::Blue => 1,
            Player::Red => BOARD_SIZE,
        }
    }

    pub const fn start_position(self) -> Point {
        match self {
            Player::Blue => Point::new((BOARD_SIZE + 1) / 2, BOARD_SIZE),
            Player::Red => Point::new((BOARD_SIZE + 1) / 2, 1),
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Player::Blue => 0,
            Player::Red => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Blue => write!(f, "BLUE"),
            Player::Red => write!(f, "RED"),
        }
    }
}
