//! Wall-slot occupancy and geometry.
//!
//! Walls live on two independent slot layers over an extended grid of
//! 0..=BOARD_SIZE+1 per axis:
//!
//! - horizontal slot (x, y) blocks movement between cells (x, y) and
//!   (x, y+1);
//! - vertical slot (x, y) blocks movement between cells (x, y) and
//!   (x+1, y).
//!
//! A wall anchored at intersection (x, y) spans two slots of its layer:
//! horizontal walls occupy (x, y) and (x+1, y), vertical walls occupy
//! (x, y) and (x, y+1). No two walls may share a slot or an anchor.
//!
//! The board knows nothing about players or turns; path legality is the
//! environment's concern, built on [`WallBoard::check_reachability`].

use std::collections::VecDeque;

use crate::{Direction, Point, BOARD_SIZE};

/// Extent of the extended slot grid per axis (0..=BOARD_SIZE+1).
const GRID_EXTENT: i32 = BOARD_SIZE + 2;

/// Orientation of a placed wall.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum WallOrientation {
    Horizontal,
    Vertical,
}

impl WallOrientation {
    /// Orientation after a quarter turn.
    pub const fn flipped(self) -> Self {
        match self {
            WallOrientation::Horizontal => WallOrientation::Vertical,
            WallOrientation::Vertical => WallOrientation::Horizontal,
        }
    }
}

/// A placed wall: anchor intersection plus orientation.
///
/// Anchors of walls placed through the `place_*` methods always lie inside
/// the extended grid; rotation may carry an anchor outside it, in which case
/// the wall keeps its identity but none of its slots are visible until a
/// later rotation brings it back.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Wall {
    pub anchor: Point,
    pub orientation: WallOrientation,
}

impl Wall {
    /// The two slots this wall occupies, in its own layer.
    pub fn slots(self) -> [Point; 2] {
        match self.orientation {
            WallOrientation::Horizontal => [self.anchor, self.anchor.offset(1, 0)],
            WallOrientation::Vertical => [self.anchor, self.anchor.offset(0, 1)],
        }
    }
}

/// One bit per (x, y) of the extended grid, for one slot layer or the
/// anchor set. 11x11 positions fit a u128.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
struct SlotGrid(u128);

impl SlotGrid {
    fn bit(x: i32, y: i32) -> u128 {
        1u128 << (y * GRID_EXTENT + x)
    }

    fn get(self, x: i32, y: i32) -> bool {
        self.0 & Self::bit(x, y) != 0
    }

    fn set(&mut self, x: i32, y: i32) {
        self.0 |= Self::bit(x, y);
    }
}

fn in_extended_range(x: i32, y: i32) -> bool {
    (0..GRID_EXTENT).contains(&x) && (0..GRID_EXTENT).contains(&y)
}

/// Wall occupancy for one game.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct WallBoard {
    horizontal: SlotGrid,
    vertical: SlotGrid,
    anchors: SlotGrid,
    walls: Vec<Wall>,
}

impl WallBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupancy of horizontal slot (x, y).
    ///
    /// # Panics
    /// Coordinates outside the extended grid are a caller bug.
    pub fn is_horizontal_wall_placed(&self, x: i32, y: i32) -> bool {
        assert!(
            in_extended_range(x, y),
            "horizontal slot query out of range: ({x}, {y})"
        );
        self.horizontal.get(x, y)
    }

    /// Occupancy of vertical slot (x, y).
    ///
    /// # Panics
    /// Coordinates outside the extended grid are a caller bug.
    pub fn is_vertical_wall_placed(&self, x: i32, y: i32) -> bool {
        assert!(
            in_extended_range(x, y),
            "vertical slot query out of range: ({x}, {y})"
        );
        self.vertical.get(x, y)
    }

    /// True iff a wall of either orientation is anchored at (x, y).
    pub fn is_intersection(&self, x: i32, y: i32) -> bool {
        assert!(
            in_extended_range(x, y),
            "intersection query out of range: ({x}, {y})"
        );
        self.anchors.get(x, y)
    }

    /// Would a horizontal wall anchored at (x, y) overlap or cross an
    /// existing wall?
    pub fn horizontal_wall_overlaps(&self, x: i32, y: i32) -> bool {
        self.is_intersection(x, y)
            || self.is_horizontal_wall_placed(x, y)
            || self.is_horizontal_wall_placed(x + 1, y)
    }

    /// Would a vertical wall anchored at (x, y) overlap or cross an
    /// existing wall?
    pub fn vertical_wall_overlaps(&self, x: i32, y: i32) -> bool {
        self.is_intersection(x, y)
            || self.is_vertical_wall_placed(x, y)
            || self.is_vertical_wall_placed(x, y + 1)
    }

    /// Places a horizontal wall anchored at (x, y), occupying horizontal
    /// slots (x, y) and (x+1, y).
    ///
    /// Path existence is NOT re-checked here; that is a cross-cutting rule
    /// the environment evaluates against both goals before committing.
    ///
    /// # Panics
    /// On out-of-range coordinates or overlap with an existing wall; both
    /// are caller bugs, not game-legality rejections.
    pub fn place_horizontal_wall(&mut self, x: i32, y: i32) {
        assert!(
            in_extended_range(x, y) && in_extended_range(x + 1, y),
            "horizontal wall anchor out of range: ({x}, {y})"
        );
        assert!(
            !self.horizontal_wall_overlaps(x, y),
            "BUG: overlapping horizontal wall at ({x}, {y})"
        );
        self.add_wall(Wall {
            anchor: Point::new(x, y),
            orientation: WallOrientation::Horizontal,
        });
    }

    /// Places a vertical wall anchored at (x, y), occupying vertical slots
    /// (x, y) and (x, y+1). Same contract as `place_horizontal_wall`.
    pub fn place_vertical_wall(&mut self, x: i32, y: i32) {
        assert!(
            in_extended_range(x, y) && in_extended_range(x, y + 1),
            "vertical wall anchor out of range: ({x}, {y})"
        );
        assert!(
            !self.vertical_wall_overlaps(x, y),
            "BUG: overlapping vertical wall at ({x}, {y})"
        );
        self.add_wall(Wall {
            anchor: Point::new(x, y),
            orientation: WallOrientation::Vertical,
        });
    }

    /// Number of placed walls, invariant under rotation.
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Re-expresses every wall in the frame rotated 90 degrees clockwise
    /// (row 1 at the top) about the pivot intersection: an anchor (x, y)
    /// maps to (px - (y - py), py + (x - px)) with orientation flipped.
    ///
    /// Anchors may leave the extended grid; such walls keep their identity
    /// but occupy no visible slots until a later rotation brings them back.
    /// Four rotations about the same pivot therefore restore the original
    /// occupancy exactly, for any wall set.
    pub fn rotate(&mut self, pivot: Point) {
        for wall in &mut self.walls {
            let a = wall.anchor;
            wall.anchor = Point::new(pivot.x - (a.y - pivot.y), pivot.y + (a.x - pivot.x));
            wall.orientation = wall.orientation.flipped();
        }
        self.rebuild_grids();
    }

    /// True iff a pawn on `from` cannot leave it through `dir` because a
    /// wall seals that edge. `from` must be a playable cell; board-boundary
    /// checks on the destination are the caller's job.
    pub fn blocks(&self, from: Point, dir: Direction) -> bool {
        debug_assert!(from.in_board(), "blocks() queried off board: {from:?}");
        match dir {
            Direction::Up => self.horizontal.get(from.x, from.y - 1),
            Direction::Down => self.horizontal.get(from.x, from.y),
            Direction::Left => self.vertical.get(from.x - 1, from.y),
            Direction::Right => self.vertical.get(from.x, from.y),
        }
    }

    /// Breadth-first search over the cell graph: can `from` reach any cell
    /// in `target_row` given the current walls?
    ///
    /// This is the legality oracle consulted before committing a wall
    /// placement; a wall must never fully enclose a player.
    pub fn check_reachability(&self, from: Point, target_row: i32) -> bool {
        assert!(from.in_board(), "reachability start off board: {from:?}");
        assert!(
            (1..=BOARD_SIZE).contains(&target_row),
            "reachability target row off board: {target_row}"
        );

        if from.y == target_row {
            return true;
        }

        let cell_index = |p: Point| ((p.y - 1) * BOARD_SIZE + (p.x - 1)) as usize;
        let mut visited = [false; (BOARD_SIZE * BOARD_SIZE) as usize];
        let mut queue = VecDeque::new();
        visited[cell_index(from)] = true;
        queue.push_back(from);

        while let Some(cell) = queue.pop_front() {
            for dir in Direction::ALL {
                if self.blocks(cell, dir) {
                    continue;
                }
                let next = cell.step(dir);
                if !next.in_board() || visited[cell_index(next)] {
                    continue;
                }
                if next.y == target_row {
                    return true;
                }
                visited[cell_index(next)] = true;
                queue.push_back(next);
            }
        }
        false
    }

    fn add_wall(&mut self, wall: Wall) {
        self.walls.push(wall);
        self.mark(wall);
    }

    fn mark(&mut self, wall: Wall) {
        let a = wall.anchor;
        if in_extended_range(a.x, a.y) {
            self.anchors.set(a.x, a.y);
        }
        for slot in wall.slots() {
            if in_extended_range(slot.x, slot.y) {
                match wall.orientation {
                    WallOrientation::Horizontal => self.horizontal.set(slot.x, slot.y),
                    WallOrientation::Vertical => self.vertical.set(slot.x, slot.y),
                }
            }
        }
    }

    fn rebuild_grids(&mut self) {
        self.horizontal = SlotGrid::default();
        self.vertical = SlotGrid::default();
        self.anchors = SlotGrid::default();
        let walls = std::mem::take(&mut self.walls);
        for &wall in &walls {
            self.mark(wall);
        }
        self.walls = walls;
    }
}
