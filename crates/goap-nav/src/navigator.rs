use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A tile coordinate. `y` grows southwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring tile in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: TilePos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Direction to an orthogonally adjacent tile, `None` otherwise.
    pub fn direction_to(self, other: TilePos) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| self.step(*direction) == other)
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Fixed order used wherever neighbours are enumerated.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

/// Tiles from start to goal, both inclusive. Empty when the goal is unreachable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TilePath {
    pub tiles: Vec<TilePos>,
}

impl TilePath {
    pub fn new(tiles: Vec<TilePos>) -> Self {
        Self { tiles }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn goal(&self) -> Option<TilePos> {
        self.tiles.last().copied()
    }

    /// The tile after `tile` on this path, if `tile` is on it and not the goal.
    pub fn next_after(&self, tile: TilePos) -> Option<TilePos> {
        let index = self.tiles.iter().position(|t| *t == tile)?;
        self.tiles.get(index + 1).copied()
    }
}

/// Tile pathfinding collaborator used by movement actions.
pub trait Pathfinder {
    /// Path from `from` to `to`; empty when `to` cannot be reached.
    fn calculate_path(&self, from: TilePos, to: TilePos) -> TilePath;
}
