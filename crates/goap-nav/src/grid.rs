use core::cmp::Ordering;
use std::collections::BinaryHeap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Direction, Pathfinder, TilePath, TilePos};

#[derive(Debug, PartialEq, Eq)]
struct OpenNode {
    f: u32,
    g: u32,
    tile: TilePos,
    seq: u64,
}

impl OpenNode {
    fn key(&self) -> (u32, u32, TilePos, u64) {
        (self.f, self.g, self.tile, self.seq)
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

/// 4-connected tile grid with blocked tiles and unit step cost.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "NavGridRepr"))]
pub struct NavGrid {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavGridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: i32, height: i32 },
    #[error("grid of {width}x{height} has too many tiles")]
    TooLarge { width: i32, height: i32 },
    #[error("grid of {width}x{height} needs {expected} blocked flags, got {actual}")]
    BlockedLength {
        width: i32,
        height: i32,
        expected: usize,
        actual: usize,
    },
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct NavGridRepr {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<NavGridRepr> for NavGrid {
    type Error = NavGridError;

    fn try_from(repr: NavGridRepr) -> Result<Self, Self::Error> {
        let NavGridRepr {
            width,
            height,
            blocked,
        } = repr;
        if width <= 0 || height <= 0 {
            return Err(NavGridError::EmptyGrid { width, height });
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .filter(|&cells| cells <= i32::MAX as usize)
            .ok_or(NavGridError::TooLarge { width, height })?;
        if blocked.len() != expected {
            return Err(NavGridError::BlockedLength {
                width,
                height,
                expected,
                actual: blocked.len(),
            });
        }
        Ok(Self {
            width,
            height,
            blocked,
        })
    }
}

impl NavGrid {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid must be non-empty");
        let width = width as i32;
        let height = height as i32;
        Self {
            width,
            height,
            blocked: vec![false; (width * height) as usize],
        }
    }

    /// Builder that blocks every listed tile.
    #[must_use]
    pub fn with_blocked<I>(mut self, tiles: I) -> Self
    where
        I: IntoIterator<Item = TilePos>,
    {
        for tile in tiles {
            self.set_blocked(tile, true);
        }
        self
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    /// Out-of-bounds tiles are ignored.
    pub fn set_blocked(&mut self, tile: TilePos, blocked: bool) {
        if let Some(idx) = self.idx(tile) {
            self.blocked[idx] = blocked;
        }
    }

    /// Out-of-bounds tiles count as blocked.
    pub fn is_blocked(&self, tile: TilePos) -> bool {
        self.idx(tile).map(|idx| self.blocked[idx]).unwrap_or(true)
    }

    pub fn in_bounds(&self, tile: TilePos) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.width && tile.y < self.height
    }

    fn idx(&self, tile: TilePos) -> Option<usize> {
        if !self.in_bounds(tile) {
            return None;
        }
        Some((tile.y * self.width + tile.x) as usize)
    }

    fn tile_from_idx(&self, idx: usize) -> TilePos {
        let idx = idx as i32;
        TilePos::new(idx % self.width, idx / self.width)
    }

    fn reconstruct(&self, came_from: &[Option<usize>], mut current: usize) -> Vec<TilePos> {
        let mut out = vec![self.tile_from_idx(current)];
        while let Some(prev) = came_from[current] {
            current = prev;
            out.push(self.tile_from_idx(current));
        }
        out.reverse();
        out
    }

    fn a_star(&self, start: TilePos, goal: TilePos) -> Option<Vec<TilePos>> {
        let start_idx = self.idx(start)?;
        let goal_idx = self.idx(goal)?;
        if self.blocked[start_idx] || self.blocked[goal_idx] {
            return None;
        }

        let mut open = BinaryHeap::<OpenNode>::new();
        let mut seq: u64 = 0;

        let grid_len = (self.width * self.height) as usize;
        let mut g_score = vec![u32::MAX; grid_len];
        let mut came_from: Vec<Option<usize>> = vec![None; grid_len];

        g_score[start_idx] = 0;
        open.push(OpenNode {
            f: start.manhattan(goal),
            g: 0,
            tile: start,
            seq,
        });
        seq += 1;

        while let Some(node) = open.pop() {
            if node.tile == goal {
                return Some(self.reconstruct(&came_from, goal_idx));
            }

            let node_idx = self.idx(node.tile)?;
            if node.g != g_score[node_idx] {
                continue; // stale heap entry
            }

            for direction in Direction::ALL {
                let next = node.tile.step(direction);
                let Some(next_idx) = self.idx(next) else { continue };
                if self.blocked[next_idx] {
                    continue;
                }

                let tentative_g = node.g.saturating_add(1);
                if tentative_g >= g_score[next_idx] {
                    continue;
                }

                came_from[next_idx] = Some(node_idx);
                g_score[next_idx] = tentative_g;
                open.push(OpenNode {
                    f: tentative_g.saturating_add(next.manhattan(goal)),
                    g: tentative_g,
                    tile: next,
                    seq,
                });
                seq += 1;
            }
        }

        None
    }
}

impl Pathfinder for NavGrid {
    fn calculate_path(&self, from: TilePos, to: TilePos) -> TilePath {
        match self.a_star(from, to) {
            Some(tiles) => TilePath::new(tiles),
            None => {
                tracing::trace!(%from, %to, "no tile path");
                TilePath::unreachable()
            }
        }
    }
}
