use std::collections::BTreeMap;

use goap_core::ActorId;

use crate::{Direction, TilePos};

/// Tile-to-tile movement collaborator.
pub trait MovementController<A> {
    /// Begin a one-tile step. Returns false if the actor cannot start moving now.
    fn start_moving(&mut self, actor: A, direction: Direction) -> bool;

    fn is_moving(&self, actor: A) -> bool;

    /// Tile the actor stands on (the step's origin while moving). `None` if the actor is gone.
    fn current_tile(&self, actor: A) -> Option<TilePos>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Mover {
    tile: TilePos,
    step: Option<(TilePos, u32)>,
}

/// Deterministic reference movement: each step takes `ticks_per_tile` calls to
/// [`TileMover::advance`].
#[derive(Debug, Clone)]
pub struct TileMover<A> {
    ticks_per_tile: u32,
    movers: BTreeMap<A, Mover>,
}

impl<A: ActorId> TileMover<A> {
    pub fn new(ticks_per_tile: u32) -> Self {
        Self {
            ticks_per_tile: ticks_per_tile.max(1),
            movers: BTreeMap::new(),
        }
    }

    pub fn place(&mut self, actor: A, tile: TilePos) {
        self.movers.insert(actor, Mover { tile, step: None });
    }

    pub fn remove(&mut self, actor: A) -> Option<TilePos> {
        self.movers.remove(&actor).map(|mover| mover.tile)
    }

    /// Progress every in-flight step by one tick.
    pub fn advance(&mut self) {
        for mover in self.movers.values_mut() {
            if let Some((to, remaining)) = mover.step {
                if remaining <= 1 {
                    mover.tile = to;
                    mover.step = None;
                } else {
                    mover.step = Some((to, remaining - 1));
                }
            }
        }
    }

    /// Cancel an in-flight step, leaving the actor on its origin tile.
    pub fn snap(&mut self, actor: A) {
        if let Some(mover) = self.movers.get_mut(&actor) {
            mover.step = None;
        }
    }
}

impl<A: ActorId> MovementController<A> for TileMover<A> {
    fn start_moving(&mut self, actor: A, direction: Direction) -> bool {
        let ticks = self.ticks_per_tile;
        match self.movers.get_mut(&actor) {
            Some(mover) if mover.step.is_none() => {
                mover.step = Some((mover.tile.step(direction), ticks));
                true
            }
            _ => false,
        }
    }

    fn is_moving(&self, actor: A) -> bool {
        self.movers
            .get(&actor)
            .is_some_and(|mover| mover.step.is_some())
    }

    fn current_tile(&self, actor: A) -> Option<TilePos> {
        self.movers.get(&actor).map(|mover| mover.tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_complete_after_configured_ticks() {
        let mut mover = TileMover::new(2);
        mover.place(1u64, TilePos::new(0, 0));

        assert!(mover.start_moving(1, Direction::East));
        assert!(!mover.start_moving(1, Direction::East), "already moving");
        assert!(mover.is_moving(1));

        mover.advance();
        assert_eq!(mover.current_tile(1), Some(TilePos::new(0, 0)));
        mover.advance();
        assert_eq!(mover.current_tile(1), Some(TilePos::new(1, 0)));
        assert!(!mover.is_moving(1));
    }

    #[test]
    fn snap_cancels_step_and_unknown_actors_cannot_move() {
        let mut mover = TileMover::new(3);
        mover.place(1u64, TilePos::new(2, 2));
        mover.start_moving(1, Direction::North);
        mover.snap(1);
        mover.advance();
        assert_eq!(mover.current_tile(1), Some(TilePos::new(2, 2)));

        assert!(!mover.start_moving(9, Direction::North));
        assert_eq!(mover.current_tile(9), None);
        assert_eq!(mover.remove(1), Some(TilePos::new(2, 2)));
        assert!(!mover.is_moving(1));
    }
}
