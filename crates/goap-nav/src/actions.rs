use goap_core::{ActionBehavior, ActorId, Blackboard, TickContext};

use crate::{NavWorldMut, TilePath, TilePos};

/// Walks to a fixed tile, one step per movement.
///
/// The path is computed on the first call and kept across calls; it is recomputed if the actor
/// ends up off it. Completes on arrival, or straight away when no path exists or movement is
/// refused (the controller replans from live facts either way).
#[derive(Debug, Clone)]
pub struct MoveToTileAction {
    goal: TilePos,
    path: Option<TilePath>,
}

impl MoveToTileAction {
    pub fn new(goal: TilePos) -> Self {
        Self { goal, path: None }
    }

    pub fn goal(&self) -> TilePos {
        self.goal
    }

    /// Cached path, if one was computed since the last reset.
    pub fn path(&self) -> Option<&TilePath> {
        self.path.as_ref()
    }
}

impl<W> ActionBehavior<W> for MoveToTileAction
where
    W: NavWorldMut + 'static,
{
    fn execute(
        &mut self,
        _ctx: &TickContext,
        actor: W::Actor,
        world: &mut W,
        _blackboard: &mut Blackboard,
    ) -> bool {
        let Some(here) = world.movement().current_tile(actor) else {
            return true;
        };
        if world.movement().is_moving(actor) {
            return false;
        }
        if here == self.goal {
            return true;
        }

        let next = match self.path.as_ref().and_then(|path| path.next_after(here)) {
            Some(next) => next,
            None => {
                let path = world.pathfinder().calculate_path(here, self.goal);
                tracing::trace!(actor = ?actor, from = %here, to = %self.goal, len = path.len(), "move path");
                let next = path.next_after(here);
                self.path = Some(path);
                match next {
                    Some(next) => next,
                    None => return true,
                }
            }
        };

        let Some(direction) = here.direction_to(next) else {
            return true;
        };
        // A refused step counts as done.
        !world.movement_mut().start_moving(actor, direction)
    }

    fn reset(&mut self) {
        self.path = None;
    }
}

/// Keeps within `distance` tiles of another actor.
///
/// Continuous: never completes while the target exists, so it relies on the replanning monitor
/// (or an abort) to end. Completes when the target is gone.
#[derive(Debug, Clone)]
pub struct FollowTargetAction<A> {
    target: A,
    distance: u32,
    path: Option<TilePath>,
}

impl<A: ActorId> FollowTargetAction<A> {
    pub fn new(target: A, distance: u32) -> Self {
        Self {
            target,
            distance,
            path: None,
        }
    }

    pub fn target(&self) -> A {
        self.target
    }
}

impl<W, A> ActionBehavior<W> for FollowTargetAction<A>
where
    W: NavWorldMut<Actor = A> + 'static,
    A: ActorId + 'static,
{
    fn execute(
        &mut self,
        _ctx: &TickContext,
        actor: A,
        world: &mut W,
        _blackboard: &mut Blackboard,
    ) -> bool {
        let Some(target_tile) = world.movement().current_tile(self.target) else {
            return true;
        };
        let Some(here) = world.movement().current_tile(actor) else {
            return true;
        };
        if world.movement().is_moving(actor) || here.manhattan(target_tile) <= self.distance {
            return false;
        }

        // Reuse the path while the target stays put.
        let stale = self
            .path
            .as_ref()
            .map_or(true, |path| path.goal() != Some(target_tile));
        if stale {
            self.path = Some(world.pathfinder().calculate_path(here, target_tile));
        }

        let next = self.path.as_ref().and_then(|path| path.next_after(here));
        let Some(direction) = next.and_then(|next| here.direction_to(next)) else {
            // Off the path or unreachable for now: retry next call.
            self.path = None;
            return false;
        };
        world.movement_mut().start_moving(actor, direction);
        false
    }

    fn reset(&mut self) {
        self.path = None;
    }
}
