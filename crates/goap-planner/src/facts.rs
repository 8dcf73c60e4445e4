use goap_core::{TickContext, WorldState, WorldView};

/// Supplies an actor's live facts and current goal to its controller.
///
/// The live state should set every atom the actor's actions and goals mention; atoms left unset
/// never satisfy a precondition.
pub trait WorldFactsProvider<W: WorldView> {
    fn world_state(&mut self, ctx: &TickContext, actor: W::Actor, world: &W) -> WorldState;

    fn goal_state(&mut self, ctx: &TickContext, actor: W::Actor, world: &W) -> WorldState;
}

/// Facts provider backed by two closures.
pub struct FnFacts<S, G> {
    state: S,
    goal: G,
}

impl<S, G> FnFacts<S, G> {
    pub fn new(state: S, goal: G) -> Self {
        Self { state, goal }
    }
}

impl<W, S, G> WorldFactsProvider<W> for FnFacts<S, G>
where
    W: WorldView,
    S: FnMut(&TickContext, W::Actor, &W) -> WorldState,
    G: FnMut(&TickContext, W::Actor, &W) -> WorldState,
{
    fn world_state(&mut self, ctx: &TickContext, actor: W::Actor, world: &W) -> WorldState {
        (self.state)(ctx, actor, world)
    }

    fn goal_state(&mut self, ctx: &TickContext, actor: W::Actor, world: &W) -> WorldState {
        (self.goal)(ctx, actor, world)
    }
}
