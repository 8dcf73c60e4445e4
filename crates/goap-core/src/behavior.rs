use crate::{Blackboard, TickContext, WorldMut};

/// The execution side of an action, owned by one actor.
///
/// Planners only see the immutable descriptor (name, cost, pre/postconditions). Each actor binds
/// one behavior per action it can perform; the behavior keeps whatever progress it needs (a path
/// cursor, an "in progress" flag) between calls.
///
/// Contract:
/// - `execute` is called once per controller update while the action is the plan head.
/// - It returns `false` while work remains and `true` exactly once when done. "Done" includes
///   "could not do it" (target vanished, no path): there is no failure channel, the controller
///   replans from live facts afterwards.
/// - `execute` must never block; multi-tick work resumes on the next call.
/// - `reset` is called after completion and whenever the plan is abandoned mid-action. The same
///   instance runs again in later plans.
pub trait ActionBehavior<W>: 'static
where
    W: WorldMut + 'static,
{
    fn execute(
        &mut self,
        ctx: &TickContext,
        actor: W::Actor,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> bool;

    fn reset(&mut self) {}
}

/// Stateless behavior backed by a closure.
pub struct FnBehavior<F>(pub F);

impl<W, F> ActionBehavior<W> for FnBehavior<F>
where
    W: WorldMut + 'static,
    F: FnMut(&TickContext, W::Actor, &mut W, &mut Blackboard) -> bool + 'static,
{
    fn execute(
        &mut self,
        ctx: &TickContext,
        actor: W::Actor,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> bool {
        (self.0)(ctx, actor, world, blackboard)
    }
}

impl<W> ActionBehavior<W> for Box<dyn ActionBehavior<W>>
where
    W: WorldMut + 'static,
{
    fn execute(
        &mut self,
        ctx: &TickContext,
        actor: W::Actor,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> bool {
        (**self).execute(ctx, actor, world, blackboard)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
