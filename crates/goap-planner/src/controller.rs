use std::collections::BTreeMap;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use goap_core::{
    ActionBehavior, ActorId, Blackboard, Result, TickContext, UpdateThrottle, WorldMut,
};
use goap_tools::{emit, tags, TraceEvent};

use crate::{ActionId, Plan, Planner, ReplanMonitor, WorldFactsProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControllerState {
    Idle,
    /// Travel phase between accepting a plan and performing its head. Entered and left within
    /// the same update.
    GoTo,
    PerformAction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerStats {
    /// Admitted (non-throttled) updates.
    pub updates: u64,
    pub plan_calls: u64,
    pub plans_accepted: u64,
    pub plans_not_found: u64,
    pub actions_completed: u64,
    /// Plans discarded because watched facts drifted.
    pub replans: u64,
    pub mismatches: u64,
    pub aborts: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    pub throttle: UpdateThrottle,
    /// Search only actions this actor has a behavior bound for.
    pub plan_with_bound_actions_only: bool,
}

/// Per-actor plan execution state machine (Idle, GoTo, PerformAction).
///
/// Each admitted update performs exactly one state step:
/// - Idle plans from live facts and, on a non-empty plan, captures the monitor baseline and
///   enters PerformAction with the plan head.
/// - PerformAction checks the monitor, then ticks the head's behavior. Completion pops the head
///   and either re-enters PerformAction with the next one or returns to Idle.
///
/// Leaving PerformAction always resets the running behavior and calls
/// [`WorldMut::on_perform_exit`].
pub struct ActorController<W>
where
    W: WorldMut + 'static,
{
    actor: W::Actor,
    planner: Arc<Planner>,
    facts: Box<dyn WorldFactsProvider<W>>,
    behaviors: BTreeMap<ActionId, Box<dyn ActionBehavior<W>>>,
    monitor: ReplanMonitor,
    config: ControllerConfig,
    state: ControllerState,
    plan: Plan,
    current: Option<ActionId>,
    blackboard: Blackboard,
    stats: ControllerStats,
}

impl<W> ActorController<W>
where
    W: WorldMut + 'static,
{
    pub fn new(
        actor: W::Actor,
        planner: Arc<Planner>,
        facts: impl WorldFactsProvider<W> + 'static,
    ) -> Self {
        Self {
            actor,
            planner,
            facts: Box::new(facts),
            behaviors: BTreeMap::new(),
            monitor: ReplanMonitor::new(),
            config: ControllerConfig::default(),
            state: ControllerState::Idle,
            plan: Plan::empty(),
            current: None,
            blackboard: Blackboard::new(),
            stats: ControllerStats::default(),
        }
    }

    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_throttle(mut self, throttle: UpdateThrottle) -> Self {
        self.config.throttle = throttle;
        self
    }

    pub fn with_monitor(mut self, monitor: ReplanMonitor) -> Self {
        self.monitor = monitor;
        self
    }

    /// Bind this actor's behavior for `action`, replacing any earlier binding.
    pub fn bind(&mut self, action: ActionId, behavior: impl ActionBehavior<W>) -> &mut Self {
        self.behaviors.insert(action, Box::new(behavior));
        self
    }

    pub fn bind_by_name(
        &mut self,
        name: &str,
        behavior: impl ActionBehavior<W>,
    ) -> Result<ActionId> {
        let action = self.planner.actions().resolve(name)?;
        self.bind(action, behavior);
        Ok(action)
    }

    pub fn is_bound(&self, action: ActionId) -> bool {
        self.behaviors.contains_key(&action)
    }

    pub fn actor(&self) -> W::Actor {
        self.actor
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn current_action(&self) -> Option<ActionId> {
        self.current
    }

    pub fn monitor(&self) -> &ReplanMonitor {
        &self.monitor
    }

    pub fn monitor_mut(&mut self) -> &mut ReplanMonitor {
        &mut self.monitor
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    pub fn stats(&self) -> ControllerStats {
        self.stats
    }

    /// Called by the host every frame. Returns whether the throttle admitted this tick.
    pub fn update(&mut self, ctx: &TickContext, world: &mut W) -> bool {
        if !self.config.throttle.should_update(ctx.tick) {
            return false;
        }
        self.stats.updates += 1;
        self.step(ctx, world);
        true
    }

    /// One state step, ignoring the throttle.
    pub fn step(&mut self, ctx: &TickContext, world: &mut W) {
        match self.state {
            ControllerState::Idle => self.step_idle(ctx, world),
            ControllerState::GoTo => self.enter_perform(ctx, world),
            ControllerState::PerformAction => self.step_perform(ctx, world),
        }
    }

    /// Drop the current plan and return to Idle from outside the state machine.
    ///
    /// Returns false when there was nothing to abort.
    pub fn abort(&mut self, ctx: &TickContext, world: &mut W) -> bool {
        if self.state == ControllerState::Idle && self.plan.is_empty() {
            return false;
        }

        self.stats.aborts += 1;
        let action = self.current.map_or(u64::MAX, |id| id.index() as u64);
        self.trace(ctx, tags::ABORT, action, self.plan.len() as u64);
        tracing::debug!(actor = ?self.actor, state = ?self.state, "goap plan aborted");

        self.abandon(world);
        self.enter_idle(ctx);
        true
    }

    fn step_idle(&mut self, ctx: &TickContext, world: &mut W) {
        let live = self.facts.world_state(ctx, self.actor, world);
        let goal = self.facts.goal_state(ctx, self.actor, world);

        self.stats.plan_calls += 1;
        self.trace(ctx, tags::PLAN_CALL, goal.mask_bits(), goal.value_bits());
        tracing::trace!(
            actor = ?self.actor,
            live_mask = live.mask_bits(),
            live_values = live.value_bits(),
            goal_mask = goal.mask_bits(),
            goal_values = goal.value_bits(),
            "goap plan call"
        );

        let plan = if self.config.plan_with_bound_actions_only {
            let behaviors = &self.behaviors;
            self.planner
                .plan_filtered(&live, &goal, |id| behaviors.contains_key(&id))
        } else {
            self.planner.plan(&live, &goal)
        };

        let plan = match plan {
            Some(plan) => plan,
            None => {
                self.stats.plans_not_found += 1;
                self.trace(ctx, tags::PLAN_NONE, 0, 0);
                tracing::debug!(actor = ?self.actor, tick = ctx.tick, "goap no plan");
                return;
            }
        };

        self.trace(
            ctx,
            tags::PLAN_RESULT,
            plan.len() as u64,
            plan.planned_cost() as u64,
        );
        if plan.is_empty() {
            // Goal already holds; nothing to do until the facts change.
            self.trace(ctx, tags::PLAN_NONE, 0, 0);
            return;
        }

        self.stats.plans_accepted += 1;
        self.monitor.capture(&live, &plan);
        self.plan = plan;
        self.trace(
            ctx,
            tags::PLAN_ACCEPTED,
            self.plan.len() as u64,
            self.monitor.tracked_len() as u64,
        );
        tracing::debug!(
            actor = ?self.actor,
            tick = ctx.tick,
            steps = ?self.plan.names(self.planner.actions()),
            cost = self.plan.planned_cost(),
            "goap plan accepted"
        );

        self.state = ControllerState::GoTo;
        self.enter_perform(ctx, world);
    }

    fn enter_perform(&mut self, ctx: &TickContext, world: &mut W) {
        let Some(head) = self.plan.peek() else {
            self.monitor.clear();
            self.enter_idle(ctx);
            return;
        };

        self.state = ControllerState::PerformAction;
        if !self.behaviors.contains_key(&head) {
            self.stats.mismatches += 1;
            self.trace(ctx, tags::MISMATCH, head.index() as u64, 0);
            tracing::warn!(
                actor = ?self.actor,
                action = self.planner.actions().name(head).unwrap_or("<unknown>"),
                "goap plan head has no behavior bound for this actor; discarding plan"
            );
            self.abandon(world);
            self.enter_idle(ctx);
            return;
        }

        self.current = Some(head);
        self.trace(ctx, tags::ACTION_START, head.index() as u64, 0);
        tracing::debug!(
            actor = ?self.actor,
            action = self.planner.actions().name(head).unwrap_or("<unknown>"),
            "goap perform action"
        );
    }

    fn step_perform(&mut self, ctx: &TickContext, world: &mut W) {
        let Some(current) = self.current else {
            self.enter_perform(ctx, world);
            return;
        };

        let live = self.facts.world_state(ctx, self.actor, world);
        if let Some(stale) = self.monitor.check(&live, current) {
            self.stats.replans += 1;
            self.trace(
                ctx,
                tags::STALE,
                current.index() as u64,
                stale.atom.index() as u64,
            );
            tracing::debug!(
                actor = ?self.actor,
                atom = %stale.atom,
                expected = ?stale.expected,
                actual = ?stale.actual,
                "goap plan stale"
            );
            self.abandon(world);
            self.enter_idle(ctx);
            return;
        }

        let Some(behavior) = self.behaviors.get_mut(&current) else {
            // Unbound since the action was entered.
            self.current = None;
            self.enter_perform(ctx, world);
            return;
        };
        if !behavior.execute(ctx, self.actor, world, &mut self.blackboard) {
            return;
        }

        behavior.reset();
        self.plan.pop();
        self.current = None;
        self.stats.actions_completed += 1;
        if let Some(action) = self.planner.actions().get(current) {
            self.monitor.advance(action.postconditions());
        }
        self.trace(
            ctx,
            tags::ACTION_DONE,
            current.index() as u64,
            self.plan.len() as u64,
        );
        world.on_perform_exit(self.actor);

        if self.plan.is_empty() {
            self.monitor.clear();
            self.enter_idle(ctx);
        } else {
            self.enter_perform(ctx, world);
        }
    }

    /// Reset the running behavior, drop plan and baseline, and run the exit hook.
    fn abandon(&mut self, world: &mut W) {
        if let Some(current) = self.current.take() {
            if let Some(behavior) = self.behaviors.get_mut(&current) {
                behavior.reset();
            }
        }
        self.plan = Plan::empty();
        self.monitor.clear();
        if self.state == ControllerState::PerformAction {
            world.on_perform_exit(self.actor);
        }
    }

    fn enter_idle(&mut self, ctx: &TickContext) {
        self.state = ControllerState::Idle;
        self.trace(ctx, tags::IDLE, 0, 0);
    }

    fn trace(&mut self, ctx: &TickContext, tag: &'static str, a: u64, b: u64) {
        emit(
            &mut self.blackboard,
            TraceEvent::new(ctx.tick, tag)
                .with_actor(self.actor.stable_id())
                .with_a(a)
                .with_b(b),
        );
    }
}

/// Update `controllers` in stable actor order, whatever order the slice is in.
pub fn update_actors<W>(ctx: &TickContext, world: &mut W, controllers: &mut [ActorController<W>])
where
    W: WorldMut + 'static,
{
    let mut order: Vec<usize> = (0..controllers.len()).collect();
    order.sort_by_key(|&i| controllers[i].actor());
    for i in order {
        controllers[i].update(ctx, world);
    }
}
