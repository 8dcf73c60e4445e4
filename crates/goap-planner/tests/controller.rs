use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use goap_core::{
    ActionBehavior, Atom, AtomRegistry, Blackboard, FnBehavior, TickContext, UpdateThrottle,
    WorldMut, WorldState, WorldView,
};
use goap_planner::{
    update_actors, ActionDescriptor, ActionSet, ActorController, ControllerConfig,
    ControllerState, FnFacts, Planner,
};
use goap_tools::{tags, TraceLog, TRACE_LOG};

#[derive(Default)]
struct Arena {
    facts: WorldState,
    executed_by: Vec<u64>,
    exits: Vec<u64>,
}

impl WorldView for Arena {
    type Actor = u64;
}

impl WorldMut for Arena {
    fn on_perform_exit(&mut self, actor: u64) {
        self.exits.push(actor);
    }
}

/// Never completes; counts resets.
struct Forever {
    resets: Rc<Cell<u32>>,
}

impl ActionBehavior<Arena> for Forever {
    fn execute(
        &mut self,
        _ctx: &TickContext,
        _actor: u64,
        _world: &mut Arena,
        _blackboard: &mut Blackboard,
    ) -> bool {
        false
    }

    fn reset(&mut self) {
        self.resets.set(self.resets.get() + 1);
    }
}

fn record_actor() -> FnBehavior<impl FnMut(&TickContext, u64, &mut Arena, &mut Blackboard) -> bool>
{
    FnBehavior(
        |_ctx: &TickContext, actor: u64, world: &mut Arena, _bb: &mut Blackboard| {
            world.executed_by.push(actor);
            true
        },
    )
}

fn goal_facts(
    goal: WorldState,
) -> FnFacts<
    impl FnMut(&TickContext, u64, &Arena) -> WorldState,
    impl FnMut(&TickContext, u64, &Arena) -> WorldState,
> {
    FnFacts::new(
        |_ctx: &TickContext, _actor: u64, world: &Arena| world.facts,
        move |_ctx: &TickContext, _actor: u64, _world: &Arena| goal,
    )
}

struct Fixture {
    goal: Atom,
    step: Atom,
    planner: Arc<Planner>,
}

/// `Try` claims to reach the goal directly; `Prepare` then `Finish` is the two-step route.
fn fixture() -> Fixture {
    let mut registry = AtomRegistry::new();
    let goal = registry.register("Goal").unwrap();
    let step = registry.register("Prepared").unwrap();
    let actions = ActionSet::from_descriptors([
        ActionDescriptor::new("Try", 1).produces(goal, true),
        ActionDescriptor::new("Prepare", 1).produces(step, true),
        ActionDescriptor::new("Finish", 1)
            .requires(step, true)
            .produces(goal, true),
    ])
    .unwrap();
    Fixture {
        goal,
        step,
        planner: Arc::new(Planner::new(actions)),
    }
}

#[test]
fn action_that_never_reaches_goal_keeps_controller_replanning() {
    let fx = fixture();
    let try_goal = fx.planner.actions().resolve("Try").unwrap();
    let mut controller = ActorController::new(
        1u64,
        fx.planner.clone(),
        goal_facts(WorldState::new().with(fx.goal, true)),
    );
    controller.bind(try_goal, record_actor());

    let mut world = Arena::default();
    let mut ctx = TickContext::new(0, 0.1);
    for update in 0..6u64 {
        let before = controller.stats().plan_calls;
        controller.update(&ctx, &mut world);
        let after = controller.stats().plan_calls;
        assert!(after - before <= 1, "at most one planning call per update");

        if update % 2 == 0 {
            assert_eq!(after - before, 1);
            assert_eq!(controller.state(), ControllerState::PerformAction);
        } else {
            assert_eq!(controller.state(), ControllerState::Idle);
        }
        ctx = ctx.next();
    }

    let stats = controller.stats();
    assert_eq!(stats.plan_calls, 3);
    assert_eq!(stats.plans_accepted, 3);
    assert_eq!(stats.actions_completed, 3);
    assert_eq!(world.executed_by, vec![1, 1, 1]);
}

#[test]
fn unreachable_goal_plans_once_per_admitted_update() {
    let mut registry = AtomRegistry::new();
    let goal = registry.register("Unreachable").unwrap();
    let planner = Arc::new(Planner::new(ActionSet::new()));
    let mut controller =
        ActorController::new(1u64, planner, goal_facts(WorldState::new().with(goal, true)));
    controller.blackboard_mut().set(TRACE_LOG, TraceLog::default());

    let mut world = Arena::default();
    let mut ctx = TickContext::new(0, 0.1);
    for _ in 0..4 {
        controller.update(&ctx, &mut world);
        assert_eq!(controller.state(), ControllerState::Idle);
        ctx = ctx.next();
    }

    let stats = controller.stats();
    assert_eq!(stats.plan_calls, 4);
    assert_eq!(stats.plans_not_found, 4);
    let trace = controller.blackboard().get(TRACE_LOG).unwrap();
    assert_eq!(trace.count(tags::PLAN_NONE), 4);
    assert!(!trace.contains(tags::PLAN_ACCEPTED));
}

#[test]
fn unbound_plan_head_discards_plan() {
    let fx = fixture();
    let actions = fx.planner.actions();
    let prepare = actions.resolve("Prepare").unwrap();

    // Only `Prepare` is bound, but the cheapest plan starts with `Try`.
    let mut controller = ActorController::new(
        3u64,
        fx.planner.clone(),
        goal_facts(WorldState::new().with(fx.goal, true)),
    );
    controller.bind(prepare, record_actor());
    controller.blackboard_mut().set(TRACE_LOG, TraceLog::default());

    let mut world = Arena::default();
    controller.update(&TickContext::new(0, 0.1), &mut world);

    assert_eq!(controller.state(), ControllerState::Idle);
    assert!(controller.plan().is_empty());
    assert_eq!(controller.current_action(), None);
    assert_eq!(controller.stats().mismatches, 1);
    assert_eq!(world.exits, vec![3]);
    assert!(world.executed_by.is_empty());

    let trace = controller.blackboard().get(TRACE_LOG).unwrap();
    assert_eq!(
        trace.tags(),
        vec![
            tags::PLAN_CALL,
            tags::PLAN_RESULT,
            tags::PLAN_ACCEPTED,
            tags::MISMATCH,
            tags::IDLE,
        ]
    );
}

#[test]
fn bound_only_planning_routes_around_missing_behaviors() {
    let fx = fixture();
    let actions = fx.planner.actions();
    let prepare = actions.resolve("Prepare").unwrap();
    let finish = actions.resolve("Finish").unwrap();

    let mut controller = ActorController::new(
        3u64,
        fx.planner.clone(),
        goal_facts(WorldState::new().with(fx.goal, true)),
    )
    .with_config(ControllerConfig {
        plan_with_bound_actions_only: true,
        ..ControllerConfig::default()
    });
    controller.bind(
        prepare,
        FnBehavior(
            move |_ctx: &TickContext, _actor: u64, world: &mut Arena, _bb: &mut Blackboard| {
                world.facts.set(fx.step, true);
                true
            },
        ),
    );
    controller.bind(finish, record_actor());

    let mut world = Arena::default();
    controller.update(&TickContext::new(0, 0.1), &mut world);

    assert_eq!(controller.state(), ControllerState::PerformAction);
    assert_eq!(
        controller.plan().names(controller.planner().actions()),
        vec!["Prepare", "Finish"]
    );
    assert_eq!(controller.stats().mismatches, 0);
}

#[test]
fn throttle_skips_non_admitted_ticks() {
    let fx = fixture();
    let mut controller = ActorController::new(
        1u64,
        fx.planner.clone(),
        goal_facts(WorldState::new().with(fx.goal, true)),
    )
    .with_throttle(UpdateThrottle::every(3));

    let mut world = Arena::default();
    let admitted: Vec<u64> = (0..7u64)
        .filter(|&tick| controller.update(&TickContext::new(tick, 0.1), &mut world))
        .collect();

    assert_eq!(admitted, vec![0, 3, 6]);
    assert_eq!(controller.stats().updates, 3);
}

#[test]
fn abort_resets_behavior_and_returns_to_idle() {
    let fx = fixture();
    let try_goal = fx.planner.actions().resolve("Try").unwrap();
    let resets = Rc::new(Cell::new(0));

    let mut controller = ActorController::new(
        5u64,
        fx.planner.clone(),
        goal_facts(WorldState::new().with(fx.goal, true)),
    );
    controller.bind(
        try_goal,
        Forever {
            resets: resets.clone(),
        },
    );
    controller.blackboard_mut().set(TRACE_LOG, TraceLog::default());

    let mut world = Arena::default();
    let ctx = TickContext::new(0, 0.1);
    assert!(!controller.abort(&ctx, &mut world), "nothing to abort while idle");

    controller.update(&ctx, &mut world);
    controller.update(&ctx.next(), &mut world);
    assert_eq!(controller.state(), ControllerState::PerformAction);

    assert!(controller.abort(&ctx.next(), &mut world));
    assert_eq!(controller.state(), ControllerState::Idle);
    assert!(controller.plan().is_empty());
    assert_eq!(controller.current_action(), None);
    assert_eq!(resets.get(), 1);
    assert_eq!(world.exits, vec![5]);
    assert_eq!(controller.stats().aborts, 1);

    let trace = controller.blackboard().get(TRACE_LOG).unwrap();
    assert!(trace.contains(tags::ABORT));
    assert_eq!(trace.tags().last().copied(), Some(tags::IDLE));
}

#[test]
fn update_actors_runs_in_actor_order() {
    let fx = fixture();
    let try_goal = fx.planner.actions().resolve("Try").unwrap();
    let make = |actor: u64| {
        let mut controller = ActorController::new(
            actor,
            fx.planner.clone(),
            goal_facts(WorldState::new().with(fx.goal, true)),
        );
        controller.bind(try_goal, record_actor());
        controller
    };

    let mut controllers = vec![make(9), make(2), make(4)];
    let mut world = Arena::default();
    let ctx = TickContext::new(0, 0.1);
    update_actors(&ctx, &mut world, &mut controllers);
    update_actors(&ctx.next(), &mut world, &mut controllers);

    assert_eq!(world.executed_by, vec![2, 4, 9]);
    let order: Vec<u64> = controllers.iter().map(|c| c.actor()).collect();
    assert_eq!(order, vec![9, 2, 4]);
}

#[test]
fn plan_call_trace_keeps_unset_and_false_goals_apart() {
    let fx = fixture();
    let mut traced = Vec::new();

    for goal in [WorldState::new(), WorldState::new().with(fx.goal, false)] {
        let mut controller = ActorController::new(1u64, fx.planner.clone(), goal_facts(goal));
        controller.update(&TickContext::new(0, 0.1), &mut Arena::default());

        let trace = controller.blackboard().get(TRACE_LOG).unwrap();
        let call = trace
            .events
            .iter()
            .find(|e| e.tag == tags::PLAN_CALL)
            .unwrap();
        assert_eq!((call.a, call.b), (goal.mask_bits(), goal.value_bits()));
        traced.push((call.a, call.b));
    }

    assert_ne!(traced[0], traced[1]);
}
