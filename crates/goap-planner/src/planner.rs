use core::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use goap_core::WorldState;

use crate::{ActionId, ActionSet, Plan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlannerConfig {
    /// Upper bound on node expansions per call. Exceeding it yields no plan.
    pub max_expansions: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_expansions: 4096,
        }
    }
}

/// Deterministic A* over abstract world states.
///
/// Nodes are [`WorldState`] snapshots, edges are applicable actions weighted by their cost. The
/// planner owns its [`ActionSet`] and is shared read-only between actors.
#[derive(Debug, Clone)]
pub struct Planner {
    actions: ActionSet,
    config: PlannerConfig,
    // Heuristic scale: the most atoms one action sets, and the cheapest action.
    max_effect_atoms: u32,
    min_cost: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: u32,
    g: u32,
    seq: u64,
    state: WorldState,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        (other.f, other.seq).cmp(&(self.f, self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Planner {
    pub fn new(actions: ActionSet) -> Self {
        let max_effect_atoms = actions
            .iter()
            .map(|(_, action)| action.postconditions().len() as u32)
            .max()
            .unwrap_or(1)
            .max(1);
        let min_cost = actions
            .iter()
            .map(|(_, action)| action.cost())
            .min()
            .unwrap_or(1)
            .max(1);

        Self {
            actions,
            config: PlannerConfig::default(),
            max_effect_atoms,
            min_cost,
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    pub fn config(&self) -> PlannerConfig {
        self.config
    }

    /// Lower bound on the remaining cost from `state` to `goal`.
    ///
    /// One action fixes at most `max_effect_atoms` unmet goal atoms and costs at least
    /// `min_cost`, so `ceil(distance / max_effect_atoms) * min_cost` never overestimates. With
    /// single-atom effects and unit costs this is plain `distance`.
    pub fn heuristic(&self, state: &WorldState, goal: &WorldState) -> u32 {
        let distance = state.distance(goal);
        distance
            .div_ceil(self.max_effect_atoms)
            .saturating_mul(self.min_cost)
    }

    /// Cheapest action sequence from `start` to any state satisfying `goal`.
    ///
    /// Returns an empty plan when `start` already satisfies `goal`, and `None` when the goal is
    /// unreachable or the expansion budget runs out.
    pub fn plan(&self, start: &WorldState, goal: &WorldState) -> Option<Plan> {
        self.plan_filtered(start, goal, |_| true)
    }

    /// Like [`Planner::plan`], searching only actions for which `allow` returns true.
    pub fn plan_filtered<F>(&self, start: &WorldState, goal: &WorldState, allow: F) -> Option<Plan>
    where
        F: Fn(ActionId) -> bool,
    {
        if start.satisfies(goal) {
            return Some(Plan::empty());
        }

        let candidates: Vec<_> = self
            .actions
            .iter()
            .filter(|(id, _)| allow(*id))
            .collect();

        let mut open = BinaryHeap::<OpenNode>::new();
        let mut seq: u64 = 0;

        let mut g_score: BTreeMap<WorldState, u32> = BTreeMap::new();
        let mut came_from: BTreeMap<WorldState, (WorldState, ActionId)> = BTreeMap::new();

        g_score.insert(*start, 0);
        open.push(OpenNode {
            f: self.heuristic(start, goal),
            g: 0,
            seq,
            state: *start,
        });
        seq += 1;

        let mut expansions: usize = 0;

        while let Some(node) = open.pop() {
            let best_g = g_score.get(&node.state).copied().unwrap_or(u32::MAX);
            if node.g != best_g {
                continue; // stale heap entry
            }

            if node.state.satisfies(goal) {
                let plan = reconstruct(&came_from, node.state, node.g);
                tracing::trace!(
                    expansions,
                    visited = g_score.len(),
                    steps = plan.len(),
                    cost = node.g,
                    "goap search finished"
                );
                return Some(plan);
            }

            expansions += 1;
            if expansions > self.config.max_expansions {
                tracing::debug!(
                    max_expansions = self.config.max_expansions,
                    visited = g_score.len(),
                    "goap search budget exhausted"
                );
                return None;
            }

            for &(action_id, action) in &candidates {
                if !action.applicable_in(&node.state) {
                    continue;
                }
                let next = action.apply(&node.state);
                if next == node.state {
                    continue;
                }

                let next_g = node.g.saturating_add(action.cost());
                let prev_best = g_score.get(&next).copied().unwrap_or(u32::MAX);
                if next_g >= prev_best {
                    continue;
                }

                g_score.insert(next, next_g);
                came_from.insert(next, (node.state, action_id));

                open.push(OpenNode {
                    f: next_g.saturating_add(self.heuristic(&next, goal)),
                    g: next_g,
                    seq,
                    state: next,
                });
                seq += 1;
            }
        }

        tracing::trace!(expansions, visited = g_score.len(), "goap search exhausted");
        None
    }

    /// Replay `steps` from `start` with abstract effects.
    ///
    /// `None` if a step is unknown or not applicable when reached.
    pub fn simulate<I>(&self, start: &WorldState, steps: I) -> Option<WorldState>
    where
        I: IntoIterator<Item = ActionId>,
    {
        steps.into_iter().try_fold(*start, |state, id| {
            let action = self.actions.get(id)?;
            action.applicable_in(&state).then(|| action.apply(&state))
        })
    }
}

fn reconstruct(
    came_from: &BTreeMap<WorldState, (WorldState, ActionId)>,
    goal_state: WorldState,
    cost: u32,
) -> Plan {
    let mut steps = Vec::new();
    let mut current = goal_state;
    while let Some((prev, action_id)) = came_from.get(&current).copied() {
        steps.push(action_id);
        current = prev;
    }
    steps.reverse();
    Plan::from_sequence(steps, cost)
}
