#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ActionId, ActionSet};

/// The action sequence produced by one planning call, stored as a LIFO stack.
///
/// The first action to run sits on top; the controller peeks it while executing and pops it on
/// completion. Replanning replaces the plan wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plan {
    // Top of the stack is the last element.
    stack: Vec<ActionId>,
    planned_cost: u32,
}

impl Plan {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a plan from actions in run order.
    pub fn from_sequence(steps: Vec<ActionId>, planned_cost: u32) -> Self {
        let mut stack = steps;
        stack.reverse();
        Self {
            stack,
            planned_cost,
        }
    }

    pub fn peek(&self) -> Option<ActionId> {
        self.stack.last().copied()
    }

    pub fn pop(&mut self) -> Option<ActionId> {
        self.stack.pop()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Total cost of the plan as returned by the planner (not reduced by pops).
    pub fn planned_cost(&self) -> u32 {
        self.planned_cost
    }

    /// Remaining actions in run order.
    pub fn steps(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.stack.iter().rev().copied()
    }

    pub fn contains(&self, id: ActionId) -> bool {
        self.stack.contains(&id)
    }

    /// Remaining action names in run order; unknown ids are skipped.
    pub fn names<'a>(&self, actions: &'a ActionSet) -> Vec<&'a str> {
        self.steps().filter_map(|id| actions.name(id)).collect()
    }
}
