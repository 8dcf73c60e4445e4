use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use goap_core::{Atom, AtomRegistry, AtomValue, WorldState};

use crate::{ActionId, Plan};

/// Which atoms the monitor snapshots and compares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MonitorScope {
    /// Only atoms declared via [`ReplanMonitor::watch`] / [`ReplanMonitor::watch_all_actions`].
    #[default]
    Declared,
    /// Every atom, whatever the actions declare.
    AllAtoms,
}

/// A watched atom whose live value drifted from the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Staleness {
    pub action: ActionId,
    pub atom: Atom,
    pub expected: AtomValue,
    pub actual: AtomValue,
}

/// Detects when live facts no longer match the assumptions a plan was built on.
///
/// At plan acceptance the monitor snapshots the live values of every atom the plan's actions
/// watch (the baseline). Each perform step compares the atoms watched by the current action
/// against that baseline, not against the previous tick. Completed actions advance the baseline
/// by their postconditions, so later steps expect the effects of earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ReplanMonitor {
    scope: MonitorScope,
    watched: BTreeMap<ActionId, Vec<Atom>>,
    always: Vec<Atom>,
    tracked: Vec<Atom>,
    baseline: WorldState,
}

impl ReplanMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scope(mut self, scope: MonitorScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn scope(&self) -> MonitorScope {
        self.scope
    }

    /// Declare the atoms `action` depends on while it runs.
    pub fn watch<I>(&mut self, action: ActionId, atoms: I)
    where
        I: IntoIterator<Item = Atom>,
    {
        let entry = self.watched.entry(action).or_default();
        entry.extend(atoms);
        entry.sort_unstable();
        entry.dedup();
    }

    /// Builder form of [`ReplanMonitor::watch`].
    #[must_use]
    pub fn watching<I>(mut self, action: ActionId, atoms: I) -> Self
    where
        I: IntoIterator<Item = Atom>,
    {
        self.watch(action, atoms);
        self
    }

    /// Declare atoms checked while any action runs.
    pub fn watch_all_actions<I>(&mut self, atoms: I)
    where
        I: IntoIterator<Item = Atom>,
    {
        self.always.extend(atoms);
        self.always.sort_unstable();
        self.always.dedup();
    }

    /// Atoms checked while `action` is the plan head, in index order.
    pub fn watched_for(&self, action: ActionId) -> Vec<Atom> {
        if self.scope == MonitorScope::AllAtoms {
            return all_atoms().collect();
        }

        let mut atoms = self.always.clone();
        if let Some(declared) = self.watched.get(&action) {
            atoms.extend(declared.iter().copied());
        }
        atoms.sort_unstable();
        atoms.dedup();
        atoms
    }

    /// Snapshot the baseline for a freshly accepted plan.
    pub fn capture(&mut self, live: &WorldState, plan: &Plan) {
        self.tracked = match self.scope {
            MonitorScope::AllAtoms => all_atoms().collect(),
            MonitorScope::Declared => {
                let mut atoms: Vec<Atom> = plan.steps().flat_map(|id| self.watched_for(id)).collect();
                atoms.sort_unstable();
                atoms.dedup();
                atoms
            }
        };
        self.baseline = live.project(self.tracked.iter().copied());
    }

    /// Fold a completed action's postconditions into the baseline.
    pub fn advance(&mut self, postconditions: &WorldState) {
        let expected = postconditions.project(self.tracked.iter().copied());
        self.baseline = self.baseline.apply(&expected);
    }

    /// First atom watched by `current` whose live value differs from the baseline.
    pub fn check(&self, live: &WorldState, current: ActionId) -> Option<Staleness> {
        self.watched_for(current)
            .into_iter()
            .filter(|atom| self.tracked.binary_search(atom).is_ok())
            .find_map(|atom| {
                let expected = self.baseline.get(atom);
                let actual = live.get(atom);
                (expected != actual).then_some(Staleness {
                    action: current,
                    atom,
                    expected,
                    actual,
                })
            })
    }

    /// Forget the baseline (plan discarded or finished).
    pub fn clear(&mut self) {
        self.tracked.clear();
        self.baseline = WorldState::new();
    }

    pub fn baseline(&self) -> &WorldState {
        &self.baseline
    }

    /// Number of atoms covered by the current baseline.
    pub fn tracked_len(&self) -> usize {
        self.tracked.len()
    }
}

fn all_atoms() -> impl Iterator<Item = Atom> {
    (0..AtomRegistry::MAX_ATOMS).filter_map(Atom::from_index)
}
