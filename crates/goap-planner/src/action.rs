use core::fmt;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use goap_core::{Atom, GoapError, Result, WorldState};

/// Stable handle to an action inside an [`ActionSet`] (its insertion index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionId(u32);

impl ActionId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action#{}", self.0)
    }
}

/// Immutable planning view of an action: name, cost, preconditions and postconditions.
///
/// Preconditions require explicit values: an atom left unset in the state never satisfies a
/// precondition that names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    name: String,
    cost: u32,
    preconditions: WorldState,
    postconditions: WorldState,
}

impl ActionDescriptor {
    pub fn new(name: impl Into<String>, cost: u32) -> Self {
        Self {
            name: name.into(),
            cost,
            preconditions: WorldState::new(),
            postconditions: WorldState::new(),
        }
    }

    /// Add a precondition.
    #[must_use]
    pub fn requires(mut self, atom: Atom, value: bool) -> Self {
        self.preconditions.set(atom, value);
        self
    }

    /// Add a postcondition.
    #[must_use]
    pub fn produces(mut self, atom: Atom, value: bool) -> Self {
        self.postconditions.set(atom, value);
        self
    }

    #[must_use]
    pub fn with_preconditions(mut self, preconditions: WorldState) -> Self {
        self.preconditions = preconditions;
        self
    }

    #[must_use]
    pub fn with_postconditions(mut self, postconditions: WorldState) -> Self {
        self.postconditions = postconditions;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn preconditions(&self) -> &WorldState {
        &self.preconditions
    }

    pub fn postconditions(&self) -> &WorldState {
        &self.postconditions
    }

    pub fn applicable_in(&self, state: &WorldState) -> bool {
        state.satisfies(&self.preconditions)
    }

    /// Abstract effect used by the planner only; live actor state is never mutated this way.
    pub fn apply(&self, state: &WorldState) -> WorldState {
        state.apply(&self.postconditions)
    }
}

/// The registered, read-only action vocabulary a planner searches over.
#[derive(Debug, Clone, Default)]
pub struct ActionSet {
    actions: Vec<ActionDescriptor>,
    by_name: BTreeMap<String, ActionId>,
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from descriptors in order, validating each one.
    pub fn from_descriptors<I>(descriptors: I) -> Result<Self>
    where
        I: IntoIterator<Item = ActionDescriptor>,
    {
        let mut set = Self::new();
        for descriptor in descriptors {
            set.add(descriptor)?;
        }
        Ok(set)
    }

    /// Register an action. Costs must be at least 1 and names unique.
    pub fn add(&mut self, descriptor: ActionDescriptor) -> Result<ActionId> {
        if descriptor.cost == 0 {
            return Err(GoapError::InvalidActionCost {
                name: descriptor.name,
                cost: descriptor.cost,
            });
        }
        if self.by_name.contains_key(&descriptor.name) {
            return Err(GoapError::DuplicateAction(descriptor.name));
        }

        let id = ActionId(self.actions.len() as u32);
        self.by_name.insert(descriptor.name.clone(), id);
        self.actions.push(descriptor);
        Ok(id)
    }

    pub fn get(&self, id: ActionId) -> Option<&ActionDescriptor> {
        self.actions.get(id.index())
    }

    pub fn id(&self, name: &str) -> Option<ActionId> {
        self.by_name.get(name).copied()
    }

    /// Like [`ActionSet::id`], but unknown names are an error.
    pub fn resolve(&self, name: &str) -> Result<ActionId> {
        self.id(name)
            .ok_or_else(|| GoapError::UnknownAction(name.to_string()))
    }

    pub fn name(&self, id: ActionId) -> Option<&str> {
        self.get(id).map(ActionDescriptor::name)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ActionId, &ActionDescriptor)> + '_ {
        self.actions
            .iter()
            .enumerate()
            .map(|(i, action)| (ActionId(i as u32), action))
    }
}
