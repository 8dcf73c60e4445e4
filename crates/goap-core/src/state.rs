use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Atom, AtomRegistry};

/// The value of one atom in a [`WorldState`].
///
/// `Unset` means "unconstrained": it is not the same as `False`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AtomValue {
    Unset,
    True,
    False,
}

impl AtomValue {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            AtomValue::Unset => None,
            AtomValue::True => Some(true),
            AtomValue::False => Some(false),
        }
    }

    pub fn is_set(self) -> bool {
        !matches!(self, AtomValue::Unset)
    }
}

impl From<bool> for AtomValue {
    fn from(value: bool) -> Self {
        if value {
            AtomValue::True
        } else {
            AtomValue::False
        }
    }
}

/// Partial true/false assignment over atoms.
///
/// Stored as two bitsets: `mask` marks explicitly set atoms and `values` holds their truth
/// values. `values` never has bits outside `mask`, so derived equality, ordering and hashing are
/// semantic.
///
/// The same type describes live facts, goals, preconditions and postconditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawWorldState"))]
pub struct WorldState {
    mask: u64,
    values: u64,
}

/// Wire form of [`WorldState`]; value bits outside the mask are dropped on load.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawWorldState {
    mask: u64,
    values: u64,
}

#[cfg(feature = "serde")]
impl From<RawWorldState> for WorldState {
    fn from(raw: RawWorldState) -> Self {
        Self {
            mask: raw.mask,
            values: raw.values & raw.mask,
        }
    }
}

impl WorldState {
    /// Empty state: every atom unconstrained.
    pub const fn new() -> Self {
        Self { mask: 0, values: 0 }
    }

    pub fn set(&mut self, atom: Atom, value: bool) {
        let bit = atom.bit();
        self.mask |= bit;
        if value {
            self.values |= bit;
        } else {
            self.values &= !bit;
        }
    }

    /// Builder form of [`WorldState::set`].
    #[must_use]
    pub fn with(mut self, atom: Atom, value: bool) -> Self {
        self.set(atom, value);
        self
    }

    /// Return `atom` to unconstrained.
    pub fn unset(&mut self, atom: Atom) {
        let bit = atom.bit();
        self.mask &= !bit;
        self.values &= !bit;
    }

    pub fn get(&self, atom: Atom) -> AtomValue {
        let bit = atom.bit();
        if self.mask & bit == 0 {
            AtomValue::Unset
        } else {
            AtomValue::from(self.values & bit != 0)
        }
    }

    pub fn is_set(&self, atom: Atom) -> bool {
        self.mask & atom.bit() != 0
    }

    /// True iff every atom set in `goal` has the same explicit value here.
    ///
    /// Atoms unset in `goal` are ignored; atoms set in `goal` but unset here fail.
    pub fn satisfies(&self, goal: &WorldState) -> bool {
        self.unmet_bits(goal) == 0
    }

    /// Number of atoms of `goal` this state fails to satisfy. Zero iff [`WorldState::satisfies`].
    pub fn distance(&self, goal: &WorldState) -> u32 {
        self.unmet_bits(goal).count_ones()
    }

    fn unmet_bits(&self, goal: &WorldState) -> u64 {
        let missing = goal.mask & !self.mask;
        let wrong = goal.mask & self.mask & (self.values ^ goal.values);
        missing | wrong
    }

    /// Copy of this state with every atom set in `effects` overwritten.
    #[must_use]
    pub fn apply(&self, effects: &WorldState) -> WorldState {
        WorldState {
            mask: self.mask | effects.mask,
            values: (self.values & !effects.mask) | effects.values,
        }
    }

    /// Copy keeping only `atoms`; everything else becomes unconstrained.
    #[must_use]
    pub fn project<I>(&self, atoms: I) -> WorldState
    where
        I: IntoIterator<Item = Atom>,
    {
        let keep = atoms.into_iter().fold(0u64, |acc, atom| acc | atom.bit());
        WorldState {
            mask: self.mask & keep,
            values: self.values & keep,
        }
    }

    /// Explicitly set atoms, in index order.
    pub fn atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.iter().map(|(atom, _)| atom)
    }

    /// Explicitly set atoms and their values, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Atom, bool)> + '_ {
        (0..AtomRegistry::MAX_ATOMS)
            .filter_map(Atom::from_index)
            .filter(move |atom| self.is_set(*atom))
            .map(move |atom| (atom, self.values & atom.bit() != 0))
    }

    /// Number of explicitly set atoms.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Bitset of explicitly set atoms (bit `i` = atom index `i`).
    pub const fn mask_bits(&self) -> u64 {
        self.mask
    }

    /// Truth values of the set atoms; always a subset of [`WorldState::mask_bits`].
    pub const fn value_bits(&self) -> u64 {
        self.values
    }

    /// Render with atom names, e.g. `{AtEdge, !Inside}`.
    pub fn display<'a>(&'a self, registry: &'a AtomRegistry) -> StateDisplay<'a> {
        StateDisplay {
            state: self,
            registry,
        }
    }
}

impl FromIterator<(Atom, bool)> for WorldState {
    fn from_iter<T: IntoIterator<Item = (Atom, bool)>>(iter: T) -> Self {
        let mut state = WorldState::new();
        for (atom, value) in iter {
            state.set(atom, value);
        }
        state
    }
}

pub struct StateDisplay<'a> {
    state: &'a WorldState,
    registry: &'a AtomRegistry,
}

impl fmt::Display for StateDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (atom, value)) in self.state.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if !value {
                f.write_str("!")?;
            }
            match self.registry.name(atom) {
                Some(name) => f.write_str(name)?,
                None => write!(f, "{atom}")?,
            }
        }
        f.write_str("}")
    }
}
