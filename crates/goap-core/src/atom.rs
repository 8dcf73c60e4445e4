use core::fmt;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{GoapError, Result};

/// An interned fact name.
///
/// Atoms are compact indices handed out by an [`AtomRegistry`]; two atoms from the same registry
/// are equal iff they were registered under the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Atom(u8);

impl Atom {
    /// Build an atom from a raw index, or `None` past [`AtomRegistry::MAX_ATOMS`].
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < AtomRegistry::MAX_ATOMS {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn bit(self) -> u64 {
        1u64 << self.0
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable mapping of fact names to compact indices.
///
/// The registry is an explicit value owned by the host rather than a process-wide singleton;
/// everything that needs to resolve names borrows it.
#[derive(Debug, Clone, Default)]
pub struct AtomRegistry {
    names: Vec<String>,
    by_name: BTreeMap<String, Atom>,
}

impl AtomRegistry {
    /// A [`crate::WorldState`] packs every atom into one `u64` word.
    pub const MAX_ATOMS: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`, returning the existing atom if it is already known.
    pub fn register(&mut self, name: &str) -> Result<Atom> {
        if let Some(atom) = self.by_name.get(name) {
            return Ok(*atom);
        }

        let atom = Atom::from_index(self.names.len()).ok_or_else(|| {
            GoapError::AtomCapacityExceeded {
                name: name.to_string(),
                max: Self::MAX_ATOMS,
            }
        })?;
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), atom);
        Ok(atom)
    }

    pub fn get(&self, name: &str) -> Option<Atom> {
        self.by_name.get(name).copied()
    }

    /// Like [`AtomRegistry::get`], but unknown names are an error.
    pub fn resolve(&self, name: &str) -> Result<Atom> {
        self.get(name)
            .ok_or_else(|| GoapError::UnknownAtom(name.to_string()))
    }

    pub fn name(&self, atom: Atom) -> Option<&str> {
        self.names.get(atom.index()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Registered atoms in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (Atom, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| Atom::from_index(i).map(|atom| (atom, name.as_str())))
    }
}
