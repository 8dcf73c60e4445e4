//! Data-driven action sets, declared by atom name in YAML or JSON.
//!
//! ```yaml
//! atoms: [AtEdge, Inside]
//! actions:
//!   - name: MoveToEdge
//!     post: { AtEdge: true }
//!   - name: Jump
//!     cost: 2
//!     pre: { AtEdge: true }
//!     post: { Inside: true }
//!     watch: [AtEdge]
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use goap_core::{AtomRegistry, GoapError, Result, WorldState};

use crate::{ActionDescriptor, ActionSet, ReplanMonitor};

/// A partial state keyed by atom name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateDef(pub BTreeMap<String, bool>);

impl StateDef {
    /// Resolve against known atoms only.
    pub fn resolve(&self, registry: &AtomRegistry) -> Result<WorldState> {
        self.0
            .iter()
            .map(|(name, value)| Ok::<_, GoapError>((registry.resolve(name)?, *value)))
            .collect()
    }

    /// Resolve, registering unknown atom names.
    pub fn register(&self, registry: &mut AtomRegistry) -> Result<WorldState> {
        self.0
            .iter()
            .map(|(name, value)| Ok::<_, GoapError>((registry.register(name)?, *value)))
            .collect()
    }

    /// Parse `A=true,B=false` (bare `A` means true, `!A` false).
    pub fn parse_assignments(input: &str) -> Result<Self> {
        let mut values = BTreeMap::new();
        for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = match part.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim().parse::<bool>().map_err(|e| GoapError::Parse {
                        format: "state",
                        message: format!("`{part}`: {e}"),
                    })?;
                    (name.trim(), value)
                }
                None => match part.strip_prefix('!') {
                    Some(name) => (name.trim(), false),
                    None => (part, true),
                },
            };
            if name.is_empty() {
                return Err(GoapError::Parse {
                    format: "state",
                    message: format!("`{part}`: missing atom name"),
                });
            }
            values.insert(name.to_string(), value);
        }
        Ok(Self(values))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDef {
    pub name: String,
    #[serde(default = "default_cost")]
    pub cost: u32,
    #[serde(default)]
    pub pre: StateDef,
    #[serde(default)]
    pub post: StateDef,
    /// Atoms the replanning monitor checks while this action runs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub watch: Vec<String>,
}

fn default_cost() -> u32 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSetDef {
    /// Atoms registered up front, in order. Names first used by actions are appended.
    #[serde(default)]
    pub atoms: Vec<String>,
    pub actions: Vec<ActionDef>,
}

impl ActionSetDef {
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        serde_yaml::from_str(input).map_err(|e| GoapError::Parse {
            format: "yaml",
            message: e.to_string(),
        })
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| GoapError::Parse {
            format: "json",
            message: e.to_string(),
        })
    }

    /// Register atoms and build the validated action set.
    pub fn build(&self, registry: &mut AtomRegistry) -> Result<ActionSet> {
        for name in &self.atoms {
            registry.register(name)?;
        }

        let mut set = ActionSet::new();
        for def in &self.actions {
            let descriptor = ActionDescriptor::new(def.name.clone(), def.cost)
                .with_preconditions(def.pre.register(registry)?)
                .with_postconditions(def.post.register(registry)?);
            set.add(descriptor)?;
        }
        Ok(set)
    }

    /// Monitor watching the declared atoms of each action in `actions`.
    pub fn monitor(&self, registry: &AtomRegistry, actions: &ActionSet) -> Result<ReplanMonitor> {
        let mut monitor = ReplanMonitor::new();
        for def in &self.actions {
            if def.watch.is_empty() {
                continue;
            }
            let id = actions.resolve(&def.name)?;
            let atoms = def
                .watch
                .iter()
                .map(|name| registry.resolve(name))
                .collect::<Result<Vec<_>>>()?;
            monitor.watch(id, atoms);
        }
        Ok(monitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assignment_lists() {
        let def = StateDef::parse_assignments("AtEdge=true, Inside=false,Armed,!Hungry").unwrap();
        assert_eq!(def.0.get("AtEdge"), Some(&true));
        assert_eq!(def.0.get("Inside"), Some(&false));
        assert_eq!(def.0.get("Armed"), Some(&true));
        assert_eq!(def.0.get("Hungry"), Some(&false));
        assert!(StateDef::parse_assignments("").unwrap().0.is_empty());
    }

    #[test]
    fn rejects_bad_assignments() {
        assert!(matches!(
            StateDef::parse_assignments("AtEdge=maybe"),
            Err(GoapError::Parse { format: "state", .. })
        ));
        assert!(StateDef::parse_assignments("=true").is_err());
    }

    #[test]
    fn resolve_requires_known_atoms() {
        let registry = AtomRegistry::new();
        let def = StateDef::parse_assignments("Inside").unwrap();
        assert_eq!(
            def.resolve(&registry),
            Err(GoapError::UnknownAtom("Inside".to_string()))
        );
    }
}
