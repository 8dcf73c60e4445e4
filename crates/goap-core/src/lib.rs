//! Deterministic, engine-agnostic primitives for goal-oriented actors.
//!
//! - [`AtomRegistry`] interns fact names into compact [`Atom`] indices.
//! - [`WorldState`] is a tri-state (unset/true/false) assignment over atoms used for live facts,
//!   goals, preconditions and postconditions alike.
//! - [`ActionBehavior`] is the per-actor, resumable execution side of an action.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod actor;
pub mod atom;
pub mod behavior;
pub mod blackboard;
pub mod error;
pub mod state;
pub mod throttle;
pub mod tick;
pub mod world;

pub use actor::ActorId;
pub use atom::{Atom, AtomRegistry};
pub use behavior::{ActionBehavior, FnBehavior};
pub use blackboard::{BbKey, Blackboard};
pub use error::{GoapError, Result};
pub use state::{AtomValue, StateDisplay, WorldState};
pub use throttle::UpdateThrottle;
pub use tick::TickContext;
pub use world::{WorldMut, WorldView};
