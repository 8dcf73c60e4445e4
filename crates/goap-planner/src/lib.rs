//! Deterministic GOAP planning and plan execution.
//!
//! A [`Planner`] searches an [`ActionSet`] with A* for the cheapest [`Plan`] from a live
//! [`goap_core::WorldState`] to a goal. Each actor's [`ActorController`] runs the plan one action
//! at a time and uses a [`ReplanMonitor`] to drop it when the facts it assumed stop holding.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod controller;
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod def;
pub mod facts;
pub mod monitor;
pub mod plan;
pub mod planner;

pub use action::{ActionDescriptor, ActionId, ActionSet};
pub use controller::{
    update_actors, ActorController, ControllerConfig, ControllerState, ControllerStats,
};
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub use def::{ActionDef, ActionSetDef, StateDef};
pub use facts::{FnFacts, WorldFactsProvider};
pub use monitor::{MonitorScope, ReplanMonitor, Staleness};
pub use plan::Plan;
pub use planner::{Planner, PlannerConfig};
