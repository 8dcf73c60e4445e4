//! Umbrella crate that re-exports the `goap-*` building blocks.
//!
//! - [`core`]: atoms, tri-state world states, the action behavior contract.
//! - [`planner`]: action sets, the A* planner, actor controllers and the replanning monitor.
//! - [`tools`]: deterministic trace events.
//! - [`nav`]: tile pathfinding/movement collaborators and reference movement actions.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use goap_core as core;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use goap_tools as tools;

#[cfg(feature = "planner")]
#[cfg_attr(docsrs, doc(cfg(feature = "planner")))]
pub use goap_planner as planner;

#[cfg(feature = "nav")]
#[cfg_attr(docsrs, doc(cfg(feature = "nav")))]
pub use goap_nav as nav;

/// The types most hosts need.
#[cfg(feature = "planner")]
#[cfg_attr(docsrs, doc(cfg(feature = "planner")))]
pub mod prelude {
    pub use goap_core::{
        ActionBehavior, Atom, AtomRegistry, AtomValue, Blackboard, FnBehavior, TickContext,
        UpdateThrottle, WorldMut, WorldState, WorldView,
    };
    pub use goap_planner::{
        update_actors, ActionDescriptor, ActionId, ActionSet, ActorController, ControllerState,
        FnFacts, MonitorScope, Plan, Planner, ReplanMonitor, WorldFactsProvider,
    };
    pub use goap_tools::{TraceLog, TRACE_LOG};
}
