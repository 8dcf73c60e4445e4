//! Tile navigation collaborators and reference movement actions.
//!
//! The GOAP core only calls into these through traits: [`Pathfinder`] for routes and
//! [`MovementController`] for tile steps. [`NavGrid`] and [`TileMover`] are small deterministic
//! implementations for tests and tools.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod actions;
pub mod grid;
pub mod movement;
pub mod navigator;
pub mod world;

pub use actions::{FollowTargetAction, MoveToTileAction};
pub use grid::{NavGrid, NavGridError};
pub use movement::{MovementController, TileMover};
pub use navigator::{Direction, Pathfinder, TilePath, TilePos};
pub use world::{NavWorldMut, NavWorldView};
