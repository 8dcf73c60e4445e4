use goap_core::{WorldMut, WorldView};

use crate::{MovementController, Pathfinder};

/// World access needed by the tile movement actions.
pub trait NavWorldView: WorldView {
    fn pathfinder(&self) -> &dyn Pathfinder;
    fn movement(&self) -> &dyn MovementController<Self::Actor>;
}

pub trait NavWorldMut: WorldMut + NavWorldView {
    fn movement_mut(&mut self) -> &mut dyn MovementController<Self::Actor>;
}
