#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ActorId;

/// Per-actor update cadence.
///
/// Controllers are stepped by the host every frame but only do work on ticks admitted here, so
/// planning and action ticks for many actors are spread out instead of running per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UpdateThrottle {
    pub every_ticks: u32,
    pub offset_ticks: u32,
}

impl Default for UpdateThrottle {
    fn default() -> Self {
        Self {
            every_ticks: 1,
            offset_ticks: 0,
        }
    }
}

impl UpdateThrottle {
    pub fn every(every_ticks: u32) -> Self {
        Self {
            every_ticks: every_ticks.max(1),
            offset_ticks: 0,
        }
    }

    /// Throttle with an offset derived from the actor's stable id, so actors sharing a cadence
    /// do not all update on the same tick.
    pub fn deterministic(actor: impl ActorId, every_ticks: u32) -> Self {
        let every = every_ticks.max(1);
        let offset = (actor.stable_id() % (every as u64)) as u32;
        Self {
            every_ticks: every,
            offset_ticks: offset,
        }
    }

    pub fn should_update(&self, tick: u64) -> bool {
        let every = self.every_ticks.max(1) as u64;
        tick.wrapping_add(self.offset_ticks as u64) % every == 0
    }
}
