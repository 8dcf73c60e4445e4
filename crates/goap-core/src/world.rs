use crate::ActorId;

/// Read-only world access.
///
/// The core does not prescribe which queries a world exposes; collaborators (facts providers,
/// navigation, movement) define extension traits on top of it.
pub trait WorldView {
    type Actor: ActorId;
}

/// Write access / effect sink.
pub trait WorldMut: WorldView {
    /// Actor-local cleanup run whenever a controller leaves its perform-action state, e.g.
    /// snapping a half-moved actor back onto the tile grid.
    fn on_perform_exit(&mut self, _actor: Self::Actor) {}
}
