use core::fmt::Debug;

/// Stable identifier for an actor (the hero, a mercenary, ...).
///
/// Deterministic updates need a total order (`Ord`) and a stable numeric id for throttle offsets
/// and logs.
pub trait ActorId: Copy + Ord + Eq + Debug {
    fn stable_id(self) -> u64;
}

impl ActorId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl ActorId for u32 {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

impl ActorId for usize {
    fn stable_id(self) -> u64 {
        self as u64
    }
}
