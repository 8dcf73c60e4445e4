/// Per-update clock input handed to controllers and behaviors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32) -> Self {
        Self { tick, dt_seconds }
    }

    /// The context for the following frame with the same delta.
    pub fn next(self) -> Self {
        Self {
            tick: self.tick.saturating_add(1),
            dt_seconds: self.dt_seconds,
        }
    }
}
