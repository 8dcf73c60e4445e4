#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use goap_core::{BbKey, Blackboard};

/// Tags emitted by the actor controller.
pub mod tags {
    /// Planner invoked. `a` = goal mask bits, `b` = goal value bits.
    pub const PLAN_CALL: &str = "goap.plan.call";
    /// Planner returned. `a` = plan length, `b` = total cost.
    pub const PLAN_RESULT: &str = "goap.plan.result";
    /// No plan (or an empty one); controller stays idle.
    pub const PLAN_NONE: &str = "goap.plan.none";
    /// Plan accepted. `a` = plan length, `b` = number of watched atoms.
    pub const PLAN_ACCEPTED: &str = "goap.plan.accepted";
    /// New plan head picked up. `a` = action id.
    pub const ACTION_START: &str = "goap.action.start";
    /// Plan head reported completion. `a` = action id, `b` = remaining plan length.
    pub const ACTION_DONE: &str = "goap.action.done";
    /// Watched facts drifted; plan discarded. `a` = action id, `b` = mismatched atom index.
    pub const STALE: &str = "goap.stale";
    /// Plan head has no behavior bound for this actor. `a` = action id.
    pub const MISMATCH: &str = "goap.mismatch";
    /// Plan discarded from outside via `abort`.
    pub const ABORT: &str = "goap.abort";
    /// Controller returned to idle.
    pub const IDLE: &str = "goap.idle";
}

/// A small, allocation-friendly trace event.
///
/// Deliberately "dumb data" so it can be recorded during simulation and rendered later by
/// tooling. The meaning of `a` and `b` depends on the tag (see [`tags`]).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub actor: u64,
    pub tag: Cow<'static, str>,
    pub a: u64,
    pub b: u64,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            actor: 0,
            tag: tag.into(),
            a: 0,
            b: 0,
        }
    }

    pub fn with_actor(mut self, actor: u64) -> Self {
        self.actor = actor;
        self
    }

    pub fn with_a(mut self, a: u64) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: u64) -> Self {
        self.b = b;
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.events.iter().any(|e| e.tag == tag)
    }

    pub fn count(&self, tag: &str) -> usize {
        self.events.iter().filter(|e| e.tag == tag).count()
    }

    /// Tags in emission order, handy for asserting on whole transition sequences.
    pub fn tags(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.tag.as_ref()).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// Blackboard key for collecting events in-memory.
pub const TRACE_LOG: BbKey<TraceLog> = BbKey::new(0x60A9_7ACE_0000_0001);
/// Blackboard key for streaming events into a user-provided sink.
pub const TRACE_SINK: BbKey<Box<dyn TraceSink>> = BbKey::new(0x60A9_7ACE_0000_0002);

/// Record `event` into whichever of [`TRACE_LOG`] / [`TRACE_SINK`] the blackboard carries.
pub fn emit(blackboard: &mut Blackboard, event: TraceEvent) {
    if let Some(log) = blackboard.get_mut(TRACE_LOG) {
        log.push(event.clone());
    }
    if let Some(sink) = blackboard.get_mut(TRACE_SINK) {
        sink.emit(event);
    }
}
