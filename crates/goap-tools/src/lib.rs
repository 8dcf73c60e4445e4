//! Tooling primitives for deterministic GOAP actors.
//!
//! Trace events are plain data recorded into an actor's blackboard while it plans and executes,
//! so tests and debug tools can assert on exactly what a controller did on which tick.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{
    emit, tags, NullTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink, TRACE_LOG,
    TRACE_SINK,
};
