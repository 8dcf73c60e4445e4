use std::cell::RefCell;
use std::rc::Rc;

use goap_core::Blackboard;
use goap_tools::{emit, tags, TraceEvent, TraceLog, TraceSink, TRACE_LOG, TRACE_SINK};

#[derive(Clone, Default)]
struct RcSink(Rc<RefCell<Vec<TraceEvent>>>);

impl TraceSink for RcSink {
    fn emit(&mut self, event: TraceEvent) {
        self.0.borrow_mut().push(event);
    }
}

#[test]
fn emit_writes_to_trace_log_when_present() {
    let mut bb = Blackboard::new();
    bb.set(TRACE_LOG, TraceLog::default());

    emit(
        &mut bb,
        TraceEvent::new(1, tags::ACTION_DONE)
            .with_actor(4)
            .with_a(10)
            .with_b(20),
    );

    let log = bb.get(TRACE_LOG).unwrap();
    assert_eq!(log.events.len(), 1);
    assert_eq!(log.events[0].tick, 1);
    assert_eq!(log.events[0].actor, 4);
    assert_eq!(log.events[0].tag, tags::ACTION_DONE);
    assert_eq!(log.events[0].a, 10);
    assert_eq!(log.events[0].b, 20);
}

#[test]
fn emit_writes_to_log_and_sink_when_both_present() {
    let mut bb = Blackboard::new();
    bb.set(TRACE_LOG, TraceLog::default());

    let handle = RcSink::default();
    let shared = handle.0.clone();
    bb.set(TRACE_SINK, Box::new(handle) as Box<dyn TraceSink>);

    emit(&mut bb, TraceEvent::new(3, tags::STALE));

    assert!(bb.get(TRACE_LOG).unwrap().contains(tags::STALE));
    let events = shared.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].tag, tags::STALE);
}

#[test]
fn emit_without_log_or_sink_is_a_no_op() {
    let mut bb = Blackboard::new();
    emit(&mut bb, TraceEvent::new(0, tags::IDLE));
    assert!(bb.is_empty());
}

#[test]
fn trace_log_helpers_report_tag_sequence() {
    let mut log = TraceLog::default();
    log.push(TraceEvent::new(0, tags::PLAN_CALL));
    log.push(TraceEvent::new(0, tags::PLAN_NONE));
    log.push(TraceEvent::new(1, tags::PLAN_CALL));

    assert_eq!(log.count(tags::PLAN_CALL), 2);
    assert_eq!(
        log.tags(),
        vec![tags::PLAN_CALL, tags::PLAN_NONE, tags::PLAN_CALL]
    );
    log.clear();
    assert!(!log.contains(tags::PLAN_CALL));
}
