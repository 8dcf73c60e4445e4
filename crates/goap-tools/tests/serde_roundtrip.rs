#![cfg(feature = "serde")]

use goap_tools::{tags, TraceEvent, TraceLog};

#[test]
fn trace_log_json_roundtrip() {
    let log = TraceLog {
        events: vec![
            TraceEvent::new(1, tags::PLAN_CALL).with_a(0b01).with_b(0b10),
            TraceEvent::new(1, tags::PLAN_ACCEPTED).with_actor(2).with_a(2),
            TraceEvent::new(4, "game.custom").with_a(3).with_b(4),
        ],
    };

    let json = serde_json::to_string(&log).expect("serialize");
    let roundtrip: TraceLog = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(roundtrip, log);
}
