use goap_core::{BbKey, Blackboard};

const TARGET: BbKey<u64> = BbKey::new(1);
const LABEL: BbKey<String> = BbKey::new(2);

#[test]
fn blackboard_set_get_remove_roundtrip() {
    let mut bb = Blackboard::new();
    assert!(!bb.contains(TARGET));
    assert!(bb.is_empty());

    bb.set(TARGET, 7);
    bb.set(LABEL, "mercenary".to_string());

    assert_eq!(bb.get(TARGET).copied(), Some(7));
    assert_eq!(bb.get(LABEL).map(|s| s.as_str()), Some("mercenary"));
    assert_eq!(bb.len(), 2);

    assert_eq!(bb.remove(TARGET), Some(7));
    assert_eq!(bb.get(TARGET), None);
}

#[test]
fn get_or_insert_with_only_builds_once() {
    let mut bb = Blackboard::new();
    *bb.get_or_insert_with(TARGET, || 1) += 1;
    *bb.get_or_insert_with(TARGET, || 100) += 1;
    assert_eq!(bb.get(TARGET).copied(), Some(3));
}

#[test]
#[should_panic(expected = "blackboard type mismatch")]
fn blackboard_type_mismatch_panics() {
    let mut bb = Blackboard::new();
    bb.set(BbKey::<u32>::new(9), 1u32);
    let _ = bb.get(BbKey::<i32>::new(9));
}
