//! Dispatch order and fold behavior of the hook bus, exercised through the
//! public facade.

mod common;

use common::suffix_filter;
use microform::{
    ActionRef, Callback, DEFAULT_PRIORITY, FieldValue, FilterRef, bus::HookBus,
    testing::{FailingFilter, RecordingAction},
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

#[test]
fn filters_fold_in_priority_then_registration_order() {
    let bus = HookBus::<FieldValue>::new();
    let order = Arc::new(Mutex::new(Vec::new()));
    bus.add_filter("title", &suffix_filter("a", order.clone()), 10);
    bus.add_filter("title", &suffix_filter("b", order.clone()), 5);
    bus.add_filter("title", &suffix_filter("c", order.clone()), 10);

    let out = bus
        .apply_filters("title", FieldValue::text(">"), &FieldValue::Null)
        .unwrap();
    assert_eq!(out, FieldValue::text(">bac"));
    assert_eq!(*order.lock().unwrap(), vec!["b", "a", "c"]);
}

#[test]
fn every_filter_sees_the_same_options() {
    let bus = HookBus::<FieldValue>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    for _ in 0..3 {
        let seen = seen.clone();
        let f: FilterRef<FieldValue> = Callback::filter(move |v: FieldValue, options: &FieldValue| {
            seen.lock().unwrap().push(options.clone());
            Ok(v)
        });
        bus.add_filter("t", &f, DEFAULT_PRIORITY);
    }
    bus.apply_filters("t", FieldValue::Null, &FieldValue::text("opts"))
        .unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![FieldValue::text("opts"); 3]);
}

#[test]
fn unregistered_tags_are_no_ops() {
    let bus = HookBus::<FieldValue>::new();
    let value = FieldValue::map([("k", FieldValue::Bool(true))]);
    assert_eq!(
        bus.apply_filters("nobody", value.clone(), &FieldValue::Null)
            .unwrap(),
        value
    );
    assert!(bus.run_action("nobody", &FieldValue::Null).is_ok());
    assert!(!bus.has_actions("nobody"));
}

#[test]
fn removal_matches_identity() {
    let bus = HookBus::<FieldValue>::new();
    let recorder = RecordingAction::new();
    let kept: ActionRef<FieldValue> = recorder.handle();
    let dropped: ActionRef<FieldValue> = recorder.handle();
    bus.add_action("submit", &kept, DEFAULT_PRIORITY);
    bus.add_action("submit", &dropped, DEFAULT_PRIORITY);

    bus.remove_action("submit", &dropped);
    bus.run_action("submit", &FieldValue::Null).unwrap();
    assert_eq!(recorder.count(), 1);
    assert_eq!(bus.action_count("submit"), 1);
}

#[test]
fn failure_names_the_tag() {
    let bus = HookBus::<FieldValue>::new();
    bus.add_filter(
        "submitting",
        &FilterRef::from_filter(FailingFilter::new("boom")),
        DEFAULT_PRIORITY,
    );
    let err = bus
        .apply_filters("submitting", FieldValue::Null, &FieldValue::Null)
        .unwrap_err();
    assert_eq!(err.tag(), "submitting");
    assert!(err.to_string().contains("submitting"));
}

proptest! {
    #[test]
    fn dispatch_order_is_a_stable_sort_by_priority(priorities in prop::collection::vec(-3i32..3, 0..24)) {
        let bus = HookBus::<FieldValue>::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for (index, priority) in priorities.iter().enumerate() {
            let order = order.clone();
            let action: ActionRef<FieldValue> = Callback::action(move |_: &FieldValue| {
                order.lock().unwrap().push(index);
                Ok(())
            });
            bus.add_action("tick", &action, *priority);
        }
        bus.run_action("tick", &FieldValue::Null).unwrap();

        let mut expected: Vec<usize> = (0..priorities.len()).collect();
        expected.sort_by_key(|&i| priorities[i]);
        prop_assert_eq!(order.lock().unwrap().clone(), expected);
    }

    #[test]
    fn removing_every_handle_empties_the_tag(count in 0usize..12) {
        let bus = HookBus::<FieldValue>::new();
        let handles: Vec<ActionRef<FieldValue>> = (0..count)
            .map(|_| Callback::action(|_: &FieldValue| Ok(())))
            .collect();
        for (i, handle) in handles.iter().enumerate() {
            bus.add_action("tick", handle, i as i32 % 3);
        }
        prop_assert_eq!(bus.action_count("tick"), count);
        for handle in &handles {
            bus.remove_action("tick", handle);
        }
        prop_assert!(!bus.has_actions("tick"));
    }
}
