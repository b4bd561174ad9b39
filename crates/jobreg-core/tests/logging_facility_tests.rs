#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{new_store, seed_registry};
use jobreg_core::errors::RegistryError;
use jobreg_core::logging_facility::test_capture::init_test_capture;
use jobreg_core::model::EntityKind;
use jobreg_core::ops::application_ops;
use jobreg_core::{log_op_end, log_op_error, log_op_start};
use jobreg_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let events = capture.events();
    let start_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START))
        .collect();

    assert!(
        !start_events.is_empty(),
        "Should have captured at least one start event"
    );
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");

    let end_event = end_events[0];
    assert_eq!(end_event.fields.get("duration_ms"), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = RegistryError::EntityNotFound {
        kind: EntityKind::Application,
        id: "app1".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1);
    let error_event = error_events[0];
    assert_eq!(
        error_event.fields.get("err_code"),
        Some(&"ERR_NOT_FOUND".to_string())
    );
}

#[test]
fn test_cascading_delete_emits_structured_events() {
    let capture = init_test_capture();

    let mut store = new_store();
    seed_registry(&mut store);
    application_ops::delete_application(&mut store, "app1").unwrap();

    capture.assert_event_exists("delete_application", EVENT_START);
    capture.assert_event_exists("delete_application", EVENT_END);

    let cascade_events = capture.count_events(|e| {
        e.op.as_deref() == Some("delete_application")
            && e.event.as_deref() == Some(EVENT_END)
            && e.fields.get("cascade_len") == Some(&"1".to_string())
    });
    assert!(cascade_events >= 1, "end event should carry the cascade size");
}
