#![allow(clippy::unwrap_used, clippy::expect_used)]

use crm_core::errors::CrmError;
use crm_core::logging_facility::test_capture::init_test_capture;
use crm_core::model::EntityKind;
use crm_core::{log_op_end, log_op_error, log_op_start};
use crm_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let events = capture.events_for_op(op_name);
    assert!(
        events.iter().any(|e| e.event.as_deref() == Some(EVENT_START)),
        "Should have captured a start event"
    );
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = CrmError::RecordNotFound {
        kind: EntityKind::Account,
        id: "001x".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    let event = &error_events[0];
    assert_eq!(event.level, tracing::Level::ERROR);
    assert_eq!(event.field("err_code"), Some("ERR_NOT_FOUND"));
    assert_eq!(event.field("err_kind"), Some("NotFound"));
}

#[test]
fn test_boundary_single_start_end_pair() {
    let capture = init_test_capture();
    let op_name = "test_boundary_unique_4";

    log_op_start!(op_name, entity_kind = "Account");
    log_op_end!(op_name, duration_ms = 1, record_id = "001a");

    let events = capture.events_for_op(op_name);
    let starts = events
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_START))
        .count();
    let ends = events
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .count();

    assert_eq!(starts, 1);
    assert_eq!(ends, 1);
    assert_eq!(events[0].field("entity_kind"), Some("Account"));
    assert_eq!(events[1].field("record_id"), Some("001a"));
}
