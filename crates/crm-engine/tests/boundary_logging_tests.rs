#![allow(clippy::unwrap_used, clippy::expect_used)]

// Kept to a single test: the capture buffer is global to this binary and the
// assertions count events per operation name.

use crm_core::logging_facility::test_capture::init_test_capture;
use crm_core::{Command, FixedClock, InMemoryStore, RecordId};
use crm_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use crm_engine::RecordManager;

#[test]
fn test_each_call_emits_one_boundary_pair() {
    let capture = init_test_capture();
    let clock = FixedClock::at_date(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    let mut crm = RecordManager::new(InMemoryStore::new(), clock);

    crm.upsert_account("Acme").unwrap();
    let err = crm
        .update_account_industry(&RecordId::from("001nope"), "Energy")
        .unwrap_err();
    crm.execute(Command::LeadInsertAndDelete {
        last_names: vec!["X".to_string(), "Y".to_string()],
    })
    .unwrap();

    let count = |op: &str, event: &str| {
        capture.count_events(|e| e.op.as_deref() == Some(op) && e.event.as_deref() == Some(event))
    };

    assert_eq!(count("upsert_account", EVENT_START), 1);
    assert_eq!(count("upsert_account", EVENT_END), 1);
    assert_eq!(count("upsert_account", EVENT_END_ERROR), 0);

    assert_eq!(count("update_account_industry", EVENT_START), 1);
    assert_eq!(count("update_account_industry", EVENT_END), 0);
    assert_eq!(count("update_account_industry", EVENT_END_ERROR), 1);
    let error_event = capture
        .events_for_op("update_account_industry")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .unwrap();
    assert_eq!(error_event.field("err_code"), Some("ERR_NOT_FOUND"));
    assert_eq!(err.kind().code(), "ERR_NOT_FOUND");

    assert_eq!(count("insert_and_delete_leads", EVENT_START), 1);
    let end = capture
        .events_for_op("insert_and_delete_leads")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .unwrap();
    assert_eq!(end.field("batch_len"), Some("2"));

    // Operations and stores below the boundary never emit start events
    assert!(capture
        .events()
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_START))
        .all(|e| e
            .component
            .as_deref()
            .is_some_and(|c| c.starts_with("crm_engine"))));
}
