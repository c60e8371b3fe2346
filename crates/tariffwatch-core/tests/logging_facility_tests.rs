#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{date, full_row, raw_row, record};
use tariffwatch_core::errors::TariffWatchError;
use tariffwatch_core::logging_facility::test_capture::init_test_capture;
use tariffwatch_core::snapshot::build_snapshot;
use tariffwatch_core::{compute_diff, log_op_end, log_op_error, log_op_start, Snapshot};
use tariffwatch_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ADDED, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_RATE_CHANGED, FIELD_RECORDS, FIELD_REMOVED, FIELD_SKIPPED,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = TariffWatchError::SchemaMismatch {
        previous: 0,
        current: 1,
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    let error_event = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");
    assert_eq!(error_event.field(FIELD_ERR_CODE), Some("ERR_SCHEMA_MISMATCH"));
    assert!(error_event.field("message").unwrap().contains("v0"));
}

#[test]
fn test_log_macros_with_multiple_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_4";

    log_op_start!(op_name, hts_code = "6111201000", rows = 12u64);

    let start_event = capture
        .events_for_op(op_name)
        .into_iter()
        .next()
        .expect("Should have start event");
    assert_eq!(start_event.field("hts_code"), Some("6111201000"));
    assert_eq!(start_event.field("rows"), Some("12"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_build_snapshot_logs_counts() {
    let capture = init_test_capture();
    let rows = vec![
        full_row("0101.21.00", "Horses", "Free", ""),
        raw_row(&[("hts_code", "")]),
    ];

    build_snapshot(date("1999-01-04"), &rows);

    let end = capture
        .events_for_op("build_snapshot")
        .into_iter()
        .find(|e| {
            e.event.as_deref() == Some(EVENT_END)
                && e.field(FIELD_SKIPPED) == Some("1")
                && e.field(FIELD_RECORDS) == Some("1")
        });
    assert!(end.is_some(), "build_snapshot should log an end event with counts");

    let warned = capture.count_events(|e| {
        e.op.as_deref() == Some("build_snapshot")
            && e.fields.values().any(|v| v.contains("skipping malformed row"))
    });
    assert!(warned >= 1);
}

#[test]
fn test_compute_diff_boundary_events() {
    let capture = init_test_capture();
    let prev = Snapshot::new(
        date("1999-12-27"),
        vec![record("01", "a", "1%", ""), record("02", "b", "1%", "")],
    );
    let curr = Snapshot::new(
        date("2000-01-03"),
        vec![record("02", "b", "2%", ""), record("03", "c", "1%", "")],
    );

    compute_diff(&prev, &curr);

    let ours = capture.events_for_op("compute_diff");
    assert!(ours.iter().any(|e| {
        e.event.as_deref() == Some(EVENT_START) && e.field("current_date") == Some("2000-01-03")
    }));
    assert!(ours.iter().any(|e| {
        e.event.as_deref() == Some(EVENT_END)
            && e.field(FIELD_ADDED) == Some("1")
            && e.field(FIELD_REMOVED) == Some("1")
            && e.field(FIELD_RATE_CHANGED) == Some("1")
    }));
}
