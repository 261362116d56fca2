#![allow(clippy::unwrap_used, clippy::expect_used)]

use dumpkit_core::core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_COMPONENT, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_KEPT, FIELD_TABLE,
};
use dumpkit_core::errors::DumpError;
use dumpkit_core::logging_facility::test_capture::init_test_capture;
use dumpkit_core::{log_op_end, log_op_error, log_op_start, Dump, ExtractOptions};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, table = "wp_posts");

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].fields.get(FIELD_TABLE), Some(&"wp_posts".to_string()));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].fields.get(FIELD_DURATION_MS), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = DumpError::TableNotFound {
        table: "qa_posts".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one error event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(
        events[0].fields.get(FIELD_ERR_CODE),
        Some(&"ERR_NOT_FOUND".to_string())
    );
    assert_eq!(events[0].fields.get(FIELD_DURATION_MS), Some(&"10".to_string()));
}

#[test]
fn test_macro_field_names_match_schema_constants() {
    let capture = init_test_capture();
    let op_name = "test_schema_field_names_unique_4";

    log_op_start!(op_name, table = "qa_posts");
    log_op_end!(op_name, duration_ms = 7, table = "qa_posts", kept = 3);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 2);
    for event in &events {
        assert!(event.fields.contains_key(FIELD_COMPONENT));
        assert_eq!(event.fields.get(FIELD_TABLE), Some(&"qa_posts".to_string()));
        assert_eq!(event.component, event.fields.get(FIELD_COMPONENT).cloned());
    }
    assert_eq!(events[1].fields.get(FIELD_DURATION_MS), Some(&"7".to_string()));
    assert_eq!(events[1].fields.get(FIELD_KEPT), Some(&"3".to_string()));
}

#[test]
fn test_extract_emits_single_start_and_end() {
    let capture = init_test_capture();
    let table = "logging_extract_table";
    let dump = Dump::from_text(format!(
        "CREATE TABLE `{t}` (`id` int);\nINSERT INTO `{t}` VALUES (1),(2);",
        t = table
    ));

    dump.extract(table, &ExtractOptions::default()).unwrap();

    let for_table: Vec<_> = capture
        .events_for_op("extract")
        .into_iter()
        .filter(|e| e.fields.get(FIELD_TABLE).map(String::as_str) == Some(table))
        .collect();
    let starts = for_table
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_START))
        .count();
    let ends: Vec<_> = for_table
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(starts, 1);
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].fields.get(FIELD_KEPT), Some(&"2".to_string()));
}

#[test]
fn test_failed_extract_emits_end_error() {
    let capture = init_test_capture();
    let table = "logging_missing_table";
    let dump = Dump::from_text("CREATE TABLE `other` (`id` int);");

    assert!(dump.extract(table, &ExtractOptions::default()).is_err());

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some("extract")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.fields.get(FIELD_TABLE).map(String::as_str) == Some(table)
    });
    assert_eq!(errors, 1);
}
