use super::*;
use crate::collector::{METRIC_SESSION_READ_TIME, METRIC_SESSION_WRITE_TIME};

#[test]
fn test_registry_aggregates_samples() {
    let registry = MetricsRegistry::new();
    registry.add_custom_metric(METRIC_SESSION_READ_TIME, 0.5);
    registry.add_custom_metric(METRIC_SESSION_READ_TIME, 1.5);
    registry.add_custom_metric(METRIC_SESSION_READ_TIME, 1.0);

    let summary = registry.get(METRIC_SESSION_READ_TIME).unwrap();
    assert_eq!(summary.count, 3);
    assert_eq!(summary.sum, 3.0);
    assert_eq!(summary.min, 0.5);
    assert_eq!(summary.max, 1.5);
    assert_eq!(summary.last, 1.0);
    assert_eq!(summary.mean(), 1.0);
}

#[test]
fn test_registry_unknown_metric() {
    let registry = MetricsRegistry::new();
    assert!(registry.get("missing").is_none());
    assert!(registry.names().is_empty());
}

#[test]
fn test_registry_names_sorted() {
    let registry = MetricsRegistry::new();
    registry.add_custom_metric(METRIC_SESSION_WRITE_TIME, 0.1);
    registry.add_custom_metric(METRIC_SESSION_READ_TIME, 0.1);

    assert_eq!(
        registry.names(),
        vec![
            METRIC_SESSION_READ_TIME.to_string(),
            METRIC_SESSION_WRITE_TIME.to_string()
        ]
    );
}

#[test]
fn test_reset() {
    let registry = MetricsRegistry::new();
    registry.add_custom_metric(METRIC_SESSION_WRITE_TIME, 0.1);
    registry.reset();
    assert!(registry.get(METRIC_SESSION_WRITE_TIME).is_none());
}

#[test]
fn test_sanitize_name() {
    assert_eq!(
        MetricsRegistry::sanitize_name("File/Session_read_time"),
        "file_session_read_time"
    );
    assert_eq!(MetricsRegistry::sanitize_name("a b-c"), "a_b_c");
}

#[test]
fn test_export() {
    let registry = MetricsRegistry::new();
    registry.add_custom_metric(METRIC_SESSION_WRITE_TIME, 0.25);
    registry.add_custom_metric(METRIC_SESSION_WRITE_TIME, 0.5);

    let output = registry.export();
    assert!(output.contains("# HELP file_session_write_time File/Session_write_time"));
    assert!(output.contains("# TYPE file_session_write_time summary"));
    assert!(output.contains("file_session_write_time_sum 0.75"));
    assert!(output.contains("file_session_write_time_count 2"));
    assert!(output.contains("file_session_write_time_max 0.5"));
}

#[test]
fn test_export_empty() {
    assert_eq!(MetricsRegistry::default().export(), "");
}
