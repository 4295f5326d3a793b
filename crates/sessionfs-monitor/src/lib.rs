//! # sessionfs Monitor
//!
//! Metrics collection for session stores.
//!
//! ## Features
//!
//! - A single-capability [`MetricsCollector`] trait ("record named metric")
//! - In-process aggregation with Prometheus text export
//! - Tracing-backed and no-op collectors

pub mod collector;
pub mod metrics;

pub use collector::{
    LogCollector, MetricsCollector, NoopCollector, METRIC_SESSION_DELETE_TIME,
    METRIC_SESSION_READ_TIME, METRIC_SESSION_WRITE_TIME,
};
pub use metrics::{MetricsRegistry, TimingSummary};
