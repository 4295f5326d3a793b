//! Metrics collector capability.

use tracing::debug;

/// Elapsed seconds spent deleting a session file.
pub const METRIC_SESSION_DELETE_TIME: &str = "File/Session_delete_time";

/// Elapsed seconds spent writing a session file.
pub const METRIC_SESSION_WRITE_TIME: &str = "File/Session_write_time";

/// Elapsed seconds spent reading a session file.
pub const METRIC_SESSION_READ_TIME: &str = "File/Session_read_time";

/// Sink for named numeric metrics.
///
/// Recording never fails from the caller's point of view. Implementations
/// that talk to a remote monitoring API must absorb their own errors.
pub trait MetricsCollector: Send + Sync {
    /// Record `value` under `name`.
    fn add_custom_metric(&self, name: &str, value: f64);
}

/// Collector that emits every sample as a tracing event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCollector;

impl MetricsCollector for LogCollector {
    fn add_custom_metric(&self, name: &str, value: f64) {
        debug!(metric = name, value, "custom metric");
    }
}

/// Collector that discards every sample.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCollector;

impl MetricsCollector for NoopCollector {
    fn add_custom_metric(&self, _name: &str, _value: f64) {}
}
