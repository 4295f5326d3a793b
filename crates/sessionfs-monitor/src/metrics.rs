//! Prometheus-style timing registry.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::trace;

use crate::collector::MetricsCollector;

/// Aggregated samples recorded under one metric name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSummary {
    /// Number of samples.
    pub count: u64,
    /// Sum of all samples.
    pub sum: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Most recent sample.
    pub last: f64,
}

impl TimingSummary {
    fn first(value: f64) -> Self {
        Self {
            count: 1,
            sum: value,
            min: value,
            max: value,
            last: value,
        }
    }

    fn observe(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.last = value;
    }

    /// Mean of all samples.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Metrics registry.
///
/// Keeps one [`TimingSummary`] per metric name. Names are kept verbatim for
/// lookups and sanitized only when exporting.
pub struct MetricsRegistry {
    timings: RwLock<BTreeMap<String, TimingSummary>>,
}

impl MetricsRegistry {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        Self {
            timings: RwLock::new(BTreeMap::new()),
        }
    }

    /// Get the summary recorded under `name`.
    pub fn get(&self, name: &str) -> Option<TimingSummary> {
        self.timings.read().get(name).copied()
    }

    /// Names with at least one sample, sorted.
    pub fn names(&self) -> Vec<String> {
        self.timings.read().keys().cloned().collect()
    }

    /// Drop every recorded sample.
    pub fn reset(&self) {
        self.timings.write().clear();
    }

    /// Export metrics in Prometheus format.
    pub fn export(&self) -> String {
        let timings = self.timings.read();
        let mut output = String::new();

        for (name, summary) in timings.iter() {
            let metric = Self::sanitize_name(name);

            output.push_str(&format!("# HELP {} {}\n", metric, name));
            output.push_str(&format!("# TYPE {} summary\n", metric));
            output.push_str(&format!("{}_sum {}\n", metric, summary.sum));
            output.push_str(&format!("{}_count {}\n", metric, summary.count));
            output.push_str(&format!("# TYPE {}_max gauge\n", metric));
            output.push_str(&format!("{}_max {}\n", metric, summary.max));
        }

        output
    }

    /// Map a free-form metric name onto the Prometheus charset.
    fn sanitize_name(name: &str) -> String {
        name.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector for MetricsRegistry {
    fn add_custom_metric(&self, name: &str, value: f64) {
        trace!(metric = name, value, "recording sample");
        let mut timings = self.timings.write();
        match timings.get_mut(name) {
            Some(summary) => summary.observe(value),
            None => {
                timings.insert(name.to_string(), TimingSummary::first(value));
            }
        }
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
