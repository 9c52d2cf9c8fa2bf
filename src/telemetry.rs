//! Metrics and crash-reporting collaborators.
//!
//! Both interfaces are fire-and-forget: implementations must not block the
//! request and must not fail it on their own error. Collaborators are
//! constructed once at process start and handed to the endpoints and
//! middleware that need them; there is no hidden process-wide state.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::server::request::Request;

/// Counter and timing sink.
pub trait MetricsSink: Send + Sync {
    fn count(&self, name: &str);
    fn measure_duration(&self, name: &str, elapsed: Duration);
}

/// Crash-report sink for unhandled faults.
pub trait CrashReporter: Send + Sync {
    fn report(&self, description: &str, req: &Request);
}

/// In-process metrics store with readable counters.
///
/// Counters and timings are kept behind short-lived locks; a poisoned lock
/// is skipped rather than propagated, since metrics must never fail a
/// request.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    counters: Mutex<HashMap<String, u64>>,
    timings: Mutex<HashMap<String, (u64, Duration)>>,
}

impl InMemoryMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a counter, zero when never incremented.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        self.counters
            .lock()
            .map(|c| c.get(name).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Number of measurements recorded under `name`.
    #[must_use]
    pub fn timing_count(&self, name: &str) -> u64 {
        self.timings
            .lock()
            .ok()
            .and_then(|t| t.get(name).map(|(count, _)| *count))
            .unwrap_or(0)
    }

    /// Mean of all measurements recorded under `name`.
    #[must_use]
    pub fn average_duration(&self, name: &str) -> Duration {
        self.timings
            .lock()
            .ok()
            .and_then(|t| t.get(name).copied())
            .map(|(count, total)| {
                if count == 0 {
                    Duration::ZERO
                } else {
                    total / count as u32
                }
            })
            .unwrap_or(Duration::ZERO)
    }
}

impl MetricsSink for InMemoryMetrics {
    fn count(&self, name: &str) {
        if let Ok(mut counters) = self.counters.lock() {
            *counters.entry(name.to_string()).or_insert(0) += 1;
        }
    }

    fn measure_duration(&self, name: &str, elapsed: Duration) {
        if let Ok(mut timings) = self.timings.lock() {
            let entry = timings.entry(name.to_string()).or_insert((0, Duration::ZERO));
            entry.0 += 1;
            entry.1 += elapsed;
        }
    }
}

/// Metrics sink that drops everything.
pub struct NullMetrics;

impl MetricsSink for NullMetrics {
    fn count(&self, _name: &str) {}
    fn measure_duration(&self, _name: &str, _elapsed: Duration) {}
}

/// Crash reporter that emits a structured log event per fault.
pub struct LogReporter;

impl CrashReporter for LogReporter {
    fn report(&self, description: &str, req: &Request) {
        error!(
            method = %req.method,
            path = %req.path,
            description = %description,
            "fault reported"
        );
    }
}

/// Crash reporter that drops everything.
pub struct NullReporter;

impl CrashReporter for NullReporter {
    fn report(&self, _description: &str, _req: &Request) {}
}

/// Install the global `tracing` subscriber, honoring `RUST_LOG`.
///
/// Safe to call more than once; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = InMemoryMetrics::new();
        metrics.count("service.x.success");
        metrics.count("service.x.success");
        assert_eq!(metrics.counter("service.x.success"), 2);
        assert_eq!(metrics.counter("service.x.error"), 0);
    }

    #[test]
    fn average_duration_is_mean_of_measurements() {
        let metrics = InMemoryMetrics::new();
        metrics.measure_duration("service.x.runtime", Duration::from_millis(10));
        metrics.measure_duration("service.x.runtime", Duration::from_millis(30));
        assert_eq!(
            metrics.average_duration("service.x.runtime"),
            Duration::from_millis(20)
        );
        assert_eq!(metrics.average_duration("missing"), Duration::ZERO);
    }
}
