//! Translation metrics for observability.
//!
//! Counts every translation request the engine makes and how it ended:
//! success, backend failure, timeout, and the placeholders substituted for
//! the latter two.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lock-free counters shared by concurrent translation calls.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    requests: AtomicUsize,
    successes: AtomicUsize,
    failures: AtomicUsize,
    timeouts: AtomicUsize,
    placeholders: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_timeout(&self) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a placeholder substituted for an unavailable translation.
    pub fn record_placeholder(&self) {
        self.placeholders.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn timeouts(&self) -> usize {
        self.timeouts.load(Ordering::Relaxed)
    }

    pub fn placeholders(&self) -> usize {
        self.placeholders.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let requests = self.requests();
        let successes = self.successes();
        let success_rate = if requests > 0 {
            (successes as f64 / requests as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            requests,
            successes,
            failures: self.failures(),
            timeouts: self.timeouts(),
            placeholders: self.placeholders(),
            success_rate,
        }
    }
}

/// Snapshot of the translation counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub requests: usize,
    pub successes: usize,
    pub failures: usize,
    pub timeouts: usize,
    pub placeholders: usize,

    /// Success rate as a percentage (0-100)
    pub success_rate: f64,
}
