//! Translation lookup observability.
//!
//! A missing translation never fails a request, it silently renders the raw
//! key. These counters make that degradation visible: every lookup records
//! whether it hit the requested locale, fell back to the default locale, or
//! missed entirely.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Global translation metrics singleton.
pub struct TranslationMetrics {
    /// Lookups resolved in the requested locale
    hits: AtomicUsize,

    /// Lookups resolved only through the default-locale fallback
    fallbacks: AtomicUsize,

    /// Lookups that degraded to the raw key
    misses: AtomicUsize,
}

static METRICS: OnceLock<TranslationMetrics> = OnceLock::new();

impl TranslationMetrics {
    /// Get the global metrics instance.
    pub fn global() -> &'static TranslationMetrics {
        METRICS.get_or_init(|| TranslationMetrics {
            hits: AtomicUsize::new(0),
            fallbacks: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        })
    }

    /// Record a lookup resolved in the requested locale.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup resolved through the default-locale fallback.
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that returned the raw key.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let fallbacks = self.fallbacks();
        let misses = self.misses();
        let total = hits + fallbacks + misses;
        let miss_rate = if total > 0 {
            (misses as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups: total,
            hits,
            fallbacks,
            misses,
            miss_rate,
        }
    }

    /// Reset all counters to zero (useful for testing).
    #[cfg(test)]
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.fallbacks.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of the translation lookup counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Total lookups observed
    pub lookups: usize,

    /// Lookups resolved in the requested locale
    pub hits: usize,

    /// Lookups resolved through the default-locale fallback
    pub fallbacks: usize,

    /// Lookups that degraded to the raw key
    pub misses: usize,

    /// Misses as a percentage of all lookups (0-100)
    pub miss_rate: f64,
}
