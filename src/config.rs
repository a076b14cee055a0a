//! Crate-wide defaults.
//!
//! Mirrors the "module-scope immutable value constructed once at first use" pattern
//! used throughout the calendar design (see DESIGN.md): a single [`ComputeConfig`]
//! is built lazily and shared read-only across threads.

use std::sync::OnceLock;

use chrono_tz::Tz;

/// Defaults governing compute parallelism and calendar caching.
#[derive(Debug, Clone)]
pub struct ComputeConfig {
    /// Output timezone used by `schedule()` and `days_at_time()` when the caller
    /// does not specify one.
    pub default_output_tz: Tz,
    /// Capacity of the `MarketCalendar::schedule` LRU result cache.
    pub schedule_cache_capacity: usize,
    /// Column-wise dispatch stays sequential below this many columns; the
    /// `rayon` pool is only worth the spawn overhead above it.
    pub parallel_column_threshold: usize,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            default_output_tz: Tz::UTC,
            schedule_cache_capacity: 32,
            parallel_column_threshold: 8,
        }
    }
}

static CONFIG: OnceLock<ComputeConfig> = OnceLock::new();

/// Returns the process-wide compute configuration, initializing it on first call.
pub fn config() -> &'static ComputeConfig {
    CONFIG.get_or_init(ComputeConfig::default)
}
