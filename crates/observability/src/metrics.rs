//! Load-cycle metric recording
//!
//! Run-level counters and gauges for the reconciliation pipeline. Ingestion
//! row counters are emitted at the parse site; everything derived from a
//! reconciliation run is recorded here.

use metrics::{counter, gauge};

/// One reconciliation run's headline numbers
#[derive(Debug, Clone, Copy, Default)]
pub struct RunMetrics {
    /// Records emitted
    pub records: usize,
    /// Both windows observed, exact key
    pub matched_exact: usize,
    /// Both windows observed, unit-set fallback
    pub matched_units_only: usize,
    /// Global window inferred from the offset
    pub predicted: usize,
    /// Asia-only, no offset available
    pub unmatched: usize,
    /// Seeded from a never-claimed Global banner
    pub global_only: usize,
}

/// Record one reconciliation run
///
/// Call once per load cycle, after the engine returns.
pub fn record_run_metrics(run: &RunMetrics) {
    counter!("banner_sync_runs_total").increment(1);

    gauge!("banner_sync_records").set(run.records as f64);
    gauge!("banner_sync_records_predicted").set(run.predicted as f64);
    gauge!("banner_sync_records_global_only").set(run.global_only as f64);

    record_match_tier("exact", run.matched_exact);
    record_match_tier("units_only", run.matched_units_only);
    record_match_tier("predicted", run.predicted);
    record_match_tier("unmatched", run.unmatched);
}

/// Record the estimated cross-region delay
///
/// `None` means prediction was disabled for the run.
pub fn record_offset_estimate(offset_days: Option<i64>) {
    match offset_days {
        Some(days) => {
            gauge!("banner_sync_offset_days").set(days as f64);
            gauge!("banner_sync_offset_available").set(1.0);
        }
        None => {
            gauge!("banner_sync_offset_available").set(0.0);
            counter!("banner_sync_offset_unavailable_total").increment(1);
        }
    }
}

fn record_match_tier(tier: &'static str, count: usize) {
    if count > 0 {
        counter!("banner_sync_matches_total", "tier" => tier).increment(count as u64);
    }
}
