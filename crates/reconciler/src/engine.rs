//! Cross-region matching engine
//!
//! Two-pass greedy matching over the Asia feed in source order, with an
//! explicit claim marker per Global row:
//!
//! 1. exact key match (sorted units + release type) against unclaimed
//!    Global rows in source order;
//! 2. unit-set-only match against the remaining unclaimed rows;
//! 3. no match: seed from the Asia banner alone and predict the Global
//!    window from the regional offset when one is known.
//!
//! Global rows never claimed by the Asia pass become Global-only records.
//! Every tie is broken by "first available in source order"; duplicate-key
//! ambiguity is resolved by claim order, which is the accepted
//! approximation for banners sharing an identical key.

use chrono::Duration;
use serde::Serialize;
use tracing::{debug, instrument};

use contracts::{Banner, MergedRecord, MergedRecordBuilder};

/// Which matching tier connected a record's two regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// Sorted units + release type agreed
    Exact,
    /// Only the unit sets agreed; release types may differ
    UnitsOnly,
}

/// Per-run match counters, derived data only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    /// Records with both windows observed, exact key
    pub matched_exact: usize,
    /// Records with both windows observed, unit-set fallback
    pub matched_units_only: usize,
    /// Asia-only records with an inferred Global window
    pub predicted: usize,
    /// Asia-only records left without a Global window (offset unknown)
    pub unmatched: usize,
    /// Records seeded from a never-claimed Global banner
    pub global_only: usize,
}

impl ReconcileStats {
    /// Total records emitted
    pub fn total(&self) -> usize {
        self.matched_exact
            + self.matched_units_only
            + self.predicted
            + self.unmatched
            + self.global_only
    }
}

/// Reconciled timeline plus its run counters
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// Records sorted most recent first
    pub records: Vec<MergedRecord>,
    pub stats: ReconcileStats,
}

/// Reconcile both regional feeds into one ordered timeline
///
/// Consumes the feeds in source order and a single offset estimate reused
/// for every prediction within the run. Output ordering is descending by
/// effective date (Global start when present, else Asia start), stable for
/// ties.
#[instrument(name = "reconcile", skip_all, fields(asia = asia.len(), global = global.len(), offset_known = offset.is_some()))]
pub fn reconcile(
    asia: &[Banner],
    global: &[Banner],
    offset: Option<Duration>,
) -> ReconcileOutcome {
    let mut claimed = vec![false; global.len()];
    let mut records = Vec::with_capacity(asia.len() + global.len());
    let mut stats = ReconcileStats::default();

    for banner in asia {
        let builder = MergedRecordBuilder::from_asia(banner);

        let record = match claim_counterpart(banner, global, &mut claimed) {
            Some((idx, MatchTier::Exact)) => {
                stats.matched_exact += 1;
                builder.global_observed(&global[idx])
            }
            Some((idx, MatchTier::UnitsOnly)) => {
                stats.matched_units_only += 1;
                builder.global_observed(&global[idx])
            }
            None => match offset {
                Some(offset) => {
                    stats.predicted += 1;
                    builder.global_predicted(offset)
                }
                None => {
                    stats.unmatched += 1;
                    builder
                }
            },
        };

        records.push(record.freeze());
    }

    // Cross-region exclusives: Global banners no Asia entry ever claimed
    for (idx, banner) in global.iter().enumerate() {
        if !claimed[idx] {
            stats.global_only += 1;
            records.push(MergedRecordBuilder::from_global(banner).freeze());
        }
    }

    sort_records(&mut records);

    debug!(
        matched_exact = stats.matched_exact,
        matched_units_only = stats.matched_units_only,
        predicted = stats.predicted,
        unmatched = stats.unmatched,
        global_only = stats.global_only,
        "feeds reconciled"
    );

    ReconcileOutcome { records, stats }
}

/// Claim the first compatible unclaimed Global row
///
/// Exact-key scan first, unit-set fallback second, both in source order.
/// A claimed row is never claimable again.
fn claim_counterpart(
    banner: &Banner,
    global: &[Banner],
    claimed: &mut [bool],
) -> Option<(usize, MatchTier)> {
    let key = banner.match_key();
    for (idx, candidate) in global.iter().enumerate() {
        if !claimed[idx] && candidate.match_key() == key {
            claimed[idx] = true;
            return Some((idx, MatchTier::Exact));
        }
    }

    let unit_key = banner.unit_key();
    for (idx, candidate) in global.iter().enumerate() {
        if !claimed[idx] && candidate.unit_key() == unit_key {
            claimed[idx] = true;
            return Some((idx, MatchTier::UnitsOnly));
        }
    }

    None
}

/// Most recent first; stable, so equal effective dates keep input order
fn sort_records(records: &mut [MergedRecord]) {
    records.sort_by(|a, b| b.effective_date().cmp(&a.effective_date()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use contracts::{Region, ReleaseType};

    fn dt(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap()
    }

    fn make_banner(
        region: Region,
        units: &[&str],
        release_type: ReleaseType,
        start: NaiveDateTime,
    ) -> Banner {
        Banner {
            image_url: format!("https://img.example.com/{}.png", units.join("_")),
            units: units.iter().map(|u| u.to_string()).collect(),
            start,
            end: start + Duration::days(14),
            region,
            release_type,
        }
    }

    fn asia(units: &[&str], rt: ReleaseType, start: NaiveDateTime) -> Banner {
        make_banner(Region::Asia, units, rt, start)
    }

    fn global(units: &[&str], rt: ReleaseType, start: NaiveDateTime) -> Banner {
        make_banner(Region::Global, units, rt, start)
    }

    #[test]
    fn test_exact_match_joins_both_windows() {
        let a = vec![asia(&["Shiroko"], ReleaseType::New, dt(2024, 1, 1))];
        let g = vec![global(&["Shiroko"], ReleaseType::New, dt(2024, 7, 1))];

        let outcome = reconcile(&a, &g, None);

        assert_eq!(outcome.records.len(), 1);
        let record = &outcome.records[0];
        assert!(!record.predicted);
        assert_eq!(record.asia.as_ref().unwrap().start, dt(2024, 1, 1));
        assert_eq!(record.global.as_ref().unwrap().start, dt(2024, 7, 1));
        assert_eq!(outcome.stats.matched_exact, 1);
    }

    #[test]
    fn test_fallback_match_keeps_differing_release_types() {
        let a = vec![asia(&["Hina"], ReleaseType::Rerun, dt(2024, 1, 1))];
        let g = vec![global(&["Hina"], ReleaseType::New, dt(2024, 7, 1))];

        let outcome = reconcile(&a, &g, Some(Duration::days(180)));

        let record = &outcome.records[0];
        assert!(!record.predicted, "observed match must not be predicted");
        assert_eq!(record.asia.as_ref().unwrap().release_type, ReleaseType::Rerun);
        assert_eq!(record.global.as_ref().unwrap().release_type, ReleaseType::New);
        assert_eq!(outcome.stats.matched_units_only, 1);
        assert_eq!(outcome.stats.predicted, 0);
    }

    #[test]
    fn test_prediction_shifts_window_by_offset() {
        let offset = Duration::days(183);
        let a = vec![asia(&["Mika"], ReleaseType::New, dt(2024, 2, 1))];

        let outcome = reconcile(&a, &[], Some(offset));

        let record = &outcome.records[0];
        assert!(record.predicted);
        let g = record.global.as_ref().unwrap();
        assert_eq!(g.start, dt(2024, 2, 1) + offset);
        assert_eq!(g.end, dt(2024, 2, 1) + Duration::days(14) + offset);
        assert_eq!(g.release_type, ReleaseType::New);
    }

    #[test]
    fn test_no_offset_leaves_global_absent() {
        let a = vec![asia(&["Mika"], ReleaseType::New, dt(2024, 2, 1))];

        let outcome = reconcile(&a, &[], None);

        let record = &outcome.records[0];
        assert!(!record.predicted);
        assert!(record.global.is_none());
        assert_eq!(outcome.stats.unmatched, 1);
    }

    #[test]
    fn test_global_exclusive_becomes_own_record() {
        let a = vec![asia(&["Shiroko"], ReleaseType::New, dt(2024, 1, 1))];
        let g = vec![
            global(&["Shiroko"], ReleaseType::New, dt(2024, 7, 1)),
            global(&["GlobalOnly"], ReleaseType::New, dt(2024, 8, 1)),
        ];

        let outcome = reconcile(&a, &g, None);

        assert_eq!(outcome.records.len(), 2);
        let exclusive = outcome
            .records
            .iter()
            .find(|r| r.units == vec!["GlobalOnly"])
            .unwrap();
        assert!(exclusive.asia.is_none());
        assert!(!exclusive.predicted);
        assert_eq!(outcome.stats.global_only, 1);
    }

    #[test]
    fn test_no_double_claiming() {
        // Two Asia banners with the same key, one Global counterpart:
        // first Asia entry claims it, second gets a prediction.
        let a = vec![
            asia(&["Aru"], ReleaseType::New, dt(2023, 1, 1)),
            asia(&["Aru"], ReleaseType::New, dt(2024, 1, 1)),
        ];
        let g = vec![global(&["Aru"], ReleaseType::New, dt(2023, 7, 1))];

        let outcome = reconcile(&a, &g, Some(Duration::days(181)));

        assert_eq!(outcome.records.len(), 2);
        let observed: Vec<_> = outcome.records.iter().filter(|r| !r.predicted).collect();
        let predicted: Vec<_> = outcome.records.iter().filter(|r| r.predicted).collect();
        assert_eq!(observed.len(), 1);
        assert_eq!(predicted.len(), 1);
        // The earlier Asia entry processed first claims the counterpart
        assert_eq!(
            observed[0].asia.as_ref().unwrap().start,
            dt(2023, 1, 1)
        );
    }

    #[test]
    fn test_record_count_conservation() {
        let a = vec![
            asia(&["A"], ReleaseType::New, dt(2024, 1, 1)),
            asia(&["B"], ReleaseType::New, dt(2024, 2, 1)),
            asia(&["C"], ReleaseType::New, dt(2024, 3, 1)),
        ];
        let g = vec![
            global(&["B"], ReleaseType::New, dt(2024, 8, 1)),
            global(&["X"], ReleaseType::New, dt(2024, 9, 1)),
            global(&["Y"], ReleaseType::New, dt(2024, 10, 1)),
        ];

        let outcome = reconcile(&a, &g, Some(Duration::days(180)));

        // len(asia) + unclaimed global
        assert_eq!(outcome.records.len(), 3 + 2);
        assert_eq!(outcome.stats.total(), outcome.records.len());
    }

    #[test]
    fn test_descending_stable_order() {
        let a = vec![
            asia(&["Old"], ReleaseType::New, dt(2023, 1, 1)),
            asia(&["New"], ReleaseType::New, dt(2024, 5, 1)),
            asia(&["Mid"], ReleaseType::New, dt(2023, 8, 1)),
        ];

        let outcome = reconcile(&a, &[], Some(Duration::days(180)));

        let dates: Vec<_> = outcome
            .records
            .iter()
            .map(|r| r.effective_date())
            .collect();
        for pair in dates.windows(2) {
            assert!(pair[0] >= pair[1], "order must be descending");
        }
        assert_eq!(outcome.records[0].units, vec!["New"]);
    }

    #[test]
    fn test_sort_prefers_global_start_over_asia() {
        // Asia-only record dated far in the future vs observed pair whose
        // global window is recent: the global start drives ordering.
        let a = vec![
            asia(&["Pair"], ReleaseType::New, dt(2023, 1, 1)),
            asia(&["Solo"], ReleaseType::New, dt(2023, 6, 1)),
        ];
        let g = vec![global(&["Pair"], ReleaseType::New, dt(2024, 1, 1))];

        let outcome = reconcile(&a, &g, None);

        // Pair's effective date is its global start (2024), Solo has only
        // its asia start (2023-06)
        assert_eq!(outcome.records[0].units, vec!["Pair"]);
        assert_eq!(outcome.records[1].units, vec!["Solo"]);
    }

    #[test]
    fn test_idempotence() {
        let a = vec![
            asia(&["A", "B"], ReleaseType::New, dt(2024, 1, 1)),
            asia(&["C"], ReleaseType::Rerun, dt(2024, 2, 1)),
            asia(&["D"], ReleaseType::New, dt(2024, 3, 1)),
        ];
        let g = vec![
            global(&["B", "A"], ReleaseType::New, dt(2024, 7, 1)),
            global(&["E"], ReleaseType::New, dt(2024, 8, 1)),
        ];
        let offset = estimate_and_check(&a, &g);

        let first = reconcile(&a, &g, offset);
        let second = reconcile(&a, &g, offset);

        assert_eq!(first.records, second.records);
        assert_eq!(first.stats, second.stats);

        let first_json = serde_json::to_string(&first.records).unwrap();
        let second_json = serde_json::to_string(&second.records).unwrap();
        assert_eq!(first_json, second_json);
    }

    fn estimate_and_check(a: &[Banner], g: &[Banner]) -> Option<Duration> {
        let offset = crate::estimate_offset(a, g);
        assert!(offset.is_some());
        offset
    }

    #[test]
    fn test_unit_order_insensitive_matching() {
        let a = vec![asia(&["A", "B"], ReleaseType::New, dt(2024, 1, 1))];
        let g = vec![global(&["B", "A"], ReleaseType::New, dt(2024, 7, 1))];

        let outcome = reconcile(&a, &g, None);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.stats.matched_exact, 1);
        // Display order comes from the seeding Asia banner
        assert_eq!(outcome.records[0].units, vec!["A", "B"]);
    }

    #[test]
    fn test_exact_match_preferred_over_earlier_fallback() {
        // A units-only candidate appears earlier in the Global feed than
        // the exact candidate; the exact scan runs first and must win.
        let a = vec![asia(&["Hoshino"], ReleaseType::Rerun, dt(2024, 1, 1))];
        let g = vec![
            global(&["Hoshino"], ReleaseType::New, dt(2024, 6, 1)),
            global(&["Hoshino"], ReleaseType::Rerun, dt(2024, 7, 1)),
        ];

        let outcome = reconcile(&a, &g, None);

        let matched = outcome
            .records
            .iter()
            .find(|r| r.asia.is_some() && r.global.is_some())
            .unwrap();
        assert_eq!(matched.global.as_ref().unwrap().start, dt(2024, 7, 1));
        assert_eq!(outcome.stats.matched_exact, 1);
        assert_eq!(outcome.stats.global_only, 1);
    }

    #[test]
    fn test_empty_inputs() {
        let outcome = reconcile(&[], &[], None);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.stats, ReconcileStats::default());
    }
}
