//! Query filter over the reconciled timeline

use contracts::MergedRecord;

/// Filter records by case-insensitive substring
///
/// An empty query returns the full sequence unchanged; otherwise a record
/// is kept when the query occurs in any of its rendered fields (unit
/// names, window dates, release types). Output preserves input order.
pub fn filter_records<'a>(records: &'a [MergedRecord], query: &str) -> Vec<&'a MergedRecord> {
    if query.is_empty() {
        return records.iter().collect();
    }

    records.iter().filter(|r| r.matches_query(query)).collect()
}
