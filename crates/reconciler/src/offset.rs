//! Regional offset estimation
//!
//! Derives a single Asia→Global delay per load cycle by anchoring on the
//! most recent Global banner and locating its Asia counterpart. The Asia
//! feed is scanned in reverse so that when a key repeats (a unit gets a
//! second banner), the most recently added entry supplies the delay.

use chrono::Duration;
use tracing::{debug, instrument, warn};

use contracts::Banner;

/// Estimate the cross-region release delay
///
/// Returns `None` when either feed is empty or the anchor banner has no
/// Asia counterpart under either matching tier; prediction is disabled for
/// the run in that case.
#[instrument(name = "estimate_offset", skip_all, fields(asia = asia.len(), global = global.len()))]
pub fn estimate_offset(asia: &[Banner], global: &[Banner]) -> Option<Duration> {
    if asia.is_empty() || global.is_empty() {
        warn!("a regional feed is empty, prediction disabled");
        return None;
    }

    // Freshest Global banner gives the most representative delay
    let anchor = global.iter().max_by_key(|b| b.start)?;

    let anchor_key = anchor.match_key();
    let counterpart = asia
        .iter()
        .rev()
        .find(|b| b.match_key() == anchor_key)
        .or_else(|| {
            // Release types routinely disagree across regions (a rerun on
            // one track ships as new content on the other), so fall back
            // to matching on the unit set alone.
            let unit_key = anchor.unit_key();
            asia.iter().rev().find(|b| b.unit_key() == unit_key)
        });

    match counterpart {
        Some(matched) => {
            let delay = anchor.start - matched.start;
            debug!(
                days = delay.num_days(),
                anchor_units = ?anchor.units,
                "regional offset estimated"
            );
            Some(delay)
        }
        None => {
            warn!(
                anchor_units = ?anchor.units,
                "anchor banner has no Asia counterpart, prediction disabled"
            );
            None
        }
    }
}
