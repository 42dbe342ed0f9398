//! MergedRecord - Reconciler output
//!
//! The reconciled cross-region entity: one region's banner unified with its
//! observed or predicted counterpart in the other region.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{Banner, ReleaseType};

/// Display format for window dates
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Suffix appended to inferred global dates
pub const PREDICTED_SUFFIX: &str = " (Predicted)";

/// One region's slot inside a merged record
///
/// Nullable as a whole: a record either has a full window for a region or
/// nothing at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub release_type: ReleaseType,
}

impl RegionWindow {
    pub fn from_banner(banner: &Banner) -> Self {
        Self {
            start: banner.start,
            end: banner.end,
            release_type: banner.release_type,
        }
    }

    /// The same window shifted by a cross-region offset
    pub fn shifted(&self, offset: Duration) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            release_type: self.release_type,
        }
    }
}

/// Reconciled cross-region record
///
/// Frozen after the reconciliation pass; served to queries until the next
/// load cycle replaces the whole set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    /// Featured units from the seeding banner, in display order
    pub units: Vec<String>,

    /// Artwork URL from the seeding banner
    pub image_url: String,

    /// Asia window (observed), absent for global-only exclusives
    pub asia: Option<RegionWindow>,

    /// Global window (observed or predicted)
    pub global: Option<RegionWindow>,

    /// True only when `global` was inferred via the regional offset
    pub predicted: bool,
}

impl MergedRecord {
    /// Sort key: global start if present, else asia start, else the earliest
    /// representable instant.
    pub fn effective_date(&self) -> NaiveDateTime {
        self.global
            .as_ref()
            .map(|w| w.start)
            .or_else(|| self.asia.as_ref().map(|w| w.start))
            .unwrap_or(NaiveDateTime::MIN)
    }

    pub fn asia_start_str(&self) -> String {
        Self::format_date(self.asia.as_ref().map(|w| w.start), false)
    }

    pub fn asia_end_str(&self) -> String {
        Self::format_date(self.asia.as_ref().map(|w| w.end), false)
    }

    pub fn global_start_str(&self) -> String {
        Self::format_date(self.global.as_ref().map(|w| w.start), self.predicted)
    }

    pub fn global_end_str(&self) -> String {
        Self::format_date(self.global.as_ref().map(|w| w.end), self.predicted)
    }

    /// Case-insensitive substring match over the rendered record fields:
    /// joined unit names, all four window dates and both release types.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();

        if self.units.join(", ").to_lowercase().contains(&query) {
            return true;
        }

        let rendered = [
            self.asia_start_str(),
            self.asia_end_str(),
            self.global_start_str(),
            self.global_end_str(),
        ];
        if rendered.iter().any(|s| s.to_lowercase().contains(&query)) {
            return true;
        }

        self.asia
            .iter()
            .chain(self.global.iter())
            .any(|w| w.release_type.as_str().contains(&query))
    }

    fn format_date(date: Option<NaiveDateTime>, predicted: bool) -> String {
        match date {
            Some(date) => {
                let mut s = date.format(DISPLAY_DATE_FORMAT).to_string();
                if predicted {
                    s.push_str(PREDICTED_SUFFIX);
                }
                s
            }
            None => "N/A".to_string(),
        }
    }
}

/// In-progress merged record
///
/// Explicit accumulation stage used only inside the reconciliation pass:
/// seed from one banner, attach the counterpart, then `freeze`. The mutable
/// form is never exposed past the pass.
#[derive(Debug)]
pub struct MergedRecordBuilder {
    units: Vec<String>,
    image_url: String,
    asia: Option<RegionWindow>,
    global: Option<RegionWindow>,
    predicted: bool,
}

impl MergedRecordBuilder {
    /// Seed from an Asia banner
    pub fn from_asia(banner: &Banner) -> Self {
        Self {
            units: banner.units.clone(),
            image_url: banner.image_url.clone(),
            asia: Some(RegionWindow::from_banner(banner)),
            global: None,
            predicted: false,
        }
    }

    /// Seed from a Global banner that has no Asia counterpart
    pub fn from_global(banner: &Banner) -> Self {
        Self {
            units: banner.units.clone(),
            image_url: banner.image_url.clone(),
            asia: None,
            global: Some(RegionWindow::from_banner(banner)),
            predicted: false,
        }
    }

    /// Attach an observed Global counterpart
    pub fn global_observed(mut self, banner: &Banner) -> Self {
        self.global = Some(RegionWindow::from_banner(banner));
        self.predicted = false;
        self
    }

    /// Infer the Global window from the Asia window plus the regional offset
    pub fn global_predicted(mut self, offset: Duration) -> Self {
        if let Some(asia) = &self.asia {
            self.global = Some(asia.shifted(offset));
            self.predicted = true;
        }
        self
    }

    /// Emit the immutable record
    pub fn freeze(self) -> MergedRecord {
        MergedRecord {
            units: self.units,
            image_url: self.image_url,
            asia: self.asia,
            global: self.global,
            predicted: self.predicted,
        }
    }
}
