//! Banner - Ingestion output
//!
//! One advertised release in one regional track, as parsed from the
//! source banner table.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Regional release track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Leading track; content ships here first
    Asia,
    /// Trailing track; equivalent content ships later
    Global,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Asia => "asia",
            Region::Global => "global",
        }
    }

    /// The other track
    pub fn counterpart(&self) -> Region {
        match self {
            Region::Asia => Region::Global,
            Region::Global => Region::Asia,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Release type tag
///
/// Distinguishes a debut from a repeat release. `Unknown` is the default
/// when the source row carries no usable marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseType {
    New,
    Rerun,
    #[default]
    Unknown,
}

impl ReleaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::New => "new",
            ReleaseType::Rerun => "rerun",
            ReleaseType::Unknown => "unknown",
        }
    }

    /// Parse a source table marker, falling back to `Unknown`
    pub fn from_marker(marker: &str) -> Self {
        match marker.trim().to_lowercase().as_str() {
            "new" => ReleaseType::New,
            "rerun" => ReleaseType::Rerun,
            _ => ReleaseType::Unknown,
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One advertised banner in one region
///
/// Immutable once parsed; produced fresh on every load cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    /// Banner artwork URL (display only, never used for matching)
    pub image_url: String,

    /// Featured units, in source display order
    pub units: Vec<String>,

    /// Window start (inclusive)
    pub start: NaiveDateTime,

    /// Window end (exclusive); always after `start`
    pub end: NaiveDateTime,

    /// Track that advertised this banner
    pub region: Region,

    /// Debut / repeat marker
    pub release_type: ReleaseType,
}

impl Banner {
    /// Structural matching key: sorted units + release type
    pub fn match_key(&self) -> MatchKey {
        MatchKey {
            units: self.unit_key(),
            release_type: self.release_type,
        }
    }

    /// Fallback matching key: sorted units only, release type ignored
    pub fn unit_key(&self) -> Vec<String> {
        let mut units = self.units.clone();
        units.sort();
        units
    }

    /// Unit-set equality, insensitive to source display order
    pub fn matches_units(&self, other: &Banner) -> bool {
        self.unit_key() == other.unit_key()
    }
}

/// Derived structural matching key
///
/// Equality and hashing are defined over the sorted unit set plus release
/// type, so `["A", "B"]` and `["B", "A"]` banners compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchKey {
    pub units: Vec<String>,
    pub release_type: ReleaseType,
}
