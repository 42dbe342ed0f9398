//! Banner table parser
//!
//! Extracts `Banner` rows from the wiki banner-table markup. The source
//! tables are plain wikitables with columns `[image, units, date-range]`
//! and an optional `data-release` row attribute, so extraction is regex
//! text filtering rather than full HTML parsing.
//!
//! Rows that fail to parse are skipped and counted, never fatal.

use chrono::NaiveDateTime;
use regex::Regex;
use tracing::debug;

use contracts::{Banner, Region, ReleaseType};

/// Date format used by both regional tables
pub const DATE_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Literal dash separating the two ends of a date range
const RANGE_DASH: char = '\u{2014}';

/// Per-parse row counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Table rows seen (including header/structural rows)
    pub rows: usize,
    /// Rows successfully parsed into banners
    pub parsed: usize,
    /// Data rows dropped (bad date range, inverted window)
    pub skipped: usize,
}

/// Banner table parser
///
/// Compiles its row/cell patterns once; reusable across regions within a
/// load cycle.
pub struct TableParser {
    row_re: Regex,
    cell_re: Regex,
    img_re: Regex,
    link_re: Regex,
    small_re: Regex,
    release_re: Regex,
    tag_re: Regex,
}

impl Default for TableParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TableParser {
    pub fn new() -> Self {
        Self {
            row_re: Regex::new(r"(?s)<tr([^>]*)>(.*?)</tr>").expect("row pattern"),
            cell_re: Regex::new(r"(?s)<td[^>]*>(.*?)</td>").expect("cell pattern"),
            img_re: Regex::new(r#"<img[^>]*?src\s*=\s*"([^"]*)""#).expect("img pattern"),
            link_re: Regex::new(r"(?s)<a[^>]*>(.*?)</a>").expect("link pattern"),
            small_re: Regex::new(r"(?s)<small[^>]*>(.*?)</small>").expect("small pattern"),
            release_re: Regex::new(r#"data-release\s*=\s*"([^"]*)""#).expect("release pattern"),
            tag_re: Regex::new(r"<[^>]*>").expect("tag pattern"),
        }
    }

    /// Parse one region's banner table
    ///
    /// Returns the banners in source row order plus row counters. Rows that
    /// fail to parse are dropped; the load never aborts on a bad row.
    pub fn parse(&self, html: &str, region: Region) -> (Vec<Banner>, ParseStats) {
        let mut banners = Vec::new();
        let mut stats = ParseStats::default();

        for row in self.row_re.captures_iter(html) {
            stats.rows += 1;

            let attrs = row.get(1).map(|m| m.as_str()).unwrap_or("");
            let body = row.get(2).map(|m| m.as_str()).unwrap_or("");

            let cells: Vec<&str> = self
                .cell_re
                .captures_iter(body)
                .filter_map(|c| c.get(1).map(|m| m.as_str()))
                .collect();

            // Header and structural rows carry no data cells
            if cells.len() < 3 {
                continue;
            }

            match self.parse_row(attrs, &cells, region) {
                Some(banner) => {
                    banners.push(banner);
                    stats.parsed += 1;
                }
                None => {
                    stats.skipped += 1;
                    debug!(region = %region, row = stats.rows, "skipping unparsable banner row");
                }
            }
        }

        (banners, stats)
    }

    fn parse_row(&self, attrs: &str, cells: &[&str], region: Region) -> Option<Banner> {
        let mut release_type = self
            .release_re
            .captures(attrs)
            .and_then(|c| c.get(1))
            .map(|m| ReleaseType::from_marker(m.as_str()))
            .unwrap_or_default();

        let image_url = self.extract_image_url(cells[0]);
        let units = self.extract_units(cells[1]);

        // A rerun marker in the unit cell overrides the row attribute
        if let Some(small) = self.small_re.captures(cells[1]).and_then(|c| c.get(1)) {
            if self.text_of(small.as_str()).to_lowercase().contains("rerun") {
                release_type = ReleaseType::Rerun;
            }
        }

        let (start, end) = self.extract_window(cells[2])?;
        if start >= end {
            return None;
        }

        Some(Banner {
            image_url,
            units,
            start,
            end,
            region,
            release_type,
        })
    }

    fn extract_image_url(&self, cell: &str) -> String {
        match self.img_re.captures(cell).and_then(|c| c.get(1)) {
            Some(src) if src.as_str().starts_with("//") => format!("https:{}", src.as_str()),
            Some(src) => src.as_str().to_string(),
            None => "N/A".to_string(),
        }
    }

    fn extract_units(&self, cell: &str) -> Vec<String> {
        self.link_re
            .captures_iter(cell)
            .filter_map(|c| c.get(1))
            .map(|m| self.text_of(m.as_str()))
            .filter(|t| !t.is_empty())
            .collect()
    }

    fn extract_window(&self, cell: &str) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let text = self.text_of(cell);
        let (start_str, end_str) = text.split_once(RANGE_DASH)?;
        let start = NaiveDateTime::parse_from_str(start_str.trim(), DATE_FORMAT).ok()?;
        let end = NaiveDateTime::parse_from_str(end_str.trim(), DATE_FORMAT).ok()?;
        Some((start, end))
    }

    /// Tag-stripped, entity-decoded, trimmed cell text
    fn text_of(&self, fragment: &str) -> String {
        let stripped = self.tag_re.replace_all(fragment, "");
        decode_entities(&stripped).trim().to_string()
    }
}

/// Decode the handful of entities the wiki tables actually use
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}
