//! Load pipeline entry
//!
//! Fetch + parse for one region or both. Fetch failures propagate and
//! abort the cycle; row parse failures only reduce the banner count.

use metrics::counter;
use tracing::{info, instrument};

use contracts::{Banner, BannerSource, ContractError, Region};

use crate::parser::TableParser;

/// Both regions' parsed banner sequences, in source row order
#[derive(Debug, Clone, Default)]
pub struct RegionBanners {
    pub asia: Vec<Banner>,
    pub global: Vec<Banner>,
}

/// Fetch and parse one region's banner table
///
/// # Errors
/// Propagates fetch failures; parse problems are handled row-locally.
#[instrument(name = "ingestion_load_region", skip(source), fields(source = source.name(), region = %region))]
pub fn load_region(source: &dyn BannerSource, region: Region) -> Result<Vec<Banner>, ContractError> {
    let html = source.fetch_html(region)?;

    let parser = TableParser::new();
    let (banners, stats) = parser.parse(&html, region);

    counter!("ingestion_banners_parsed_total", "region" => region.as_str())
        .increment(stats.parsed as u64);
    counter!("ingestion_rows_skipped_total", "region" => region.as_str())
        .increment(stats.skipped as u64);

    info!(
        region = %region,
        rows = stats.rows,
        parsed = stats.parsed,
        skipped = stats.skipped,
        "banner table loaded"
    );

    Ok(banners)
}

/// Fetch and parse both regions
///
/// # Errors
/// A fetch failure for either region fails the whole load cycle; callers
/// keep serving the previous cycle's reconciled output in that case.
pub fn load_all(source: &dyn BannerSource) -> Result<RegionBanners, ContractError> {
    Ok(RegionBanners {
        asia: load_region(source, Region::Asia)?,
        global: load_region(source, Region::Global)?,
    })
}
