//! `run` command implementation.
//!
//! One full load cycle: fetch both regions, estimate the offset, reconcile,
//! filter, render.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use config_loader::ConfigLoader;
use contracts::{BannerSource, FeedConfig};
use ingestion::FixtureSource;
use observability::{record_offset_estimate, record_run_metrics, RunMetrics};
use reconciler::{estimate_offset, filter_records, reconcile, ReconcileOutcome};

use crate::cli::{OutputFormat, RunArgs};
use crate::error::CliError;
use crate::render;

/// Default config path used when the flag is not given
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Execute the `run` command
pub fn run_pipeline(args: &RunArgs) -> Result<()> {
    if args.metrics_port > 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let config = load_or_default(&args.config)?;
    let source = build_source(&config, args.offline)?;

    info!(source = source.name(), offline = args.offline, "starting load cycle");

    let feeds = ingestion::load_all(source.as_ref()).map_err(CliError::Load)?;

    let offset = estimate_offset(&feeds.asia, &feeds.global);
    record_offset_estimate(offset.map(|o| o.num_days()));

    let outcome = reconcile(&feeds.asia, &feeds.global, offset);
    record_run_metrics(&run_metrics(&outcome));

    let query = args.query.as_deref().unwrap_or("");
    let visible = filter_records(&outcome.records, query);

    match args.format {
        OutputFormat::Table => render::print_table(&visible),
        OutputFormat::Json => render::print_json(&visible)?,
    }

    info!(
        total = outcome.records.len(),
        shown = visible.len(),
        predicted = outcome.stats.predicted,
        offset_days = offset.map(|o| o.num_days()),
        "load cycle complete"
    );

    Ok(())
}

/// Load the config file, falling back to defaults when the default path
/// does not exist. An explicitly given missing path is an error.
fn load_or_default(path: &Path) -> Result<FeedConfig> {
    if path.exists() {
        return Ok(ConfigLoader::load_from_path(path)?);
    }

    if path == Path::new(DEFAULT_CONFIG_PATH) {
        info!("no config file found, using defaults");
        return Ok(ConfigLoader::defaults()?);
    }

    Err(CliError::config_not_found(path.display().to_string()).into())
}

/// Pick the banner source for this run
fn build_source(config: &FeedConfig, offline: bool) -> Result<Box<dyn BannerSource>> {
    if offline {
        let fixtures = config
            .fixtures
            .as_ref()
            .ok_or(CliError::OfflineWithoutFixtures)?;
        return Ok(Box::new(FixtureSource::new(fixtures)));
    }

    #[cfg(feature = "live-feed")]
    {
        let source = ingestion::HttpSource::new(config.clone()).map_err(CliError::Load)?;
        Ok(Box::new(source))
    }

    #[cfg(not(feature = "live-feed"))]
    {
        Err(CliError::LiveFeedUnavailable.into())
    }
}

fn run_metrics(outcome: &ReconcileOutcome) -> RunMetrics {
    RunMetrics {
        records: outcome.records.len(),
        matched_exact: outcome.stats.matched_exact,
        matched_units_only: outcome.stats.matched_units_only,
        predicted: outcome.stats.predicted,
        unmatched: outcome.stats.unmatched,
        global_only: outcome.stats.global_only,
    }
}
