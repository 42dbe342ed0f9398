//! Fixture-backed banner sources
//!
//! Used for offline runs and tests where no wiki is reachable.

use tracing::debug;

use contracts::{BannerSource, ContractError, FixtureConfig, Region};

/// Banner source reading one HTML document per region from disk
pub struct FixtureSource {
    fixtures: FixtureConfig,
}

impl FixtureSource {
    pub fn new(fixtures: &FixtureConfig) -> Self {
        Self {
            fixtures: fixtures.clone(),
        }
    }
}

impl BannerSource for FixtureSource {
    fn name(&self) -> &str {
        "fixture"
    }

    fn fetch_html(&self, region: Region) -> Result<String, ContractError> {
        let path = self.fixtures.path_for(region);
        debug!(region = %region, path = path, "reading fixture");
        std::fs::read_to_string(path)
            .map_err(|e| ContractError::feed_fetch(region, format!("{path}: {e}")))
    }
}

/// In-memory banner source
///
/// The test-side analog of the live feed; both regions are served from
/// strings supplied at construction.
pub struct StaticSource {
    asia_html: String,
    global_html: String,
}

impl StaticSource {
    pub fn new(asia_html: impl Into<String>, global_html: impl Into<String>) -> Self {
        Self {
            asia_html: asia_html.into(),
            global_html: global_html.into(),
        }
    }
}

impl BannerSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_html(&self, region: Region) -> Result<String, ContractError> {
        let html = match region {
            Region::Asia => &self.asia_html,
            Region::Global => &self.global_html,
        };
        Ok(html.clone())
    }
}
