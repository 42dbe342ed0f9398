//! Live wiki feed client
//!
//! Blocking HTTP source for the two banner-table pages. Session state
//! (user agent, timeout) comes from `FeedConfig` at construction; retry
//! policy is left to callers driving the load cycle.

use std::time::Duration;

use tracing::{debug, instrument};

use contracts::{BannerSource, ContractError, FeedConfig, Region};

/// Banner source fetching the configured wiki pages over HTTP
pub struct HttpSource {
    client: reqwest::blocking::Client,
    config: FeedConfig,
}

impl HttpSource {
    /// Build a client from feed configuration
    ///
    /// # Errors
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn new(config: FeedConfig) -> Result<Self, ContractError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_s))
            .build()
            .map_err(|e| ContractError::Other(format!("http client build error: {e}")))?;

        Ok(Self { client, config })
    }
}

impl BannerSource for HttpSource {
    fn name(&self) -> &str {
        "wiki-http"
    }

    #[instrument(name = "http_source_fetch", skip(self), fields(region = %region))]
    fn fetch_html(&self, region: Region) -> Result<String, ContractError> {
        let url = self.config.url_for(region);
        debug!(url, "fetching banner table");

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| ContractError::feed_fetch(region, e.to_string()))?;

        response
            .text()
            .map_err(|e| ContractError::feed_fetch(region, format!("body read error: {e}")))
    }
}
