//! FeedConfig - Config Loader output
//!
//! Describes where the two regional banner tables come from and the session
//! parameters the feed client uses.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::Region;

fn default_asia_url() -> String {
    "https://bluearchive.wiki/wiki/Banner_List".to_string()
}

fn default_global_url() -> String {
    "https://bluearchive.wiki/wiki/Banner_List_(Global)".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/100.0.4896.88 Safari/537.36"
        .to_string()
}

fn default_request_timeout_s() -> u64 {
    30
}

/// Feed configuration
///
/// Session state for the fetch collaborator is carried here and passed into
/// source constructors explicitly; nothing is read from ambient globals.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedConfig {
    /// Asia banner table page
    #[serde(default = "default_asia_url")]
    #[validate(url)]
    pub asia_url: String,

    /// Global banner table page
    #[serde(default = "default_global_url")]
    #[validate(url)]
    pub global_url: String,

    /// User agent sent with every feed request
    #[serde(default = "default_user_agent")]
    #[validate(length(min = 1))]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_s")]
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_s: u64,

    /// Local fixture files for offline runs and tests
    #[serde(default)]
    #[validate(nested)]
    pub fixtures: Option<FixtureConfig>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            asia_url: default_asia_url(),
            global_url: default_global_url(),
            user_agent: default_user_agent(),
            request_timeout_s: default_request_timeout_s(),
            fixtures: None,
        }
    }
}

impl FeedConfig {
    /// Page URL for one region
    pub fn url_for(&self, region: Region) -> &str {
        match region {
            Region::Asia => &self.asia_url,
            Region::Global => &self.global_url,
        }
    }
}

/// Fixture file paths, one HTML document per region
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FixtureConfig {
    #[validate(length(min = 1))]
    pub asia_path: String,

    #[validate(length(min = 1))]
    pub global_path: String,
}

impl FixtureConfig {
    /// Fixture path for one region
    pub fn path_for(&self, region: Region) -> &str {
        match region {
            Region::Asia => &self.asia_path,
            Region::Global => &self.global_path,
        }
    }
}
