//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Offline mode requested with no fixtures configured
    #[error("Offline mode requires [fixtures] paths in the configuration")]
    OfflineWithoutFixtures,

    /// Live feed support compiled out
    #[cfg(not(feature = "live-feed"))]
    #[error("This build has no live feed support; use --offline with fixtures")]
    LiveFeedUnavailable,

    /// Feed load failure
    #[error("Load cycle failed: {0}")]
    Load(#[from] contracts::ContractError),
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }
}
