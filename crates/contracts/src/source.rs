//! BannerSource trait - Banner feed abstraction
//!
//! Defines a unified interface for banner feed sources, decoupling the load
//! pipeline from where the raw markup comes from. Supports unified handling
//! of the live wiki feed and local fixture files.

use crate::{ContractError, Region};

/// Banner feed source trait
///
/// Abstracts the common behavior of the live HTTP feed and fixture-backed
/// sources. Implementations own their session state (user agent, timeouts,
/// paths) as explicit constructor configuration.
///
/// # Example
///
/// ```ignore
/// let source: Box<dyn BannerSource> = build_source(&config)?;
/// let html = source.fetch_html(Region::Asia)?;
/// ```
pub trait BannerSource: Send + Sync {
    /// Human-readable source name for logging
    fn name(&self) -> &str;

    /// Fetch the raw banner-table markup for one region
    ///
    /// # Errors
    /// Fetch failures are hard failures of the load cycle; callers must not
    /// invoke the reconciliation engine for a cycle whose fetch failed.
    fn fetch_html(&self, region: Region) -> Result<String, ContractError>;
}
