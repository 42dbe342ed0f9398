//! # Ingestion
//!
//! Banner feed ingestion module.
//!
//! Responsibilities:
//! - Fetch the raw banner-table markup per region (HTTP or fixture files)
//! - Parse table rows into `Banner` values
//! - Skip malformed rows without aborting the load
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::{load_all, HttpSource};
//!
//! let source = HttpSource::new(config)?;
//! let feeds = load_all(&source)?;
//! println!("asia: {}, global: {}", feeds.asia.len(), feeds.global.len());
//! ```
//!
//! ## Offline / Testing
//!
//! ```ignore
//! use ingestion::StaticSource;
//!
//! let source = StaticSource::new(asia_html, global_html);
//! let feeds = load_all(&source)?;
//! ```

mod fixture;
#[cfg(feature = "live-feed")]
mod http;
mod parser;
mod pipeline;

// Re-exports
pub use contracts::{Banner, BannerSource, Region};
pub use fixture::{FixtureSource, StaticSource};
#[cfg(feature = "live-feed")]
pub use http::HttpSource;
pub use parser::{ParseStats, TableParser, DATE_FORMAT};
pub use pipeline::{load_all, load_region, RegionBanners};
