//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-crate data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Banner windows use naive wiki timestamps (`chrono::NaiveDateTime`); the
//!   source tables carry no timezone and only differences between the two
//!   regional tracks are ever computed.
//! - The cross-region offset is a `chrono::Duration`.

mod banner;
mod error;
mod feed_config;
mod record;
mod source;

pub use banner::*;
pub use error::*;
pub use feed_config::*;
pub use record::*;
pub use source::BannerSource;
