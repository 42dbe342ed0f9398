//! # Reconciler
//!
//! Cross-region banner reconciliation engine.
//!
//! Responsibilities:
//! - Estimate the systematic Asia→Global release delay from banner history
//! - Match equivalent banners across the two regional feeds
//! - Predict the missing Global window for Asia-only banners
//! - Order the reconciled timeline and serve substring queries against it
//!
//! The engine is synchronous and purely computational: it holds no state
//! between invocations, performs no I/O, and produces identical,
//! order-stable output for identical inputs. Callers behind a caching or
//! locking layer may invoke it repeatedly without coordination.

mod engine;
mod offset;
mod query;

pub use engine::{reconcile, MatchTier, ReconcileOutcome, ReconcileStats};
pub use offset::estimate_offset;
pub use query::filter_records;
