//! Analysis modules.
//!
//! `stats` holds the numeric primitives; `aggregator` builds the grouped
//! and ranked views and assembles the full analysis object.

pub mod aggregator;
pub mod stats;

pub use aggregator::*;
