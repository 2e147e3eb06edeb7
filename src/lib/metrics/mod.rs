//! Metrics collected while splitting duplicate sets.
//!
//! - [`split`] - Counts of input sets, emitted sub-sets and missing-UMI fallbacks

pub mod split;

pub use split::UmiSplitMetrics;
