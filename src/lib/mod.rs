#![deny(unsafe_code)]
// Clippy lint configuration for CI
// - cast_*: counts are widened to u64/f64 for metrics
// - missing_panics_doc: panics are limited to internal invariants
// - module_name_repetitions: public types are named for use outside their module
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

//! # dupsets - UMI-aware duplicate sets
//!
//! Reads that align to the same position with the same orientation form a positional
//! duplicate set. This library splits such sets further by the UMI carried on each read, so
//! that reads from independently tagged molecules are not marked as duplicates of one
//! another.
//!
//! ## Overview
//!
//! ### Core Functionality
//!
//! - **[`splitter`]** - [`UmiAwareDuplicateSetIterator`], which partitions each incoming
//!   duplicate set by UMI cluster and optionally writes a consensus UMI
//! - **[`umi`]** - Hamming distance, UMI clustering and consensus (from `dupsets-umi`)
//! - **[`strategy`]** - Pluggable choice between positional and UMI-aware duplicate sets
//!
//! ### Supporting Modules
//!
//! - **[`duplicate_set`]** - Duplicate sets and the sources that yield them
//! - **[`record`]** - String tag access on alignment records
//! - **[`options`]** - Command-line options for a duplicate-marking tool
//! - **[`metrics`]** - Splitting metrics
//! - **[`logging`]** - Formatted summaries
//! - **[`validation`]** - Parameter validation
//! - **[`errors`]** - Error types
//!
//! ## Quick Start
//!
//! ```
//! use dupsets_lib::duplicate_set::{DuplicateSet, source_from_sets};
//! use dupsets_lib::record::{TaggedRecord, UMI_TAG};
//! use dupsets_lib::splitter::{SplitConfig, UmiAwareDuplicateSetIterator};
//! use noodles::sam::alignment::RecordBuf;
//!
//! # fn main() -> dupsets_lib::errors::Result<()> {
//! let records: Vec<RecordBuf> = ["AAAA", "AAAA", "AAAT", "TTTT"]
//!     .iter()
//!     .map(|umi| {
//!         let mut record = RecordBuf::default();
//!         record.set_string_tag(UMI_TAG, umi);
//!         record
//!     })
//!     .collect();
//! let source = source_from_sets(DuplicateSet::new(records).into_iter().collect());
//!
//! let splitter = UmiAwareDuplicateSetIterator::new(source, SplitConfig::default());
//! let sizes = splitter.map(|set| set.map(|s| s.len())).collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(sizes, vec![3, 1]);
//! # Ok(())
//! # }
//! ```

pub mod duplicate_set;
pub mod errors;
pub mod logging;
pub mod metrics;
pub mod options;
pub mod record;
pub mod splitter;
pub mod strategy;
pub mod umi;
pub mod validation;

pub use duplicate_set::{DuplicateSet, DuplicateSetSource, IteratorSource, KeyedDuplicateSetSource};
pub use errors::{DupsetsError, Result};
pub use options::{DuplicateSetMode, UmiAwareOptions};
pub use record::TaggedRecord;
pub use splitter::{IteratorState, SplitConfig, UmiAwareDuplicateSetIterator};
pub use strategy::{DuplicateSetStrategy, DuplicateSetStream};
