#![deny(unsafe_code)]

//! UMI barcode primitives for splitting positional duplicate sets.
//!
//! This crate provides:
//! - [`distance`]: Hamming distance between equal-length barcodes
//! - [`cluster`]: the similarity graph over distinct barcodes and its connected components
//! - [`consensus`]: selection of the most frequent barcode within a group
//!
//! Nothing here knows about SAM/BAM records; callers pass barcode strings in and get
//! group ids or a representative barcode back.

pub mod cluster;
pub mod consensus;
pub mod distance;

// Re-export submodule contents at crate root for convenience
pub use cluster::{ComponentAssignment, SimilarityGraph, cluster_barcodes};
pub use consensus::most_common_barcode;
pub use distance::{barcode_distance, hamming_distance};

use thiserror::Error;

/// Result type alias for barcode operations
pub type Result<T> = std::result::Result<T, UmiError>;

/// Error type for barcode comparisons
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UmiError {
    /// Two barcodes that were compared have different lengths
    #[error("Barcode {first} and {second} do not have matching lengths")]
    BarcodeLengthMismatch {
        /// The first barcode of the comparison
        first: String,
        /// The second barcode of the comparison
        second: String,
    },
}
