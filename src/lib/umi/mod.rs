//! UMI (Unique Molecular Identifier) utilities
//!
//! This module re-exports functionality from the `dupsets-umi` crate.

pub use dupsets_umi::{
    ComponentAssignment, SimilarityGraph, UmiError, barcode_distance, cluster, cluster_barcodes,
    consensus, distance, hamming_distance, most_common_barcode,
};
