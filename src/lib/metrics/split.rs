//! Metrics for UMI-aware duplicate-set splitting.

use serde::{Deserialize, Serialize};

/// Running counts for one UMI-aware splitter.
///
/// Updated once per input duplicate set. Sets that fell back because a record had no UMI
/// count towards `input_sets` and `output_sets` (one each) but contribute no distinct UMIs.
/// Sets that failed to split count towards `input_sets`, `input_records` and `failed_sets`
/// only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmiSplitMetrics {
    /// Duplicate sets pulled from the source
    pub input_sets: u64,

    /// Sub-sets emitted
    pub output_sets: u64,

    /// Input sets passed through unchanged because a record lacked a UMI
    pub sets_missing_umi: u64,

    /// Input sets dropped because their UMIs could not be compared
    pub failed_sets: u64,

    /// Records seen across all input sets
    pub input_records: u64,

    /// Distinct UMI values summed over split input sets
    pub distinct_umis: u64,

    /// Largest number of sub-sets produced from one input set
    pub max_sets_per_input: u64,
}

impl UmiSplitMetrics {
    /// Creates metrics with all counts set to zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an input set of `records` records that was split into `sets` sub-sets over
    /// `distinct_umis` distinct UMI values.
    pub fn record_split(&mut self, records: usize, distinct_umis: usize, sets: usize) {
        self.input_sets += 1;
        self.input_records += records as u64;
        self.distinct_umis += distinct_umis as u64;
        self.output_sets += sets as u64;
        self.max_sets_per_input = self.max_sets_per_input.max(sets as u64);
    }

    /// Record an input set of `records` records that was emitted unchanged.
    pub fn record_missing_umi(&mut self, records: usize) {
        self.input_sets += 1;
        self.sets_missing_umi += 1;
        self.input_records += records as u64;
        self.output_sets += 1;
        self.max_sets_per_input = self.max_sets_per_input.max(1);
    }

    /// Record an input set of `records` records that failed to split and emitted nothing.
    pub fn record_failure(&mut self, records: usize) {
        self.input_sets += 1;
        self.failed_sets += 1;
        self.input_records += records as u64;
    }

    /// Fold the counts from `other` into these metrics.
    pub fn merge(&mut self, other: &Self) {
        self.input_sets += other.input_sets;
        self.output_sets += other.output_sets;
        self.sets_missing_umi += other.sets_missing_umi;
        self.failed_sets += other.failed_sets;
        self.input_records += other.input_records;
        self.distinct_umis += other.distinct_umis;
        self.max_sets_per_input = self.max_sets_per_input.max(other.max_sets_per_input);
    }

    /// Mean number of sub-sets emitted per input set, or 0 when nothing was read.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_sets_per_input(&self) -> f64 {
        if self.input_sets == 0 { 0.0 } else { self.output_sets as f64 / self.input_sets as f64 }
    }
}
