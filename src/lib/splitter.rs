//! UMI-aware splitting of positional duplicate sets.
//!
//! Records that share an alignment position are not necessarily copies of the same molecule.
//! [`UmiAwareDuplicateSetIterator`] wraps a [`DuplicateSetSource`] and replaces each incoming
//! duplicate set by one sub-set per cluster of UMIs, where two UMIs belong to the same cluster
//! when they are connected through a chain of UMIs each within `edit_distance_to_join`
//! mismatches of the next.
//!
//! # Processing of one duplicate set
//!
//! 1. If any record lacks a UMI the set is emitted unchanged as a single sub-set.
//! 2. Otherwise the distinct UMIs are sorted, clustered with
//!    [`dupsets_umi::cluster_barcodes`] and every record is routed to its UMI's cluster.
//!    Sub-sets are emitted in cluster order; records keep their input order within a sub-set.
//! 3. When `add_inferred_umi` is set, every record of a sub-set is tagged with the most
//!    common UMI of that sub-set (ties go to the lexicographically smallest UMI).
//!
//! All scratch state (graph, cluster assignment) lives only for the duration of one set.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use ahash::AHashMap;
use dupsets_umi::{cluster_barcodes, most_common_barcode};
use noodles::sam::alignment::record::data::field::Tag;

use crate::duplicate_set::{DuplicateSet, DuplicateSetSource};
use crate::errors::Result;
use crate::logging::log_umi_split_summary;
use crate::metrics::UmiSplitMetrics;
use crate::record::{INFERRED_UMI_TAG, TaggedRecord, UMI_TAG};

/// Settings for splitting duplicate sets by UMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitConfig {
    /// Maximum Hamming distance for two distinct UMIs to be joined directly.
    pub edit_distance_to_join: u32,
    /// Write the consensus UMI of each sub-set to `inferred_umi_tag`.
    pub add_inferred_umi: bool,
    /// Tag holding the raw UMI.
    pub umi_tag: Tag,
    /// Tag receiving the inferred UMI.
    pub inferred_umi_tag: Tag,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            edit_distance_to_join: 1,
            add_inferred_umi: false,
            umi_tag: UMI_TAG,
            inferred_umi_tag: INFERRED_UMI_TAG,
        }
    }
}

impl SplitConfig {
    /// Sets the maximum Hamming distance for joining two UMIs.
    #[must_use]
    pub fn with_edit_distance_to_join(mut self, edits: u32) -> Self {
        self.edit_distance_to_join = edits;
        self
    }

    /// Enables or disables writing the inferred UMI.
    #[must_use]
    pub fn with_add_inferred_umi(mut self, add: bool) -> Self {
        self.add_inferred_umi = add;
        self
    }

    /// Sets the tag read for the raw UMI.
    #[must_use]
    pub fn with_umi_tag(mut self, tag: Tag) -> Self {
        self.umi_tag = tag;
        self
    }

    /// Sets the tag written with the inferred UMI.
    #[must_use]
    pub fn with_inferred_umi_tag(mut self, tag: Tag) -> Self {
        self.inferred_umi_tag = tag;
        self
    }
}

/// Outcome of partitioning one duplicate set.
#[derive(Debug)]
pub enum Partition<R> {
    /// At least one record had no UMI; the set is returned untouched.
    MissingUmi(DuplicateSet<R>),
    /// The set was split by UMI cluster.
    ByUmi {
        /// One sub-set per cluster, in cluster order.
        sets: Vec<DuplicateSet<R>>,
        /// Number of distinct UMI values in the input set.
        distinct_umis: usize,
    },
}

impl<R> Partition<R> {
    /// The sub-sets to emit, in order.
    #[must_use]
    pub fn into_sets(self) -> Vec<DuplicateSet<R>> {
        match self {
            Self::MissingUmi(set) => vec![set],
            Self::ByUmi { sets, .. } => sets,
        }
    }
}

/// Partition one duplicate set into sub-sets of records whose UMIs cluster together.
///
/// # Errors
///
/// Returns [`crate::errors::DupsetsError::BarcodeLengthMismatch`] if two UMIs in the set
/// differ in length. No partial result is produced in that case.
///
/// # Example
///
/// ```
/// use dupsets_lib::duplicate_set::DuplicateSet;
/// use dupsets_lib::record::{TaggedRecord, UMI_TAG};
/// use dupsets_lib::splitter::{SplitConfig, partition_by_umi};
/// use noodles::sam::alignment::RecordBuf;
///
/// let records: Vec<RecordBuf> = ["AAAA", "AAAT", "TTTT"]
///     .iter()
///     .map(|umi| {
///         let mut record = RecordBuf::default();
///         record.set_string_tag(UMI_TAG, umi);
///         record
///     })
///     .collect();
///
/// let set = DuplicateSet::new(records).unwrap();
/// let sets = partition_by_umi(set, &SplitConfig::default()).unwrap().into_sets();
/// assert_eq!(sets.iter().map(DuplicateSet::len).collect::<Vec<_>>(), vec![2, 1]);
/// ```
pub fn partition_by_umi<R: TaggedRecord>(
    set: DuplicateSet<R>,
    config: &SplitConfig,
) -> Result<Partition<R>> {
    let umis: Option<Vec<String>> = set
        .records()
        .iter()
        .map(|record| record.string_tag(config.umi_tag).map(str::to_owned))
        .collect();
    let Some(umis) = umis else {
        return Ok(Partition::MissingUmi(set));
    };

    let (cluster_of_record, num_clusters, distinct_umis) = {
        let mut distinct: Vec<&str> = umis.iter().map(String::as_str).collect();
        distinct.sort_unstable();
        distinct.dedup();

        let assignment = cluster_barcodes(&distinct, config.edit_distance_to_join)?;
        let index_of: AHashMap<&str, usize> =
            distinct.iter().enumerate().map(|(idx, umi)| (*umi, idx)).collect();

        // Group ids are 1-based.
        let cluster_of_record: Vec<usize> = umis
            .iter()
            .map(|umi| assignment.group_of(index_of[umi.as_str()]) as usize - 1)
            .collect();
        (cluster_of_record, assignment.num_groups(), distinct.len())
    };

    let mut clusters: Vec<Vec<(R, String)>> = (0..num_clusters).map(|_| Vec::new()).collect();
    for ((record, umi), cluster) in set.into_records().into_iter().zip(umis).zip(cluster_of_record)
    {
        clusters[cluster].push((record, umi));
    }

    let sets = clusters
        .into_iter()
        .filter_map(|members| {
            let consensus = if config.add_inferred_umi {
                let umis = members.iter().map(|(_, umi)| umi.as_str());
                most_common_barcode(umis).map(str::to_owned)
            } else {
                None
            };
            let records = members.into_iter().map(|(record, _)| record).collect();
            let mut set = DuplicateSet::new(records)?;
            if let Some(consensus) = consensus {
                for record in set.records_mut() {
                    record.set_string_tag(config.inferred_umi_tag, &consensus);
                }
            }
            Some(set)
        })
        .collect();

    Ok(Partition::ByUmi { sets, distinct_umis })
}

/// Externally visible state of a [`UmiAwareDuplicateSetIterator`].
///
/// Fetching and splitting the next input set happens synchronously inside a single call to
/// `next`, so there is no observable processing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IteratorState {
    /// No sub-sets are buffered; the next call pulls from the source.
    Idle,
    /// Sub-sets from the last input set are being handed out.
    Draining,
    /// The source ran out and the buffer is empty.
    Exhausted,
    /// The iterator was closed.
    Closed,
}

enum State<R> {
    Idle,
    Draining(VecDeque<DuplicateSet<R>>),
    Exhausted,
    Closed,
}

/// Iterator over UMI-split duplicate sets.
///
/// Each item is either a sub-set or the error raised while producing it. Upstream read
/// errors are passed through unchanged; a UMI length mismatch fails the whole input set.
/// After an error the iterator remains usable and continues with the next input set.
///
/// Closing (explicitly or on drop) closes the source. Closing is idempotent.
pub struct UmiAwareDuplicateSetIterator<S: DuplicateSetSource> {
    source: S,
    config: SplitConfig,
    state: State<S::Record>,
    metrics: UmiSplitMetrics,
}

impl<S: DuplicateSetSource> UmiAwareDuplicateSetIterator<S> {
    /// Create a splitter reading duplicate sets from `source`.
    pub fn new(source: S, config: SplitConfig) -> Self {
        Self { source, config, state: State::Idle, metrics: UmiSplitMetrics::new() }
    }

    /// The settings used for splitting.
    #[must_use]
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Counts gathered so far.
    #[must_use]
    pub fn metrics(&self) -> &UmiSplitMetrics {
        &self.metrics
    }

    /// Current state of the iterator.
    #[must_use]
    pub fn state(&self) -> IteratorState {
        match self.state {
            State::Idle => IteratorState::Idle,
            State::Draining(_) => IteratorState::Draining,
            State::Exhausted => IteratorState::Exhausted,
            State::Closed => IteratorState::Closed,
        }
    }

    /// Drop any buffered sub-sets and close the source. Safe to call repeatedly.
    pub fn close(&mut self) {
        if !matches!(self.state, State::Closed) {
            self.state = State::Closed;
            self.source.close();
        }
    }
}

impl<S> UmiAwareDuplicateSetIterator<S>
where
    S: DuplicateSetSource,
    S::Record: TaggedRecord,
{
    fn split(&mut self, set: DuplicateSet<S::Record>) -> Result<VecDeque<DuplicateSet<S::Record>>> {
        let records = set.len();
        let partition = match partition_by_umi(set, &self.config) {
            Ok(partition) => partition,
            Err(e) => {
                log::debug!("Failed to split duplicate set of {records} records: {e}");
                self.metrics.record_failure(records);
                return Err(e);
            }
        };
        match partition {
            Partition::MissingUmi(set) => {
                log::debug!(
                    "Duplicate set of {records} records has a record without a UMI, emitting it unchanged"
                );
                self.metrics.record_missing_umi(records);
                Ok(VecDeque::from([set]))
            }
            Partition::ByUmi { sets, distinct_umis } => {
                log::debug!(
                    "Split duplicate set of {records} records with {distinct_umis} distinct UMIs into {} sets",
                    sets.len()
                );
                self.metrics.record_split(records, distinct_umis, sets.len());
                Ok(sets.into())
            }
        }
    }
}

impl<S> Iterator for UmiAwareDuplicateSetIterator<S>
where
    S: DuplicateSetSource,
    S::Record: TaggedRecord,
{
    type Item = Result<DuplicateSet<S::Record>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                State::Draining(buffer) => {
                    if let Some(set) = buffer.pop_front() {
                        return Some(Ok(set));
                    }
                    self.state = State::Idle;
                }
                State::Exhausted | State::Closed => return None,
                State::Idle => match self.source.next_set() {
                    Ok(Some(set)) => match self.split(set) {
                        Ok(buffer) => self.state = State::Draining(buffer),
                        Err(e) => return Some(Err(e)),
                    },
                    Ok(None) => {
                        self.state = State::Exhausted;
                        log_umi_split_summary(&self.metrics);
                        return None;
                    }
                    Err(e) => return Some(Err(e.into())),
                },
            }
        }
    }
}

impl<S> FusedIterator for UmiAwareDuplicateSetIterator<S>
where
    S: DuplicateSetSource,
    S::Record: TaggedRecord,
{
}

impl<S: DuplicateSetSource> Drop for UmiAwareDuplicateSetIterator<S> {
    fn drop(&mut self) {
        self.close();
    }
}
