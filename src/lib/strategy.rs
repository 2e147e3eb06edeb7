//! Selection of how a duplicate-marking pipeline forms its duplicate sets.
//!
//! A pipeline depends only on [`DuplicateSetStream`]: a closable iterator of duplicate sets.
//! [`DuplicateSetStrategy`] picks the implementation from configuration:
//!
//! - [`DuplicateSetStrategy::Positional`] passes the source's positional sets through as-is.
//! - [`DuplicateSetStrategy::UmiAware`] splits each positional set by UMI with
//!   [`UmiAwareDuplicateSetIterator`].

use std::iter::FusedIterator;

use crate::duplicate_set::{DuplicateSet, DuplicateSetSource};
use crate::errors::Result;
use crate::record::TaggedRecord;
use crate::splitter::{SplitConfig, UmiAwareDuplicateSetIterator};

/// A closable stream of duplicate sets consumed by a duplicate-marking pipeline.
pub trait DuplicateSetStream<R>: Iterator<Item = Result<DuplicateSet<R>>> {
    /// Stop iteration and close the underlying source. Safe to call repeatedly.
    fn close(&mut self);
}

impl<S> DuplicateSetStream<S::Record> for UmiAwareDuplicateSetIterator<S>
where
    S: DuplicateSetSource,
    S::Record: TaggedRecord,
{
    fn close(&mut self) {
        UmiAwareDuplicateSetIterator::close(self);
    }
}

/// Yields the source's duplicate sets unchanged.
pub struct PositionalDuplicateSets<S: DuplicateSetSource> {
    source: S,
    done: bool,
    closed: bool,
}

impl<S: DuplicateSetSource> PositionalDuplicateSets<S> {
    /// Wrap `source` without splitting its sets.
    pub fn new(source: S) -> Self {
        Self { source, done: false, closed: false }
    }
}

impl<S: DuplicateSetSource> Iterator for PositionalDuplicateSets<S> {
    type Item = Result<DuplicateSet<S::Record>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.source.next_set() {
            Ok(Some(set)) => Some(Ok(set)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}

impl<S: DuplicateSetSource> FusedIterator for PositionalDuplicateSets<S> {}

impl<S: DuplicateSetSource> DuplicateSetStream<S::Record> for PositionalDuplicateSets<S> {
    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.done = true;
            self.source.close();
        }
    }
}

impl<S: DuplicateSetSource> Drop for PositionalDuplicateSets<S> {
    fn drop(&mut self) {
        DuplicateSetStream::close(self);
    }
}

/// How duplicate sets are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateSetStrategy {
    /// Records sharing alignment position and orientation form one set.
    Positional,
    /// Positional sets are further split by UMI similarity.
    UmiAware(SplitConfig),
}

impl Default for DuplicateSetStrategy {
    fn default() -> Self {
        Self::UmiAware(SplitConfig::default())
    }
}

impl DuplicateSetStrategy {
    /// Short name used in log messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Positional => "positional",
            Self::UmiAware(_) => "umi-aware",
        }
    }

    /// Build the duplicate-set stream for `source` under this strategy.
    ///
    /// # Example
    ///
    /// ```
    /// use dupsets_lib::duplicate_set::{DuplicateSet, source_from_sets};
    /// use dupsets_lib::record::{TaggedRecord, UMI_TAG};
    /// use dupsets_lib::strategy::DuplicateSetStrategy;
    /// use noodles::sam::alignment::RecordBuf;
    ///
    /// let records: Vec<RecordBuf> = ["AAAA", "TTTT"]
    ///     .iter()
    ///     .map(|umi| {
    ///         let mut record = RecordBuf::default();
    ///         record.set_string_tag(UMI_TAG, umi);
    ///         record
    ///     })
    ///     .collect();
    /// let sets = vec![DuplicateSet::new(records).unwrap()];
    ///
    /// let strategy = DuplicateSetStrategy::default();
    /// let stream = strategy.duplicate_sets(source_from_sets(sets.clone()));
    /// assert_eq!(stream.count(), 2);
    ///
    /// let stream = DuplicateSetStrategy::Positional.duplicate_sets(source_from_sets(sets));
    /// assert_eq!(stream.count(), 1);
    /// ```
    pub fn duplicate_sets<S>(&self, source: S) -> Box<dyn DuplicateSetStream<S::Record>>
    where
        S: DuplicateSetSource + 'static,
        S::Record: TaggedRecord + 'static,
    {
        log::debug!("Forming duplicate sets with the {} strategy", self.name());
        match self {
            Self::Positional => Box::new(PositionalDuplicateSets::new(source)),
            Self::UmiAware(config) => Box::new(UmiAwareDuplicateSetIterator::new(source, *config)),
        }
    }
}
