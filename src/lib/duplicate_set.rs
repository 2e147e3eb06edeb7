//! Duplicate sets and the sources that produce them.
//!
//! A [`DuplicateSet`] is a non-empty batch of records already known to be positional
//! duplicates. A [`DuplicateSetSource`] yields such batches one at a time and owns whatever
//! resource backs them, released through [`DuplicateSetSource::close`].
//!
//! Two sources are provided:
//! - [`IteratorSource`] adapts any iterator of ready-made duplicate sets.
//! - [`KeyedDuplicateSetSource`] groups consecutive records of a sorted record stream that
//!   share a key (for example reference, position and strand).

use std::io;

/// A non-empty, ordered batch of records presumed to be positional duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateSet<R> {
    records: Vec<R>,
}

impl<R> DuplicateSet<R> {
    /// Create a duplicate set, or `None` if `records` is empty.
    #[must_use]
    pub fn new(records: Vec<R>) -> Option<Self> {
        if records.is_empty() { None } else { Some(Self { records }) }
    }

    /// The records, in order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Mutable access to the records, for annotation in place.
    #[must_use]
    pub fn records_mut(&mut self) -> &mut [R] {
        &mut self.records
    }

    /// Consume the set and return its records.
    #[must_use]
    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    /// Number of records in the set (always at least 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; a duplicate set holds at least one record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R> IntoIterator for DuplicateSet<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// A pull-based source of duplicate sets.
pub trait DuplicateSetSource {
    /// Record type carried by the duplicate sets.
    type Record;

    /// Fetch the next duplicate set, or `Ok(None)` once the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns any error raised while reading the underlying records.
    fn next_set(&mut self) -> io::Result<Option<DuplicateSet<Self::Record>>>;

    /// Release the resources behind this source. Must be safe to call more than once;
    /// after closing, [`DuplicateSetSource::next_set`] returns `Ok(None)`.
    fn close(&mut self) {}
}

/// A [`DuplicateSetSource`] over an iterator of duplicate sets.
///
/// Closing drops the wrapped iterator.
pub struct IteratorSource<I> {
    inner: Option<I>,
}

impl<I> IteratorSource<I> {
    /// Wrap `iter` as a duplicate-set source.
    #[must_use]
    pub fn new(iter: I) -> Self {
        Self { inner: Some(iter) }
    }

    /// Returns true once the source has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }
}

impl<R, I> DuplicateSetSource for IteratorSource<I>
where
    I: Iterator<Item = io::Result<DuplicateSet<R>>>,
{
    type Record = R;

    fn next_set(&mut self) -> io::Result<Option<DuplicateSet<R>>> {
        match self.inner.as_mut() {
            Some(iter) => iter.next().transpose(),
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.inner = None;
    }
}

/// Build an [`IteratorSource`] over duplicate sets that are already in memory.
///
/// # Example
///
/// ```
/// use dupsets_lib::duplicate_set::{DuplicateSet, DuplicateSetSource, source_from_sets};
///
/// let sets = vec![DuplicateSet::new(vec![1, 2]).unwrap(), DuplicateSet::new(vec![3]).unwrap()];
/// let mut source = source_from_sets(sets);
/// assert_eq!(source.next_set().unwrap().unwrap().len(), 2);
/// assert_eq!(source.next_set().unwrap().unwrap().len(), 1);
/// assert!(source.next_set().unwrap().is_none());
/// ```
pub fn source_from_sets<R>(
    sets: Vec<DuplicateSet<R>>,
) -> IteratorSource<impl Iterator<Item = io::Result<DuplicateSet<R>>>> {
    IteratorSource::new(sets.into_iter().map(Ok))
}

/// Groups consecutive records that share a key into duplicate sets.
///
/// The record stream must already be sorted (or at least grouped) by the key; records with
/// equal keys that are not adjacent end up in separate sets. Read errors from the stream
/// are returned unchanged, and the records gathered so far for the set in progress are
/// dropped.
///
/// # Example
///
/// ```
/// use dupsets_lib::duplicate_set::{DuplicateSetSource, KeyedDuplicateSetSource};
///
/// let records = vec![(1, 'a'), (1, 'b'), (2, 'c')].into_iter().map(Ok);
/// let mut source = KeyedDuplicateSetSource::new(records, |r: &(u32, char)| r.0);
///
/// assert_eq!(source.next_set().unwrap().unwrap().len(), 2);
/// assert_eq!(source.next_set().unwrap().unwrap().len(), 1);
/// assert!(source.next_set().unwrap().is_none());
/// ```
pub struct KeyedDuplicateSetSource<I, R, K, F> {
    /// The record stream; `None` once closed.
    records: Option<I>,
    /// Computes the grouping key of a record.
    key_fn: F,
    /// First record of the next set, read while finishing the previous one.
    pending: Option<(K, R)>,
}

impl<I, R, K, F> KeyedDuplicateSetSource<I, R, K, F>
where
    I: Iterator<Item = io::Result<R>>,
    F: FnMut(&R) -> K,
    K: PartialEq,
{
    /// Create a source grouping `records` by `key_fn`.
    pub fn new(records: I, key_fn: F) -> Self {
        Self { records: Some(records), key_fn, pending: None }
    }
}

impl<I, R, K, F> DuplicateSetSource for KeyedDuplicateSetSource<I, R, K, F>
where
    I: Iterator<Item = io::Result<R>>,
    F: FnMut(&R) -> K,
    K: PartialEq,
{
    type Record = R;

    fn next_set(&mut self) -> io::Result<Option<DuplicateSet<R>>> {
        let Some(records) = self.records.as_mut() else {
            return Ok(None);
        };

        let (key, first) = match self.pending.take() {
            Some(pending) => pending,
            None => match records.next() {
                Some(record) => {
                    let record = record?;
                    ((self.key_fn)(&record), record)
                }
                None => return Ok(None),
            },
        };

        let mut group = vec![first];
        for record in records.by_ref() {
            let record = record?;
            let next_key = (self.key_fn)(&record);
            if next_key == key {
                group.push(record);
            } else {
                self.pending = Some((next_key, record));
                break;
            }
        }

        Ok(DuplicateSet::new(group))
    }

    fn close(&mut self) {
        self.records = None;
        self.pending = None;
    }
}
