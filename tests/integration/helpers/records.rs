//! Builders for test alignment records and duplicate sets.

#![allow(dead_code)]

use std::cell::Cell;
use std::io;
use std::rc::Rc;

use bstr::BString;
use dupsets_lib::duplicate_set::{DuplicateSet, DuplicateSetSource};
use dupsets_lib::record::{TaggedRecord, UMI_TAG};
use noodles::core::Position;
use noodles::sam::alignment::record::Flags;
use noodles::sam::alignment::record_buf::RecordBuf;

/// Builds a mapped record on reference 0 at `start` with an optional RX tag.
pub fn record(name: &str, start: usize, umi: Option<&str>) -> RecordBuf {
    let mut rec = RecordBuf::builder()
        .set_name(BString::from(name))
        .set_reference_sequence_id(0)
        .set_alignment_start(Position::try_from(start).unwrap())
        .set_flags(Flags::empty())
        .build();
    if let Some(umi) = umi {
        rec.set_string_tag(UMI_TAG, umi);
    }
    rec
}

/// Builds a duplicate set at position 100 with one record per UMI, named `r0`, `r1`, ...
pub fn duplicate_set(umis: &[Option<&str>]) -> DuplicateSet<RecordBuf> {
    let records =
        umis.iter().enumerate().map(|(i, umi)| record(&format!("r{i}"), 100, *umi)).collect();
    DuplicateSet::new(records).unwrap()
}

/// Same as [`duplicate_set`] for sets where every record has a UMI.
pub fn umi_set(umis: &[&str]) -> DuplicateSet<RecordBuf> {
    let umis: Vec<Option<&str>> = umis.iter().copied().map(Some).collect();
    duplicate_set(&umis)
}

/// Record names of a duplicate set, in order.
pub fn names(set: &DuplicateSet<RecordBuf>) -> Vec<String> {
    set.records()
        .iter()
        .map(|r| r.name().map(ToString::to_string).unwrap_or_default())
        .collect()
}

/// A source over scripted results that counts how often it is closed.
pub struct TrackingSource {
    results: std::vec::IntoIter<io::Result<DuplicateSet<RecordBuf>>>,
    closes: Rc<Cell<usize>>,
}

impl TrackingSource {
    /// Returns the source and a shared counter of `close` calls.
    pub fn new(results: Vec<io::Result<DuplicateSet<RecordBuf>>>) -> (Self, Rc<Cell<usize>>) {
        let closes = Rc::new(Cell::new(0));
        (Self { results: results.into_iter(), closes: Rc::clone(&closes) }, closes)
    }
}

impl DuplicateSetSource for TrackingSource {
    type Record = RecordBuf;

    fn next_set(&mut self) -> io::Result<Option<DuplicateSet<RecordBuf>>> {
        self.results.next().transpose()
    }

    fn close(&mut self) {
        self.closes.set(self.closes.get() + 1);
    }
}
