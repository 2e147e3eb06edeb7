//! End-to-end tests for UMI-aware duplicate-set splitting.

use std::collections::BTreeMap;

use dupsets_lib::duplicate_set::{DuplicateSet, KeyedDuplicateSetSource, source_from_sets};
use dupsets_lib::errors::Result;
use dupsets_lib::record::{INFERRED_UMI_TAG, TaggedRecord, UMI_TAG};
use dupsets_lib::splitter::{SplitConfig, UmiAwareDuplicateSetIterator};
use noodles::sam::alignment::record_buf::RecordBuf;
use proptest::prelude::*;

use crate::helpers::{
    assert_no_ri_tag, assert_ri_tag, assert_rx_tag, assert_set_sizes, duplicate_set, names,
    record, umi_set,
};

fn split_all(
    sets: Vec<DuplicateSet<RecordBuf>>,
    config: SplitConfig,
) -> Result<Vec<DuplicateSet<RecordBuf>>> {
    UmiAwareDuplicateSetIterator::new(source_from_sets(sets), config).collect()
}

// ==================== Example scenarios ====================

#[test]
fn test_one_edit_joins_close_umis() {
    let sets = split_all(vec![umi_set(&["AAAA", "AAAA", "AAAT", "TTTT"])], SplitConfig::default())
        .unwrap();

    assert_set_sizes(&sets, &[3, 1]);
    assert_eq!(names(&sets[0]), vec!["r0", "r1", "r2"]);
    assert_rx_tag(&sets[1].records()[0], "TTTT");
}

#[test]
fn test_zero_edits_groups_exact_matches_only() {
    let config = SplitConfig::default().with_edit_distance_to_join(0);
    let sets = split_all(vec![umi_set(&["AAAA", "AAAA", "AAAT", "TTTT"])], config).unwrap();

    assert_set_sizes(&sets, &[2, 1, 1]);
    assert_eq!(names(&sets[0]), vec!["r0", "r1"]);
}

#[test]
fn test_set_with_missing_umi_passes_through() {
    let input = duplicate_set(&[Some("AAAA"), None, Some("GGGG")]);
    let sets = split_all(vec![input.clone()], SplitConfig::default()).unwrap();

    assert_eq!(sets, vec![input]);
}

#[test]
fn test_length_mismatch_fails_the_set() {
    let result = split_all(vec![umi_set(&["AC", "ACG"])], SplitConfig::default());
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Barcode AC and ACG do not have matching lengths");
}

#[test]
fn test_inferred_umi_is_majority() {
    let config = SplitConfig::default().with_add_inferred_umi(true);
    let sets = split_all(vec![umi_set(&["AAAA", "AAAA", "AAAT"])], config).unwrap();

    assert_set_sizes(&sets, &[3]);
    for record in sets[0].records() {
        assert_ri_tag(record, "AAAA");
    }
    assert_rx_tag(&sets[0].records()[2], "AAAT");
}

// ==================== Properties ====================

#[test]
fn test_transitive_joining() {
    // AAAA-AAAT-AATT-ATTT chain: the ends are 3 apart but every link is 1.
    let sets = split_all(vec![umi_set(&["ATTT", "AAAA", "AATT", "AAAT"])], SplitConfig::default())
        .unwrap();
    assert_set_sizes(&sets, &[4]);
}

#[test]
fn test_fallback_even_when_only_one_record_lacks_umi() {
    let config = SplitConfig::default().with_add_inferred_umi(true);
    let input = duplicate_set(&[Some("AAAA"), Some("TTTT"), Some("CCCC"), None]);
    let sets = split_all(vec![input.clone()], config).unwrap();

    assert_eq!(sets, vec![input]);
    assert_no_ri_tag(&sets[0]);
}

#[test]
fn test_consensus_tie_picks_smallest_umi() {
    let config = SplitConfig::default().with_add_inferred_umi(true);
    let sets = split_all(vec![umi_set(&["CAAA", "AAAA"])], config).unwrap();

    assert_set_sizes(&sets, &[2]);
    assert_ri_tag(&sets[0].records()[0], "AAAA");
    assert_ri_tag(&sets[0].records()[1], "AAAA");
}

#[test]
fn test_sets_are_split_independently() {
    let inputs = vec![
        umi_set(&["AAAA", "TTTT"]),
        duplicate_set(&[None, Some("AAAA")]),
        umi_set(&["GGGG", "GGGC", "GGCC"]),
    ];
    let mut iter =
        UmiAwareDuplicateSetIterator::new(source_from_sets(inputs), SplitConfig::default());
    let sets: Vec<_> = iter.by_ref().collect::<Result<_>>().unwrap();

    assert_set_sizes(&sets, &[1, 1, 2, 3]);
    let metrics = iter.metrics();
    assert_eq!(metrics.input_sets, 3);
    assert_eq!(metrics.output_sets, 4);
    assert_eq!(metrics.sets_missing_umi, 1);
    assert_eq!(metrics.input_records, 7);
}

#[test]
fn test_keyed_source_over_sorted_records() {
    // Two positions; the first holds two molecules, the second one.
    let records = vec![
        record("a1", 100, Some("ACGT")),
        record("a2", 100, Some("ACGA")),
        record("a3", 100, Some("TGCA")),
        record("b1", 250, Some("ACGT")),
        record("b2", 250, Some("ACGT")),
    ];
    let source = KeyedDuplicateSetSource::new(records.into_iter().map(Ok), |r: &RecordBuf| {
        (r.reference_sequence_id(), r.alignment_start(), r.flags().is_reverse_complemented())
    });
    let config = SplitConfig::default().with_add_inferred_umi(true);
    let sets: Vec<_> =
        UmiAwareDuplicateSetIterator::new(source, config).collect::<Result<_>>().unwrap();

    assert_set_sizes(&sets, &[2, 1, 2]);
    assert_eq!(names(&sets[0]), vec!["a1", "a2"]);
    assert_eq!(names(&sets[1]), vec!["a3"]);
    assert_eq!(names(&sets[2]), vec!["b1", "b2"]);
    assert_ri_tag(&sets[2].records()[0], "ACGT");
}

// ==================== Property-based tests ====================

fn umi_strategy(len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['A', 'C', 'G', 'T']), len)
        .prop_map(|bases| bases.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_partition_is_complete(
        umis in prop::collection::vec(umi_strategy(6), 1..40),
        edits in 0u32..4,
    ) {
        let umi_refs: Vec<&str> = umis.iter().map(String::as_str).collect();
        let config = SplitConfig::default().with_edit_distance_to_join(edits);
        let sets = split_all(vec![umi_set(&umi_refs)], config).unwrap();

        let mut seen: Vec<String> = sets.iter().flat_map(names).collect();
        seen.sort();
        let mut expected: Vec<String> = (0..umis.len()).map(|i| format!("r{i}")).collect();
        expected.sort();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn prop_zero_edits_groups_identical_umis(
        umis in prop::collection::vec(umi_strategy(3), 1..30),
    ) {
        let umi_refs: Vec<&str> = umis.iter().map(String::as_str).collect();
        let config = SplitConfig::default().with_edit_distance_to_join(0);
        let sets = split_all(vec![umi_set(&umi_refs)], config).unwrap();

        let mut by_umi: BTreeMap<String, usize> = BTreeMap::new();
        for umi in &umis {
            *by_umi.entry(umi.clone()).or_insert(0) += 1;
        }
        prop_assert_eq!(sets.len(), by_umi.len());
        for set in &sets {
            let first = set.records()[0].string_tag(UMI_TAG).unwrap();
            for record in set.records() {
                prop_assert_eq!(record.string_tag(UMI_TAG).unwrap(), first);
            }
            prop_assert_eq!(set.len(), by_umi[first]);
        }
    }

    #[test]
    fn prop_inferred_umi_is_a_maximal_umi(
        umis in prop::collection::vec(umi_strategy(4), 1..30),
        edits in 0u32..3,
    ) {
        let umi_refs: Vec<&str> = umis.iter().map(String::as_str).collect();
        let config =
            SplitConfig::default().with_edit_distance_to_join(edits).with_add_inferred_umi(true);
        let sets = split_all(vec![umi_set(&umi_refs)], config).unwrap();

        for set in &sets {
            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for record in set.records() {
                let umi = record.string_tag(UMI_TAG).unwrap().to_string();
                *counts.entry(umi).or_insert(0) += 1;
            }
            let max = counts.values().copied().max().unwrap();
            let inferred = set.records()[0].string_tag(INFERRED_UMI_TAG).unwrap().to_string();
            prop_assert_eq!(counts[&inferred], max);
            for record in set.records() {
                prop_assert_eq!(
                    record.string_tag(INFERRED_UMI_TAG).unwrap().to_string(),
                    inferred.clone()
                );
            }
        }
    }
}
