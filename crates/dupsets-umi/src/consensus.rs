//! Consensus (inferred) barcode selection.
//!
//! The consensus barcode of a group is its most frequently observed raw barcode. When
//! several barcodes share the highest count, the lexicographically smallest one is chosen,
//! so the result does not depend on the order in which records are visited.

use ahash::AHashMap;

/// Select the most frequent barcode.
///
/// Returns `None` if `barcodes` is empty. Ties on count are broken by taking the
/// lexicographically smallest barcode.
///
/// # Examples
///
/// ```
/// use dupsets_umi::most_common_barcode;
///
/// assert_eq!(most_common_barcode(["AAAA", "AAAT", "AAAA"]), Some("AAAA"));
/// assert_eq!(most_common_barcode(["TTTT", "GGGG"]), Some("GGGG"));
/// assert_eq!(most_common_barcode(Vec::<&str>::new()), None);
/// ```
pub fn most_common_barcode<'a, I>(barcodes: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: AHashMap<&'a str, usize> = AHashMap::new();
    for barcode in barcodes {
        *counts.entry(barcode).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|(a_umi, a_count), (b_umi, b_count)| {
            a_count.cmp(b_count).then_with(|| b_umi.cmp(a_umi))
        })
        .map(|(umi, _)| umi)
}
