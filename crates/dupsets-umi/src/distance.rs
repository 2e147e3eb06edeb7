//! Hamming distance between UMI barcodes.
//!
//! All barcodes inside one duplicate set are expected to have the same length. A length
//! difference is reported as [`UmiError::BarcodeLengthMismatch`] instead of a distance.

use crate::{Result, UmiError};

/// Placeholder shown in errors for a barcode that is not present on a record.
pub const ABSENT_BARCODE: &str = "<absent>";

/// Count the positions at which two barcodes differ.
///
/// Comparison is byte-wise and case-sensitive.
///
/// # Errors
///
/// Returns [`UmiError::BarcodeLengthMismatch`] if `a` and `b` have different lengths.
///
/// # Examples
///
/// ```
/// use dupsets_umi::hamming_distance;
///
/// assert_eq!(hamming_distance("ACGT", "ACGT").unwrap(), 0);
/// assert_eq!(hamming_distance("AAAA", "AAAT").unwrap(), 1);
/// assert!(hamming_distance("AC", "ACG").is_err());
/// ```
pub fn hamming_distance(a: &str, b: &str) -> Result<u32> {
    if a.len() != b.len() {
        return Err(UmiError::BarcodeLengthMismatch {
            first: a.to_string(),
            second: b.to_string(),
        });
    }
    let mismatches = a.bytes().zip(b.bytes()).filter(|(x, y)| x != y).count();
    Ok(u32::try_from(mismatches).unwrap_or(u32::MAX))
}

/// Distance between two possibly-absent barcodes.
///
/// Two absent barcodes compare as distance 0. An absent barcode never matches a present
/// one, whatever its length, and is reported as a length mismatch.
///
/// # Errors
///
/// Returns [`UmiError::BarcodeLengthMismatch`] if exactly one barcode is absent or the two
/// present barcodes differ in length.
///
/// # Examples
///
/// ```
/// use dupsets_umi::barcode_distance;
///
/// assert_eq!(barcode_distance(None, None).unwrap(), 0);
/// assert_eq!(barcode_distance(Some("AAAA"), Some("TAAA")).unwrap(), 1);
/// assert!(barcode_distance(Some("AAAA"), None).is_err());
/// ```
pub fn barcode_distance(a: Option<&str>, b: Option<&str>) -> Result<u32> {
    match (a, b) {
        (None, None) => Ok(0),
        (Some(a), Some(b)) => hamming_distance(a, b),
        (a, b) => Err(UmiError::BarcodeLengthMismatch {
            first: a.unwrap_or(ABSENT_BARCODE).to_string(),
            second: b.unwrap_or(ABSENT_BARCODE).to_string(),
        }),
    }
}
