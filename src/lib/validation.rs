//! Validation of the SAM tag options.

use crate::errors::{DupsetsError, Result};
use noodles::sam::alignment::record::data::field::Tag;

/// Parse a SAM tag option: a letter followed by a letter or digit, e.g. `RX` or `B2`.
///
/// # Errors
///
/// Returns [`DupsetsError::InvalidParameter`] naming `option` if `tag` is malformed.
///
/// ```
/// use dupsets_lib::validation::parse_tag;
///
/// assert!(parse_tag("RX", "umi-tag").is_ok());
/// assert!(parse_tag("2X", "umi-tag").is_err());
/// ```
pub fn parse_tag(tag: &str, option: &str) -> Result<Tag> {
    match *tag.as_bytes() {
        [a, b] if a.is_ascii_alphabetic() && b.is_ascii_alphanumeric() => Ok(Tag::new(a, b)),
        _ => Err(DupsetsError::InvalidParameter {
            parameter: option.to_string(),
            reason: format!("expected a letter then a letter or digit, got: '{tag}'"),
        }),
    }
}
