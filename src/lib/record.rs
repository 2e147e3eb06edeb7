//! String tag access on alignment records.
//!
//! The splitter only ever reads one string tag (the raw UMI) and writes one (the inferred
//! UMI), so records are abstracted behind [`TaggedRecord`]. It is implemented for noodles
//! [`RecordBuf`]; callers with other record types implement it themselves.

use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record_buf::RecordBuf;
use noodles::sam::alignment::record_buf::data::field::Value;

/// Raw UMI sequence tag (`RX`).
pub const UMI_TAG: Tag = Tag::new(b'R', b'X');

/// Inferred (consensus) UMI tag written when splitting with inferred UMIs enabled (`RI`).
pub const INFERRED_UMI_TAG: Tag = Tag::new(b'R', b'I');

/// A record exposing get/set access to string-valued tags.
pub trait TaggedRecord {
    /// The string stored under `tag`, or `None` if the tag is missing, not a string, or
    /// not valid UTF-8.
    fn string_tag(&self, tag: Tag) -> Option<&str>;

    /// Store `value` as a string under `tag`, replacing any existing value.
    fn set_string_tag(&mut self, tag: Tag, value: &str);
}

impl TaggedRecord for RecordBuf {
    fn string_tag(&self, tag: Tag) -> Option<&str> {
        match self.data().get(&tag) {
            Some(Value::String(s)) => std::str::from_utf8(s.as_ref()).ok(),
            _ => None,
        }
    }

    fn set_string_tag(&mut self, tag: Tag, value: &str) {
        self.data_mut().insert(tag, Value::from(value.to_string()));
    }
}
