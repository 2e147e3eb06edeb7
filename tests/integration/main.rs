//! Integration tests for the dupsets library.
//!
//! These tests drive duplicate sets through the public API end to end, from a record
//! stream or pre-built sets through the splitter and strategy layers.

mod helpers;
mod test_umi_aware_iterator;
