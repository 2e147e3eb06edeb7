//! Helper utilities for integration tests.

pub mod records;

pub use assertions::*;
pub use records::*;
