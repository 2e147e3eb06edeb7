//! Custom error types for dupsets operations.

use dupsets_umi::UmiError;
use thiserror::Error;

/// Result type alias for dupsets operations
pub type Result<T> = std::result::Result<T, DupsetsError>;

/// Error type for dupsets operations
#[derive(Error, Debug)]
pub enum DupsetsError {
    /// Two UMIs compared within one duplicate set have different lengths
    #[error(transparent)]
    BarcodeLengthMismatch(#[from] UmiError),

    /// Failure reported by the upstream duplicate-set source, passed through as-is
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },
}
