//! Error types for classification failures
//!
//! Errors are kept small and `Copy`: they are returned from hot-path
//! classification calls and carried inside larger pipeline errors.
//!
//! All variants describe invalid *input*; classification itself is total
//! over valid inputs and never fails for any other reason. An invalid
//! input aborts only the current run; callers surface it and continue.

use thiserror::Error;

/// Result type for classification operations
pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// Classification errors - malformed or undersized input
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyError {
    /// Sample shorter than the fixed analysis window
    #[error("analysis window needs {required} samples, have {available}")]
    WindowTooShort {
        /// Window length the classifier analyses
        required: usize,
        /// Length of the vector actually supplied
        available: usize,
    },

    /// Empty sample vector where at least one value is required
    #[error("sample vector is empty")]
    EmptySample,

    /// Value makes no sense as a reading (NaN, infinity)
    #[error("invalid value: not a finite number")]
    InvalidValue,
}
