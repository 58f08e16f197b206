//! Error types for editkit.
//!
//! Validation failures are reported as structured values; the algebra
//! functions themselves (`apply_*`, `invert_*`) assume validated input and
//! never construct errors.

use thiserror::Error;

/// Errors that can occur while validating or combining edit scripts.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// An operation addresses positions outside the source or destination
    /// string, or sits on a string end with a kind that cannot occur there
    /// (only Insert at `spos == source_len`, only Delete at
    /// `dpos == destination_len`).
    #[error(
        "operation {index}: positions ({spos}, {dpos}) invalid for lengths ({source_len}, {destination_len})"
    )]
    OutOfBounds {
        /// Index of the offending operation
        index: usize,
        /// Source position of the operation
        spos: usize,
        /// Destination position of the operation
        dpos: usize,
        /// Length of the source string
        source_len: usize,
        /// Length of the destination string
        destination_len: usize,
    },

    /// An operation steps backwards relative to its predecessor.
    #[error("operation {index} goes backwards")]
    OutOfOrder {
        /// Index of the offending operation
        index: usize,
    },

    /// A block's span shape does not match its kind.
    #[error("block {index} has a span inconsistent with its kind")]
    MalformedBlock {
        /// Index of the offending block
        index: usize,
    },

    /// A block list does not tile the full source and destination strings.
    #[error("block list does not cover 0..{source_len} and 0..{destination_len}")]
    UncoveredSpan {
        /// Length of the source string
        source_len: usize,
        /// Length of the destination string
        destination_len: usize,
    },

    /// The subtrahend passed to [`subtract_edit_ops`](crate::subtract_edit_ops)
    /// is not an ordered subsequence of the script.
    #[error("subtrahend operation {index} is not part of the script")]
    NotASubsequence {
        /// Index of the first subtrahend operation that could not be matched
        index: usize,
    },

    /// Hamming distance requires equally long strings.
    #[error("strings differ in length: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first string
        left: usize,
        /// Length of the second string
        right: usize,
    },
}

/// Result type alias for editkit operations.
pub type EditResult<T> = Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EditError::OutOfOrder { index: 3 };
        assert_eq!(err.to_string(), "operation 3 goes backwards");

        let err = EditError::LengthMismatch { left: 2, right: 5 };
        assert_eq!(err.to_string(), "strings differ in length: 2 vs 5");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EditError>();
    }
}
