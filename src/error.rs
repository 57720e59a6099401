//! Error types for range trees and the peer utilities.
//!
//! Every panicking operation in this crate has a `try_` twin that returns one
//! of these instead. The panicking form panics with the error's `Display`
//! text.

use thiserror::Error;

/// Result type for fallible `rangekit` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by precondition checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Tree bounds describe no positions.
    #[error("empty tree bounds: first {first} > last {last}")]
    EmptyBounds {
        /// Requested first logical position.
        first: i64,
        /// Requested last logical position.
        last: i64,
    },

    /// Bounds touch the ends of `i64`, leaving no room for the
    /// `first - 1` and `last + 1` positions searches report on failure.
    #[error("tree bounds [{first}, {last}] must lie strictly inside the i64 range")]
    BoundsAtLimit {
        /// Requested first logical position.
        first: i64,
        /// Requested last logical position.
        last: i64,
    },

    /// More initial values than positions.
    #[error("initial data too long: {len} values for {capacity} positions")]
    DataTooLong {
        /// Number of values supplied.
        len: usize,
        /// Number of positions available.
        capacity: usize,
    },

    /// Range is empty once clamped into the tree bounds.
    #[error("inverted range: [{l}, {r}] is empty within [{first}, {last}]")]
    InvertedRange {
        /// Requested left end.
        l: i64,
        /// Requested right end.
        r: i64,
        /// First logical position of the tree.
        first: i64,
        /// Last logical position of the tree.
        last: i64,
    },

    /// Hash scheme cannot produce well-defined digests.
    #[error("invalid hash scheme: base {base}, modulus {modulus}")]
    InvalidScheme {
        /// Requested base.
        base: u64,
        /// Requested modulus.
        modulus: u64,
    },

    /// Hash sequence already holds `capacity` elements.
    #[error("hash sequence full: capacity {capacity}")]
    SequenceFull {
        /// Fixed capacity of the sequence.
        capacity: usize,
    },

    /// Hash window is not inside the elements added so far.
    #[error("hash query [{l}, {r}] out of bounds for length {len}")]
    HashOutOfBounds {
        /// Requested left end.
        l: usize,
        /// Requested right end.
        r: usize,
        /// Number of elements added.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_fields() {
        let err = Error::InvertedRange { l: 5, r: 2, first: 0, last: 9 };
        assert_eq!(err.to_string(), "inverted range: [5, 2] is empty within [0, 9]");

        let err = Error::DataTooLong { len: 6, capacity: 4 };
        assert_eq!(err.to_string(), "initial data too long: 6 values for 4 positions");
    }

    #[test]
    fn bounds_at_limit_display() {
        let err = Error::BoundsAtLimit { first: 0, last: i64::MAX };
        assert_eq!(
            err.to_string(),
            "tree bounds [0, 9223372036854775807] must lie strictly inside the i64 range"
        );
    }

    #[test]
    fn errors_compare_by_value() {
        assert_eq!(Error::SequenceFull { capacity: 3 }, Error::SequenceFull { capacity: 3 });
        assert_ne!(Error::SequenceFull { capacity: 3 }, Error::SequenceFull { capacity: 4 });
    }
}
