//! Error types for byte-level operations.

use std::fmt;

/// Result type for byte-level operations.
pub type ByteResult<T> = Result<T, ByteError>;

/// Errors raised by [`ByteReader`](crate::ByteReader) and
/// [`ByteWriter`](crate::ByteWriter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ByteError {
    /// The input slice ended before the requested field.
    UnexpectedEnd { requested: usize, available: usize },

    /// A variable-width integer was requested with an unsupported width.
    InvalidWidth { width: usize },

    /// A value does not fit the requested field width.
    ValueOutOfRange { value: i64, width: usize },

    /// A string does not fit its fixed-width field.
    StringTooLong { length: usize, capacity: usize },

    /// A count or flag does not fit its packed bit field.
    BitFieldOverflow { value: u32, bits: u32 },
}

impl fmt::Display for ByteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEnd {
                requested,
                available,
            } => {
                write!(
                    f,
                    "unexpected end of input: requested {requested} bytes, {available} available"
                )
            }
            Self::InvalidWidth { width } => {
                write!(f, "invalid integer width: {width} bytes")
            }
            Self::ValueOutOfRange { value, width } => {
                write!(f, "value {value} does not fit in {width} bytes")
            }
            Self::StringTooLong { length, capacity } => {
                write!(
                    f,
                    "string of {length} bytes does not fit field of {capacity} bytes"
                )
            }
            Self::BitFieldOverflow { value, bits } => {
                write!(f, "value {value} does not fit in a {bits}-bit field")
            }
        }
    }
}

impl std::error::Error for ByteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unexpected_end() {
        let err = ByteError::UnexpectedEnd {
            requested: 4,
            available: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("requested 4"));
        assert!(msg.contains("1 available"));
    }

    #[test]
    fn display_value_out_of_range() {
        let err = ByteError::ValueOutOfRange {
            value: 100_000,
            width: 2,
        };
        assert!(err.to_string().contains("100000"));
    }
}
