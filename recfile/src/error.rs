//! Error types for the recording file codec.

use bytestream::ByteError;
use std::fmt;

/// Errors raised while decoding a recording stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
    /// The stream ended inside a record.
    Truncated,

    /// A tag outside the record catalog. Records carry no length field,
    /// so the rest of the stream cannot be resynchronized past this point.
    UnknownRecordTag { tag: u8 },

    /// The stream does not begin with a header record.
    MissingHeader { tag: u8 },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "recording stream ended inside a record"),
            Self::UnknownRecordTag { tag } => {
                write!(f, "unknown record tag {tag:#04x}, cannot resynchronize")
            }
            Self::MissingHeader { tag } => {
                write!(f, "stream starts with tag {tag:#04x}, expected a header record")
            }
        }
    }
}

impl std::error::Error for RecordError {}

impl From<ByteError> for RecordError {
    fn from(_: ByteError) -> Self {
        // Record layouts are fixed-width; the only read failure is running
        // out of input.
        Self::Truncated
    }
}

/// Errors raised while encoding a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// A pulse block holds no samples, so no reference can be chosen.
    EmptyBlock,

    /// A sample is too far from the block reference to delta-encode.
    DeltaOutOfRange { delta: i64 },

    /// A field-level write failed.
    Value(ByteError),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBlock => write!(f, "pulse block holds no samples"),
            Self::DeltaOutOfRange { delta } => {
                write!(f, "delta {delta} from block reference does not fit 16 bits")
            }
            Self::Value(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Value(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ByteError> for EncodeError {
    fn from(err: ByteError) -> Self {
        Self::Value(err)
    }
}
