//! Error types for wire protocol encode and decode.

use bytestream::ByteError;
use std::fmt;

/// Errors raised while decoding a wire frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Not enough bytes for a whole frame yet; retry once more arrive.
    Incomplete,

    /// The declared frame length is shorter than the frame overhead.
    InvalidLength { length: u16 },

    /// The trailing CRC does not match the one computed over the frame.
    CrcMismatch { expected: u16, computed: u16 },

    /// The type byte is not in the message catalog.
    UnknownMessageType { msg_type: u8 },

    /// The frame was structurally sound but its body was not.
    ///
    /// Carries the offending body hex-encoded so transport logs can show
    /// exactly what the device sent.
    Malformed {
        msg_type: u8,
        payload_hex: String,
        reason: BodyError,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete => write!(f, "incomplete frame, more bytes needed"),
            Self::InvalidLength { length } => {
                write!(f, "declared frame length {length} is below the minimum of 5")
            }
            Self::CrcMismatch { expected, computed } => {
                write!(
                    f,
                    "crc mismatch: frame carries {expected:#06x}, computed {computed:#06x}"
                )
            }
            Self::UnknownMessageType { msg_type } => {
                write!(f, "unknown message type {msg_type:#04x}")
            }
            Self::Malformed {
                msg_type,
                payload_hex,
                reason,
            } => {
                write!(
                    f,
                    "malformed body for message type {msg_type:#04x} ({payload_hex}): {reason}"
                )
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Malformed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Why a message body failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum BodyError {
    /// A field-level read failed.
    Byte(ByteError),

    /// The body length matches no valid shape for this message.
    UnexpectedBodyLength { actual: usize },
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(err) => err.fmt(f),
            Self::UnexpectedBodyLength { actual } => {
                write!(f, "body length {actual} matches no valid shape")
            }
        }
    }
}

impl std::error::Error for BodyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Byte(err) => Some(err),
            Self::UnexpectedBodyLength { .. } => None,
        }
    }
}

impl From<ByteError> for BodyError {
    fn from(err: ByteError) -> Self {
        Self::Byte(err)
    }
}

/// Errors raised while encoding a message into a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// An attribute-bearing message holds no value for its attribute id.
    MissingAttributeValue { attribute_id: u8 },

    /// A command payload does not match the length the command requires.
    InvalidCommandPayload {
        command_id: u8,
        expected: usize,
        actual: usize,
    },

    /// The body would push the frame past the 16-bit length field.
    BodyTooLong { length: usize },

    /// An attribute value does not fit its one-byte length field.
    AttributeValueTooLong { attribute_id: u8, length: usize },

    /// A field-level write failed.
    Value(ByteError),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAttributeValue { attribute_id } => {
                write!(f, "no value to encode for attribute {attribute_id:#04x}")
            }
            Self::InvalidCommandPayload {
                command_id,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "command {command_id:#04x} requires a {expected}-byte payload, got {actual}"
                )
            }
            Self::BodyTooLong { length } => {
                write!(f, "body of {length} bytes does not fit a frame")
            }
            Self::AttributeValueTooLong {
                attribute_id,
                length,
            } => {
                write!(
                    f,
                    "value for attribute {attribute_id:#04x} is {length} bytes, over the 255-byte limit"
                )
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
