//! Wire protocol codec for sensewire biosensor devices.
//!
//! The device speaks a framed binary protocol over BLE or UART:
//! `[type][total_length][body][crc]` with a big-endian 16-bit length
//! covering the whole frame and a CRC-16/CCITT over everything before it.
//! This crate encodes [`Message`] values into frames and decodes frames
//! back, distinguishing retryable short reads from malformed traffic.
//!
//! ```
//! use protocol::{decode_frame, Message};
//!
//! let frame = Message::Heartbeat.encode().unwrap();
//! assert_eq!(frame, [0x01, 0x00, 0x05, 0xAB, 0x09]);
//!
//! let decoded = decode_frame(&frame).unwrap();
//! assert_eq!(decoded.message, Message::Heartbeat);
//! ```

pub mod command;
mod error;
mod frame;
mod message;

pub use error::{BodyError, DecodeError, EncodeError};
pub use frame::{
    decode_frame, decode_frame_with, CrcPolicy, DecodedFrame, CRC_SIZE, FRAME_OVERHEAD,
    HEADER_SIZE,
};
pub use message::{msg_type, nack, Message, RawPulse};
