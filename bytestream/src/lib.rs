//! Bounded byte-level primitives for the sensewire codec.
//!
//! The wire protocol and the on-device recording format are both built from
//! fixed-width fields with mixed endianness: the protocol is big-endian
//! except for a handful of sensor payloads that the firmware emits
//! little-endian. [`ByteReader`] and [`ByteWriter`] provide the field-level
//! operations both codecs are written in terms of, with every read bounds
//! checked and every variable-width write range checked.

mod error;
mod reader;
mod writer;

pub use error::{ByteError, ByteResult};
pub use reader::ByteReader;
pub use writer::ByteWriter;
