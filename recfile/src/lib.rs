//! Codec for the recording files a sensewire device writes to flash.
//!
//! A recording is a stream of tagged records with no framing and no
//! checksums; offloaded over the wire protocol's file transfer, it is
//! decoded here. The AFE settings record changed layout at firmware
//! 4.0.1, so decoding is parameterized by the firmware version carried in
//! the stream's own header record.
//!
//! ```
//! use recfile::RecordReader;
//!
//! # fn example(data: &[u8]) -> Result<(), recfile::RecordError> {
//! let (header, reader) = RecordReader::from_stream(data)?;
//! println!("device {} fw {}", header.serial, header.firmware_version);
//! for record in reader {
//!     let _record = record?;
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod reader;
mod record;

pub use error::{EncodeError, RecordError};
pub use reader::RecordReader;
pub use record::{
    decode_record, encode_record, tag, AfeSettingsRecord, FileHeader, FileRecord, PulseBlock,
    AFE_LAYOUT_CUTOFF,
};
