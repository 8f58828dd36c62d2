//! Streaming reader over a whole recording.

use crate::error::RecordError;
use crate::record::{decode_record, tag, FileHeader, FileRecord};
use types::FirmwareVersion;

/// Iterates the records of a recording held in memory.
///
/// The reader is fused: after the first error, or the end of input, it
/// yields `None` forever. Records carry no length field, so an error leaves
/// the rest of the stream unreadable by construction.
#[derive(Debug)]
pub struct RecordReader<'a> {
    data: &'a [u8],
    pos: usize,
    version: FirmwareVersion,
    done: bool,
}

impl<'a> RecordReader<'a> {
    /// Creates a reader over `data` with the AFE layout selected by
    /// `version`. Use this when the header has already been consumed or
    /// the stream is a fragment.
    #[must_use]
    pub const fn new(data: &'a [u8], version: FirmwareVersion) -> Self {
        Self {
            data,
            pos: 0,
            version,
            done: false,
        }
    }

    /// Parses the leading header record and returns it together with a
    /// reader for the remaining records, threaded with the header's
    /// firmware version.
    pub fn from_stream(data: &'a [u8]) -> Result<(FileHeader, Self), RecordError> {
        match data.first() {
            None => return Err(RecordError::Truncated),
            Some(&first) if first != tag::HEADER => {
                return Err(RecordError::MissingHeader { tag: first });
            }
            Some(_) => {}
        }
        // Header layout does not depend on the version.
        let placeholder = FirmwareVersion::new(0, 0, 0);
        let (record, consumed) = decode_record(data, placeholder)?;
        let FileRecord::Header(header) = record else {
            // First byte was the header tag, so decode_record returned a
            // header or an error.
            return Err(RecordError::MissingHeader { tag: data[0] });
        };
        let mut reader = Self::new(data, header.firmware_version);
        reader.pos = consumed;
        Ok((header, reader))
    }

    /// Byte offset of the next record.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }
}

impl Iterator for RecordReader<'_> {
    type Item = Result<FileRecord, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.data.len() {
            self.done = true;
            return None;
        }
        match decode_record(&self.data[self.pos..], self.version) {
            Ok((record, consumed)) => {
                self.pos += consumed;
                Some(Ok(record))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
