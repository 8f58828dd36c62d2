//! Byte-level writer with range-checked operations.

use crate::error::{ByteError, ByteResult};

/// An append-only encoder over a growable byte buffer.
///
/// Fixed-width writes are infallible; variable-width and fixed-width string
/// writes validate the value against the field and return errors instead of
/// silently truncating.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates an empty writer.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates an empty writer with `capacity` bytes preallocated.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the writer and returns the encoded bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    /// Returns the bytes written so far without consuming the writer.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buf.push(value as u8);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn write_u16_be(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u16_le(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i16_be(&mut self, value: i16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i16_le(&mut self, value: i16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32_be(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u32_le(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i32_be(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32_le(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64_be(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u64_le(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64_be(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_f32_be(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_f64_be(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a 24-bit big-endian integer.
    ///
    /// Fails with [`ByteError::ValueOutOfRange`] when `value` does not fit
    /// in a signed 24-bit field.
    pub fn write_i24_be(&mut self, value: i32) -> ByteResult<()> {
        if !(-0x0080_0000..0x0080_0000).contains(&value) {
            return Err(ByteError::ValueOutOfRange {
                value: i64::from(value),
                width: 3,
            });
        }
        let bytes = value.to_be_bytes();
        self.buf.extend_from_slice(&bytes[1..]);
        Ok(())
    }

    /// Writes a little-endian integer of `width` bytes (1–8).
    ///
    /// Fails when `value` does not fit the signed range of the field.
    pub fn write_int_le(&mut self, value: i64, width: usize) -> ByteResult<()> {
        if width == 0 || width > 8 {
            return Err(ByteError::InvalidWidth { width });
        }
        if width < 8 {
            let max = 1i64 << (8 * width - 1);
            if value < -max || value >= max {
                return Err(ByteError::ValueOutOfRange { value, width });
            }
        }
        self.buf.extend_from_slice(&value.to_le_bytes()[..width]);
        Ok(())
    }

    /// Writes a string into a NUL-padded fixed-width field of `width` bytes.
    ///
    /// One byte is reserved for the terminating NUL, so the string may be at
    /// most `width - 1` bytes long.
    pub fn write_padded_str(&mut self, value: &str, width: usize) -> ByteResult<()> {
        let bytes = value.as_bytes();
        if bytes.len() >= width {
            return Err(ByteError::StringTooLong {
                length: bytes.len(),
                capacity: width,
            });
        }
        self.buf.extend_from_slice(bytes);
        self.buf.resize(self.buf.len() + width - bytes.len(), 0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_writer_is_empty() {
        let writer = ByteWriter::new();
        assert!(writer.is_empty());
        assert_eq!(writer.finish(), Vec::<u8>::new());
    }

    #[test]
    fn write_mixed_endianness() {
        let mut writer = ByteWriter::new();
        writer.write_u16_be(0x1234);
        writer.write_u16_le(0x1234);
        assert_eq!(writer.finish(), vec![0x12, 0x34, 0x34, 0x12]);
    }

    #[test]
    fn write_i24_in_range() {
        let mut writer = ByteWriter::new();
        writer.write_i24_be(219_127).unwrap();
        writer.write_i24_be(-1).unwrap();
        assert_eq!(writer.finish(), vec![0x03, 0x57, 0xF7, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn write_i24_out_of_range() {
        let mut writer = ByteWriter::new();
        assert_eq!(
            writer.write_i24_be(0x0080_0000),
            Err(ByteError::ValueOutOfRange {
                value: 0x0080_0000,
                width: 3
            })
        );
        assert_eq!(
            writer.write_i24_be(-0x0080_0001),
            Err(ByteError::ValueOutOfRange {
                value: -0x0080_0001,
                width: 3
            })
        );
    }

    #[test]
    fn write_int_le_widths() {
        let mut writer = ByteWriter::new();
        writer.write_int_le(-1, 1).unwrap();
        writer.write_int_le(-2, 2).unwrap();
        writer.write_int_le(123_456_789, 4).unwrap();
        assert_eq!(
            writer.finish(),
            vec![0xFF, 0xFE, 0xFF, 0x15, 0xCD, 0x5B, 0x07]
        );
    }

    #[test]
    fn write_int_le_range_check() {
        let mut writer = ByteWriter::new();
        assert!(writer.write_int_le(127, 1).is_ok());
        assert_eq!(
            writer.write_int_le(128, 1),
            Err(ByteError::ValueOutOfRange {
                value: 128,
                width: 1
            })
        );
        assert_eq!(
            writer.write_int_le(-129, 1),
            Err(ByteError::ValueOutOfRange {
                value: -129,
                width: 1
            })
        );
    }

    #[test]
    fn write_padded_str_pads_with_nul() {
        let mut writer = ByteWriter::new();
        writer.write_padded_str("abc", 6).unwrap();
        assert_eq!(writer.finish(), vec![b'a', b'b', b'c', 0, 0, 0]);
    }

    #[test]
    fn write_padded_str_requires_terminator_room() {
        let mut writer = ByteWriter::new();
        assert_eq!(
            writer.write_padded_str("abcdef", 6),
            Err(ByteError::StringTooLong {
                length: 6,
                capacity: 6
            })
        );
    }
}
