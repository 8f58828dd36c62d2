//! Byte-level reader with bounded operations.

use crate::error::{ByteError, ByteResult};

/// A bounds-checked cursor over a byte slice.
///
/// All read operations validate the remaining length and return errors on
/// failure. The reader never panics on malformed input.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` over a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Reads `n` bytes as a raw sub-slice.
    pub fn read_bytes(&mut self, n: usize) -> ByteResult<&'a [u8]> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads all remaining bytes.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let slice = &self.data[self.pos..];
        self.pos = self.data.len();
        slice
    }

    pub fn read_u8(&mut self) -> ByteResult<u8> {
        let bytes = self.read_array::<1>()?;
        Ok(bytes[0])
    }

    pub fn read_i8(&mut self) -> ByteResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Reads a single byte as a boolean; any non-zero value is `true`.
    pub fn read_bool(&mut self) -> ByteResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16_be(&mut self) -> ByteResult<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u16_le(&mut self) -> ByteResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i16_be(&mut self) -> ByteResult<i16> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    pub fn read_i16_le(&mut self) -> ByteResult<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32_be(&mut self) -> ByteResult<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32_le(&mut self) -> ByteResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32_be(&mut self) -> ByteResult<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    pub fn read_i32_le(&mut self) -> ByteResult<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64_be(&mut self) -> ByteResult<u64> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    pub fn read_u64_le(&mut self) -> ByteResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_i64_be(&mut self) -> ByteResult<i64> {
        Ok(i64::from_be_bytes(self.read_array()?))
    }

    pub fn read_f32_be(&mut self) -> ByteResult<f32> {
        Ok(f32::from_be_bytes(self.read_array()?))
    }

    pub fn read_f64_be(&mut self) -> ByteResult<f64> {
        Ok(f64::from_be_bytes(self.read_array()?))
    }

    /// Reads a sign-extended 24-bit big-endian integer.
    pub fn read_i24_be(&mut self) -> ByteResult<i32> {
        let bytes = self.read_array::<3>()?;
        let raw = (i32::from(bytes[0]) << 16) | (i32::from(bytes[1]) << 8) | i32::from(bytes[2]);
        // Sign-extend from bit 23.
        Ok((raw << 8) >> 8)
    }

    /// Reads a sign-extended little-endian integer of `width` bytes (1–8).
    pub fn read_int_le(&mut self, width: usize) -> ByteResult<i64> {
        if width == 0 || width > 8 {
            return Err(ByteError::InvalidWidth { width });
        }
        let bytes = self.read_bytes(width)?;
        let mut raw = 0u64;
        for (i, &b) in bytes.iter().enumerate() {
            raw |= u64::from(b) << (8 * i);
        }
        let shift = 64 - 8 * width as u32;
        Ok(((raw << shift) as i64) >> shift)
    }

    /// Reads a NUL-padded fixed-width string field of `width` bytes.
    ///
    /// The value runs up to the first NUL; bytes after it are padding and
    /// are discarded (device firmware does not always zero them). Invalid
    /// UTF-8 is replaced rather than rejected.
    pub fn read_padded_str(&mut self, width: usize) -> ByteResult<String> {
        let bytes = self.read_bytes(width)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(width);
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }

    fn ensure(&self, n: usize) -> ByteResult<()> {
        if n > self.remaining() {
            return Err(ByteError::UnexpectedEnd {
                requested: n,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> ByteResult<[u8; N]> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }
}
