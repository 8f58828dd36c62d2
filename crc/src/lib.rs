//! CRC-16/CCITT engine for the sensewire codec.
//!
//! Every wire frame carries a trailing 16-bit CRC computed over the frame
//! header and body. The device firmware uses the CCITT polynomial `0x1021`
//! with an initial value of `0xFFFF`, processing each byte MSB first.
//!
//! The engine supports incremental computation: [`crc16_seeded`] continues
//! from a previously computed CRC, so a transport can checksum a frame that
//! arrives in several chunks without buffering it whole. A seed of `0` means
//! exactly that — it is never silently replaced by the default seed.
//!
//! # Example
//!
//! ```
//! use crc::{crc16, crc16_seeded};
//!
//! let frame_head = [0x01, 0x00, 0x05];
//! assert_eq!(crc16(&frame_head), 0xAB09);
//!
//! // Incremental form over an arbitrary split point.
//! let partial = crc16_seeded(&frame_head[..1], crc::INIT);
//! assert_eq!(crc16_seeded(&frame_head[1..], partial), 0xAB09);
//! ```

/// The CCITT generator polynomial used by the device firmware.
pub const POLY: u16 = 0x1021;

/// Initial shift register value for a fresh computation.
pub const INIT: u16 = 0xFFFF;

/// Computes the CRC-16 of `data` with the default seed.
#[must_use]
pub fn crc16(data: &[u8]) -> u16 {
    crc16_seeded(data, INIT)
}

/// Computes the CRC-16 of `data`, continuing from `seed`.
///
/// Feeding a buffer in pieces yields the same result as feeding it whole:
/// `crc16_seeded(b, crc16_seeded(a, s)) == crc16_seeded(a ++ b, s)`.
/// Empty input returns the seed unchanged.
#[must_use]
pub fn crc16_seeded(data: &[u8], seed: u16) -> u16 {
    let mut crc = seed;
    for &byte in data {
        for bit in 0..8 {
            let data_bit = (byte >> (7 - bit)) & 1 == 1;
            let top_bit = crc & 0x8000 != 0;
            crc <<= 1;
            if top_bit ^ data_bit {
                crc ^= POLY;
            }
        }
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_vector() {
        // GetAttribute(0xA1) header+body, from the protocol documentation.
        assert_eq!(crc16(&[0x12, 0x00, 0x06, 0xA1]), 32098);
    }

    #[test]
    fn heartbeat_vector() {
        assert_eq!(crc16(&[0x01, 0x00, 0x05]), 0xAB09);
    }

    #[test]
    fn empty_input_returns_seed() {
        assert_eq!(crc16(&[]), INIT);
        assert_eq!(crc16_seeded(&[], 0), 0);
        assert_eq!(crc16_seeded(&[], 0x1234), 0x1234);
    }

    #[test]
    fn zero_seed_is_not_default_seed() {
        let data = [0x12, 0x00, 0x06, 0xA1];
        assert_ne!(crc16_seeded(&data, 0), crc16(&data));
    }

    #[test]
    fn continuation_matches_whole_buffer() {
        let data = [0x11, 0x00, 0x09, 0xB4, 0x02, 0x0C, 0x80];
        for split in 0..=data.len() {
            let partial = crc16_seeded(&data[..split], INIT);
            assert_eq!(crc16_seeded(&data[split..], partial), crc16(&data));
        }
    }

    #[test]
    fn deterministic() {
        let data = [0xDE, 0xAD, 0xBE, 0xEF];
        assert_eq!(crc16(&data), crc16(&data));
    }
}
