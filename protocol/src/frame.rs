//! Frame layer: length and CRC validation around the message catalog.

use crate::error::DecodeError;
use crate::message::Message;

/// Type byte plus the two-byte total length field.
pub const HEADER_SIZE: usize = 3;

/// Trailing CRC.
pub const CRC_SIZE: usize = 2;

/// Bytes every frame carries beyond its body.
pub const FRAME_OVERHEAD: usize = HEADER_SIZE + CRC_SIZE;

/// How to treat a CRC that does not match.
///
/// `Enforce` is the wire contract. `Accept` is for diagnostics: it lets a
/// capture with known-bad checksums decode so the traffic can still be
/// inspected; the mismatched value is preserved in the decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrcPolicy {
    #[default]
    Enforce,
    Accept,
}

/// A message together with its frame-level metadata.
///
/// `length` and `crc` are what the frame declared and carried; they are
/// decode-time observations, never encode inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFrame {
    pub message: Message,
    pub length: u16,
    pub crc: u16,
}

/// Decodes one frame from the front of `buf`, enforcing the CRC.
///
/// `buf` may extend past the frame; trailing bytes are ignored so a
/// transport can hand over its whole receive buffer. [`DecodeError::Incomplete`]
/// means feed more bytes and retry, every other error is final for this
/// frame.
pub fn decode_frame(buf: &[u8]) -> Result<DecodedFrame, DecodeError> {
    decode_frame_with(buf, CrcPolicy::Enforce)
}

/// Decodes one frame from the front of `buf` under the given CRC policy.
pub fn decode_frame_with(buf: &[u8], policy: CrcPolicy) -> Result<DecodedFrame, DecodeError> {
    if buf.len() < HEADER_SIZE {
        return Err(DecodeError::Incomplete);
    }

    let msg_type = buf[0];
    let length = u16::from_be_bytes([buf[1], buf[2]]);

    if buf.len() < usize::from(length) {
        return Err(DecodeError::Incomplete);
    }
    if usize::from(length) < FRAME_OVERHEAD {
        return Err(DecodeError::InvalidLength { length });
    }

    let frame = &buf[..usize::from(length)];
    let (checked, crc_bytes) = frame.split_at(frame.len() - CRC_SIZE);
    let expected = u16::from_be_bytes([crc_bytes[0], crc_bytes[1]]);
    let computed = crc::crc16(checked);
    if expected != computed && policy == CrcPolicy::Enforce {
        return Err(DecodeError::CrcMismatch { expected, computed });
    }

    let body = &checked[HEADER_SIZE..];
    let message = Message::decode_body(msg_type, body)
        .map_err(|reason| DecodeError::Malformed {
            msg_type,
            payload_hex: hex::encode(body),
            reason,
        })?
        .ok_or(DecodeError::UnknownMessageType { msg_type })?;

    Ok(DecodedFrame {
        message,
        length,
        crc: expected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEARTBEAT: [u8; 5] = [0x01, 0x00, 0x05, 0xAB, 0x09];

    #[test]
    fn short_buffer_is_incomplete() {
        assert_eq!(decode_frame(&[]), Err(DecodeError::Incomplete));
        assert_eq!(decode_frame(&[0x01]), Err(DecodeError::Incomplete));
        assert_eq!(decode_frame(&[0x01, 0x00]), Err(DecodeError::Incomplete));
        assert_eq!(
            decode_frame(&HEARTBEAT[..4]),
            Err(DecodeError::Incomplete)
        );
    }

    #[test]
    fn undersized_declared_length_is_invalid() {
        // Declared length 4 cannot hold header plus CRC.
        let err = decode_frame(&[0x01, 0x00, 0x04, 0x00, 0x00]).unwrap_err();
        assert_eq!(err, DecodeError::InvalidLength { length: 4 });
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut buf = HEARTBEAT.to_vec();
        buf.extend_from_slice(&[0xDE, 0xAD]);
        let frame = decode_frame(&buf).unwrap();
        assert_eq!(frame.message, Message::Heartbeat);
        assert_eq!(frame.length, 5);
        assert_eq!(frame.crc, 0xAB09);
    }

    #[test]
    fn crc_mismatch_is_rejected_by_default() {
        let mut buf = HEARTBEAT;
        buf[4] ^= 0xFF;
        let err = decode_frame(&buf).unwrap_err();
        assert_eq!(
            err,
            DecodeError::CrcMismatch {
                expected: 0xAB09 ^ 0x00FF,
                computed: 0xAB09,
            }
        );
    }

    #[test]
    fn accept_policy_passes_bad_crc_through() {
        let mut buf = HEARTBEAT;
        buf[4] ^= 0xFF;
        let frame = decode_frame_with(&buf, CrcPolicy::Accept).unwrap();
        assert_eq!(frame.message, Message::Heartbeat);
        // The unverified value is preserved for inspection.
        assert_eq!(frame.crc, 0xAB09 ^ 0x00FF);
    }

    #[test]
    fn unknown_type_byte() {
        let mut buf = vec![0x7E, 0x00, 0x05];
        let crc = crc::crc16(&buf);
        buf.extend_from_slice(&crc.to_be_bytes());
        assert_eq!(
            decode_frame(&buf),
            Err(DecodeError::UnknownMessageType { msg_type: 0x7E })
        );
    }

    #[test]
    fn malformed_body_reports_payload_hex() {
        // GetAttribute with an empty body where one byte is required.
        let mut buf = vec![0x12, 0x00, 0x05];
        let crc = crc::crc16(&buf);
        buf.extend_from_slice(&crc.to_be_bytes());
        let err = decode_frame(&buf).unwrap_err();
        let DecodeError::Malformed {
            msg_type,
            payload_hex,
            ..
        } = err
        else {
            panic!("expected Malformed, got {err:?}");
        };
        assert_eq!(msg_type, 0x12);
        assert_eq!(payload_hex, "");
    }

    #[test]
    fn crc_is_checked_before_the_body() {
        // Malformed body and bad CRC: the CRC error wins.
        let mut buf = vec![0x12, 0x00, 0x05, 0xFF, 0xFF];
        let err = decode_frame(&buf).unwrap_err();
        assert!(matches!(err, DecodeError::CrcMismatch { .. }));
        buf.truncate(3);
        let crc = crc::crc16(&buf);
        buf.extend_from_slice(&crc.to_be_bytes());
        assert!(matches!(
            decode_frame(&buf),
            Err(DecodeError::Malformed { .. })
        ));
    }
}
