//! Device command ids carried by `ExecuteCommand`.
//!
//! Commands are an escape hatch next to the attribute registry: a one-byte
//! id plus a command-specific payload. The known ids and their payload
//! shapes live here; encode validates against this table so a malformed
//! command never reaches the device, while unknown ids pass through for
//! forward compatibility.

use crate::error::EncodeError;
use bytestream::{ByteReader, ByteResult};
use types::AfeRegister;

pub const RESET_DEVICE: u8 = 0x01;
pub const REBOOT_DEVICE: u8 = 0x02;
/// Payload: button id u8, press duration in milliseconds u16.
pub const PRESS_BUTTON: u8 = 0x03;
pub const FORCE_ON_BODY: u8 = 0x04;
pub const FORCE_USB_CONNECTION: u8 = 0x05;
pub const FORCE_BLE_CONNECTION: u8 = 0x06;
pub const FORCE_BATTERY_LEVEL: u8 = 0x07;
pub const AFE_READ_ALL_REGISTERS: u8 = 0xA1;
/// Payload: register address u8, register value u32.
pub const AFE_WRITE_REGISTER: u8 = 0xA2;
pub const AFE_CALIBRATION: u8 = 0xA3;
pub const AFE_GAIN_SETTING: u8 = 0xA4;

/// The payload length a known command requires, or `None` for unknown ids.
#[must_use]
pub const fn expected_payload_len(command_id: u8) -> Option<usize> {
    match command_id {
        RESET_DEVICE | REBOOT_DEVICE | AFE_READ_ALL_REGISTERS => Some(0),
        FORCE_ON_BODY | FORCE_USB_CONNECTION | FORCE_BLE_CONNECTION | FORCE_BATTERY_LEVEL
        | AFE_CALIBRATION | AFE_GAIN_SETTING => Some(1),
        PRESS_BUTTON => Some(3),
        AFE_WRITE_REGISTER => Some(5),
        _ => None,
    }
}

/// Checks a command payload against the table before it is encoded.
///
/// Unknown command ids are accepted as-is; the table cannot know their
/// shape and the device will nack them if it disagrees.
pub fn validate_payload(command_id: u8, payload: &[u8]) -> Result<(), EncodeError> {
    match expected_payload_len(command_id) {
        Some(expected) if expected != payload.len() => Err(EncodeError::InvalidCommandPayload {
            command_id,
            expected,
            actual: payload.len(),
        }),
        _ => Ok(()),
    }
}

/// Parses an `AfeReadAllRegisters` response payload as a register pair.
pub fn parse_afe_register(payload: &[u8]) -> ByteResult<AfeRegister> {
    let mut reader = ByteReader::new(payload);
    AfeRegister::decode(&mut reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_command_lengths() {
        assert_eq!(expected_payload_len(RESET_DEVICE), Some(0));
        assert_eq!(expected_payload_len(PRESS_BUTTON), Some(3));
        assert_eq!(expected_payload_len(AFE_WRITE_REGISTER), Some(5));
        assert_eq!(expected_payload_len(FORCE_BATTERY_LEVEL), Some(1));
        assert_eq!(expected_payload_len(0x7F), None);
    }

    #[test]
    fn validate_rejects_wrong_length() {
        assert_eq!(
            validate_payload(RESET_DEVICE, &[0x01]),
            Err(EncodeError::InvalidCommandPayload {
                command_id: RESET_DEVICE,
                expected: 0,
                actual: 1,
            })
        );
        assert!(validate_payload(PRESS_BUTTON, &[0x01, 0x03, 0xE8]).is_ok());
    }

    #[test]
    fn validate_passes_unknown_ids_through() {
        assert!(validate_payload(0x7F, &[0xDE, 0xAD, 0xBE, 0xEF]).is_ok());
        assert!(validate_payload(0x7F, &[]).is_ok());
    }

    #[test]
    fn afe_register_from_response_payload() {
        let register = parse_afe_register(&[0x2A, 0x00, 0x00, 0x18, 0x49]).unwrap();
        assert_eq!(register.address, 0x2A);
        assert_eq!(register.value, 6217);
    }
}
