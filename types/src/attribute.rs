//! The device attribute registry.
//!
//! Attributes are the values a host can get, set, and subscribe to over the
//! wire protocol. Each is keyed by a stable one-byte id. Unknown ids decode
//! to `None` so a host talking to newer firmware can skip values it does
//! not understand without dropping the frame.

use crate::complex::{
    AccRaw, AfeSettings, AfeSettingsAll, BatteryDiagnostics, BloodPressure, Diagnostics,
    FirmwareVersion, GyroRaw, Imu, ImuRaw, PulseRaw, PulseRawAll, PulseRawList, Temperature,
};
use bytestream::{ByteReader, ByteResult, ByteWriter};

/// Attribute ids as assigned by the device firmware.
pub mod id {
    pub const SERIAL_NO: u8 = 0x01;
    pub const FIRMWARE_VERSION: u8 = 0x02;
    pub const BLUETOOTH_MAC: u8 = 0x03;
    pub const MODEL: u8 = 0x04;
    pub const VENDOR: u8 = 0x05;
    pub const AFE_SETTINGS: u8 = 0x06;
    pub const AFE_SETTINGS_ALL: u8 = 0x07;
    pub const CURRENT_TIME: u8 = 0x71;
    pub const MEASUREMENT_DEACTIVATED: u8 = 0x72;
    pub const TRACE_LEVEL: u8 = 0x73;
    pub const NO_OF_PPG_VALUES: u8 = 0x74;
    pub const BATTERY_LEVEL: u8 = 0xA1;
    pub const PULSE_RAW_ALL: u8 = 0xA2;
    pub const BLOOD_PRESSURE: u8 = 0xA3;
    pub const IMU: u8 = 0xA4;
    pub const HEART_RATE: u8 = 0xA5;
    pub const SLEEP_MODE: u8 = 0xA6;
    pub const BREATH_RATE: u8 = 0xA7;
    pub const HEART_RATE_VARIABILITY: u8 = 0xA8;
    pub const CHARGE_STATE: u8 = 0xA9;
    pub const BELT_ON_BODY: u8 = 0xAA;
    pub const FIRMWARE_UPDATE_PROGRESS: u8 = 0xAB;
    pub const IMU_RAW: u8 = 0xAC;
    pub const HEART_RATE_INTERVAL: u8 = 0xAD;
    pub const PULSE_RAW: u8 = 0xB1;
    pub const ACC_RAW: u8 = 0xB2;
    pub const GYRO_RAW: u8 = 0xB3;
    pub const TEMPERATURE: u8 = 0xB4;
    pub const DIAGNOSTICS: u8 = 0xB5;
    pub const PULSE_RAW_LIST: u8 = 0xB6;
    pub const BATTERY_DIAGNOSTICS: u8 = 0xBB;

    /// Every assigned id, used to assert the id space stays collision-free.
    pub const ALL: [u8; 31] = [
        SERIAL_NO,
        FIRMWARE_VERSION,
        BLUETOOTH_MAC,
        MODEL,
        VENDOR,
        AFE_SETTINGS,
        AFE_SETTINGS_ALL,
        CURRENT_TIME,
        MEASUREMENT_DEACTIVATED,
        TRACE_LEVEL,
        NO_OF_PPG_VALUES,
        BATTERY_LEVEL,
        PULSE_RAW_ALL,
        BLOOD_PRESSURE,
        IMU,
        HEART_RATE,
        SLEEP_MODE,
        BREATH_RATE,
        HEART_RATE_VARIABILITY,
        CHARGE_STATE,
        BELT_ON_BODY,
        FIRMWARE_UPDATE_PROGRESS,
        IMU_RAW,
        HEART_RATE_INTERVAL,
        PULSE_RAW,
        ACC_RAW,
        GYRO_RAW,
        TEMPERATURE,
        DIAGNOSTICS,
        PULSE_RAW_LIST,
        BATTERY_DIAGNOSTICS,
    ];
}

/// A typed attribute value paired with its wire id.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    /// Device serial number.
    SerialNo(i64),
    FirmwareVersion(FirmwareVersion),
    BluetoothMac(u64),
    /// Device model name, NUL-terminated on the wire.
    Model(String),
    /// Vendor name, NUL-terminated on the wire.
    Vendor(String),
    AfeSettings(AfeSettings),
    AfeSettingsAll(AfeSettingsAll),
    /// Device clock, milliseconds since the Unix epoch.
    CurrentTime(u64),
    MeasurementDeactivated(u8),
    TraceLevel(u8),
    NoOfPpgValues(u8),
    /// Battery charge in percent.
    BatteryLevel(u8),
    PulseRawAll(PulseRawAll),
    BloodPressure(BloodPressure),
    Imu(Imu),
    HeartRate(u16),
    SleepMode(u8),
    BreathRate(u8),
    HeartRateVariability(u16),
    ChargeState(bool),
    BeltOnBody(bool),
    /// Firmware update progress in percent.
    FirmwareUpdateProgress(u8),
    ImuRaw(ImuRaw),
    HeartRateInterval(u16),
    PulseRaw(PulseRaw),
    AccRaw(AccRaw),
    GyroRaw(GyroRaw),
    Temperature(Temperature),
    Diagnostics(Diagnostics),
    PulseRawList(PulseRawList),
    BatteryDiagnostics(BatteryDiagnostics),
}

impl Attribute {
    /// The wire id of this attribute.
    #[must_use]
    pub const fn id(&self) -> u8 {
        match self {
            Self::SerialNo(_) => id::SERIAL_NO,
            Self::FirmwareVersion(_) => id::FIRMWARE_VERSION,
            Self::BluetoothMac(_) => id::BLUETOOTH_MAC,
            Self::Model(_) => id::MODEL,
            Self::Vendor(_) => id::VENDOR,
            Self::AfeSettings(_) => id::AFE_SETTINGS,
            Self::AfeSettingsAll(_) => id::AFE_SETTINGS_ALL,
            Self::CurrentTime(_) => id::CURRENT_TIME,
            Self::MeasurementDeactivated(_) => id::MEASUREMENT_DEACTIVATED,
            Self::TraceLevel(_) => id::TRACE_LEVEL,
            Self::NoOfPpgValues(_) => id::NO_OF_PPG_VALUES,
            Self::BatteryLevel(_) => id::BATTERY_LEVEL,
            Self::PulseRawAll(_) => id::PULSE_RAW_ALL,
            Self::BloodPressure(_) => id::BLOOD_PRESSURE,
            Self::Imu(_) => id::IMU,
            Self::HeartRate(_) => id::HEART_RATE,
            Self::SleepMode(_) => id::SLEEP_MODE,
            Self::BreathRate(_) => id::BREATH_RATE,
            Self::HeartRateVariability(_) => id::HEART_RATE_VARIABILITY,
            Self::ChargeState(_) => id::CHARGE_STATE,
            Self::BeltOnBody(_) => id::BELT_ON_BODY,
            Self::FirmwareUpdateProgress(_) => id::FIRMWARE_UPDATE_PROGRESS,
            Self::ImuRaw(_) => id::IMU_RAW,
            Self::HeartRateInterval(_) => id::HEART_RATE_INTERVAL,
            Self::PulseRaw(_) => id::PULSE_RAW,
            Self::AccRaw(_) => id::ACC_RAW,
            Self::GyroRaw(_) => id::GYRO_RAW,
            Self::Temperature(_) => id::TEMPERATURE,
            Self::Diagnostics(_) => id::DIAGNOSTICS,
            Self::PulseRawList(_) => id::PULSE_RAW_LIST,
            Self::BatteryDiagnostics(_) => id::BATTERY_DIAGNOSTICS,
        }
    }

    /// The encoded size of this attribute's value in bytes.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::SerialNo(_) | Self::BluetoothMac(_) | Self::CurrentTime(_) => 8,
            Self::FirmwareVersion(_) => FirmwareVersion::LEN,
            // One trailing NUL terminator.
            Self::Model(s) | Self::Vendor(s) => s.len() + 1,
            Self::AfeSettings(_) => AfeSettings::LEN,
            Self::AfeSettingsAll(_) => AfeSettingsAll::LEN,
            Self::MeasurementDeactivated(_)
            | Self::TraceLevel(_)
            | Self::NoOfPpgValues(_)
            | Self::BatteryLevel(_)
            | Self::SleepMode(_)
            | Self::BreathRate(_)
            | Self::ChargeState(_)
            | Self::BeltOnBody(_)
            | Self::FirmwareUpdateProgress(_) => 1,
            Self::PulseRawAll(_) => PulseRawAll::LEN,
            Self::BloodPressure(_) => BloodPressure::LEN,
            Self::Imu(_) => Imu::LEN,
            Self::HeartRate(_) | Self::HeartRateVariability(_) | Self::HeartRateInterval(_) => 2,
            Self::ImuRaw(_) => ImuRaw::LEN,
            Self::PulseRaw(_) => PulseRaw::LEN,
            Self::AccRaw(_) => AccRaw::LEN,
            Self::GyroRaw(_) => GyroRaw::LEN,
            Self::Temperature(_) => Temperature::LEN,
            Self::Diagnostics(_) => Diagnostics::LEN,
            Self::PulseRawList(list) => list.encoded_len(),
            Self::BatteryDiagnostics(_) => BatteryDiagnostics::LEN,
        }
    }

    /// Appends the encoded value to `writer`.
    pub fn encode_to(&self, writer: &mut ByteWriter) -> ByteResult<()> {
        match self {
            Self::SerialNo(v) => writer.write_i64_be(*v),
            Self::FirmwareVersion(v) => v.encode_to(writer),
            Self::BluetoothMac(v) | Self::CurrentTime(v) => writer.write_u64_be(*v),
            Self::Model(s) | Self::Vendor(s) => {
                writer.write_bytes(s.as_bytes());
                writer.write_u8(0);
            }
            Self::AfeSettings(v) => v.encode_to(writer),
            Self::AfeSettingsAll(v) => v.encode_to(writer),
            Self::MeasurementDeactivated(v)
            | Self::TraceLevel(v)
            | Self::NoOfPpgValues(v)
            | Self::BatteryLevel(v)
            | Self::SleepMode(v)
            | Self::BreathRate(v)
            | Self::FirmwareUpdateProgress(v) => writer.write_u8(*v),
            Self::PulseRawAll(v) => v.encode_to(writer),
            Self::BloodPressure(v) => v.encode_to(writer),
            Self::Imu(v) => v.encode_to(writer),
            Self::HeartRate(v) | Self::HeartRateVariability(v) | Self::HeartRateInterval(v) => {
                writer.write_u16_be(*v);
            }
            Self::ChargeState(v) | Self::BeltOnBody(v) => writer.write_bool(*v),
            Self::ImuRaw(v) => v.encode_to(writer),
            Self::PulseRaw(v) => v.encode_to(writer),
            Self::AccRaw(v) => v.encode_to(writer),
            Self::GyroRaw(v) => v.encode_to(writer),
            Self::Temperature(v) => v.encode_to(writer),
            Self::Diagnostics(v) => v.encode_to(writer),
            Self::PulseRawList(v) => return v.encode_to(writer),
            Self::BatteryDiagnostics(v) => v.encode_to(writer),
        }
        Ok(())
    }

    /// Decodes the attribute with wire id `id` from `data`.
    ///
    /// `data` is the whole value region of the enclosing message; device
    /// firmware has historically been inconsistent about length prefixes,
    /// so decoding trusts the id over any surrounding length byte. Returns
    /// `Ok(None)` for ids this registry does not know.
    pub fn decode(id: u8, data: &[u8]) -> ByteResult<Option<Self>> {
        let mut reader = ByteReader::new(data);
        let attribute = match id {
            id::SERIAL_NO => Self::SerialNo(reader.read_i64_be()?),
            id::FIRMWARE_VERSION => Self::FirmwareVersion(FirmwareVersion::decode(&mut reader)?),
            id::BLUETOOTH_MAC => Self::BluetoothMac(reader.read_u64_be()?),
            id::MODEL => Self::Model(read_terminated_str(&mut reader)),
            id::VENDOR => Self::Vendor(read_terminated_str(&mut reader)),
            id::AFE_SETTINGS => Self::AfeSettings(AfeSettings::decode(&mut reader)?),
            id::AFE_SETTINGS_ALL => Self::AfeSettingsAll(AfeSettingsAll::decode(&mut reader)?),
            id::CURRENT_TIME => Self::CurrentTime(reader.read_u64_be()?),
            id::MEASUREMENT_DEACTIVATED => Self::MeasurementDeactivated(reader.read_u8()?),
            id::TRACE_LEVEL => Self::TraceLevel(reader.read_u8()?),
            id::NO_OF_PPG_VALUES => Self::NoOfPpgValues(reader.read_u8()?),
            id::BATTERY_LEVEL => Self::BatteryLevel(reader.read_u8()?),
            id::PULSE_RAW_ALL => Self::PulseRawAll(PulseRawAll::decode(&mut reader)?),
            id::BLOOD_PRESSURE => Self::BloodPressure(BloodPressure::decode(&mut reader)?),
            id::IMU => Self::Imu(Imu::decode(&mut reader)?),
            id::HEART_RATE => Self::HeartRate(reader.read_u16_be()?),
            id::SLEEP_MODE => Self::SleepMode(reader.read_u8()?),
            id::BREATH_RATE => Self::BreathRate(reader.read_u8()?),
            id::HEART_RATE_VARIABILITY => Self::HeartRateVariability(reader.read_u16_be()?),
            id::CHARGE_STATE => Self::ChargeState(reader.read_bool()?),
            id::BELT_ON_BODY => Self::BeltOnBody(reader.read_bool()?),
            id::FIRMWARE_UPDATE_PROGRESS => Self::FirmwareUpdateProgress(reader.read_u8()?),
            id::IMU_RAW => Self::ImuRaw(ImuRaw::decode(&mut reader)?),
            id::HEART_RATE_INTERVAL => Self::HeartRateInterval(reader.read_u16_be()?),
            id::PULSE_RAW => Self::PulseRaw(PulseRaw::decode(&mut reader)?),
            id::ACC_RAW => Self::AccRaw(AccRaw::decode(&mut reader)?),
            id::GYRO_RAW => Self::GyroRaw(GyroRaw::decode(&mut reader)?),
            id::TEMPERATURE => Self::Temperature(Temperature::decode(&mut reader)?),
            id::DIAGNOSTICS => Self::Diagnostics(Diagnostics::decode(&mut reader)?),
            id::PULSE_RAW_LIST => Self::PulseRawList(PulseRawList::decode(&mut reader)?),
            id::BATTERY_DIAGNOSTICS => {
                Self::BatteryDiagnostics(BatteryDiagnostics::decode(&mut reader)?)
            }
            _ => return Ok(None),
        };
        Ok(Some(attribute))
    }
}

fn read_terminated_str(reader: &mut ByteReader<'_>) -> String {
    let bytes = reader.read_rest();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_space_has_no_collisions() {
        let mut ids = id::ALL.to_vec();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), id::ALL.len());
    }

    #[test]
    fn unknown_id_decodes_to_none() {
        assert_eq!(Attribute::decode(0xF0, &[0x01, 0x02]).unwrap(), None);
        assert_eq!(Attribute::decode(0x00, &[]).unwrap(), None);
    }

    #[test]
    fn battery_level_roundtrip() {
        let attr = Attribute::BatteryLevel(50);
        assert_eq!(attr.id(), 0xA1);
        assert_eq!(attr.encoded_len(), 1);

        let mut writer = ByteWriter::new();
        attr.encode_to(&mut writer).unwrap();
        let bytes = writer.finish();
        assert_eq!(bytes, vec![0x32]);
        assert_eq!(Attribute::decode(0xA1, &bytes).unwrap(), Some(attr));
    }

    #[test]
    fn serial_no_roundtrip() {
        let attr = Attribute::SerialNo(7_333_824_081_813_398_323);
        let mut writer = ByteWriter::new();
        attr.encode_to(&mut writer).unwrap();
        let bytes = writer.finish();
        assert_eq!(bytes.len(), 8);
        assert_eq!(Attribute::decode(id::SERIAL_NO, &bytes).unwrap(), Some(attr));
    }

    #[test]
    fn firmware_version_attribute() {
        let attr =
            Attribute::decode(id::FIRMWARE_VERSION, &[0x04, 0x01, 0x06]).unwrap().unwrap();
        assert_eq!(
            attr,
            Attribute::FirmwareVersion(FirmwareVersion::new(4, 1, 6))
        );
        assert_eq!(attr.encoded_len(), 3);
    }

    #[test]
    fn model_string_is_nul_terminated() {
        let attr = Attribute::Model("SenseWire2".into());
        assert_eq!(attr.encoded_len(), 11);

        let mut writer = ByteWriter::new();
        attr.encode_to(&mut writer).unwrap();
        let bytes = writer.finish();
        assert_eq!(bytes, b"SenseWire2\0");
        assert_eq!(Attribute::decode(id::MODEL, &bytes).unwrap(), Some(attr));
    }

    #[test]
    fn model_decode_without_terminator() {
        // Older firmware occasionally omits the NUL.
        assert_eq!(
            Attribute::decode(id::MODEL, b"SenseWire2").unwrap(),
            Some(Attribute::Model("SenseWire2".into()))
        );
    }

    #[test]
    fn temperature_attribute_vector() {
        let attr = Attribute::decode(id::TEMPERATURE, &[0x0C, 0x80]).unwrap().unwrap();
        let Attribute::Temperature(temp) = attr else {
            panic!("wrong variant");
        };
        assert!((temp.celsius() - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn charge_state_decodes_as_bool() {
        assert_eq!(
            Attribute::decode(id::CHARGE_STATE, &[0x01]).unwrap(),
            Some(Attribute::ChargeState(true))
        );
        assert_eq!(
            Attribute::decode(id::CHARGE_STATE, &[0x00]).unwrap(),
            Some(Attribute::ChargeState(false))
        );
    }

    #[test]
    fn truncated_value_is_an_error() {
        assert!(Attribute::decode(id::DIAGNOSTICS, &[0x00, 0x01]).is_err());
    }

    #[test]
    fn pulse_raw_list_attribute_reports_true_length() {
        let bytes = [
            0x4B, 0x03, 0x37, 0x01, 0x00, 0x00, 0x00, 0xE8, 0x03, 0x00, 0x00, 0x64, 0x00, 0x00,
            0x00, 0x05, 0x00, 0x00, 0x00,
        ];
        let attr = Attribute::decode(id::PULSE_RAW_LIST, &bytes).unwrap().unwrap();
        assert_eq!(attr.encoded_len(), 19);

        let mut writer = ByteWriter::new();
        attr.encode_to(&mut writer).unwrap();
        assert_eq!(writer.finish(), bytes);
    }
}
