//! The recording file record catalog.
//!
//! A recording is a bare concatenation of `[tag][payload]` records with no
//! outer framing and no per-record checksum; the payload layout is implied
//! by the tag, and for AFE settings also by the firmware version named in
//! the leading header record. Most payloads open with a 16-bit tick, the
//! low bits of the device clock relative to the last absolute timestamp
//! record.

use crate::error::{EncodeError, RecordError};
use bytestream::{ByteReader, ByteWriter};
use types::{
    AccRaw, AfeSettings, AfeSettingsAll, BatteryDiagnostics, FirmwareVersion, GyroRaw, ImuRaw,
    PulseRawList, Temperature,
};

/// Record tags as written by the device firmware.
pub mod tag {
    pub const HEADER: u8 = 0x01;
    pub const AFE_SETTINGS: u8 = 0x06;
    pub const AFE_SETTINGS_ALL: u8 = 0x07;
    pub const TIMESTAMP: u8 = 0x71;
    pub const NO_OF_PPG_VALUES: u8 = 0x74;
    pub const BATTERY_LEVEL: u8 = 0xA1;
    pub const PPG_RAW_ALL: u8 = 0xA2;
    pub const IMU: u8 = 0xA4;
    pub const HEART_RATE: u8 = 0xA5;
    pub const CHARGE_STATE: u8 = 0xA9;
    pub const BELT_ON_BODY: u8 = 0xAA;
    pub const IMU_RAW: u8 = 0xAC;
    pub const HEART_RATE_INTERVAL: u8 = 0xAD;
    pub const PPG_RAW: u8 = 0xB1;
    pub const ACC_RAW: u8 = 0xB2;
    pub const GYRO_RAW: u8 = 0xB3;
    pub const TEMPERATURE: u8 = 0xB4;
    pub const PULSE_RAW_LIST: u8 = 0xB6;
    pub const PULSE_BLOCK_ECG: u8 = 0xB8;
    pub const PULSE_BLOCK_PPG: u8 = 0xB9;
    pub const BATTERY_DIAGNOSTICS: u8 = 0xBB;

    /// Every assigned tag, used to assert uniqueness.
    pub const ALL: [u8; 21] = [
        HEADER,
        AFE_SETTINGS,
        AFE_SETTINGS_ALL,
        TIMESTAMP,
        NO_OF_PPG_VALUES,
        BATTERY_LEVEL,
        PPG_RAW_ALL,
        IMU,
        HEART_RATE,
        CHARGE_STATE,
        BELT_ON_BODY,
        IMU_RAW,
        HEART_RATE_INTERVAL,
        PPG_RAW,
        ACC_RAW,
        GYRO_RAW,
        TEMPERATURE,
        PULSE_RAW_LIST,
        PULSE_BLOCK_ECG,
        PULSE_BLOCK_PPG,
        BATTERY_DIAGNOSTICS,
    ];
}

/// Firmware version where the AFE settings record switched from the legacy
/// float layout to the compact one shared with the wire protocol.
pub const AFE_LAYOUT_CUTOFF: FirmwareVersion = FirmwareVersion::new(4, 0, 1);

/// The leading record of every recording.
///
/// The payload echoes the attribute ids of the firmware version and the
/// clock between its fields, a firmware quirk kept for compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub serial: u64,
    pub firmware_version: FirmwareVersion,
    pub current_time: u64,
}

impl FileHeader {
    /// Payload size: serial, echoed id, version, echoed id, clock.
    pub const LEN: usize = 21;

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, RecordError> {
        let serial = reader.read_u64_be()?;
        let _echoed_version_id = reader.read_u8()?;
        let firmware_version = FirmwareVersion::decode(reader)?;
        let _echoed_time_id = reader.read_u8()?;
        let current_time = reader.read_u64_be()?;
        Ok(Self {
            serial,
            firmware_version,
            current_time,
        })
    }

    fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_u64_be(self.serial);
        writer.write_u8(0x02);
        self.firmware_version.encode_to(writer);
        writer.write_u8(0x71);
        writer.write_u64_be(self.current_time);
    }
}

/// AFE settings in whichever layout the recording firmware used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AfeSettingsRecord {
    /// Compact layout, firmware [`AFE_LAYOUT_CUTOFF`] and later.
    Current(AfeSettings),
    /// Float layout written by firmware before the cutoff.
    Legacy {
        rf_gain: i8,
        cf_value: i8,
        ecg_gain: i8,
        led1: f64,
        led4: f64,
        off_dac: f64,
        relative_gain: f64,
    },
}

/// A burst of delta-compressed samples from one ECG or PPG channel.
///
/// On the wire: channel, delta count, a 64-bit timestamp, one full
/// reference sample, then 16-bit deltas. The reference is itself the
/// first sample, so a count byte of `c` yields `c + 1` samples; every
/// delta is relative to the reference, not to the previous sample. All
/// fields little-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulseBlock {
    pub channel: u8,
    pub time: u64,
    /// Reconstructed absolute samples; the first is the block reference.
    pub samples: Vec<i32>,
}

impl PulseBlock {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, RecordError> {
        let channel = reader.read_u8()?;
        let count = reader.read_u8()?;
        let time = reader.read_u64_le()?;
        let reference = reader.read_i32_le()?;
        let mut samples = Vec::with_capacity(usize::from(count) + 1);
        samples.push(reference);
        for _ in 0..count {
            let delta = reader.read_i16_le()?;
            samples.push(reference.wrapping_add(i32::from(delta)));
        }
        Ok(Self {
            channel,
            time,
            samples,
        })
    }

    fn encode_to(&self, writer: &mut ByteWriter) -> Result<(), EncodeError> {
        let Some((&reference, rest)) = self.samples.split_first() else {
            return Err(EncodeError::EmptyBlock);
        };
        writer.write_u8(self.channel);
        writer.write_u8(rest.len() as u8);
        writer.write_u64_le(self.time);
        writer.write_i32_le(reference);
        for &sample in rest {
            let delta = i64::from(sample) - i64::from(reference);
            let delta = i16::try_from(delta)
                .map_err(|_| EncodeError::DeltaOutOfRange { delta })?;
            writer.write_i16_le(delta);
        }
        Ok(())
    }
}

/// One record of a recording stream.
#[derive(Debug, Clone, PartialEq)]
pub enum FileRecord {
    Header(FileHeader),
    /// Absolute clock anchor; later ticks are relative to this.
    Timestamp { tick: u16, current_time: u64 },
    AfeSettings {
        tick: u16,
        settings: AfeSettingsRecord,
    },
    AfeSettingsAll {
        tick: u16,
        settings: AfeSettingsAll,
    },
    NoOfPpgValues { tick: u16, value: u8 },
    BatteryLevel { tick: u16, level: u8 },
    /// ECG plus all three PPG wavelengths, 24-bit samples.
    PpgRawAll {
        tick: u16,
        ecg: i32,
        ppg_green: i32,
        ppg_red: i32,
        ppg_ir: i32,
    },
    Imu {
        tick: u16,
        orientation_and_activity: u8,
    },
    HeartRate { tick: u16, rate: u16 },
    ChargeState { tick: u16, state: u8 },
    BeltOnBody { tick: u16, on_body: u8 },
    ImuRaw { tick: u16, imu: ImuRaw },
    HeartRateInterval { tick: u16, interval: u16 },
    /// ECG plus one PPG wavelength, 24-bit samples.
    PpgRaw { tick: u16, ecg: i32, ppg: i32 },
    AccRaw { tick: u16, acc: AccRaw },
    GyroRaw { tick: u16, gyro: GyroRaw },
    Temperature {
        tick: u16,
        temperature: Temperature,
    },
    /// Packed sample list in the wire protocol's own layout, tick inside.
    PulseRawList(PulseRawList),
    PulseBlockEcg(PulseBlock),
    PulseBlockPpg(PulseBlock),
    /// Battery gauge snapshot, tick inside, little-endian.
    BatteryDiagnostics(BatteryDiagnostics),
}

impl FileRecord {
    /// The tag this record is written under.
    #[must_use]
    pub const fn tag(&self) -> u8 {
        match self {
            Self::Header(_) => tag::HEADER,
            Self::Timestamp { .. } => tag::TIMESTAMP,
            Self::AfeSettings { .. } => tag::AFE_SETTINGS,
            Self::AfeSettingsAll { .. } => tag::AFE_SETTINGS_ALL,
            Self::NoOfPpgValues { .. } => tag::NO_OF_PPG_VALUES,
            Self::BatteryLevel { .. } => tag::BATTERY_LEVEL,
            Self::PpgRawAll { .. } => tag::PPG_RAW_ALL,
            Self::Imu { .. } => tag::IMU,
            Self::HeartRate { .. } => tag::HEART_RATE,
            Self::ChargeState { .. } => tag::CHARGE_STATE,
            Self::BeltOnBody { .. } => tag::BELT_ON_BODY,
            Self::ImuRaw { .. } => tag::IMU_RAW,
            Self::HeartRateInterval { .. } => tag::HEART_RATE_INTERVAL,
            Self::PpgRaw { .. } => tag::PPG_RAW,
            Self::AccRaw { .. } => tag::ACC_RAW,
            Self::GyroRaw { .. } => tag::GYRO_RAW,
            Self::Temperature { .. } => tag::TEMPERATURE,
            Self::PulseRawList(_) => tag::PULSE_RAW_LIST,
            Self::PulseBlockEcg(_) => tag::PULSE_BLOCK_ECG,
            Self::PulseBlockPpg(_) => tag::PULSE_BLOCK_PPG,
            Self::BatteryDiagnostics(_) => tag::BATTERY_DIAGNOSTICS,
        }
    }
}

/// Decodes one record from the front of `data`.
///
/// `version` selects the AFE settings layout; it comes from the stream's
/// header record and is threaded explicitly so a reader never depends on
/// hidden state. Returns the record and the number of bytes consumed,
/// including the tag.
pub fn decode_record(
    data: &[u8],
    version: FirmwareVersion,
) -> Result<(FileRecord, usize), RecordError> {
    let mut r = ByteReader::new(data);
    let tag_byte = r.read_u8()?;
    let record = match tag_byte {
        tag::HEADER => FileRecord::Header(FileHeader::decode(&mut r)?),
        tag::TIMESTAMP => FileRecord::Timestamp {
            tick: r.read_u16_be()?,
            current_time: r.read_u64_be()?,
        },
        tag::AFE_SETTINGS => {
            let tick = r.read_u16_be()?;
            let settings = if version >= AFE_LAYOUT_CUTOFF {
                AfeSettingsRecord::Current(AfeSettings::decode(&mut r)?)
            } else {
                AfeSettingsRecord::Legacy {
                    rf_gain: r.read_i8()?,
                    cf_value: r.read_i8()?,
                    ecg_gain: r.read_i8()?,
                    led1: r.read_f64_be()?,
                    led4: r.read_f64_be()?,
                    off_dac: r.read_f64_be()?,
                    relative_gain: r.read_f64_be()?,
                }
            };
            FileRecord::AfeSettings { tick, settings }
        }
        tag::AFE_SETTINGS_ALL => FileRecord::AfeSettingsAll {
            tick: r.read_u16_be()?,
            settings: AfeSettingsAll::decode(&mut r)?,
        },
        tag::NO_OF_PPG_VALUES => FileRecord::NoOfPpgValues {
            tick: r.read_u16_be()?,
            value: r.read_u8()?,
        },
        tag::BATTERY_LEVEL => FileRecord::BatteryLevel {
            tick: r.read_u16_be()?,
            level: r.read_u8()?,
        },
        tag::PPG_RAW_ALL => FileRecord::PpgRawAll {
            tick: r.read_u16_be()?,
            ecg: r.read_i24_be()?,
            ppg_green: r.read_i24_be()?,
            ppg_red: r.read_i24_be()?,
            ppg_ir: r.read_i24_be()?,
        },
        tag::IMU => FileRecord::Imu {
            tick: r.read_u16_be()?,
            orientation_and_activity: r.read_u8()?,
        },
        tag::HEART_RATE => FileRecord::HeartRate {
            tick: r.read_u16_be()?,
            rate: r.read_u16_be()?,
        },
        tag::CHARGE_STATE => FileRecord::ChargeState {
            tick: r.read_u16_be()?,
            state: r.read_u8()?,
        },
        tag::BELT_ON_BODY => FileRecord::BeltOnBody {
            tick: r.read_u16_be()?,
            on_body: r.read_u8()?,
        },
        tag::IMU_RAW => FileRecord::ImuRaw {
            tick: r.read_u16_be()?,
            imu: ImuRaw::decode(&mut r)?,
        },
        tag::HEART_RATE_INTERVAL => FileRecord::HeartRateInterval {
            tick: r.read_u16_be()?,
            interval: r.read_u16_be()?,
        },
        tag::PPG_RAW => FileRecord::PpgRaw {
            tick: r.read_u16_be()?,
            ecg: r.read_i24_be()?,
            ppg: r.read_i24_be()?,
        },
        tag::ACC_RAW => FileRecord::AccRaw {
            tick: r.read_u16_be()?,
            acc: AccRaw::decode(&mut r)?,
        },
        tag::GYRO_RAW => FileRecord::GyroRaw {
            tick: r.read_u16_be()?,
            gyro: GyroRaw::decode(&mut r)?,
        },
        tag::TEMPERATURE => FileRecord::Temperature {
            tick: r.read_u16_be()?,
            temperature: Temperature::decode(&mut r)?,
        },
        tag::PULSE_RAW_LIST => FileRecord::PulseRawList(PulseRawList::decode(&mut r)?),
        tag::PULSE_BLOCK_ECG => FileRecord::PulseBlockEcg(PulseBlock::decode(&mut r)?),
        tag::PULSE_BLOCK_PPG => FileRecord::PulseBlockPpg(PulseBlock::decode(&mut r)?),
        tag::BATTERY_DIAGNOSTICS => {
            FileRecord::BatteryDiagnostics(BatteryDiagnostics::decode(&mut r)?)
        }
        other => return Err(RecordError::UnknownRecordTag { tag: other }),
    };
    Ok((record, r.position()))
}

/// Encodes one record, tag included.
pub fn encode_record(record: &FileRecord) -> Result<Vec<u8>, EncodeError> {
    let mut w = ByteWriter::new();
    w.write_u8(record.tag());
    match record {
        FileRecord::Header(header) => header.encode_to(&mut w),
        FileRecord::Timestamp { tick, current_time } => {
            w.write_u16_be(*tick);
            w.write_u64_be(*current_time);
        }
        FileRecord::AfeSettings { tick, settings } => {
            w.write_u16_be(*tick);
            match settings {
                AfeSettingsRecord::Current(afe) => afe.encode_to(&mut w),
                AfeSettingsRecord::Legacy {
                    rf_gain,
                    cf_value,
                    ecg_gain,
                    led1,
                    led4,
                    off_dac,
                    relative_gain,
                } => {
                    w.write_i8(*rf_gain);
                    w.write_i8(*cf_value);
                    w.write_i8(*ecg_gain);
                    w.write_f64_be(*led1);
                    w.write_f64_be(*led4);
                    w.write_f64_be(*off_dac);
                    w.write_f64_be(*relative_gain);
                }
            }
        }
        FileRecord::AfeSettingsAll { tick, settings } => {
            w.write_u16_be(*tick);
            settings.encode_to(&mut w);
        }
        FileRecord::NoOfPpgValues { tick, value } => {
            w.write_u16_be(*tick);
            w.write_u8(*value);
        }
        FileRecord::BatteryLevel { tick, level } => {
            w.write_u16_be(*tick);
            w.write_u8(*level);
        }
        FileRecord::PpgRawAll {
            tick,
            ecg,
            ppg_green,
            ppg_red,
            ppg_ir,
        } => {
            w.write_u16_be(*tick);
            w.write_i24_be(*ecg)?;
            w.write_i24_be(*ppg_green)?;
            w.write_i24_be(*ppg_red)?;
            w.write_i24_be(*ppg_ir)?;
        }
        FileRecord::Imu {
            tick,
            orientation_and_activity,
        } => {
            w.write_u16_be(*tick);
            w.write_u8(*orientation_and_activity);
        }
        FileRecord::HeartRate { tick, rate } => {
            w.write_u16_be(*tick);
            w.write_u16_be(*rate);
        }
        FileRecord::ChargeState { tick, state } => {
            w.write_u16_be(*tick);
            w.write_u8(*state);
        }
        FileRecord::BeltOnBody { tick, on_body } => {
            w.write_u16_be(*tick);
            w.write_u8(*on_body);
        }
        FileRecord::ImuRaw { tick, imu } => {
            w.write_u16_be(*tick);
            imu.encode_to(&mut w);
        }
        FileRecord::HeartRateInterval { tick, interval } => {
            w.write_u16_be(*tick);
            w.write_u16_be(*interval);
        }
        FileRecord::PpgRaw { tick, ecg, ppg } => {
            w.write_u16_be(*tick);
            w.write_i24_be(*ecg)?;
            w.write_i24_be(*ppg)?;
        }
        FileRecord::AccRaw { tick, acc } => {
            w.write_u16_be(*tick);
            acc.encode_to(&mut w);
        }
        FileRecord::GyroRaw { tick, gyro } => {
            w.write_u16_be(*tick);
            gyro.encode_to(&mut w);
        }
        FileRecord::Temperature { tick, temperature } => {
            w.write_u16_be(*tick);
            temperature.encode_to(&mut w);
        }
        FileRecord::PulseRawList(list) => list.encode_to(&mut w)?,
        FileRecord::PulseBlockEcg(block) | FileRecord::PulseBlockPpg(block) => {
            block.encode_to(&mut w)?;
        }
        FileRecord::BatteryDiagnostics(diag) => diag.encode_to(&mut w),
    }
    Ok(w.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    const V416: FirmwareVersion = FirmwareVersion::new(4, 1, 6);
    const V312: FirmwareVersion = FirmwareVersion::new(3, 1, 2);

    fn record(tag_byte: u8, payload_hex: &str) -> Vec<u8> {
        let mut out = vec![tag_byte];
        out.extend_from_slice(&hex::decode(payload_hex).unwrap());
        out
    }

    #[test]
    fn tag_space_has_no_collisions() {
        let mut tags = tag::ALL.to_vec();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), tag::ALL.len());
    }

    #[test]
    fn header_record_vector() {
        let data = record(tag::HEADER, "65c6fa2569b1633302040106710000017e5353729d");
        let (decoded, consumed) = decode_record(&data, V416).unwrap();
        assert_eq!(consumed, 1 + FileHeader::LEN);
        let FileRecord::Header(header) = decoded else {
            panic!("wrong record: {decoded:?}");
        };
        assert_eq!(header.serial, 7_333_824_081_813_398_323);
        assert_eq!(header.firmware_version, FirmwareVersion::new(4, 1, 6));
        assert_eq!(header.current_time, 1_642_075_484_829);

        assert_eq!(encode_record(&FileRecord::Header(header)).unwrap(), data);
    }

    #[test]
    fn timestamp_record_vector() {
        let data = record(tag::TIMESTAMP, "00020000017e5353729d");
        let (decoded, consumed) = decode_record(&data, V416).unwrap();
        assert_eq!(consumed, 11);
        assert_eq!(
            decoded,
            FileRecord::Timestamp {
                tick: 2,
                current_time: 1_642_075_484_829,
            }
        );
        assert_eq!(encode_record(&decoded).unwrap(), data);
    }

    #[test]
    fn afe_settings_current_layout() {
        let data = record(
            tag::AFE_SETTINGS,
            "0002050204000000184900001849fff8ef66424f20d7",
        );
        let (decoded, consumed) = decode_record(&data, V416).unwrap();
        assert_eq!(consumed, 23);
        let FileRecord::AfeSettings {
            tick,
            settings: AfeSettingsRecord::Current(afe),
        } = decoded
        else {
            panic!("wrong record: {decoded:?}");
        };
        assert_eq!(tick, 2);
        assert_eq!(afe.rf_gain, 5);
        assert_eq!(afe.led1, 6217);
        assert_eq!(
            encode_record(&FileRecord::AfeSettings {
                tick,
                settings: AfeSettingsRecord::Current(afe)
            })
            .unwrap(),
            data
        );
    }

    #[test]
    fn afe_settings_legacy_layout() {
        let settings = AfeSettingsRecord::Legacy {
            rf_gain: 2,
            cf_value: 2,
            ecg_gain: 4,
            led1: 6217.0,
            led4: 6217.0,
            off_dac: -463_002.0,
            relative_gain: 51.78,
        };
        let original = FileRecord::AfeSettings { tick: 7, settings };
        let data = encode_record(&original).unwrap();
        // tag + tick + three gains + four doubles
        assert_eq!(data.len(), 1 + 2 + 3 + 32);

        let (decoded, consumed) = decode_record(&data, V312).unwrap();
        assert_eq!(consumed, data.len());
        assert_eq!(decoded, original);
    }

    #[test]
    fn afe_layout_follows_version_cutoff() {
        let current = FileRecord::AfeSettings {
            tick: 0,
            settings: AfeSettingsRecord::Current(AfeSettings {
                rf_gain: 1,
                cf_value: 2,
                ecg_gain: 3,
                ioffdac_range: 0,
                led1: 10,
                led4: 20,
                off_dac: -5,
                relative_gain: 1.0,
            }),
        };
        let data = encode_record(&current).unwrap();
        assert_eq!(data.len(), 23);

        // The same bytes read under a pre-cutoff version run past the end
        // of the record.
        assert_eq!(
            decode_record(&data, V312),
            Err(RecordError::Truncated)
        );
        assert_eq!(
            decode_record(&data, AFE_LAYOUT_CUTOFF).unwrap().0,
            current
        );
    }

    #[test]
    fn ppg_raw_record_vector() {
        let data = record(tag::PPG_RAW, "00020002090357f7");
        let (decoded, consumed) = decode_record(&data, V416).unwrap();
        assert_eq!(consumed, 9);
        assert_eq!(
            decoded,
            FileRecord::PpgRaw {
                tick: 2,
                ecg: 521,
                ppg: 219_127,
            }
        );
        assert_eq!(encode_record(&decoded).unwrap(), data);
    }

    #[test]
    fn imu_raw_record_vector() {
        let data = record(tag::IMU_RAW, "72a7010fc3eb137f002efff7ffdc");
        let (decoded, _) = decode_record(&data, V416).unwrap();
        let FileRecord::ImuRaw { tick, imu } = decoded else {
            panic!("wrong record: {decoded:?}");
        };
        assert_eq!(tick, 29_351);
        assert_eq!(imu.acc_x, 271);
        assert_eq!(imu.gyr_z, -36);
    }

    #[test]
    fn temperature_record_vectors() {
        let (decoded, _) = decode_record(&record(tag::TEMPERATURE, "72a70c80"), V416).unwrap();
        let FileRecord::Temperature { temperature, .. } = decoded else {
            panic!("wrong record: {decoded:?}");
        };
        assert!((temperature.celsius() - 25.0).abs() < f32::EPSILON);

        let (decoded, _) = decode_record(&record(tag::TEMPERATURE, "72a7ec00"), V416).unwrap();
        let FileRecord::Temperature { temperature, .. } = decoded else {
            panic!("wrong record: {decoded:?}");
        };
        assert!((temperature.celsius() - (-40.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn pulse_block_reconstructs_from_single_reference() {
        // channel 1, count 2, time 0x10, reference 1000, deltas +5, -5
        let mut data = vec![tag::PULSE_BLOCK_ECG, 0x01, 0x02];
        data.extend_from_slice(&0x10u64.to_le_bytes());
        data.extend_from_slice(&1000i32.to_le_bytes());
        data.extend_from_slice(&5i16.to_le_bytes());
        data.extend_from_slice(&(-5i16).to_le_bytes());

        let (decoded, consumed) = decode_record(&data, V416).unwrap();
        assert_eq!(consumed, 1 + 14 + 4);
        let FileRecord::PulseBlockEcg(block) = &decoded else {
            panic!("wrong record: {decoded:?}");
        };
        assert_eq!(block.channel, 1);
        assert_eq!(block.time, 0x10);
        // The reference is the first sample; deltas are against it, not
        // against each other.
        assert_eq!(block.samples, vec![1000, 1005, 995]);

        assert_eq!(encode_record(&decoded).unwrap(), data);
    }

    #[test]
    fn pulse_block_count_byte_excludes_the_reference() {
        // A count of zero still carries the reference sample.
        let mut data = vec![tag::PULSE_BLOCK_PPG, 0x02, 0x00];
        data.extend_from_slice(&0x20u64.to_le_bytes());
        data.extend_from_slice(&219_127i32.to_le_bytes());

        let (decoded, consumed) = decode_record(&data, V416).unwrap();
        assert_eq!(consumed, 1 + 14);
        let FileRecord::PulseBlockPpg(block) = &decoded else {
            panic!("wrong record: {decoded:?}");
        };
        assert_eq!(block.samples, vec![219_127]);

        let encoded = encode_record(&decoded).unwrap();
        assert_eq!(encoded[2], 0x00);
        assert_eq!(encoded, data);
    }

    #[test]
    fn pulse_block_encode_rejects_empty() {
        let block = FileRecord::PulseBlockPpg(PulseBlock {
            channel: 0,
            time: 0,
            samples: vec![],
        });
        assert_eq!(encode_record(&block), Err(EncodeError::EmptyBlock));
    }

    #[test]
    fn pulse_block_encode_rejects_wide_delta() {
        let block = FileRecord::PulseBlockEcg(PulseBlock {
            channel: 0,
            time: 0,
            samples: vec![0, 40_000],
        });
        assert_eq!(
            encode_record(&block),
            Err(EncodeError::DeltaOutOfRange { delta: 40_000 })
        );
    }

    #[test]
    fn unknown_tag_is_fatal() {
        assert_eq!(
            decode_record(&[0xF2, 0x00, 0x00], V416),
            Err(RecordError::UnknownRecordTag { tag: 0xF2 })
        );
    }

    #[test]
    fn empty_input_is_truncated() {
        assert_eq!(decode_record(&[], V416), Err(RecordError::Truncated));
    }

    #[test]
    fn truncated_payload() {
        assert_eq!(
            decode_record(&[tag::HEART_RATE, 0x00], V416),
            Err(RecordError::Truncated)
        );
    }
}
