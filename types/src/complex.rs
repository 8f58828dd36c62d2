//! Sensor value types with fixed wire layouts.
//!
//! Every type here knows its own wire layout: `decode` reads it from a
//! [`ByteReader`] and `encode_to` appends it to a [`ByteWriter`]. Fixed-size
//! types expose their encoded size as `LEN`. The device protocol is
//! big-endian, with two deliberate exceptions inherited from the firmware:
//! [`PulseRawList`] and [`BatteryDiagnostics`] are little-endian throughout.

use bytestream::{ByteError, ByteReader, ByteResult, ByteWriter};
use std::fmt;

/// Device firmware version as a `major.minor.patch` triple.
///
/// Ordering is lexicographic over the three components, which lets callers
/// compare against layout cutoffs such as the AFE settings record change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl FirmwareVersion {
    pub const LEN: usize = 3;

    #[must_use]
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            major: reader.read_u8()?,
            minor: reader.read_u8()?,
            patch: reader.read_u8()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_u8(self.major);
        writer.write_u8(self.minor);
        writer.write_u8(self.patch);
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{:02}", self.major, self.minor, self.patch)
    }
}

/// Reporting configuration for a single attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reporting {
    pub interval: u16,
    pub on_change: u8,
}

impl Reporting {
    pub const LEN: usize = 3;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            interval: reader.read_u16_be()?,
            on_change: reader.read_u8()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_u16_be(self.interval);
        writer.write_u8(self.on_change);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BloodPressure {
    pub sys: u16,
    pub dia: u16,
    pub map: u16,
    pub pat: u32,
    pub pulse: u16,
}

impl BloodPressure {
    pub const LEN: usize = 12;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            sys: reader.read_u16_be()?,
            dia: reader.read_u16_be()?,
            map: reader.read_u16_be()?,
            pat: reader.read_u32_be()?,
            pulse: reader.read_u16_be()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_u16_be(self.sys);
        writer.write_u16_be(self.dia);
        writer.write_u16_be(self.map);
        writer.write_u32_be(self.pat);
        writer.write_u16_be(self.pulse);
    }
}

/// One ECG/PPG sample pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PulseRaw {
    pub ecg: i32,
    pub ppg: i32,
}

impl PulseRaw {
    pub const LEN: usize = 8;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            ecg: reader.read_i32_be()?,
            ppg: reader.read_i32_be()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_i32_be(self.ecg);
        writer.write_i32_be(self.ppg);
    }
}

/// One ECG sample with all three PPG wavelengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PulseRawAll {
    pub ecg: i32,
    pub ppg_green: i32,
    pub ppg_red: i32,
    pub ppg_ir: i32,
}

impl PulseRawAll {
    pub const LEN: usize = 16;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            ecg: reader.read_i32_be()?,
            ppg_green: reader.read_i32_be()?,
            ppg_red: reader.read_i32_be()?,
            ppg_ir: reader.read_i32_be()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_i32_be(self.ecg);
        writer.write_i32_be(self.ppg_green);
        writer.write_i32_be(self.ppg_red);
        writer.write_i32_be(self.ppg_ir);
    }
}

/// Packed orientation and activity state from the motion processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Imu {
    pub orientation_and_activity: u8,
}

impl Imu {
    pub const LEN: usize = 1;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            orientation_and_activity: reader.read_u8()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_u8(self.orientation_and_activity);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImuRaw {
    pub acc_x: i16,
    pub acc_y: i16,
    pub acc_z: i16,
    pub gyr_x: i16,
    pub gyr_y: i16,
    pub gyr_z: i16,
}

impl ImuRaw {
    pub const LEN: usize = 12;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            acc_x: reader.read_i16_be()?,
            acc_y: reader.read_i16_be()?,
            acc_z: reader.read_i16_be()?,
            gyr_x: reader.read_i16_be()?,
            gyr_y: reader.read_i16_be()?,
            gyr_z: reader.read_i16_be()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_i16_be(self.acc_x);
        writer.write_i16_be(self.acc_y);
        writer.write_i16_be(self.acc_z);
        writer.write_i16_be(self.gyr_x);
        writer.write_i16_be(self.gyr_y);
        writer.write_i16_be(self.gyr_z);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccRaw {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl AccRaw {
    pub const LEN: usize = 6;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            x: reader.read_i16_be()?,
            y: reader.read_i16_be()?,
            z: reader.read_i16_be()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_i16_be(self.x);
        writer.write_i16_be(self.y);
        writer.write_i16_be(self.z);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GyroRaw {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl GyroRaw {
    pub const LEN: usize = 6;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            x: reader.read_i16_be()?,
            y: reader.read_i16_be()?,
            z: reader.read_i16_be()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_i16_be(self.x);
        writer.write_i16_be(self.y);
        writer.write_i16_be(self.z);
    }
}

/// Analog front end configuration for the active measurement channel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AfeSettings {
    pub rf_gain: u8,
    pub cf_value: u8,
    pub ecg_gain: u8,
    pub ioffdac_range: u8,
    pub led1: u32,
    pub led4: u32,
    pub off_dac: i32,
    pub relative_gain: f32,
}

impl AfeSettings {
    pub const LEN: usize = 20;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            rf_gain: reader.read_u8()?,
            cf_value: reader.read_u8()?,
            ecg_gain: reader.read_u8()?,
            ioffdac_range: reader.read_u8()?,
            led1: reader.read_u32_be()?,
            led4: reader.read_u32_be()?,
            off_dac: reader.read_i32_be()?,
            relative_gain: reader.read_f32_be()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_u8(self.rf_gain);
        writer.write_u8(self.cf_value);
        writer.write_u8(self.ecg_gain);
        writer.write_u8(self.ioffdac_range);
        writer.write_u32_be(self.led1);
        writer.write_u32_be(self.led4);
        writer.write_i32_be(self.off_dac);
        writer.write_f32_be(self.relative_gain);
    }
}

/// Analog front end configuration across all LEDs and offset DACs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AfeSettingsAll {
    pub rf_gain: u8,
    pub cf_value: u8,
    pub ecg_gain: u8,
    pub ioffdac_range: u8,
    pub led1: u32,
    pub led2: u32,
    pub led3: u32,
    pub led4: u32,
    pub off_dac1: i32,
    pub off_dac2: i32,
    pub off_dac3: i32,
    pub relative_gain: f32,
}

impl AfeSettingsAll {
    pub const LEN: usize = 36;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            rf_gain: reader.read_u8()?,
            cf_value: reader.read_u8()?,
            ecg_gain: reader.read_u8()?,
            ioffdac_range: reader.read_u8()?,
            led1: reader.read_u32_be()?,
            led2: reader.read_u32_be()?,
            led3: reader.read_u32_be()?,
            led4: reader.read_u32_be()?,
            off_dac1: reader.read_i32_be()?,
            off_dac2: reader.read_i32_be()?,
            off_dac3: reader.read_i32_be()?,
            relative_gain: reader.read_f32_be()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_u8(self.rf_gain);
        writer.write_u8(self.cf_value);
        writer.write_u8(self.ecg_gain);
        writer.write_u8(self.ioffdac_range);
        writer.write_u32_be(self.led1);
        writer.write_u32_be(self.led2);
        writer.write_u32_be(self.led3);
        writer.write_u32_be(self.led4);
        writer.write_i32_be(self.off_dac1);
        writer.write_i32_be(self.off_dac2);
        writer.write_i32_be(self.off_dac3);
        writer.write_f32_be(self.relative_gain);
    }
}

/// Battery gauge snapshot, big-endian layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    pub rep_soc: u16,
    pub avg_current: i16,
    pub rep_cap: u16,
    pub full_cap: u16,
    pub tte: u32,
    pub ttf: u32,
    pub voltage: u32,
    pub avg_voltage: u32,
}

impl Diagnostics {
    pub const LEN: usize = 24;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            rep_soc: reader.read_u16_be()?,
            avg_current: reader.read_i16_be()?,
            rep_cap: reader.read_u16_be()?,
            full_cap: reader.read_u16_be()?,
            tte: reader.read_u32_be()?,
            ttf: reader.read_u32_be()?,
            voltage: reader.read_u32_be()?,
            avg_voltage: reader.read_u32_be()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_u16_be(self.rep_soc);
        writer.write_i16_be(self.avg_current);
        writer.write_u16_be(self.rep_cap);
        writer.write_u16_be(self.full_cap);
        writer.write_u32_be(self.tte);
        writer.write_u32_be(self.ttf);
        writer.write_u32_be(self.voltage);
        writer.write_u32_be(self.avg_voltage);
    }
}

/// Extended battery gauge snapshot.
///
/// Little-endian throughout; the firmware copies gauge registers out
/// verbatim. Raw register scaling: voltage is mV x 10, current mA x 100,
/// capacity mAh x 100, state of charge % x 100, `ttf`/`tte` in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatteryDiagnostics {
    pub tick: u16,
    pub ttf: u32,
    pub tte: u32,
    pub voltage: u16,
    pub avg_voltage: u16,
    pub current: i16,
    pub avg_current: i16,
    pub full_cap: u16,
    pub rep_cap: u16,
    pub rep_soc: u16,
    pub vf_soc: u16,
}

impl BatteryDiagnostics {
    pub const LEN: usize = 26;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            tick: reader.read_u16_le()?,
            ttf: reader.read_u32_le()?,
            tte: reader.read_u32_le()?,
            voltage: reader.read_u16_le()?,
            avg_voltage: reader.read_u16_le()?,
            current: reader.read_i16_le()?,
            avg_current: reader.read_i16_le()?,
            full_cap: reader.read_u16_le()?,
            rep_cap: reader.read_u16_le()?,
            rep_soc: reader.read_u16_le()?,
            vf_soc: reader.read_u16_le()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_u16_le(self.tick);
        writer.write_u32_le(self.ttf);
        writer.write_u32_le(self.tte);
        writer.write_u16_le(self.voltage);
        writer.write_u16_le(self.avg_voltage);
        writer.write_i16_le(self.current);
        writer.write_i16_le(self.avg_current);
        writer.write_u16_le(self.full_cap);
        writer.write_u16_le(self.rep_cap);
        writer.write_u16_le(self.rep_soc);
        writer.write_u16_le(self.vf_soc);
    }
}

/// Periodic recording schedule. Hours of day and minute intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recording {
    pub day_start: u8,
    pub day_end: u8,
    pub day_interval: u8,
    pub night_interval: u8,
    pub recording_start: u8,
    pub recording_stop: u8,
}

impl Recording {
    pub const LEN: usize = 6;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            day_start: reader.read_u8()?,
            day_end: reader.read_u8()?,
            day_interval: reader.read_u8()?,
            night_interval: reader.read_u8()?,
            recording_start: reader.read_u8()?,
            recording_stop: reader.read_u8()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_u8(self.day_start);
        writer.write_u8(self.day_end);
        writer.write_u8(self.day_interval);
        writer.write_u8(self.night_interval);
        writer.write_u8(self.recording_start);
        writer.write_u8(self.recording_stop);
    }
}

/// On-device file name in a fixed 26-byte NUL-padded field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileName {
    pub name: String,
}

impl FileName {
    pub const LEN: usize = 26;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            name: reader.read_padded_str(Self::LEN)?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) -> ByteResult<()> {
        writer.write_padded_str(&self.name, Self::LEN)
    }
}

impl From<&str> for FileName {
    fn from(name: &str) -> Self {
        Self { name: name.into() }
    }
}

/// Directory entry: file name plus size in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileInfo {
    pub name: FileName,
    pub size: u32,
}

impl FileInfo {
    pub const LEN: usize = 30;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            name: FileName::decode(reader)?,
            size: reader.read_u32_be()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) -> ByteResult<()> {
        self.name.encode_to(writer)?;
        writer.write_u32_be(self.size);
        Ok(())
    }
}

/// A single AFE register address/value pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AfeRegister {
    pub address: u8,
    pub value: u32,
}

impl AfeRegister {
    pub const LEN: usize = 5;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            address: reader.read_u8()?,
            value: reader.read_u32_be()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_u8(self.address);
        writer.write_u32_be(self.value);
    }
}

/// Skin temperature in raw sensor units, 1/128 degree Celsius per LSB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Temperature {
    pub raw: i16,
}

impl Temperature {
    pub const LEN: usize = 2;

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        Ok(Self {
            raw: reader.read_i16_be()?,
        })
    }

    pub fn encode_to(&self, writer: &mut ByteWriter) {
        writer.write_i16_be(self.raw);
    }

    /// Converts the raw reading to degrees Celsius.
    #[must_use]
    pub fn celsius(&self) -> f32 {
        f32::from(self.raw) / 128.0
    }
}

/// A burst of raw ECG and PPG samples in the firmware's packed layout.
///
/// Little-endian throughout. The layout is `tick` (u16), one header byte,
/// then the samples: `format` occupies the low 2 bits of the header and
/// selects the per-sample width (`format + 1` bytes), the ECG sample count
/// the next 2 bits, the PPG sample count the high 4 bits. Samples are
/// signed, ECG first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PulseRawList {
    pub tick: u16,
    pub format: u8,
    pub ecg_samples: Vec<i32>,
    pub ppg_samples: Vec<i32>,
}

impl PulseRawList {
    /// Per-sample width in bytes for this list's format.
    #[must_use]
    pub fn sample_width(&self) -> usize {
        usize::from(self.format & 0x03) + 1
    }

    /// The encoded size of this list in bytes.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        3 + (self.ecg_samples.len() + self.ppg_samples.len()) * self.sample_width()
    }

    #[must_use]
    pub const fn pack_counts(format: u8, ecg_count: u8, ppg_count: u8) -> u8 {
        (format & 0x03) | ((ecg_count & 0x03) << 2) | ((ppg_count & 0x0F) << 4)
    }

    #[must_use]
    pub const fn unpack_counts(header: u8) -> (u8, u8, u8) {
        (header & 0x03, (header >> 2) & 0x03, header >> 4)
    }

    pub fn decode(reader: &mut ByteReader<'_>) -> ByteResult<Self> {
        let tick = reader.read_u16_le()?;
        let (format, ecg_count, ppg_count) = Self::unpack_counts(reader.read_u8()?);
        let width = usize::from(format) + 1;

        let mut ecg_samples = Vec::with_capacity(usize::from(ecg_count));
        for _ in 0..ecg_count {
            ecg_samples.push(reader.read_int_le(width)? as i32);
        }
        let mut ppg_samples = Vec::with_capacity(usize::from(ppg_count));
        for _ in 0..ppg_count {
            ppg_samples.push(reader.read_int_le(width)? as i32);
        }
        Ok(Self {
            tick,
            format,
            ecg_samples,
            ppg_samples,
        })
    }

    /// Encodes the list, validating that the counts fit the packed header
    /// and every sample fits the selected width.
    pub fn encode_to(&self, writer: &mut ByteWriter) -> ByteResult<()> {
        if self.format > 0x03 {
            return Err(ByteError::BitFieldOverflow {
                value: u32::from(self.format),
                bits: 2,
            });
        }
        let ecg_count = self.ecg_samples.len();
        if ecg_count > 0x03 {
            return Err(ByteError::BitFieldOverflow {
                value: ecg_count as u32,
                bits: 2,
            });
        }
        let ppg_count = self.ppg_samples.len();
        if ppg_count > 0x0F {
            return Err(ByteError::BitFieldOverflow {
                value: ppg_count as u32,
                bits: 4,
            });
        }

        writer.write_u16_le(self.tick);
        writer.write_u8(Self::pack_counts(
            self.format,
            ecg_count as u8,
            ppg_count as u8,
        ));
        let width = self.sample_width();
        for &sample in self.ecg_samples.iter().chain(&self.ppg_samples) {
            writer.write_int_le(i64::from(sample), width)?;
        }
        Ok(())
    }
}
