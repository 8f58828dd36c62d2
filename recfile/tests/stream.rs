//! Whole-stream decoding of synthesized recordings.

use recfile::{
    encode_record, AfeSettingsRecord, FileHeader, FileRecord, PulseBlock, RecordError,
    RecordReader,
};
use types::{AfeSettings, FirmwareVersion, ImuRaw, Temperature};

fn header(version: FirmwareVersion) -> FileRecord {
    FileRecord::Header(FileHeader {
        serial: 7_333_824_081_813_398_323,
        firmware_version: version,
        current_time: 1_642_075_484_829,
    })
}

fn stream(records: &[FileRecord]) -> Vec<u8> {
    records
        .iter()
        .flat_map(|r| encode_record(r).unwrap())
        .collect()
}

#[test]
fn synthesized_recording_reads_back() {
    let records = vec![
        header(FirmwareVersion::new(4, 1, 6)),
        FileRecord::Timestamp {
            tick: 2,
            current_time: 1_642_075_484_829,
        },
        FileRecord::BatteryLevel { tick: 10, level: 87 },
        FileRecord::HeartRate { tick: 12, rate: 64 },
        FileRecord::Temperature {
            tick: 14,
            temperature: Temperature { raw: 3200 },
        },
        FileRecord::ImuRaw {
            tick: 16,
            imu: ImuRaw {
                acc_x: 271,
                acc_y: -15_381,
                acc_z: 4991,
                gyr_x: 46,
                gyr_y: -9,
                gyr_z: -36,
            },
        },
        FileRecord::PpgRaw {
            tick: 18,
            ecg: 521,
            ppg: 219_127,
        },
    ];
    let data = stream(&records);

    let (decoded_header, reader) = RecordReader::from_stream(&data).unwrap();
    assert_eq!(decoded_header.serial, 7_333_824_081_813_398_323);
    assert_eq!(
        decoded_header.firmware_version,
        FirmwareVersion::new(4, 1, 6)
    );

    let decoded: Vec<FileRecord> = reader.map(Result::unwrap).collect();
    assert_eq!(decoded, &records[1..]);
}

#[test]
fn afe_layout_is_threaded_from_the_header() {
    let afe = FileRecord::AfeSettings {
        tick: 5,
        settings: AfeSettingsRecord::Current(AfeSettings {
            rf_gain: 2,
            cf_value: 2,
            ecg_gain: 4,
            ioffdac_range: 0,
            led1: 6217,
            led4: 6217,
            off_dac: -463_002,
            relative_gain: 51.78,
        }),
    };
    let data = stream(&[header(FirmwareVersion::new(4, 0, 1)), afe.clone()]);

    let (_, reader) = RecordReader::from_stream(&data).unwrap();
    let decoded: Vec<FileRecord> = reader.map(Result::unwrap).collect();
    assert_eq!(decoded, vec![afe]);
}

#[test]
fn pre_cutoff_header_selects_legacy_layout() {
    let afe = FileRecord::AfeSettings {
        tick: 5,
        settings: AfeSettingsRecord::Legacy {
            rf_gain: 2,
            cf_value: 2,
            ecg_gain: 4,
            led1: 6217.0,
            led4: 6217.0,
            off_dac: -463_002.0,
            relative_gain: 51.78,
        },
    };
    let data = stream(&[header(FirmwareVersion::new(3, 1, 2)), afe.clone()]);

    let (_, reader) = RecordReader::from_stream(&data).unwrap();
    let decoded: Vec<FileRecord> = reader.map(Result::unwrap).collect();
    assert_eq!(decoded, vec![afe]);
}

#[test]
fn delta_blocks_in_stream() {
    let block = FileRecord::PulseBlockPpg(PulseBlock {
        channel: 2,
        time: 1_642_075_484_829,
        samples: vec![219_127, 219_130, 219_100, 219_127],
    });
    let data = stream(&[header(FirmwareVersion::new(5, 2, 2)), block.clone()]);

    let (_, reader) = RecordReader::from_stream(&data).unwrap();
    let decoded: Vec<FileRecord> = reader.map(Result::unwrap).collect();
    assert_eq!(decoded, vec![block]);
}

#[test]
fn reader_fuses_after_unknown_tag() {
    let mut data = stream(&[
        header(FirmwareVersion::new(4, 1, 6)),
        FileRecord::BatteryLevel { tick: 1, level: 50 },
    ]);
    data.push(0xF2);
    // Bytes after the unknown tag would decode fine on their own but must
    // never be reached.
    data.extend_from_slice(&encode_record(&FileRecord::BatteryLevel { tick: 2, level: 49 }).unwrap());

    let (_, mut reader) = RecordReader::from_stream(&data).unwrap();
    assert_eq!(
        reader.next().unwrap().unwrap(),
        FileRecord::BatteryLevel { tick: 1, level: 50 }
    );
    assert_eq!(
        reader.next().unwrap().unwrap_err(),
        RecordError::UnknownRecordTag { tag: 0xF2 }
    );
    assert!(reader.next().is_none());
    assert!(reader.next().is_none());
}

#[test]
fn reader_reports_truncation() {
    let mut data = stream(&[header(FirmwareVersion::new(4, 1, 6))]);
    data.extend_from_slice(&[recfile::tag::HEART_RATE, 0x00]);

    let (_, mut reader) = RecordReader::from_stream(&data).unwrap();
    assert_eq!(reader.next().unwrap().unwrap_err(), RecordError::Truncated);
    assert!(reader.next().is_none());
}

#[test]
fn position_tracks_record_boundaries() {
    let data = stream(&[
        header(FirmwareVersion::new(4, 1, 6)),
        FileRecord::BatteryLevel { tick: 1, level: 50 },
    ]);
    let (_, mut reader) = RecordReader::from_stream(&data).unwrap();
    assert_eq!(reader.position(), 22);
    reader.next().unwrap().unwrap();
    assert_eq!(reader.position(), data.len());
}
