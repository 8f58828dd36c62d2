use bytestream::{ByteReader, ByteWriter};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_u16_be_roundtrip(value in any::<u16>()) {
        let mut writer = ByteWriter::new();
        writer.write_u16_be(value);
        let bytes = writer.finish();
        prop_assert_eq!(ByteReader::new(&bytes).read_u16_be().unwrap(), value);
    }

    #[test]
    fn prop_i24_roundtrip(value in -0x0080_0000i32..0x0080_0000) {
        let mut writer = ByteWriter::new();
        writer.write_i24_be(value).unwrap();
        let bytes = writer.finish();
        prop_assert_eq!(bytes.len(), 3);
        prop_assert_eq!(ByteReader::new(&bytes).read_i24_be().unwrap(), value);
    }

    #[test]
    fn prop_int_le_roundtrip(value in any::<i32>(), width in 1usize..=4) {
        let value = i64::from(value);
        let max = 1i64 << (8 * width - 1);
        prop_assume!(value >= -max && value < max);

        let mut writer = ByteWriter::new();
        writer.write_int_le(value, width).unwrap();
        let bytes = writer.finish();
        prop_assert_eq!(bytes.len(), width);
        prop_assert_eq!(ByteReader::new(&bytes).read_int_le(width).unwrap(), value);
    }

    #[test]
    fn prop_int_le_rejects_out_of_range(width in 1usize..=4) {
        let max = 1i64 << (8 * width - 1);
        let mut writer = ByteWriter::new();
        prop_assert!(writer.write_int_le(max, width).is_err());
        prop_assert!(writer.write_int_le(-max - 1, width).is_err());
        prop_assert!(writer.is_empty());
    }

    #[test]
    fn prop_padded_str_roundtrip(s in "[a-zA-Z0-9._-]{0,25}") {
        let mut writer = ByteWriter::new();
        writer.write_padded_str(&s, 26).unwrap();
        let bytes = writer.finish();
        prop_assert_eq!(bytes.len(), 26);
        prop_assert_eq!(ByteReader::new(&bytes).read_padded_str(26).unwrap(), s);
    }

    #[test]
    fn prop_reader_never_reads_past_end(data in prop::collection::vec(any::<u8>(), 0..16)) {
        let mut reader = ByteReader::new(&data);
        while reader.read_u32_be().is_ok() {}
        prop_assert!(reader.remaining() < 4);
    }
}
