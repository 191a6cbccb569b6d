//! Tests for the register decoding rules against the public API.

use pmbus_rs::decode::{
    decode, decode_ascii, decode_linear_float, decode_mode_linear, scale_mode_linear, DecodeRule,
    LinearFields, ModeParams, Reading,
};
use pmbus_rs::RegisterImage;

fn pack(x: u32, m: u32, b: u32, r: u32) -> u32 {
    x | (m << 11) | (b << 16) | (r << 27)
}

#[test]
fn test_word_is_little_endian() {
    let mut image = RegisterImage::new();
    image.set(0x88, 0x34);
    image.set(0x89, 0x12);
    assert_eq!(decode(&image, 0x88, DecodeRule::RawWord).unwrap(), Reading::Word(0x1234));
    assert_eq!(decode(&image, 0x88, DecodeRule::Identity).unwrap(), Reading::Word(0x1234));
}

#[test]
fn test_word_at_last_register_reads_zero_high_byte() {
    let mut image = RegisterImage::new();
    image.set(0xFF, 0xAB);
    assert_eq!(image.word(0xFF), 0x00AB);
}

#[test]
fn test_linear_float_reference_values() {
    assert_eq!(decode_linear_float(pack(100, 1, 0, 0)), 100.0);
    assert_eq!(decode_linear_float(pack(100, 1, 0, 2)), 400.0);
    assert_eq!(decode_linear_float(pack(0, 0, 0, 0)), 0.0);
}

#[test]
fn test_mode_linear_reference_value() {
    let params = ModeParams { m: 2, b: 3, r: 1 };
    assert_eq!(scale_mode_linear(200, params).unwrap(), 4030);
}

#[test]
fn test_mode_linear_reads_mode_byte_below_command() {
    let mut image = RegisterImage::new();
    // READ_VOUT at 0x8B, mode byte at 0x0B: m=1, b=3, R=1
    image.set(0x0B, 0x0B);
    image.set(0x8B, 0xC8);
    assert_eq!(decode(&image, 0x8B, DecodeRule::ModeLinear).unwrap(), Reading::Scaled(2030));
}

#[test]
fn test_status_rule_reads_mirror() {
    let mut image = RegisterImage::new();
    image.set(0x02, 0x80);
    image.set(0x7A, 0x01);
    let reading = decode(&image, 0x7A, DecodeRule::Status { offset: 0x02 }).unwrap();
    assert_eq!(reading, Reading::Word(0x0080));
}

#[test]
fn test_ascii_rule() {
    let mut image = RegisterImage::new();
    for (i, b) in b"\x00DEL\x07TA".iter().enumerate() {
        image.set(0x40 + i, *b);
    }
    let reading = decode(&image, 0x99, DecodeRule::Ascii { offset: 0x40, len: 7 }).unwrap();
    assert_eq!(reading, Reading::Text("DELTA".into()));
}

#[test]
fn test_ascii_empty_field() {
    assert_eq!(decode_ascii(&[]), "");
    assert_eq!(decode_ascii(&[0; 16]), "");
}

mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_word_composition(lo in any::<u8>(), hi in any::<u8>(), addr in 0usize..255) {
            let mut image = RegisterImage::new();
            image.set(addr, lo);
            image.set(addr + 1, hi);
            prop_assert_eq!(image.word(addr), u16::from(lo) | (u16::from(hi) << 8));
        }

        #[test]
        fn prop_linear_float_formula(
            x in 0u32..0x800,
            m in 0u32..0x20,
            b in 0u32..0x800,
            r in 0u32..0x20,
        ) {
            let raw = pack(x, m, b, r);
            prop_assert_eq!(LinearFields::unpack(raw), LinearFields { x, m, b, r });
            let expected = (f64::from(m) * f64::from(x) + f64::from(b)) * 2f64.powi(r as i32);
            prop_assert_eq!(decode_linear_float(raw), expected);
        }

        #[test]
        fn prop_linear_float_non_negative(raw in any::<u32>()) {
            prop_assert!(decode_linear_float(raw) >= 0.0);
        }

        #[test]
        fn prop_mode_linear_formula(raw in any::<u16>(), mode in any::<u8>()) {
            let m = i128::from(mode >> 3);
            let b = i128::from(mode & 0x07);
            let expected = (m * i128::from(raw) + b) * 10i128.pow((mode >> 3) as u32);
            prop_assert_eq!(decode_mode_linear(raw, mode).unwrap(), expected);
        }

        #[test]
        fn prop_ascii_output_is_printable(data in proptest::collection::vec(any::<u8>(), 0..32)) {
            let text = decode_ascii(&data);
            prop_assert!(text.chars().all(|c| (' '..='~').contains(&c)));
            prop_assert_eq!(text.len(), data.iter().filter(|b| (32..=126).contains(*b)).count());
        }
    }
}
