//! # PMBus Numeric Decoding
//!
//! Pure functions that turn raw register contents into physical values. Each
//! cataloged quantity carries a [`DecodeRule`]; [`decode`] dispatches on it.
//!
//! ## Encodings
//!
//! - **Linear-float**: four unsigned fields packed from the least significant
//!   bit: 11-bit mantissa `X`, 5-bit coefficient `m`, 11-bit offset `b` and
//!   5-bit exponent `R`. `Y = (m·X + b) · 2^R`. The packed value is wider than a
//!   word, so it is always unpacked from a `u32`.
//! - **Mode-linear**: `Y = (m·X + b) · 10^R` where `m`, `b` and `R` come from
//!   the mode byte stored `0x80` below the telemetry command. `m` and `R` are
//!   both bits 3–7 of the mode byte.
//! - **Identity**: the composed word, unmodified.
//! - **Status**: a word read from the mirrored status slot, not the command.
//! - **ASCII**: printable bytes (32–126) of a fixed window, in order.

use crate::constants::{MODE_BYTE_DISTANCE, REGISTER_SPACE};
use crate::error::PmbusError;
use crate::image::RegisterImage;
use log::debug;
use serde::Serialize;
use std::fmt;

/// How one cataloged quantity is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeRule {
    /// Single byte at the command address
    RawByte,
    /// Composed word at the command address, no interpretation
    RawWord,
    /// Composed word at the command address, reported in its own unit
    Identity,
    /// Linear-float word at the command address
    LinearFloat,
    /// Mode-linear word scaled by the mode byte at `command - 0x80`
    ModeLinear,
    /// Word read from the mirrored status slot at `offset`
    Status { offset: u8 },
    /// ASCII field of `len` bytes starting at `offset`
    Ascii { offset: u8, len: u8 },
}

/// A decoded value, shaped by the rule that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reading {
    Byte(u8),
    Word(u16),
    Real(f64),
    Scaled(i128),
    Text(String),
}

impl Reading {
    pub fn as_byte(&self) -> Option<u8> {
        match self {
            Reading::Byte(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_word(&self) -> Option<u16> {
        match self {
            Reading::Word(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Reading::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_scaled(&self) -> Option<i128> {
        match self {
            Reading::Scaled(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reading::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Byte(v) => write!(f, "{v}"),
            Reading::Word(v) => write!(f, "{v}"),
            Reading::Real(v) => write!(f, "{v}"),
            Reading::Scaled(v) => write!(f, "{v}"),
            Reading::Text(v) => f.write_str(v),
        }
    }
}

/// Unpacked fields of a linear-float value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearFields {
    /// Mantissa, bits 0–10
    pub x: u32,
    /// Coefficient, bits 11–15
    pub m: u32,
    /// Offset, bits 16–26
    pub b: u32,
    /// Exponent, bits 27–31
    pub r: u32,
}

impl LinearFields {
    pub fn unpack(raw: u32) -> Self {
        LinearFields {
            x: raw & 0x7FF,
            m: (raw >> 11) & 0x1F,
            b: (raw >> 16) & 0x7FF,
            r: (raw >> 27) & 0x1F,
        }
    }

    pub fn value(&self) -> f64 {
        let base = f64::from(self.m) * f64::from(self.x) + f64::from(self.b);
        base * 2f64.powi(self.r as i32)
    }
}

/// Scale parameters carried by a mode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeParams {
    pub m: u8,
    pub b: u8,
    pub r: u8,
}

impl ModeParams {
    pub fn from_mode_byte(mode: u8) -> Self {
        ModeParams {
            m: (mode >> 3) & 0x1F,
            b: mode & 0x07,
            r: (mode >> 3) & 0x1F,
        }
    }
}

/// Decodes a linear-float value.
pub fn decode_linear_float(raw: u32) -> f64 {
    let fields = LinearFields::unpack(raw);
    debug!(
        "Linear-float components: X={}, m={}, b={}, R={}",
        fields.x, fields.m, fields.b, fields.r
    );
    fields.value()
}

/// Decodes a mode-linear value: `(m * raw + b) * 10^R`, with the parameters
/// taken from `mode`.
pub fn decode_mode_linear(raw: u16, mode: u8) -> Result<i128, PmbusError> {
    let params = ModeParams::from_mode_byte(mode);
    let value = scale_mode_linear(raw, params)?;
    debug!(
        "Mode-linear: mode=0x{mode:02X}, m={}, b={}, R={}, raw={raw} -> {value}",
        params.m, params.b, params.r
    );
    Ok(value)
}

/// Applies `(m * raw + b) * 10^R` exactly.
///
/// With 5-bit `m` and `R` the result always fits in an `i128`.
pub fn scale_mode_linear(raw: u16, params: ModeParams) -> Result<i128, PmbusError> {
    let scale = 10i128
        .checked_pow(u32::from(params.r))
        .ok_or(PmbusError::Overflow("mode-linear exponent"))?;
    (i128::from(params.m) * i128::from(raw) + i128::from(params.b))
        .checked_mul(scale)
        .ok_or(PmbusError::Overflow("mode-linear value"))
}

/// Keeps the printable ASCII bytes of `data`, in order.
pub fn decode_ascii(data: &[u8]) -> String {
    data.iter()
        .filter(|&&b| (32..=126).contains(&b))
        .map(|&b| b as char)
        .collect()
}

/// Reads and decodes an ASCII field from the image.
///
/// Fails when the window runs past the end of the register space.
pub fn read_ascii_field(image: &RegisterImage, offset: u8, len: u8) -> Result<String, PmbusError> {
    let start = usize::from(offset);
    let len_usize = usize::from(len);
    if start + len_usize > REGISTER_SPACE {
        return Err(PmbusError::FieldOutOfRange { offset, len });
    }

    let data = image.bytes(start, len_usize);
    crate::util::log_register_hex("ascii field", start, &data);
    Ok(decode_ascii(&data))
}

/// Address of the mode byte for a mode-linear command.
pub fn mode_address(command: u8) -> u8 {
    command.wrapping_sub(MODE_BYTE_DISTANCE)
}

/// Decodes the quantity at `command` according to `rule`.
pub fn decode(image: &RegisterImage, command: u8, rule: DecodeRule) -> Result<Reading, PmbusError> {
    let addr = usize::from(command);
    let reading = match rule {
        DecodeRule::RawByte => Reading::Byte(image.byte(addr)),
        DecodeRule::RawWord | DecodeRule::Identity => Reading::Word(image.word(addr)),
        DecodeRule::LinearFloat => {
            let raw = image.word(addr);
            debug!("Linear-float raw value from 0x{command:02X}: 0x{raw:04X}");
            Reading::Real(decode_linear_float(u32::from(raw)))
        }
        DecodeRule::ModeLinear => {
            let raw = image.word(addr);
            let mode = image.byte(usize::from(mode_address(command)));
            Reading::Scaled(decode_mode_linear(raw, mode)?)
        }
        DecodeRule::Status { offset } => {
            let value = image.word(usize::from(offset));
            debug!("status 0x{command:02X} -> 0x{value:04X} (from offset 0x{offset:02X})");
            Reading::Word(value)
        }
        DecodeRule::Ascii { offset, len } => Reading::Text(read_ascii_field(image, offset, len)?),
    };
    Ok(reading)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(x: u32, m: u32, b: u32, r: u32) -> u32 {
        x | (m << 11) | (b << 16) | (r << 27)
    }

    #[test]
    fn test_linear_float_zero() {
        assert_eq!(decode_linear_float(pack(0, 0, 0, 0)), 0.0);
    }

    #[test]
    fn test_linear_float_unit_coefficient() {
        assert_eq!(decode_linear_float(pack(100, 1, 0, 0)), 100.0);
    }

    #[test]
    fn test_linear_float_exponent_and_offset() {
        assert_eq!(decode_linear_float(pack(100, 1, 0, 2)), 400.0);
        assert_eq!(decode_linear_float(pack(10, 3, 5, 2)), 4.0 * 35.0);
    }

    #[test]
    fn test_linear_float_field_limits() {
        let fields = LinearFields::unpack(u32::MAX);
        assert_eq!(fields, LinearFields { x: 0x7FF, m: 0x1F, b: 0x7FF, r: 0x1F });
    }

    #[test]
    fn test_linear_float_from_word_has_no_offset_or_exponent() {
        let fields = LinearFields::unpack(u32::from(0xFFFFu16));
        assert_eq!(fields.b, 0);
        assert_eq!(fields.r, 0);
        assert_eq!(fields.value(), 31.0 * 2047.0);
    }

    #[test]
    fn test_mode_linear_reference_value() {
        let params = ModeParams { m: 2, b: 3, r: 1 };
        assert_eq!(scale_mode_linear(200, params).unwrap(), 4030);
    }

    #[test]
    fn test_mode_byte_coefficient_and_exponent_share_bits() {
        // Intentional: coefficient and exponent are both read from bits 3-7.
        let params = ModeParams::from_mode_byte(0b0000_1011);
        assert_eq!(params, ModeParams { m: 1, b: 3, r: 1 });
        assert_eq!(decode_mode_linear(200, 0b0000_1011).unwrap(), (200 + 3) * 10);
    }

    #[test]
    fn test_mode_linear_zero_mode() {
        // m=0, R=0 leaves only the offset
        assert_eq!(decode_mode_linear(1234, 0x05).unwrap(), 5);
        assert_eq!(decode_mode_linear(1234, 0x00).unwrap(), 0);
    }

    #[test]
    fn test_mode_linear_largest_mode_fits() {
        let expected = (31i128 * 65535 + 7) * 10i128.pow(31);
        assert_eq!(decode_mode_linear(u16::MAX, 0xFF).unwrap(), expected);
    }

    #[test]
    fn test_decode_ascii_strips_nonprintable() {
        assert_eq!(decode_ascii(&[0, 68, 69, 76, 84, 65, 0]), "DELTA");
        assert_eq!(decode_ascii(&[0x7F, 0x1F, 0xFF]), "");
        assert_eq!(decode_ascii(&[b' ', b'~']), " ~");
    }

    #[test]
    fn test_read_ascii_field_out_of_range() {
        let image = RegisterImage::new();
        assert!(matches!(
            read_ascii_field(&image, 0xF8, 16),
            Err(PmbusError::FieldOutOfRange { offset: 0xF8, len: 16 })
        ));
        assert_eq!(read_ascii_field(&image, 0xF0, 16).unwrap(), "");
    }

    #[test]
    fn test_mode_address() {
        assert_eq!(mode_address(0x8B), 0x0B);
        assert_eq!(mode_address(0x97), 0x17);
    }

    #[test]
    fn test_status_rule_ignores_command_address() {
        let mut image = RegisterImage::new();
        image.set(0x00, 0x42);
        image.set(0x01, 0x08);
        image.set(0x79, 0xFF);
        let reading = decode(&image, 0x79, DecodeRule::Status { offset: 0x00 }).unwrap();
        assert_eq!(reading, Reading::Word(0x0842));
    }

    #[test]
    fn test_decode_is_repeatable() {
        let image = RegisterImage::from_bytes(&(0..=255u8).collect::<Vec<_>>());
        for rule in [DecodeRule::LinearFloat, DecodeRule::ModeLinear, DecodeRule::Identity] {
            assert_eq!(decode(&image, 0x8B, rule).unwrap(), decode(&image, 0x8B, rule).unwrap());
        }
    }
}
