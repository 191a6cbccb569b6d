//! # Hex Parsing and Formatting Utilities
//!
//! Helpers shared by the capture-file reader/writer and the debug logging of
//! register contents. Capture files use bare hexadecimal (no `0x` prefix) for
//! both line offsets and byte values.
//!
//! ```rust
//! use pmbus_rs::util::hex::{format_hex_compact, hex_byte, parse_hex_offset};
//!
//! assert_eq!(hex_byte("4c").unwrap(), 0x4C);
//! assert_eq!(parse_hex_offset("0x30").unwrap(), 0x30);
//! assert_eq!(format_hex_compact(&[0x44, 0x45]), "44 45");
//! ```

use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Invalid hex character: {0}")]
    InvalidCharacter(char),

    #[error("Expected two hex digits, got {0}")]
    BadLength(usize),

    #[error("Empty hex string")]
    EmptyString,

    #[error("Hex value out of range: {0}")]
    OutOfRange(String),
}

/// Convert a two-digit hex byte string to u8
pub fn hex_byte(hex: &str) -> Result<u8, HexError> {
    if hex.len() != 2 {
        return Err(HexError::BadLength(hex.len()));
    }

    let mut out = [0u8; 1];
    hex::decode_to_slice(hex, &mut out).map_err(|_| {
        HexError::InvalidCharacter(hex.chars().find(|c| !c.is_ascii_hexdigit()).unwrap_or('?'))
    })?;
    Ok(out[0])
}

/// Parse a hexadecimal offset, with or without a `0x` prefix
pub fn parse_hex_offset(text: &str) -> Result<usize, HexError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    if digits.is_empty() {
        return Err(HexError::EmptyString);
    }
    if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(HexError::InvalidCharacter(c));
    }

    usize::from_str_radix(digits, 16).map_err(|_| HexError::OutOfRange(text.to_string()))
}

/// Format bytes for compact display (useful for logs)
///
/// Formats data as "44 45 4c" with spaces between bytes.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| hex::encode([*b]))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render bytes the way i2cdump prints its ASCII column
///
/// Printable characters other than space pass through; everything else
/// becomes `.` so the column stays a single whitespace-free token.
pub fn ascii_column(data: &[u8]) -> String {
    data.iter()
        .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_byte() {
        assert_eq!(hex_byte("44").unwrap(), 0x44);
        assert_eq!(hex_byte("FF").unwrap(), 0xFF);
        assert_eq!(hex_byte("ab").unwrap(), 0xAB);
    }

    #[test]
    fn test_hex_byte_errors() {
        assert_eq!(hex_byte("1"), Err(HexError::BadLength(1)));
        assert_eq!(hex_byte("123"), Err(HexError::BadLength(3)));
        assert_eq!(hex_byte("G1"), Err(HexError::InvalidCharacter('G')));
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_hex_offset("00").unwrap(), 0);
        assert_eq!(parse_hex_offset("f0").unwrap(), 0xF0);
        assert_eq!(parse_hex_offset("0x1A").unwrap(), 0x1A);
        assert_eq!(parse_hex_offset("100").unwrap(), 0x100);
        assert_eq!(parse_hex_offset(""), Err(HexError::EmptyString));
        assert_eq!(parse_hex_offset("0x"), Err(HexError::EmptyString));
        assert_eq!(parse_hex_offset("1z"), Err(HexError::InvalidCharacter('z')));
    }

    #[test]
    fn test_format_compact() {
        let data = vec![0x44, 0x45, 0x4c, 0x54, 0x41];
        assert_eq!(format_hex_compact(&data), "44 45 4c 54 41");
        assert_eq!(format_hex_compact(&[]), "");
    }

    #[test]
    fn test_ascii_column() {
        assert_eq!(ascii_column(b"DELTA"), "DELTA");
        assert_eq!(ascii_column(&[0x00, b' ', 0x41, 0xFF]), "..A.");
    }
}
