//! Capture-file register source
//!
//! A capture is a text dump of the register space in the layout produced by
//! `i2cdump`:
//!
//! ```text
//!      0  1  2  3  4  5  6  7  8  9  a  b  c  d  e  f    0123456789abcdef
//! 00: 44 45 4c 54 41 00 00 00 00 00 00 00 00 00 00 00    DELTA...........
//! ```
//!
//! The first line is a header and is always skipped. Every other line is
//! `<hex offset>: <hex byte> <hex byte> ...`; byte `i` of the line lands at
//! `offset + i`. Byte tokens end at the first token that is not two word
//! characters followed by whitespace or end of line, which drops the trailing
//! ASCII column. Lines that do not fit the shape are skipped, later lines
//! overwrite earlier ones, and `XX` marks an unreadable register that stays
//! unset.

use crate::constants::REGISTER_SPACE;
use crate::error::PmbusError;
use crate::image::RegisterImage;
use crate::source::RegisterSource;
use crate::util::hex::{ascii_column, hex_byte, parse_hex_offset};
use log::{debug, info};
use nom::{
    branch::alt,
    bytes::complete::{take_while1, take_while_m_n},
    character::complete::{char, space1},
    combinator::eof,
    multi::many0,
    sequence::terminated,
    IResult,
};
use std::path::{Path, PathBuf};

/// One parsed capture line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureLine {
    pub offset: usize,
    /// Byte values by position; `None` for `XX` placeholders
    pub bytes: Vec<Option<u8>>,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn offset_field(input: &str) -> IResult<&str, &str> {
    terminated(take_while1(is_word_char), char(':'))(input)
}

fn byte_token(input: &str) -> IResult<&str, &str> {
    terminated(take_while_m_n(2, 2, is_word_char), alt((space1, eof)))(input)
}

fn line_tokens(input: &str) -> IResult<&str, (&str, Vec<&str>)> {
    let (input, offset) = offset_field(input)?;
    let (input, _) = space1(input)?;
    let (input, tokens) = many0(byte_token)(input)?;
    Ok((input, (offset, tokens)))
}

/// Parses one (already trimmed) capture line.
pub fn parse_capture_line(line: &str) -> Result<CaptureLine, PmbusError> {
    let (_, (offset_text, tokens)) =
        line_tokens(line).map_err(|_| PmbusError::CaptureParse(line.to_string()))?;

    let offset = parse_hex_offset(offset_text)
        .map_err(|e| PmbusError::CaptureParse(format!("{line}: {e}")))?;
    if offset >= REGISTER_SPACE {
        return Err(PmbusError::CaptureParse(format!(
            "{line}: offset 0x{offset:X} outside register space"
        )));
    }

    let mut bytes = Vec::with_capacity(tokens.len());
    for token in tokens {
        if token.eq_ignore_ascii_case("xx") {
            bytes.push(None);
            continue;
        }
        match hex_byte(token) {
            Ok(value) => bytes.push(Some(value)),
            Err(e) => {
                debug!("stopping at token {token:?} in line {line:?}: {e}");
                break;
            }
        }
    }

    Ok(CaptureLine { offset, bytes })
}

/// Parses capture text into a register image.
///
/// Never fails: malformed lines are skipped and logged.
pub fn parse_capture(text: &str) -> RegisterImage {
    let mut image = RegisterImage::new();
    let mut lines = text.lines();

    match lines.next() {
        Some(header) => debug!("First line (header): {}", header.trim()),
        None => {
            debug!("capture is empty");
            return image;
        }
    }

    let mut skipped = 0usize;
    for (line_num, raw) in lines.enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let parsed = match parse_capture_line(line) {
            Ok(parsed) => parsed,
            Err(e) => {
                skipped += 1;
                debug!("Line {} did not match expected format: {e}", line_num + 1);
                continue;
            }
        };

        for (i, value) in parsed.bytes.iter().enumerate() {
            let Some(value) = value else { continue };
            let Some(addr) = parsed.offset.checked_add(i) else { break };
            if !image.set(addr, *value) {
                debug!("Line {}: address 0x{addr:X} outside register space", line_num + 1);
            }
        }
        crate::util::log_register_hex(
            &format!("line {}", line_num + 1),
            parsed.offset,
            &parsed.bytes.iter().map(|b| b.unwrap_or(0)).collect::<Vec<_>>(),
        );
    }

    info!(
        "Loaded {} bytes from capture ({} lines skipped)",
        image.populated(),
        skipped
    );
    crate::util::log_image_head(&image, 10);
    image
}

/// Renders an image in i2cdump layout, readable by [`parse_capture`].
pub fn write_capture(image: &RegisterImage) -> String {
    let mut out = String::from("    ");
    for col in 0..16 {
        out.push_str(&format!(" {col:2x}"));
    }
    out.push_str("    0123456789abcdef\n");

    for (row, chunk) in image.as_bytes().chunks(16).enumerate() {
        let base = row * 16;
        out.push_str(&format!("{base:02x}:"));
        for (col, value) in chunk.iter().enumerate() {
            if image.is_set(base + col) {
                out.push_str(&format!(" {value:02x}"));
            } else {
                out.push_str(" XX");
            }
        }
        out.push_str("    ");
        out.push_str(&ascii_column(chunk));
        out.push('\n');
    }
    out
}

/// Register source backed by a capture file on disk.
#[derive(Debug, Clone)]
pub struct CaptureFile {
    path: PathBuf,
}

impl CaptureFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        CaptureFile {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegisterSource for CaptureFile {
    fn populate(&mut self) -> Result<RegisterImage, PmbusError> {
        debug!("Loading capture file: {}", self.path.display());
        let text = std::fs::read_to_string(&self.path)?;
        Ok(parse_capture(&text))
    }

    fn describe(&self) -> String {
        format!("capture file {}", self.path.display())
    }
}

/// Register source backed by capture text already in memory.
#[derive(Debug, Clone)]
pub struct CaptureText {
    text: String,
}

impl CaptureText {
    pub fn new(text: impl Into<String>) -> Self {
        CaptureText { text: text.into() }
    }
}

impl RegisterSource for CaptureText {
    fn populate(&mut self) -> Result<RegisterImage, PmbusError> {
        Ok(parse_capture(&self.text))
    }

    fn describe(&self) -> String {
        format!("capture text ({} bytes)", self.text.len())
    }
}
