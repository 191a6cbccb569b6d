//! # Utility Modules
//!
//! Common helpers used throughout the pmbus-rs crate: hex parsing and
//! formatting for capture files, and debug logging of register contents.

pub mod hex;
pub mod logging;

pub use self::hex::{ascii_column, format_hex_compact, hex_byte, parse_hex_offset, HexError};
pub use self::logging::{log_image_head, log_register_hex};
