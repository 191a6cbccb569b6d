//! # PMBus Error Handling
//!
//! This module defines the PmbusError enum, which represents the different error
//! types that can occur in the pmbus-rs crate.

use thiserror::Error;

/// Represents the different error types that can occur in the PMBus crate.
#[derive(Debug, Error)]
pub enum PmbusError {
    /// Indicates a failed register access on the live bus.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Indicates an I/O failure while reading a capture or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Indicates a capture line that does not have the `<offset>: <bytes>` shape.
    #[error("Error parsing capture line: {0}")]
    CaptureParse(String),

    /// Indicates an I2C address string that is not a 7-bit hexadecimal value.
    #[error("Invalid I2C address: {0}")]
    InvalidAddress(String),

    /// Indicates a bus number the transport cannot open.
    #[error("Invalid I2C bus: {0}")]
    InvalidBus(String),

    /// Indicates a write attempted on a session populated from a capture file.
    #[error("Write operations not supported in file mode")]
    ReadOnlySource,

    /// Indicates live mode was requested in a build without a bus backend.
    #[error("Live PMBus transport not available (build with `raspberry-pi` or use --file)")]
    LiveUnavailable,

    /// Indicates a quantity name that is not in the register catalog.
    #[error("Unknown quantity: {0}")]
    UnknownQuantity(String),

    /// Indicates a reading whose shape does not match what the caller asked for.
    #[error("Quantity {quantity} did not decode as {expected}")]
    RuleMismatch {
        quantity: &'static str,
        expected: &'static str,
    },

    /// Indicates a string field that runs past the end of the register space.
    #[error("Field at 0x{offset:02X} with length {len} exceeds register space")]
    FieldOutOfRange { offset: u8, len: u8 },

    /// Indicates an arithmetic overflow while scaling a value.
    #[error("Arithmetic overflow while decoding {0}")]
    Overflow(&'static str),

    /// Indicates a JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
