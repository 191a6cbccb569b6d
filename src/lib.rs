//! # pmbus-rs - A Rust Crate for Decoding PMBus Power-Supply Registers
//!
//! The pmbus-rs crate reads the 256-byte command space of a PMBus power supply,
//! either live over I2C or from an `i2cdump`-style capture file, and decodes it
//! into a structured snapshot of manufacturer data, telemetry, status, fault
//! limits and timing parameters.
//!
//! ## Features
//!
//! - Populate a register image from a live device or a capture file
//! - Decode linear-float, mode-linear, raw and ASCII registers
//! - Resolve PMBus status bits to named flags
//! - Render snapshots as text or JSON
//! - Write a populated image back out as a capture file
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! pmbus-rs = "0.1.0"
//! ```
//!
//! ```rust
//! use pmbus_rs::{read_capture_text, ReadOutcome};
//!
//! let outcome = read_capture_text("header\n0c: 44 45 4c 54 41\n", 0x60);
//! match outcome {
//!     ReadOutcome::Complete(report) => {
//!         assert_eq!(report.snapshot.manufacturer_info.id, "DELTA");
//!         assert_eq!(report.i2c_address, "0x60");
//!     }
//!     ReadOutcome::Failed { error } => panic!("{error}"),
//! }
//! ```

pub mod catalog;
pub mod constants;
pub mod decode;
pub mod error;
pub mod image;
pub mod logging;
pub mod present;
pub mod session;
pub mod snapshot;
pub mod source;
pub mod status;
pub mod util;

pub use crate::error::PmbusError;
pub use crate::logging::{init_logger_with_level, log_error, log_info};

// Core types
pub use catalog::{by_name, descriptor, Group, Quantity, RegisterDescriptor};
pub use decode::{decode, DecodeRule, Reading};
pub use image::RegisterImage;
pub use session::{parse_address, Session, SessionConfig};
pub use snapshot::{assemble, ReadOutcome, Report, Snapshot};

// Register sources
pub use source::{
    parse_capture, write_capture, CaptureFile, LiveSource, MockBus, RegisterBus, RegisterSource,
};

#[cfg(feature = "raspberry-pi")]
pub use source::RppalBus;

// Presentation
pub use present::{render, render_json, render_text, Format};

/// Read a capture file and decode it into a report.
///
/// # Arguments
/// * `path` - Capture file in `i2cdump` layout
/// * `address` - I2C address recorded in the report
///
/// # Returns
/// * `Ok(ReadOutcome)` - Decoded report, or the error that stopped assembly
/// * `Err(PmbusError)` - The file could not be read
pub fn read_capture(
    path: impl AsRef<std::path::Path>,
    address: u8,
) -> Result<ReadOutcome, PmbusError> {
    let session = Session::from_capture(SessionConfig { address, ..Default::default() }, path)?;
    Ok(session.read_outcome())
}

/// Decode capture text already in memory into a report.
///
/// # Arguments
/// * `text` - Capture contents, header line included
/// * `address` - I2C address recorded in the report
pub fn read_capture_text(text: &str, address: u8) -> ReadOutcome {
    let image = parse_capture(text);
    snapshot::read_outcome(&image, address, chrono::Local::now().to_rfc3339())
}
