//! Register sources
//!
//! A [`RegisterSource`] fills a [`RegisterImage`] exactly once. Two producers
//! exist: a live PMBus transport that reads all 256 command codes one byte at
//! a time, and a capture-file parser for offline analysis of a previously
//! dumped device. The snapshot assembler only ever sees the resulting image.

pub mod capture;
pub mod live;

#[cfg(feature = "raspberry-pi")]
pub mod rpi;

use crate::error::PmbusError;
use crate::image::RegisterImage;

pub use capture::{
    parse_capture, parse_capture_line, write_capture, CaptureFile, CaptureLine, CaptureText,
};
pub use live::{LiveSource, MockBus, RegisterBus};

#[cfg(feature = "raspberry-pi")]
pub use rpi::RppalBus;

/// Capability to produce a populated register image.
pub trait RegisterSource {
    /// Reads the full register space into a fresh image.
    fn populate(&mut self) -> Result<RegisterImage, PmbusError>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}
