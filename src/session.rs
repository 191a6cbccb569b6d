//! # Read Session
//!
//! A [`Session`] owns one populated register image and, for live reads, the
//! bus it came from. Configuration is passed in explicitly through
//! [`SessionConfig`]; nothing is read from global state.
//!
//! ```rust
//! use pmbus_rs::session::{Session, SessionConfig};
//! use pmbus_rs::source::CaptureText;
//!
//! let mut source = CaptureText::new("header\n0c: 44 45 4c 54 41\n");
//! let session = Session::from_source(SessionConfig::default(), &mut source)?;
//! assert_eq!(session.snapshot()?.manufacturer_info.id, "DELTA");
//! # Ok::<(), pmbus_rs::PmbusError>(())
//! ```

use crate::catalog::{descriptor, Quantity, RegisterDescriptor};
use crate::constants::{DEFAULT_BUS, DEFAULT_I2C_ADDRESS};
use crate::decode::{decode, Reading};
use crate::error::PmbusError;
use crate::image::RegisterImage;
use crate::snapshot::{assemble, read_outcome, ReadOutcome, Snapshot};
use crate::source::{CaptureFile, LiveSource, RegisterBus, RegisterSource};
use log::{debug, info};
use std::path::Path;

/// Bus parameters for a read session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// I2C bus number
    pub bus: u8,
    /// 7-bit device address
    pub address: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            bus: DEFAULT_BUS,
            address: DEFAULT_I2C_ADDRESS,
        }
    }
}

impl SessionConfig {
    pub fn new(bus: u8, address: u8) -> Self {
        SessionConfig { bus, address }
    }
}

/// Parses a hexadecimal I2C address such as `0x60` or `60`.
pub fn parse_address(text: &str) -> Result<u8, PmbusError> {
    let value = crate::util::hex::parse_hex_offset(text.trim())
        .map_err(|e| PmbusError::InvalidAddress(format!("{text}: {e}")))?;
    if value > 0x7F {
        return Err(PmbusError::InvalidAddress(format!(
            "{text}: outside the 7-bit range"
        )));
    }
    Ok(value as u8)
}

/// One populated register image plus the means to write back, if any.
pub struct Session {
    config: SessionConfig,
    image: RegisterImage,
    bus: Option<Box<dyn RegisterBus>>,
}

impl Session {
    /// Populates a read-only session from any register source.
    pub fn from_source(
        config: SessionConfig,
        source: &mut dyn RegisterSource,
    ) -> Result<Self, PmbusError> {
        info!("Reading registers from {}", source.describe());
        let image = source.populate()?;
        Ok(Session {
            config,
            image,
            bus: None,
        })
    }

    /// Populates a read-only session from a capture file.
    pub fn from_capture(config: SessionConfig, path: impl AsRef<Path>) -> Result<Self, PmbusError> {
        Self::from_source(config, &mut CaptureFile::new(path))
    }

    /// Populates a session from a live bus and keeps the bus for writes.
    pub fn live<B: RegisterBus + 'static>(
        config: SessionConfig,
        bus: B,
    ) -> Result<Self, PmbusError> {
        let mut source = LiveSource::new(bus, config.address);
        info!("Reading registers from {}", source.describe());
        let image = source.populate()?;
        Ok(Session {
            config,
            image,
            bus: Some(Box::new(source.into_bus())),
        })
    }

    /// Opens the Raspberry Pi I2C controller named in `config` and reads it.
    #[cfg(feature = "raspberry-pi")]
    pub fn open_live(config: SessionConfig) -> Result<Self, PmbusError> {
        let bus = crate::source::RppalBus::open(config.bus)?;
        Self::live(config, bus)
    }

    /// Live reads need a bus backend compiled in.
    #[cfg(not(feature = "raspberry-pi"))]
    pub fn open_live(_config: SessionConfig) -> Result<Self, PmbusError> {
        Err(PmbusError::LiveUnavailable)
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn image(&self) -> &RegisterImage {
        &self.image
    }

    pub fn is_live(&self) -> bool {
        self.bus.is_some()
    }

    /// Decodes one cataloged quantity.
    pub fn read(&self, quantity: Quantity) -> Result<Reading, PmbusError> {
        self.read_descriptor(descriptor(quantity))
    }

    pub fn read_descriptor(&self, d: &RegisterDescriptor) -> Result<Reading, PmbusError> {
        let reading = decode(&self.image, d.command, d.rule)?;
        debug!("{} (0x{:02X}) -> {reading:?}", d.name, d.command);
        Ok(reading)
    }

    /// Decodes the full snapshot.
    pub fn snapshot(&self) -> Result<Snapshot, PmbusError> {
        assemble(&self.image)
    }

    /// Decodes the full snapshot stamped with the current local time.
    pub fn read_outcome(&self) -> ReadOutcome {
        let timestamp = chrono::Local::now().to_rfc3339();
        read_outcome(&self.image, self.config.address, timestamp)
    }

    fn bus_mut(&mut self) -> Result<&mut Box<dyn RegisterBus>, PmbusError> {
        self.bus.as_mut().ok_or(PmbusError::ReadOnlySource)
    }

    /// Writes one byte to the device. Fails for capture-backed sessions.
    ///
    /// The image is not refreshed; open a new session to see the effect.
    pub fn write_byte(&mut self, command: u8, value: u8) -> Result<(), PmbusError> {
        let address = self.config.address;
        self.bus_mut()?.write_byte_data(address, command, value)
    }

    /// Writes one word to the device. Fails for capture-backed sessions.
    pub fn write_word(&mut self, command: u8, value: u16) -> Result<(), PmbusError> {
        let address = self.config.address;
        self.bus_mut()?.write_word_data(address, command, value)
    }
}
