//! # Raspberry Pi I2C Transport
//!
//! [`RegisterBus`] implementation over the Raspberry Pi I2C controller using
//! the rppal crate. Enable with the `raspberry-pi` feature.
//!
//! ## Hardware Setup
//!
//! - Enable I2C in `/boot/config.txt` (`dtparam=i2c_arm=on`)
//! - Bus 1 is the header bus on pins 3 (SDA) and 5 (SCL)
//! - The user needs access to `/dev/i2c-<bus>` (usually the `i2c` group)
//!
//! ```rust,no_run
//! use pmbus_rs::source::{LiveSource, RegisterSource, RppalBus};
//!
//! let bus = RppalBus::open(1)?;
//! let image = LiveSource::new(bus, 0x60).populate()?;
//! # Ok::<(), pmbus_rs::PmbusError>(())
//! ```

use crate::error::PmbusError;
use crate::source::live::RegisterBus;
use rppal::i2c::I2c;

/// PMBus access through `/dev/i2c-<bus>`.
pub struct RppalBus {
    i2c: I2c,
    bus: u8,
    slave: Option<u8>,
}

impl RppalBus {
    /// Opens the I2C controller for `bus`.
    pub fn open(bus: u8) -> Result<Self, PmbusError> {
        let i2c = I2c::with_bus(bus).map_err(|e| PmbusError::InvalidBus(format!("{bus}: {e}")))?;
        Ok(RppalBus {
            i2c,
            bus,
            slave: None,
        })
    }

    pub fn bus(&self) -> u8 {
        self.bus
    }

    fn select(&mut self, address: u8) -> Result<(), PmbusError> {
        if self.slave != Some(address) {
            self.i2c
                .set_slave_address(u16::from(address))
                .map_err(|e| PmbusError::Transport(format!("select 0x{address:02X}: {e}")))?;
            self.slave = Some(address);
        }
        Ok(())
    }
}

impl RegisterBus for RppalBus {
    fn read_byte_data(&mut self, address: u8, command: u8) -> Result<u8, PmbusError> {
        self.select(address)?;
        self.i2c
            .smbus_read_byte(command)
            .map_err(|e| PmbusError::Transport(format!("read 0x{command:02X}: {e}")))
    }

    fn write_byte_data(&mut self, address: u8, command: u8, value: u8) -> Result<(), PmbusError> {
        self.select(address)?;
        self.i2c
            .smbus_write_byte(command, value)
            .map_err(|e| PmbusError::Transport(format!("write 0x{command:02X}: {e}")))
    }

    fn write_word_data(&mut self, address: u8, command: u8, value: u16) -> Result<(), PmbusError> {
        self.select(address)?;
        self.i2c
            .smbus_write_word(command, value)
            .map_err(|e| PmbusError::Transport(format!("write 0x{command:02X}: {e}")))
    }
}
