//! Live PMBus register source
//!
//! Reads the full command space from a device, one SMBus "read byte data"
//! transaction per command code. A device may NACK undefined commands, so a
//! failed read stores a zero byte and population carries on.

use crate::constants::REGISTER_SPACE;
use crate::error::PmbusError;
use crate::image::RegisterImage;
use crate::source::RegisterSource;
use log::{debug, info};
use std::collections::{HashMap, HashSet};

/// Single-register access to a bus with addressable devices.
pub trait RegisterBus {
    /// Reads one byte from `command` on the device at `address`.
    fn read_byte_data(&mut self, address: u8, command: u8) -> Result<u8, PmbusError>;

    /// Writes one byte to `command` on the device at `address`.
    fn write_byte_data(&mut self, address: u8, command: u8, value: u8) -> Result<(), PmbusError>;

    /// Writes a little-endian word to `command` on the device at `address`.
    fn write_word_data(&mut self, address: u8, command: u8, value: u16) -> Result<(), PmbusError>;
}

impl<B: RegisterBus + ?Sized> RegisterBus for Box<B> {
    fn read_byte_data(&mut self, address: u8, command: u8) -> Result<u8, PmbusError> {
        (**self).read_byte_data(address, command)
    }

    fn write_byte_data(&mut self, address: u8, command: u8, value: u8) -> Result<(), PmbusError> {
        (**self).write_byte_data(address, command, value)
    }

    fn write_word_data(&mut self, address: u8, command: u8, value: u16) -> Result<(), PmbusError> {
        (**self).write_word_data(address, command, value)
    }
}

/// Register source that reads a device over a [`RegisterBus`].
pub struct LiveSource<B: RegisterBus> {
    bus: B,
    address: u8,
}

impl<B: RegisterBus> LiveSource<B> {
    pub fn new(bus: B, address: u8) -> Self {
        LiveSource { bus, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Returns the bus, e.g. to keep it for later writes.
    pub fn into_bus(self) -> B {
        self.bus
    }
}

impl<B: RegisterBus> RegisterSource for LiveSource<B> {
    fn populate(&mut self) -> Result<RegisterImage, PmbusError> {
        debug!("Loading SMBus data from address 0x{:02X}", self.address);

        let mut image = RegisterImage::new();
        let mut failed = 0usize;
        for command in 0..=u8::MAX {
            let value = match self.bus.read_byte_data(self.address, command) {
                Ok(value) => value,
                Err(e) => {
                    failed += 1;
                    debug!("read 0x{command:02X} failed, using 0: {e}");
                    0
                }
            };
            image.set(usize::from(command), value);
        }

        info!(
            "Loaded {} bytes from SMBus ({} reads failed)",
            REGISTER_SPACE - failed,
            failed
        );
        crate::util::log_image_head(&image, 10);
        Ok(image)
    }

    fn describe(&self) -> String {
        format!("PMBus device 0x{:02X}", self.address)
    }
}

/// In-memory bus for tests and demos.
///
/// Registers not loaded with [`MockBus::set_register`] NACK, like undefined
/// commands on a real supply.
#[derive(Debug, Default, Clone)]
pub struct MockBus {
    devices: HashMap<u8, HashMap<u8, u8>>,
    failing: HashSet<(u8, u8)>,
    writes: Vec<(u8, u8, u16)>,
    reads: usize,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a register value for the device at `address`.
    pub fn set_register(&mut self, address: u8, command: u8, value: u8) {
        self.devices.entry(address).or_default().insert(command, value);
    }

    /// Loads consecutive registers starting at `command`.
    pub fn set_registers(&mut self, address: u8, command: u8, values: &[u8]) {
        for (i, &value) in values.iter().enumerate() {
            self.set_register(address, command.wrapping_add(i as u8), value);
        }
    }

    /// Makes reads of one register fail even if it holds a value.
    pub fn fail_register(&mut self, address: u8, command: u8) {
        self.failing.insert((address, command));
    }

    /// Writes recorded so far as `(command, address, value)`.
    pub fn writes(&self) -> &[(u8, u8, u16)] {
        &self.writes
    }

    /// Number of read transactions issued.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl RegisterBus for MockBus {
    fn read_byte_data(&mut self, address: u8, command: u8) -> Result<u8, PmbusError> {
        self.reads += 1;
        if self.failing.contains(&(address, command)) {
            return Err(PmbusError::Transport(format!(
                "NACK from 0x{address:02X} on 0x{command:02X}"
            )));
        }
        self.devices
            .get(&address)
            .and_then(|regs| regs.get(&command))
            .copied()
            .ok_or_else(|| {
                PmbusError::Transport(format!("NACK from 0x{address:02X} on 0x{command:02X}"))
            })
    }

    fn write_byte_data(&mut self, address: u8, command: u8, value: u8) -> Result<(), PmbusError> {
        self.writes.push((command, address, u16::from(value)));
        self.set_register(address, command, value);
        Ok(())
    }

    fn write_word_data(&mut self, address: u8, command: u8, value: u16) -> Result<(), PmbusError> {
        self.writes.push((command, address, value));
        let [lo, hi] = value.to_le_bytes();
        self.set_registers(address, command, &[lo, hi]);
        Ok(())
    }
}
