//! PMBus Protocol Constants
//!
//! This module defines the command codes, default bus settings and the
//! capture-layout offsets used by the register decoder. Command codes follow
//! the PMBus 1.2 command table as implemented by Delta Q54SG series supplies.

/// Default I2C address of a Delta PSU
pub const DEFAULT_I2C_ADDRESS: u8 = 0x60;

/// Default I2C bus number
pub const DEFAULT_BUS: u8 = 1;

/// Number of addressable registers in the captured image
pub const REGISTER_SPACE: usize = 256;

/// Distance between a telemetry command and its mode byte
pub const MODE_BYTE_DISTANCE: u8 = 0x80;

// ----------------------------------------------------------------------------
// Page commands for multi-page devices
// ----------------------------------------------------------------------------

pub const CMD_PAGE: u8 = 0x00;
pub const CMD_PAGE_READ: u8 = 0x01;
pub const CMD_PAGE_WRITE: u8 = 0x02;
pub const CMD_PAGE_READ_BACK: u8 = 0x03;
pub const CMD_PAGE_WRITE_BACK: u8 = 0x04;

// ----------------------------------------------------------------------------
// Operation and configuration
// ----------------------------------------------------------------------------

pub const CMD_OPERATION: u8 = 0x01;
pub const CMD_ON_OFF_CONFIG: u8 = 0x02;
pub const CMD_WRITE_PROTECT: u8 = 0x10;
pub const CMD_CAPABILITY: u8 = 0x19;
pub const CMD_VOUT_MODE: u8 = 0x20;
pub const CMD_VOUT_COMMAND: u8 = 0x21;
pub const CMD_VOUT_MAX: u8 = 0x24;

// Frequency and input thresholds
pub const CMD_FREQUENCY_SWITCH: u8 = 0x33;
pub const CMD_VIN_ON: u8 = 0x35;
pub const CMD_VIN_OFF: u8 = 0x36;

// ----------------------------------------------------------------------------
// Fault and warning limits
// ----------------------------------------------------------------------------

pub const CMD_IOUT_OC_FAULT_LIMIT: u8 = 0x46;
pub const CMD_IOUT_OC_WARN_LIMIT: u8 = 0x4A;
pub const CMD_OT_FAULT_LIMIT: u8 = 0x4F;
pub const CMD_OT_WARN_LIMIT: u8 = 0x51;
pub const CMD_UT_FAULT_LIMIT: u8 = 0x54;
pub const CMD_UT_WARN_LIMIT: u8 = 0x56;
pub const CMD_VIN_UV_FAULT_LIMIT: u8 = 0x59;
pub const CMD_VIN_UV_WARN_LIMIT: u8 = 0x5B;
pub const CMD_VIN_OV_FAULT_LIMIT: u8 = 0x55;
pub const CMD_VIN_OV_WARN_LIMIT: u8 = 0x57;
pub const CMD_IIN_OC_FAULT_LIMIT: u8 = 0x5F;
pub const CMD_IIN_OC_WARN_LIMIT: u8 = 0x61;

// ----------------------------------------------------------------------------
// Power good and timing
// ----------------------------------------------------------------------------

// Delta's table shares 0x60/0x61 between the power-good and turn-on commands.
pub const CMD_POWER_GOOD_ON: u8 = 0x5E;
pub const CMD_POWER_GOOD_OFF: u8 = 0x60;
pub const CMD_TON_DELAY: u8 = 0x60;
pub const CMD_TON_RISE: u8 = 0x61;
pub const CMD_TOFF_DELAY: u8 = 0x64;
pub const CMD_TOFF_FALL: u8 = 0x65;

// ----------------------------------------------------------------------------
// Status registers
// ----------------------------------------------------------------------------

pub const CMD_STATUS_WORD: u8 = 0x79;
pub const CMD_STATUS_VOUT: u8 = 0x7A;
pub const CMD_STATUS_IOUT: u8 = 0x7B;
pub const CMD_STATUS_INPUT: u8 = 0x7C;
pub const CMD_STATUS_TEMPERATURE: u8 = 0x7D;
pub const CMD_STATUS_CML: u8 = 0x7E;
pub const CMD_STATUS_OTHER: u8 = 0x7F;

/// Status registers are mirrored into consecutive words at the start of the
/// capture region, in this order.
pub const STATUS_MIRROR: [(u8, u8); 7] = [
    (CMD_STATUS_WORD, 0x00),
    (CMD_STATUS_VOUT, 0x02),
    (CMD_STATUS_IOUT, 0x04),
    (CMD_STATUS_INPUT, 0x06),
    (CMD_STATUS_TEMPERATURE, 0x08),
    (CMD_STATUS_CML, 0x0A),
    (CMD_STATUS_OTHER, 0x0C),
];

// ----------------------------------------------------------------------------
// Telemetry
// ----------------------------------------------------------------------------

pub const CMD_READ_VIN: u8 = 0x88;
pub const CMD_READ_VOUT: u8 = 0x8B;
pub const CMD_READ_IOUT: u8 = 0x8C;
pub const CMD_READ_TEMPERATURE_1: u8 = 0x8D;
pub const CMD_READ_TEMPERATURE_2: u8 = 0x8E;
pub const CMD_READ_TEMPERATURE_3: u8 = 0x8F;
pub const CMD_READ_FAN_SPEED_1: u8 = 0x90;
pub const CMD_READ_FAN_SPEED_2: u8 = 0x91;
pub const CMD_READ_FAN_SPEED_3: u8 = 0x92;
pub const CMD_READ_FAN_SPEED_4: u8 = 0x93;
pub const CMD_READ_DUTY_CYCLE: u8 = 0x94;
pub const CMD_READ_FREQUENCY: u8 = 0x95;
pub const CMD_READ_POUT: u8 = 0x96;
pub const CMD_READ_PIN: u8 = 0x97;

// ----------------------------------------------------------------------------
// Manufacturer information
// ----------------------------------------------------------------------------

pub const CMD_PMBUS_REVISION: u8 = 0x98;
pub const CMD_MFR_ID: u8 = 0x99;
pub const CMD_MFR_MODEL: u8 = 0x9A;
pub const CMD_MFR_REVISION: u8 = 0x9B;
pub const CMD_MFR_LOCATION: u8 = 0x9C;
pub const CMD_MFR_DATE: u8 = 0x9D;
pub const CMD_MFR_SERIAL: u8 = 0x9E;

/// Manufacturer ID ("DELTA") location in the reference capture
pub const MFR_ID_OFFSET: u8 = 0x0C;
pub const MFR_ID_LEN: u8 = 5;

/// Model number ("DPS-800AB-3") location in the reference capture
pub const MFR_MODEL_OFFSET: u8 = 0x10;
pub const MFR_MODEL_LEN: u8 = 11;

/// Serial number location in the reference capture
pub const MFR_SERIAL_OFFSET: u8 = 0x30;
pub const MFR_SERIAL_LEN: u8 = 12;

/// Length of string fields read at their own command address
pub const DEFAULT_STRING_LEN: u8 = 16;

/// Placeholder for a string field that could not be decoded
pub const NOT_AVAILABLE: &str = "Not Available";
