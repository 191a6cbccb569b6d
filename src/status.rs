//! PMBus status register bit definitions
//!
//! Flag views over the seven status registers. `STATUS_WORD` is 16 bits; the
//! others are single bytes and are taken from the low byte of their mirrored
//! word. Bit assignments follow PMBus Part II, section 17.

use crate::catalog::Quantity;
use bitflags::{bitflags, Flags};

bitflags! {
    /// STATUS_WORD
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusWord: u16 {
        const VOUT = 0x8000;
        const IOUT_POUT = 0x4000;
        const INPUT = 0x2000;
        const MFR_SPECIFIC = 0x1000;
        const POWER_GOOD_NEGATED = 0x0800;
        const FANS = 0x0400;
        const OTHER = 0x0200;
        const UNKNOWN = 0x0100;
        const BUSY = 0x0080;
        const OFF = 0x0040;
        const VOUT_OV_FAULT = 0x0020;
        const IOUT_OC_FAULT = 0x0010;
        const VIN_UV_FAULT = 0x0008;
        const TEMPERATURE = 0x0004;
        const CML = 0x0002;
        const NONE_OF_THE_ABOVE = 0x0001;
    }
}

bitflags! {
    /// STATUS_VOUT
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusVout: u8 {
        const VOUT_OV_FAULT = 0x80;
        const VOUT_OV_WARNING = 0x40;
        const VOUT_UV_WARNING = 0x20;
        const VOUT_UV_FAULT = 0x10;
        const VOUT_MAX_MIN_WARNING = 0x08;
        const TON_MAX_FAULT = 0x04;
        const TOFF_MAX_WARNING = 0x02;
        const VOUT_TRACKING_ERROR = 0x01;
    }
}

bitflags! {
    /// STATUS_IOUT
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusIout: u8 {
        const IOUT_OC_FAULT = 0x80;
        const IOUT_OC_LV_FAULT = 0x40;
        const IOUT_OC_WARNING = 0x20;
        const IOUT_UC_FAULT = 0x10;
        const CURRENT_SHARE_FAULT = 0x08;
        const POWER_LIMITING = 0x04;
        const POUT_OP_FAULT = 0x02;
        const POUT_OP_WARNING = 0x01;
    }
}

bitflags! {
    /// STATUS_INPUT
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusInput: u8 {
        const VIN_OV_FAULT = 0x80;
        const VIN_OV_WARNING = 0x40;
        const VIN_UV_WARNING = 0x20;
        const VIN_UV_FAULT = 0x10;
        const UNIT_OFF_LOW_INPUT = 0x08;
        const IIN_OC_FAULT = 0x04;
        const IIN_OC_WARNING = 0x02;
        const PIN_OP_WARNING = 0x01;
    }
}

bitflags! {
    /// STATUS_TEMPERATURE
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusTemperature: u8 {
        const OT_FAULT = 0x80;
        const OT_WARNING = 0x40;
        const UT_WARNING = 0x20;
        const UT_FAULT = 0x10;
    }
}

bitflags! {
    /// STATUS_CML
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusCml: u8 {
        const INVALID_COMMAND = 0x80;
        const INVALID_DATA = 0x40;
        const PEC_FAILED = 0x20;
        const MEMORY_FAULT = 0x10;
        const PROCESSOR_FAULT = 0x08;
        const OTHER_COMMUNICATION_FAULT = 0x02;
        const OTHER_MEMORY_LOGIC_FAULT = 0x01;
    }
}

bitflags! {
    /// STATUS_OTHER
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusOther: u8 {
        const INPUT_A_FUSE_FAULT = 0x20;
        const INPUT_B_FUSE_FAULT = 0x10;
        const INPUT_A_ORING_FAULT = 0x08;
        const INPUT_B_ORING_FAULT = 0x04;
        const OUTPUT_ORING_FAULT = 0x02;
        const FIRST_TO_ASSERT_SMBALERT = 0x01;
    }
}

fn flag_names<F: Flags>(flags: F) -> Vec<&'static str> {
    flags.iter_names().map(|(name, _)| name).collect()
}

/// Names of the flags set in a status register value.
///
/// Returns an empty list for quantities that are not status registers.
pub fn active_flags(quantity: Quantity, value: u16) -> Vec<&'static str> {
    let [low, _] = value.to_le_bytes();
    match quantity {
        Quantity::StatusWord => flag_names(StatusWord::from_bits_truncate(value)),
        Quantity::StatusVout => flag_names(StatusVout::from_bits_truncate(low)),
        Quantity::StatusIout => flag_names(StatusIout::from_bits_truncate(low)),
        Quantity::StatusInput => flag_names(StatusInput::from_bits_truncate(low)),
        Quantity::StatusTemperature => flag_names(StatusTemperature::from_bits_truncate(low)),
        Quantity::StatusCml => flag_names(StatusCml::from_bits_truncate(low)),
        Quantity::StatusOther => flag_names(StatusOther::from_bits_truncate(low)),
        _ => Vec::new(),
    }
}
