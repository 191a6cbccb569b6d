//! Register Catalog
//!
//! The closed table of every quantity the decoder understands: where it lives
//! in the register image, how it is decoded, and the unit it is reported in.
//! Anything not listed here is never interpreted.
//!
//! ```rust
//! use pmbus_rs::catalog::{descriptor, by_name, Quantity};
//! use pmbus_rs::decode::DecodeRule;
//!
//! let vout = descriptor(Quantity::OutputVoltage);
//! assert_eq!(vout.command, 0x8B);
//! assert_eq!(vout.rule, DecodeRule::ModeLinear);
//!
//! assert_eq!(by_name("fan2").map(|d| d.quantity), Some(Quantity::FanSpeed2));
//! ```

use crate::constants::*;
use crate::decode::DecodeRule;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Snapshot group a quantity is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Manufacturer,
    Telemetry,
    Status,
    FaultLimit,
    Timing,
}

/// Every cataloged quantity. Discriminants index [`CATALOG`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    MfrId,
    MfrModel,
    MfrRevision,
    MfrLocation,
    MfrDate,
    MfrSerial,
    PmbusRevision,
    InputVoltage,
    OutputVoltage,
    OutputCurrent,
    Temperature1,
    Temperature2,
    Temperature3,
    FanSpeed1,
    FanSpeed2,
    FanSpeed3,
    FanSpeed4,
    DutyCycle,
    SwitchingFrequency,
    OutputPower,
    InputPower,
    StatusWord,
    StatusVout,
    StatusIout,
    StatusInput,
    StatusTemperature,
    StatusCml,
    StatusOther,
    IoutOcFaultLimit,
    IoutOcWarnLimit,
    OtFaultLimit,
    OtWarnLimit,
    UtFaultLimit,
    UtWarnLimit,
    VinUvFaultLimit,
    VinUvWarnLimit,
    VinOvFaultLimit,
    VinOvWarnLimit,
    IinOcFaultLimit,
    IinOcWarnLimit,
    TonDelay,
    TonRise,
    ToffDelay,
    ToffFall,
}

/// How to find and decode one quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterDescriptor {
    pub quantity: Quantity,
    /// Snake-case name, also the JSON key where the snapshot uses one
    pub name: &'static str,
    /// Nominal PMBus command code
    pub command: u8,
    pub rule: DecodeRule,
    /// Display unit, empty for unitless values
    pub unit: &'static str,
    pub group: Group,
}

const fn entry(
    quantity: Quantity,
    name: &'static str,
    command: u8,
    rule: DecodeRule,
    unit: &'static str,
    group: Group,
) -> RegisterDescriptor {
    RegisterDescriptor {
        quantity,
        name,
        command,
        rule,
        unit,
        group,
    }
}

const fn ascii(offset: u8, len: u8) -> DecodeRule {
    DecodeRule::Ascii { offset, len }
}

const fn status(command: u8) -> DecodeRule {
    let mut i = 0;
    while i < STATUS_MIRROR.len() {
        if STATUS_MIRROR[i].0 == command {
            return DecodeRule::Status {
                offset: STATUS_MIRROR[i].1,
            };
        }
        i += 1;
    }
    panic!("status command missing from mirror table");
}

use DecodeRule::{Identity, LinearFloat, ModeLinear, RawByte, RawWord};
use Group::{FaultLimit, Manufacturer, Status, Telemetry, Timing};
use Quantity as Q;

/// The register catalog, in [`Quantity`] order.
pub static CATALOG: [RegisterDescriptor; 44] = [
    // Manufacturer information: ID, model and serial sit at fixed capture
    // offsets, the rest at their own command address.
    entry(Q::MfrId, "mfr_id", CMD_MFR_ID, ascii(MFR_ID_OFFSET, MFR_ID_LEN), "", Manufacturer),
    entry(
        Q::MfrModel,
        "mfr_model",
        CMD_MFR_MODEL,
        ascii(MFR_MODEL_OFFSET, MFR_MODEL_LEN),
        "",
        Manufacturer,
    ),
    entry(
        Q::MfrRevision,
        "mfr_revision",
        CMD_MFR_REVISION,
        ascii(CMD_MFR_REVISION, DEFAULT_STRING_LEN),
        "",
        Manufacturer,
    ),
    entry(
        Q::MfrLocation,
        "mfr_location",
        CMD_MFR_LOCATION,
        ascii(CMD_MFR_LOCATION, DEFAULT_STRING_LEN),
        "",
        Manufacturer,
    ),
    entry(
        Q::MfrDate,
        "mfr_date",
        CMD_MFR_DATE,
        ascii(CMD_MFR_DATE, DEFAULT_STRING_LEN),
        "",
        Manufacturer,
    ),
    entry(
        Q::MfrSerial,
        "mfr_serial",
        CMD_MFR_SERIAL,
        ascii(MFR_SERIAL_OFFSET, MFR_SERIAL_LEN),
        "",
        Manufacturer,
    ),
    entry(Q::PmbusRevision, "pmbus_revision", CMD_PMBUS_REVISION, RawByte, "", Manufacturer),
    // Telemetry
    entry(Q::InputVoltage, "input_voltage", CMD_READ_VIN, LinearFloat, "V", Telemetry),
    entry(Q::OutputVoltage, "output_voltage", CMD_READ_VOUT, ModeLinear, "V", Telemetry),
    entry(Q::OutputCurrent, "output_current", CMD_READ_IOUT, ModeLinear, "A", Telemetry),
    entry(Q::Temperature1, "temp1", CMD_READ_TEMPERATURE_1, Identity, "°C", Telemetry),
    entry(Q::Temperature2, "temp2", CMD_READ_TEMPERATURE_2, Identity, "°C", Telemetry),
    entry(Q::Temperature3, "temp3", CMD_READ_TEMPERATURE_3, Identity, "°C", Telemetry),
    entry(Q::FanSpeed1, "fan1", CMD_READ_FAN_SPEED_1, Identity, "RPM", Telemetry),
    entry(Q::FanSpeed2, "fan2", CMD_READ_FAN_SPEED_2, Identity, "RPM", Telemetry),
    entry(Q::FanSpeed3, "fan3", CMD_READ_FAN_SPEED_3, Identity, "RPM", Telemetry),
    entry(Q::FanSpeed4, "fan4", CMD_READ_FAN_SPEED_4, Identity, "RPM", Telemetry),
    entry(Q::DutyCycle, "duty_cycle", CMD_READ_DUTY_CYCLE, Identity, "%", Telemetry),
    entry(
        Q::SwitchingFrequency,
        "switching_frequency",
        CMD_READ_FREQUENCY,
        Identity,
        "Hz",
        Telemetry,
    ),
    entry(Q::OutputPower, "output_power", CMD_READ_POUT, ModeLinear, "W", Telemetry),
    entry(Q::InputPower, "input_power", CMD_READ_PIN, ModeLinear, "W", Telemetry),
    // Status, mirrored into the first seven words of the capture
    entry(Q::StatusWord, "status_word", CMD_STATUS_WORD, status(CMD_STATUS_WORD), "", Status),
    entry(Q::StatusVout, "status_vout", CMD_STATUS_VOUT, status(CMD_STATUS_VOUT), "", Status),
    entry(Q::StatusIout, "status_iout", CMD_STATUS_IOUT, status(CMD_STATUS_IOUT), "", Status),
    entry(Q::StatusInput, "status_input", CMD_STATUS_INPUT, status(CMD_STATUS_INPUT), "", Status),
    entry(
        Q::StatusTemperature,
        "status_temperature",
        CMD_STATUS_TEMPERATURE,
        status(CMD_STATUS_TEMPERATURE),
        "",
        Status,
    ),
    entry(Q::StatusCml, "status_cml", CMD_STATUS_CML, status(CMD_STATUS_CML), "", Status),
    entry(Q::StatusOther, "status_other", CMD_STATUS_OTHER, status(CMD_STATUS_OTHER), "", Status),
    // Fault and warning limits
    entry(
        Q::IoutOcFaultLimit,
        "iout_oc_fault_limit",
        CMD_IOUT_OC_FAULT_LIMIT,
        RawWord,
        "",
        FaultLimit,
    ),
    entry(
        Q::IoutOcWarnLimit,
        "iout_oc_warn_limit",
        CMD_IOUT_OC_WARN_LIMIT,
        RawWord,
        "",
        FaultLimit,
    ),
    entry(Q::OtFaultLimit, "ot_fault_limit", CMD_OT_FAULT_LIMIT, RawWord, "", FaultLimit),
    entry(Q::OtWarnLimit, "ot_warn_limit", CMD_OT_WARN_LIMIT, RawWord, "", FaultLimit),
    entry(Q::UtFaultLimit, "ut_fault_limit", CMD_UT_FAULT_LIMIT, RawWord, "", FaultLimit),
    entry(Q::UtWarnLimit, "ut_warn_limit", CMD_UT_WARN_LIMIT, RawWord, "", FaultLimit),
    entry(
        Q::VinUvFaultLimit,
        "vin_uv_fault_limit",
        CMD_VIN_UV_FAULT_LIMIT,
        RawWord,
        "",
        FaultLimit,
    ),
    entry(Q::VinUvWarnLimit, "vin_uv_warn_limit", CMD_VIN_UV_WARN_LIMIT, RawWord, "", FaultLimit),
    entry(
        Q::VinOvFaultLimit,
        "vin_ov_fault_limit",
        CMD_VIN_OV_FAULT_LIMIT,
        RawWord,
        "",
        FaultLimit,
    ),
    entry(Q::VinOvWarnLimit, "vin_ov_warn_limit", CMD_VIN_OV_WARN_LIMIT, RawWord, "", FaultLimit),
    entry(
        Q::IinOcFaultLimit,
        "iin_oc_fault_limit",
        CMD_IIN_OC_FAULT_LIMIT,
        RawWord,
        "",
        FaultLimit,
    ),
    entry(Q::IinOcWarnLimit, "iin_oc_warn_limit", CMD_IIN_OC_WARN_LIMIT, RawWord, "", FaultLimit),
    // Timing
    entry(Q::TonDelay, "ton_delay", CMD_TON_DELAY, RawWord, "", Timing),
    entry(Q::TonRise, "ton_rise", CMD_TON_RISE, RawWord, "", Timing),
    entry(Q::ToffDelay, "toff_delay", CMD_TOFF_DELAY, RawWord, "", Timing),
    entry(Q::ToffFall, "toff_fall", CMD_TOFF_FALL, RawWord, "", Timing),
];

static BY_NAME: Lazy<HashMap<&'static str, &'static RegisterDescriptor>> =
    Lazy::new(|| CATALOG.iter().map(|d| (d.name, d)).collect());

/// Looks up the descriptor for a quantity.
pub fn descriptor(quantity: Quantity) -> &'static RegisterDescriptor {
    &CATALOG[quantity as usize]
}

/// Looks up a descriptor by its snake-case name.
pub fn by_name(name: &str) -> Option<&'static RegisterDescriptor> {
    BY_NAME.get(name).copied()
}

/// All descriptors of one group, in catalog order.
pub fn group(group: Group) -> impl Iterator<Item = &'static RegisterDescriptor> {
    CATALOG.iter().filter(move |d| d.group == group)
}

impl Quantity {
    pub fn descriptor(self) -> &'static RegisterDescriptor {
        descriptor(self)
    }

    pub fn name(self) -> &'static str {
        descriptor(self).name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_quantity() {
        for (index, d) in CATALOG.iter().enumerate() {
            assert_eq!(d.quantity as usize, index, "{} out of order", d.name);
        }
    }

    #[test]
    fn test_names_are_unique() {
        assert_eq!(BY_NAME.len(), CATALOG.len());
    }

    #[test]
    fn test_status_mirror_offsets() {
        let offsets: Vec<_> = group(Group::Status)
            .map(|d| match d.rule {
                DecodeRule::Status { offset } => offset,
                other => panic!("unexpected rule {other:?}"),
            })
            .collect();
        assert_eq!(offsets, vec![0x00, 0x02, 0x04, 0x06, 0x08, 0x0A, 0x0C]);
    }

    #[test]
    fn test_manufacturer_fixed_offsets() {
        assert_eq!(descriptor(Quantity::MfrId).rule, DecodeRule::Ascii { offset: 0x0C, len: 5 });
        assert_eq!(
            descriptor(Quantity::MfrModel).rule,
            DecodeRule::Ascii { offset: 0x10, len: 11 }
        );
        assert_eq!(
            descriptor(Quantity::MfrSerial).rule,
            DecodeRule::Ascii { offset: 0x30, len: 12 }
        );
        assert_eq!(
            descriptor(Quantity::MfrDate).rule,
            DecodeRule::Ascii { offset: CMD_MFR_DATE, len: 16 }
        );
    }

    #[test]
    fn test_mode_linear_quantities() {
        let mode_linear: Vec<_> = CATALOG
            .iter()
            .filter(|d| d.rule == DecodeRule::ModeLinear)
            .map(|d| d.quantity)
            .collect();
        assert_eq!(
            mode_linear,
            vec![
                Quantity::OutputVoltage,
                Quantity::OutputCurrent,
                Quantity::OutputPower,
                Quantity::InputPower,
            ]
        );
    }

    #[test]
    fn test_only_vin_is_linear_float() {
        let linear: Vec<_> = CATALOG.iter().filter(|d| d.rule == DecodeRule::LinearFloat).collect();
        assert_eq!(linear.len(), 1);
        assert_eq!(linear[0].command, CMD_READ_VIN);
    }

    #[test]
    fn test_shared_timing_codes() {
        assert_eq!(descriptor(Quantity::TonDelay).command, CMD_POWER_GOOD_OFF);
        assert_eq!(
            descriptor(Quantity::TonRise).command,
            descriptor(Quantity::IinOcWarnLimit).command
        );
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("input_voltage").map(|d| d.command), Some(0x88));
        assert!(by_name("vout_trim").is_none());
    }
}
