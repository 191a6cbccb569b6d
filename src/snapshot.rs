//! Snapshot assembly
//!
//! Walks the register catalog over a populated image and groups the decoded
//! values into a [`Snapshot`]. String fields that cannot be decoded become
//! `"Not Available"`; any other failure aborts the snapshot and is reported
//! as [`ReadOutcome::Failed`] so callers always render one consistent shape.

use crate::catalog::{descriptor, Quantity};
use crate::constants::NOT_AVAILABLE;
use crate::decode::{decode, Reading};
use crate::error::PmbusError;
use crate::image::RegisterImage;
use crate::status::active_flags;
use log::{debug, warn};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManufacturerInfo {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Revision")]
    pub revision: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Serial")]
    pub serial: String,
    #[serde(rename = "PMBus Revision")]
    pub pmbus_revision: u8,
}

/// Headline telemetry. Voltages in V, current in A, power in W, temperature
/// in °C, fan speed in RPM, frequency in Hz, duty cycle and efficiency in %.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatingParameters {
    pub input_voltage: f64,
    pub output_voltage: i128,
    pub output_current: i128,
    pub temperature: u16,
    pub fan_speed: u16,
    pub switching_frequency: u16,
    pub duty_cycle: u16,
    pub input_power: i128,
    pub output_power: i128,
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Temperatures {
    pub temp1: u16,
    pub temp2: u16,
    pub temp3: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FanSpeeds {
    pub fan1: u16,
    pub fan2: u16,
    pub fan3: u16,
    pub fan4: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusRegisters {
    pub status_word: u16,
    pub status_vout: u16,
    pub status_iout: u16,
    pub status_input: u16,
    pub status_temperature: u16,
    pub status_cml: u16,
    pub status_other: u16,
}

/// Names of the set bits of each status register.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusFlags {
    pub status_word: Vec<&'static str>,
    pub status_vout: Vec<&'static str>,
    pub status_iout: Vec<&'static str>,
    pub status_input: Vec<&'static str>,
    pub status_temperature: Vec<&'static str>,
    pub status_cml: Vec<&'static str>,
    pub status_other: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaultLimits {
    pub iout_oc_fault_limit: u16,
    pub iout_oc_warn_limit: u16,
    pub ot_fault_limit: u16,
    pub ot_warn_limit: u16,
    pub ut_fault_limit: u16,
    pub ut_warn_limit: u16,
    pub vin_uv_fault_limit: u16,
    pub vin_uv_warn_limit: u16,
    pub vin_ov_fault_limit: u16,
    pub vin_ov_warn_limit: u16,
    pub iin_oc_fault_limit: u16,
    pub iin_oc_warn_limit: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingParameters {
    pub ton_delay: u16,
    pub ton_rise: u16,
    pub toff_delay: u16,
    pub toff_fall: u16,
}

/// Everything decoded from one register image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub manufacturer_info: ManufacturerInfo,
    pub operating_parameters: OperatingParameters,
    pub temperatures: Temperatures,
    pub fan_speeds: FanSpeeds,
    pub status: StatusRegisters,
    pub status_flags: StatusFlags,
    pub fault_limits: FaultLimits,
    pub timing_parameters: TimingParameters,
}

/// A snapshot with the context it was taken in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub timestamp: String,
    pub i2c_address: String,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}

/// Result of one read request: a full report or a single error description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReadOutcome {
    Complete(Report),
    Failed { error: String },
}

impl ReadOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, ReadOutcome::Complete(_))
    }
}

/// Output/input power ratio in percent, rounded to two decimals.
///
/// Zero when no input power is reported.
pub fn efficiency(output_power: i128, input_power: i128) -> f64 {
    if input_power <= 0 {
        return 0.0;
    }
    let ratio = output_power as f64 / input_power as f64 * 100.0;
    (ratio * 100.0).round() / 100.0
}

/// Decodes cataloged quantities from one image.
pub struct Assembler<'a> {
    image: &'a RegisterImage,
}

impl<'a> Assembler<'a> {
    pub fn new(image: &'a RegisterImage) -> Self {
        Assembler { image }
    }

    pub fn reading(&self, quantity: Quantity) -> Result<Reading, PmbusError> {
        let d = descriptor(quantity);
        decode(self.image, d.command, d.rule)
    }

    fn mismatch(quantity: Quantity, expected: &'static str) -> PmbusError {
        PmbusError::RuleMismatch {
            quantity: quantity.name(),
            expected,
        }
    }

    /// A string field, or "Not Available" if it cannot be decoded.
    pub fn text(&self, quantity: Quantity) -> String {
        match self.reading(quantity) {
            Ok(Reading::Text(text)) => text,
            Ok(other) => {
                warn!("{} decoded as {other:?}, not text", quantity.name());
                NOT_AVAILABLE.to_string()
            }
            Err(e) => {
                debug!("{} -> '{NOT_AVAILABLE}' (error: {e})", quantity.name());
                NOT_AVAILABLE.to_string()
            }
        }
    }

    pub fn byte(&self, quantity: Quantity) -> Result<u8, PmbusError> {
        self.reading(quantity)?
            .as_byte()
            .ok_or_else(|| Self::mismatch(quantity, "byte"))
    }

    pub fn word(&self, quantity: Quantity) -> Result<u16, PmbusError> {
        self.reading(quantity)?
            .as_word()
            .ok_or_else(|| Self::mismatch(quantity, "word"))
    }

    pub fn real(&self, quantity: Quantity) -> Result<f64, PmbusError> {
        self.reading(quantity)?
            .as_real()
            .ok_or_else(|| Self::mismatch(quantity, "real"))
    }

    pub fn scaled(&self, quantity: Quantity) -> Result<i128, PmbusError> {
        self.reading(quantity)?
            .as_scaled()
            .ok_or_else(|| Self::mismatch(quantity, "scaled integer"))
    }

    pub fn manufacturer_info(&self) -> Result<ManufacturerInfo, PmbusError> {
        Ok(ManufacturerInfo {
            id: self.text(Quantity::MfrId),
            model: self.text(Quantity::MfrModel),
            revision: self.text(Quantity::MfrRevision),
            location: self.text(Quantity::MfrLocation),
            date: self.text(Quantity::MfrDate),
            serial: self.text(Quantity::MfrSerial),
            pmbus_revision: self.byte(Quantity::PmbusRevision)?,
        })
    }

    pub fn operating_parameters(&self) -> Result<OperatingParameters, PmbusError> {
        let input_power = self.scaled(Quantity::InputPower)?;
        let output_power = self.scaled(Quantity::OutputPower)?;
        Ok(OperatingParameters {
            input_voltage: self.real(Quantity::InputVoltage)?,
            output_voltage: self.scaled(Quantity::OutputVoltage)?,
            output_current: self.scaled(Quantity::OutputCurrent)?,
            temperature: self.word(Quantity::Temperature1)?,
            fan_speed: self.word(Quantity::FanSpeed1)?,
            switching_frequency: self.word(Quantity::SwitchingFrequency)?,
            duty_cycle: self.word(Quantity::DutyCycle)?,
            input_power,
            output_power,
            efficiency: efficiency(output_power, input_power),
        })
    }

    pub fn temperatures(&self) -> Result<Temperatures, PmbusError> {
        Ok(Temperatures {
            temp1: self.word(Quantity::Temperature1)?,
            temp2: self.word(Quantity::Temperature2)?,
            temp3: self.word(Quantity::Temperature3)?,
        })
    }

    pub fn fan_speeds(&self) -> Result<FanSpeeds, PmbusError> {
        Ok(FanSpeeds {
            fan1: self.word(Quantity::FanSpeed1)?,
            fan2: self.word(Quantity::FanSpeed2)?,
            fan3: self.word(Quantity::FanSpeed3)?,
            fan4: self.word(Quantity::FanSpeed4)?,
        })
    }

    pub fn status(&self) -> Result<StatusRegisters, PmbusError> {
        Ok(StatusRegisters {
            status_word: self.word(Quantity::StatusWord)?,
            status_vout: self.word(Quantity::StatusVout)?,
            status_iout: self.word(Quantity::StatusIout)?,
            status_input: self.word(Quantity::StatusInput)?,
            status_temperature: self.word(Quantity::StatusTemperature)?,
            status_cml: self.word(Quantity::StatusCml)?,
            status_other: self.word(Quantity::StatusOther)?,
        })
    }

    pub fn fault_limits(&self) -> Result<FaultLimits, PmbusError> {
        Ok(FaultLimits {
            iout_oc_fault_limit: self.word(Quantity::IoutOcFaultLimit)?,
            iout_oc_warn_limit: self.word(Quantity::IoutOcWarnLimit)?,
            ot_fault_limit: self.word(Quantity::OtFaultLimit)?,
            ot_warn_limit: self.word(Quantity::OtWarnLimit)?,
            ut_fault_limit: self.word(Quantity::UtFaultLimit)?,
            ut_warn_limit: self.word(Quantity::UtWarnLimit)?,
            vin_uv_fault_limit: self.word(Quantity::VinUvFaultLimit)?,
            vin_uv_warn_limit: self.word(Quantity::VinUvWarnLimit)?,
            vin_ov_fault_limit: self.word(Quantity::VinOvFaultLimit)?,
            vin_ov_warn_limit: self.word(Quantity::VinOvWarnLimit)?,
            iin_oc_fault_limit: self.word(Quantity::IinOcFaultLimit)?,
            iin_oc_warn_limit: self.word(Quantity::IinOcWarnLimit)?,
        })
    }

    pub fn timing_parameters(&self) -> Result<TimingParameters, PmbusError> {
        Ok(TimingParameters {
            ton_delay: self.word(Quantity::TonDelay)?,
            ton_rise: self.word(Quantity::TonRise)?,
            toff_delay: self.word(Quantity::ToffDelay)?,
            toff_fall: self.word(Quantity::ToffFall)?,
        })
    }

    pub fn snapshot(&self) -> Result<Snapshot, PmbusError> {
        let status = self.status()?;
        let status_flags = StatusFlags {
            status_word: active_flags(Quantity::StatusWord, status.status_word),
            status_vout: active_flags(Quantity::StatusVout, status.status_vout),
            status_iout: active_flags(Quantity::StatusIout, status.status_iout),
            status_input: active_flags(Quantity::StatusInput, status.status_input),
            status_temperature: active_flags(
                Quantity::StatusTemperature,
                status.status_temperature,
            ),
            status_cml: active_flags(Quantity::StatusCml, status.status_cml),
            status_other: active_flags(Quantity::StatusOther, status.status_other),
        };

        Ok(Snapshot {
            manufacturer_info: self.manufacturer_info()?,
            operating_parameters: self.operating_parameters()?,
            temperatures: self.temperatures()?,
            fan_speeds: self.fan_speeds()?,
            status,
            status_flags,
            fault_limits: self.fault_limits()?,
            timing_parameters: self.timing_parameters()?,
        })
    }
}

/// Assembles a snapshot from a populated image.
pub fn assemble(image: &RegisterImage) -> Result<Snapshot, PmbusError> {
    Assembler::new(image).snapshot()
}

/// Assembles a snapshot and wraps it with its context, or the error that
/// stopped it.
pub fn read_outcome(image: &RegisterImage, address: u8, timestamp: String) -> ReadOutcome {
    match assemble(image) {
        Ok(snapshot) => ReadOutcome::Complete(Report {
            timestamp,
            i2c_address: format!("0x{address:02X}"),
            snapshot,
        }),
        Err(e) => {
            warn!("snapshot assembly failed: {e}");
            ReadOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}
