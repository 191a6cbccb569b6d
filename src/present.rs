//! Snapshot presentation
//!
//! Renders a [`ReadOutcome`] as indented JSON or as a plain-text report.

use crate::catalog::{descriptor, Quantity};
use crate::decode::Reading;
use crate::error::PmbusError;
use crate::snapshot::{ReadOutcome, Report};
use std::fmt::Write;

const RULE_WIDTH: usize = 50;

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

/// Renders `outcome` in the requested format.
pub fn render(outcome: &ReadOutcome, format: Format) -> Result<String, PmbusError> {
    match format {
        Format::Text => Ok(render_text(outcome)),
        Format::Json => render_json(outcome),
    }
}

/// Pretty-printed JSON, two-space indent.
pub fn render_json(outcome: &ReadOutcome) -> Result<String, PmbusError> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

/// Human-readable report.
pub fn render_text(outcome: &ReadOutcome) -> String {
    match outcome {
        ReadOutcome::Complete(report) => render_report(report),
        ReadOutcome::Failed { error } => format!("Error: {error}"),
    }
}

fn with_unit(value: impl std::fmt::Display, quantity: Quantity) -> String {
    let unit = descriptor(quantity).unit;
    match unit {
        "" => value.to_string(),
        "V" | "A" | "W" | "°C" | "%" => format!("{value}{unit}"),
        _ => format!("{value} {unit}"),
    }
}

/// Formats a single reading with the unit of its quantity.
pub fn format_reading(quantity: Quantity, reading: &Reading) -> String {
    match reading {
        Reading::Word(v) if descriptor(quantity).unit.is_empty() => format!("0x{v:04X}"),
        other => with_unit(other, quantity),
    }
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{title}:");
}

fn line(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {label:<22} {value}");
}

fn render_report(report: &Report) -> String {
    let s = &report.snapshot;
    let mut out = String::new();

    let _ = writeln!(out, "PSU Information ({} @ {}):", report.i2c_address, report.timestamp);
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    section(&mut out, "Manufacturer Information");
    let m = &s.manufacturer_info;
    line(&mut out, "Manufacturer:", &m.id);
    line(&mut out, "Model:", &m.model);
    line(&mut out, "Serial:", &m.serial);
    line(&mut out, "Revision:", &m.revision);
    line(&mut out, "Location:", &m.location);
    line(&mut out, "Date:", &m.date);
    line(&mut out, "PMBus Revision:", format!("0x{:02X}", m.pmbus_revision));

    section(&mut out, "Operating Parameters");
    let p = &s.operating_parameters;
    line(&mut out, "input_voltage:", with_unit(p.input_voltage, Quantity::InputVoltage));
    line(&mut out, "output_voltage:", with_unit(p.output_voltage, Quantity::OutputVoltage));
    line(&mut out, "output_current:", with_unit(p.output_current, Quantity::OutputCurrent));
    line(&mut out, "temperature:", with_unit(p.temperature, Quantity::Temperature1));
    line(&mut out, "fan_speed:", with_unit(p.fan_speed, Quantity::FanSpeed1));
    line(
        &mut out,
        "switching_frequency:",
        with_unit(p.switching_frequency, Quantity::SwitchingFrequency),
    );
    line(&mut out, "duty_cycle:", with_unit(p.duty_cycle, Quantity::DutyCycle));
    line(&mut out, "input_power:", with_unit(p.input_power, Quantity::InputPower));
    line(&mut out, "output_power:", with_unit(p.output_power, Quantity::OutputPower));
    line(&mut out, "efficiency:", format!("{}%", p.efficiency));

    section(&mut out, "Temperatures");
    let t = &s.temperatures;
    for (label, value) in [("temp1:", t.temp1), ("temp2:", t.temp2), ("temp3:", t.temp3)] {
        line(&mut out, label, with_unit(value, Quantity::Temperature1));
    }

    section(&mut out, "Fan Speeds");
    let f = &s.fan_speeds;
    for (label, value) in [
        ("fan1:", f.fan1),
        ("fan2:", f.fan2),
        ("fan3:", f.fan3),
        ("fan4:", f.fan4),
    ] {
        line(&mut out, label, with_unit(value, Quantity::FanSpeed1));
    }

    section(&mut out, "Status");
    let st = &s.status;
    let fl = &s.status_flags;
    for (label, value, flags) in [
        ("status_word:", st.status_word, &fl.status_word),
        ("status_vout:", st.status_vout, &fl.status_vout),
        ("status_iout:", st.status_iout, &fl.status_iout),
        ("status_input:", st.status_input, &fl.status_input),
        ("status_temperature:", st.status_temperature, &fl.status_temperature),
        ("status_cml:", st.status_cml, &fl.status_cml),
        ("status_other:", st.status_other, &fl.status_other),
    ] {
        if flags.is_empty() {
            line(&mut out, label, format!("0x{value:04X}"));
        } else {
            line(&mut out, label, format!("0x{value:04X} [{}]", flags.join(", ")));
        }
    }

    section(&mut out, "Fault Limits");
    let l = &s.fault_limits;
    for (label, value) in [
        ("iout_oc_fault_limit:", l.iout_oc_fault_limit),
        ("iout_oc_warn_limit:", l.iout_oc_warn_limit),
        ("ot_fault_limit:", l.ot_fault_limit),
        ("ot_warn_limit:", l.ot_warn_limit),
        ("ut_fault_limit:", l.ut_fault_limit),
        ("ut_warn_limit:", l.ut_warn_limit),
        ("vin_uv_fault_limit:", l.vin_uv_fault_limit),
        ("vin_uv_warn_limit:", l.vin_uv_warn_limit),
        ("vin_ov_fault_limit:", l.vin_ov_fault_limit),
        ("vin_ov_warn_limit:", l.vin_ov_warn_limit),
        ("iin_oc_fault_limit:", l.iin_oc_fault_limit),
        ("iin_oc_warn_limit:", l.iin_oc_warn_limit),
    ] {
        line(&mut out, label, format!("0x{value:04X}"));
    }

    section(&mut out, "Timing Parameters");
    let tp = &s.timing_parameters;
    for (label, value) in [
        ("ton_delay:", tp.ton_delay),
        ("ton_rise:", tp.ton_rise),
        ("toff_delay:", tp.toff_delay),
        ("toff_fall:", tp.toff_fall),
    ] {
        line(&mut out, label, format!("0x{value:04X}"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::RegisterImage;
    use crate::snapshot::read_outcome;

    #[test]
    fn test_format_reading_units() {
        assert_eq!(format_reading(Quantity::InputVoltage, &Reading::Real(12.5)), "12.5V");
        assert_eq!(format_reading(Quantity::FanSpeed2, &Reading::Word(3000)), "3000 RPM");
        assert_eq!(format_reading(Quantity::SwitchingFrequency, &Reading::Word(250)), "250 Hz");
        assert_eq!(format_reading(Quantity::OtFaultLimit, &Reading::Word(0x1F)), "0x001F");
        assert_eq!(format_reading(Quantity::MfrId, &Reading::Text("DELTA".into())), "DELTA");
    }

    #[test]
    fn test_failed_outcome_text_and_json() {
        let outcome = ReadOutcome::Failed {
            error: "boom".into(),
        };
        assert_eq!(render_text(&outcome), "Error: boom");
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&outcome).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "boom" }));
    }

    #[test]
    fn test_text_report_sections() {
        let outcome = read_outcome(&RegisterImage::new(), 0x60, "now".into());
        let text = render(&outcome, Format::Text).unwrap();
        for title in [
            "Manufacturer Information:",
            "Operating Parameters:",
            "Temperatures:",
            "Fan Speeds:",
            "Status:",
            "Fault Limits:",
            "Timing Parameters:",
        ] {
            assert!(text.contains(title), "missing {title}");
        }
        assert!(text.starts_with("PSU Information (0x60 @ now):"));
    }
}
