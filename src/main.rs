use anyhow::{bail, Context};
use clap::Parser;
use log::LevelFilter;
use pmbus_rs::present::{format_reading, render, Format};
use pmbus_rs::{
    by_name, init_logger_with_level, log_error, log_info, parse_address, write_capture, PmbusError,
    ReadOutcome, Session, SessionConfig,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pmbus-cli")]
#[command(about = "Read and decode PMBus power-supply registers")]
struct Cli {
    /// Output the snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// I2C address of the supply (hex)
    #[arg(short, long, default_value = "0x60")]
    address: String,

    /// I2C bus number
    #[arg(short, long, default_value_t = 1)]
    bus: u8,

    /// Read registers from an i2cdump capture instead of the bus
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Print a single quantity, e.g. `output_voltage`
    #[arg(short, long, value_name = "NAME")]
    register: Option<String>,

    /// Save the populated register image as a capture file
    #[arg(long, value_name = "PATH")]
    save_capture: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger_with_level(if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });

    let address = parse_address(&cli.address)?;
    let config = SessionConfig::new(cli.bus, address);

    let session = match &cli.file {
        Some(path) => Session::from_capture(config, path)
            .with_context(|| format!("failed to read capture {}", path.display()))?,
        None => Session::open_live(config)?,
    };

    if let Some(path) = &cli.save_capture {
        std::fs::write(path, write_capture(session.image()))
            .with_context(|| format!("failed to write capture {}", path.display()))?;
        log_info(&format!("Saved capture to {}", path.display()));
    }

    let output = match &cli.register {
        Some(name) => {
            let d = by_name(name).ok_or_else(|| PmbusError::UnknownQuantity(name.clone()))?;
            let reading = session.read_descriptor(d)?;
            format!("{}: {}", d.name, format_reading(d.quantity, &reading))
        }
        None => {
            let outcome = session.read_outcome();
            let format = if cli.json { Format::Json } else { Format::Text };
            let text = render(&outcome, format)?;
            if let ReadOutcome::Failed { error } = &outcome {
                emit(&cli.output, &text)?;
                log_error(&format!("Snapshot assembly failed: {error}"));
                bail!("snapshot could not be assembled");
            }
            text
        }
    };

    emit(&cli.output, &output)
}

fn emit(destination: &Option<PathBuf>, text: &str) -> anyhow::Result<()> {
    match destination {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            log_info(&format!("Output written to {}", path.display()));
        }
        None => println!("{text}"),
    }
    Ok(())
}
