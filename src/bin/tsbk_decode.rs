//! TSBK capture decoder
//! Reads lines of `<nac hex> <timestamp ms> <tsbk hex>` and prints each decoded message

use radio_decode::{CorrectedBitBuffer, FactoryConfig, MessageFactory};
use regex::Regex;
use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

struct Args {
    input: Option<String>,
    json: bool,
    check_crc: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let args = parse_args();
    let reader: Box<dyn BufRead> = match args.input.as_deref() {
        None | Some("-") => Box::new(BufReader::new(io::stdin())),
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
    };

    let mut config = FactoryConfig::default();
    if !args.check_crc {
        config = config.without_crc_check();
    }
    let factory = MessageFactory::new(config);

    let line_format = Regex::new(r"^\s*([0-9A-Fa-f]{1,3})\s+(\d+)\s+([0-9A-Fa-f][0-9A-Fa-f\s]*?)\s*$")?;

    let mut decoded = 0usize;
    let mut unknown = 0usize;
    let mut invalid = 0usize;
    let mut skipped = 0usize;

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(captures) = line_format.captures(trimmed) else {
            tracing::warn!("Line {}: expected <nac> <timestamp> <hex>", number + 1);
            skipped += 1;
            continue;
        };

        let nac = u16::from_str_radix(&captures[1], 16)?;
        let timestamp: u64 = captures[2].parse()?;
        let digits: String = captures[3].split_whitespace().collect();
        let bytes = match hex::decode(&digits) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Line {}: {}", number + 1, e);
                skipped += 1;
                continue;
            }
        };

        let message = match factory.decode_tsbk(CorrectedBitBuffer::from_bytes(bytes), nac, timestamp) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("Line {}: {}", number + 1, e);
                skipped += 1;
                continue;
            }
        };

        decoded += 1;
        if message.label() == "UNKNOWN" {
            unknown += 1;
        }
        if !message.is_valid() {
            invalid += 1;
        }

        if args.json {
            println!("{}", message.record().to_json()?);
        } else {
            println!("{}", message);
        }
    }

    tracing::info!(
        "Decoded {} messages ({} unknown, {} failed CRC), skipped {} lines",
        decoded,
        unknown,
        invalid,
        skipped
    );

    Ok(())
}

/// Install the fmt subscriber and route `log` records into it
fn init_tracing() -> anyhow::Result<()> {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let format_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let subscriber = tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;
    Ok(())
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args {
        input: None,
        json: false,
        check_crc: true,
    };

    for arg in &args[1..] {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--no-crc" => parsed.check_crc = false,
            "-h" | "--help" => {
                print_usage(&args[0]);
                std::process::exit(0);
            }
            "-" => parsed.input = Some(arg.clone()),
            flag if flag.starts_with('-') => {
                eprintln!("Unknown flag: {}", flag);
                print_usage(&args[0]);
                std::process::exit(1);
            }
            path => parsed.input = Some(path.to_string()),
        }
    }

    parsed
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS] [capture_file|-]", program);
    eprintln!();
    eprintln!("Each input line: <nac hex> <timestamp ms> <12 TSBK bytes as hex>");
    eprintln!("  293 1700000000000 2B00 00FF FF03 0700 04D2 B585");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --json         Print one JSON record per message");
    eprintln!("  --no-crc       Skip the CRC check and treat every block as valid");
    eprintln!("  -h, --help     Show this help message");
}
