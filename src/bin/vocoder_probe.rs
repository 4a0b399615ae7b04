//! Vocoder probe utility
//! Resets a vocoder, reads its identity and loads the P25 full rate parameters

use radio_decode::serial::{SerialConfig, SerialPort, VOCODER_BAUD_RATE};
use radio_decode::vocoder::device::P25_FULL_RATE;
use radio_decode::vocoder::{VocoderConfig, VocoderDevice};
use std::env;
use std::time::Duration;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let subscriber = tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <port> [baud_rate]", args[0]);
        eprintln!("Example: {} /dev/ttyUSB0 {}", args[0], VOCODER_BAUD_RATE);
        std::process::exit(1);
    }

    let port_name = &args[1];
    let baud_rate = match args.get(2) {
        Some(rate) => rate.parse()?,
        None => VOCODER_BAUD_RATE,
    };

    tracing::info!("Vocoder Probe");
    tracing::info!("Port: {} at {} baud", port_name, baud_rate);

    let serial_config = SerialConfig::new(baud_rate).with_timeout(Duration::from_millis(500));
    let mut port = SerialPort::open(port_name, serial_config)?;
    port.clear_input()?;

    let mut vocoder = VocoderDevice::new(port, VocoderConfig::default());

    vocoder.reset().await?;
    tracing::info!("Device ready");

    let product = vocoder.product_id().await?;
    tracing::info!("Product: {}", product);

    let version = vocoder.version().await?;
    tracing::info!("Version: {}", version);

    vocoder.set_rate_parameters(P25_FULL_RATE).await?;
    tracing::info!("Loaded P25 full rate parameters {:04X?}", P25_FULL_RATE);

    vocoder.initialize(true, true).await?;
    tracing::info!("Encoder and decoder initialized");

    vocoder.into_inner().close()?;
    Ok(())
}
