//! loraline daemon.
//!
//! Connects to the LoRa radio bridge over USB serial, runs the ingestion
//! loop against the layered line decoders, and exports the latest readings
//! as Prometheus metrics. A `decode` subcommand replays lines from stdin
//! through the same pipeline for offline use.

mod metrics;

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use loraline_core::{
    LineOutcome, OUTCOME_CHANNEL_CAPACITY, Payload, ReaderLineSource, SerialConfig,
    SerialLineSource, SourceError, run_ingest,
};
use metrics::Metrics;

#[derive(Parser, Debug)]
#[command(name = "loraline")]
#[command(version)]
#[command(
    about = "Telemetry ingester for a LoRa radio bridge (serial in, metrics out).",
    long_about = None,
    after_help = "Examples:\n  loraline serve --listen 0.0.0.0:8080\n  loraline serve --device /dev/ttyACM0 --baud 9600\n  cat capture.log | loraline decode --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ingest from the radio bridge and export metrics until interrupted.
    Serve(ServeArgs),
    /// Decode bridge lines from stdin and print per-line outcomes.
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Listen address for /metrics and /healthz
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,

    /// USB vendor id of the bridge, hex
    #[arg(long, default_value = "239a", value_parser = parse_hex_u16)]
    vid: u16,

    /// USB product id of the bridge, hex
    #[arg(long, default_value = "800c", value_parser = parse_hex_u16)]
    pid: u16,

    /// Serial baud rate
    #[arg(long, default_value_t = 9600)]
    baud: u32,

    /// Serial read timeout in milliseconds; bounds shutdown latency
    #[arg(long, default_value_t = 200)]
    read_timeout_ms: u64,

    /// Open this device path instead of discovering by vid/pid
    #[arg(long)]
    device: Option<String>,
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Print decoded frames as JSON lines
    #[arg(long)]
    json: bool,

    /// Exit with a non-zero code if any line was rejected
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Serve(args) => cmd_serve(args).await,
        Commands::Decode(args) => cmd_decode(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

async fn cmd_serve(args: ServeArgs) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        commit = env!("LORALINE_BUILD_COMMIT"),
        "starting loraline"
    );

    let config = SerialConfig {
        vid: args.vid,
        pid: args.pid,
        baud_rate: args.baud,
        read_timeout: Duration::from_millis(args.read_timeout_ms),
    };
    let source = match &args.device {
        Some(path) => SerialLineSource::open(path, &config),
        None => SerialLineSource::discover(&config),
    }
    .context("failed to connect to the radio bridge")?;
    info!(
        "connected to radio bridge (vid={:04x} pid={:04x} baud={})",
        config.vid, config.pid, config.baud_rate
    );

    let metrics = Arc::new(Metrics::default());
    let (outcome_tx, outcome_rx) = mpsc::channel(OUTCOME_CHANNEL_CAPACITY);
    let (shutdown_tx, _) = broadcast::channel(1);

    let mut ingest = tokio::task::spawn_blocking({
        let shutdown_rx = shutdown_tx.subscribe();
        move || run_ingest(source, outcome_tx, shutdown_rx)
    });
    let consumer = tokio::spawn(consume_outcomes(outcome_rx, Arc::clone(&metrics)));

    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("failed to bind {}", args.listen))?;
    info!(listen = %args.listen, "metrics endpoint listening");
    let server = tokio::spawn({
        let mut shutdown_rx = shutdown_tx.subscribe();
        let app = metrics::router(Arc::clone(&metrics));
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.recv().await;
                })
                .await
        }
    });

    let source_ended = tokio::select! {
        _ = wait_for_signal() => {
            info!("shutdown signal received, stopping");
            false
        }
        result = &mut ingest => {
            report_ingest_exit(result);
            true
        }
    };
    let _ = shutdown_tx.send(());
    if !source_ended {
        report_ingest_exit(ingest.await);
    }
    let _ = consumer.await;
    let _ = server.await;
    info!("loraline stopped");
    Ok(())
}

async fn cmd_decode(args: DecodeArgs) -> Result<()> {
    let (outcome_tx, mut outcome_rx) = mpsc::channel(OUTCOME_CHANNEL_CAPACITY);
    let (shutdown_tx, _) = broadcast::channel(1);
    let shutdown_rx = shutdown_tx.subscribe();

    let ingest = tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        let source = ReaderLineSource::new(stdin.lock());
        run_ingest(source, outcome_tx, shutdown_rx)
    });

    let mut rejected = 0usize;
    while let Some(outcome) = outcome_rx.recv().await {
        match outcome {
            LineOutcome::Decoded(frame) => {
                if args.json {
                    println!("{}", serde_json::to_string(&frame)?);
                } else {
                    println!("{frame}");
                }
            }
            LineOutcome::Rejected { line, error } => {
                rejected += 1;
                eprintln!("error: {error} (line: {line})");
            }
        }
    }

    ingest.await.context("ingest task failed")??;
    if args.strict && rejected > 0 {
        bail!("{rejected} line(s) rejected");
    }
    Ok(())
}

/// Sequential consumer: updates the metrics and logs each outcome in the
/// order the loop emitted it, concurrently with the next read.
async fn consume_outcomes(mut outcomes: mpsc::Receiver<LineOutcome>, metrics: Arc<Metrics>) {
    while let Some(outcome) = outcomes.recv().await {
        match outcome {
            LineOutcome::Decoded(frame) => {
                metrics.observe_frame(&frame);
                let Payload::SensorReading(reading) = &frame.envelope.payload;
                info!(
                    station = %frame.envelope.station,
                    rssi = frame.rssi,
                    sequence = reading.sequence,
                    humidity = reading.humidity,
                    temperature = reading.temperature,
                    battery = reading.battery,
                    "reading"
                );
            }
            LineOutcome::Rejected { line, error } => {
                metrics.observe_reject();
                warn!(%line, "discarding line: {error}");
            }
        }
    }
}

fn report_ingest_exit(result: Result<Result<(), SourceError>, JoinError>) {
    match result {
        Ok(Ok(())) => info!("ingest loop stopped"),
        Ok(Err(err)) => warn!("ingest loop failed: {err}"),
        Err(err) => warn!("ingest task panicked: {err}"),
    }
}

async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let mut term = match signal(SignalKind::terminate()) {
            Ok(term) => term,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = term.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn parse_hex_u16(value: &str) -> Result<u16, String> {
    let digits = value.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(digits, 16).map_err(|err| format!("invalid hex id {value:?}: {err}"))
}
