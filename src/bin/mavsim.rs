use std::net::SocketAddr;
#[cfg(feature = "debug-tools")]
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use mavsim::simulator::{Simulator, SimulatorConfig};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mavsim",
    version,
    about = "Stream synthetic autopilot telemetry to a ground station over UDP"
)]
struct Cli {
    /// Ground station address to send datagrams to.
    #[arg(long, env = "MAVSIM_DESTINATION", default_value = "127.0.0.1:14550")]
    destination: SocketAddr,

    /// Local address to bind the sending socket to.
    #[arg(long, env = "MAVSIM_BIND", default_value = "0.0.0.0:0")]
    bind: SocketAddr,

    /// Sender system id.
    #[arg(long, env = "MAVSIM_SYSTEM_ID", default_value_t = 1)]
    system_id: u8,

    /// Sender component id.
    #[arg(long, env = "MAVSIM_COMPONENT_ID", default_value_t = 1)]
    component_id: u8,

    /// Pause after each message, in milliseconds.
    #[arg(long, env = "MAVSIM_MESSAGE_INTERVAL_MS", default_value_t = 100)]
    message_interval_ms: u64,

    /// Pause after each full cycle, in milliseconds.
    #[arg(long, env = "MAVSIM_CYCLE_INTERVAL_MS", default_value_t = 2_000)]
    cycle_interval_ms: u64,

    /// Stop after this many cycles instead of running until interrupted.
    #[arg(long, env = "MAVSIM_CYCLES")]
    cycles: Option<u64>,

    /// Write every outbound datagram to a PCAP file.
    #[cfg(feature = "debug-tools")]
    #[arg(long, env = "MAVSIM_PCAP")]
    pcap: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> SimulatorConfig {
        SimulatorConfig {
            destination: self.destination,
            bind: self.bind,
            system_id: self.system_id,
            component_id: self.component_id,
            message_interval: Duration::from_millis(self.message_interval_ms),
            cycle_interval: Duration::from_millis(self.cycle_interval_ms),
            max_cycles: self.cycles,
            #[cfg(feature = "debug-tools")]
            pcap_path: self.pcap,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Cli::parse().into_config();
    config.validate().context("invalid simulator configuration")?;

    info!(
        version = mavsim::VERSION,
        destination = %config.destination,
        system_id = config.system_id,
        component_id = config.component_id,
        "starting telemetry stream"
    );

    let mut simulator = Simulator::bind(config).context("failed to bind UDP socket")?;
    let summary = simulator.run_until(shutdown_signal()).await;

    info!(
        cycles = summary.cycles,
        sent = summary.metrics.sent_messages,
        bytes = summary.metrics.bytes_sent,
        send_errors = summary.metrics.send_errors,
        avg_send_us = ?summary.metrics.avg_send_latency_us(),
        "telemetry stream stopped"
    );

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(?err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("interrupt received");
}
