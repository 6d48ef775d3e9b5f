//! # Pad Bridge
//!
//! Turns line-delimited JSON controller commands on stdin into per-player
//! virtual Xbox 360 style gamepads via Linux uinput.
//!
//! stdout is never written; all diagnostics go to stderr.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, Instrument};
use tracing_subscriber::EnvFilter;

use pad_bridge::backend::uinput::UinputBackend;
use pad_bridge::bridge::input::{shutdown_signal, spawn_stdin_reader};
use pad_bridge::bridge::{SessionSummary, Supervisor};
use pad_bridge::config::{Config, CONFIG_ENV_VAR};
use pad_bridge::device::DevicePool;

/// Main entry point for Pad Bridge
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Load configuration (first argument, then `PAD_BRIDGE_CONFIG`, then defaults)
///    - Set up logging to stderr with tracing subscriber
///    - Start the stdin reader thread
///
/// 2. **Main Loop**
///    - Apply each command to the matching player's virtual gamepad
///    - Handle Ctrl+C / SIGTERM for graceful shutdown
///
/// 3. **Graceful Shutdown**
///    - Neutralize and destroy every virtual gamepad
///    - Log session totals
///
/// # Errors
///
/// Returns error only if startup fails (unreadable or invalid configuration,
/// reader thread cannot start). Every exit after startup is a clean exit.
#[tokio::main]
async fn main() -> Result<()> {
    let config = match config_path() {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    // Logs must never reach stdout
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(config.logging.ansi)
        .with_env_filter(filter)
        .init();

    run(config).instrument(tracing::info_span!("vgamepad")).await
}

async fn run(config: Config) -> Result<()> {
    info!("Pad Bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    let backend = UinputBackend::new(config.device.clone());
    let pool = DevicePool::new(backend, config.bridge.max_players);
    let mut supervisor = Supervisor::new(pool);

    let inbound = spawn_stdin_reader(config.bridge.inbound_queue_depth)
        .context("Failed to start stdin reader")?;

    let summary = supervisor.run(inbound, shutdown_signal()).await;
    info!("{}", describe(&summary));

    Ok(())
}

fn config_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR))
        .map(PathBuf::from)
}

fn describe(summary: &SessionSummary) -> String {
    format!(
        "Session ended ({}): {} command(s) applied, {} rejected, {} gamepad(s) released",
        summary.reason, summary.commands_applied, summary.commands_rejected, summary.devices_released
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pad_bridge::bridge::StopReason;

    #[test]
    fn test_describe_summary() {
        let summary = SessionSummary {
            reason: StopReason::Interrupted,
            commands_applied: 12,
            commands_rejected: 1,
            devices_released: 2,
        };
        assert_eq!(
            describe(&summary),
            "Session ended (interrupted): 12 command(s) applied, 1 rejected, 2 gamepad(s) released"
        );
    }
}
