//! # spyglass-bridge
//!
//! The bridge binary. Wires settings, the connection manager, and the tool
//! registry together, then serves newline-delimited JSON tool invocations on
//! stdin/stdout until EOF or interrupt. Logs go to stderr so stdout stays a
//! clean dispatch channel.

#![deny(unsafe_code)]

mod dispatch;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use spyglass_conn::{BridgeClient, BridgeConfig};
use spyglass_settings::{BridgeSettings, load_settings, load_settings_from_path, resolve_port};
use spyglass_tools::{ToolRegistry, register_builtin};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Spyglass bridge.
#[derive(Parser, Debug)]
#[command(name = "spyglass-bridge", about = "Browser bridge exposing observation tools", version)]
struct Cli {
    /// Peer port (bypasses the resolution chain).
    #[arg(long)]
    port: Option<u16>,

    /// Client label sent to the peer at connect time.
    #[arg(long)]
    label: Option<String>,

    /// Path to the settings file (default `~/.spyglass/settings.json`).
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn bridge_config(settings: &BridgeSettings, port: u16) -> BridgeConfig {
    BridgeConfig {
        host: settings.host.clone(),
        port,
        ws_path: settings.ws_path.clone(),
        connect_timeout_ms: settings.connect_timeout_ms,
        request_timeout_ms: settings.request_timeout_ms,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = match &cli.settings {
        Some(path) => load_settings_from_path(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => load_settings().context("loading settings")?,
    };
    let port = cli.port.unwrap_or_else(resolve_port);
    info!(port, host = %settings.host, "starting spyglass bridge");

    let client = BridgeClient::spawn(bridge_config(&settings, port));
    let mut registry = ToolRegistry::new();
    register_builtin(&mut registry, &client);

    // Best-effort: a missing peer at boot is not fatal, the first request
    // will retry.
    let label = cli.label.or_else(|| settings.client_label.clone());
    client.start(label.as_deref()).await;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    tokio::select! {
        result = dispatch::serve(&registry, stdin, stdout) => {
            result.context("dispatch loop failed")?;
            info!("stdin closed");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received");
        }
    }

    client.stop().await;
    Ok(())
}
