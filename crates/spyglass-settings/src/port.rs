//! Peer port resolution.
//!
//! The extension peer publishes the port it listens on out-of-band. The
//! bridge discovers it through a fixed chain, first hit wins:
//!
//! 1. `SPYGLASS_PORT` environment variable
//! 2. A pluggable platform [`PortLookup`] strategy (e.g. a registry probe on
//!    Windows); the default strategy finds nothing
//! 3. The `~/.spyglass/port` file (plain decimal, written by the peer)
//! 4. The compiled default, `8090`

use std::path::{Path, PathBuf};

use spyglass_core::constants::DEFAULT_PORT;
use tracing::debug;

use crate::loader::{parse_u16_range, read_env_u16};

/// Platform-specific port discovery hook.
///
/// Implementations consult wherever the host platform stashes the peer's
/// port. Returning `None` passes resolution on to the port file.
pub trait PortLookup: Send + Sync {
    /// Probe the platform source; `None` when it has nothing to offer.
    fn lookup(&self) -> Option<u16>;
}

/// Default strategy: no platform source, always defers down the chain.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopPortLookup;

impl PortLookup for NoopPortLookup {
    fn lookup(&self) -> Option<u16> {
        None
    }
}

/// Resolve the path to the port file (`~/.spyglass/port`).
pub fn port_file_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".spyglass").join("port")
}

/// Resolve the peer port using the default platform strategy.
pub fn resolve_port() -> u16 {
    resolve_port_with(&NoopPortLookup, &port_file_path())
}

/// Resolve the peer port with an explicit strategy and port-file path.
pub fn resolve_port_with(platform: &dyn PortLookup, port_file: &Path) -> u16 {
    if let Some(port) = read_env_u16("SPYGLASS_PORT", 1, 65535) {
        debug!(port, "peer port from SPYGLASS_PORT");
        return port;
    }
    if let Some(port) = platform.lookup() {
        debug!(port, "peer port from platform lookup");
        return port;
    }
    if let Some(port) = read_port_file(port_file) {
        debug!(port, path = %port_file.display(), "peer port from port file");
        return port;
    }
    debug!(port = DEFAULT_PORT, "peer port defaulted");
    DEFAULT_PORT
}

/// Read and parse the port file. Unreadable or malformed files resolve to
/// `None` so the chain can fall through to the default.
fn read_port_file(path: &Path) -> Option<u16> {
    let content = std::fs::read_to_string(path).ok()?;
    parse_u16_range(content.trim(), 1, 65535)
}
