//! Connection configuration.

use std::time::Duration;

use spyglass_core::constants::{
    BRIDGE_HOST, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_MS, WS_PATH,
};

/// Everything the connection actor needs to know about its target peer.
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    /// Peer host (loopback in practice).
    pub host: String,
    /// Peer port, from the resolution chain.
    pub port: u16,
    /// Peer WebSocket endpoint path.
    pub ws_path: String,
    /// Deadline for the WebSocket handshake, in milliseconds.
    pub connect_timeout_ms: u64,
    /// Deadline for one correlated request, in milliseconds.
    pub request_timeout_ms: u64,
}

impl BridgeConfig {
    /// Config pointing at a given port with all defaults.
    #[must_use]
    pub fn for_port(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }

    /// The full `ws://` target URL.
    #[must_use]
    pub fn url(&self) -> String {
        format!("ws://{}:{}{}", self.host, self.port, self.ws_path)
    }

    /// Handshake deadline as a [`Duration`].
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Request deadline as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: BRIDGE_HOST.to_string(),
            port: DEFAULT_PORT,
            ws_path: WS_PATH.to_string(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}
