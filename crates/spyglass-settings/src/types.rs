//! Settings types.

use serde::{Deserialize, Serialize};
use spyglass_core::constants::{
    BRIDGE_HOST, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_MS, WS_PATH,
};

/// Bridge connection settings.
///
/// The peer port is deliberately not a field here — it has its own
/// resolution chain (see [`crate::resolve_port`]) because the peer writes
/// its port out-of-band rather than into our settings file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeSettings {
    /// Peer host. Loopback unless explicitly overridden.
    pub host: String,
    /// Peer WebSocket endpoint path.
    pub ws_path: String,
    /// WebSocket handshake deadline in milliseconds.
    pub connect_timeout_ms: u64,
    /// Per-request reply deadline in milliseconds.
    pub request_timeout_ms: u64,
    /// Client label sent to the peer at connect time so it can identify us.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_label: Option<String>,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            host: BRIDGE_HOST.to_string(),
            ws_path: WS_PATH.to_string(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            client_label: None,
        }
    }
}
