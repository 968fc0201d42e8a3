//! Package-level constants.

/// Current version of the Spyglass bridge (sourced from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name.
pub const NAME: &str = "spyglass";

/// Default port the extension peer listens on.
pub const DEFAULT_PORT: u16 = 8090;

/// The peer's WebSocket endpoint path.
pub const WS_PATH: &str = "/extension";

/// Loopback host — the peer is always local.
pub const BRIDGE_HOST: &str = "127.0.0.1";

/// Default deadline for one correlated request, in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Default deadline for the WebSocket handshake, in milliseconds.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_semver() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert_eq!(parts.len(), 3, "VERSION must be semver (MAJOR.MINOR.PATCH)");
        for part in parts {
            let _: u32 = part.parse().expect("each semver segment must be a number");
        }
    }

    #[test]
    fn name_is_lowercase() {
        assert_eq!(NAME, NAME.to_lowercase());
    }

    #[test]
    fn ws_path_is_absolute() {
        assert!(WS_PATH.starts_with('/'));
    }
}
