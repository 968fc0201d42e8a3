//! Settings loading with environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`BridgeSettings::default()`]
//! 2. If `~/.spyglass/settings.json` exists, its values replace the defaults
//!    per-field (missing fields keep their defaults via serde)
//! 3. Apply `SPYGLASS_*` environment variable overrides (highest priority)
//!
//! Invalid env var values are logged and ignored, falling back to the
//! file/default value.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::Result;
use crate::types::BridgeSettings;

/// Resolve the path to the settings file (`~/.spyglass/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".spyglass").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<BridgeSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<BridgeSettings> {
    let mut settings = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    } else {
        debug!(?path, "settings file not found, using defaults");
        BridgeSettings::default()
    };
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Apply environment variable overrides to loaded settings.
///
/// Integers must parse and fall within range; invalid values are warned
/// about and ignored. (`SPYGLASS_PORT` is not handled here — the port has
/// its own resolution chain in [`crate::resolve_port`].)
pub fn apply_env_overrides(settings: &mut BridgeSettings) {
    if let Some(v) = read_env_string("SPYGLASS_HOST") {
        settings.host = v;
    }
    if let Some(v) = read_env_string("SPYGLASS_WS_PATH") {
        settings.ws_path = v;
    }
    if let Some(v) = read_env_u64("SPYGLASS_CONNECT_TIMEOUT_MS", 100, 600_000) {
        settings.connect_timeout_ms = v;
    }
    if let Some(v) = read_env_u64("SPYGLASS_REQUEST_TIMEOUT_MS", 100, 600_000) {
        settings.request_timeout_ms = v;
    }
    if let Some(v) = read_env_string("SPYGLASS_CLIENT_LABEL") {
        settings.client_label = Some(v);
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a `u16` within a range.
pub(crate) fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `u64` within a range.
pub(crate) fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

pub(crate) fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

pub(crate) fn read_env_u16(name: &str, min: u16, max: u16) -> Option<u16> {
    let val = std::env::var(name).ok()?;
    let result = parse_u16_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u16 env var, ignoring");
    }
    result
}

fn read_env_u64(name: &str, min: u64, max: u64) -> Option<u64> {
    let val = std::env::var(name).ok()?;
    let result = parse_u64_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u64 env var, ignoring");
    }
    result
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from_path(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings.request_timeout_ms, 10_000);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, r#"{{"connectTimeoutMs": 2500, "clientLabel": "ide"}}"#).unwrap();

        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(settings.connect_timeout_ms, 2500);
        assert_eq!(settings.client_label.as_deref(), Some("ide"));
        // untouched fields keep defaults
        assert_eq!(settings.request_timeout_ms, 10_000);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_settings_from_path(&path).is_err());
    }

    #[test]
    fn parse_u16_range_bounds() {
        assert_eq!(parse_u16_range("8090", 1, 65535), Some(8090));
        assert_eq!(parse_u16_range("0", 1, 65535), None);
        assert_eq!(parse_u16_range("port", 1, 65535), None);
    }

    #[test]
    fn parse_u64_range_bounds() {
        assert_eq!(parse_u64_range("10000", 100, 600_000), Some(10_000));
        assert_eq!(parse_u64_range("5", 100, 600_000), None);
        assert_eq!(parse_u64_range("", 100, 600_000), None);
    }
}
