//! # spyglass-settings
//!
//! Configuration for the Spyglass bridge.
//!
//! Two concerns live here:
//!
//! - **Settings**: [`BridgeSettings`] loaded from `~/.spyglass/settings.json`
//!   (missing file → compiled defaults) with `SPYGLASS_*` environment
//!   variable overrides applied on top.
//! - **Port resolution**: the peer's listening port is discovered through a
//!   fixed chain — `SPYGLASS_PORT` env var, then a pluggable platform
//!   [`PortLookup`] strategy, then the `~/.spyglass/port` file, then the
//!   compiled default `8090`.

#![deny(unsafe_code)]

mod errors;
mod loader;
mod port;
mod types;

pub use errors::{Result, SettingsError};
pub use loader::{apply_env_overrides, load_settings, load_settings_from_path, settings_path};
pub use port::{NoopPortLookup, PortLookup, port_file_path, resolve_port, resolve_port_with};
pub use types::BridgeSettings;
