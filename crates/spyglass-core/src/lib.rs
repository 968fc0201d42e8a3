//! # spyglass-core
//!
//! Foundation types for the Spyglass browser bridge.
//!
//! This crate provides the shared vocabulary that all other Spyglass crates
//! depend on:
//!
//! - **Errors**: [`BridgeError`] — the three failure kinds callers can see
//!   (`Connection`, `Timeout`, `ToolExecution`)
//! - **Wire envelopes**: [`wire::RequestEnvelope`] / [`wire::ReplyEnvelope`]
//!   — the JSON shapes exchanged with the extension peer
//! - **IDs**: [`RequestId`] — branded correlation identifier (UUID v7)
//! - **Constants**: default port, endpoint path, timeout durations

#![deny(unsafe_code)]

pub mod constants;
mod errors;
mod ids;
pub mod wire;

pub use errors::BridgeError;
pub use ids::RequestId;
