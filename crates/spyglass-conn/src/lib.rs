//! # spyglass-conn
//!
//! The connection manager at the heart of the Spyglass bridge.
//!
//! Maintains exactly one persistent WebSocket to the extension peer,
//! multiplexes concurrent requests over it by correlation id, enforces
//! per-request timeouts, and guarantees that every outstanding request
//! resolves — success, peer error, timeout, or connection loss — no matter
//! how the socket dies.
//!
//! Structure: a single actor task ([`actor`]) owns the socket, the pending
//! request table, and the timeout queue; all mutation happens there,
//! serialized through one `select!` loop. Callers hold a cloneable
//! [`BridgeClient`] and talk to the actor over a command channel, suspending
//! on per-call oneshot replies. No locks anywhere.

#![deny(unsafe_code)]

mod actor;
mod client;
mod config;

pub use client::BridgeClient;
pub use config::BridgeConfig;
