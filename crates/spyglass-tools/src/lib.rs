//! # spyglass-tools
//!
//! The tool surface of the Spyglass bridge.
//!
//! Defines the [`BridgeTool`] trait, the [`ToolRegistry`] that indexes tools
//! by name, and the browser-observation tools themselves — console logs,
//! network logs, screenshot, selected element, log wipe. Every tool is a
//! thin forward: validate the parameters, send one correlated request over
//! the bridge, hand back the peer's payload.

#![deny(unsafe_code)]

mod browser;
mod errors;
mod registry;
mod traits;
mod types;

pub use browser::{LogRetrievalTool, SnapshotTool, register_builtin};
pub use errors::ToolError;
pub use registry::ToolRegistry;
pub use traits::BridgeTool;
pub use types::{Tool, ToolParameterSchema};
