//! Tool error types.
//!
//! Validation failures are caught before anything goes over the wire; bridge
//! failures pass through with their kind intact so the dispatch surface can
//! tag them for the caller.

use spyglass_core::BridgeError;
use thiserror::Error;

/// Errors that can occur when invoking a tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Parameter validation failed; nothing was sent to the peer.
    #[error("validation error: {message}")]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// Tool not found in the registry.
    #[error("tool not found: {name}")]
    NotFound {
        /// The tool name that was not found.
        name: String,
    },

    /// A bridge failure — connection, timeout, or peer-reported error.
    #[error("{0}")]
    Bridge(#[from] BridgeError),
}

impl ToolError {
    /// Machine-readable tag for the dispatch surface.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::NotFound { .. } => "not_found",
            Self::Bridge(BridgeError::Connection { .. }) => "connection",
            Self::Bridge(BridgeError::Timeout { .. }) => "timeout",
            Self::Bridge(BridgeError::ToolExecution { .. }) => "tool_execution",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display() {
        let err = ToolError::Validation {
            message: "limit must be a positive integer".into(),
        };
        assert_eq!(
            err.to_string(),
            "validation error: limit must be a positive integer"
        );
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn bridge_errors_keep_their_kind() {
        let err = ToolError::from(BridgeError::Timeout {
            method: "get_console_logs".into(),
            timeout_ms: 10_000,
        });
        assert_eq!(err.kind(), "timeout");

        let err = ToolError::from(BridgeError::connection("closed"));
        assert_eq!(err.kind(), "connection");

        let err = ToolError::from(BridgeError::tool_execution("boom"));
        assert_eq!(err.kind(), "tool_execution");
    }
}
