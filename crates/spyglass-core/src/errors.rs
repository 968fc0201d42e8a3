//! Bridge error taxonomy.
//!
//! Every failure a caller can observe is one of three kinds: the socket
//! could not be established or maintained (`Connection`), the peer never
//! answered in time (`Timeout`), or the peer explicitly answered with an
//! error payload (`ToolExecution`). Nothing opaque is ever surfaced.

use serde_json::Value;
use thiserror::Error;

/// Errors surfaced to bridge callers.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The socket could not be established or maintained — connect timeout,
    /// handshake failure, send failure, or explicit/peer close.
    #[error("connection error: {message}")]
    Connection {
        /// Description of the connection failure.
        message: String,
    },

    /// The request was sent but no reply arrived within the deadline.
    #[error("timeout after {timeout_ms}ms waiting for reply to {method}")]
    Timeout {
        /// The method that went unanswered.
        method: String,
        /// The deadline in milliseconds.
        timeout_ms: u64,
    },

    /// The peer returned an error payload for this specific request.
    #[error("tool execution failed: {message}")]
    ToolExecution {
        /// The peer's error message.
        message: String,
        /// Optional structured details from the peer.
        details: Option<Value>,
    },
}

impl BridgeError {
    /// Create a `Connection` error from any displayable message.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a `ToolExecution` error with no details.
    #[must_use]
    pub fn tool_execution(message: impl Into<String>) -> Self {
        Self::ToolExecution {
            message: message.into(),
            details: None,
        }
    }
}
