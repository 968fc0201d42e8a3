//! Wire envelopes exchanged with the extension peer.
//!
//! Outbound: `{ "id": string, "method": string, "params": object }`.
//! Inbound: `{ "id": string, "result": any }` on success, or
//! `{ "id": string, "error": { "message": string, "details": any } }` when
//! the peer failed to execute the request.
//!
//! Envelopes are transient — built per send, parsed per receive, never
//! retained.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::RequestId;

/// One outbound request.
#[derive(Clone, Debug, Serialize)]
pub struct RequestEnvelope {
    /// Correlation id the peer must echo back.
    pub id: RequestId,
    /// Name of the operation to invoke.
    pub method: String,
    /// Operation parameters.
    pub params: Value,
}

/// One inbound reply.
#[derive(Clone, Debug, Deserialize)]
pub struct ReplyEnvelope {
    /// Correlation id of the request this answers.
    pub id: RequestId,
    /// Success payload. May be absent even on success (resolved as `null`).
    #[serde(default)]
    pub result: Option<Value>,
    /// Error payload. Presence marks the reply as a failure.
    #[serde(default)]
    pub error: Option<ReplyError>,
}

/// Error payload inside a reply.
#[derive(Clone, Debug, Deserialize)]
pub struct ReplyError {
    /// Human-readable message from the peer.
    pub message: String,
    /// Optional structured details.
    #[serde(default)]
    pub details: Option<Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_serializes_to_wire_shape() {
        let req = RequestEnvelope {
            id: RequestId::from("X"),
            method: "get_console_logs".into(),
            params: json!({"limit": 50}),
        };
        let wire = serde_json::to_value(&req).unwrap();
        assert_eq!(
            wire,
            json!({"id": "X", "method": "get_console_logs", "params": {"limit": 50}})
        );
    }

    #[test]
    fn success_reply_parses() {
        let reply: ReplyEnvelope =
            serde_json::from_str(r#"{"id":"X","result":{"success":true}}"#).unwrap();
        assert_eq!(reply.id.as_str(), "X");
        assert!(reply.error.is_none());
        assert_eq!(reply.result, Some(json!({"success": true})));
    }

    #[test]
    fn error_reply_parses_with_optional_details() {
        let reply: ReplyEnvelope =
            serde_json::from_str(r#"{"id":"X","error":{"message":"boom"}}"#).unwrap();
        let err = reply.error.expect("error field");
        assert_eq!(err.message, "boom");
        assert!(err.details.is_none());

        let reply: ReplyEnvelope = serde_json::from_str(
            r##"{"id":"Y","error":{"message":"bad selector","details":{"selector":"#x"}}}"##,
        )
        .unwrap();
        let err = reply.error.expect("error field");
        assert_eq!(err.details, Some(json!({"selector": "#x"})));
    }

    #[test]
    fn reply_without_result_or_error_is_bare_success() {
        let reply: ReplyEnvelope = serde_json::from_str(r#"{"id":"Z"}"#).unwrap();
        assert!(reply.result.is_none());
        assert!(reply.error.is_none());
    }
}
