//! Browser-observation tools.
//!
//! Every tool here is a thin forward over the bridge: the method name on the
//! wire is the tool name, and the peer does the actual work inside the
//! browser. Two shapes cover the whole family — log retrieval (optional
//! `limit`) and parameterless snapshots.

use async_trait::async_trait;
use serde_json::{Value, json};
use spyglass_conn::BridgeClient;

use crate::errors::ToolError;
use crate::traits::BridgeTool;
use crate::types::{Tool, ToolParameterSchema};

/// Default cap on returned log entries when the caller gives none.
const DEFAULT_LOG_LIMIT: u64 = 50;

/// A log-retrieval tool: takes an optional positive `limit`, forwards it.
pub struct LogRetrievalTool {
    name: &'static str,
    description: &'static str,
    client: BridgeClient,
}

impl LogRetrievalTool {
    /// `get_console_logs` — everything the page wrote to the console.
    #[must_use]
    pub fn console_logs(client: BridgeClient) -> Self {
        Self {
            name: "get_console_logs",
            description: "Retrieve recent console log entries from the connected browser tab.",
            client,
        }
    }

    /// `get_console_errors` — console errors only.
    #[must_use]
    pub fn console_errors(client: BridgeClient) -> Self {
        Self {
            name: "get_console_errors",
            description: "Retrieve recent console errors from the connected browser tab.",
            client,
        }
    }

    /// `get_network_logs` — observed network requests.
    #[must_use]
    pub fn network_logs(client: BridgeClient) -> Self {
        Self {
            name: "get_network_logs",
            description: "Retrieve recent network request logs from the connected browser tab.",
            client,
        }
    }

    /// `get_network_errors` — failed network requests only.
    #[must_use]
    pub fn network_errors(client: BridgeClient) -> Self {
        Self {
            name: "get_network_errors",
            description: "Retrieve recent failed network requests from the connected browser tab.",
            client,
        }
    }
}

#[async_trait]
impl BridgeTool for LogRetrievalTool {
    fn name(&self) -> &str {
        self.name
    }

    fn definition(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: self.description.into(),
            parameters: ToolParameterSchema {
                schema_type: "object".into(),
                properties: Some({
                    let mut m = serde_json::Map::new();
                    let _ = m.insert(
                        "limit".into(),
                        json!({
                            "type": "integer",
                            "minimum": 1,
                            "description": "Maximum number of entries to return",
                        }),
                    );
                    m
                }),
                required: None,
            },
        }
    }

    async fn execute(&self, params: Value) -> Result<Value, ToolError> {
        let limit = parse_limit(&params)?;
        let result = self
            .client
            .send_request(self.name, json!({ "limit": limit }), None)
            .await?;
        Ok(result)
    }
}

/// A parameterless snapshot tool: screenshot, selected element, log wipe.
pub struct SnapshotTool {
    name: &'static str,
    description: &'static str,
    client: BridgeClient,
}

impl SnapshotTool {
    /// `take_screenshot` — capture the current tab (base64 in the result).
    #[must_use]
    pub fn screenshot(client: BridgeClient) -> Self {
        Self {
            name: "take_screenshot",
            description: "Capture a screenshot of the connected browser tab.",
            client,
        }
    }

    /// `get_selected_element` — the element currently selected in devtools.
    #[must_use]
    pub fn selected_element(client: BridgeClient) -> Self {
        Self {
            name: "get_selected_element",
            description: "Get the element currently selected in the browser's devtools.",
            client,
        }
    }

    /// `wipe_logs` — clear the peer's log buffers.
    #[must_use]
    pub fn wipe_logs(client: BridgeClient) -> Self {
        Self {
            name: "wipe_logs",
            description: "Clear all captured logs in the connected browser tab.",
            client,
        }
    }
}

#[async_trait]
impl BridgeTool for SnapshotTool {
    fn name(&self) -> &str {
        self.name
    }

    fn definition(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: self.description.into(),
            parameters: ToolParameterSchema::empty_object(),
        }
    }

    async fn execute(&self, _params: Value) -> Result<Value, ToolError> {
        let result = self.client.send_request(self.name, json!({}), None).await?;
        Ok(result)
    }
}

/// Register the full built-in tool family against one bridge client.
pub fn register_builtin(registry: &mut crate::ToolRegistry, client: &BridgeClient) {
    registry.register(std::sync::Arc::new(LogRetrievalTool::console_logs(client.clone())));
    registry.register(std::sync::Arc::new(LogRetrievalTool::console_errors(client.clone())));
    registry.register(std::sync::Arc::new(LogRetrievalTool::network_logs(client.clone())));
    registry.register(std::sync::Arc::new(LogRetrievalTool::network_errors(client.clone())));
    registry.register(std::sync::Arc::new(SnapshotTool::screenshot(client.clone())));
    registry.register(std::sync::Arc::new(SnapshotTool::selected_element(client.clone())));
    registry.register(std::sync::Arc::new(SnapshotTool::wipe_logs(client.clone())));
}

/// Validate the optional `limit` parameter: a positive integer, defaulted
/// when absent.
fn parse_limit(params: &Value) -> Result<u64, ToolError> {
    match params.get("limit") {
        None | Some(Value::Null) => Ok(DEFAULT_LOG_LIMIT),
        Some(v) => match v.as_u64() {
            Some(n) if n >= 1 => Ok(n),
            _ => Err(ToolError::Validation {
                message: format!("limit must be a positive integer, got {v}"),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;
    use spyglass_conn::BridgeConfig;

    use super::*;
    use crate::ToolRegistry;

    fn dead_client() -> BridgeClient {
        // Never connected to in these tests.
        BridgeClient::spawn(BridgeConfig::for_port(1))
    }

    #[test]
    fn parse_limit_accepts_positive_integers() {
        assert_eq!(parse_limit(&json!({"limit": 10})).unwrap(), 10);
        assert_eq!(parse_limit(&json!({})).unwrap(), DEFAULT_LOG_LIMIT);
        assert_eq!(parse_limit(&json!({"limit": null})).unwrap(), DEFAULT_LOG_LIMIT);
    }

    #[test]
    fn parse_limit_rejects_zero_negative_and_non_integers() {
        assert_matches!(
            parse_limit(&json!({"limit": 0})),
            Err(ToolError::Validation { .. })
        );
        assert_matches!(
            parse_limit(&json!({"limit": -5})),
            Err(ToolError::Validation { .. })
        );
        assert_matches!(
            parse_limit(&json!({"limit": "ten"})),
            Err(ToolError::Validation { .. })
        );
    }

    #[tokio::test]
    async fn invalid_limit_fails_before_touching_the_wire() {
        let tool = LogRetrievalTool::console_logs(dead_client());
        let err = tool.execute(json!({"limit": 0})).await.unwrap_err();
        assert_matches!(err, ToolError::Validation { .. });
    }

    #[tokio::test]
    async fn register_builtin_registers_the_whole_family() {
        let mut registry = ToolRegistry::new();
        register_builtin(&mut registry, &dead_client());
        assert_eq!(
            registry.names(),
            vec![
                "get_console_errors",
                "get_console_logs",
                "get_network_errors",
                "get_network_logs",
                "get_selected_element",
                "take_screenshot",
                "wipe_logs",
            ]
        );
    }

    #[tokio::test]
    async fn definitions_expose_limit_schema() {
        let tool = LogRetrievalTool::network_logs(dead_client());
        let def = tool.definition();
        assert_eq!(def.name, "get_network_logs");
        let props = def.parameters.properties.unwrap();
        assert!(props.contains_key("limit"));
    }
}
