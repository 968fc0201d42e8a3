//! Newline-delimited JSON dispatch surface.
//!
//! One request per line: `{"id"?: any, "tool": string, "params"?: object}`.
//! One response per line: `{"id"?, "result"?}` on success, or
//! `{"id"?, "error": {"kind": string, "message": string}}` on failure. The
//! `kind` tag preserves the bridge's error taxonomy for the caller.
//!
//! `list_tools` is handled here rather than by the registry: it returns the
//! schemas of every registered tool without touching the wire.

use serde::Deserialize;
use serde_json::{Map, Value, json};
use spyglass_tools::{ToolError, ToolRegistry};
use tokio::io::{AsyncBufRead, AsyncBufReadExt as _, AsyncWrite, AsyncWriteExt as _};
use tracing::debug;

/// One inbound invocation line.
#[derive(Debug, Deserialize)]
struct DispatchRequest {
    /// Opaque caller correlation value, echoed back verbatim.
    #[serde(default)]
    id: Option<Value>,
    /// Tool name to invoke.
    tool: String,
    /// Tool parameters.
    #[serde(default)]
    params: Value,
}

/// Serve invocations from `reader` until EOF, writing responses to `writer`.
pub async fn serve<R, W>(registry: &ToolRegistry, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(registry, &line).await;
        let mut out = response.to_string();
        out.push('\n');
        writer.write_all(out.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}

async fn handle_line(registry: &ToolRegistry, line: &str) -> Value {
    let request: DispatchRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            return error_response(None, "validation", &format!("malformed request: {e}"));
        }
    };
    debug!(tool = %request.tool, "dispatching");

    if request.tool == "list_tools" {
        let mut response = Map::new();
        if let Some(id) = request.id {
            let _ = response.insert("id".into(), id);
        }
        let _ = response.insert("result".into(), json!({"tools": registry.definitions()}));
        return Value::Object(response);
    }

    let Some(tool) = registry.get(&request.tool) else {
        let err = ToolError::NotFound { name: request.tool };
        return error_response(request.id, err.kind(), &err.to_string());
    };
    match tool.execute(request.params).await {
        Ok(result) => {
            let mut response = Map::new();
            if let Some(id) = request.id {
                let _ = response.insert("id".into(), id);
            }
            let _ = response.insert("result".into(), result);
            Value::Object(response)
        }
        Err(e) => error_response(request.id, e.kind(), &e.to_string()),
    }
}

fn error_response(id: Option<Value>, kind: &str, message: &str) -> Value {
    let mut response = Map::new();
    if let Some(id) = id {
        let _ = response.insert("id".into(), id);
    }
    let _ = response.insert("error".into(), json!({"kind": kind, "message": message}));
    Value::Object(response)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use spyglass_tools::{BridgeTool, Tool, ToolParameterSchema};

    use super::*;

    /// Tool double: echoes its params, or fails when told to.
    struct EchoTool;

    #[async_trait]
    impl BridgeTool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn definition(&self) -> Tool {
            Tool {
                name: "echo".into(),
                description: "echoes".into(),
                parameters: ToolParameterSchema::empty_object(),
            }
        }

        async fn execute(&self, params: Value) -> Result<Value, ToolError> {
            if params.get("fail").is_some() {
                return Err(ToolError::Validation {
                    message: "told to fail".into(),
                });
            }
            Ok(params)
        }
    }

    fn echo_registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));
        registry
    }

    async fn run_lines(input: &str) -> Vec<Value> {
        let registry = echo_registry();
        let mut output = std::io::Cursor::new(Vec::new());
        serve(&registry, input.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output.into_inner())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn success_response_echoes_id_and_result() {
        let responses = run_lines(r#"{"id": 1, "tool": "echo", "params": {"x": 2}}"#).await;
        assert_eq!(responses, vec![json!({"id": 1, "result": {"x": 2}})]);
    }

    #[tokio::test]
    async fn tool_error_is_tagged_with_its_kind() {
        let responses = run_lines(r#"{"tool": "echo", "params": {"fail": true}}"#).await;
        assert_eq!(responses[0]["error"]["kind"], json!("validation"));
    }

    #[tokio::test]
    async fn unknown_tool_yields_not_found() {
        let responses = run_lines(r#"{"id": "a", "tool": "nope"}"#).await;
        assert_eq!(responses[0]["id"], json!("a"));
        assert_eq!(responses[0]["error"]["kind"], json!("not_found"));
    }

    #[tokio::test]
    async fn malformed_line_yields_validation_error_without_id() {
        let responses = run_lines("{not json\n").await;
        assert_eq!(responses[0]["error"]["kind"], json!("validation"));
        assert!(responses[0].get("id").is_none());
    }

    #[tokio::test]
    async fn list_tools_returns_registered_schemas() {
        let responses = run_lines(r#"{"id": 7, "tool": "list_tools"}"#).await;
        assert_eq!(responses[0]["id"], json!(7));
        let tools = responses[0]["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], json!("echo"));
        assert_eq!(tools[0]["parameters"]["type"], json!("object"));
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let responses = run_lines("\n\n{\"tool\": \"echo\"}\n\n").await;
        assert_eq!(responses.len(), 1);
    }
}
