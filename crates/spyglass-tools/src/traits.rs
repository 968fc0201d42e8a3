//! The tool trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ToolError;
use crate::types::Tool;

/// The trait every bridge tool implements.
///
/// A tool validates its parameters, forwards exactly one request over the
/// bridge, and returns the peer's payload untouched.
#[async_trait]
pub trait BridgeTool: Send + Sync {
    /// Tool name — the exact string callers invoke.
    fn name(&self) -> &str;

    /// Schema exposed in the tool listing.
    fn definition(&self) -> Tool;

    /// Execute the tool with JSON arguments.
    async fn execute(&self, params: Value) -> Result<Value, ToolError>;
}
