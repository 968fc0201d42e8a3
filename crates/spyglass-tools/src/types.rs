//! Tool definition types.
//!
//! The schema shape is JSON-Schema-compatible so the dispatch surface can
//! hand it straight to whatever caller consumes the tool listing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON Schema-compatible parameter definition for a tool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolParameterSchema {
    /// Top-level JSON Schema type.
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Property definitions (when type is `object`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Map<String, Value>>,
    /// Required property names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl ToolParameterSchema {
    /// An object schema with no properties (tools that take no arguments).
    #[must_use]
    pub fn empty_object() -> Self {
        Self {
            schema_type: "object".into(),
            properties: None,
            required: None,
        }
    }
}

/// A tool definition exposed to callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name (unique identifier).
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the tool's parameters.
    pub parameters: ToolParameterSchema,
}
