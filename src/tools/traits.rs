//! Tool definitions advertised to MCP clients.

use crate::catalog::ToolSpec;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Definition of a tool as listed by `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Describe a catalog tool. Every parameter is an optional string.
    pub fn from_spec(spec: &ToolSpec) -> Self {
        let mut properties = Map::new();
        for p in spec.params {
            properties.insert(
                p.name.to_string(),
                json!({
                    "type": "string",
                    "description": p.description,
                    "default": p.default,
                }),
            );
        }
        Self {
            name: spec.name.to_string(),
            description: spec.description.to_string(),
            input_schema: json!({
                "type": "object",
                "properties": properties,
            }),
        }
    }
}
