//! Strict-mode function schema construction for OpenAI tools.
//!
//! Strict mode is unforgiving: every declared property must appear in
//! `required` (the parameter's own required flag does not matter there),
//! object properties must pin `additionalProperties: false` with an explicit
//! property map, and arrays must declare an item type. Schemas that break
//! these rules are rejected by the provider before the model ever runs.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::tools::{ParamKind, Tool};

fn json_type(kind: ParamKind) -> &'static str {
    match kind {
        ParamKind::String => "string",
        ParamKind::Integer => "integer",
        ParamKind::Float => "number",
        ParamKind::Boolean => "boolean",
        ParamKind::List => "array",
        ParamKind::Map => "object",
        // No schema vocabulary for "anything"; strings survive round-trips
        ParamKind::Any => "string",
    }
}

/// Build the strict function schema for one tool.
pub fn function_schema(tool: &dyn Tool) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for param in tool.parameters() {
        let mut property = Map::new();
        property.insert("type".to_string(), json!(json_type(param.kind)));
        property.insert("description".to_string(), json!(param.description));

        match param.kind {
            ParamKind::Map => {
                property.insert("additionalProperties".to_string(), json!(false));
                property.insert("properties".to_string(), json!({}));
            }
            ParamKind::List => {
                property.insert("items".to_string(), json!({"type": "string"}));
            }
            _ => {}
        }

        // Strict mode: every property goes in `required`, even the ones the
        // tool itself treats as optional.
        required.push(json!(param.name));
        properties.insert(param.name, Value::Object(property));
    }

    json!({
        "type": "function",
        "name": tool.name(),
        "description": tool.description(),
        "parameters": {
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        },
        "strict": true,
    })
}

/// Schemas for a whole tool set, in declaration order.
pub fn function_schemas(tools: &[Arc<dyn Tool>]) -> Vec<Value> {
    tools
        .iter()
        .map(|tool| function_schema(tool.as_ref()))
        .collect()
}
