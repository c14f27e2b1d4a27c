use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Represents a parameter in a function tool
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParameterProperty {
    /// The type of the parameter (e.g. "string", "number", "array", etc)
    #[serde(rename = "type")]
    pub property_type: String,
    /// Description of what the parameter does
    pub description: String,
}

/// Represents the parameters schema for a function tool
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParametersSchema {
    /// The type of the parameters object (usually "object")
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Map of parameter names to their properties
    pub properties: HashMap<String, ParameterProperty>,
    /// List of required parameter names
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

/// Represents a function definition for a tool.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FunctionTool {
    /// Name of the function
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON Schema describing the parameters
    pub parameters: Value,
}

/// Represents a tool that can be used in chat
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Tool {
    /// The type of tool (e.g. "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// The function definition if this is a function tool
    pub function: FunctionTool,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolCall {
    /// Identifier used to correlate the tool result with this request.
    pub id: String,
    /// Always "function" for chat completion tools.
    #[serde(rename = "type", default = "default_call_type")]
    pub call_type: String,
    /// The function to call and its raw JSON arguments.
    pub function: FunctionCall,
}

/// Name and arguments of a requested function call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionCall {
    pub name: String,
    /// Arguments as the JSON text produced by the model.
    #[serde(default)]
    pub arguments: String,
}

fn default_call_type() -> String {
    "function".to_string()
}

impl ToolCall {
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            call_type: default_call_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }
}

impl fmt::Display for ToolCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) [{}]",
            self.function.name, self.function.arguments, self.id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_call_defaults_missing_type_and_arguments() {
        let raw = json!({"id": "call_1", "function": {"name": "get_current_time"}});
        let call: ToolCall = serde_json::from_value(raw).unwrap();
        assert_eq!(call.call_type, "function");
        assert_eq!(call.name(), "get_current_time");
        assert!(call.function.arguments.is_empty());
    }

    #[test]
    fn tool_call_display_names_call() {
        let call = ToolCall::function("call_7", "web_search", r#"{"query":"rust"}"#);
        assert_eq!(call.to_string(), r#"web_search({"query":"rust"}) [call_7]"#);
    }

    #[test]
    fn schema_omits_empty_required_list() {
        let schema = ParametersSchema {
            schema_type: "object".to_string(),
            properties: HashMap::new(),
            required: Vec::new(),
        };
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"type": "object", "properties": {}})
        );
    }
}
