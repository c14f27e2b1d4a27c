use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::chat::{FunctionTool, ParameterProperty, ParametersSchema, Tool};

use super::error::ToolError;

/// Executes one tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Run the tool with parsed JSON arguments.
    ///
    /// `Ok(None)` means the tool produced nothing for this request.
    async fn call(&self, args: Value) -> Result<Option<String>, ToolError>;
}

#[derive(Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ToolParam>,
    pub required: Vec<&'static str>,
    pub handler: Arc<dyn ToolHandler>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolParam {
    pub name: &'static str,
    pub description: &'static str,
    pub param_type: &'static str,
}

impl ToolParam {
    /// Create a simple parameter.
    pub const fn simple(
        name: &'static str,
        description: &'static str,
        param_type: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            param_type,
        }
    }
}

impl ToolDefinition {
    /// Schema advertised to the model.
    pub fn schema(&self) -> Tool {
        let properties: HashMap<String, ParameterProperty> = self
            .params
            .iter()
            .map(|param| {
                (
                    param.name.to_string(),
                    ParameterProperty {
                        property_type: param.param_type.to_string(),
                        description: param.description.to_string(),
                    },
                )
            })
            .collect();
        let parameters = ParametersSchema {
            schema_type: "object".to_string(),
            properties,
            required: self.required.iter().map(|s| s.to_string()).collect(),
        };
        Tool {
            tool_type: "function".to_string(),
            function: FunctionTool {
                name: self.name.to_string(),
                description: self.description.to_string(),
                parameters: serde_json::to_value(parameters).unwrap_or(Value::Null),
            },
        }
    }
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("required", &self.required)
            .finish()
    }
}
