use serde_json::Value;

use crate::chat::{Tool, ToolCall};
use crate::error::ChatError;

use super::definition::ToolDefinition;
use super::error::ToolError;
use super::time::current_time_tool;
use super::web_search::{web_search_tool, WebSearchConfig};

/// The fixed set of tools offered to the model, in registration order.
#[derive(Clone, Debug)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<ToolDefinition>) -> Self {
        Self { tools }
    }

    /// The built-in tools: clock first, then web search.
    pub fn builtin(search: WebSearchConfig) -> Result<Self, ToolError> {
        Ok(Self::new(vec![current_time_tool(), web_search_tool(search)?]))
    }

    /// Get the list of tool names
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name).collect()
    }

    pub fn schemas(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDefinition::schema).collect()
    }

    /// Runs the tool named by `call`.
    ///
    /// The first tool registered under the name handles it. A handler fault
    /// becomes [`ChatError::ToolFailure`]; an unknown name or a handler that
    /// produced nothing becomes [`ChatError::NoToolHandled`].
    pub async fn dispatch(&self, call: &ToolCall) -> Result<String, ChatError> {
        let name = call.name();
        let Some(tool) = self.tools.iter().find(|t| t.name == name) else {
            log::warn!("model requested unknown tool '{}'", name);
            return Err(ChatError::NoToolHandled {
                tool: name.to_string(),
            });
        };

        let args = parse_args(&call.function.arguments).map_err(|err| failure(name, err))?;
        log::info!("dispatching tool '{}' (call {})", name, call.id);

        match tool.handler.call(args).await {
            Ok(Some(output)) if !output.is_empty() => Ok(output),
            Ok(_) => {
                log::warn!("tool '{}' produced no output", name);
                Err(ChatError::NoToolHandled {
                    tool: name.to_string(),
                })
            }
            Err(err) => {
                log::warn!("tool '{}' failed: {}", name, err);
                Err(failure(name, err))
            }
        }
    }
}

fn parse_args(raw: &str) -> Result<Value, ToolError> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(raw).map_err(|err| ToolError::InvalidArgs(err.to_string()))
}

fn failure(tool: &str, err: ToolError) -> ChatError {
    ChatError::ToolFailure {
        tool: tool.to_string(),
        message: err.to_string(),
    }
}
