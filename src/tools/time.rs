use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use serde_json::Value;

use super::definition::{ToolDefinition, ToolHandler};
use super::error::ToolError;

pub const CURRENT_TIME_TOOL: &str = "get_current_time";

/// `Mon, 02 Jan 2006 15:04:05 -0700`
const TIME_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

struct CurrentTime;

#[async_trait]
impl ToolHandler for CurrentTime {
    async fn call(&self, _args: Value) -> Result<Option<String>, ToolError> {
        Ok(Some(Local::now().format(TIME_FORMAT).to_string()))
    }
}

pub fn current_time_tool() -> ToolDefinition {
    ToolDefinition {
        name: CURRENT_TIME_TOOL,
        description: "Returns the current server time.",
        params: Vec::new(),
        required: Vec::new(),
        handler: Arc::new(CurrentTime),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn returns_parsable_timestamp() {
        let out = CurrentTime
            .call(Value::Object(Default::default()))
            .await
            .unwrap()
            .unwrap();
        assert!(DateTime::parse_from_str(&out, TIME_FORMAT).is_ok(), "{out}");
    }

    #[test]
    fn schema_declares_no_parameters() {
        let schema = current_time_tool().schema();
        assert_eq!(schema.function.name, "get_current_time");
        assert_eq!(
            schema.function.parameters,
            serde_json::json!({"type": "object", "properties": {}})
        );
    }
}
