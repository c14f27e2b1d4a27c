mod message;
mod tool;

pub use message::{Message, MessageBuilder, Role};
pub use tool::{FunctionCall, FunctionTool, ParameterProperty, ParametersSchema, Tool, ToolCall};
