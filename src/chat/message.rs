use std::fmt;

use super::tool::ToolCall;

/// Role of a participant in a chat conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Instructions for the model, never shown to the user
    System,
    /// The user/human participant in the conversation
    User,
    /// The AI assistant participant in the conversation
    Assistant,
    /// Output of a tool the assistant asked for
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry of the conversation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Who produced this message
    pub role: Role,
    /// The text content of the message
    pub content: String,
    /// For tool messages, the id of the tool call this message answers
    pub tool_call_id: Option<String>,
    /// For assistant messages, the tools the model asked to run
    pub tool_calls: Vec<ToolCall>,
}

impl Message {
    /// Create a new builder for a user message
    pub fn user() -> MessageBuilder {
        MessageBuilder::new(Role::User)
    }

    /// Create a new builder for an assistant message
    pub fn assistant() -> MessageBuilder {
        MessageBuilder::new(Role::Assistant)
    }

    /// Create a tool message answering the call with the given id.
    pub fn tool(call_id: impl Into<String>) -> MessageBuilder {
        MessageBuilder::new(Role::Tool).tool_call_id(call_id)
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Builder for Message
#[derive(Debug)]
pub struct MessageBuilder {
    role: Role,
    content: String,
    tool_call_id: Option<String>,
    tool_calls: Vec<ToolCall>,
}

impl MessageBuilder {
    /// Create a new MessageBuilder with specified role
    pub fn new(role: Role) -> Self {
        Self {
            role,
            content: String::new(),
            tool_call_id: None,
            tool_calls: Vec::new(),
        }
    }

    /// Set the message content
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Link the message to the tool call it answers
    pub fn tool_call_id(mut self, id: impl Into<String>) -> Self {
        self.tool_call_id = Some(id.into());
        self
    }

    /// Attach the tool calls requested by the model
    pub fn tool_calls(mut self, calls: Vec<ToolCall>) -> Self {
        self.tool_calls = calls;
        self
    }

    /// Build the Message
    pub fn build(self) -> Message {
        Message {
            role: self.role,
            content: self.content,
            tool_call_id: self.tool_call_id,
            tool_calls: self.tool_calls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_builder_links_call_id() {
        let msg = Message::tool("call_7").content("12:00").build();
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_7"));
        assert!(!msg.has_tool_calls());
    }

    #[test]
    fn assistant_builder_keeps_requested_calls() {
        let msg = Message::assistant()
            .tool_calls(vec![ToolCall::function("call_1", "get_current_time", "{}")])
            .build();
        assert!(msg.has_tool_calls());
        assert!(msg.content.is_empty());
        assert_eq!(msg.role.to_string(), "assistant");
    }
}
