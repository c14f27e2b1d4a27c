//! Raw access to a chat completion service.
//!
//! A [`ChatBackend`] performs exactly one round-trip and reports failures as
//! unclassified [`BackendError`] values. Retrying and classification are the
//! job of [`crate::RequestExecutor`].

mod openai;
#[cfg(test)]
pub(crate) mod scripted;

use async_trait::async_trait;
use thiserror::Error;

use crate::chat::{Message, Tool, ToolCall};

pub use openai::{
    OpenAIBackend, OpenAIConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT,
};

/// The assistant turn returned by one round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistantReply {
    /// Natural-language answer, if the model produced one
    pub content: Option<String>,
    /// Tools the model asked the host to run
    pub tool_calls: Vec<ToolCall>,
}

impl AssistantReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    pub fn with_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: None,
            tool_calls,
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Convert the reply into an assistant history entry.
    pub fn into_message(self) -> Message {
        Message::assistant()
            .content(self.content.unwrap_or_default())
            .tool_calls(self.tool_calls)
            .build()
    }
}

/// Low-level failure of a single round-trip, before classification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// Connection, TLS, timeout or other transport failure
    #[error("HTTP error: {0}")]
    Transport(String),
    /// The service answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Status {
        status: u16,
        /// Provider-specific error code, e.g. "context_length_exceeded"
        code: Option<String>,
        message: String,
    },
    /// The service answered but the body could not be understood
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    Decode {
        message: String,
        raw_response: String,
    },
    /// The backend could not be constructed from its configuration
    #[error("Invalid backend configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode {
            message: format!("{} at line {} column {}", err, err.line(), err.column()),
            raw_response: String::new(),
        }
    }
}

/// A service able to complete a conversation.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Model identifier sent with every request.
    fn model(&self) -> &str;

    /// Send the full history and, when given, the tool schemas.
    async fn chat(
        &self,
        messages: &[Message],
        tools: Option<&[Tool]>,
    ) -> Result<AssistantReply, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;

    #[test]
    fn reply_without_content_becomes_empty_assistant_message() {
        let reply = AssistantReply::with_tool_calls(vec![ToolCall::function(
            "call_1",
            "get_current_time",
            "{}",
        )]);
        let msg = reply.into_message();
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "");
        assert_eq!(msg.tool_calls.len(), 1);
    }

    #[test]
    fn status_error_display_includes_code_free_message() {
        let err = BackendError::Status {
            status: 503,
            code: None,
            message: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: overloaded");
    }
}
