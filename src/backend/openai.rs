//! Client for OpenAI-compatible chat completion endpoints.
//!
//! Works against the OpenAI API as well as self-hosted servers exposing the
//! same `/chat/completions` route (llama.cpp server, vLLM, ...).

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chat::{Message, Role, Tool, ToolCall};

use super::{AssistantReply, BackendError, ChatBackend};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_SYSTEM_PROMPT: &str = "Format the response as markdown.";

/// Configuration for the OpenAI-compatible client.
#[derive(Debug)]
pub struct OpenAIConfig {
    /// Bearer credential; may be empty, the service decides.
    pub api_key: SecretString,
    /// Base URL of the API, e.g. `http://localhost:8000/v1`.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// System prompt prepended to every request.
    pub system: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system: Some(DEFAULT_SYSTEM_PROMPT.to_string()),
            timeout_seconds: None,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn system(mut self, system: Option<String>) -> Self {
        self.system = system;
        self
    }

    pub fn timeout_seconds(mut self, timeout_seconds: Option<u64>) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

/// Client for an OpenAI-compatible chat completion API.
///
/// The client uses `Arc` internally for configuration, making cloning cheap.
#[derive(Debug, Clone)]
pub struct OpenAIBackend {
    config: Arc<OpenAIConfig>,
    endpoint: Url,
    client: Client,
}

#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [Tool]>,
}

#[derive(Serialize, Debug, PartialEq)]
struct WireMessage<'a> {
    role: &'static str,
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<&'a ToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    message: Option<String>,
    code: Option<Value>,
}

impl OpenAIBackend {
    pub fn new(config: OpenAIConfig) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(sec) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(sec));
        }
        let client = builder
            .build()
            .map_err(|err| BackendError::Config(err.to_string()))?;
        Self::with_client(client, config)
    }

    /// Creates a new client with a custom HTTP client.
    pub fn with_client(client: Client, config: OpenAIConfig) -> Result<Self, BackendError> {
        let endpoint = completions_endpoint(&config.base_url)?;
        Ok(Self {
            config: Arc::new(config),
            endpoint,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for OpenAIBackend {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn chat(
        &self,
        messages: &[Message],
        tools: Option<&[Tool]>,
    ) -> Result<AssistantReply, BackendError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: wire_messages(self.config.system.as_deref(), messages),
            tools: tools.filter(|t| !t.is_empty()),
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("chat completion payload: {}", json);
            }
        }

        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        log::debug!("chat completion HTTP status: {}", status);

        let raw = resp.text().await?;
        if !status.is_success() {
            return Err(status_error(status, &raw));
        }
        parse_reply(raw)
    }
}

fn completions_endpoint(base_url: &str) -> Result<Url, BackendError> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base)
        .and_then(|url| url.join("chat/completions"))
        .map_err(|err| BackendError::Config(format!("invalid base url '{base_url}': {err}")))
}

/// Builds the outgoing message list.
///
/// The system prompt goes first. Assistant tool calls without a matching tool
/// reply in the history are left out, the service rejects unanswered calls.
fn wire_messages<'a>(system: Option<&'a str>, messages: &'a [Message]) -> Vec<WireMessage<'a>> {
    let answered: HashSet<&str> = messages
        .iter()
        .filter(|m| m.role == Role::Tool)
        .filter_map(|m| m.tool_call_id.as_deref())
        .collect();

    let mut out = Vec::with_capacity(messages.len() + 1);
    if let Some(system) = system.filter(|s| !s.is_empty()) {
        out.push(WireMessage {
            role: Role::System.as_str(),
            content: Some(system),
            tool_calls: Vec::new(),
            tool_call_id: None,
        });
    }
    for msg in messages {
        let tool_calls: Vec<&ToolCall> = msg
            .tool_calls
            .iter()
            .filter(|call| answered.contains(call.id.as_str()))
            .collect();
        let content = if msg.content.is_empty() && !tool_calls.is_empty() {
            None
        } else {
            Some(msg.content.as_str())
        };
        out.push(WireMessage {
            role: msg.role.as_str(),
            content,
            tool_calls,
            tool_call_id: msg.tool_call_id.as_deref(),
        });
    }
    out
}

fn status_error(status: StatusCode, raw: &str) -> BackendError {
    let (code, message) = match serde_json::from_str::<ErrorEnvelope>(raw) {
        Ok(envelope) => (
            envelope.error.code.and_then(|code| match code {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            }),
            envelope.error.message.unwrap_or_else(|| raw.to_string()),
        ),
        Err(_) => (None, raw.to_string()),
    };
    BackendError::Status {
        status: status.as_u16(),
        code,
        message,
    }
}

fn parse_reply(raw: String) -> Result<AssistantReply, BackendError> {
    let parsed: ChatCompletionResponse = match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            return Err(BackendError::Decode {
                message: err.to_string(),
                raw_response: raw,
            })
        }
    };
    let Some(choice) = parsed.choices.into_iter().next() else {
        return Err(BackendError::Decode {
            message: "response contains no choices".to_string(),
            raw_response: raw,
        });
    };
    Ok(AssistantReply {
        content: choice.message.content,
        tool_calls: choice.message.tool_calls.unwrap_or_default(),
    })
}
