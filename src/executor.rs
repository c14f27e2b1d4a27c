use std::sync::Arc;

use crate::backend::{BackendError, ChatBackend};
use crate::chat::{Message, Tool};
use crate::error::ChatError;

/// Total attempts per round-trip, the first one included.
pub const MAX_ATTEMPTS: usize = 3;

/// Outgoing user content is cut to this many characters.
pub const MAX_INPUT_CHARS: usize = 12_250;

const CONTEXT_LENGTH_EXCEEDED: &str = "context_length_exceeded";

/// Performs one round-trip with the completion service.
///
/// Failures that retrying cannot fix (bad credential, throttling, unknown
/// model, oversized prompt) are classified and returned right away. Anything
/// else is retried immediately, without delay, until [`MAX_ATTEMPTS`] is
/// reached.
pub struct RequestExecutor {
    backend: Arc<dyn ChatBackend>,
    tools: Vec<Tool>,
}

impl RequestExecutor {
    /// `tools` is the schema list sent when tools are enabled.
    pub fn new(backend: Arc<dyn ChatBackend>, tools: Vec<Tool>) -> Self {
        Self { backend, tools }
    }

    pub fn model(&self) -> &str {
        self.backend.model()
    }

    pub async fn execute(
        &self,
        history: &[Message],
        tools_enabled: bool,
    ) -> Result<Message, ChatError> {
        let tools = if tools_enabled && !self.tools.is_empty() {
            Some(self.tools.as_slice())
        } else {
            None
        };

        let mut last_err: Option<BackendError> = None;
        for attempt in 1..=MAX_ATTEMPTS {
            log::debug!(
                "round-trip attempt {}/{} (model {}, {} messages, tools {})",
                attempt,
                MAX_ATTEMPTS,
                self.backend.model(),
                history.len(),
                tools.is_some()
            );
            match self.backend.chat(history, tools).await {
                Ok(reply) => return Ok(reply.into_message()),
                Err(err) => {
                    if let Some(classified) = classify(&err) {
                        log::warn!("round-trip failed, not retrying: {}", err);
                        return Err(classified);
                    }
                    log::warn!("round-trip attempt {} failed: {}", attempt, err);
                    last_err = Some(err);
                }
            }
        }

        Err(ChatError::ExhaustedRetries {
            attempts: MAX_ATTEMPTS,
            last_error: last_err.map(|e| e.to_string()).unwrap_or_default(),
        })
    }
}

/// Maps failures that must not be retried to their error kind.
fn classify(err: &BackendError) -> Option<ChatError> {
    match err {
        BackendError::Status { status: 404, .. } => Some(ChatError::ModelNotFound),
        BackendError::Status {
            status: 400,
            code: Some(code),
            ..
        } if code == CONTEXT_LENGTH_EXCEEDED => Some(ChatError::PromptTooLarge),
        BackendError::Status { status: 401, .. } => Some(ChatError::InvalidCredential),
        BackendError::Status { status: 429, .. } => Some(ChatError::RateLimited),
        _ => None,
    }
}

/// Cuts `content` to at most [`MAX_INPUT_CHARS`] characters.
pub fn truncate_input(content: &str) -> String {
    match content.char_indices().nth(MAX_INPUT_CHARS) {
        Some((idx, _)) => content[..idx].to_string(),
        None => content.to_string(),
    }
}
