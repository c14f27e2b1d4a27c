use thiserror::Error;

/// Classified failures returned by a conversation turn.
///
/// Every error that leaves the core is one of these kinds, so hosts can match
/// on them exhaustively when deciding what to show the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChatError {
    /// The service rejected the API credential (HTTP 401).
    #[error("invalid api key")]
    InvalidCredential,
    /// The service is throttling requests (HTTP 429).
    #[error("rate limit error")]
    RateLimited,
    /// The conversation no longer fits in the model's context window.
    #[error("maximum prompt size exceeded")]
    PromptTooLarge,
    /// The configured model does not exist on the service (HTTP 404).
    #[error("model not found")]
    ModelNotFound,
    /// Every attempt of a round-trip failed with a transient error.
    #[error("no more retries after {attempts} attempts: {last_error}")]
    ExhaustedRetries { attempts: usize, last_error: String },
    /// A tool recognized the call but failed while handling it.
    #[error("tool '{tool}' failed: {message}")]
    ToolFailure { tool: String, message: String },
    /// The model asked for a tool and nothing in the registry answered.
    #[error("no tool handled the call to '{tool}'")]
    NoToolHandled { tool: String },
}

impl ChatError {
    /// Whether the failure is caused by a missing or wrong credential.
    pub fn is_credential_error(&self) -> bool {
        matches!(self, ChatError::InvalidCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        assert_eq!(ChatError::InvalidCredential.to_string(), "invalid api key");
        assert_eq!(
            ChatError::ExhaustedRetries {
                attempts: 3,
                last_error: "HTTP 500".to_string(),
            }
            .to_string(),
            "no more retries after 3 attempts: HTTP 500"
        );
        assert_eq!(
            ChatError::NoToolHandled {
                tool: "lookup".to_string()
            }
            .to_string(),
            "no tool handled the call to 'lookup'"
        );
    }

    #[test]
    fn only_invalid_credential_is_a_credential_error() {
        assert!(ChatError::InvalidCredential.is_credential_error());
        assert!(!ChatError::RateLimited.is_credential_error());
        assert!(!ChatError::ModelNotFound.is_credential_error());
    }
}
