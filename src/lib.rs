//! Conversation orchestration for a terminal chat assistant.
//!
//! A [`Conversation`] keeps the message history, sends it to an
//! OpenAI-compatible completion service through a [`RequestExecutor`], runs
//! the tools the model asks for from a [`ToolRegistry`], and returns the
//! model's final answer.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use parley::backend::{OpenAIBackend, OpenAIConfig};
//! use parley::tools::{ToolRegistry, WebSearchConfig};
//! use parley::Conversation;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = OpenAIBackend::new(OpenAIConfig::new(std::env::var("OPENAI_API_KEY")?))?;
//! let tools = ToolRegistry::builtin(WebSearchConfig::default())?;
//! let mut conversation = Conversation::new(Arc::new(backend), tools);
//! let answer = conversation.send_message("What time is it?").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod chat;
pub mod conversation;
pub mod error;
pub mod executor;
pub mod tools;

pub use conversation::{Conversation, ConversationState};
pub use error::ChatError;
pub use executor::RequestExecutor;
