//! The conversation engine.
//!
//! A turn goes through
//! `Idle -> AwaitingFirstResponse -> (ToolDispatch -> AwaitingFinalResponse)? -> Idle`.
//! Every message produced on the way is appended to the history, which is
//! never rewritten: a failed turn leaves behind whatever it appended.

use std::sync::Arc;

use crate::backend::ChatBackend;
use crate::chat::{Message, ToolCall};
use crate::error::ChatError;
use crate::executor::{truncate_input, RequestExecutor};
use crate::tools::ToolRegistry;


/// Where a conversation is within the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    Idle,
    AwaitingFirstResponse,
    ToolDispatch,
    AwaitingFinalResponse,
}

/// One chat session and its history.
///
/// `send_message` takes `&mut self`, so a conversation only ever has one turn
/// in flight.
pub struct Conversation {
    executor: RequestExecutor,
    tools: ToolRegistry,
    history: Vec<Message>,
    state: ConversationState,
}

impl Conversation {
    pub fn new(backend: Arc<dyn ChatBackend>, tools: ToolRegistry) -> Self {
        let executor = RequestExecutor::new(backend, tools.schemas());
        Self {
            executor,
            tools,
            history: Vec::new(),
            state: ConversationState::Idle,
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// An owned copy of the history, detached from later turns.
    pub fn snapshot(&self) -> Vec<Message> {
        self.history.clone()
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn model(&self) -> &str {
        self.executor.model()
    }

    /// Sends the user's text and returns the assistant's final answer.
    pub async fn send_message(&mut self, text: &str) -> Result<String, ChatError> {
        let result = self.run_turn(text).await;
        self.state = ConversationState::Idle;
        result
    }

    async fn run_turn(&mut self, text: &str) -> Result<String, ChatError> {
        self.history
            .push(Message::user().content(truncate_input(text)).build());

        self.state = ConversationState::AwaitingFirstResponse;
        let reply = self.executor.execute(&self.history, true).await?;
        if !reply.has_tool_calls() {
            let answer = reply.content.clone();
            self.history.push(reply);
            return Ok(answer);
        }

        let calls = reply.tool_calls.clone();
        self.history.push(reply);

        self.state = ConversationState::ToolDispatch;
        self.dispatch_first(&calls).await?;

        self.state = ConversationState::AwaitingFinalResponse;
        let answer = self.executor.execute(&self.history, false).await?;
        let text = answer.content.clone();
        self.history.push(answer);
        Ok(text)
    }

    /// Runs the requested calls in order until one of them yields output.
    ///
    /// Calls after the first answered one are not executed. A tool fault
    /// aborts the turn; calls nobody handles are skipped, and if none is
    /// handled the last such error is returned.
    async fn dispatch_first(&mut self, calls: &[ToolCall]) -> Result<(), ChatError> {
        let mut unhandled = None;
        for call in calls {
            match self.tools.dispatch(call).await {
                Ok(output) => {
                    self.history
                        .push(Message::tool(call.id.clone()).content(output).build());
                    if calls.len() > 1 {
                        log::debug!(
                            "answered {}, leaving {} other requested calls unexecuted",
                            call,
                            calls.len() - 1
                        );
                    }
                    return Ok(());
                }
                Err(err @ ChatError::NoToolHandled { .. }) => unhandled = Some(err),
                Err(err) => return Err(err),
            }
        }
        Err(unhandled.unwrap_or_else(|| ChatError::NoToolHandled {
            tool: String::new(),
        }))
    }
}
