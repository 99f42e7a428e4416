//! Session types: states, outcomes, and the presentation seam.

use chrono::{DateTime, Local};
use parlor_common::EntryRole;

use crate::{AiError, Completion};

/// Identifier of a dispatched completion request.
pub type RequestId = u64;

/// Utterance sent by `submit_continuation`.
pub const CONTINUATION_PHRASE: &str = "please continue";

/// System notice shown after a reset.
pub const RESET_NOTICE: &str = "Conversation cleared. Starting a new conversation.";

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// A completion request is outstanding.
    Awaiting { request_id: RequestId },
    /// Shut down; no further operations are accepted.
    Closed,
}

/// Receives every change the user should see.
pub trait Presenter {
    fn on_message_appended(&mut self, role: EntryRole, content: &str, timestamp: DateTime<Local>);
    fn on_transcript_cleared(&mut self);
}

/// Result of a worker's completion call, marshaled back to the controller.
#[derive(Debug)]
pub struct CompletionOutcome {
    pub request_id: RequestId,
    pub result: Result<Completion, AiError>,
}

/// What `submit` did with an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Dispatched(RequestId),
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Blank after trimming.
    Empty,
    /// A request is already in flight.
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("a request is already in flight")]
    Busy,
    #[error("session is closed")]
    Closed,
    #[error("user messages must not be empty")]
    EmptyMessage,
}

/// Per-session settings fixed at startup.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Model or deployment identifier sent with every request.
    pub model: String,
    pub max_output_tokens: u32,
    pub system_prompt: String,
    /// Leading component of transcript file names.
    pub file_prefix: String,
}

impl SessionSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_output_tokens: 1000,
            system_prompt: "You are a helpful assistant.".to_string(),
            file_prefix: "chat".to_string(),
        }
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }
}
