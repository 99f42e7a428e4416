//! AI engine for Parlor.
//!
//! Provides:
//! - the `CompletionClient` seam over a hosted chat-completion endpoint
//! - an Azure OpenAI implementation of it
//! - the conversation store and single-flight session controller

pub mod azure;
pub mod session;

use async_trait::async_trait;

pub use azure::{AzureConfig, AzureOpenAiClient};
pub use parlor_common::{Message, Role};
pub use session::{
    CompletionOutcome, ConversationStore, Presenter, SessionController, SessionError,
    SessionSettings, SessionState, Submission,
};

/// A hosted chat-completion service.
///
/// Calls are independent: the full ordered conversation is supplied on
/// every request and nothing is retained between calls.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, AiError>;
}

/// One completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Model or deployment identifier.
    pub model: String,
    pub messages: Vec<Message>,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AiError::Timeout
        } else if e.is_decode() {
            AiError::ParseError(e.to_string())
        } else {
            AiError::NetworkError(e.to_string())
        }
    }
}
