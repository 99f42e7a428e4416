//! Generation settings applied to every completion request.

use serde::{Deserialize, Serialize};

/// System prompt that opens every fresh conversation.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Output token ceiling per request (valid range: 1-128000).
    pub max_output_tokens: u32,
    pub system_prompt: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: 1000,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}
