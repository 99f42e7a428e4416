//! Azure OpenAI client struct, request building, and response parsing.

use crate::{AiError, Completion, CompletionRequest, TokenUsage};

use super::config::AzureConfig;

/// Longest slice of an error body carried into an `AiError`.
const ERROR_BODY_LIMIT: usize = 200;

/// Azure OpenAI client.
pub struct AzureOpenAiClient {
    pub(crate) config: AzureConfig,
    pub(crate) http: reqwest::Client,
}

impl AzureOpenAiClient {
    pub fn new(config: AzureConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &AzureConfig {
        &self.config
    }

    /// Chat-completions URL for `deployment`.
    pub(crate) fn completions_url(&self, deployment: &str) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            deployment,
            self.config.api_version
        )
    }

    /// Build the JSON request body. The deployment lives in the URL.
    pub(crate) fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let messages: Vec<_> = request
            .messages
            .iter()
            .map(|msg| {
                serde_json::json!({
                    "role": msg.role.to_string(),
                    "content": msg.content,
                })
            })
            .collect();

        serde_json::json!({
            "messages": messages,
            "max_tokens": request.max_output_tokens,
        })
    }

    /// Parse a successful response body.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<Completion, AiError> {
        let content = json["choices"]
            .get(0)
            .and_then(|choice| choice["message"]["content"].as_str())
            .ok_or_else(|| AiError::ParseError("response has no message content".into()))?
            .to_string();

        let usage = TokenUsage {
            input_tokens: json["usage"]["prompt_tokens"].as_u64().unwrap_or(0),
            output_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0),
        };

        Ok(Completion { content, usage })
    }
}

/// Pull a readable message out of an error response body.
///
/// Azure wraps errors as `{"error": {"message": ...}}`; anything else is
/// passed through truncated.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.chars().take(ERROR_BODY_LIMIT).collect())
}
