//! CompletionClient trait implementation for AzureOpenAiClient.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::{AiError, Completion, CompletionClient, CompletionRequest};

use super::client::{error_message, AzureOpenAiClient};

#[async_trait]
impl CompletionClient for AzureOpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, AiError> {
        let url = self.completions_url(&request.model);
        let body = self.build_request_body(request);

        debug!(
            deployment = %request.model,
            messages = request.messages.len(),
            max_tokens = request.max_output_tokens,
            "Azure OpenAI request"
        );

        let response = self
            .http
            .post(&url)
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = error_message(&text);
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(AiError::Unauthorized(message));
            }
            return Err(AiError::ApiError(format!("HTTP {status}: {message}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        let completion = self.parse_response(json)?;
        debug!(
            input_tokens = completion.usage.input_tokens,
            output_tokens = completion.usage.output_tokens,
            "Azure OpenAI response"
        );
        Ok(completion)
    }
}
