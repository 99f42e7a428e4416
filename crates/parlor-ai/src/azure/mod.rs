//! Azure OpenAI chat-completions client.
//!
//! Implements the `CompletionClient` trait against a deployment endpoint
//! (`{endpoint}/openai/deployments/{deployment}/chat/completions`),
//! authenticating with the `api-key` header.

mod api;
mod client;
mod config;

pub use client::AzureOpenAiClient;
pub use config::AzureConfig;
