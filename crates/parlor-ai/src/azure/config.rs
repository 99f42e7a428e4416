//! Azure OpenAI client configuration.

use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_VERSION: &str = "2023-05-15";

/// Azure OpenAI client configuration.
#[derive(Clone)]
pub struct AzureConfig {
    pub api_key: String,
    /// Resource base URL, e.g. `https://my-resource.openai.azure.com`.
    pub endpoint: String,
    pub api_version: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl fmt::Debug for AzureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureConfig")
            .field("api_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl AzureConfig {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
