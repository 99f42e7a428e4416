//! Remote completion endpoint settings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder used when no API key is configured.
pub const PLACEHOLDER_API_KEY: &str = "your_default_key";
/// Placeholder used when no endpoint is configured.
pub const PLACEHOLDER_ENDPOINT: &str = "your_default_endpoint";
/// Placeholder used when no deployment is configured.
pub const PLACEHOLDER_DEPLOYMENT: &str = "your_default_deployment_name";

/// Azure OpenAI style endpoint configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub api_key: String,
    /// Base URL of the resource, e.g. `https://my-resource.openai.azure.com`.
    pub endpoint: String,
    /// Deployment (model) identifier sent with every request.
    pub deployment: String,
    pub api_version: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: PLACEHOLDER_API_KEY.to_string(),
            endpoint: PLACEHOLDER_ENDPOINT.to_string(),
            deployment: PLACEHOLDER_DEPLOYMENT.to_string(),
            api_version: "2023-05-15".to_string(),
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl ApiConfig {
    /// Returns the names of fields still holding placeholder values.
    pub fn placeholder_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.api_key == PLACEHOLDER_API_KEY {
            fields.push("api.api_key");
        }
        if self.endpoint == PLACEHOLDER_ENDPOINT {
            fields.push("api.endpoint");
        }
        if self.deployment == PLACEHOLDER_DEPLOYMENT {
            fields.push("api.deployment");
        }
        fields
    }
}
