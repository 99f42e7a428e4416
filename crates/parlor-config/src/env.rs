//! Environment variable overrides for endpoint settings.

use tracing::debug;

use crate::schema::ParlorConfig;

pub const ENV_API_KEY: &str = "AZURE_OPENAI_KEY";
pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_DEPLOYMENT: &str = "DEPLOYMENT_NAME";

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: &mut ParlorConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

/// Apply overrides from an arbitrary lookup. Blank values are ignored.
pub fn apply_overrides(config: &mut ParlorConfig, lookup: impl Fn(&str) -> Option<String>) {
    let targets: [(&str, &mut String); 3] = [
        (ENV_API_KEY, &mut config.api.api_key),
        (ENV_ENDPOINT, &mut config.api.endpoint),
        (ENV_DEPLOYMENT, &mut config.api.deployment),
    ];

    for (key, field) in targets {
        if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
            debug!("{key} overrides config file value");
            *field = value.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = ParlorConfig::default();
        apply_overrides(
            &mut config,
            lookup_from(&[
                (ENV_API_KEY, "env-key"),
                (ENV_ENDPOINT, "https://env.openai.azure.com"),
                (ENV_DEPLOYMENT, "gpt-4o-mini"),
            ]),
        );
        assert_eq!(config.api.api_key, "env-key");
        assert_eq!(config.api.endpoint, "https://env.openai.azure.com");
        assert_eq!(config.api.deployment, "gpt-4o-mini");
        assert!(config.api.placeholder_fields().is_empty());
    }

    #[test]
    fn missing_and_blank_values_are_ignored() {
        let mut config = ParlorConfig::default();
        config.api.endpoint = "https://file.openai.azure.com".into();
        apply_overrides(&mut config, lookup_from(&[(ENV_ENDPOINT, "   ")]));
        assert_eq!(config.api.endpoint, "https://file.openai.azure.com");
        assert_eq!(config.api.api_key, "your_default_key");
    }
}
