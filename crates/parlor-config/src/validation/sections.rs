//! Validation for the api, generation, and storage sections.

use crate::schema::ParlorConfig;

use super::helpers::{validate_file_component, validate_non_empty, validate_range};

/// Largest output ceiling accepted for a single request.
const MAX_OUTPUT_TOKENS: u32 = 128_000;

/// Validate endpoint settings.
///
/// Placeholder values are accepted so a fresh install still starts; the
/// application reports them separately.
pub(crate) fn validate_api(errors: &mut Vec<String>, config: &ParlorConfig) {
    validate_non_empty(errors, "api.api_version", &config.api.api_version);
    validate_non_empty(errors, "api.deployment", &config.api.deployment);
    validate_file_component(errors, "api.deployment", &config.api.deployment);
}

/// Validate generation constraints.
pub(crate) fn validate_generation(errors: &mut Vec<String>, config: &ParlorConfig) {
    validate_range(
        errors,
        "generation.max_output_tokens",
        config.generation.max_output_tokens,
        1,
        MAX_OUTPUT_TOKENS,
    );
    validate_non_empty(
        errors,
        "generation.system_prompt",
        &config.generation.system_prompt,
    );
}

/// Validate storage names.
pub(crate) fn validate_storage(errors: &mut Vec<String>, config: &ParlorConfig) {
    validate_non_empty(errors, "storage.file_prefix", &config.storage.file_prefix);
    validate_file_component(errors, "storage.file_prefix", &config.storage.file_prefix);
    validate_non_empty(
        errors,
        "storage.latest_session_file",
        &config.storage.latest_session_file,
    );
    validate_file_component(
        errors,
        "storage.latest_session_file",
        &config.storage.latest_session_file,
    );
}
