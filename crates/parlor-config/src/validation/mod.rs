//! Full configuration validation.
//!
//! Each section has its own check; this orchestrator calls them all and
//! collects errors into a single `ConfigError`.

mod helpers;
mod sections;

#[cfg(test)]
mod tests;

use crate::schema::ParlorConfig;
use parlor_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ParlorConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_api(&mut errors, config);
    sections::validate_generation(&mut errors, config);
    sections::validate_storage(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
