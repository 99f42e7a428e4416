//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    let config = ParlorConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_zero_max_output_tokens() {
    let mut config = ParlorConfig::default();
    config.generation.max_output_tokens = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("generation.max_output_tokens"));
}

#[test]
fn catches_max_output_tokens_too_large() {
    let mut config = ParlorConfig::default();
    config.generation.max_output_tokens = 500_000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("generation.max_output_tokens"));
}

#[test]
fn catches_blank_system_prompt() {
    let mut config = ParlorConfig::default();
    config.generation.system_prompt = "   ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("generation.system_prompt"));
}

#[test]
fn catches_empty_api_version() {
    let mut config = ParlorConfig::default();
    config.api.api_version = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("api.api_version"));
}

#[test]
fn catches_deployment_with_slash() {
    let mut config = ParlorConfig::default();
    config.api.deployment = "gpt/4".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("api.deployment"));
}

#[test]
fn catches_path_separator_in_prefix() {
    let mut config = ParlorConfig::default();
    config.storage.file_prefix = "../chat".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("storage.file_prefix"));
}

#[test]
fn catches_empty_latest_session_file() {
    let mut config = ParlorConfig::default();
    config.storage.latest_session_file = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("storage.latest_session_file"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = ParlorConfig::default();
    config.generation.max_output_tokens = 0;
    config.storage.file_prefix = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("generation.max_output_tokens"));
    assert!(err.contains("storage.file_prefix"));
    assert!(err.contains("; "));
}

#[test]
fn placeholder_api_values_are_accepted() {
    let config = ParlorConfig::default();
    assert!(!config.api.placeholder_fields().is_empty());
    assert!(validate(&config).is_ok());
}
