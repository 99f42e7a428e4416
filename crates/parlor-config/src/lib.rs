//! Parlor configuration system.
//!
//! Provides TOML-based settings for the completion endpoint, generation
//! limits, and transcript storage. All sections use defaults so partial
//! configs work out of the box, and environment variables can supply the
//! endpoint credentials.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use parlor_config::load_config;
//!
//! let config = load_config(None).unwrap_or_default();
//! println!("{}", config.api.deployment);
//! ```

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::ParlorConfig;

use std::path::Path;

use parlor_common::ConfigError;

/// Load config from `path`, or from the platform default path when `None`.
///
/// The default path is created with a commented template if missing. An
/// explicit path that does not exist is an error.
pub fn load_config(path: Option<&Path>) -> Result<ParlorConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}
