//! Configuration schema types for Parlor.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with placeholder or built-in defaults.

mod api;
mod generation;
mod storage;

pub use api::*;
pub use generation::*;
pub use storage::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Parlor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParlorConfig {
    pub api: ApiConfig,
    pub generation: GenerationConfig,
    pub storage: StorageConfig,
}

// =============================================================================
// Tests
// =============================================================================
