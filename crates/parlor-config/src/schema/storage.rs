//! Transcript storage settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for transcript files. `None` means the platform data dir.
    pub transcript_dir: Option<PathBuf>,
    /// Leading component of per-session transcript file names.
    pub file_prefix: String,
    /// Fixed file name of the latest-session snapshot.
    pub latest_session_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            transcript_dir: None,
            file_prefix: "chat".to_string(),
            latest_session_file: "latest_session.md".to_string(),
        }
    }
}
