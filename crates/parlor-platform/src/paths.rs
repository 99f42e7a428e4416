use std::fs;
use std::path::{Path, PathBuf};

use parlor_common::PersistError;

const APP_NAME: &str = "parlor";

/// Returns the platform-specific data directory for Parlor.
///
/// - macOS: `~/Library/Application Support/parlor`
/// - Linux: `$XDG_DATA_HOME/parlor` (defaults to `~/.local/share/parlor`)
/// - Windows: `%APPDATA%\parlor`
pub fn data_dir() -> Result<PathBuf, PersistError> {
    Ok(dirs::data_dir()
        .ok_or(PersistError::NoBaseDir("data"))?
        .join(APP_NAME))
}

/// Directory holding transcript files: `override_dir` if given, otherwise
/// `data_dir()/transcripts`.
pub fn transcript_dir(override_dir: Option<&Path>) -> Result<PathBuf, PersistError> {
    match override_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(data_dir()?.join("transcripts")),
    }
}

/// Creates `dir` and its parents if they do not already exist.
pub fn ensure_dir(dir: &Path) -> Result<(), PersistError> {
    fs::create_dir_all(dir).map_err(|e| PersistError::io(dir, e))
}
