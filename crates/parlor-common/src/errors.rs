use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures writing or reading transcript files.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("transcript format error: {0}")]
    Format(String),

    #[error("could not determine {0} directory")]
    NoBaseDir(&'static str),
}

impl PersistError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParlorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error("ai error: {0}")]
    Ai(String),
}
