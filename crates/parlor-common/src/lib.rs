pub mod errors;
pub mod types;

pub use errors::{ConfigError, ParlorError, PersistError};
pub use types::{EntryRole, Message, Role};

pub type Result<T> = std::result::Result<T, ParlorError>;
