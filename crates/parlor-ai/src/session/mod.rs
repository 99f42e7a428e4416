//! Conversation session management.
//!
//! A `ConversationStore` holds the ordered message log and the persistence
//! cursor; a `SessionController` drives the single-flight request cycle
//! over it and reports every visible change to a `Presenter`.

mod controller;
mod store;
mod types;


pub use controller::SessionController;
pub use store::ConversationStore;
pub use types::{
    CompletionOutcome, IgnoreReason, Presenter, RequestId, SessionError, SessionSettings,
    SessionState, Submission, CONTINUATION_PHRASE, RESET_NOTICE,
};
