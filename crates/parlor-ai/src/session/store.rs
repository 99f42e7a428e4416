//! Ordered message log with a persistence cursor.

use parlor_common::{Message, Role};

use super::types::SessionError;

/// Conversation history owned by a session.
///
/// The first message is always the system prompt. `cursor` marks the first
/// message not yet written to the session transcript.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    messages: Vec<Message>,
    cursor: usize,
    session_name: Option<String>,
    system_prompt: String,
}

impl ConversationStore {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        let system_prompt = system_prompt.into();
        Self {
            messages: vec![Message::system(system_prompt.clone())],
            cursor: 0,
            session_name: None,
            system_prompt,
        }
    }

    /// Append a message. User messages must have non-blank content.
    pub fn append(&mut self, message: Message) -> Result<(), SessionError> {
        if message.role == Role::User && message.content.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        self.messages.push(message);
        Ok(())
    }

    /// Start over with only the system prompt.
    pub fn reset(&mut self) {
        self.messages = vec![Message::system(self.system_prompt.clone())];
        self.cursor = 0;
        self.session_name = None;
    }

    /// Replace the log with a previously saved conversation.
    ///
    /// The restored messages are already durable, so the cursor moves to the
    /// end. A missing leading system message is supplied from the prompt.
    pub fn restore(&mut self, messages: Vec<Message>) {
        let mut restored = Vec::with_capacity(messages.len() + 1);
        if messages.first().map(|m| m.role) != Some(Role::System) {
            restored.push(Message::system(self.system_prompt.clone()));
        }
        restored.extend(messages);

        self.cursor = restored.len();
        self.messages = restored;
        self.session_name = None;
    }

    /// Messages appended since the last flush.
    pub fn pending_suffix(&self) -> &[Message] {
        &self.messages[self.cursor..]
    }

    /// Record that everything up to the current end has been written.
    pub fn mark_flushed(&mut self) {
        self.cursor = self.messages.len();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Transcript file name of this conversation, once derived.
    pub fn session_name(&self) -> Option<&str> {
        self.session_name.as_deref()
    }

    /// Fix the session name, unless one is already set.
    pub fn session_name_or_insert_with(&mut self, derive: impl FnOnce() -> String) -> &str {
        self.session_name.get_or_insert_with(derive)
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ConversationStore {
        ConversationStore::new("You are a helpful assistant.")
    }

    #[test]
    fn starts_with_system_prompt() {
        let store = store();
        assert_eq!(store.len(), 1);
        assert_eq!(store.messages()[0].role, Role::System);
        assert_eq!(store.cursor(), 0);
        assert!(store.session_name().is_none());
    }

    #[test]
    fn rejects_blank_user_message() {
        let mut store = store();
        assert_eq!(
            store.append(Message::user("   ")),
            Err(SessionError::EmptyMessage)
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn allows_empty_assistant_message() {
        let mut store = store();
        store.append(Message::assistant("")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn pending_suffix_tracks_cursor() {
        let mut store = store();
        store.append(Message::user("a")).unwrap();
        assert_eq!(store.pending_suffix().len(), 2);

        store.mark_flushed();
        assert!(store.pending_suffix().is_empty());
        assert_eq!(store.cursor(), store.len());

        store.append(Message::assistant("b")).unwrap();
        assert_eq!(store.pending_suffix(), &[Message::assistant("b")]);
    }

    #[test]
    fn reset_restores_single_system_message() {
        let mut store = store();
        store.append(Message::user("a")).unwrap();
        store.session_name_or_insert_with(|| "chat_x.md".into());
        store.mark_flushed();

        store.reset();

        assert_eq!(store.len(), 1);
        assert_eq!(store.messages()[0].role, Role::System);
        assert_eq!(store.cursor(), 0);
        assert!(store.session_name().is_none());
    }

    #[test]
    fn never_empty() {
        let mut store = store();
        assert!(!store.is_empty());

        store.reset();
        assert!(!store.is_empty());

        store.restore(Vec::new());
        assert!(!store.is_empty());
        assert_eq!(store.messages(), &[Message::system("You are a helpful assistant.")]);
    }

    #[test]
    fn session_name_is_set_once() {
        let mut store = store();
        assert_eq!(store.session_name_or_insert_with(|| "first.md".into()), "first.md");
        assert_eq!(store.session_name_or_insert_with(|| "second.md".into()), "first.md");
    }

    #[test]
    fn restore_marks_everything_flushed() {
        let mut store = store();
        store.session_name_or_insert_with(|| "old.md".into());
        store.restore(vec![
            Message::system("Be terse."),
            Message::user("q"),
            Message::assistant("a"),
        ]);

        assert_eq!(store.len(), 3);
        assert_eq!(store.messages()[0].content, "Be terse.");
        assert!(store.pending_suffix().is_empty());
        assert!(store.session_name().is_none());
    }

    #[test]
    fn restore_prepends_missing_system_prompt() {
        let mut store = store();
        store.restore(vec![Message::user("q")]);
        assert_eq!(store.messages()[0], Message::system("You are a helpful assistant."));
        assert_eq!(store.len(), 2);
        assert_eq!(store.cursor(), 2);
    }
}
