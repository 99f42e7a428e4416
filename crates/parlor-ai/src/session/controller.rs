//! Single-flight request/response cycle over a conversation.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Local;
use parlor_common::{EntryRole, Message, PersistError, Role};
use parlor_platform::{session_file_name, TranscriptWriter};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{AiError, Completion, CompletionClient, CompletionRequest};

use super::store::ConversationStore;
use super::types::{
    CompletionOutcome, IgnoreReason, Presenter, RequestId, SessionError, SessionSettings,
    SessionState, Submission, CONTINUATION_PHRASE, RESET_NOTICE,
};

/// Drives one conversation against a completion service.
///
/// All methods run on the owning task. Completion calls run on spawned
/// tasks and come back through the receiver returned by [`new`], which the
/// owner drains into [`handle_outcome`]. At most one call is outstanding:
/// dispatch only happens on the `Idle -> Awaiting` edge.
///
/// [`new`]: SessionController::new
/// [`handle_outcome`]: SessionController::handle_outcome
pub struct SessionController {
    store: ConversationStore,
    state: SessionState,
    settings: SessionSettings,
    client: Arc<dyn CompletionClient>,
    writer: TranscriptWriter,
    presenter: Box<dyn Presenter>,
    runtime: Handle,
    outcome_tx: mpsc::UnboundedSender<CompletionOutcome>,
    next_request_id: RequestId,
    /// Session names handed out by this controller, written or not.
    issued_names: HashSet<String>,
}

impl SessionController {
    pub fn new(
        settings: SessionSettings,
        client: Arc<dyn CompletionClient>,
        writer: TranscriptWriter,
        presenter: Box<dyn Presenter>,
        runtime: Handle,
    ) -> (Self, mpsc::UnboundedReceiver<CompletionOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let controller = Self {
            store: ConversationStore::new(settings.system_prompt.clone()),
            state: SessionState::Idle,
            settings,
            client,
            writer,
            presenter,
            runtime,
            outcome_tx,
            next_request_id: 1,
            issued_names: HashSet::new(),
        };
        (controller, outcome_rx)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True exactly while a completion request is outstanding.
    pub fn is_processing(&self) -> bool {
        matches!(self.state, SessionState::Awaiting { .. })
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn writer(&self) -> &TranscriptWriter {
        &self.writer
    }

    /// Submit a user utterance.
    ///
    /// Blank text and submissions while a request is outstanding are
    /// dropped, not queued.
    pub fn submit(&mut self, text: &str) -> Result<Submission, SessionError> {
        match self.state {
            SessionState::Closed => return Err(SessionError::Closed),
            SessionState::Awaiting { request_id } => {
                debug!(request_id, "submission dropped while awaiting a reply");
                return Ok(Submission::Ignored(IgnoreReason::Busy));
            }
            SessionState::Idle => {}
        }

        let text = text.trim();
        if text.is_empty() {
            return Ok(Submission::Ignored(IgnoreReason::Empty));
        }

        if self.store.session_name().is_none() {
            let name = self.claim_session_name(text);
            debug!(session = %name, "session transcript");
            self.store.session_name_or_insert_with(|| name);
        }

        self.store.append(Message::user(text))?;

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.state = SessionState::Awaiting { request_id };

        self.presenter
            .on_message_appended(EntryRole::User, text, Local::now());
        self.dispatch(request_id);

        Ok(Submission::Dispatched(request_id))
    }

    /// Ask the model to carry on from its previous answer.
    pub fn submit_continuation(&mut self) -> Result<Submission, SessionError> {
        self.submit(CONTINUATION_PHRASE)
    }

    /// Apply a completion result marshaled back from the worker.
    ///
    /// Outcomes for anything but the outstanding request are discarded.
    pub fn handle_outcome(&mut self, outcome: CompletionOutcome) {
        let CompletionOutcome { request_id, result } = outcome;
        match self.state {
            SessionState::Awaiting { request_id: current } if current == request_id => {}
            state => {
                debug!(request_id, ?state, "discarding stale completion outcome");
                return;
            }
        }

        match result {
            Ok(completion) => self.on_success(completion),
            Err(e) => self.on_failure(e),
        }
    }

    /// Clear the conversation and start a new one.
    ///
    /// Rejected while a request is outstanding.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Closed => return Err(SessionError::Closed),
            SessionState::Awaiting { .. } => {
                self.notify_error("Cannot clear the conversation while a reply is pending.");
                return Err(SessionError::Busy);
            }
            SessionState::Idle => {}
        }

        self.store.reset();
        info!("conversation reset");

        self.presenter.on_transcript_cleared();
        self.presenter
            .on_message_appended(EntryRole::System, RESET_NOTICE, Local::now());
        Ok(())
    }

    /// Replace the conversation with one read back from a snapshot.
    ///
    /// The display is cleared and replayed. Rejected while a request is
    /// outstanding.
    pub fn restore(&mut self, messages: Vec<Message>) -> Result<(), SessionError> {
        match self.state {
            SessionState::Closed => return Err(SessionError::Closed),
            SessionState::Awaiting { .. } => {
                self.notify_error("Cannot restore a session while a reply is pending.");
                return Err(SessionError::Busy);
            }
            SessionState::Idle => {}
        }

        self.store.restore(messages);
        info!(messages = self.store.len(), "conversation restored");

        self.presenter.on_transcript_cleared();
        let now = Local::now();
        for message in self.store.messages() {
            self.presenter
                .on_message_appended(message.role.into(), &message.content, now);
        }
        let notice = format!(
            "Restored {} messages from the latest session.",
            self.store.len()
        );
        self.presenter
            .on_message_appended(EntryRole::System, &notice, now);
        Ok(())
    }

    /// Write the latest-session snapshot and close the session.
    ///
    /// Does not wait for or cancel an outstanding request; its outcome is
    /// discarded when it arrives.
    pub fn shutdown(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Closed {
            return Err(SessionError::Closed);
        }

        if self.is_processing() {
            info!("shutting down with a reply still pending");
        }

        if let Err(e) = self.writer.write_snapshot(self.store.messages()) {
            warn!("failed to write latest session snapshot: {e}");
            self.notify_error(&format!("Could not save the latest session: {e}"));
        }

        self.state = SessionState::Closed;
        Ok(())
    }

    /// Derive a session name no earlier conversation has used.
    fn claim_session_name(&mut self, first_utterance: &str) -> String {
        let base = session_file_name(
            &self.settings.file_prefix,
            Local::now().naive_local(),
            first_utterance,
        );
        let issued = &self.issued_names;
        let name = self
            .writer
            .unclaimed_session_name(base, |n| issued.contains(n));
        self.issued_names.insert(name.clone());
        name
    }

    fn dispatch(&self, request_id: RequestId) {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: self.store.messages().to_vec(),
            max_output_tokens: self.settings.max_output_tokens,
        };
        debug!(
            request_id,
            messages = request.messages.len(),
            "dispatching completion request"
        );

        let client = Arc::clone(&self.client);
        let outcome_tx = self.outcome_tx.clone();
        self.runtime.spawn(async move {
            let result = client.complete(&request).await;
            if outcome_tx
                .send(CompletionOutcome { request_id, result })
                .is_err()
            {
                debug!(request_id, "session gone before completion arrived");
            }
        });
    }

    fn on_success(&mut self, completion: Completion) {
        let Completion { content: reply, usage } = completion;
        debug!(
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            total_tokens = usage.total_tokens(),
            "completion received"
        );

        // Assistant content is never blank-checked; only user text is.
        if let Err(e) = self.store.append(Message::assistant(reply.clone())) {
            warn!("failed to record reply: {e}");
        }
        let flush_error = self.flush_pending().err();

        self.presenter
            .on_message_appended(EntryRole::Assistant, &reply, Local::now());
        if let Some(e) = flush_error {
            self.notify_error(&format!("Could not save transcript: {e}"));
        }

        self.state = SessionState::Idle;
    }

    fn on_failure(&mut self, error: AiError) {
        warn!("completion request failed: {error}");
        self.notify_error(&format!("An error occurred: {error}"));
        self.state = SessionState::Idle;
    }

    /// Append the unflushed suffix to the session transcript.
    ///
    /// Inert until the session has a name. On failure the cursor stays put
    /// so the suffix is written with the next exchange.
    fn flush_pending(&mut self) -> Result<(), PersistError> {
        let Some(name) = self.store.session_name() else {
            return Ok(());
        };

        // The system prompt belongs to the snapshot only.
        let pending: Vec<Message> = self
            .store
            .pending_suffix()
            .iter()
            .filter(|m| m.role != Role::System)
            .cloned()
            .collect();
        match self
            .writer
            .append_exchange(name, &pending, Local::now().naive_local())
        {
            Ok(path) => {
                debug!(path = %path.display(), count = pending.len(), "transcript flushed");
                self.store.mark_flushed();
                Ok(())
            }
            Err(e) => {
                warn!("failed to append transcript: {e}");
                Err(e)
            }
        }
    }

    fn notify_error(&mut self, text: &str) {
        self.presenter
            .on_message_appended(EntryRole::Error, text, Local::now());
    }
}
