//! Conversation session: append-only transcript plus pending-response state.
//!
//! State transitions:
//! - Idle -> AwaitingResponse (user message appended)
//! - AwaitingResponse -> Idle (last pending assistant message appended)
//!
//! Each accepted submission schedules its reply as a tokio task that sleeps
//! for the simulated typing delay. The tasks belong to the session: closing
//! or dropping it aborts every reply that has not been delivered yet.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tembea_core::config::{ChatConfig, SubmitPolicy};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::error::ChatError;
use crate::orchestrator::ChatOrchestrator;
use crate::types::{ChatMessage, MessageId, SessionState, SessionStatus, TripSelection};

// =============================================================================
// Shared state
// =============================================================================

#[derive(Debug)]
struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: MessageId,
    pending: usize,
    closed: bool,
}

impl Transcript {
    fn take_id(&mut self) -> MessageId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn status(&self) -> SessionStatus {
        SessionStatus {
            message_count: self.messages.len(),
            awaiting_response: self.pending > 0,
            closed: self.closed,
        }
    }
}

/// State reachable from both the session handle and its reply tasks.
#[derive(Debug)]
struct Shared {
    transcript: Mutex<Transcript>,
    status: watch::Sender<SessionStatus>,
}

impl Shared {
    fn lock(&self) -> Result<MutexGuard<'_, Transcript>, ChatError> {
        self.transcript
            .lock()
            .map_err(|e| ChatError::SessionState(format!("transcript lock poisoned: {}", e)))
    }

    fn publish(&self, transcript: &Transcript) {
        self.status.send_replace(transcript.status());
    }

    /// Mark the transcript closed and drop every pending reply from the count.
    ///
    /// Returns `false` if it was already closed.
    fn mark_closed(&self) -> Result<bool, ChatError> {
        let mut transcript = self.lock()?;
        if transcript.closed {
            return Ok(false);
        }
        transcript.closed = true;
        transcript.pending = 0;
        self.publish(&transcript);
        Ok(true)
    }

    /// Compose and append the reply for `utterance`.
    ///
    /// Runs without any await point so an abort can never interrupt it half way.
    fn deliver(&self, orchestrator: &ChatOrchestrator, utterance: &str) {
        let mut transcript = match self.lock() {
            Ok(t) => t,
            Err(e) => {
                tracing::error!(error = %e, "Dropping assistant reply");
                return;
            }
        };
        if transcript.closed {
            return;
        }
        let id = transcript.take_id();
        let reply = orchestrator.respond(id, utterance);
        transcript.messages.push(reply);
        transcript.pending = transcript.pending.saturating_sub(1);
        self.publish(&transcript);
    }
}

// =============================================================================
// ConversationSession
// =============================================================================

/// A single chat transcript owned by one view.
pub struct ConversationSession {
    id: Uuid,
    orchestrator: Arc<ChatOrchestrator>,
    config: ChatConfig,
    shared: Arc<Shared>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl ConversationSession {
    /// Open a session, seeding it with the greeting when configured.
    pub fn new(orchestrator: Arc<ChatOrchestrator>, config: ChatConfig) -> Self {
        let mut transcript = Transcript {
            messages: Vec::new(),
            next_id: 1,
            pending: 0,
            closed: false,
        };
        if config.greeting {
            let id = transcript.take_id();
            transcript
                .messages
                .push(orchestrator.composer().greeting(id));
        }
        let (status, _) = watch::channel(transcript.status());
        let id = Uuid::new_v4();
        tracing::info!(session = %id, "Chat session opened");

        Self {
            id,
            orchestrator,
            config,
            shared: Arc::new(Shared {
                transcript: Mutex::new(transcript),
                status,
            }),
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Submit free text typed by the user.
    ///
    /// Returns the id of the appended user message. Must be called from
    /// within a tokio runtime, which runs the delayed reply.
    pub fn submit(&self, text: &str) -> Result<MessageId, ChatError> {
        let delay = Duration::from_millis(self.config.typing_delay_ms);
        self.enqueue(text.to_string(), delay)
    }

    /// Submit a trip planner pick as its chat text.
    pub fn submit_trip_plan(&self, selection: &TripSelection) -> Result<MessageId, ChatError> {
        let delay = Duration::from_millis(self.config.planner_delay_ms);
        self.enqueue(selection.utterance(), delay)
    }

    fn enqueue(&self, text: String, delay: Duration) -> Result<MessageId, ChatError> {
        if !self.config.enabled {
            return Err(ChatError::Disabled);
        }
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if text.chars().count() > self.config.max_message_length {
            return Err(ChatError::MessageTooLong(self.config.max_message_length));
        }
        let runtime = Handle::try_current().map_err(|_| ChatError::RuntimeUnavailable)?;

        let user_id = {
            let mut transcript = self.shared.lock()?;
            if transcript.closed {
                return Err(ChatError::SessionClosed);
            }
            if self.config.submit_policy == SubmitPolicy::Reject && transcript.pending > 0 {
                return Err(ChatError::ResponsePending);
            }
            let id = transcript.take_id();
            transcript.messages.push(ChatMessage::user(id, text.clone()));
            transcript.pending += 1;
            self.shared.publish(&transcript);
            id
        };
        tracing::debug!(session = %self.id, id = user_id, ?delay, "User message appended");

        let shared = Arc::clone(&self.shared);
        let orchestrator = Arc::clone(&self.orchestrator);
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            shared.deliver(&orchestrator, &text);
        });

        let mut tasks = self
            .tasks
            .lock()
            .map_err(|e| ChatError::SessionState(format!("task list lock poisoned: {}", e)))?;
        tasks.retain(|t| !t.is_finished());
        tasks.push(handle);

        Ok(user_id)
    }

    /// Close the session and abort every undelivered reply.
    ///
    /// The transcript stays readable; further submissions are refused.
    pub fn close(&self) -> Result<(), ChatError> {
        if !self.shared.mark_closed()? {
            return Ok(());
        }
        let aborted = self.abort_pending();
        tracing::info!(session = %self.id, aborted, "Chat session closed");
        Ok(())
    }

    fn abort_pending(&self) -> usize {
        match self.tasks.lock() {
            Ok(mut tasks) => {
                let count = tasks.iter().filter(|t| !t.is_finished()).count();
                for task in tasks.drain(..) {
                    task.abort();
                }
                count
            }
            Err(e) => {
                tracing::error!(error = %e, "Task list lock poisoned; replies not aborted");
                0
            }
        }
    }

    /// Copy of the transcript in display order.
    pub fn messages(&self) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.shared.lock()?.messages.clone())
    }

    /// Messages with an id greater than `id`.
    pub fn messages_after(&self, id: MessageId) -> Result<Vec<ChatMessage>, ChatError> {
        let transcript = self.shared.lock()?;
        Ok(transcript
            .messages
            .iter()
            .filter(|m| m.id > id)
            .cloned()
            .collect())
    }

    pub fn status(&self) -> SessionStatus {
        *self.shared.status.borrow()
    }

    pub fn state(&self) -> SessionState {
        self.status().state()
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.status().awaiting_response
    }

    /// Receiver notified after every append and on close.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.shared.status.subscribe()
    }

    /// Resolve once no reply is pending or the session is closed.
    pub async fn wait_idle(&self) {
        let mut rx = self.subscribe();
        // The sender lives in `self.shared`, so the channel cannot close here.
        let _ = rx
            .wait_for(|s| !s.awaiting_response || s.closed)
            .await;
    }
}

impl Drop for ConversationSession {
    fn drop(&mut self) {
        if let Err(e) = self.shared.mark_closed() {
            tracing::error!(session = %self.id, error = %e, "Failed to mark session closed");
        }
        self.abort_pending();
    }
}

// =============================================================================
// Tests
// =============================================================================
