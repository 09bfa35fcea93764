// src/session.rs

use crate::api::Generator;
use crate::constants::{FALLBACK_REPLY, QUICK_QUESTIONS};
use crate::context::ContextBuilder;
use crate::errors::{FolioError, FolioResult};
use crate::models::{ChatMessage, MessageId, Sender};
use crate::profile::Profile;
use log::{debug, error, info};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Single-flight guard: at most one visitor turn is awaiting the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingResponse,
}

/// What `send` did. Informational only; failures already became a
/// fallback message in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Answered,
    Fallback,
    /// Empty query, or another turn was still in flight.
    Ignored,
}

#[derive(Debug)]
struct SessionInner {
    transcript: Vec<ChatMessage>,
    state: SessionState,
    visible: bool,
    next_id: u64,
}

impl SessionInner {
    fn push(&mut self, text: impl Into<String>, sender: Sender) {
        self.next_id += 1;
        self.transcript
            .push(ChatMessage::new(MessageId(self.next_id), text, sender));
    }
}

/// State shared between the session handle and in-flight model requests.
struct Shared {
    inner: Mutex<SessionInner>,
    profile: Profile,
    generator: Arc<dyn Generator>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends the answer or the fallback reply and returns to `Idle`.
    fn settle(&self, result: FolioResult<String>) -> SendOutcome {
        let mut inner = self.lock();
        let outcome = match result {
            Ok(text) => {
                inner.push(text, Sender::Assistant);
                SendOutcome::Answered
            }
            Err(e) => {
                error!("AI Error: {}", e);
                inner.push(FALLBACK_REPLY, Sender::Assistant);
                SendOutcome::Fallback
            }
        };
        inner.state = SessionState::Idle;
        outcome
    }
}

/// A turn awaiting the model. Settles with the fallback reply if it is
/// dropped before an answer arrives (panic or runtime shutdown).
struct PendingTurn {
    shared: Arc<Shared>,
    settled: bool,
}

impl PendingTurn {
    async fn run(mut self, prompt: String) -> SendOutcome {
        let result = self.shared.generator.generate(&prompt).await;
        self.settled = true;
        self.shared.settle(result)
    }
}

impl Drop for PendingTurn {
    fn drop(&mut self) {
        if !self.settled {
            self.shared
                .settle(Err(FolioError::api_error("request was abandoned")));
        }
    }
}

/// One visitor's chat with the assistant.
///
/// The transcript is append-only and lives as long as the session. The lock
/// is never held across the model call, so the session can be shared between
/// the input handler and the renderer while a turn is pending. The model call
/// runs on its own task: once issued, a turn completes even if the caller
/// stops waiting for it.
pub struct ConversationSession {
    shared: Arc<Shared>,
}

impl ConversationSession {
    /// Starts closed, with the assistant's greeting already in the transcript.
    pub fn new(profile: Profile, generator: Arc<dyn Generator>) -> Self {
        let mut inner = SessionInner {
            transcript: Vec::new(),
            state: SessionState::Idle,
            visible: false,
            next_id: 0,
        };
        inner.push(greeting(&profile), Sender::Assistant);

        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(inner),
                profile,
                generator,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.shared.lock()
    }

    pub fn open(&self) {
        self.lock().visible = true;
    }

    /// Hides the chat. Keeps the transcript; calling it twice is fine.
    pub fn close(&self) {
        self.lock().visible = false;
    }

    pub fn is_open(&self) -> bool {
        self.lock().visible
    }

    pub fn state(&self) -> SessionState {
        self.lock().state
    }

    pub fn is_pending(&self) -> bool {
        self.state() == SessionState::AwaitingResponse
    }

    /// Snapshot of the transcript in creation order.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.lock().transcript.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().transcript.is_empty()
    }

    pub fn profile(&self) -> &Profile {
        &self.shared.profile
    }

    /// Runs one visitor turn: records the question, asks the model once and
    /// records the answer, or the fallback reply if anything went wrong.
    ///
    /// Dropping the returned future does not cancel the request; the answer
    /// still lands in the transcript.
    pub async fn send(&self, query: &str) -> SendOutcome {
        let query = query.trim();
        if query.is_empty() {
            debug!("Ignoring empty query");
            return SendOutcome::Ignored;
        }

        let prompt = {
            let mut inner = self.lock();
            if inner.state == SessionState::AwaitingResponse {
                debug!("Ignoring query while a response is pending");
                return SendOutcome::Ignored;
            }
            inner.push(query, Sender::Visitor);
            inner.state = SessionState::AwaitingResponse;
            ContextBuilder::new(&self.shared.profile).build_prompt(query)
        };

        info!("Sending visitor question ({} chars)", query.len());
        let turn = PendingTurn {
            shared: Arc::clone(&self.shared),
            settled: false,
        };
        match tokio::spawn(turn.run(prompt)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Response task failed: {}", e);
                SendOutcome::Fallback
            }
        }
    }

    /// Sends one of [`QUICK_QUESTIONS`]. Out of range indexes are ignored.
    pub async fn send_quick(&self, index: usize) -> SendOutcome {
        match QUICK_QUESTIONS.get(index) {
            Some(question) => self.send(question).await,
            None => SendOutcome::Ignored,
        }
    }
}

fn greeting(profile: &Profile) -> String {
    format!(
        "Hi! I'm {}, your AI assistant. Ask me anything about my skills, projects, or experience! 👋",
        profile.display_name()
    )
}
