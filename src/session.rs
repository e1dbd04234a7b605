//! Per-chat conversation state and the store that owns it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use teloxide::types::{ChatId, MessageId};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// What the chat is currently showing or waiting for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Idle,
    AwaitingFeedback,
    BrowsingCarousel {
        position: usize,
    },
}

/// Conversation state of a single chat
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bot messages belonging to the current view, oldest first
    pub displayed: Vec<MessageId>,
    pub mode: ViewMode,
    pub last_activity: DateTime<Utc>,
}

impl Session {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            displayed: Vec::new(),
            mode: ViewMode::Idle,
            last_activity: now,
        }
    }

    pub fn awaiting_feedback(&self) -> bool {
        self.mode == ViewMode::AwaitingFeedback
    }

    pub fn carousel_position(&self) -> Option<usize> {
        match self.mode {
            ViewMode::BrowsingCarousel { position } => Some(position),
            _ => None,
        }
    }

    /// The message holding the carousel page, if the carousel is showing
    pub fn carousel_message(&self) -> Option<MessageId> {
        self.carousel_position().and(self.displayed.last().copied())
    }

    /// Record a message as part of the current view
    pub fn record(&mut self, message_id: MessageId) {
        self.displayed.push(message_id);
    }

    /// Forget the current view and hand back its messages for deletion
    pub fn take_displayed(&mut self) -> Vec<MessageId> {
        std::mem::take(&mut self.displayed)
    }
}

/// In-memory session storage keyed by chat.
///
/// The lock is held only to copy a session out or write it back. Updates of one
/// chat are delivered sequentially by the dispatcher, so a checkout/commit pair
/// never races with another handler for the same chat.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<ChatId, Session>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// Copy out the chat's session, creating it on first contact
    pub async fn checkout(&self, chat_id: ChatId) -> Session {
        self.checkout_at(chat_id, Utc::now()).await
    }

    pub async fn checkout_at(&self, chat_id: ChatId, now: DateTime<Utc>) -> Session {
        let sessions = self.sessions.lock().await;
        match sessions.get(&chat_id) {
            Some(session) => session.clone(),
            None => {
                debug!(chat_id = %chat_id, "Creating new session");
                Session::new(now)
            }
        }
    }

    /// Write the session back and mark the chat as active
    pub async fn commit(&self, chat_id: ChatId, session: Session) {
        self.commit_at(chat_id, session, Utc::now()).await
    }

    pub async fn commit_at(&self, chat_id: ChatId, mut session: Session, now: DateTime<Utc>) {
        session.last_activity = now;
        self.sessions.lock().await.insert(chat_id, session);
    }

    /// Read-only snapshot of a chat's session
    pub async fn get(&self, chat_id: ChatId) -> Option<Session> {
        self.sessions.lock().await.get(&chat_id).cloned()
    }

    /// Number of chats with a live session
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Drop sessions idle for longer than the timeout; returns how many were evicted
    pub async fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        let timeout = self.idle_timeout;
        sessions.retain(|_, session| match (now - session.last_activity).to_std() {
            Ok(idle) => idle < timeout,
            // Activity in the future means a clock step; keep the session.
            Err(_) => true,
        });
        before - sessions.len()
    }

    /// Run `evict_idle` every `interval` until the runtime shuts down
    pub fn spawn_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle(Utc::now()).await;
                if evicted > 0 {
                    let remaining = store.len().await;
                    info!(evicted, remaining, "Evicted idle sessions");
                }
            }
        })
    }
}
