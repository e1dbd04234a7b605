//! Shared test fixtures: a gateway that records every call and can be told to fail.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use teloxide::types::{ChatId, InlineKeyboardMarkup, MessageId};

use hotel_menu_bot::bot::BotContext;
use hotel_menu_bot::catalog::MenuCatalog;
use hotel_menu_bot::gateway::{GatewayError, MessagingGateway, TextFormat};
use hotel_menu_bot::session::SessionStore;

pub const CHAT: ChatId = ChatId(42);
pub const STAFF: ChatId = ChatId(-4779662690);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    SendText,
    SendPhoto,
    EditPhoto,
    Delete,
    Answer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SendText {
        chat_id: ChatId,
        text: String,
        format: TextFormat,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    SendPhoto {
        chat_id: ChatId,
        image: String,
        caption: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    EditPhoto {
        chat_id: ChatId,
        message_id: MessageId,
        image: String,
        caption: String,
    },
    Delete {
        chat_id: ChatId,
        message_id: MessageId,
    },
    Answer {
        query_id: String,
    },
}

impl Call {
    pub fn op(&self) -> Op {
        match self {
            Call::SendText { .. } => Op::SendText,
            Call::SendPhoto { .. } => Op::SendPhoto,
            Call::EditPhoto { .. } => Op::EditPhoto,
            Call::Delete { .. } => Op::Delete,
            Call::Answer { .. } => Op::Answer,
        }
    }

    pub fn chat_id(&self) -> Option<ChatId> {
        match self {
            Call::SendText { chat_id, .. }
            | Call::SendPhoto { chat_id, .. }
            | Call::EditPhoto { chat_id, .. }
            | Call::Delete { chat_id, .. } => Some(*chat_id),
            Call::Answer { .. } => None,
        }
    }

    /// True for calls that put a new bot message on screen
    pub fn is_send(&self) -> bool {
        matches!(self, Call::SendText { .. } | Call::SendPhoto { .. })
    }
}

/// Records calls in order; sent messages get ids starting at 1000
pub struct RecordingGateway {
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<Op>>,
    failing_chats: Mutex<HashSet<ChatId>>,
    next_id: AtomicI32,
}

impl Default for RecordingGateway {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            failing_chats: Mutex::new(HashSet::new()),
            next_id: AtomicI32::new(1000),
        }
    }
}

impl RecordingGateway {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Forget recorded calls so a test can focus on the next step
    pub fn reset(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.failing.lock().unwrap().remove(&op);
    }

    /// Every call addressed to `chat_id` fails until the test recovers it
    pub fn fail_chat(&self, chat_id: ChatId) {
        self.failing_chats.lock().unwrap().insert(chat_id);
    }

    pub fn sends_to(&self, chat_id: ChatId) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| match call {
                Call::SendText { chat_id: c, .. } | Call::SendPhoto { chat_id: c, .. } => {
                    *c == chat_id
                }
                _ => false,
            })
            .collect()
    }

    fn record(&self, call: Call) -> Result<(), GatewayError> {
        let op = call.op();
        let chat_id = call.chat_id();
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(&op) {
            return Err(GatewayError::Api(format!("{op:?} disabled in test")));
        }
        if chat_id.is_some_and(|c| self.failing_chats.lock().unwrap().contains(&c)) {
            return Err(GatewayError::Api(format!("chat {chat_id:?} unreachable in test")));
        }
        Ok(())
    }

    fn new_id(&self) -> MessageId {
        MessageId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        format: TextFormat,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, GatewayError> {
        self.record(Call::SendText {
            chat_id,
            text: text.to_string(),
            format,
            keyboard,
        })?;
        Ok(self.new_id())
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        image: &str,
        caption: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, GatewayError> {
        self.record(Call::SendPhoto {
            chat_id,
            image: image.to_string(),
            caption: caption.to_string(),
            keyboard,
        })?;
        Ok(self.new_id())
    }

    async fn edit_photo(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        image: &str,
        caption: &str,
        _keyboard: InlineKeyboardMarkup,
    ) -> Result<(), GatewayError> {
        self.record(Call::EditPhoto {
            chat_id,
            message_id,
            image: image.to_string(),
            caption: caption.to_string(),
        })
    }

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), GatewayError> {
        self.record(Call::Delete {
            chat_id,
            message_id,
        })
    }

    async fn answer_callback(&self, query_id: &str) -> Result<(), GatewayError> {
        self.record(Call::Answer {
            query_id: query_id.to_string(),
        })
    }
}

pub fn context_with(catalog: MenuCatalog) -> BotContext<RecordingGateway> {
    BotContext::new(
        RecordingGateway::default(),
        Arc::new(catalog),
        SessionStore::new(Duration::from_secs(3600)),
        STAFF,
    )
}

pub fn context() -> BotContext<RecordingGateway> {
    context_with(MenuCatalog::default())
}
