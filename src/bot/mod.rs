//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Handles commands, free text and photos
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `ui_builder`: Creates keyboards and formats messages
//! - `view_manager`: Sends, edits and clears the messages of the current view
//! - `schema`: Wires the handlers into the teloxide dispatcher

pub mod callback_handler;
pub mod message_handler;
pub mod schema;
pub mod ui_builder;
pub mod view_manager;

use std::sync::Arc;
use teloxide::types::ChatId;

use crate::catalog::MenuCatalog;
use crate::session::SessionStore;

// Re-export main handler functions for use in main.rs
pub use callback_handler::{handle_callback, CallbackToken};
pub use message_handler::{handle_command, handle_photo, handle_text, Command};
pub use schema::{route_callback, route_message, schema, Incoming};

/// Everything a handler needs, shared across all chats
pub struct BotContext<G> {
    pub gateway: G,
    pub catalog: Arc<MenuCatalog>,
    pub sessions: SessionStore,
    /// Destination of forwarded customer feedback
    pub staff_chat_id: ChatId,
}

impl<G> BotContext<G> {
    pub fn new(
        gateway: G,
        catalog: Arc<MenuCatalog>,
        sessions: SessionStore,
        staff_chat_id: ChatId,
    ) -> Self {
        Self {
            gateway,
            catalog,
            sessions,
            staff_chat_id,
        }
    }
}
