//! Dispatcher wiring: turns teloxide updates into calls of the chat handlers.
//!
//! The endpoints only unpack teloxide types; which handler runs is decided by
//! [`route_message`] and [`route_callback`] so the routing works with any
//! gateway.

use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatId, MessageId, UserId};
use tracing::{debug, warn};

use crate::gateway::{MessagingGateway, TelegramGateway};

use super::callback_handler::handle_callback;
use super::message_handler::{handle_command, handle_photo, handle_text, Command};
use super::BotContext;

pub type TelegramContext = Arc<BotContext<TelegramGateway>>;

/// Kind of a non-command message, as far as the bot cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incoming<'a> {
    Photo,
    Text(&'a str),
    /// Stickers, voice, documents and everything else
    Other,
}

impl<'a> Incoming<'a> {
    /// A photo wins over text; captions of photos are never read
    pub fn classify(has_photo: bool, text: Option<&'a str>) -> Self {
        match (has_photo, text) {
            (true, _) => Incoming::Photo,
            (false, Some(text)) => Incoming::Text(text),
            (false, None) => Incoming::Other,
        }
    }
}

/// Dispatch a non-command message to the photo or text handler
pub async fn route_message<G: MessagingGateway>(
    ctx: &BotContext<G>,
    chat_id: ChatId,
    message_id: MessageId,
    sender: Option<UserId>,
    incoming: Incoming<'_>,
) -> Result<()> {
    match incoming {
        Incoming::Photo => handle_photo(ctx, chat_id, message_id).await,
        Incoming::Text(text) => handle_text(ctx, chat_id, message_id, sender, text).await,
        Incoming::Other => {
            debug!(chat_id = %chat_id, "Ignoring unsupported message kind");
            Ok(())
        }
    }
}

/// Answer a button press, then hand it to the callback handler.
///
/// `chat_id` is `None` when the message carrying the button is unknown to the
/// client (too old or inline); such presses are answered and dropped.
pub async fn route_callback<G: MessagingGateway>(
    ctx: &BotContext<G>,
    query_id: &str,
    chat_id: Option<ChatId>,
    data: Option<&str>,
) -> Result<()> {
    // Stop the client's loading spinner before doing any work.
    if let Err(e) = ctx.gateway.answer_callback(query_id).await {
        warn!(query_id, error = %e, "Failed to answer callback query");
    }

    let Some(chat_id) = chat_id else {
        debug!(query_id, "Callback query without message, ignoring");
        return Ok(());
    };

    handle_callback(ctx, chat_id, data.unwrap_or("")).await
}

/// Update handler tree; expects a [`TelegramContext`] among the dependencies
pub fn schema() -> UpdateHandler<anyhow::Error> {
    let message_handler = Update::filter_message()
        .branch(dptree::entry().filter_command::<Command>().endpoint(command_endpoint))
        .branch(dptree::endpoint(message_endpoint));

    let callback_handler = Update::filter_callback_query().endpoint(callback_endpoint);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}

async fn command_endpoint(msg: Message, command: Command, ctx: TelegramContext) -> Result<()> {
    handle_command(&ctx, msg.chat.id, msg.id, command).await
}

async fn message_endpoint(msg: Message, ctx: TelegramContext) -> Result<()> {
    let sender = msg.from.as_ref().map(|user| user.id);
    let incoming = Incoming::classify(msg.photo().is_some(), msg.text());
    route_message(&ctx, msg.chat.id, msg.id, sender, incoming).await
}

async fn callback_endpoint(q: CallbackQuery, ctx: TelegramContext) -> Result<()> {
    let chat_id = q.message.as_ref().map(|message| message.chat().id);
    route_callback(&ctx, &q.id.0, chat_id, q.data.as_deref()).await
}
