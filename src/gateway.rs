//! # Messaging Gateway Module
//!
//! The send/edit/delete primitives the bot needs from Telegram, behind a trait so
//! the handlers can run against a recording fake in tests.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, ChatId, FileId, InlineKeyboardMarkup, InputFile, InputMedia,
    InputMediaPhoto, MessageId, ParseMode,
};
use teloxide::{ApiError, RequestError};
use thiserror::Error;
use tracing::warn;

/// Failure of a single gateway call
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("messaging API call failed: {0}")]
    Api(String),
    /// The message to edit or delete no longer exists
    #[error("message not found")]
    MissingMessage,
}

impl From<RequestError> for GatewayError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Api(
                ApiError::MessageToDeleteNotFound
                | ApiError::MessageToEditNotFound
                | ApiError::MessageIdInvalid,
            ) => GatewayError::MissingMessage,
            other => GatewayError::Api(other.to_string()),
        }
    }
}

/// How the text of a message is interpreted by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Html,
}

/// Outbound message operations used by the handlers.
///
/// Photo captions are always HTML formatted.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        format: TextFormat,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, GatewayError>;

    async fn send_photo(
        &self,
        chat_id: ChatId,
        image: &str,
        caption: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, GatewayError>;

    /// Replace image, caption and keyboard of an existing photo message
    async fn edit_photo(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        image: &str,
        caption: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<(), GatewayError>;

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId)
        -> Result<(), GatewayError>;

    /// Acknowledge a button press so the client stops its loading indicator
    async fn answer_callback(&self, query_id: &str) -> Result<(), GatewayError>;
}

/// Marks a gateway call whose failure must not abort the handler.
///
/// The error is logged as a warning and swallowed; the caller gets `None`.
pub trait BestEffort<T> {
    fn or_log(self, action: &str, chat_id: ChatId) -> Option<T>;
}

impl<T> BestEffort<T> for Result<T, GatewayError> {
    fn or_log(self, action: &str, chat_id: ChatId) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(chat_id = %chat_id, error = %e, "Best-effort call failed: {action}");
                None
            }
        }
    }
}

/// Gateway backed by the Telegram Bot API
#[derive(Clone)]
pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn photo(image: &str) -> InputFile {
    InputFile::file_id(FileId(image.to_string()))
}

#[async_trait]
impl MessagingGateway for TelegramGateway {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        format: TextFormat,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, GatewayError> {
        let mut request = self.bot.send_message(chat_id, text);
        if format == TextFormat::Html {
            request = request.parse_mode(ParseMode::Html);
        }
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }
        let message = request.await?;
        Ok(message.id)
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        image: &str,
        caption: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, GatewayError> {
        let mut request = self.bot.send_photo(chat_id, photo(image));
        if !caption.is_empty() {
            request = request.caption(caption).parse_mode(ParseMode::Html);
        }
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }
        let message = request.await?;
        Ok(message.id)
    }

    async fn edit_photo(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        image: &str,
        caption: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<(), GatewayError> {
        let media = InputMedia::Photo(
            InputMediaPhoto::new(photo(image))
                .caption(caption)
                .parse_mode(ParseMode::Html),
        );
        self.bot
            .edit_message_media(chat_id, message_id, media)
            .reply_markup(keyboard)
            .await?;
        Ok(())
    }

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), GatewayError> {
        self.bot.delete_message(chat_id, message_id).await?;
        Ok(())
    }

    async fn answer_callback(&self, query_id: &str) -> Result<(), GatewayError> {
        self.bot
            .answer_callback_query(CallbackQueryId(query_id.to_string()))
            .await?;
        Ok(())
    }
}
