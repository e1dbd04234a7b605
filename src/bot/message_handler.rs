//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use teloxide::types::{ChatId, MessageId, UserId};
use teloxide::utils::command::BotCommands;
use tracing::{debug, info};

// Import localization
use crate::localization::t;

use crate::gateway::{BestEffort, MessagingGateway, TextFormat};
use crate::session::ViewMode;

use super::ui_builder::{format_bank_accounts, format_feedback};
use super::view_manager::{
    clear_view, discard_user_message, send_error_notice, send_view_text, show_carousel,
};
use super::BotContext;

/// Commands understood by the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "welcome message and menu")]
    Start,
    #[command(description = "browse the menu")]
    Menu,
    #[command(description = "bank account details")]
    Account,
    #[command(description = "send us your feedback")]
    Comment,
}

/// Handle one of the bot commands sent as message `message_id`
pub async fn handle_command<G: MessagingGateway>(
    ctx: &BotContext<G>,
    chat_id: ChatId,
    message_id: MessageId,
    command: Command,
) -> Result<()> {
    info!(chat_id = %chat_id, command = ?command, "Command received");

    let mut session = ctx.sessions.checkout(chat_id).await;
    clear_view(ctx, chat_id, &mut session).await;
    discard_user_message(ctx, chat_id, message_id).await;

    match command {
        Command::Start => {
            send_view_text(ctx, chat_id, &mut session, &t("welcome"), TextFormat::Plain).await;
            show_carousel(ctx, chat_id, &mut session, 0).await;
        }
        Command::Menu => {
            show_carousel(ctx, chat_id, &mut session, 0).await;
        }
        Command::Account => {
            session.mode = ViewMode::Idle;
            let accounts = format_bank_accounts(ctx.catalog.bank_accounts());
            send_view_text(ctx, chat_id, &mut session, &accounts, TextFormat::Html).await;
        }
        Command::Comment => {
            session.mode = ViewMode::AwaitingFeedback;
            send_view_text(ctx, chat_id, &mut session, &t("comment-prompt"), TextFormat::Plain)
                .await;
        }
    }

    ctx.sessions.commit(chat_id, session).await;
    Ok(())
}

/// Handle free text: captured as feedback when a comment was requested,
/// otherwise answered with the list of commands
pub async fn handle_text<G: MessagingGateway>(
    ctx: &BotContext<G>,
    chat_id: ChatId,
    message_id: MessageId,
    sender: Option<UserId>,
    text: &str,
) -> Result<()> {
    debug!(chat_id = %chat_id, message_length = text.len(), "Received text message");

    let mut session = ctx.sessions.checkout(chat_id).await;
    clear_view(ctx, chat_id, &mut session).await;
    discard_user_message(ctx, chat_id, message_id).await;

    if session.awaiting_feedback() {
        let feedback = text.trim();
        if feedback.is_empty() {
            send_view_text(ctx, chat_id, &mut session, &t("comment-empty"), TextFormat::Plain)
                .await;
        } else {
            let sender = sender.map_or_else(|| "unknown user".to_string(), |id| id.to_string());
            let forwarded = ctx
                .gateway
                .send_text(
                    ctx.staff_chat_id,
                    &format_feedback(&sender, feedback),
                    TextFormat::Plain,
                    None,
                )
                .await
                .or_log("forward feedback to staff", ctx.staff_chat_id);

            match forwarded {
                Some(_) => {
                    info!(chat_id = %chat_id, staff_chat_id = %ctx.staff_chat_id, "Feedback forwarded to staff");
                    session.mode = ViewMode::Idle;
                    send_view_text(ctx, chat_id, &mut session, &t("comment-thanks"), TextFormat::Plain)
                        .await;
                }
                None => {
                    // Still awaiting feedback, so the user can simply send it again.
                    send_error_notice(ctx, chat_id, &mut session).await;
                }
            }
        }
    } else {
        session.mode = ViewMode::Idle;
        send_view_text(ctx, chat_id, &mut session, &t("unknown-command"), TextFormat::Plain)
            .await;
    }

    ctx.sessions.commit(chat_id, session).await;
    Ok(())
}

/// Photos are never processed; the message is removed and nothing is sent
pub async fn handle_photo<G: MessagingGateway>(
    ctx: &BotContext<G>,
    chat_id: ChatId,
    message_id: MessageId,
) -> Result<()> {
    debug!(chat_id = %chat_id, "Discarding photo message");
    discard_user_message(ctx, chat_id, message_id).await;
    Ok(())
}
