//! View Manager module: pushes rendered views through the gateway and keeps the
//! session's record of displayed messages in step with what the chat shows.

use teloxide::types::{ChatId, MessageId};
use tracing::{debug, error, info, warn};

use crate::gateway::{BestEffort, MessagingGateway, TextFormat};
use crate::localization::t;
use crate::session::{Session, ViewMode};

use super::ui_builder::render_page;
use super::BotContext;

/// Delete every message of the current view; failures are logged and skipped
pub async fn clear_view<G: MessagingGateway>(
    ctx: &BotContext<G>,
    chat_id: ChatId,
    session: &mut Session,
) {
    for message_id in session.take_displayed() {
        ctx.gateway
            .delete_message(chat_id, message_id)
            .await
            .or_log("delete view message", chat_id);
    }
}

/// Remove a message the user sent (command, feedback, stray text or photo)
pub async fn discard_user_message<G: MessagingGateway>(
    ctx: &BotContext<G>,
    chat_id: ChatId,
    message_id: MessageId,
) {
    ctx.gateway
        .delete_message(chat_id, message_id)
        .await
        .or_log("delete user message", chat_id);
}

/// Send a text message that belongs to the current view
pub async fn send_view_text<G: MessagingGateway>(
    ctx: &BotContext<G>,
    chat_id: ChatId,
    session: &mut Session,
    text: &str,
    format: TextFormat,
) -> Option<MessageId> {
    let sent = ctx
        .gateway
        .send_text(chat_id, text, format, None)
        .await
        .or_log("send view text", chat_id)?;
    session.record(sent);
    Some(sent)
}

/// Last resort when a view could not be drawn at all
pub async fn send_error_notice<G: MessagingGateway>(
    ctx: &BotContext<G>,
    chat_id: ChatId,
    session: &mut Session,
) {
    send_view_text(ctx, chat_id, session, &t("error-generic"), TextFormat::Plain).await;
}

/// Send a fresh carousel page at `position`.
///
/// Additional photos of the category go out first so the captioned page with
/// the controls stays the last message of the view. A failed photo degrades to
/// a text message with the same caption and controls; if that fails too the
/// user gets the generic error notice.
pub async fn show_carousel<G: MessagingGateway>(
    ctx: &BotContext<G>,
    chat_id: ChatId,
    session: &mut Session,
    position: usize,
) {
    let count = ctx.catalog.len();
    let Some(category) = ctx.catalog.get(position) else {
        error!(chat_id = %chat_id, position, count, "Carousel position outside catalog");
        session.mode = ViewMode::Idle;
        send_error_notice(ctx, chat_id, session).await;
        return;
    };

    let view = render_page(category, position, count);

    for image in &view.extra_images {
        if let Some(message_id) = ctx
            .gateway
            .send_photo(chat_id, image, "", None)
            .await
            .or_log("send additional menu image", chat_id)
        {
            session.record(message_id);
        }
    }

    let sent = match view.image.as_deref() {
        Some(image) => {
            match ctx
                .gateway
                .send_photo(chat_id, image, &view.caption, Some(view.controls.clone()))
                .await
            {
                Ok(message_id) => Ok(message_id),
                Err(e) => {
                    warn!(chat_id = %chat_id, category = %category.name, error = %e, "Failed to send menu image, falling back to text");
                    ctx.gateway
                        .send_text(chat_id, &view.caption, TextFormat::Html, Some(view.controls))
                        .await
                }
            }
        }
        None => {
            ctx.gateway
                .send_text(chat_id, &view.caption, TextFormat::Html, Some(view.controls))
                .await
        }
    };

    match sent {
        Ok(message_id) => {
            session.record(message_id);
            session.mode = ViewMode::BrowsingCarousel { position };
            info!(chat_id = %chat_id, position, category = %category.name, message_id = message_id.0, "Carousel page sent");
        }
        Err(e) => {
            error!(chat_id = %chat_id, category = %category.name, error = %e, "Failed to send carousel page");
            session.mode = ViewMode::Idle;
            send_error_notice(ctx, chat_id, session).await;
        }
    }
}

/// True when the page at `position` is drawn as a single message
fn is_single_message_page<G>(ctx: &BotContext<G>, position: usize) -> bool {
    ctx.catalog
        .get(position)
        .is_some_and(|category| category.images.len() <= 1)
}

/// Move the visible carousel to `position`, editing the page in place when
/// both pages are a single photo and resending the view otherwise.
pub async fn redraw_carousel<G: MessagingGateway>(
    ctx: &BotContext<G>,
    chat_id: ChatId,
    session: &mut Session,
    position: usize,
) {
    let editable = session
        .carousel_position()
        .is_some_and(|current| is_single_message_page(ctx, current))
        && is_single_message_page(ctx, position);

    if let (true, Some(message_id), Some(category)) =
        (editable, session.carousel_message(), ctx.catalog.get(position))
    {
        let view = render_page(category, position, ctx.catalog.len());
        if let Some(image) = view.image.as_deref() {
            match ctx
                .gateway
                .edit_photo(chat_id, message_id, image, &view.caption, view.controls.clone())
                .await
            {
                Ok(()) => {
                    session.mode = ViewMode::BrowsingCarousel { position };
                    debug!(chat_id = %chat_id, position, "Carousel page edited in place");
                    return;
                }
                Err(e) => {
                    warn!(chat_id = %chat_id, position, error = %e, "Failed to edit carousel page, resending");
                }
            }
        }
    }

    clear_view(ctx, chat_id, session).await;
    show_carousel(ctx, chat_id, session, position).await;
}
