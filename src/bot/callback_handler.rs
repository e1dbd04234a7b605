//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use teloxide::types::ChatId;
use tracing::{debug, info, warn};

use crate::carousel::{self, CarouselAction, Transition};
use crate::gateway::MessagingGateway;

use super::view_manager::{clear_view, redraw_carousel, show_carousel};
use super::BotContext;

const CATEGORY_PREFIX: &str = "category_";

/// Callback data carried by inline buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackToken {
    CarouselPrev,
    CarouselNext,
    CarouselReset,
    /// Bound to disabled buttons
    Noop,
    /// Category button of the old list-style menu
    LegacyCategory(String),
    LegacyBackToCategories,
    LegacyRefreshMenu,
    Unknown(String),
}

impl CallbackToken {
    pub fn parse(data: &str) -> Self {
        match data {
            "carousel_prev" => CallbackToken::CarouselPrev,
            "carousel_next" => CallbackToken::CarouselNext,
            "carousel_reset" => CallbackToken::CarouselReset,
            "noop" => CallbackToken::Noop,
            "back_to_categories" => CallbackToken::LegacyBackToCategories,
            "refresh_menu" => CallbackToken::LegacyRefreshMenu,
            other => match other.strip_prefix(CATEGORY_PREFIX) {
                Some(name) => CallbackToken::LegacyCategory(name.to_string()),
                None => CallbackToken::Unknown(other.to_string()),
            },
        }
    }

    pub fn data(&self) -> String {
        match self {
            CallbackToken::CarouselPrev => "carousel_prev".to_string(),
            CallbackToken::CarouselNext => "carousel_next".to_string(),
            CallbackToken::CarouselReset => "carousel_reset".to_string(),
            CallbackToken::Noop => "noop".to_string(),
            CallbackToken::LegacyCategory(name) => format!("{CATEGORY_PREFIX}{name}"),
            CallbackToken::LegacyBackToCategories => "back_to_categories".to_string(),
            CallbackToken::LegacyRefreshMenu => "refresh_menu".to_string(),
            CallbackToken::Unknown(data) => data.clone(),
        }
    }

    fn carousel_action(&self) -> Option<CarouselAction> {
        match self {
            CallbackToken::CarouselPrev => Some(CarouselAction::Prev),
            CallbackToken::CarouselNext => Some(CarouselAction::Next),
            CallbackToken::CarouselReset => Some(CarouselAction::Reset),
            _ => None,
        }
    }
}

/// Handle a button press in `chat_id`.
///
/// Answering the callback query is left to the transport layer.
pub async fn handle_callback<G: MessagingGateway>(
    ctx: &BotContext<G>,
    chat_id: ChatId,
    data: &str,
) -> Result<()> {
    let token = CallbackToken::parse(data);
    info!(chat_id = %chat_id, callback_data = %data, "Button clicked");

    let Some(action) = token.carousel_action() else {
        match token {
            CallbackToken::Noop => debug!(chat_id = %chat_id, "Disabled button pressed"),
            CallbackToken::Unknown(_) => {
                warn!(chat_id = %chat_id, callback_data = %data, "Unknown callback data")
            }
            CallbackToken::LegacyCategory(name) => debug!(
                chat_id = %chat_id,
                category = %name,
                position = ?ctx.catalog.position_of(&name),
                "Ignoring legacy category button"
            ),
            _ => debug!(chat_id = %chat_id, callback_data = %data, "Ignoring legacy menu button"),
        }
        return Ok(());
    };

    let mut session = ctx.sessions.checkout(chat_id).await;
    let count = ctx.catalog.len();

    match session.carousel_position() {
        None => {
            // Pressed on a carousel the session no longer tracks (evicted or replaced).
            debug!(chat_id = %chat_id, "Carousel button without active carousel, reopening menu");
            clear_view(ctx, chat_id, &mut session).await;
            show_carousel(ctx, chat_id, &mut session, 0).await;
        }
        Some(position) => match (action, carousel::apply(action, position, count)) {
            (CarouselAction::Reset, _) => {
                clear_view(ctx, chat_id, &mut session).await;
                show_carousel(ctx, chat_id, &mut session, 0).await;
            }
            (_, Transition::Moved(target)) => {
                redraw_carousel(ctx, chat_id, &mut session, target).await;
            }
            (_, Transition::Unchanged(_)) => {
                debug!(chat_id = %chat_id, position, "Carousel already at boundary");
            }
        },
    }

    ctx.sessions.commit(chat_id, session).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tokens() {
        assert_eq!(CallbackToken::parse("carousel_prev"), CallbackToken::CarouselPrev);
        assert_eq!(CallbackToken::parse("carousel_next"), CallbackToken::CarouselNext);
        assert_eq!(CallbackToken::parse("carousel_reset"), CallbackToken::CarouselReset);
        assert_eq!(CallbackToken::parse("noop"), CallbackToken::Noop);
    }

    #[test]
    fn test_parse_legacy_tokens() {
        assert_eq!(
            CallbackToken::parse("category_Main Courses"),
            CallbackToken::LegacyCategory("Main Courses".to_string())
        );
        assert_eq!(
            CallbackToken::parse("back_to_categories"),
            CallbackToken::LegacyBackToCategories
        );
        assert_eq!(CallbackToken::parse("refresh_menu"), CallbackToken::LegacyRefreshMenu);
    }

    #[test]
    fn test_data_is_inverse_of_parse() {
        for data in ["carousel_prev", "noop", "category_Soups", "mystery"] {
            assert_eq!(CallbackToken::parse(data).data(), data);
        }
    }
}
