//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::html::escape;

// Import localization
use crate::localization::{t, t_args};

use crate::carousel::{has_next, has_prev};
use crate::catalog::{BankAccount, Category};

use super::callback_handler::CallbackToken;

/// Everything needed to draw one carousel page
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView {
    /// HTML caption with name, description and page indicator
    pub caption: String,
    /// Photo carrying the caption and controls
    pub image: Option<String>,
    /// Remaining photos of the category, sent above the captioned page
    pub extra_images: Vec<String>,
    pub controls: InlineKeyboardMarkup,
}

/// Render the carousel page for `category` at `position` of `count` pages
pub fn render_page(category: &Category, position: usize, count: usize) -> CarouselView {
    let name = escape(&category.name);
    let description = escape(&category.description);
    let page = (position + 1).to_string();
    let total = count.to_string();

    let caption = format!(
        "{}\n{}\n\n{}",
        t_args("menu-caption-title", &[("name", name.as_str())]),
        t_args("menu-caption-description", &[("description", description.as_str())]),
        t_args("menu-page-indicator", &[("page", page.as_str()), ("total", total.as_str())])
    );

    CarouselView {
        caption,
        image: category.cover_image().map(str::to_string),
        extra_images: category.images.iter().skip(1).cloned().collect(),
        controls: create_carousel_keyboard(position, count),
    }
}

/// Three navigation buttons; an unavailable direction is bound to `noop`
pub fn create_carousel_keyboard(position: usize, count: usize) -> InlineKeyboardMarkup {
    let prev = if has_prev(position) {
        InlineKeyboardButton::callback(t("carousel-prev"), CallbackToken::CarouselPrev.data())
    } else {
        InlineKeyboardButton::callback(t("carousel-disabled"), CallbackToken::Noop.data())
    };

    let back = InlineKeyboardButton::callback(t("carousel-back"), CallbackToken::CarouselReset.data());

    let next = if has_next(position, count) {
        InlineKeyboardButton::callback(t("carousel-next"), CallbackToken::CarouselNext.data())
    } else {
        InlineKeyboardButton::callback(t("carousel-disabled"), CallbackToken::Noop.data())
    };

    InlineKeyboardMarkup::new(vec![vec![prev, back, next]])
}

/// Format the payment details shown by `/account` (HTML)
pub fn format_bank_accounts(accounts: &[BankAccount]) -> String {
    let mut result = t("account-title");

    for account in accounts {
        result.push_str("\n\n");
        result.push_str(&t_args(
            "account-bank",
            &[("bank", escape(&account.bank_name).as_str())],
        ));
        result.push('\n');
        result.push_str(&t_args(
            "account-holder",
            &[("holder", escape(&account.account_holder).as_str())],
        ));
        result.push('\n');
        result.push_str(&t_args(
            "account-number",
            &[("number", escape(&account.account_number).as_str())],
        ));
    }

    result
}

/// Plain-text message relayed to the staff chat
pub fn format_feedback(sender: &str, feedback: &str) -> String {
    format!("{}\n{}", t_args("feedback-forward", &[("user", sender)]), feedback)
}
