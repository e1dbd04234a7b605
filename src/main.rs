use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};

use hotel_menu_bot::bot::{schema, BotContext, Command};
use hotel_menu_bot::catalog::MenuCatalog;
use hotel_menu_bot::config::BotConfig;
use hotel_menu_bot::gateway::TelegramGateway;
use hotel_menu_bot::localization::init_localization;
use hotel_menu_bot::logging::init_tracing;
use hotel_menu_bot::session::SessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = BotConfig::from_env().context("Invalid bot configuration")?;

    init_tracing(config.log_format);
    info!(config = ?config, "Starting hotel menu bot");

    init_localization()?;

    let catalog = match &config.catalog_path {
        Some(path) => {
            info!(path = %path.display(), "Loading menu catalog");
            MenuCatalog::load(path)
                .with_context(|| format!("Failed to load menu catalog from {}", path.display()))?
        }
        None => MenuCatalog::default(),
    };
    for category in catalog.categories() {
        debug!(category = %category.name, images = category.images.len(), "Menu category");
    }
    info!(categories = catalog.len(), "Menu catalog ready");

    let bot = Bot::new(config.bot_token.clone());

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let sessions = SessionStore::new(config.session_idle_timeout);
    let _sweeper = sessions.spawn_sweeper(config.session_sweep_interval);

    let ctx = Arc::new(BotContext::new(
        TelegramGateway::new(bot.clone()),
        Arc::new(catalog),
        sessions,
        config.staff_chat_id,
    ));

    info!("Bot initialized, starting dispatcher");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![ctx])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
