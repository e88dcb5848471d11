//! convo-i18n demo bot
//!
//! Main application entry point: a Telegram bot that greets every sender in
//! their own language.

use std::sync::Arc;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use tracing::{info, warn};

use convo_i18n::{
    config::{validation::validate_bot_config, Settings},
    handlers::{bot_i18n_options, handle_message, BotHost},
    utils::logging,
    Translator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;
    validate_bot_config(&settings.bot)?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", convo_i18n::info());

    // Initialize translator and attach it to the bot host
    let mut translator = Translator::from_fs();
    translator.configure(bot_i18n_options(settings.i18n.clone()))?;

    let mut host = BotHost::new();
    translator.attach(&mut host)?;
    let host = Arc::new(host);

    let bot = Bot::new(&settings.bot.token);
    let handler = Update::filter_message().endpoint(handle_message);

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![host])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("Starting bot with polling mode...");
    dispatcher.dispatch().await;

    info!("Bot has been shut down.");

    Ok(())
}
