//! Telegram host
//!
//! [`BotHost`] and [`BotTurn`] implement the host-framework traits on top of
//! teloxide so the translator can be attached to a Telegram bot.

use std::collections::HashMap;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, warn};

use crate::config::I18nOptions;
use crate::i18n::{Context, Lookup};
use crate::middleware::{AppHost, Middleware, TurnContext};
use crate::utils::errors::{I18nError, Result};
use crate::utils::logging::log_lookup_failure;

type HandlerResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Key replied with for every text message
pub const GREETING_KEY: &str = "greeting";

/// Default locale of the bot; Telegram reports bare language codes like `en`
pub const BOT_DEFAULT_LOCALE: &str = "en";

/// Translator options for the bot, defaulting the locale to [`BOT_DEFAULT_LOCALE`]
pub fn bot_i18n_options(mut options: I18nOptions) -> I18nOptions {
    options
        .default_locale
        .get_or_insert_with(|| BOT_DEFAULT_LOCALE.to_string());
    options
}

/// One incoming Telegram update with the lookups installed on it
#[derive(Debug, Default)]
pub struct BotTurn {
    locale: Option<String>,
    lookups: HashMap<&'static str, Lookup>,
}

impl BotTurn {
    pub fn new(locale: Option<String>) -> Self {
        Self {
            locale,
            lookups: HashMap::new(),
        }
    }

    /// Lookup installed under `alias`
    pub fn lookup(&self, alias: &str) -> Result<&Lookup> {
        self.lookups
            .get(alias)
            .ok_or_else(|| I18nError::Config(format!("no lookup installed as \"{}\"", alias)))
    }
}

impl TurnContext for BotTurn {
    fn user_locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    fn install_lookup(&mut self, alias: &'static str, lookup: Lookup) {
        self.lookups.insert(alias, lookup);
    }
}

/// Application object shared by all Telegram handlers
#[derive(Default)]
pub struct BotHost {
    middlewares: Vec<Middleware<BotTurn>>,
    lookups: HashMap<&'static str, Lookup>,
}

impl BotHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a turn and run every registered middleware on it
    pub fn begin_turn(&self, locale: Option<String>) -> Result<BotTurn> {
        let mut turn = BotTurn::new(locale);
        for middleware in &self.middlewares {
            middleware(&mut turn)?;
        }
        Ok(turn)
    }

    /// Start a turn, falling back to the default locale when the sender's
    /// locale fails with a recoverable error such as a missing catalog
    pub fn begin_turn_or_default(&self, locale: Option<String>) -> Result<BotTurn> {
        match self.begin_turn(locale.clone()) {
            Err(e) if e.is_recoverable() && locale.is_some() => {
                warn!(locale = ?locale, error = %e, "Falling back to default locale");
                self.begin_turn(None)
            }
            result => result,
        }
    }

    /// Lookup installed on the application under `alias`
    pub fn lookup(&self, alias: &str) -> Result<&Lookup> {
        self.lookups
            .get(alias)
            .ok_or_else(|| I18nError::Config(format!("no lookup installed as \"{}\"", alias)))
    }
}

impl AppHost for BotHost {
    type Turn = BotTurn;

    fn register_middleware(&mut self, middleware: Middleware<BotTurn>) {
        self.middlewares.push(middleware);
    }

    fn install_lookup(&mut self, alias: &'static str, lookup: Lookup) {
        self.lookups.insert(alias, lookup);
    }
}

/// Reply text for a turn, or the error text when the lookup fails
pub fn greeting_reply(turn: &BotTurn, first_name: &str) -> String {
    let context = Context::new().with("name", first_name);
    let result = turn
        .lookup("__")
        .and_then(|lookup| lookup.call(GREETING_KEY, &context));

    match result {
        Ok(translation) => match translation.as_text() {
            Some(text) => text.to_string(),
            None => translation.to_string(),
        },
        Err(e) => {
            let locale = turn.user_locale().unwrap_or("default");
            log_lookup_failure(locale, GREETING_KEY, &e);
            e.to_string()
        }
    }
}

/// Handle a text message by greeting the sender in their language
pub async fn handle_message(bot: Bot, msg: Message, host: Arc<BotHost>) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        warn!(chat_id = msg.chat.id.0, "Message without sender ignored");
        return Ok(());
    };

    let turn = host.begin_turn_or_default(user.language_code.clone())?;
    let reply = greeting_reply(&turn, &user.first_name);

    info!(user_id = user.id.0, locale = ?turn.user_locale(), "Replying with greeting");
    bot.send_message(msg.chat.id, reply).await?;

    Ok(())
}
