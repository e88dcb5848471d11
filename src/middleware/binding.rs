//! Host framework binding
//!
//! A conversational framework exposes two things to the translator: a way to
//! register a per-turn middleware, and objects (the app and each turn) that
//! lookups can be installed on under alias names.

use tracing::{debug, error, info};
use crate::config::I18nOptions;
use crate::i18n::{Lookup, Translator};
use crate::utils::errors::Result;

/// Per-turn callback registered with the host
pub type Middleware<T> = Box<dyn Fn(&mut T) -> Result<()> + Send + Sync>;

/// One request/response cycle of the host framework
pub trait TurnContext {
    /// Locale reported for the user of this turn, if any
    fn user_locale(&self) -> Option<&str>;

    /// Make `lookup` reachable on this turn as `alias`
    fn install_lookup(&mut self, alias: &'static str, lookup: Lookup);
}

/// The long-lived application object of the host framework
pub trait AppHost {
    type Turn: TurnContext;

    /// Run `middleware` on every turn before user handlers
    fn register_middleware(&mut self, middleware: Middleware<Self::Turn>);

    /// Make `lookup` reachable on the application as `alias`
    fn install_lookup(&mut self, alias: &'static str, lookup: Lookup);
}

/// Install every flavor of `lookups` under both of its aliases
fn install_all(lookups: Vec<Lookup>, mut install: impl FnMut(&'static str, Lookup)) {
    for lookup in lookups {
        for alias in lookup.flavor().aliases() {
            install(alias, lookup.clone());
        }
    }
}

impl Translator {
    /// Bind this translator to a host framework
    ///
    /// Configures with defaults when `configure` was never called. The app
    /// object gets default-locale lookups immediately; every turn gets lookups
    /// over a freshly loaded catalog for its own locale.
    pub fn attach<H>(&mut self, host: &mut H) -> Result<()>
    where
        H: AppHost + 'static,
        H::Turn: 'static,
    {
        if !self.is_configured() {
            debug!("Translator not configured before attach, applying defaults");
            self.configure(I18nOptions::default())?;
        }

        let translator = self.clone();
        host.register_middleware(Box::new(move |turn: &mut H::Turn| {
            let requested = turn.user_locale().map(str::to_string);
            let lookups = translator.bind_all(requested.as_deref()).map_err(|e| {
                error!(requested_locale = ?requested, error = %e, "Failed to bind lookups for turn");
                e
            })?;

            install_all(lookups, |alias, lookup| turn.install_lookup(alias, lookup));
            Ok(())
        }));

        let app_lookups = self.bind_all(None)?;
        if let Some(lookup) = app_lookups.first() {
            info!(locale = %lookup.locale(), "Translator attached to host");
        }
        install_all(app_lookups, |alias, lookup| host.install_lookup(alias, lookup));

        Ok(())
    }
}
