// SPDX-License-Identifier: MPL-2.0
//! The localization service: owns the catalog, the active language and the
//! language change subscribers.
//!
//! # States
//!
//! A [`Localizer`] starts [`Uninitialized`](LocalizerState::Uninitialized)
//! and becomes [`Ready`](LocalizerState::Ready) on its first successful
//! catalog load. Language switches are refused until then.

use super::catalog::TranslationCatalog;
use super::resolver::{self, Resolver};
use super::source::CatalogSource;
use super::store::TranslationStore;
use crate::config::defaults::LANGUAGE_EVENT_CAPACITY;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::page::{self, ApplyReport, Page};
use crate::storage::LanguageStorage;
use tokio::sync::broadcast;
use unic_langid::LanguageIdentifier;

/// Sent to every subscriber after a successful language switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageChanged {
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalizerState {
    Uninitialized,
    Ready,
}

pub struct Localizer<S> {
    store: TranslationStore,
    storage: S,
    storage_key: String,
    trust_html: bool,
    follow_system_locale: bool,
    /// Whether `current_language` came from storage or an explicit switch.
    language_chosen: bool,
    current_language: String,
    state: LocalizerState,
    events: broadcast::Sender<LanguageChanged>,
}

impl<S: LanguageStorage> Localizer<S> {
    /// Creates an uninitialized localizer, restoring the persisted language.
    pub fn new(config: &Config, storage: S) -> Self {
        let default_language = config.default_language().to_string();
        let persisted = storage.get(config.storage_key());
        let (events, _) = broadcast::channel(LANGUAGE_EVENT_CAPACITY);

        Self {
            store: TranslationStore::new(default_language.clone()),
            storage_key: config.storage_key().to_string(),
            trust_html: config.trust_html(),
            follow_system_locale: config.follow_system_locale(),
            language_chosen: persisted.is_some(),
            current_language: persisted.unwrap_or(default_language),
            storage,
            state: LocalizerState::Uninitialized,
            events,
        }
    }

    /// Loads the catalog without touching any page.
    ///
    /// Returns `false` on failure; the localizer then keeps its previous
    /// catalog and state.
    pub async fn load(&mut self, source: &impl CatalogSource) -> bool {
        if !self.store.load(source).await {
            return false;
        }
        if self.state == LocalizerState::Uninitialized {
            self.state = LocalizerState::Ready;
            if self.follow_system_locale && !self.language_chosen {
                if let Some(language) =
                    system_language(sys_locale::get_locale(), self.store.catalog())
                {
                    tracing::info!(language = %language, "using system language");
                    self.current_language = language;
                }
            }
        }
        true
    }

    /// Loads the catalog and, on success, applies it to `page`.
    pub async fn init(&mut self, source: &impl CatalogSource, page: &mut impl Page) -> bool {
        let loaded = self.load(source).await;
        if loaded {
            self.apply(page);
        }
        loaded
    }

    /// Writes every bound string of `page` in the active language.
    pub fn apply(&self, page: &mut impl Page) -> ApplyReport {
        page::apply(
            page,
            &self.resolver(),
            &self.current_language,
            self.trust_html,
        )
    }

    /// Switches the active language, persists it, re-applies `page` and
    /// notifies subscribers.
    ///
    /// Nothing changes when the localizer is not ready or `code` is not in
    /// the catalog.
    pub fn change_language(&mut self, code: &str, page: &mut impl Page) -> Result<ApplyReport> {
        if self.state == LocalizerState::Uninitialized {
            tracing::error!(language = code, "cannot change language before translations load");
            return Err(Error::NotReady);
        }
        if !self.store.catalog().contains_language(code) {
            tracing::error!("Language {code} not available");
            return Err(Error::UnknownLanguage(code.to_string()));
        }

        self.current_language = code.to_string();
        self.language_chosen = true;
        if let Err(err) = self.storage.set(&self.storage_key, code) {
            tracing::warn!(language = code, "failed to persist language: {err}");
        }

        let report = self.apply(page);
        self.notify();
        tracing::info!(language = code, "language changed");
        Ok(report)
    }

    /// Adopts a language persisted by another writer, if it changed.
    ///
    /// Returns `true` when the active language switched.
    pub fn sync_from_storage(&mut self, page: &mut impl Page) -> bool {
        if self.state == LocalizerState::Uninitialized {
            return false;
        }
        if let Err(err) = self.storage.reload() {
            tracing::warn!("failed to reload persisted language: {err}");
            return false;
        }
        let Some(stored) = self.storage.get(&self.storage_key) else {
            return false;
        };
        if stored == self.current_language {
            return false;
        }
        if !self.store.catalog().contains_language(&stored) {
            tracing::warn!(language = %stored, "ignoring persisted language missing from catalog");
            return false;
        }

        tracing::info!(language = %stored, "language changed by another writer");
        self.current_language = stored;
        self.language_chosen = true;
        self.apply(page);
        self.notify();
        true
    }

    fn notify(&self) {
        let event = LanguageChanged {
            language: self.current_language.clone(),
        };
        if self.events.send(event).is_err() {
            tracing::debug!("no language change subscribers");
        }
    }

    /// Receives a [`LanguageChanged`] for every successful switch made after
    /// this call.
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageChanged> {
        self.events.subscribe()
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(
            self.store.catalog(),
            &self.current_language,
            self.store.default_language(),
        )
    }

    pub fn resolve<'a>(&'a self, key: &'a str, language: &str) -> &'a str {
        resolver::resolve(
            self.store.catalog(),
            key,
            language,
            self.store.default_language(),
        )
    }

    /// Resolves `key` in the active language.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.resolve(key, &self.current_language)
    }

    pub fn current_language(&self) -> &str {
        &self.current_language
    }

    pub fn available_languages(&self) -> Vec<&str> {
        self.store.catalog().languages()
    }

    pub fn default_language(&self) -> &str {
        self.store.default_language()
    }

    pub fn state(&self) -> LocalizerState {
        self.state
    }

    pub fn catalog(&self) -> &TranslationCatalog {
        self.store.catalog()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// Catalog language matching an OS locale such as `hi-IN`: the full tag if
/// present, else its language subtag.
fn system_language(locale: Option<String>, catalog: &TranslationCatalog) -> Option<String> {
    let locale = locale?;
    if catalog.contains_language(&locale) {
        return Some(locale);
    }
    let langid: LanguageIdentifier = locale.parse().ok()?;
    let language = langid.language.as_str();
    catalog
        .contains_language(language)
        .then(|| language.to_string())
}
