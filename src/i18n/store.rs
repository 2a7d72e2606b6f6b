// SPDX-License-Identifier: MPL-2.0
//! Holds the loaded [`TranslationCatalog`].
//!
//! Loading never raises: failures are logged and reported as `false`, and
//! the previously loaded catalog (empty on first load) stays in place, so
//! lookups keep working or degrade to raw keys.

use super::catalog::TranslationCatalog;
use super::source::CatalogSource;

#[derive(Debug, Clone)]
pub struct TranslationStore {
    catalog: TranslationCatalog,
    default_language: String,
}

impl TranslationStore {
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            catalog: TranslationCatalog::new(),
            default_language: default_language.into(),
        }
    }

    /// Fetches and parses the catalog once. No retry; call again to retry.
    pub async fn load(&mut self, source: &impl CatalogSource) -> bool {
        let location = source.describe();
        let document = match source.fetch().await {
            Ok(document) => document,
            Err(err) => {
                tracing::error!(source = %location, "failed to load translations: {err}");
                return false;
            }
        };

        match TranslationCatalog::from_json(&document, &self.default_language) {
            Ok(catalog) => {
                tracing::info!(source = %location, languages = ?catalog.languages(), "translations loaded");
                self.catalog = catalog;
                true
            }
            Err(err) => {
                tracing::error!(source = %location, "failed to load translations: {err}");
                false
            }
        }
    }

    pub fn catalog(&self) -> &TranslationCatalog {
        &self.catalog
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }
}
