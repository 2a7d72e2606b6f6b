// SPDX-License-Identifier: MPL-2.0
//! Translation catalog: language code → dictionary of key → string.
//!
//! The wire document is `{ "translations": { "<lang>": { "<key>": "<text>" } } }`.
//! A document without a `translations` field parses as an empty mapping.

use crate::error::CatalogError;
use serde::Deserialize;
use std::collections::HashMap;

/// Strings for a single language.
pub type Dictionary = HashMap<String, String>;

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    translations: HashMap<String, Dictionary>,
}

/// All dictionaries loaded for the page session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationCatalog {
    languages: HashMap<String, Dictionary>,
}

impl TranslationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a catalog document and checks that `default_language` is present.
    pub fn from_json(document: &str, default_language: &str) -> Result<Self, CatalogError> {
        let parsed: CatalogDocument = serde_json::from_str(document)
            .map_err(|err| CatalogError::Malformed(err.to_string()))?;
        let catalog = Self {
            languages: parsed.translations,
        };
        if !catalog.contains_language(default_language) {
            return Err(CatalogError::MissingDefaultLanguage(
                default_language.to_string(),
            ));
        }
        for code in catalog.languages.keys() {
            if code.parse::<unic_langid::LanguageIdentifier>().is_err() {
                tracing::warn!(language = %code, "catalog language is not a valid language tag");
            }
        }
        Ok(catalog)
    }

    /// Adds or replaces one language's dictionary.
    pub fn insert_language(&mut self, code: impl Into<String>, dictionary: Dictionary) {
        self.languages.insert(code.into(), dictionary);
    }

    pub fn dictionary(&self, code: &str) -> Option<&Dictionary> {
        self.languages.get(code)
    }

    pub fn contains_language(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// Language codes, sorted for deterministic output.
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Keys present in `reference` but missing (or empty) in `code`, sorted.
    ///
    /// Returns every reference key when `code` is not loaded at all.
    pub fn missing_keys(&self, code: &str, reference: &str) -> Vec<&str> {
        let Some(reference) = self.languages.get(reference) else {
            return Vec::new();
        };
        let target = self.languages.get(code);
        let mut missing: Vec<&str> = reference
            .keys()
            .filter(|key| {
                target
                    .and_then(|dict| dict.get(key.as_str()))
                    .is_none_or(|value| value.is_empty())
            })
            .map(String::as_str)
            .collect();
        missing.sort_unstable();
        missing
    }
}
