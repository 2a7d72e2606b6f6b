// SPDX-License-Identifier: MPL-2.0
//! Three-tier key lookup: requested language, then default language, then
//! the key itself.
//!
//! Empty strings count as missing, so a lookup never yields a blank.

use super::catalog::{Dictionary, TranslationCatalog};

/// Lookup bound to one language for the duration of a pass.
///
/// The language is selected once at construction, so an apply pass over
/// many bindings reports an unknown language only once.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    selected: Option<&'a Dictionary>,
    fallback: Option<&'a Dictionary>,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a TranslationCatalog, language: &str, default_language: &str) -> Self {
        let fallback = catalog.dictionary(default_language);
        let selected = match catalog.dictionary(language) {
            Some(dictionary) => Some(dictionary),
            None => {
                if !catalog.is_empty() {
                    tracing::warn!(
                        language,
                        fallback = default_language,
                        "language not found, falling back"
                    );
                }
                fallback
            }
        };
        Self { selected, fallback }
    }

    pub fn resolve<'k>(&self, key: &'k str) -> &'k str
    where
        'a: 'k,
    {
        lookup(self.selected, key)
            .or_else(|| lookup(self.fallback, key))
            .unwrap_or(key)
    }
}

fn lookup<'a>(dictionary: Option<&'a Dictionary>, key: &str) -> Option<&'a str> {
    dictionary
        .and_then(|dict| dict.get(key))
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

/// Resolves a single key without holding a [`Resolver`].
pub fn resolve<'a>(
    catalog: &'a TranslationCatalog,
    key: &'a str,
    language: &str,
    default_language: &str,
) -> &'a str {
    Resolver::new(catalog, language, default_language).resolve(key)
}
