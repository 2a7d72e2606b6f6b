// SPDX-License-Identifier: MPL-2.0
//! `civic_locale` applies translated strings to marked-up pages.
//!
//! A JSON catalog maps language codes to key/string dictionaries. Elements
//! opt in with `data-i18n="key"` (plain text) or `data-i18n-html="key"`
//! (markup); the [`i18n::Localizer`] resolves each key in the active
//! language and writes it through a [`page::Page`] adapter. The chosen
//! language is persisted through a [`storage::LanguageStorage`].

#![doc(html_root_url = "https://docs.rs/civic_locale/0.1.0")]

pub mod config;
pub mod error;
pub mod i18n;
pub mod page;
pub mod paths;
pub mod storage;
