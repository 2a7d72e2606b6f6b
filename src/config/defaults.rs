// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Catalog**: Where the translation catalog lives and how big it may be
//! - **Language**: Default language and its storage key
//! - **Page markers**: Attribute names and element ids bound during apply
//! - **Notifications**: Language change channel sizing

// ==========================================================================
// Catalog Defaults
// ==========================================================================

/// Path of the catalog document on the application server.
pub const DEFAULT_CATALOG_PATH: &str = "/data/translations.json";

/// Largest catalog body accepted from any source (4 MiB).
pub const MAX_CATALOG_BYTES: u64 = 4 * 1024 * 1024;

/// User agent sent with catalog requests.
pub const USER_AGENT: &str = concat!("civic-locale/", env!("CARGO_PKG_VERSION"));

// ==========================================================================
// Language Defaults
// ==========================================================================

/// Language used when nothing is persisted and as the resolver fallback.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Storage key holding the active language.
pub const DEFAULT_STORAGE_KEY: &str = "language";

// ==========================================================================
// Page Marker Defaults
// ==========================================================================

/// Attribute binding an element's plain text to a catalog key.
pub const DEFAULT_TEXT_ATTRIBUTE: &str = "data-i18n";

/// Attribute binding an element's markup content to a catalog key.
pub const DEFAULT_HTML_ATTRIBUTE: &str = "data-i18n-html";

/// Element id of the language selector control.
pub const DEFAULT_LANGUAGE_SELECTOR_ID: &str = "languageSelector";

/// Whether catalog strings bound with the HTML marker are injected as markup.
pub const DEFAULT_TRUST_HTML: bool = true;

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Number of language change events buffered per subscriber.
pub const LANGUAGE_EVENT_CAPACITY: usize = 16;
