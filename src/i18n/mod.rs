// SPDX-License-Identifier: MPL-2.0
//! Translation catalogs, key resolution and the localization service.
//!
//! # Fallback
//!
//! A key resolves through three tiers: the requested language, the default
//! language, then the key itself. Empty strings count as missing, so a page
//! never renders an empty label.
//!
//! # Layout
//!
//! - [`source`]: where a catalog document comes from (HTTP, file, bundled)
//! - [`store`]: loading and holding the parsed [`TranslationCatalog`]
//! - [`resolver`]: the fallback lookup
//! - [`localizer`]: active language, switching and change notifications

pub mod catalog;
pub mod localizer;
pub mod resolver;
pub mod source;
pub mod store;

pub use catalog::{Dictionary, TranslationCatalog};
pub use localizer::{LanguageChanged, Localizer, LocalizerState};
pub use resolver::{resolve, Resolver};
pub use source::{BundledSource, CatalogSource, FileSource, HttpSource, Source};
pub use store::TranslationStore;
