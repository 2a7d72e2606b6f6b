// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Storage(String),
    /// A page could not be parsed as HTML/XHTML markup.
    Markup(String),
    Catalog(CatalogError),
    /// A language switch named a code the loaded catalog does not contain.
    UnknownLanguage(String),
    /// The catalog has not been loaded yet.
    NotReady,
}

/// Reasons a translation catalog could not be loaded.
///
/// None of these are fatal: the store keeps its previous state and
/// lookups degrade to returning raw keys.
#[derive(Debug, Clone)]
pub enum CatalogError {
    /// The transport failed before a response was received.
    Fetch(String),

    /// The server answered with a non-success status.
    Status(u16),

    /// The document exceeds the accepted catalog size.
    TooLarge { limit: u64 },

    /// The document is not valid catalog JSON.
    Malformed(String),

    /// The document parsed but has no dictionary for the default language.
    MissingDefaultLanguage(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Fetch(msg) => write!(f, "fetch failed: {}", msg),
            CatalogError::Status(code) => write!(f, "HTTP status: {}", code),
            CatalogError::TooLarge { limit } => {
                write!(f, "catalog exceeds {} bytes", limit)
            }
            CatalogError::Malformed(msg) => write!(f, "malformed catalog: {}", msg),
            CatalogError::MissingDefaultLanguage(lang) => {
                write!(f, "catalog has no '{}' dictionary", lang)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Storage(e) => write!(f, "Storage Error: {}", e),
            Error::Markup(e) => write!(f, "Markup Error: {}", e),
            Error::Catalog(e) => write!(f, "Catalog Error: {}", e),
            Error::UnknownLanguage(code) => write!(f, "Language {} not available", code),
            Error::NotReady => write!(f, "Translations are not loaded yet"),
        }
    }
}

impl std::error::Error for Error {}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Error::Catalog(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Markup(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Markup(err.to_string())
    }
}

impl From<ciborium::de::Error<std::io::Error>> for Error {
    fn from(err: ciborium::de::Error<std::io::Error>) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<ciborium::ser::Error<std::io::Error>> for Error {
    fn from(err: ciborium::ser::Error<std::io::Error>) -> Self {
        Error::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
