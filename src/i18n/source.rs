// SPDX-License-Identifier: MPL-2.0
//! Places a translation catalog document can be fetched from.
//!
//! - [`HttpSource`]: the application server (`GET /data/translations.json`)
//! - [`FileSource`]: a JSON file on disk
//! - [`BundledSource`]: the catalog compiled into the binary
//!
//! Every source enforces [`MAX_CATALOG_BYTES`] and returns the raw document;
//! parsing happens in the store.

use crate::config::defaults::{MAX_CATALOG_BYTES, USER_AGENT};
use crate::error::CatalogError;
use rust_embed::RustEmbed;
use std::future::Future;
use std::path::PathBuf;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

const BUNDLED_CATALOG: &str = "translations.json";

/// Fetches the raw catalog document.
pub trait CatalogSource {
    /// Human-readable location, used in diagnostics.
    fn describe(&self) -> String;

    fn fetch(&self) -> impl Future<Output = Result<String, CatalogError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl CatalogSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String, CatalogError> {
        use futures_util::StreamExt;

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CatalogError::Fetch(e.to_string()))?;

        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status().as_u16()));
        }

        if response
            .content_length()
            .is_some_and(|len| len > MAX_CATALOG_BYTES)
        {
            return Err(CatalogError::TooLarge {
                limit: MAX_CATALOG_BYTES,
            });
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| CatalogError::Fetch(e.to_string()))?;
            if (body.len() + chunk.len()) as u64 > MAX_CATALOG_BYTES {
                return Err(CatalogError::TooLarge {
                    limit: MAX_CATALOG_BYTES,
                });
            }
            body.extend_from_slice(&chunk);
        }

        String::from_utf8(body).map_err(|e| CatalogError::Malformed(e.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, CatalogError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| CatalogError::Fetch(e.to_string()))?;
        if metadata.len() > MAX_CATALOG_BYTES {
            return Err(CatalogError::TooLarge {
                limit: MAX_CATALOG_BYTES,
            });
        }
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::Fetch(e.to_string()))
    }
}

/// The catalog shipped in `assets/i18n/translations.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl CatalogSource for BundledSource {
    fn describe(&self) -> String {
        format!("bundled {BUNDLED_CATALOG}")
    }

    async fn fetch(&self) -> Result<String, CatalogError> {
        let file = Asset::get(BUNDLED_CATALOG)
            .ok_or_else(|| CatalogError::Fetch(format!("{BUNDLED_CATALOG} not bundled")))?;
        String::from_utf8(file.data.into_owned()).map_err(|e| CatalogError::Malformed(e.to_string()))
    }
}

/// Any of the built-in sources, chosen at runtime.
#[derive(Debug, Clone)]
pub enum Source {
    Http(HttpSource),
    File(FileSource),
    Bundled(BundledSource),
}

impl Source {
    /// `http(s)://` locations become [`HttpSource`], anything else a [`FileSource`].
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Source::Http(HttpSource::new(location))
        } else {
            Source::File(FileSource::new(location))
        }
    }
}

impl CatalogSource for Source {
    fn describe(&self) -> String {
        match self {
            Source::Http(source) => source.describe(),
            Source::File(source) => source.describe(),
            Source::Bundled(source) => source.describe(),
        }
    }

    async fn fetch(&self) -> Result<String, CatalogError> {
        match self {
            Source::Http(source) => source.fetch().await,
            Source::File(source) => source.fetch().await,
            Source::Bundled(source) => source.fetch().await,
        }
    }
}
