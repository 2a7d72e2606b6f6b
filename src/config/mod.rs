// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! Every field is optional; accessors fall back to the values in [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use civic_locale::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Point the catalog at a local development server
//! config.server_url = Some("http://localhost:3000".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::{
    DEFAULT_CATALOG_PATH, DEFAULT_HTML_ATTRIBUTE, DEFAULT_LANGUAGE, DEFAULT_LANGUAGE_SELECTOR_ID,
    DEFAULT_STORAGE_KEY, DEFAULT_TEXT_ATTRIBUTE, DEFAULT_TRUST_HTML,
};

const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the application server hosting the catalog.
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub catalog_path: Option<String>,
    #[serde(default)]
    pub default_language: Option<String>,
    #[serde(default)]
    pub storage_key: Option<String>,
    #[serde(default)]
    pub text_attribute: Option<String>,
    #[serde(default)]
    pub html_attribute: Option<String>,
    #[serde(default)]
    pub language_selector_ids: Option<Vec<String>>,
    /// Inject HTML-marked strings as markup instead of escaped text.
    #[serde(default)]
    pub trust_html: Option<bool>,
    /// Start in the OS language when nothing is persisted.
    #[serde(default)]
    pub follow_system_locale: Option<bool>,
}

impl Config {
    pub fn default_language(&self) -> &str {
        self.default_language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    pub fn storage_key(&self) -> &str {
        self.storage_key.as_deref().unwrap_or(DEFAULT_STORAGE_KEY)
    }

    pub fn catalog_path(&self) -> &str {
        self.catalog_path.as_deref().unwrap_or(DEFAULT_CATALOG_PATH)
    }

    /// Full catalog URL, if a server is configured.
    pub fn catalog_url(&self) -> Option<String> {
        self.server_url.as_deref().map(|base| {
            let base = base.trim_end_matches('/');
            let path = self.catalog_path();
            if path.starts_with('/') {
                format!("{base}{path}")
            } else {
                format!("{base}/{path}")
            }
        })
    }

    pub fn text_attribute(&self) -> &str {
        self.text_attribute.as_deref().unwrap_or(DEFAULT_TEXT_ATTRIBUTE)
    }

    pub fn html_attribute(&self) -> &str {
        self.html_attribute.as_deref().unwrap_or(DEFAULT_HTML_ATTRIBUTE)
    }

    pub fn language_selector_ids(&self) -> Vec<String> {
        self.language_selector_ids
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_LANGUAGE_SELECTOR_ID.to_string()])
    }

    pub fn trust_html(&self) -> bool {
        self.trust_html.unwrap_or(DEFAULT_TRUST_HTML)
    }

    pub fn follow_system_locale(&self) -> bool {
        self.follow_system_locale.unwrap_or(false)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    paths::get_app_config_dir().map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), "ignoring invalid settings: {err}");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
