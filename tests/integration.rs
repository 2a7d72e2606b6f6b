// SPDX-License-Identifier: MPL-2.0
use civic_locale::config::defaults::MAX_CATALOG_BYTES;
use civic_locale::config::{self, Config};
use civic_locale::error::Error;
use civic_locale::i18n::{FileSource, HttpSource, Localizer, LocalizerState, Source};
use civic_locale::page::markup::{MarkupPage, PageMarkers};
use civic_locale::storage::{FileStorage, LanguageStorage, MemoryStorage};
use tempfile::tempdir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const CATALOG: &str = r#"{
  "translations": {
    "en": {
      "hero_title": "Welcome",
      "search_placeholder": "Search services...",
      "hero_cta": "<strong>Ask</strong> now",
      "footer_text": "Made for citizens"
    },
    "hi": {
      "hero_title": "स्वागत",
      "search_placeholder": "सेवाएँ खोजें...",
      "hero_cta": "<strong>पूछें</strong>"
    }
  }
}"#;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <h1 id="title" data-i18n="hero_title">Welcome</h1>
  <input id="search" type="text" data-i18n="search_placeholder" placeholder="">
  <p id="cta" data-i18n-html="hero_cta"></p>
  <footer id="footer" data-i18n="footer_text"></footer>
  <select id="languageSelector">
    <option value="en">English</option>
    <option value="hi">हिन्दी</option>
  </select>
</body>
</html>
"#;

/// Serves `body` with `status` to a single connection.
async fn serve_once(status: &'static str, body: impl Into<String>) -> String {
    let body = body.into();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buffer = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let read = socket.read(&mut buffer).await.unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buffer[..read]);
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        // The client may hang up early on oversized responses.
        if socket.write_all(response.as_bytes()).await.is_ok() {
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{address}/data/translations.json")
}

#[tokio::test]
async fn page_is_localized_and_switch_survives_restart() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let catalog_path = dir.path().join("translations.json");
    std::fs::write(&catalog_path, CATALOG).unwrap();
    let source = FileSource::new(&catalog_path);
    let config = Config::default();

    let storage = FileStorage::open_in(dir.path()).unwrap();
    let mut localizer = Localizer::new(&config, storage);
    let mut page = MarkupPage::parse(PAGE, PageMarkers::from_config(&config)).unwrap();

    assert!(localizer.init(&source, &mut page).await);
    assert_eq!(page.text_by_id("title").as_deref(), Some("Welcome"));
    assert_eq!(
        page.attribute_by_id("search", "placeholder").as_deref(),
        Some("Search services...")
    );
    assert!(page.to_string().contains("<p id=\"cta\" data-i18n-html=\"hero_cta\"><strong>Ask</strong> now</p>"));

    localizer.change_language("hi", &mut page).unwrap();
    assert_eq!(page.text_by_id("title").as_deref(), Some("स्वागत"));
    // Missing in Hindi, so the English string stays.
    assert_eq!(page.text_by_id("footer").as_deref(), Some("Made for citizens"));
    assert!(page.to_string().contains("<option value=\"hi\" selected=\"selected\">"));

    let err = localizer.change_language("fr", &mut page).unwrap_err();
    assert!(matches!(err, Error::UnknownLanguage(_)));
    assert_eq!(page.text_by_id("title").as_deref(), Some("स्वागत"));

    // A new session restores the persisted choice.
    let storage = FileStorage::open_in(dir.path()).unwrap();
    assert_eq!(storage.get("language").as_deref(), Some("hi"));
    let mut restarted = Localizer::new(&config, storage);
    let mut fresh = MarkupPage::parse(PAGE, PageMarkers::from_config(&config)).unwrap();
    assert!(restarted.init(&source, &mut fresh).await);
    assert_eq!(fresh.text_by_id("title").as_deref(), Some("स्वागत"));
}

#[tokio::test]
async fn apply_is_idempotent_on_markup() {
    let dir = tempdir().unwrap();
    let catalog_path = dir.path().join("translations.json");
    std::fs::write(&catalog_path, CATALOG).unwrap();

    let mut localizer = Localizer::new(&Config::default(), MemoryStorage::new());
    let mut page = MarkupPage::parse(PAGE, PageMarkers::default()).unwrap();
    assert!(localizer.init(&FileSource::new(&catalog_path), &mut page).await);

    let first = page.to_string();
    localizer.apply(&mut page);
    assert_eq!(page.to_string(), first);
}

#[tokio::test]
async fn catalog_is_fetched_over_http() {
    let url = serve_once("200 OK", CATALOG).await;
    let mut localizer = Localizer::new(&Config::default(), MemoryStorage::new());

    assert!(localizer.load(&Source::from_location(&url)).await);
    assert_eq!(localizer.available_languages(), vec!["en", "hi"]);
    assert_eq!(localizer.resolve("hero_title", "hi"), "स्वागत");
}

#[tokio::test]
async fn missing_catalog_degrades_to_raw_keys() {
    let url = serve_once("404 Not Found", "{}").await;
    let mut localizer = Localizer::new(&Config::default(), MemoryStorage::new());
    let mut page = MarkupPage::parse(PAGE, PageMarkers::default()).unwrap();

    assert!(!localizer.init(&HttpSource::new(url), &mut page).await);
    assert_eq!(localizer.state(), LocalizerState::Uninitialized);
    assert_eq!(localizer.t("hero_title"), "hero_title");
    // Nothing was applied, so the authored text stays.
    assert_eq!(page.text_by_id("title").as_deref(), Some("Welcome"));
}

#[tokio::test]
async fn oversized_catalog_is_rejected() {
    let padding = " ".repeat(MAX_CATALOG_BYTES as usize);
    let url = serve_once("200 OK", format!("{CATALOG}{padding}")).await;
    let mut localizer = Localizer::new(&Config::default(), MemoryStorage::new());

    assert!(!localizer.load(&Source::from_location(&url)).await);
    assert!(localizer.catalog().is_empty());
    assert_eq!(localizer.state(), LocalizerState::Uninitialized);
}

#[tokio::test]
async fn oversized_reload_keeps_previous_catalog() {
    let dir = tempdir().unwrap();
    let catalog_path = dir.path().join("translations.json");
    std::fs::write(&catalog_path, CATALOG).unwrap();
    let mut localizer = Localizer::new(&Config::default(), MemoryStorage::new());
    assert!(localizer.load(&FileSource::new(&catalog_path)).await);

    let padding = " ".repeat(MAX_CATALOG_BYTES as usize);
    let url = serve_once("200 OK", format!("{CATALOG}{padding}")).await;

    assert!(!localizer.load(&HttpSource::new(url)).await);
    assert_eq!(localizer.available_languages(), vec!["en", "hi"]);
}

#[test]
fn settings_round_trip_through_toml() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let settings = Config {
        server_url: Some("https://civic.example.org".to_string()),
        default_language: Some("hi".to_string()),
        trust_html: Some(false),
        ..Config::default()
    };
    config::save_to_path(&settings, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    assert_eq!(loaded, settings);
    assert_eq!(
        loaded.catalog_url().as_deref(),
        Some("https://civic.example.org/data/translations.json")
    );
    assert_eq!(loaded.storage_key(), "language");
}
