// SPDX-License-Identifier: MPL-2.0
use civic_locale::config::{self, Config};
use civic_locale::error::{Error, Result};
use civic_locale::i18n::{BundledSource, Localizer, Source};
use civic_locale::page::markup::{MarkupPage, PageMarkers};
use civic_locale::page::DetachedPage;
use civic_locale::paths;
use civic_locale::storage::{FileStorage, LanguageStorage, MemoryStorage};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
civic-locale: apply translation catalogs to HTML pages

USAGE:
  civic-locale [OPTIONS] <COMMAND>

COMMANDS:
  languages                  List catalog languages (* marks the active one)
  current                    Print the active language
  translate <KEY>...         Resolve keys in the active language
  apply <PAGE> [--output F]  Localize a page and print or write it
  switch <CODE>              Change and persist the active language
  coverage                   List keys each language is missing

OPTIONS:
  --catalog <URL|PATH>  Catalog location (default: settings, then bundled)
  --lang <CODE>         Use this language for one run without persisting it
  --data-dir <PATH>     Override the data directory
  --config-dir <PATH>   Override the config directory
  -v, --verbose         Debug logging
  -h, --help            Print help
";

enum Command {
    Languages,
    Current,
    Translate(Vec<String>),
    Apply {
        page: PathBuf,
        output: Option<PathBuf>,
    },
    Switch(String),
    Coverage,
}

struct Args {
    catalog: Option<String>,
    lang: Option<String>,
    data_dir: Option<String>,
    config_dir: Option<String>,
    verbose: bool,
    command: Command,
}

fn parse_args(mut args: pico_args::Arguments) -> std::result::Result<Option<Args>, String> {
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let verbose = args.contains(["-v", "--verbose"]);
    let catalog = opt_value(&mut args, "--catalog")?;
    let lang = opt_value(&mut args, "--lang")?;
    let data_dir = opt_value(&mut args, "--data-dir")?;
    let config_dir = opt_value(&mut args, "--config-dir")?;
    let output: Option<PathBuf> = opt_value(&mut args, "--output")?.map(PathBuf::from);

    let name = args
        .subcommand()
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "missing command".to_string())?;

    let command = match name.as_str() {
        "languages" => Command::Languages,
        "current" => Command::Current,
        "coverage" => Command::Coverage,
        "translate" => {
            let mut keys = Vec::new();
            while let Some(key) = args
                .opt_free_from_str::<String>()
                .map_err(|e| e.to_string())?
            {
                keys.push(key);
            }
            if keys.is_empty() {
                return Err("translate needs at least one key".to_string());
            }
            Command::Translate(keys)
        }
        "apply" => {
            let page: String = args.free_from_str().map_err(|e| e.to_string())?;
            Command::Apply {
                page: PathBuf::from(page),
                output,
            }
        }
        "switch" => {
            let code: String = args.free_from_str().map_err(|e| e.to_string())?;
            Command::Switch(code)
        }
        other => return Err(format!("unknown command '{other}'")),
    };

    if lang.is_some() && matches!(command, Command::Switch(_)) {
        return Err("switch persists the language; it cannot be combined with --lang".to_string());
    }

    let extra = remaining(args)?;
    if !extra.is_empty() {
        return Err(format!("unexpected arguments: {}", extra.join(" ")));
    }

    Ok(Some(Args {
        catalog,
        lang,
        data_dir,
        config_dir,
        verbose,
        command,
    }))
}

fn opt_value(
    args: &mut pico_args::Arguments,
    key: &'static str,
) -> std::result::Result<Option<String>, String> {
    args.opt_value_from_str(key).map_err(|e| e.to_string())
}

fn remaining(args: pico_args::Arguments) -> std::result::Result<Vec<String>, String> {
    args.finish()
        .into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| format!("argument is not valid UTF-8: {arg:?}"))
        })
        .collect()
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "civic_locale=debug"
    } else {
        "civic_locale=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match parse_args(pico_args::Arguments::from_env()) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("error: {message}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    init_logging(args.verbose);
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    paths::init_cli_overrides(args.data_dir, args.config_dir)?;
    let config = config::load()?;

    let source = match args.catalog.or_else(|| config.catalog_url()) {
        Some(location) => Source::from_location(&location),
        None => Source::Bundled(BundledSource),
    };

    match args.lang {
        Some(lang) => {
            let storage = MemoryStorage::with_value(config.storage_key(), &lang);
            execute(args.command, Localizer::new(&config, storage), &source, &config).await
        }
        None => {
            let storage = FileStorage::open()?;
            tracing::debug!(path = %storage.path().display(), "using persisted language");
            execute(args.command, Localizer::new(&config, storage), &source, &config).await
        }
    }
}

async fn execute<S: LanguageStorage>(
    command: Command,
    mut localizer: Localizer<S>,
    source: &Source,
    config: &Config,
) -> Result<()> {
    let loaded = localizer.load(source).await;

    match command {
        Command::Languages => {
            if !loaded {
                return Err(Error::NotReady);
            }
            for language in localizer.available_languages() {
                let marker = if language == localizer.current_language() {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {language}");
            }
        }
        Command::Current => println!("{}", localizer.current_language()),
        Command::Translate(keys) => {
            for key in &keys {
                println!("{key}\t{}", localizer.t(key));
            }
        }
        Command::Apply { page, output } => {
            let markup = tokio::fs::read_to_string(&page).await?;
            let mut document = MarkupPage::parse(&markup, PageMarkers::from_config(config))?;
            let report = localizer.apply(&mut document);
            let rendered = document.to_string();
            match output {
                Some(path) => tokio::fs::write(&path, rendered).await?,
                None => print!("{rendered}"),
            }
            tracing::info!(
                page = %page.display(),
                writes = report.writes,
                selector = report.selector_synced,
                "page localized"
            );
        }
        Command::Switch(code) => {
            localizer.change_language(&code, &mut DetachedPage)?;
            println!("{code}");
        }
        Command::Coverage => {
            if !loaded {
                return Err(Error::NotReady);
            }
            let default_language = localizer.default_language();
            for language in localizer.available_languages() {
                let missing = localizer.catalog().missing_keys(language, default_language);
                println!("{language}: {} missing", missing.len());
                for key in missing {
                    println!("  {key}");
                }
            }
        }
    }

    Ok(())
}
