//! Command-line front end for the portfolio translation tools.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{
    Parser,
    Subcommand,
};
use portfolio_i18n::I18n;
use portfolio_i18n::config::ConfigManager;
use portfolio_i18n::content::{
    self,
    Section,
};
use portfolio_i18n::input::translation::{
    flatten_keys,
    missing_keys,
};
use portfolio_i18n::locale::{
    LanguageSources,
    detect_language,
    lang_from_query,
};
use portfolio_i18n::render::{
    Binding,
    current_year,
    page_meta,
    render_binding,
};
use portfolio_i18n::resolver::{
    Origin,
    Params,
    lookup,
};
use portfolio_i18n::store::{
    JsonFileStore,
    preference,
};

#[derive(Parser)]
#[command(name = "portfolio-i18n", version, about = "Portfolio site translation tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory containing `.portfolio-i18n.json`.
    #[arg(short, long, global = true, default_value = ".")]
    config: PathBuf,

    /// Language to use instead of the detected one.
    #[arg(short, long, global = true)]
    lang: Option<String>,

    /// Page URL whose `lang` query parameter requests a language.
    #[arg(long, global = true)]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a dotted key.
    Resolve {
        key: String,
        /// Placeholder value as `name=value`; may be repeated.
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
        /// Also print which language supplied the value.
        #[arg(long)]
        explain: bool,
    },
    /// List translation keys of the current language.
    Keys {
        /// List keys the default language has and the current one lacks.
        #[arg(long)]
        missing: bool,
    },
    /// List languages in the translation document.
    Languages,
    /// Render one element's content.
    Render {
        key: String,
        /// JSON object of placeholder values.
        #[arg(long)]
        params: Option<String>,
        /// Render `**bold**` and the year span as HTML.
        #[arg(long)]
        html: bool,
    },
    /// Print page title, description, language and direction as JSON.
    Meta,
    /// Save the preferred language.
    SetLanguage { language: String },
    /// Write all stored content to a backup file.
    Export {
        #[arg(short, long, default_value = "site-data-export.json")]
        output: PathBuf,
    },
    /// Restore stored content from a backup file.
    Import { file: PathBuf },
    /// Save one admin section from a JSON file and merge it into the translations.
    SaveSection {
        #[arg(value_parser = parse_section)]
        section: Section,
        file: PathBuf,
    },
    /// Record the edited text of one page element.
    Edit { key: String, text: String },
    /// Write recorded page edits to a JSON file.
    ExportEdits {
        /// Page the edits belong to.
        #[arg(long, default_value = "/")]
        page: String,
        /// Defaults to `page-edits-<unix millis>.json`.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Parses a backup section name such as `hero`.
fn parse_section(raw: &str) -> Result<Section, String> {
    Section::from_name(raw).ok_or_else(|| {
        format!("unknown section '{raw}', expected hero, about, contact or translations")
    })
}

/// Splits a `name=value` argument.
fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(writer)
        .init();

    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(cli.config.clone()))?;
    let settings = config_manager.get_settings().clone();

    let mut store = JsonFileStore::open(config_manager.store_path())
        .with_context(|| format!("opening store {}", config_manager.store_path().display()))?;

    let mut out = std::io::stdout().lock();

    // Content commands never touch the translation document.
    match &cli.command {
        Commands::Export { output } => {
            let backup = content::export(&store)?;
            std::fs::write(output, backup.to_json_pretty()?)
                .with_context(|| format!("writing {}", output.display()))?;
            writeln!(out, "Exported content to {}", output.display())?;
            return Ok(());
        }
        Commands::Import { file } => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("reading {}", file.display()))?;
            let imported = content::import(&mut store, &text)?;
            let names: Vec<&str> = imported.iter().map(|section| section.name()).collect();
            writeln!(out, "Imported: {}", names.join(", "))?;
            return Ok(());
        }
        Commands::SaveSection { section, file } => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("reading {}", file.display()))?;
            let data: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", file.display()))?;
            content::save_section(&mut store, *section, &data)?;
            writeln!(out, "Saved {section} section")?;
            return Ok(());
        }
        Commands::Edit { key, text } => {
            content::record_edit(&mut store, key, text)?;
            return Ok(());
        }
        Commands::ExportEdits { page, output } => {
            let now = chrono::Utc::now();
            let export = content::export_edits(&store, page, now)?;
            let output =
                output.clone().unwrap_or_else(|| PathBuf::from(content::export_file_name(now)));
            std::fs::write(&output, export.to_json_pretty()?)
                .with_context(|| format!("writing {}", output.display()))?;
            writeln!(out, "Exported {} edits to {}", export.edits.len(), output.display())?;
            return Ok(());
        }
        _ => {}
    }

    let language = cli.lang.clone().unwrap_or_else(|| {
        let stored = preference::load(&store, &settings.preference_key);
        let system = sys_locale::get_locale();
        detect_language(
            &LanguageSources {
                stored: stored.as_deref(),
                requested: cli.url.as_deref().and_then(lang_from_query),
                system: system.as_deref(),
            },
            &settings,
        )
    });

    let translations_path = config_manager.translations_path();
    let mut i18n = I18n::load(&translations_path, &settings.default_language, &settings)
        .await
        .with_context(|| format!("loading translations {}", translations_path.display()))?;
    if let Err(e) = i18n.set_language(&language) {
        tracing::warn!("{e}; using '{}'", i18n.current_language());
    }

    match cli.command {
        Commands::Resolve { key, params, explain } => {
            let params: Params = params.into_iter().collect();
            writeln!(out, "{}", i18n.t(&key, &params))?;

            if explain {
                let (current, default) = (i18n.current_language(), i18n.default_language());
                let origin = lookup(i18n.document(), current, default, &key).map(|resolved| {
                    match resolved.origin {
                        Origin::Active => format!("from '{current}'"),
                        Origin::Fallback => format!("from fallback '{default}'"),
                    }
                });
                writeln!(out, "  ({})", origin.as_deref().unwrap_or("not found"))?;
            }
        }
        Commands::Keys { missing } => {
            let keys: Vec<String> = if missing {
                missing_keys(i18n.document(), i18n.current_language(), i18n.default_language())
            } else {
                i18n.document()
                    .language(i18n.current_language())
                    .map(|tree| flatten_keys(tree).into_keys().collect())
                    .unwrap_or_default()
            };
            for key in keys {
                writeln!(out, "{key}")?;
            }
        }
        Commands::Languages => {
            for info in i18n.available_languages() {
                let marker = if info.code == i18n.current_language() { "*" } else { " " };
                writeln!(out, "{marker} {}\t{}", info.code, info.name)?;
            }
        }
        Commands::Render { key, params, html } => {
            let binding = Binding { key, params, html };
            writeln!(out, "{}", render_binding(&i18n, &binding, current_year()))?;
        }
        Commands::Meta => {
            let meta = page_meta(&i18n, &settings);
            writeln!(out, "{}", serde_json::to_string_pretty(&meta)?)?;
        }
        Commands::SetLanguage { language } => {
            i18n.set_language(&language)?;
            preference::save(&mut store, &settings.preference_key, &language)?;
            writeln!(out, "Preferred language set to {language}")?;
        }
        Commands::Export { .. }
        | Commands::Import { .. }
        | Commands::SaveSection { .. }
        | Commands::Edit { .. }
        | Commands::ExportEdits { .. } => {}
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(&["portfolio-i18n", "--config", "site", "resolve", "hero.title"])]
    #[case(&["portfolio-i18n", "resolve", "hero.title", "--config", "site"])]
    fn config_accepted_before_or_after_subcommand(#[case] args: &[&str]) {
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.config, PathBuf::from("site"));
        assert!(matches!(cli.command, Commands::Resolve { ref key, .. } if key == "hero.title"));
    }

    #[rstest]
    fn url_feeds_language_request() {
        let cli = Cli::try_parse_from([
            "portfolio-i18n",
            "meta",
            "--url",
            "https://jane.dev/index.html?lang=tr",
        ])
        .unwrap();

        assert_eq!(cli.url.as_deref().and_then(lang_from_query), Some("tr"));
    }

    #[rstest]
    #[case("contact", true)]
    #[case("footer", false)]
    fn save_section_argument(#[case] section: &str, #[case] accepted: bool) {
        let result =
            Cli::try_parse_from(["portfolio-i18n", "save-section", section, "contact.json"]);

        assert_eq!(result.is_ok(), accepted);
    }
}
