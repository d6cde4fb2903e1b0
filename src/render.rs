//! Page text rendering.
//!
//! Mirrors what the site does for each element carrying a translation key:
//! optional JSON params, an HTML flag allowing `**bold**`, and the footer's
//! `{year}` placeholder.

use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;
use serde::Serialize;

use crate::config::I18nSettings;
use crate::context::I18n;
use crate::resolver::Params;

/// Key whose text always receives the current year.
pub const FOOTER_KEY: &str = "footer.text";

#[allow(clippy::expect_used)]
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));

/// A translatable element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
    pub key: String,
    /// Raw JSON object of placeholder values
    pub params: Option<String>,
    /// Render as HTML markup instead of plain text
    pub html: bool,
}

impl Binding {
    #[must_use]
    pub fn text(key: impl Into<String>) -> Self {
        Self { key: key.into(), ..Self::default() }
    }

    #[must_use]
    pub fn html(key: impl Into<String>) -> Self {
        Self { key: key.into(), html: true, ..Self::default() }
    }

    #[must_use]
    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = Some(params.into());
        self
    }
}

/// Document-level values refreshed on every language change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub lang: String,
    pub dir: &'static str,
}

/// Current calendar year in local time.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Parses a binding's params attribute.
///
/// Invalid JSON, or JSON that is not an object, yields no params.
#[must_use]
pub fn parse_params(raw: Option<&str>) -> Params {
    let Some(raw) = raw.filter(|text| !text.trim().is_empty()) else {
        return Params::new();
    };

    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => Params::from(map),
        _ => {
            tracing::warn!("Invalid translation params: {}", raw);
            Params::new()
        }
    }
}

/// Produces the content for one binding.
#[must_use]
pub fn render_binding(i18n: &I18n, binding: &Binding, year: i32) -> String {
    let mut params = parse_params(binding.params.as_deref());
    if binding.key == FOOTER_KEY && !params.contains("year") {
        params.insert("year", year);
    }

    let translation = i18n.t(&binding.key, &params);

    if binding.html {
        render_markup(&translation, year)
    } else {
        translation.replace("{year}", &year.to_string())
    }
}

/// Minimal markup: `**bold**` and the first `{year}` as a span.
#[must_use]
pub fn render_markup(text: &str, year: i32) -> String {
    let html = BOLD.replace_all(text, "<strong>$1</strong>");
    html.replacen("{year}", &format!(r#"<span id="year">{year}</span>"#), 1)
}

/// Title, description, language and direction for the current language.
#[must_use]
pub fn page_meta(i18n: &I18n, settings: &I18nSettings) -> PageMeta {
    let params = Params::new();
    PageMeta {
        title: format!("{} - {}", i18n.t("hero.title", &params), settings.site_name),
        description: i18n.t("hero.description", &params),
        lang: i18n.current_language().to_string(),
        dir: i18n.direction().as_str(),
    }
}
