//! Initial language selection.

use crate::config::I18nSettings;

/// Where a visitor's language can come from, in priority order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageSources<'a> {
    /// Previously saved preference
    pub stored: Option<&'a str>,
    /// Explicit request (`?lang=` parameter or `--lang`)
    pub requested: Option<&'a str>,
    /// System or browser locale such as `de-AT` or `en_US.UTF-8`
    pub system: Option<&'a str>,
}

/// Picks the language to display.
///
/// Stored and requested languages are used as given. The system locale only
/// counts when its primary subtag is a supported language. Otherwise the
/// default language is used.
#[must_use]
pub fn detect_language(sources: &LanguageSources<'_>, settings: &I18nSettings) -> String {
    if let Some(stored) = sources.stored.filter(|lang| !lang.is_empty()) {
        tracing::debug!("Using stored language preference: {}", stored);
        return stored.to_string();
    }

    if let Some(requested) = sources.requested.filter(|lang| !lang.is_empty()) {
        tracing::debug!("Using requested language: {}", requested);
        return requested.to_string();
    }

    if let Some(primary) = sources.system.and_then(primary_subtag)
        && settings.supported_languages.iter().any(|lang| *lang == primary)
    {
        tracing::debug!("Using system language: {}", primary);
        return primary;
    }

    settings.default_language.clone()
}

/// Lowercased language part of a locale tag (`pt-BR` → `pt`).
#[must_use]
pub fn primary_subtag(locale: &str) -> Option<String> {
    locale
        .split(['-', '_', '.', '@'])
        .next()
        .filter(|subtag| !subtag.is_empty())
        .map(str::to_ascii_lowercase)
}

/// Value of the `lang` parameter in a page URL.
///
/// Accepts a full URL or just its query, with or without the leading `?`.
/// Later occurrences do not override the first one.
#[must_use]
pub fn lang_from_query(url: &str) -> Option<&str> {
    let query = url.split_once('?').map_or(url, |(_, query)| query);
    let query = query.split_once('#').map_or(query, |(query, _)| query);

    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(name, value)| (name == "lang" && !value.is_empty()).then_some(value))
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[fixture]
    fn settings() -> I18nSettings {
        I18nSettings::default()
    }

    #[rstest]
    #[case(Some("fr"), Some("de"), Some("ja-JP"), "fr")]
    #[case(None, Some("de"), Some("ja-JP"), "de")]
    #[case(None, None, Some("ja-JP"), "ja")]
    #[case(None, None, Some("pt_BR.UTF-8"), "pt")]
    #[case(None, None, Some("EN-gb"), "en")]
    #[case(None, None, Some("xx-YY"), "en")]
    #[case(None, None, None, "en")]
    #[case(Some(""), None, Some("tr-TR"), "tr")]
    // Stored and requested values are not checked against the supported list.
    #[case(Some("xx"), None, Some("tr-TR"), "xx")]
    #[case(None, Some("eo"), None, "eo")]
    fn detect_language_priority(
        settings: I18nSettings,
        #[case] stored: Option<&str>,
        #[case] requested: Option<&str>,
        #[case] system: Option<&str>,
        #[case] expected: &str,
    ) {
        let sources = LanguageSources { stored, requested, system };

        assert_that!(detect_language(&sources, &settings), eq(expected));
    }

    #[rstest]
    fn detect_language_uses_configured_default() {
        let settings =
            I18nSettings { default_language: "tr".to_string(), ..I18nSettings::default() };

        let sources = LanguageSources { system: Some("xx"), ..LanguageSources::default() };

        assert_that!(detect_language(&sources, &settings), eq("tr"));
    }

    #[rstest]
    #[case("?lang=tr", Some("tr"))]
    #[case("lang=de&edit=true", Some("de"))]
    #[case("?edit=true&lang=ja&lang=ko", Some("ja"))]
    #[case("?language=tr", None)]
    #[case("?lang=", None)]
    #[case("", None)]
    #[case("https://jane.dev/index.html?lang=tr#about", Some("tr"))]
    #[case("/admin.html?edit=true", None)]
    #[case("/index.html#lang=tr", None)]
    fn lang_from_query_cases(#[case] query: &str, #[case] expected: Option<&str>) {
        assert_that!(lang_from_query(query), eq(expected));
    }
}
