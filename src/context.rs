//! Translation context shared with rendering code.

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use thiserror::Error;

use crate::config::I18nSettings;
use crate::input::translation::{
    LoadError,
    TranslationDocument,
};
use crate::locale::{
    LanguageInfo,
    TextDirection,
};
use crate::resolver::{
    Params,
    resolve,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("Language '{0}' is not available in the translation document")]
    UnknownLanguage(String),
}

/// Loaded translations plus the active and default language.
///
/// The document sits behind an [`Arc`] so clones share it; it is only ever
/// replaced whole.
#[derive(Debug, Clone)]
pub struct I18n {
    /// Current translation document
    document: Arc<TranslationDocument>,
    /// Where the document was loaded from, if anywhere
    source: Option<PathBuf>,
    /// Language used for lookups
    current_language: String,
    /// Language consulted when the current one lacks a key
    default_language: String,
    /// Languages written right to left
    rtl_languages: Vec<String>,
}

impl I18n {
    #[must_use]
    pub fn new(
        document: TranslationDocument,
        current_language: &str,
        settings: &I18nSettings,
    ) -> Self {
        if !document.contains_language(&settings.default_language) {
            tracing::warn!(
                "Default language '{}' is missing from the translation document; \
                 lookups fall back to nothing",
                settings.default_language
            );
        }

        Self {
            document: Arc::new(document),
            source: None,
            current_language: current_language.to_string(),
            default_language: settings.default_language.clone(),
            rtl_languages: settings.rtl_languages.clone(),
        }
    }

    /// Loads the document at `path` and builds a context around it.
    ///
    /// # Errors
    /// Document read or parse failure
    pub async fn load(
        path: &Path,
        current_language: &str,
        settings: &I18nSettings,
    ) -> Result<Self, LoadError> {
        let document = TranslationDocument::load(path).await?;
        let mut context = Self::new(document, current_language, settings);
        context.source = Some(path.to_path_buf());
        Ok(context)
    }

    /// Translates `key` in the current language.
    #[must_use]
    pub fn t(&self, key: &str, params: &Params) -> String {
        resolve(&self.document, &self.current_language, &self.default_language, key, params)
    }

    /// Switches the current language.
    ///
    /// # Errors
    /// The document has no tree for `language`; the current language is kept.
    pub fn set_language(&mut self, language: &str) -> Result<(), ContextError> {
        if !self.document.contains_language(language) {
            return Err(ContextError::UnknownLanguage(language.to_string()));
        }

        tracing::debug!("Switching language: {} -> {}", self.current_language, language);
        self.current_language = language.to_string();
        Ok(())
    }

    /// Swaps in a freshly loaded document.
    pub fn replace_document(&mut self, document: TranslationDocument) {
        if !document.contains_language(&self.current_language) {
            tracing::warn!(
                "Current language '{}' is missing from the new document",
                self.current_language
            );
        }
        self.document = Arc::new(document);
    }

    /// Re-reads the document from the path it was loaded from.
    ///
    /// Contexts built with [`I18n::new`] have no source and keep their
    /// document.
    ///
    /// # Errors
    /// Document read or parse failure; the previous document is kept.
    pub async fn reload(&mut self) -> Result<(), LoadError> {
        let Some(source) = &self.source else {
            tracing::debug!("No translation source to reload from");
            return Ok(());
        };

        let document = TranslationDocument::load(source).await?;
        self.replace_document(document);
        Ok(())
    }

    #[must_use]
    pub fn current_language(&self) -> &str {
        &self.current_language
    }

    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    #[must_use]
    pub fn document(&self) -> &TranslationDocument {
        &self.document
    }

    /// Languages present in the document, with native names.
    #[must_use]
    pub fn available_languages(&self) -> Vec<LanguageInfo> {
        self.document.languages().map(LanguageInfo::new).collect()
    }

    /// Text direction for the current language.
    #[must_use]
    pub fn direction(&self) -> TextDirection {
        TextDirection::of(&self.current_language, &self.rtl_languages)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;

    const SITE: &str = r#"{
        "en": {"hero": {"title": "Hi {name}", "description": "Portfolio"}},
        "tr": {"hero": {"title": "Merhaba {name}"}},
        "ar": {"hero": {"title": "مرحبا {name}"}}
    }"#;

    #[fixture]
    fn i18n() -> I18n {
        let document = TranslationDocument::from_json_str(SITE).unwrap();
        I18n::new(document, "tr", &I18nSettings::default())
    }

    #[rstest]
    fn t_uses_current_then_default(i18n: I18n) {
        let params = Params::new().with("name", "Ada");

        assert_that!(i18n.t("hero.title", &params), eq("Merhaba Ada"));
        assert_that!(i18n.t("hero.description", &params), eq("Portfolio"));
        assert_that!(i18n.t("hero.missing", &params), eq("hero.missing"));
    }

    #[rstest]
    fn set_language_known(mut i18n: I18n) {
        i18n.set_language("en").unwrap();

        assert_that!(i18n.current_language(), eq("en"));
        assert_that!(i18n.t("hero.title", &Params::new().with("name", "Ada")), eq("Hi Ada"));
    }

    #[rstest]
    fn set_language_unknown_keeps_current(mut i18n: I18n) {
        let result = i18n.set_language("de");

        assert_eq!(result, Err(ContextError::UnknownLanguage("de".to_string())));
        assert_that!(i18n.current_language(), eq("tr"));
    }

    #[rstest]
    fn direction_follows_language(mut i18n: I18n) {
        assert_that!(i18n.direction(), eq(TextDirection::Ltr));

        i18n.set_language("ar").unwrap();

        assert_that!(i18n.direction(), eq(TextDirection::Rtl));
    }

    #[rstest]
    fn available_languages_with_names(i18n: I18n) {
        let codes: Vec<(String, String)> =
            i18n.available_languages().into_iter().map(|info| (info.code, info.name)).collect();

        assert_eq!(
            codes,
            vec![
                ("ar".to_string(), "العربية".to_string()),
                ("en".to_string(), "English".to_string()),
                ("tr".to_string(), "Türkçe".to_string()),
            ]
        );
    }

    #[rstest]
    fn replace_document_is_visible_to_t(mut i18n: I18n) {
        let clone = i18n.clone();
        let document =
            TranslationDocument::from_json_str(r#"{"en": {}, "tr": {"hero": {"title": "Yeni"}}}"#)
                .unwrap();

        i18n.replace_document(document);

        assert_that!(i18n.t("hero.title", &Params::new()), eq("Yeni"));
        assert_that!(clone.t("hero.title", &Params::new()), eq("Merhaba {name}"));
    }

    #[tokio::test]
    async fn load_and_reload_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("translations.json");
        std::fs::write(&path, SITE).unwrap();

        let mut i18n = I18n::load(&path, "tr", &I18nSettings::default()).await.unwrap();
        assert_eq!(i18n.t("hero.description", &Params::new()), "Portfolio");

        std::fs::write(&path, r#"{"en": {"hero": {"description": "Updated"}}}"#).unwrap();
        i18n.reload().await.unwrap();

        assert_eq!(i18n.t("hero.description", &Params::new()), "Updated");
    }

    #[tokio::test]
    async fn reload_failure_keeps_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("translations.json");
        std::fs::write(&path, SITE).unwrap();

        let mut i18n = I18n::load(&path, "en", &I18nSettings::default()).await.unwrap();
        std::fs::write(&path, "{ broken").unwrap();

        assert!(i18n.reload().await.is_err());
        assert_eq!(i18n.t("hero.description", &Params::new()), "Portfolio");
    }

    #[tokio::test]
    async fn reload_without_source_is_noop() {
        let document = TranslationDocument::from_json_str(SITE).unwrap();
        let mut i18n = I18n::new(document, "tr", &I18nSettings::default());

        assert!(i18n.reload().await.is_ok());
        assert_eq!(i18n.current_language(), "tr");
    }
}
