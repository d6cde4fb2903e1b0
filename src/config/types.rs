use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Languages the site offers when the visitor's system language matches.
pub const DEFAULT_SUPPORTED_LANGUAGES: &[&str] = &[
    "tr", "en", "de", "fr", "es", "it", "pt", "ru", "ja", "zh", "ko", "ar", "nl", "sv", "no", "da",
    "fi", "pl", "cs", "hu", "ro", "bg", "el", "hr", "sr", "sk", "sl", "uk", "et", "lv", "lt", "he",
    "th", "vi", "hi", "id", "ms", "tl",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "supportedLanguages[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Translation document, relative to the configuration directory.
    pub translations_path: PathBuf,

    /// Complete language every other language falls back to.
    pub default_language: String,

    /// Languages picked up from the system locale.
    /// Stored preferences and explicit requests bypass this list.
    pub supported_languages: Vec<String>,

    pub rtl_languages: Vec<String>,

    /// Key-value store file used for preferences and content backups.
    pub store_path: PathBuf,

    /// Store key holding the visitor's chosen language.
    pub preference_key: String,

    /// Appended to the page title.
    pub site_name: String,
}

impl I18nSettings {
    /// # Errors
    /// - Required field is empty
    /// - Default language not in the supported list
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.translations_path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "translationsPath",
                "The path cannot be empty. Example: \"translations.json\"",
            ));
        }

        if self.default_language.is_empty() {
            errors.push(ValidationError::new(
                "defaultLanguage",
                "The language cannot be empty. Example: \"en\"",
            ));
        } else if !self.supported_languages.is_empty()
            && !self.supported_languages.contains(&self.default_language)
        {
            errors.push(ValidationError::new(
                "defaultLanguage",
                format!(
                    "'{}' is not listed in supportedLanguages. Add it or pick another default",
                    self.default_language
                ),
            ));
        }

        for (index, code) in self.supported_languages.iter().enumerate() {
            if let Some(message) = language_code_problem(code) {
                errors.push(ValidationError::new(format!("supportedLanguages[{index}]"), message));
            }
        }

        for (index, code) in self.rtl_languages.iter().enumerate() {
            if let Some(message) = language_code_problem(code) {
                errors.push(ValidationError::new(format!("rtlLanguages[{index}]"), message));
            }
        }

        if self.store_path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "storePath",
                "The path cannot be empty. Example: \".portfolio-store.json\"",
            ));
        }

        if self.preference_key.is_empty() {
            errors.push(ValidationError::new(
                "preferenceKey",
                "The key cannot be empty. Example: \"preferred-language\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Language codes are used as key path roots, so they may not contain `.`.
fn language_code_problem(code: &str) -> Option<String> {
    if code.is_empty() {
        Some("The language code cannot be empty".to_string())
    } else if code.contains('.') || code.chars().any(char::is_whitespace) {
        Some(format!("Invalid language code '{code}': dots and whitespace are not allowed"))
    } else {
        None
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            translations_path: PathBuf::from("translations.json"),
            default_language: "en".to_string(),
            supported_languages: DEFAULT_SUPPORTED_LANGUAGES
                .iter()
                .map(|code| (*code).to_string())
                .collect(),
            rtl_languages: vec!["ar".to_string(), "he".to_string()],
            store_path: PathBuf::from(".portfolio-store.json"),
            preference_key: "preferred-language".to_string(),
            site_name: "Portfolio".to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = I18nSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn default_supports_all_site_languages() {
        let settings = I18nSettings::default();

        assert_that!(settings.supported_languages, len(eq(38)));
        assert_that!(settings.rtl_languages, elements_are![eq("ar"), eq("he")]);
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"defaultLanguage": "tr", "siteName": "Ada Lovelace"}"#;

        let settings: I18nSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.default_language, eq("tr"));
        assert_that!(settings.site_name, eq("Ada Lovelace"));
        assert_that!(settings.preference_key, eq("preferred-language"));
        assert_eq!(settings.translations_path, PathBuf::from("translations.json"));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: I18nSettings = serde_json::from_str("{}").unwrap();

        assert_eq!(settings, I18nSettings::default());
    }

    #[rstest]
    fn validate_default_language_empty() {
        let settings = I18nSettings { default_language: String::new(), ..I18nSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("defaultLanguage")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_default_language_unsupported() {
        let settings = I18nSettings {
            default_language: "xx".to_string(),
            ..I18nSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("defaultLanguage")),
                field!(ValidationError.message, contains_substring("'xx' is not listed"))
            ]])
        );
    }

    #[rstest]
    fn validate_default_language_with_empty_supported_list() {
        let settings = I18nSettings {
            default_language: "xx".to_string(),
            supported_languages: vec![],
            ..I18nSettings::default()
        };

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    #[case("")]
    #[case("en.US")]
    #[case("en US")]
    fn validate_invalid_rtl_code(#[case] code: &str) {
        let settings =
            I18nSettings { rtl_languages: vec![code.to_string()], ..I18nSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(ValidationError.field_path, eq("rtlLanguages[0]"))])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = I18nSettings {
            translations_path: PathBuf::new(),
            preference_key: String::new(),
            ..I18nSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let error_message = format!("{}", ConfigError::ValidationErrors(errors));

        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. translationsPath"));
        assert_that!(error_message, contains_substring("2. preferenceKey"));
        assert_that!(error_message, contains_substring("cannot be empty"));
    }
}
