//! Language detection, display names and text direction.

/// Initial language selection
mod detect;
/// Native language names
mod names;

pub use detect::{
    LanguageSources,
    detect_language,
    lang_from_query,
    primary_subtag,
};
pub use names::native_name;
use serde::Serialize;

/// Writing direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Direction of `code` given the configured right-to-left languages.
    #[must_use]
    pub fn of(code: &str, rtl_languages: &[String]) -> Self {
        if rtl_languages.iter().any(|rtl| rtl == code) { Self::Rtl } else { Self::Ltr }
    }

    /// Value for an HTML `dir` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

/// A language offered by the translation document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageInfo {
    pub code: String,
    pub name: String,
}

impl LanguageInfo {
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self { code: code.to_string(), name: native_name(code).to_string() }
    }
}
