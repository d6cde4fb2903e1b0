//! Translation key resolution.
//!
//! A key path such as `services.2.name` is walked through the active
//! language's tree and the default language's tree side by side. Once the
//! active walk breaks, the default tree supplies the value for the rest of the
//! path; the active tree is not consulted again. Failure is never an error:
//! the key path itself is returned so missing translations stay visible.

/// `{name}` placeholder substitution
mod placeholder;
/// Key path segments
mod segment;

pub use placeholder::{
    Params,
    interpolate,
};
pub use segment::{
    Segment,
    split_key_path,
};

use crate::input::translation::{
    LanguageTree,
    TranslationDocument,
};

/// Which language tree supplied a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Active,
    Fallback,
}

/// A node found by [`lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'doc> {
    pub node: &'doc LanguageTree,
    pub origin: Origin,
}

/// Walks `key_path` through the active and default trees.
///
/// Returns `None` when neither walk reaches the end of the path.
#[must_use]
pub fn lookup<'doc>(
    document: &'doc TranslationDocument,
    active_lang: &str,
    default_lang: &str,
    key_path: &str,
) -> Option<Resolved<'doc>> {
    let mut active = document.language(active_lang);
    let mut fallback = document.language(default_lang);

    for segment in split_key_path(key_path) {
        active = active.and_then(|node| node.child(&segment));
        fallback = fallback.and_then(|node| node.child(&segment));

        if active.is_none() && fallback.is_none() {
            tracing::trace!(
                key = key_path,
                segment = segment.as_str(),
                "translation path broken in both trees"
            );
            return None;
        }
    }

    match (active, fallback) {
        (Some(node), _) => Some(Resolved { node, origin: Origin::Active }),
        (None, Some(node)) => Some(Resolved { node, origin: Origin::Fallback }),
        (None, None) => None,
    }
}

/// Resolves `key_path` to display text.
///
/// Returns `key_path` unchanged when the key cannot be found in either
/// language, when it ends on a list or map, or when the text is empty.
///
/// # Examples
/// ```
/// use portfolio_i18n::input::translation::TranslationDocument;
/// use portfolio_i18n::resolver::{Params, resolve};
///
/// let document = TranslationDocument::from_json_str(
///     r#"{"en": {"hero": {"title": "Hi {name}"}}, "tr": {}}"#,
/// ).unwrap();
///
/// let params = Params::new().with("name", "Ada");
/// assert_eq!(resolve(&document, "tr", "en", "hero.title", &params), "Hi Ada");
/// assert_eq!(resolve(&document, "tr", "en", "hero.missing", &params), "hero.missing");
/// ```
#[must_use]
pub fn resolve(
    document: &TranslationDocument,
    active_lang: &str,
    default_lang: &str,
    key_path: &str,
    params: &Params,
) -> String {
    let Some(resolved) = lookup(document, active_lang, default_lang, key_path) else {
        return key_path.to_string();
    };

    let Some(text) = resolved.node.as_leaf() else {
        tracing::debug!(
            key = key_path,
            kind = resolved.node.kind(),
            "translation key does not point at text"
        );
        return key_path.to_string();
    };

    if resolved.origin == Origin::Fallback {
        tracing::trace!(key = key_path, language = default_lang, "using fallback translation");
    }

    let rendered = interpolate(text, params);
    if rendered.is_empty() { key_path.to_string() } else { rendered }
}
