//! Translation document input definitions

use std::collections::BTreeMap;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
    Serializer,
};
use serde_json::Value;
use thiserror::Error;

use crate::resolver::Segment;

/// Errors raised while loading a translation document.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read translation file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse translation JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Translation document must be a JSON object keyed by language code, found {found}")]
    NotAnObject { found: &'static str },
}

/// A node of a language's translation tree.
///
/// Non-string JSON scalars are kept as leaves holding their JSON text, and
/// `null` becomes an empty leaf.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub enum LanguageTree {
    Leaf(String),
    List(Vec<LanguageTree>),
    Map(BTreeMap<String, LanguageTree>),
}

impl LanguageTree {
    /// Steps into the child addressed by `segment`.
    ///
    /// Lists only accept numeric segments. Maps look the segment up by its
    /// text, so `"0"` against a map is a plain key lookup.
    #[must_use]
    pub fn child(&self, segment: &Segment<'_>) -> Option<&Self> {
        match self {
            Self::List(items) => segment.index().and_then(|index| items.get(index)),
            Self::Map(entries) => entries.get(segment.as_str()),
            Self::Leaf(_) => None,
        }
    }

    /// Returns the text of a leaf node.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(text) => Some(text),
            Self::List(_) | Self::Map(_) => None,
        }
    }

    /// Short description of the node kind, for logs and diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Leaf(_) => "leaf",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl From<Value> for LanguageTree {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Leaf(text),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(entries) => Self::Map(
                entries.into_iter().map(|(key, value)| (key, Self::from(value))).collect(),
            ),
            Value::Null => Self::Leaf(String::new()),
            scalar @ (Value::Bool(_) | Value::Number(_)) => Self::Leaf(scalar.to_string()),
        }
    }
}

impl Serialize for LanguageTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(text) => serializer.serialize_str(text),
            Self::List(items) => items.serialize(serializer),
            Self::Map(entries) => entries.serialize(serializer),
        }
    }
}

/// Language code → translation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TranslationDocument {
    /// Trees keyed by language code
    languages: BTreeMap<String, LanguageTree>,
}

impl TranslationDocument {
    /// Builds a document from already-parsed language trees.
    #[must_use]
    pub const fn new(languages: BTreeMap<String, LanguageTree>) -> Self {
        Self { languages }
    }

    /// Parses a document from JSON text.
    ///
    /// # Errors
    /// - JSON parse error
    /// - The top level is not an object
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Converts an already-parsed JSON value into a document.
    ///
    /// # Errors
    /// Returns [`LoadError::NotAnObject`] when the top level is not an object.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        let Value::Object(entries) = value else {
            return Err(LoadError::NotAnObject { found: json_kind(&value) });
        };

        let languages =
            entries.into_iter().map(|(code, tree)| (code, LanguageTree::from(tree))).collect();
        Ok(Self { languages })
    }

    /// Reads and parses a translation file.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - The top level is not an object
    pub async fn load(path: &Path) -> Result<Self, LoadError> {
        tracing::debug!("Loading translations from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await?;
        let document = Self::from_json_str(&content)?;

        tracing::debug!(
            "Loaded {} language(s) from {:?}: {:?}",
            document.languages.len(),
            path,
            document.languages().collect::<Vec<_>>()
        );
        Ok(document)
    }

    /// Tree for the given language code.
    #[must_use]
    pub fn language(&self, code: &str) -> Option<&LanguageTree> {
        self.languages.get(code)
    }

    /// Whether the document has a tree for `code`.
    #[must_use]
    pub fn contains_language(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// Language codes in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Flatten a language tree into a dotted key → leaf text map.
///
/// List elements use their index as a segment, so the keys produced here can
/// be passed straight back to the resolver.
///
/// # Examples
/// ```
/// use portfolio_i18n::input::translation::{LanguageTree, flatten_keys};
/// use serde_json::json;
///
/// let tree = LanguageTree::from(json!({
///     "hero": { "title": "Hello" },
///     "services": [{ "name": "Web" }]
/// }));
///
/// let flattened = flatten_keys(&tree);
/// assert_eq!(flattened.get("hero.title"), Some(&"Hello".to_string()));
/// assert_eq!(flattened.get("services.0.name"), Some(&"Web".to_string()));
/// ```
#[must_use]
pub fn flatten_keys(tree: &LanguageTree) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();
    flatten_node(tree, None, &mut result);
    result
}

fn flatten_node(tree: &LanguageTree, prefix: Option<&str>, result: &mut BTreeMap<String, String>) {
    match tree {
        LanguageTree::Map(entries) => {
            for (key, child) in entries {
                let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
                flatten_node(child, Some(&full_key), result);
            }
        }
        LanguageTree::List(items) => {
            for (index, child) in items.iter().enumerate() {
                let full_key = prefix.map_or_else(|| index.to_string(), |p| format!("{p}.{index}"));
                flatten_node(child, Some(&full_key), result);
            }
        }
        LanguageTree::Leaf(text) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), text.clone());
            }
        }
    }
}

/// Keys the default language defines that `language` does not.
///
/// A key counts as missing when its path cannot be walked in the `language`
/// tree or ends on something other than a non-empty leaf. When `language` is
/// absent from the document every default key is reported.
#[must_use]
pub fn missing_keys(document: &TranslationDocument, language: &str, default: &str) -> Vec<String> {
    let Some(default_tree) = document.language(default) else {
        tracing::warn!("Default language '{}' is not present in the document", default);
        return Vec::new();
    };
    let target = document.language(language);

    flatten_keys(default_tree)
        .into_keys()
        .filter(|key| {
            let found = target.and_then(|tree| {
                key.split('.').map(Segment::parse).try_fold(tree, |node, seg| node.child(&seg))
            });
            !found.and_then(LanguageTree::as_leaf).is_some_and(|text| !text.is_empty())
        })
        .collect()
}
