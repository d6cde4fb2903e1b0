//! `{name}` placeholder substitution.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde_json::Value;

/// Named values substituted into `{name}` placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    /// Placeholder name → rendered value
    values: BTreeMap<String, String>,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        self.values.insert(name.into(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Strings are used as-is; other JSON values are rendered as JSON text.
impl From<serde_json::Map<String, Value>> for Params {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter()
            .map(|(name, value)| match value {
                Value::String(text) => (name, text),
                other => (name, other.to_string()),
            })
            .collect()
    }
}

/// Replaces every `{name}` whose name is in `params`.
///
/// The template is scanned once from left to right, so substituted values are
/// never scanned again. Braces that do not form a known placeholder are kept
/// verbatim.
#[must_use]
pub fn interpolate(template: &str, params: &Params) -> String {
    if params.is_empty() {
        return template.to_string();
    }

    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some((before, after_brace)) = rest.split_once('{') {
        output.push_str(before);

        let replaced = after_brace.find(['{', '}']).and_then(|end| {
            let (name, tail) = after_brace.split_at(end);
            let tail = tail.strip_prefix('}')?;
            params.get(name).map(|value| (value, tail))
        });

        if let Some((value, tail)) = replaced {
            output.push_str(value);
            rest = tail;
        } else {
            output.push('{');
            rest = after_brace;
        }
    }

    output.push_str(rest);
    output
}
