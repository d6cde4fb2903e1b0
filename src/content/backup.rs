//! Export and import of admin-edited site content.

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

use crate::input::translation::{
    LoadError,
    TranslationDocument,
    json_kind,
};
use crate::store::{
    KeyValueStore,
    StoreError,
};

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Failed to parse backup file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Stored {section} content under '{key}' is not valid JSON: {source}")]
    CorruptSection { section: Section, key: &'static str, source: serde_json::Error },

    #[error("Backup translations are not a valid translation document: {0}")]
    Translations(#[from] LoadError),

    #[error("{section} content must be a JSON object, found {found}")]
    NotAnObject { section: Section, found: &'static str },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Editable content sections and the store keys holding them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    About,
    Contact,
    Translations,
}

impl Section {
    pub const ALL: [Self; 4] = [Self::Hero, Self::About, Self::Contact, Self::Translations];

    #[must_use]
    pub const fn store_key(self) -> &'static str {
        match self {
            Self::Hero => "heroData",
            Self::About => "aboutData",
            Self::Contact => "contactData",
            Self::Translations => "translationsData",
        }
    }

    /// Field name in the backup file.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Contact => "contact",
            Self::Translations => "translations",
        }
    }

    /// Inverse of [`Section::name`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.name() == name)
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The downloadable backup file.
///
/// Sections absent from an imported file stay `None` and are left untouched
/// in the store.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ContentBackup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations: Option<Value>,
}

impl ContentBackup {
    #[must_use]
    pub const fn section(&self, section: Section) -> Option<&Value> {
        match section {
            Section::Hero => self.hero.as_ref(),
            Section::About => self.about.as_ref(),
            Section::Contact => self.contact.as_ref(),
            Section::Translations => self.translations.as_ref(),
        }
    }

    const fn section_mut(&mut self, section: Section) -> &mut Option<Value> {
        match section {
            Section::Hero => &mut self.hero,
            Section::About => &mut self.about,
            Section::Contact => &mut self.contact,
            Section::Translations => &mut self.translations,
        }
    }

    /// Pretty JSON with two-space indentation.
    ///
    /// # Errors
    /// Serialization failure
    pub fn to_json_pretty(&self) -> Result<String, BackupError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a backup file.
    ///
    /// # Errors
    /// Invalid JSON or a non-object top level
    pub fn from_json_str(text: &str) -> Result<Self, BackupError> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(BackupError::Parse(serde::de::Error::custom(
                "backup file must contain a JSON object",
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The translations section as a document. An empty object is `None`.
    ///
    /// # Errors
    /// The section is not a JSON object
    pub fn translation_document(&self) -> Result<Option<TranslationDocument>, BackupError> {
        match &self.translations {
            None => Ok(None),
            Some(Value::Object(map)) if map.is_empty() => Ok(None),
            Some(value) => Ok(Some(TranslationDocument::from_value(value.clone())?)),
        }
    }
}

/// Contact fields shared by every language's contact translations.
const SHARED_CONTACT_FIELDS: [&str; 3] = ["email", "linkedin", "github"];

/// Reads a stored section. A missing or blank value is an empty object.
fn stored_section(store: &dyn KeyValueStore, section: Section) -> Result<Value, BackupError> {
    let key = section.store_key();
    match store.get(key) {
        Some(text) if !text.trim().is_empty() => serde_json::from_str(&text)
            .map_err(|source| BackupError::CorruptSection { section, key, source }),
        _ => Ok(Value::Object(Map::new())),
    }
}

/// Puts previous values back after a failed write.
fn restore(store: &mut dyn KeyValueStore, previous: &[(Section, Option<String>)]) {
    for (section, value) in previous {
        let result = match value {
            Some(text) => store.set(section.store_key(), text),
            None => store.remove(section.store_key()),
        };
        if let Err(e) = result {
            tracing::warn!("Failed to restore {} after a failed write: {}", section, e);
        }
    }
}

/// Writes `entries` in order. When one write fails the earlier ones are
/// rolled back.
fn write_all(
    store: &mut dyn KeyValueStore,
    entries: &[(Section, String)],
) -> Result<(), BackupError> {
    let previous: Vec<(Section, Option<String>)> =
        entries.iter().map(|(section, _)| (*section, store.get(section.store_key()))).collect();

    for (written, (section, text)) in entries.iter().enumerate() {
        if let Err(e) = store.set(section.store_key(), text) {
            restore(store, previous.get(..written).unwrap_or_default());
            return Err(e.into());
        }
    }
    Ok(())
}

/// Collects every section from the store. Missing or blank sections export
/// as `{}`.
///
/// # Errors
/// A stored section is not valid JSON
pub fn export(store: &dyn KeyValueStore) -> Result<ContentBackup, BackupError> {
    let mut backup = ContentBackup::default();

    for section in Section::ALL {
        *backup.section_mut(section) = Some(stored_section(store, section)?);
    }

    tracing::debug!("Exported content backup");
    Ok(backup)
}

/// Writes each section present in `text` to the store.
///
/// Either every present section is written or, on a store failure, the
/// sections written so far are restored to their previous values.
///
/// # Errors
/// - Invalid backup JSON
/// - Store write failure
pub fn import(store: &mut dyn KeyValueStore, text: &str) -> Result<Vec<Section>, BackupError> {
    let backup = ContentBackup::from_json_str(text)?;

    let entries: Vec<(Section, String)> = Section::ALL
        .into_iter()
        .filter_map(|section| backup.section(section).map(|value| (section, value.to_string())))
        .collect();
    write_all(store, &entries)?;

    let imported: Vec<Section> = entries.into_iter().map(|(section, _)| section).collect();
    tracing::debug!("Imported sections: {:?}", imported);
    Ok(imported)
}

/// Saves an edited section and merges its per-language text into the stored
/// translations.
///
/// `data` holds one object per language code (`{"en": {...}, "tr": {...}}`)
/// next to language-independent fields such as images. Each language object
/// replaces `translations.<lang>.<section>`, creating the language when it is
/// missing. Contact's `email`, `linkedin` and `github` are copied into every
/// language. Saving [`Section::Translations`] replaces the whole document.
///
/// # Errors
/// - `data` is not an object
/// - Stored translations are not valid JSON or not an object
/// - Store write failure
pub fn save_section(
    store: &mut dyn KeyValueStore,
    section: Section,
    data: &Value,
) -> Result<(), BackupError> {
    let Value::Object(fields) = data else {
        return Err(BackupError::NotAnObject { section, found: json_kind(data) });
    };

    if section == Section::Translations {
        TranslationDocument::from_value(data.clone())?;
        return write_all(store, &[(section, data.to_string())]);
    }

    let mut translations = match stored_section(store, Section::Translations)? {
        Value::Object(map) => map,
        other => return Err(LoadError::NotAnObject { found: json_kind(&other) }.into()),
    };

    for (language, text) in fields {
        let Value::Object(text) = text else {
            continue;
        };
        let mut text = text.clone();
        if section == Section::Contact {
            for field in SHARED_CONTACT_FIELDS {
                if let Some(value) = fields.get(field) {
                    text.insert(field.to_string(), value.clone());
                }
            }
        }

        let root = translations
            .entry(language.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !root.is_object() {
            tracing::warn!("Replacing non-object translations for '{}'", language);
            *root = Value::Object(Map::new());
        }
        if let Some(root) = root.as_object_mut() {
            root.insert(section.name().to_string(), Value::Object(text));
        }
    }

    let translations = Value::Object(translations).to_string();
    write_all(store, &[(section, data.to_string()), (Section::Translations, translations)])?;
    tracing::debug!("Saved {} section", section);
    Ok(())
}
