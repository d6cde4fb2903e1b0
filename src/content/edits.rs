//! Inline page edits kept until they are exported.

use std::collections::BTreeMap;

use chrono::{
    DateTime,
    SecondsFormat,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::store::{
    KeyValueStore,
    StoreError,
};

/// Store key holding the edit map.
pub const EDITS_KEY: &str = "pageEdits";

#[derive(Error, Debug)]
pub enum EditError {
    #[error("Stored page edits under 'pageEdits' are not a JSON object of strings: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("Failed to serialize page edits: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Downloadable record of the edits made on one page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EditExport {
    /// Element key to edited text
    pub edits: BTreeMap<String, String>,
    /// ISO 8601 UTC time with milliseconds
    pub timestamp: String,
    /// Page path the edits were made on
    pub page: String,
}

impl EditExport {
    /// # Errors
    /// Serialization failure
    pub fn to_json_pretty(&self) -> Result<String, EditError> {
        serde_json::to_string_pretty(self).map_err(EditError::Serialize)
    }
}

/// Current edit map. Missing or blank storage is an empty map.
///
/// # Errors
/// The stored value is not a JSON object of strings
pub fn load_edits(store: &dyn KeyValueStore) -> Result<BTreeMap<String, String>, EditError> {
    match store.get(EDITS_KEY) {
        Some(text) if !text.trim().is_empty() => {
            serde_json::from_str(&text).map_err(EditError::Corrupt)
        }
        _ => Ok(BTreeMap::new()),
    }
}

/// Records the text of one edited element, replacing any earlier edit.
///
/// # Errors
/// - Stored edits are corrupt
/// - Store write failure
pub fn record_edit(
    store: &mut dyn KeyValueStore,
    key: &str,
    text: &str,
) -> Result<(), EditError> {
    let mut edits = load_edits(store)?;
    edits.insert(key.to_string(), text.to_string());

    let serialized = serde_json::to_string(&edits).map_err(EditError::Serialize)?;
    store.set(EDITS_KEY, &serialized)?;
    tracing::debug!("Recorded edit for '{}'", key);
    Ok(())
}

/// Bundles the stored edits with the page and time of export.
///
/// # Errors
/// Stored edits are corrupt
pub fn export_edits(
    store: &dyn KeyValueStore,
    page: &str,
    at: DateTime<Utc>,
) -> Result<EditExport, EditError> {
    Ok(EditExport {
        edits: load_edits(store)?,
        timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        page: page.to_string(),
    })
}

/// Default download name, `page-edits-<unix millis>.json`.
#[must_use]
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("page-edits-{}.json", at.timestamp_millis())
}
