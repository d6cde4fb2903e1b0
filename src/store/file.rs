use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;

use super::{
    KeyValueStore,
    StoreError,
};

/// Store persisted as a flat JSON object of strings.
///
/// The whole file is rewritten after every mutation.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Backing file
    path: PathBuf,
    /// Current contents
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - The file is not an object of strings
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if !path.exists() {
            tracing::debug!("Store file not found, starting empty: {:?}", path);
            return Ok(Self { path, values: BTreeMap::new() });
        }

        let content = std::fs::read_to_string(&path)?;
        let Value::Object(entries) = serde_json::from_str::<Value>(&content)? else {
            return Err(StoreError::NotAnObject);
        };

        let values = entries
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(text) => Ok((key, text)),
                _ => Err(StoreError::NotAnObject),
            })
            .collect::<Result<_, _>>()?;

        tracing::debug!("Opened store {:?}", path);
        Ok(Self { path, values })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `values` to disk and keeps them only once the write succeeded.
    fn commit(&mut self, values: BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&values)?;
        std::fs::write(&self.path, content)?;
        self.values = values;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.clone();
        values.insert(key.to_string(), value.to_string());
        self.commit(values)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.values.contains_key(key) {
            return Ok(());
        }
        let mut values = self.values.clone();
        values.remove(key);
        self.commit(values)
    }
}
