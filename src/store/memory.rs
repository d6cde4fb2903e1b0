use std::collections::HashMap;

use super::{
    KeyValueStore,
    StoreError,
};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Stored values
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[googletest::test]
    fn set_get_remove() {
        let mut store = MemoryStore::new();

        store.set("preferred-language", "tr").unwrap();
        expect_that!(store.get("preferred-language"), some(eq("tr")));
        expect_that!(store.len(), eq(1));

        store.set("preferred-language", "de").unwrap();
        expect_that!(store.get("preferred-language"), some(eq("de")));

        store.remove("preferred-language").unwrap();
        store.remove("preferred-language").unwrap();
        expect_that!(store.get("preferred-language"), none());
        expect_that!(store.is_empty(), eq(true));
    }
}
