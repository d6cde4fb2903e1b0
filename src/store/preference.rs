//! Persisted language preference.

use super::{
    KeyValueStore,
    StoreError,
};

/// Stored language preference, ignoring empty values.
#[must_use]
pub fn load(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    store.get(key).filter(|lang| !lang.is_empty())
}

/// # Errors
/// Backend write failure
pub fn save(store: &mut dyn KeyValueStore, key: &str, language: &str) -> Result<(), StoreError> {
    tracing::debug!("Saving preferred language '{}' under '{}'", language, key);
    store.set(key, language)
}

/// # Errors
/// Backend write failure
pub fn clear(store: &mut dyn KeyValueStore, key: &str) -> Result<(), StoreError> {
    store.remove(key)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::store::MemoryStore;

    #[googletest::test]
    fn save_load_clear() {
        let mut store = MemoryStore::new();

        expect_that!(load(&store, "preferred-language"), none());

        save(&mut store, "preferred-language", "de").unwrap();
        expect_that!(load(&store, "preferred-language"), some(eq("de")));

        clear(&mut store, "preferred-language").unwrap();
        expect_that!(load(&store, "preferred-language"), none());
    }

    #[googletest::test]
    fn empty_value_is_no_preference() {
        let mut store = MemoryStore::new();
        store.set("preferred-language", "").unwrap();

        expect_that!(load(&store, "preferred-language"), none());
    }
}
