//! Implements an in-memory key-value store.

use std::collections::HashMap;

use crate::{Error, storage::KeyValueStore};

/// Keeps values in a hash map for the lifetime of the process.
///
/// Useful for tests and for sessions that should not touch the disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `entries`.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: entries
                .into_iter()
                .map(|(key, value)| (key.to_owned(), value.to_owned()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::{KeyValueStore, MemoryStorage};

    #[test]
    fn get_missing_key_returns_none() {
        let storage = MemoryStorage::new();

        assert_eq!(storage.get("transactions"), Ok(None));
    }

    #[test]
    fn set_overwrites_value() {
        let mut storage = MemoryStorage::with_entries([("budgets", "[]")]);

        storage.set("budgets", "[1]").unwrap();

        assert_eq!(storage.get("budgets"), Ok(Some("[1]".to_owned())));
    }
}
