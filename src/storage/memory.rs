//! Plain in-memory backend. Primarily a test double, but also the right
//! choice when a caller wants a throwaway store with no persistence at all.

use std::collections::HashMap;

use anyhow::Result;

use super::Storage;

/// `HashMap`-backed storage with no durability.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a key, e.g. to simulate an existing persisted list in tests.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.values.insert(key.to_string(), value.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behaves_like_a_map() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("books").unwrap(), None);

        storage.set("books", "[]").unwrap();
        assert_eq!(storage.get("books").unwrap().as_deref(), Some("[]"));

        storage.set("books", "[1]").unwrap();
        assert_eq!(storage.get("books").unwrap().as_deref(), Some("[1]"));
    }
}
