//! Key-value wrapper with automatic serialization.

use crate::{CacheError, MemoryStore, Store};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over a raw [`Store`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S = MemoryStore> {
    store: S,
}

impl Cache<MemoryStore> {
    /// Open an empty in-memory cache.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: Store> Cache<S> {
    /// Wrap an existing store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and
    /// [`CacheError::SerializeError`] if the stored text is not valid JSON
    /// for `T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use doce_cache::Cache;
    ///
    /// let mut cache = Cache::in_memory();
    /// cache.set("answer", &42u32).unwrap();
    /// let value: Option<u32> = cache.get("answer").unwrap();
    /// assert_eq!(value, Some(42));
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Get the raw stored text.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.store.get(key)
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), CacheError> {
        let text = serde_json::to_string(value)?;
        self.store.set(key, &text)
    }

    /// Delete a value from the cache.
    pub fn delete(&mut self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        name: String,
        quantity: u32,
    }

    #[test]
    fn test_typed_roundtrip() {
        let mut cache = Cache::in_memory();
        let items = vec![Item {
            name: "Bolo de Ninho".to_string(),
            quantity: 2,
        }];

        cache.set("cart", &items).unwrap();
        let restored: Option<Vec<Item>> = cache.get("cart").unwrap();
        assert_eq!(restored, Some(items));
    }

    #[test]
    fn test_malformed_value_is_serialize_error() {
        let mut store = MemoryStore::new();
        store.set("cart", "{not json").unwrap();
        let cache = Cache::new(store);

        let result: Result<Option<Vec<Item>>, _> = cache.get("cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
        assert_eq!(cache.get_raw("cart").unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_missing_key() {
        let cache = Cache::in_memory();
        let value: Option<Item> = cache.get("missing").unwrap();
        assert!(value.is_none());
        assert!(!cache.exists("missing").unwrap());
    }
}
