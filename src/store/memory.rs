use std::collections::HashMap;
use std::sync::RwLock;

use futures::future::{BoxFuture, FutureExt};

use crate::errors::StoreError;
use crate::store::Store;

/// A store that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds the given entries.
    pub fn with_entries<K: Into<String>, V: Into<String>>(
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        MemoryStore {
            map: RwLock::new(map),
        }
    }

    /// Returns the raw value under `key` without going through the
    /// `Store` interface.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.map
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }
}

impl Store for MemoryStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StoreError>> {
        let value = self.peek(key);

        async move { Ok(value) }.boxed()
    }

    fn put<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<(), StoreError>> {
        self.map
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_owned(), value);

        async { Ok(()) }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::store::Store;

    #[tokio::test]
    async fn missing_keys_are_none() {
        let store = MemoryStore::new();

        assert_eq!(store.get("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_replaces_previous_value() {
        let store = MemoryStore::with_entries(vec![("k", "1")]);

        store.put("k", "2".to_owned()).await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("2"));
    }
}
