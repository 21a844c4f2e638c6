use futures::future::BoxFuture;

use crate::errors::StoreError;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// A key-value store holding JSON text.
pub trait Store: Send + Sync {
    /// Retrieves the value saved under the given key, if any.
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StoreError>>;

    /// Saves the given value under the given key, replacing whatever
    /// was there.
    fn put<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<(), StoreError>>;
}
