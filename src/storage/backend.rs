//! Durable key-value store abstraction.
//!
//! This module defines the [`KeyValueStore`] trait, the port through which the
//! favorites store persists its state. It is deliberately tiny: string keys,
//! string values, whole-value writes.

use crate::domain::error::Result;

/// Persistent, synchronous, string-keyed store.
///
/// Values written with [`set`](KeyValueStore::set) must survive process
/// restarts for durable implementations. Every `set` replaces the whole value
/// stored under the key; there are no partial or delta writes.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): one JSON document on disk, atomic writes
/// - [`MemoryStore`](crate::storage::MemoryStore): process-local, for ephemeral sessions and tests
///
/// # Examples
///
/// ```
/// use character_finder::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.set("favoriteCharacterIds", "[1,2]")?;
/// assert_eq!(store.get("favoriteCharacterIds")?.as_deref(), Some("[1,2]"));
/// # Ok::<(), character_finder::FinderError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value, and makes it
    /// durable before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be completed.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
