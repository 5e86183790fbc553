//! Persistence boundary. The store talks to a synchronous key-value backend
//! through the [`Storage`] trait and nothing else; everything rusqlite lives
//! behind [`SqliteStorage`], and tests swap in [`MemoryStorage`] without
//! touching the rest of the crate.

use anyhow::Result;

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Key under which the serialized book list is stored.
pub const BOOKS_KEY: &str = "books";

/// Key under which the presentation layer's active view is stored. The store
/// itself never reads it; see [`crate::prefs`].
pub const CURRENT_VIEW_KEY: &str = "currentView";

/// Synchronous key-value storage. Both operations run to completion before
/// returning; there is no batching and no transaction spanning multiple
/// calls, so a backend only has to guarantee that a single `set` is atomic.
pub trait Storage {
    /// Read the value stored under `key`, or `None` if the key was never
    /// written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
