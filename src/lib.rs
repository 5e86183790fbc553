//! Core library for a personal reading-list tracker.
//!
//! The crate implements the data side of the tracker: the [`BookStore`]
//! that owns the list of books, moves them through the unread → reading →
//! completed workflow, and writes every mutation through to a key-value
//! storage backend. Presentation (rendering, drag-and-drop, view switching)
//! is a consumer of this API, not part of it. The public modules exposed
//! here provide an intentionally small surface so any frontend reuses the
//! same pieces; keeping the glue logic documented makes it easy to recall
//! why each re-export exists when revisiting the project.

pub mod error;
pub mod models;
pub mod prefs;
pub mod storage;
pub mod store;

/// The store itself: construct it with a backend via [`BookStore::open`] and
/// hand it to whatever drives the UI.
pub use store::BookStore;

/// The domain types that pass between the store and its consumers.
pub use models::{Book, BookId, Stats, Status};

/// Typed failure surface of every store operation.
pub use error::{StoreError, StoreResult};

/// The persistence seam plus the two bundled backends. `SqliteStorage` is
/// the durable default; `MemoryStorage` backs tests and throwaway stores.
pub use storage::{MemoryStorage, SqliteStorage, Storage};

/// Shared view preference (`list` or `panel`) for frontends that keep their
/// UI state in the same backend.
pub use prefs::ViewKind;
