//! Error taxonomy for store operations. Every variant is local to a single
//! operation: the store never retries, and a returned error guarantees the
//! in-memory list and the persisted copy are both unchanged.

use thiserror::Error;

use crate::models::BookId;

/// Failures a [`crate::BookStore`] operation can report.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `add` or `rename` was given a title that is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The given id does not name a book in the current list, typically
    /// because the record was removed after the id was obtained.
    #[error("no book {0} in the reading list")]
    UnknownBook(BookId),

    /// Rating outside the 1–5 star range.
    #[error("rating {0} is outside the 1-5 range")]
    RatingOutOfRange(u8),

    /// Rating or completion-date edit attempted on a book that is not in
    /// the `completed` state. Those fields only exist while a book is
    /// completed.
    #[error("book is not completed")]
    NotCompleted,

    /// The supplied completion date could not be parsed as RFC 3339 or
    /// `YYYY-MM-DD` text.
    #[error("could not parse date {0:?}")]
    InvalidDate(String),

    /// The storage backend rejected the write-through. The in-memory
    /// mutation has been rolled back.
    #[error("failed to persist the reading list")]
    Persist(#[source] anyhow::Error),
}

/// Shorthand used throughout the store module.
pub type StoreResult<T> = Result<T, StoreError>;
