//! The Book Store: sole owner of the reading list and of every read or write
//! of its persisted form. Each operation encapsulates one user-visible
//! mutation so presentation layers can stay focused on rendering and event
//! wiring. Capturing the rationale in comments keeps the intent of each
//! operation easy to rediscover when returning to the project.
//!
//! Records are addressed by [`BookId`], never by raw position. The store
//! keeps an explicit id sequence for display order next to an id → record
//! map, so removing one book never invalidates a handle to another. Ids are
//! session-local; the persisted encoding identifies records by position
//! only, and a fresh load assigns fresh ids.
//!
//! Every mutation is written through to the backend immediately. There is no
//! dirty tracking and no batching: the full list is re-serialized on each
//! change, which is the right trade for a personal reading list measured in
//! dozens of entries. If the backend rejects the write, the in-memory change
//! is rolled back before the error is returned, so memory and disk never
//! diverge.

use std::collections::HashMap;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::error::{StoreError, StoreResult};
use crate::models::{Book, BookId, Stats, Status};
use crate::storage::{Storage, BOOKS_KEY};

/// Owner of the book list and its persistence. Construct one explicitly with
/// [`BookStore::open`] and pass it to whatever consumes it; there is no
/// global instance.
#[derive(Debug)]
pub struct BookStore<S: Storage> {
    storage: S,
    /// Display/storage order, as a sequence of ids into `records`.
    order: Vec<BookId>,
    records: HashMap<BookId, Book>,
    next_id: u64,
}

impl<S: Storage> BookStore<S> {
    /// Load the persisted list from `storage` and take ownership of the
    /// backend. An absent key or a payload that does not decode as a JSON
    /// array of records yields an empty list rather than an error; the
    /// persisted data may have been written by hand or by an older version,
    /// and refusing to start over a stale payload would brick the tracker.
    /// A failing backend *read* is a real error and propagates.
    pub fn open(storage: S) -> anyhow::Result<Self> {
        let raw = storage
            .get(BOOKS_KEY)
            .context("failed to read persisted book list")?;

        let books: Vec<Book> = match raw {
            Some(text) => serde_json::from_str(&text).unwrap_or_default(),
            None => Vec::new(),
        };

        let mut store = BookStore {
            storage,
            order: Vec::with_capacity(books.len()),
            records: HashMap::with_capacity(books.len()),
            next_id: 0,
        };
        for book in books {
            let id = store.allocate_id();
            store.order.push(id);
            store.records.insert(id, book);
        }
        Ok(store)
    }

    /// Append a new unread book. The title is trimmed first; a title that is
    /// empty after trimming is rejected with no record created.
    pub fn add(&mut self, title: &str) -> StoreResult<BookId> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        let id = self.allocate_id();
        self.order.push(id);
        self.records.insert(id, Book::new(title.to_string()));

        if let Err(err) = self.persist() {
            self.order.pop();
            self.records.remove(&id);
            self.next_id -= 1;
            return Err(StoreError::Persist(err));
        }
        Ok(id)
    }

    /// Advance a book one step along the fixed unread → reading → completed
    /// cycle, wrapping back to unread. Entry and exit actions for the
    /// completed state run as part of the transition (see
    /// [`Book::transition_to`]). Returns the status the book ended up in.
    pub fn cycle_status(&mut self, id: BookId) -> StoreResult<Status> {
        let book = self.records.get_mut(&id).ok_or(StoreError::UnknownBook(id))?;
        let next = book.status.next_in_cycle();
        let backup = book.clone();
        book.transition_to(next, Utc::now());
        self.persist_or_restore(id, backup)?;
        Ok(next)
    }

    /// Direct (non-cyclic) status assignment, any state to any state. Used
    /// by drag-and-drop style reassignment. Entering `Completed` keeps a
    /// completion date that is already present (a book dragged from the
    /// completed column and back again within one gesture would otherwise
    /// lose its original date) and stamps the current time only when none
    /// is recorded.
    pub fn set_status(&mut self, id: BookId, status: Status) -> StoreResult<()> {
        let book = self.records.get_mut(&id).ok_or(StoreError::UnknownBook(id))?;
        let backup = book.clone();
        book.transition_to(status, Utc::now());
        self.persist_or_restore(id, backup)
    }

    /// Set the star rating of a completed book. Ratings outside 1–5 are
    /// rejected, as is rating a book in any other state; the rating field
    /// only exists while a book is completed.
    pub fn set_rating(&mut self, id: BookId, rating: u8) -> StoreResult<()> {
        if !(1..=5).contains(&rating) {
            return Err(StoreError::RatingOutOfRange(rating));
        }
        let book = self.records.get_mut(&id).ok_or(StoreError::UnknownBook(id))?;
        if book.status != Status::Completed {
            return Err(StoreError::NotCompleted);
        }
        let backup = book.clone();
        book.rating = Some(rating);
        self.persist_or_restore(id, backup)
    }

    /// Overwrite the completion date of a completed book with a
    /// user-supplied one. Accepts RFC 3339 text or a bare `YYYY-MM-DD`
    /// (interpreted as midnight UTC, matching what a date picker produces);
    /// anything else is rejected before any mutation happens.
    pub fn set_completed_date(&mut self, id: BookId, date: &str) -> StoreResult<()> {
        let parsed = parse_completed_date(date)
            .ok_or_else(|| StoreError::InvalidDate(date.to_string()))?;
        let book = self.records.get_mut(&id).ok_or(StoreError::UnknownBook(id))?;
        if book.status != Status::Completed {
            return Err(StoreError::NotCompleted);
        }
        let backup = book.clone();
        book.completed_date = Some(parsed);
        self.persist_or_restore(id, backup)
    }

    /// Replace a book's title. The same trimmed-non-empty rule as [`add`]
    /// applies; a blank replacement fails without touching the record.
    ///
    /// [`add`]: BookStore::add
    pub fn rename(&mut self, id: BookId, new_title: &str) -> StoreResult<()> {
        let new_title = new_title.trim();
        if new_title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        let book = self.records.get_mut(&id).ok_or(StoreError::UnknownBook(id))?;
        let backup = book.clone();
        book.title = new_title.to_string();
        self.persist_or_restore(id, backup)
    }

    /// Delete a book, returning the removed record. The display order simply
    /// closes over the gap; every other book keeps its id.
    pub fn remove(&mut self, id: BookId) -> StoreResult<Book> {
        let position = self
            .order
            .iter()
            .position(|&candidate| candidate == id)
            .ok_or(StoreError::UnknownBook(id))?;

        let removed = match self.records.remove(&id) {
            Some(book) => book,
            // Order and records disagreeing would be a store bug; treat the
            // id as unknown rather than panicking.
            None => return Err(StoreError::UnknownBook(id)),
        };
        self.order.remove(position);

        if let Err(err) = self.persist() {
            self.order.insert(position, id);
            self.records.insert(id, removed);
            return Err(StoreError::Persist(err));
        }
        Ok(removed)
    }

    /// Per-status counts over the current list. Recomputed on every call; no
    /// counters are maintained incrementally.
    pub fn stats(&self) -> Stats {
        Stats::tally(self.order.iter().filter_map(|id| self.records.get(id)))
    }

    /// Iterate the list in display order.
    pub fn books(&self) -> impl Iterator<Item = (BookId, &Book)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.records.get(&id).map(|book| (id, book)))
    }

    /// Read-only access to one record.
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.records.get(&id)
    }

    /// Resolve a display position to an id. This is how a presentation layer
    /// maps a clicked row back to a stable handle; the id, not the index, is
    /// what it should keep across re-renders.
    pub fn id_at(&self, index: usize) -> Option<BookId> {
        self.order.get(index).copied()
    }

    /// Current display position of a book.
    pub fn index_of(&self, id: BookId) -> Option<usize> {
        self.order.iter().position(|&candidate| candidate == id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Mutable access to the backend, for callers that share it for their
    /// own keys (the view preference in [`crate::prefs`] is stored through
    /// the same backend).
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Give the backend back, dropping the in-memory list. Reload flows pair
    /// this with [`BookStore::open`].
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn allocate_id(&mut self) -> BookId {
        let id = BookId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Serialize the full list in display order and write it through to the
    /// backend under the `books` key.
    fn persist(&mut self) -> anyhow::Result<()> {
        let list: Vec<&Book> = self
            .order
            .iter()
            .filter_map(|id| self.records.get(id))
            .collect();
        let payload = serde_json::to_string(&list).context("failed to encode book list")?;
        self.storage
            .set(BOOKS_KEY, &payload)
            .context("failed to write book list")
    }

    /// Write-through for single-record mutations: on backend failure, put
    /// the pre-mutation record back so the caller observes no change at all.
    fn persist_or_restore(&mut self, id: BookId, backup: Book) -> StoreResult<()> {
        if let Err(err) = self.persist() {
            if let Some(slot) = self.records.get_mut(&id) {
                *slot = backup;
            }
            return Err(StoreError::Persist(err));
        }
        Ok(())
    }
}

/// Parse user-supplied completion-date text. RFC 3339 is tried first so
/// round-tripping a previously persisted value works; a bare calendar date
/// is read as midnight UTC.
fn parse_completed_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Utc.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).single()
}
