//! Domain models for the reading list. These types stay light-weight data
//! holders. The status state machine lives here because its entry and exit
//! actions are properties of the record itself, but everything involving
//! ordering, identity lookup, and persistence belongs to the store. Keeping
//! the commentary here means later refactors can reconstruct the assumptions
//! even if other context is lost.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reading workflow position of a book. The wire encoding uses the lowercase
/// tags (`unread`, `reading`, `completed`) so lists written by earlier
/// versions of the tracker load unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not started yet. Every new book begins here.
    #[default]
    Unread,
    /// Currently being read.
    Reading,
    /// Finished. Only books in this state may carry a rating and a
    /// completion date.
    Completed,
}

impl Status {
    /// The fixed cycle order used by the one-click status toggle:
    /// unread → reading → completed → unread.
    pub const CYCLE: [Status; 3] = [Status::Unread, Status::Reading, Status::Completed];

    /// The status that follows this one in the cycle, wrapping back to
    /// `Unread` after `Completed`.
    pub fn next_in_cycle(self) -> Status {
        match self {
            Status::Unread => Status::Reading,
            Status::Reading => Status::Completed,
            Status::Completed => Status::Unread,
        }
    }

    /// Human-readable label for presentation layers. Localization is the
    /// caller's concern; these are the neutral defaults.
    pub fn label(self) -> &'static str {
        match self {
            Status::Unread => "Unread",
            Status::Reading => "Reading",
            Status::Completed => "Completed",
        }
    }

    /// The serialized tag for this status, identical to what lands in the
    /// persisted encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Unread => "unread",
            Status::Reading => "reading",
            Status::Completed => "completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable, session-unique handle for one book record. Ids are assigned by the
/// store at creation or load time and are deliberately *not* persisted: the
/// wire format identifies records by position only, so a fresh load assigns
/// fresh ids. Within a session an id survives every mutation, including
/// removals of other books, which raw indices do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(pub(crate) u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One entry in the reading list. The struct mirrors the persisted JSON
/// object field for field; optional fields are omitted from the encoding
/// when absent rather than written as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Display title, non-empty by construction (the store trims and
    /// rejects blank titles before a record exists).
    pub title: String,
    /// Workflow position. Defaults to `Unread` so hand-edited payloads that
    /// omit the field still load.
    #[serde(default)]
    pub status: Status,
    /// When the book was finished. Present iff `status` is `Completed`.
    /// Serialized as RFC 3339 text under the historical `completedDate` key.
    #[serde(
        rename = "completedDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_date: Option<DateTime<Utc>>,
    /// Star rating, 1–5. Present only while `status` is `Completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

impl Book {
    /// Fresh record in the initial workflow state.
    pub(crate) fn new(title: String) -> Self {
        Book {
            title,
            status: Status::Unread,
            completed_date: None,
            rating: None,
        }
    }

    /// Move the record to `next`, running the state machine's entry and exit
    /// actions. Entering `Completed` stamps `now` only when no completion
    /// date is already recorded, so repeated entries are idempotent; leaving
    /// `Completed` clears both the date and the rating unconditionally, which
    /// is what makes a later re-entry stamp a fresh date.
    pub(crate) fn transition_to(&mut self, next: Status, now: DateTime<Utc>) {
        if next == Status::Completed {
            if self.completed_date.is_none() {
                self.completed_date = Some(now);
            }
        } else {
            self.completed_date = None;
            self.rating = None;
        }
        self.status = next;
    }
}

/// Per-status counts over the whole list, recomputed on demand by
/// [`crate::BookStore::stats`]. No incremental counters are maintained; the
/// list is a personal reading list, so a linear pass is always cheap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub unread: usize,
    pub reading: usize,
    pub completed: usize,
}

impl Stats {
    /// Tally a collection of books in one linear pass.
    pub(crate) fn tally<'a, I>(books: I) -> Self
    where
        I: IntoIterator<Item = &'a Book>,
    {
        let mut stats = Stats::default();
        for book in books {
            match book.status {
                Status::Unread => stats.unread += 1,
                Status::Reading => stats.reading += 1,
                Status::Completed => stats.completed += 1,
            }
        }
        stats
    }
}
