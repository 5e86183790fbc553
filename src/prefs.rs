//! View preference shared with the presentation layer. The store never reads
//! this key; it lives here so every frontend agrees on the encoding instead
//! of inventing its own strings for the same backend.

use anyhow::Result;

use crate::storage::{Storage, CURRENT_VIEW_KEY};

/// Which of the two interchangeable views is active: the flat list or the
/// three-column kanban-style panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewKind {
    #[default]
    List,
    Panel,
}

impl ViewKind {
    /// The persisted tag for this view.
    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::List => "list",
            ViewKind::Panel => "panel",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "list" => Some(ViewKind::List),
            "panel" => Some(ViewKind::Panel),
            _ => None,
        }
    }
}

/// Read the active view, falling back to the list view when the key is
/// absent or holds something unrecognized.
pub fn load_view(storage: &impl Storage) -> Result<ViewKind> {
    let tag = storage.get(CURRENT_VIEW_KEY)?;
    Ok(tag
        .as_deref()
        .and_then(ViewKind::from_tag)
        .unwrap_or_default())
}

/// Persist the active view.
pub fn save_view(storage: &mut impl Storage, view: ViewKind) -> Result<()> {
    storage.set(CURRENT_VIEW_KEY, view.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn absent_and_garbage_values_default_to_the_list_view() {
        let storage = MemoryStorage::new();
        assert_eq!(load_view(&storage).unwrap(), ViewKind::List);

        let storage = MemoryStorage::with_value(CURRENT_VIEW_KEY, "kanban");
        assert_eq!(load_view(&storage).unwrap(), ViewKind::List);
    }

    #[test]
    fn saved_view_round_trips() {
        let mut storage = MemoryStorage::new();
        save_view(&mut storage, ViewKind::Panel).unwrap();
        assert_eq!(load_view(&storage).unwrap(), ViewKind::Panel);
    }
}
