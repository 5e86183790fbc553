//! SQLite-backed key-value storage. The schema is a single two-column `kv`
//! table; the store serializes the whole book list into one row, so the
//! database never needs migrations beyond table creation. The data file
//! lives in a dot-directory under the user's home, resolved the same way
//! on every platform through `directories`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::{params, Connection, OptionalExtension};

use super::Storage;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".reading-list-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "books.sqlite";

/// Key-value backend persisted in an embedded SQLite database.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (creating if necessary) the database at the default per-user
    /// location and make sure the schema exists.
    pub fn open_default() -> Result<Self> {
        let db_path = default_db_path()?;
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }
        Self::open(&db_path)
    }

    /// Open a database at an explicit path. Useful for embedding the store
    /// somewhere other than the default per-user location.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open SQLite database")?;
        Self::from_connection(conn)
    }

    /// Fully in-memory database. Tests use this so nothing touches the
    /// filesystem.
    pub fn open_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().context("failed to open in-memory SQLite database")?;
        Self::from_connection(conn)
    }

    /// Run lazy schema creation on an already-open connection.
    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .context("failed to create kv table")?;

        Ok(SqliteStorage { conn })
    }
}

impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .context("failed to read kv row")
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .context("failed to write kv row")?;
        Ok(())
    }
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_reads_as_none() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        assert_eq!(storage.get("books").unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        storage.set("books", "[]").unwrap();
        assert_eq!(storage.get("books").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn set_replaces_the_previous_value() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        storage.set("currentView", "list").unwrap();
        storage.set("currentView", "panel").unwrap();
        assert_eq!(
            storage.get("currentView").unwrap().as_deref(),
            Some("panel")
        );
    }
}
