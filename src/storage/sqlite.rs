//! Implements a SQLite backed key-value store.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::{Error, storage::KeyValueStore};

/// Stores values in a single `local_storage` table of a SQLite database.
#[derive(Debug)]
pub struct SQLiteStorage {
    connection: Connection,
}

impl SQLiteStorage {
    /// Create a new store for the SQLite `connection`, creating the
    /// `local_storage` table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the table cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_storage_table(&connection)?;

        Ok(Self { connection })
    }

    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the file cannot be opened or the table
    /// cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let connection = Connection::open(path)?;

        Self::new(connection)
    }
}

impl KeyValueStore for SQLiteStorage {
    /// Get the value stored under `key`.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let value = self
            .connection
            .prepare("SELECT value FROM local_storage WHERE key = :key")?
            .query_row(&[(":key", key)], |row| row.get(0))
            .optional()?;

        Ok(value)
    }

    /// Insert or replace the value stored under `key`.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.connection.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;

        Ok(())
    }
}

/// Create the key-value table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_storage_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}
