//! SQLite-backed key-value store.
//!
//! One file, one `kv` table. The profile document lives under
//! [`PROFILE_KEY`](crate::profile::PROFILE_KEY); the in-flight session
//! machine is parked under [`MACHINE_KEY`] between CLI invocations.
//! Best-effort local save only: no durability guarantees.

use rusqlite::{params, Connection};
use std::path::Path;

use super::data_dir;
use crate::error::StoreError;
use crate::profile::{ProfileStore, UserProfile, PROFILE_KEY};

/// Key the serialized in-flight session machine is stored under.
pub const MACHINE_KEY: &str = "session_machine";

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/ironhour.db`, creating the schema
    /// if it doesn't exist.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()?.join("ironhour.db");
        Self::open_at(&path)
    }

    /// Open at an explicit path. Tests point this at a temp directory.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key. Absent keys are not an error.
    pub fn kv_delete(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl ProfileStore for Database {
    fn load(&self) -> Result<Option<UserProfile>, StoreError> {
        match self.kv_get(PROFILE_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let json = serde_json::to_string(profile)?;
        self.kv_set(PROFILE_KEY, &json)
    }
}
