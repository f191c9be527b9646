//! SQLite-based preference storage.
//!
//! A single `prefs(key, value)` table; each preference is one row.

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::backend::{PreferenceStore, StoreResult};

pub struct SqlitePreferenceStore {
    conn: Mutex<Connection>,
}

impl SqlitePreferenceStore {
    /// Open (or create) the preference database at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        tracing::debug!("Preference store opened at {}", path.as_ref().display());
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    #[cfg(test)]
    pub fn in_memory() -> StoreResult<Self> {
        let store = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        self.conn.lock().execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS prefs (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Number of stored preferences.
    pub fn count(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .lock()
            .query_row("SELECT COUNT(*) FROM prefs", [], |row| row.get(0))?;
        Ok(count.max(0) as usize)
    }
}

impl PreferenceStore for SqlitePreferenceStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .lock()
            .query_row(
                "SELECT value FROM prefs WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.lock().execute(
            "INSERT INTO prefs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        tracing::debug!(key, "Preference saved");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn
            .lock()
            .execute("DELETE FROM prefs WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    fn create_test_store() -> SqlitePreferenceStore {
        SqlitePreferenceStore::in_memory().expect("Failed to create in-memory store")
    }

    #[test]
    fn test_set_and_get() {
        let store = create_test_store();
        store.set("weather_theme", "dark").unwrap();
        assert_eq!(store.get("weather_theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_get_missing() {
        let store = create_test_store();
        assert_eq!(store.get("weather_theme").unwrap(), None);
    }

    #[test]
    fn test_set_replaces_value() {
        let store = create_test_store();
        store.set("weather_last_city", "Paris,FR").unwrap();
        store.set("weather_last_city", "Oslo,NO").unwrap();
        assert_eq!(
            store.get("weather_last_city").unwrap().as_deref(),
            Some("Oslo,NO")
        );
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_remove() {
        let store = create_test_store();
        store.set("weather_unit", "imperial").unwrap();
        store.remove("weather_unit").unwrap();
        assert_eq!(store.get("weather_unit").unwrap(), None);
        // absent key
        store.remove("weather_unit").unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.db");

        {
            let store = SqlitePreferenceStore::new(&path).unwrap();
            store.set("weather_unit", "imperial").unwrap();
            store.set("weather_favorites", r#"["Tokyo","Paris"]"#).unwrap();
        }

        let store = SqlitePreferenceStore::new(&path).unwrap();
        assert_eq!(store.get("weather_unit").unwrap().as_deref(), Some("imperial"));
        assert_eq!(
            store.get("weather_favorites").unwrap().as_deref(),
            Some(r#"["Tokyo","Paris"]"#)
        );
    }

    #[test]
    fn test_unopenable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("nested").join("prefs.db");
        assert!(SqlitePreferenceStore::new(path).is_err());
    }
}
