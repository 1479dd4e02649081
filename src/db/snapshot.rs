//! Key-value snapshot storage.
//!
//! The game state is persisted as a single JSON record under a namespaced key
//! and rewritten wholesale on every change.

use chrono::Utc;
use rusqlite::{Connection, Result, params};

use super::{DbPool, StorageError, try_lock};

pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM kv_store WHERE key = ?1")?;
    let mut rows = stmt.query(params![key])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row.get(0)?))
    } else {
        Ok(None)
    }
}

pub fn set_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
        params![key, value, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

/// Durable home for the serialized game state
pub trait SnapshotStorage: Send {
    /// Stored snapshot, or None if nothing was saved yet
    fn load(&self) -> std::result::Result<Option<String>, StorageError>;

    fn save(&self, snapshot: &str) -> std::result::Result<(), StorageError>;
}

/// Snapshot record in the SQLite `kv_store` table
#[derive(Clone)]
pub struct SqliteSnapshots {
    pool: DbPool,
    key: String,
}

impl SqliteSnapshots {
    pub fn new(pool: DbPool, key: impl Into<String>) -> Self {
        Self {
            pool,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl SnapshotStorage for SqliteSnapshots {
    fn load(&self) -> std::result::Result<Option<String>, StorageError> {
        let conn = try_lock(&self.pool)?;
        Ok(get_value(&conn, &self.key)?)
    }

    fn save(&self, snapshot: &str) -> std::result::Result<(), StorageError> {
        let conn = try_lock(&self.pool)?;
        set_value(&conn, &self.key, snapshot)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_db;

    #[test]
    fn test_get_missing_key() {
        let pool = init_memory_db().unwrap();
        let conn = pool.lock().unwrap();
        assert_eq!(get_value(&conn, "absent").unwrap(), None);
    }

    #[test]
    fn test_set_value_overwrites() {
        let pool = init_memory_db().unwrap();
        let conn = pool.lock().unwrap();
        set_value(&conn, "k", "one").unwrap();
        set_value(&conn, "k", "two").unwrap();
        assert_eq!(get_value(&conn, "k").unwrap().as_deref(), Some("two"));

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_snapshots_are_namespaced() {
        let pool = init_memory_db().unwrap();
        let a = SqliteSnapshots::new(pool.clone(), "a");
        let b = SqliteSnapshots::new(pool, "b");

        a.save("{\"who\":\"a\"}").unwrap();
        assert_eq!(a.load().unwrap().as_deref(), Some("{\"who\":\"a\"}"));
        assert_eq!(b.load().unwrap(), None);
        assert_eq!(a.key(), "a");
    }
}
