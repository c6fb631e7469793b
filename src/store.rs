use crate::error::{AppError, Result};
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Persisted key-value store wrapper for thread-safe access.
///
/// Values are JSON text in a single `kv` table. All reads are served from an
/// in-memory cache loaded at open; writes update the cache first and then the
/// table. A store that cannot reach its database keeps working from memory.
#[derive(Clone)]
pub struct Store {
    conn: Option<Arc<Mutex<Connection>>>,
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl Store {
    /// Open or create the store at the given path.
    ///
    /// Never fails: when the database cannot be opened the store degrades to
    /// memory-only operation and the fault is logged.
    pub fn open(path: &Path) -> Self {
        match Self::open_connection(path) {
            Ok(store) => store,
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "Failed to open store, state will not persist"
                );
                Self {
                    conn: None,
                    cache: Arc::new(RwLock::new(HashMap::new())),
                }
            }
        }
    }

    /// Open in-memory store (for testing).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Storage(format!("Failed to open store: {}", e)))?;

        let store = Self {
            conn: Some(Arc::new(Mutex::new(conn))),
            cache: Arc::new(RwLock::new(HashMap::new())),
        };

        store.initialize_schema()?;
        Ok(store)
    }

    fn open_connection(path: &Path) -> Result<Self> {
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| AppError::Storage(format!("Failed to open store: {}", e)))?;

        let store = Self {
            conn: Some(Arc::new(Mutex::new(conn))),
            cache: Arc::new(RwLock::new(HashMap::new())),
        };

        store.initialize_schema()?;
        store.load_cache();
        Ok(store)
    }

    /// Initialize store schema.
    fn initialize_schema(&self) -> Result<()> {
        let Some(conn) = &self.conn else {
            return Ok(());
        };

        conn.lock()
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS kv (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at INTEGER NOT NULL
                );
                "#,
            )
            .map_err(|e| AppError::Storage(format!("Failed to initialize schema: {}", e)))?;

        Ok(())
    }

    /// Populate the cache from the table.
    fn load_cache(&self) {
        let Some(conn) = &self.conn else {
            return;
        };

        let conn = conn.lock();
        let mut stmt = match conn.prepare("SELECT key, value FROM kv") {
            Ok(stmt) => stmt,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read persisted state");
                return;
            }
        };

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        });

        match rows {
            Ok(rows) => {
                let mut cache = self.cache.write();
                for row in rows.flatten() {
                    cache.insert(row.0, row.1);
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to read persisted state"),
        }
    }

    /// Read a value, falling back to the default when the key is absent or
    /// the stored text does not parse.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let cache = self.cache.read();
        let Some(raw) = cache.get(key) else {
            return default;
        };

        match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = key, error = %e, "Discarding unreadable stored value");
                default
            }
        }
    }

    /// Write a value under the given key.
    ///
    /// Storage faults are logged and swallowed; the in-memory state stays
    /// authoritative for the rest of the session.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(key = key, error = %e, "Failed to serialize value");
                return;
            }
        };

        self.cache.write().insert(key.to_string(), raw.clone());

        let Some(conn) = &self.conn else {
            return;
        };

        let result = conn.lock().execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![key, raw, now_timestamp()],
        );

        if let Err(e) = result {
            tracing::error!(key = key, error = %e, "Failed to persist value");
        }
    }

    /// Check whether a key exists in the store.
    pub fn contains(&self, key: &str) -> bool {
        self.cache.read().contains_key(key)
    }

    /// Whether writes reach a database or live only in memory.
    pub fn is_persistent(&self) -> bool {
        self.conn.is_some()
    }

    /// Raw stored text for a key, bypassing JSON decoding (for diagnostics).
    pub fn raw(&self, key: &str) -> Option<String> {
        if let Some(raw) = self.cache.read().get(key) {
            return Some(raw.clone());
        }

        let conn = self.conn.as_ref()?;
        conn.lock()
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .ok()
            .flatten()
    }
}

/// Timestamp helper.
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}
