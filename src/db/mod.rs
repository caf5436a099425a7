//! Database module for the SQLite observation log

use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{MonitorError, MonitorResult};

pub mod observation;

pub use observation::{ObservationSink, ObservationStore, StoredObservation};

/// Owner of the single storage connection, opened once at startup
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) a database file, creating its parent directory
    pub fn new<P: AsRef<Path>>(path: P) -> MonitorResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| MonitorError::DatabaseConnection(format!("{}: {}", path.display(), e)))?;

        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory database (for testing)
    pub fn new_in_memory() -> MonitorResult<Self> {
        let conn = Connection::open_in_memory()?;

        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create the observation table if it doesn't exist yet
    pub fn init_schema(&self) -> MonitorResult<()> {
        let conn = lock(&self.conn)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Get a reference to the connection (for custom queries)
    pub fn get_connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    /// Check database health
    pub fn health_check(&self) -> MonitorResult<bool> {
        let conn = lock(&self.conn)?;
        let result: i32 = conn.query_row("SELECT 1", [], |row| row.get(0))?;
        Ok(result == 1)
    }
}

pub(crate) fn lock(conn: &Mutex<Connection>) -> MonitorResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|_| MonitorError::Internal("database connection lock poisoned".to_string()))
}
