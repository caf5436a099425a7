//! Observation persistence

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Result as SqlResult, Row};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::{lock, Database};
use crate::core::{Observation, PriceStatus};
use crate::error::MonitorResult;

/// Insert-only destination for observations, called once per iteration
pub trait ObservationSink {
    fn insert(&self, observation: &Observation) -> MonitorResult<i64>;
}

/// A row read back from the log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredObservation {
    pub id: i64,
    pub run_id: String,
    #[serde(flatten)]
    pub observation: Observation,
}

impl StoredObservation {
    fn from_row(row: &Row) -> SqlResult<Self> {
        let status_text: String = row.get(3)?;
        let status = PriceStatus::from_str_opt(&status_text).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                Type::Text,
                format!("unknown status '{}'", status_text).into(),
            )
        })?;

        let timestamp_text: String = row.get(5)?;
        let timestamp = DateTime::parse_from_rfc3339(&timestamp_text)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?
            .with_timezone(&Utc);

        Ok(StoredObservation {
            id: row.get(0)?,
            run_id: row.get(1)?,
            observation: Observation {
                price: row.get(2)?,
                status,
                used_fallback: row.get(4)?,
                timestamp,
            },
        })
    }
}

/// SQLite-backed sink. Every row written through one store carries the same
/// run id.
pub struct ObservationStore {
    conn: Arc<Mutex<Connection>>,
    run_id: Uuid,
}

impl ObservationStore {
    /// Store for a fresh run
    pub fn new(db: &Database) -> Self {
        Self::with_run_id(db, Uuid::new_v4())
    }

    pub fn with_run_id(db: &Database, run_id: Uuid) -> Self {
        Self {
            conn: db.get_connection(),
            run_id,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Most recent observations across all runs, newest first
    pub fn list_recent(&self, limit: usize) -> MonitorResult<Vec<StoredObservation>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT id, run_id, price, status, used_fallback, timestamp
             FROM gold_price_logs ORDER BY id DESC LIMIT ?1"
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| StoredObservation::from_row(row))?;
        Ok(rows.collect::<SqlResult<Vec<_>>>()?)
    }

    /// Observations written by one run, in insertion order
    pub fn list_by_run(&self, run_id: Uuid) -> MonitorResult<Vec<StoredObservation>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT id, run_id, price, status, used_fallback, timestamp
             FROM gold_price_logs WHERE run_id = ?1 ORDER BY id ASC"
        )?;

        let rows = stmt.query_map(params![run_id.to_string()], |row| StoredObservation::from_row(row))?;
        Ok(rows.collect::<SqlResult<Vec<_>>>()?)
    }

    pub fn count(&self) -> MonitorResult<i64> {
        let conn = lock(&self.conn)?;
        let count = conn.query_row("SELECT COUNT(*) FROM gold_price_logs", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl ObservationSink for ObservationStore {
    fn insert(&self, observation: &Observation) -> MonitorResult<i64> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO gold_price_logs (run_id, price, status, used_fallback, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                self.run_id.to_string(),
                observation.price,
                observation.status.as_str(),
                observation.used_fallback,
                observation.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }
}
