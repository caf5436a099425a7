// Common test utilities and helpers
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

use gold_price_monitor::{
    FeedConfig, FetchFailure, MonitorConfig, MonitorError, MonitorResult, Observation,
    ObservationSink, PriceSource,
};

pub const LOW: f64 = 2200.0;
pub const HIGH: f64 = 2600.0;

/// Reference thresholds with no wait between checks
pub fn create_test_config(checks: u32) -> MonitorConfig {
    MonitorConfig::new(LOW, HIGH, Duration::ZERO, checks).expect("valid test config")
}

/// Feed settings pointing at a mock server
pub fn feed_config(endpoint: String) -> FeedConfig {
    FeedConfig {
        endpoint,
        timeout_secs: 2,
        accept_invalid_certs: false,
    }
}

/// Create a temporary directory for test databases
pub fn create_temp_db_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    (temp_dir, db_path)
}

/// Price source that replays a script, then repeats its last entry
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<f64, FetchFailure>>>,
    calls: Mutex<u32>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<f64, FetchFailure>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(0),
        }
    }

    pub fn always(price: f64) -> Self {
        Self::new(vec![Ok(price)])
    }

    pub fn unreachable() -> Self {
        Self::new(vec![Err(FetchFailure::Network("connection refused".to_string()))])
    }

    pub fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl PriceSource for ScriptedSource {
    async fn fetch(&self) -> Result<f64, FetchFailure> {
        *self.calls.lock().unwrap() += 1;
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap()
        }
    }
}

/// Price source that records the tokio clock at each fetch
#[derive(Default)]
pub struct TimedSource {
    pub price: f64,
    fetched_at: Mutex<Vec<tokio::time::Instant>>,
}

impl TimedSource {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            fetched_at: Mutex::new(Vec::new()),
        }
    }

    pub fn fetched_at(&self) -> Vec<tokio::time::Instant> {
        self.fetched_at.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceSource for TimedSource {
    async fn fetch(&self) -> Result<f64, FetchFailure> {
        self.fetched_at.lock().unwrap().push(tokio::time::Instant::now());
        Ok(self.price)
    }
}

/// Sink that keeps what it receives and fails on chosen call numbers (1-based)
#[derive(Default)]
pub struct RecordingSink {
    pub stored: Mutex<Vec<Observation>>,
    pub fail_on: Vec<u32>,
    calls: Mutex<u32>,
}

impl RecordingSink {
    pub fn failing_on(fail_on: Vec<u32>) -> Self {
        Self {
            fail_on,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }

    pub fn stored(&self) -> Vec<Observation> {
        self.stored.lock().unwrap().clone()
    }
}

impl ObservationSink for RecordingSink {
    fn insert(&self, observation: &Observation) -> MonitorResult<i64> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        if self.fail_on.contains(&call) {
            return Err(MonitorError::DatabaseQuery("database is locked".to_string()));
        }
        let mut stored = self.stored.lock().unwrap();
        stored.push(observation.clone());
        Ok(stored.len() as i64)
    }
}
