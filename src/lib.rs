// Gold Price Monitor Library
//
// Samples the XAU/USD price feed, classifies each price against alert
// thresholds and logs every observation to SQLite

pub mod core;
pub mod clients;
pub mod config;
pub mod db;          // SQLite observation log
pub mod error;       // Unified error handling

// Re-export core monitor types
pub use crate::core::{
    classify, CheckOutcome, FallbackGenerator, MonitorConfig, MonitorLoop, MonitorState,
    Observation, PriceStatus, RunSummary,
};

// Re-export error types
pub use error::{MonitorError, MonitorResult};

// Re-export client types
pub use clients::{FetchFailure, HttpPriceFeed, PriceSource};

// Re-export configuration
pub use config::{Config, ConfigError, DatabaseConfig, FeedConfig, MonitorSettings};

// Re-export database types
pub use db::{Database, ObservationSink, ObservationStore, StoredObservation};
