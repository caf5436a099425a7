// Core monitoring logic modules

pub mod types;
pub mod classifier;
pub mod fallback;
pub mod monitor;

// Re-export commonly used types
pub use types::{MonitorConfig, Observation, PriceStatus, RunSummary, INSTRUMENT, MONITOR_NAME};
pub use classifier::classify;
pub use fallback::{fallback_bounds, FallbackGenerator};
pub use monitor::{CheckOutcome, MonitorLoop, MonitorState};
