// Common types used across the monitor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::fallback::fallback_bounds;
use crate::config::ConfigError;

/// Classification of a price against the threshold band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriceStatus {
    Low,     // Below the low threshold
    Normal,  // Inside [low, high]
    High,    // Above the high threshold
}

impl PriceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceStatus::Low => "LOW",
            PriceStatus::Normal => "NORMAL",
            PriceStatus::High => "HIGH",
        }
    }

    /// Parse the stored representation. Unknown values yield `None`.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "LOW" => Some(PriceStatus::Low),
            "NORMAL" => Some(PriceStatus::Normal),
            "HIGH" => Some(PriceStatus::High),
            _ => None,
        }
    }
}

impl fmt::Display for PriceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One monitoring iteration's outcome, handed to the sink once and never kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub price: f64,
    pub status: PriceStatus,
    pub used_fallback: bool,
    pub timestamp: DateTime<Utc>,
}

/// Runtime parameters of a monitor run, fixed for the lifetime of the loop
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub low_threshold: f64,
    pub high_threshold: f64,
    pub poll_interval: Duration,
    pub iteration_count: u32,
}

impl MonitorConfig {
    /// Build a validated configuration.
    ///
    /// Thresholds must be finite with `low <= high`, and at least one
    /// iteration must be requested.
    pub fn new(
        low_threshold: f64,
        high_threshold: f64,
        poll_interval: Duration,
        iteration_count: u32,
    ) -> Result<Self, ConfigError> {
        if !low_threshold.is_finite() || !high_threshold.is_finite() {
            return Err(ConfigError::Validation(
                "thresholds must be finite numbers".to_string(),
            ));
        }

        if low_threshold > high_threshold {
            return Err(ConfigError::Validation(format!(
                "low threshold ({}) must not exceed high threshold ({})",
                low_threshold, high_threshold
            )));
        }

        // The fallback draw and its cent rounding must stay finite
        let (lower, upper) = fallback_bounds(low_threshold, high_threshold);
        let fallback_finite = [lower, upper, upper - lower, lower * 100.0, upper * 100.0]
            .iter()
            .all(|v| v.is_finite());
        if !fallback_finite {
            return Err(ConfigError::Validation(format!(
                "thresholds ({}, {}) are too large for the fallback price range",
                low_threshold, high_threshold
            )));
        }

        if iteration_count == 0 {
            return Err(ConfigError::Validation(
                "number of checks must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            low_threshold,
            high_threshold,
            poll_interval,
            iteration_count,
        })
    }
}

/// Counters for a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub checks: u32,
    pub fallbacks: u32,
    pub persist_failures: u32,
    pub low: u32,
    pub normal: u32,
    pub high: u32,
}

impl RunSummary {
    pub(crate) fn record(&mut self, observation: &Observation, persisted: bool) {
        self.checks += 1;
        if observation.used_fallback {
            self.fallbacks += 1;
        }
        if !persisted {
            self.persist_failures += 1;
        }
        match observation.status {
            PriceStatus::Low => self.low += 1,
            PriceStatus::Normal => self.normal += 1,
            PriceStatus::High => self.high += 1,
        }
    }
}

// Fixed instrument and labels
pub const MONITOR_NAME: &str = "Gold Price Monitor";
pub const INSTRUMENT: &str = "XAU/USD";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_storage_string() {
        for status in [PriceStatus::Low, PriceStatus::Normal, PriceStatus::High] {
            assert_eq!(PriceStatus::from_str_opt(status.as_str()), Some(status));
        }
        assert_eq!(PriceStatus::from_str_opt("low"), None);
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&PriceStatus::Normal).unwrap();
        assert_eq!(json, "\"NORMAL\"");
    }

    #[test]
    fn test_monitor_config_rejects_inverted_thresholds() {
        let err = MonitorConfig::new(2600.0, 2200.0, Duration::from_secs(5), 10).unwrap_err();
        assert!(err.to_string().contains("must not exceed"));
    }

    #[test]
    fn test_monitor_config_accepts_equal_thresholds() {
        let config = MonitorConfig::new(2400.0, 2400.0, Duration::ZERO, 1).unwrap();
        assert_eq!(config.low_threshold, config.high_threshold);
    }

    #[test]
    fn test_monitor_config_rejects_zero_checks_and_nan() {
        assert!(MonitorConfig::new(2200.0, 2600.0, Duration::ZERO, 0).is_err());
        assert!(MonitorConfig::new(f64::NAN, 2600.0, Duration::ZERO, 1).is_err());
    }

    #[test]
    fn test_monitor_config_rejects_huge_thresholds() {
        // Width of the fallback range overflows
        let err = MonitorConfig::new(-1e308, 1e308, Duration::ZERO, 1).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        // Cent rounding of the bounds overflows
        let err = MonitorConfig::new(1e307, 1e307, Duration::ZERO, 1).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        assert!(MonitorConfig::new(-1e9, 1e9, Duration::ZERO, 1).is_ok());
    }

    #[test]
    fn test_summary_counts_outcomes() {
        let mut summary = RunSummary::default();
        let obs = Observation {
            price: 2100.37,
            status: PriceStatus::Low,
            used_fallback: true,
            timestamp: Utc::now(),
        };
        summary.record(&obs, false);
        summary.record(&Observation { status: PriceStatus::High, used_fallback: false, ..obs }, true);

        assert_eq!(summary.checks, 2);
        assert_eq!(summary.fallbacks, 1);
        assert_eq!(summary.persist_failures, 1);
        assert_eq!(summary.low, 1);
        assert_eq!(summary.high, 1);
        assert_eq!(summary.normal, 0);
    }
}
