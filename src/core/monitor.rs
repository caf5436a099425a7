// Bounded monitoring loop: fetch, classify, stamp, persist, wait

use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::classifier::classify;
use super::fallback::FallbackGenerator;
use super::types::{MonitorConfig, Observation, RunSummary, INSTRUMENT, MONITOR_NAME};
use crate::clients::PriceSource;
use crate::db::ObservationSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Running,
    Completed,
}

/// Result of a single iteration
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub observation: Observation,
    pub persisted: bool,
}

/// Runs `iteration_count` strictly sequential checks on one task.
///
/// Feed failures are replaced by a fallback price and storage failures are
/// logged and dropped, so only exhausting the iteration count ends a run.
pub struct MonitorLoop<S, K, R = StdRng> {
    config: MonitorConfig,
    source: S,
    sink: K,
    fallback: FallbackGenerator<R>,
    state: MonitorState,
}

impl<S, K> MonitorLoop<S, K, StdRng>
where
    S: PriceSource,
    K: ObservationSink,
{
    pub fn new(config: MonitorConfig, source: S, sink: K) -> Self {
        Self::with_fallback(config, source, sink, FallbackGenerator::from_entropy())
    }
}

impl<S, K, R> MonitorLoop<S, K, R>
where
    S: PriceSource,
    K: ObservationSink,
    R: Rng,
{
    pub fn with_fallback(
        config: MonitorConfig,
        source: S,
        sink: K,
        fallback: FallbackGenerator<R>,
    ) -> Self {
        Self {
            config,
            source,
            sink,
            fallback,
            state: MonitorState::Idle,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Run the configured number of checks, waiting `poll_interval` after each
    pub async fn run(&mut self) -> RunSummary {
        self.state = MonitorState::Running;
        info!(
            checks = self.config.iteration_count,
            low = self.config.low_threshold,
            high = self.config.high_threshold,
            interval_ms = self.config.poll_interval.as_millis() as u64,
            "🚀 {} started",
            MONITOR_NAME
        );

        let mut summary = RunSummary::default();
        for check in 1..=self.config.iteration_count {
            debug!(check, total = self.config.iteration_count, "checking price");
            let outcome = self.check_once().await;
            summary.record(&outcome.observation, outcome.persisted);

            sleep(self.config.poll_interval).await;
        }

        self.state = MonitorState::Completed;
        info!(
            checks = summary.checks,
            fallbacks = summary.fallbacks,
            persist_failures = summary.persist_failures,
            low = summary.low,
            normal = summary.normal,
            high = summary.high,
            "✅ {} finished",
            MONITOR_NAME
        );

        summary
    }

    /// One iteration without the trailing wait
    pub async fn check_once(&mut self) -> CheckOutcome {
        let low = self.config.low_threshold;
        let high = self.config.high_threshold;

        let (price, used_fallback) = match self.source.fetch().await {
            Ok(price) => (price, false),
            Err(failure) => {
                let price = self.fallback.synthesize(low, high);
                warn!(error = %failure, "⚠️  Price feed unavailable, using fallback price {}", price);
                (price, true)
            }
        };

        let status = classify(price, low, high);
        let observation = Observation {
            price,
            status,
            used_fallback,
            timestamp: Utc::now(),
        };
        info!(used_fallback, "💰 {} {} -> {}", INSTRUMENT, price, status);

        let persisted = match self.sink.insert(&observation) {
            Ok(id) => {
                debug!(id, "observation stored");
                true
            }
            Err(e) => {
                error!(category = e.category(), "❌ Failed to store observation: {}", e);
                false
            }
        };

        CheckOutcome {
            observation,
            persisted,
        }
    }
}
