// Run command implementation
use clap::Args;
use std::io;
use tracing::{info, warn};

use gold_price_monitor::{
    Config, Database, HttpPriceFeed, MonitorLoop, MonitorResult, ObservationStore,
};

use crate::prompt::prompt_run_settings;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Low alert threshold
    #[arg(long, allow_negative_numbers = true)]
    pub low: Option<f64>,

    /// High alert threshold
    #[arg(long, allow_negative_numbers = true)]
    pub high: Option<f64>,

    /// Number of checks before stopping
    #[arg(short = 'n', long)]
    pub checks: Option<u32>,

    /// Seconds to wait after each check
    #[arg(long)]
    pub interval_secs: Option<u64>,

    /// Price feed URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Price feed request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// SQLite database path
    #[arg(short, long)]
    pub database: Option<String>,

    /// Skip TLS certificate verification for the price feed (insecure)
    #[arg(long)]
    pub accept_invalid_certs: bool,

    /// Prompt for thresholds and check count
    #[arg(short, long)]
    pub interactive: bool,
}

impl RunArgs {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply(&self, config: &mut Config) {
        if let Some(low) = self.low {
            config.monitor.low_threshold = low;
        }
        if let Some(high) = self.high {
            config.monitor.high_threshold = high;
        }
        if let Some(checks) = self.checks {
            config.monitor.checks = checks;
        }
        if let Some(secs) = self.interval_secs {
            config.monitor.interval_secs = secs;
        }
        if let Some(endpoint) = &self.endpoint {
            config.feed.endpoint = endpoint.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.feed.timeout_secs = secs;
        }
        if let Some(path) = &self.database {
            config.database.path = path.clone();
        }
        if self.accept_invalid_certs {
            config.feed.accept_invalid_certs = true;
        }
    }
}

pub async fn run_monitor(args: RunArgs, mut config: Config) -> MonitorResult<()> {
    args.apply(&mut config);

    if args.interactive {
        println!("Gold Price Monitor\n");
        let stdin = io::stdin();
        prompt_run_settings(&mut config.monitor, &mut stdin.lock(), &mut io::stdout())?;
    }

    config.validate()?;
    let monitor_config = config.monitor_config()?;

    if config.feed.accept_invalid_certs {
        warn!("⚠️  TLS certificate verification is DISABLED for {}", config.feed.endpoint);
    }

    let feed = HttpPriceFeed::new(&config.feed)?;
    let db = Database::new(&config.database.path)?;
    db.init_schema()?;
    let store = ObservationStore::new(&db);

    info!("📡 Feed: {}", feed.endpoint());
    info!("💾 Database: {}", config.database.path);
    info!("🆔 Run: {}", store.run_id());

    let mut monitor = MonitorLoop::new(monitor_config, feed, store);
    let summary = monitor.run().await;

    if summary.persist_failures > 0 {
        warn!(
            "⚠️  {} of {} observations could not be stored",
            summary.persist_failures, summary.checks
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = RunArgs {
            low: Some(2000.0),
            checks: Some(3),
            database: Some("/tmp/x.db".to_string()),
            accept_invalid_certs: true,
            ..Default::default()
        };
        let mut config = Config::default();
        args.apply(&mut config);

        assert_eq!(config.monitor.low_threshold, 2000.0);
        assert_eq!(config.monitor.high_threshold, 2600.0);
        assert_eq!(config.monitor.checks, 3);
        assert_eq!(config.database.path, "/tmp/x.db");
        assert!(config.feed.accept_invalid_certs);
    }

    #[derive(clap::Parser)]
    struct TestCli {
        #[command(flatten)]
        args: RunArgs,
    }

    #[test]
    fn test_negative_thresholds_parse_as_values() {
        use clap::Parser;

        let cli = TestCli::try_parse_from(["gold-monitor", "--low", "-5", "--high", "-1.5"]).unwrap();
        assert_eq!(cli.args.low, Some(-5.0));
        assert_eq!(cli.args.high, Some(-1.5));
    }

    #[test]
    fn test_no_flags_leave_config_alone() {
        let mut config = Config::default();
        RunArgs::default().apply(&mut config);
        assert_eq!(config, Config::default());
    }
}
