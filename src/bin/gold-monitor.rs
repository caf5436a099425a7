// Gold Price Monitor - CLI
// Samples XAU/USD, classifies against alert thresholds, stores every check

use clap::{Parser, Subcommand};
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use gold_price_monitor::{Config, MonitorError, MonitorResult};

// Load command modules from cli directory
#[path = "../cli/prompt.rs"]
mod prompt;
#[path = "../cli/run_commands.rs"]
mod run_commands;
#[path = "../cli/history_commands.rs"]
mod history_commands;

use run_commands::RunArgs;

const DEFAULT_CONFIG_PATH: &str = "monitor.toml";

#[derive(Parser)]
#[command(name = "gold-monitor")]
#[command(version)]
#[command(about = "XAU/USD price threshold monitor", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path [default: monitor.toml, optional]
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Run a bounded number of price checks
    Run(RunArgs),

    /// Show the most recent stored observations
    History {
        /// Number of rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Print one JSON object per line
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = execute(cli).await {
        error!(category = e.category(), "❌ {}", e.user_message());
        std::process::exit(1);
    }
}

async fn execute(cli: Cli) -> MonitorResult<()> {
    match cli.command {
        Commands::Init { force } => {
            let path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
            init_config(path, force)
        }
        Commands::Run(args) => {
            let config = load_config(cli.config.as_deref())?;
            run_commands::run_monitor(args, config).await
        }
        Commands::History { limit, json } => {
            let config = load_config(cli.config.as_deref())?;
            history_commands::show_history(limit, json, &config)
        }
    }
}

/// An explicitly named config must exist; the default one is optional
fn load_config(path: Option<&str>) -> MonitorResult<Config> {
    match path {
        Some(path) => {
            if !Path::new(path).exists() {
                return Err(MonitorError::ConfigNotFound(path.to_string()));
            }
            info!("📁 Config: {}", path);
            Ok(Config::from_file(path)?)
        }
        None => Ok(Config::load_or_default(DEFAULT_CONFIG_PATH)?),
    }
}

fn init_config(path: &str, force: bool) -> MonitorResult<()> {
    if Path::new(path).exists() && !force {
        warn!("⚠️  {} already exists, skipping (use --force to overwrite)", path);
        return Ok(());
    }

    Config::default().to_file(path)?;
    info!("📝 Created {}", path);
    info!("💡 Next: gold-monitor run --checks 10");
    Ok(())
}
