// History command implementation
use std::path::Path;
use tracing::info;

use gold_price_monitor::{Config, Database, MonitorResult, ObservationStore};

pub fn show_history(limit: usize, json: bool, config: &Config) -> MonitorResult<()> {
    let path = &config.database.path;
    if !Path::new(path).exists() {
        info!("📭 No observations yet ({} does not exist)", path);
        return Ok(());
    }

    let db = Database::new(path)?;
    db.init_schema()?;
    let store = ObservationStore::new(&db);
    let rows = store.list_recent(limit)?;

    if json {
        for row in &rows {
            println!("{}", serde_json::to_string(row)?);
        }
        return Ok(());
    }

    info!("📋 Last {} observations", rows.len());
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for row in &rows {
        let obs = &row.observation;
        info!(
            "  #{} {} {:>10.2} {:<6}{}",
            row.id,
            obs.timestamp.format("%Y-%m-%d %H:%M:%S"),
            obs.price,
            obs.status.as_str(),
            if obs.used_fallback { " (fallback)" } else { "" }
        );
    }
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("Total stored: {}", store.count()?);

    Ok(())
}
