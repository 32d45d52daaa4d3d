//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use freshkeeper_server::ServerConfig;

use super::{load_predictor, open_db};

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_encrypt: bool,
    static_dir: Option<&Path>,
    allowed_origins: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting FreshKeeper web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if !allowed_origins.is_empty() {
        println!("   CORS origins: {}", allowed_origins.join(", "));
    }
    if freshkeeper_server::ReminderScheduleConfig::from_env().is_none() {
        println!("   💡 Tip: Set FRESHKEEPER_REMINDER_SCHEDULE=24 for daily reminders");
    }
    println!();
    println!("   Authentication is expected upstream; the acting user is read from");
    println!("   the X-FreshKeeper-User header (default: household).");

    let db = open_db(db_path, no_encrypt)?;
    let predictor = load_predictor()?;

    let static_dir = match static_dir {
        Some(dir) => Some(
            dir.to_str()
                .context("Static directory path is not valid UTF-8")?,
        ),
        None => None,
    };

    let config = ServerConfig { allowed_origins };

    freshkeeper_server::serve(db, host, port, static_dir, config, predictor).await
}
