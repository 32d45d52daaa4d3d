//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `open_user` / `open_session` - Resolve the acting household user
//! - `load_predictor` - Build the predictor from the shelf-life table
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use freshkeeper_core::models::User;
use freshkeeper_core::{db::Database, ExpiryPredictor, ShelfLifeTable};

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Look up the acting user, creating it on first use
pub fn open_user(db: &Database, username: &str) -> Result<User> {
    db.ensure_user(username)
        .with_context(|| format!("Failed to resolve user '{}'", username))
}

/// Open the database and resolve the acting user
pub fn open_session(db_path: &Path, no_encrypt: bool, username: &str) -> Result<(Database, User)> {
    let db = open_db(db_path, no_encrypt)?;
    let user = open_user(&db, username)?;
    Ok((db, user))
}

/// Predictor over the shelf-life table (local override if present)
pub fn load_predictor() -> Result<ExpiryPredictor> {
    let table = ShelfLifeTable::load().context("Failed to load shelf-life table")?;
    tracing::debug!(version = %table.version, "Loaded shelf-life table");
    Ok(ExpiryPredictor::with_table(table))
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;

    let seeded = db
        .seed_preservation_tips()
        .context("Failed to seed preservation tips")?;
    if seeded > 0 {
        println!("   Seeded {} preservation tips", seeded);
    }

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Log an item: freshkeeper add Milk --category dairy");
    println!("  2. Start web UI: freshkeeper serve");

    Ok(())
}
