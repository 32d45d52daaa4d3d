//! CSV export command implementation

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use freshkeeper_core::db::Database;
use freshkeeper_core::export::write_items_csv;
use freshkeeper_core::models::User;

/// Export all of the user's items; returns the number of rows written
pub fn cmd_export(db: &Database, user: &User, output: Option<&Path>) -> Result<usize> {
    let items = db.list_food_items(user.id)?;

    let count = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let count = write_items_csv(BufWriter::new(file), &items)
                .context("Failed to write CSV")?;
            println!("📤 Exported {} item(s) to {}", count, path.display());
            count
        }
        None => write_items_csv(std::io::stdout().lock(), &items)
            .context("Failed to write CSV")?,
    };

    Ok(count)
}
