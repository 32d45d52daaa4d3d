//! Item command implementations (add, list, mark)

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use freshkeeper_core::db::Database;
use freshkeeper_core::models::{ItemStatus, NewFoodItem, User};
use freshkeeper_core::{classify, parse_purchase_date, ExpiryPredictor};

use super::truncate;

/// Arguments for logging a new item
#[derive(Debug, Clone)]
pub struct ItemArgs {
    pub name: String,
    pub category: String,
    pub storage: String,
    /// `YYYY-MM-DD`; today when absent
    pub purchased: Option<String>,
    pub quantity: f64,
    pub unit: String,
}

pub fn cmd_add(
    db: &Database,
    user: &User,
    predictor: &ExpiryPredictor,
    today: NaiveDate,
    args: ItemArgs,
) -> Result<i64> {
    if args.name.trim().is_empty() {
        anyhow::bail!("Item name cannot be empty");
    }
    if !args.quantity.is_finite() || args.quantity < 0.0 {
        anyhow::bail!("Quantity must be zero or more (got {})", args.quantity);
    }
    let purchase_date = match args.purchased.as_deref() {
        Some(raw) => parse_purchase_date(raw, today)?,
        None => today,
    };

    let item = NewFoodItem {
        name: args.name.trim().to_string(),
        category: args.category.into(),
        purchase_date,
        storage_condition: args.storage.into(),
        quantity: args.quantity,
        unit: args.unit,
    };

    let expiry = predictor.predict(
        &item.category,
        &item.storage_condition,
        item.purchase_date,
        today,
    );

    let id = db
        .insert_food_item(user.id, &item, expiry, Utc::now())
        .context("Failed to store item")?;

    let days_left = (expiry - today).num_days();
    println!("✅ Added {} (#{})", item.name, id);
    println!("   Category:  {} ({})", item.category, item.storage_condition);
    println!("   Purchased: {}", item.purchase_date);
    println!(
        "   Expires:   {} ({} days left, {})",
        expiry,
        days_left,
        classify(days_left).label()
    );

    Ok(id)
}

pub fn cmd_list(db: &Database, user: &User, today: NaiveDate, all: bool) -> Result<()> {
    let items = if all {
        db.list_food_items(user.id)?
    } else {
        db.list_active_items(user.id)?
    };

    if items.is_empty() {
        println!("No items found. Log one with:");
        println!("  freshkeeper add Milk --category dairy");
        return Ok(());
    }

    println!();
    println!(
        "🥫 {} for {}",
        if all { "All items" } else { "Active items" },
        user.username
    );
    println!(
        "   {:>4}  {:<24} {:<12} {:<10} {:>5}  {}",
        "ID", "Name", "Category", "Expires", "Days", "Status"
    );
    println!("   {}", "─".repeat(72));

    for item in &items {
        let days_left = item.days_left(today);
        let status = if item.is_active() {
            classify(days_left).label().to_string()
        } else {
            item.status().to_string()
        };
        println!(
            "   {:>4}  {:<24} {:<12} {:<10} {:>5}  {}",
            item.id,
            truncate(&item.name, 24),
            truncate(item.category.as_str(), 12),
            item.predicted_expiry,
            days_left,
            status
        );
    }

    println!();
    println!("   {} item(s)", items.len());

    Ok(())
}

pub fn cmd_mark(db: &Database, user: &User, id: i64, status: &str) -> Result<()> {
    let status: ItemStatus = status.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    if status == ItemStatus::Active {
        anyhow::bail!("Status must be consumed or wasted");
    }

    let item = db
        .get_food_item(id)?
        .filter(|item| item.user_id == user.id)
        .with_context(|| format!("Item {} not found", id))?;

    db.update_item_status(id, status)
        .with_context(|| format!("Cannot mark {} as {}", item.name, status))?;

    match status {
        ItemStatus::Wasted => println!("🗑️  Marked {} (#{}) as wasted", item.name, id),
        _ => println!("✅ Marked {} (#{}) as {}", item.name, id, status),
    }

    Ok(())
}
