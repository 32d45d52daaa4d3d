//! Report command implementations

use anyhow::Result;
use chrono::NaiveDate;
use freshkeeper_core::db::Database;
use freshkeeper_core::models::{AlertTier, FoodCategory, StorageCondition, User};
use freshkeeper_core::{build_dashboard, classify, parse_purchase_date, summarize, ExpiryPredictor};

use super::truncate;

fn tier_icon(tier: AlertTier) -> &'static str {
    match tier {
        AlertTier::Expired => "🔴",
        AlertTier::Expiring => "🟡",
        AlertTier::Safe => "🟢",
    }
}

pub fn cmd_dashboard(db: &Database, user: &User, today: NaiveDate, json: bool) -> Result<()> {
    let items = db.list_active_items(user.id)?;
    let stats = build_dashboard(&items, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│        🥬 FreshKeeper Dashboard         │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Active items:    {}", stats.total_items);
    println!("  Expiring soon:   {}", stats.items_expiring_soon);
    println!();

    for entry in &stats.expiring_soon {
        println!(
            "  {} {:<24} {} ({} days left)",
            tier_icon(entry.tier),
            truncate(&entry.item.name, 24),
            entry.item.predicted_expiry,
            entry.days_left
        );
    }

    if stats.items_expiring_soon > 0 {
        println!();
        println!("  Run 'freshkeeper tips' for ways to keep food fresh longer.");
    }

    Ok(())
}

pub fn cmd_analytics(db: &Database, user: &User, sorted: bool, json: bool) -> Result<()> {
    let items = db.list_food_items(user.id)?;
    let mut summary = summarize(&items);
    if sorted {
        summary.monthly = summary.monthly.sorted();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("📊 Waste Analytics for {}", user.username);
    println!("   ─────────────────────────────");
    println!("   Total items:     {}", summary.total_items);
    println!("   Consumed:        {}", summary.consumed_items);
    println!("   Wasted:          {}", summary.wasted_items);
    println!("   Waste rate:      {:.1}%", summary.waste_percentage);

    if summary.integrity_violations > 0 {
        println!(
            "   ⚠️  {} item(s) flagged both consumed and wasted",
            summary.integrity_violations
        );
    }

    if !summary.monthly.is_empty() {
        println!();
        println!("   {:<8} {:>6} {:>7}", "Month", "Total", "Wasted");
        for bucket in summary.monthly.iter() {
            println!("   {:<8} {:>6} {:>7}", bucket.month, bucket.total, bucket.wasted);
        }
    }

    Ok(())
}

pub fn cmd_classify(days: i64) -> Result<()> {
    let tier = classify(days);
    println!("{} {} ({} days)", tier_icon(tier), tier.label(), days);
    Ok(())
}

pub fn cmd_predict(
    predictor: &ExpiryPredictor,
    today: NaiveDate,
    category: &str,
    storage: &str,
    purchased: &str,
) -> Result<()> {
    let purchase_date = parse_purchase_date(purchased, today)?;
    let category: FoodCategory = category.to_string().into();
    let storage: StorageCondition = storage.to_string().into();

    let expiry = predictor.predict(&category, &storage, purchase_date, today);

    println!("🔮 {} stored {}", category, storage);
    println!("   Purchased: {}", purchase_date);
    println!("   Expires:   {}", expiry);
    println!("   Table:     {}", predictor.strategy_name());

    Ok(())
}
