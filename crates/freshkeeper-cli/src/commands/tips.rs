//! Preservation tip command implementation

use anyhow::Result;
use freshkeeper_core::db::Database;

pub fn cmd_tips(db: &Database, category: Option<&str>) -> Result<()> {
    let tips = db.list_preservation_tips(category)?;

    if tips.is_empty() {
        match category {
            Some(c) => println!("No tips for '{}'.", c),
            None => println!("No tips found. Run 'freshkeeper init' to seed them."),
        }
        return Ok(());
    }

    println!();
    println!("💡 Preservation Tips");
    println!("   ─────────────────────────────");

    for tip in tips {
        println!(
            "   [{}] {} {}",
            tip.food_category,
            tip.title,
            "★".repeat(tip.effectiveness_rating.clamp(0, 5) as usize)
        );
        println!("       {}", tip.content);
    }

    Ok(())
}
