//! Preservation tip operations

use rusqlite::params;

use super::Database;
use crate::error::Result;
use crate::models::PreservationTip;

/// Starter tips: (category, title, content, rating)
const SAMPLE_TIPS: &[(&str, &str, &str, i64)] = &[
    (
        "fruits",
        "Keep Bananas Fresh Longer",
        "Wrap banana stems in plastic wrap to slow ripening. Store bananas away from other fruits.",
        4,
    ),
    (
        "vegetables",
        "Revive Wilted Greens",
        "Soak wilted lettuce and herbs in ice water for 10-15 minutes to restore crispness.",
        5,
    ),
    (
        "dairy",
        "Freeze Milk Before Expiry",
        "Milk can be frozen up to 3 months. Thaw in refrigerator and shake well before use.",
        3,
    ),
];

impl Database {
    /// Insert the starter tips if the table is empty; returns rows inserted
    pub fn seed_preservation_tips(&self) -> Result<usize> {
        let conn = self.conn()?;
        let existing: i64 =
            conn.query_row("SELECT COUNT(*) FROM preservation_tips", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(0);
        }

        for (category, title, content, rating) in SAMPLE_TIPS {
            conn.execute(
                r#"
                INSERT INTO preservation_tips (food_category, tip_title, tip_content, effectiveness_rating)
                VALUES (?, ?, ?, ?)
                "#,
                params![category, title, content, rating],
            )?;
        }

        tracing::debug!(count = SAMPLE_TIPS.len(), "Seeded preservation tips");
        Ok(SAMPLE_TIPS.len())
    }

    /// List tips, best rated first, optionally for one category
    pub fn list_preservation_tips(&self, category: Option<&str>) -> Result<Vec<PreservationTip>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, food_category, tip_title, tip_content, effectiveness_rating
            FROM preservation_tips
            WHERE ?1 IS NULL OR food_category = lower(?1)
            ORDER BY effectiveness_rating DESC, id
            "#,
        )?;

        let tips = stmt
            .query_map(params![category], |row| {
                Ok(PreservationTip {
                    id: row.get(0)?,
                    food_category: row.get(1)?,
                    title: row.get(2)?,
                    content: row.get(3)?,
                    effectiveness_rating: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(tips)
    }
}
