//! Food item storage and status transitions

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, OptionalExtension};

use super::{date_column, datetime_column, format_date, format_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{FoodItem, ItemStatus, NewFoodItem};

const ITEM_COLUMNS: &str = r#"
    id, user_id, name, category, purchase_date, predicted_expiry, actual_expiry,
    storage_condition, quantity, unit, is_consumed, is_wasted, created_at
"#;

fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<FoodItem> {
    let category: String = row.get(3)?;
    let storage_condition: String = row.get(7)?;
    let actual_expiry = match row.get::<_, Option<String>>(6)? {
        Some(_) => Some(date_column(row, 6)?),
        None => None,
    };

    Ok(FoodItem {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        category: category.into(),
        purchase_date: date_column(row, 4)?,
        predicted_expiry: date_column(row, 5)?,
        actual_expiry,
        storage_condition: storage_condition.into(),
        quantity: row.get(8)?,
        unit: row.get(9)?,
        is_consumed: row.get(10)?,
        is_wasted: row.get(11)?,
        created_at: datetime_column(row, 12)?,
    })
}

impl Database {
    /// Store a new item with its frozen prediction
    pub fn insert_food_item(
        &self,
        user_id: i64,
        item: &NewFoodItem,
        predicted_expiry: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        if item.name.trim().is_empty() {
            return Err(Error::InvalidData("Item name cannot be empty".into()));
        }
        if predicted_expiry < item.purchase_date {
            return Err(Error::InvalidData(format!(
                "Predicted expiry {} precedes purchase date {}",
                predicted_expiry, item.purchase_date
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO food_items (
                user_id, name, category, purchase_date, predicted_expiry,
                storage_condition, quantity, unit, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                item.name.trim(),
                item.category.as_str(),
                format_date(item.purchase_date),
                format_date(predicted_expiry),
                item.storage_condition.as_str(),
                item.quantity,
                item.unit,
                format_datetime(created_at),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    pub fn get_food_item(&self, id: i64) -> Result<Option<FoodItem>> {
        let conn = self.conn()?;
        let item = conn
            .query_row(
                &format!("SELECT {} FROM food_items WHERE id = ?", ITEM_COLUMNS),
                params![id],
                row_to_item,
            )
            .optional()?;
        Ok(item)
    }

    /// All of a user's items regardless of status, in insertion order
    pub fn list_food_items(&self, user_id: i64) -> Result<Vec<FoodItem>> {
        self.query_items(
            &format!(
                "SELECT {} FROM food_items WHERE user_id = ? ORDER BY id",
                ITEM_COLUMNS
            ),
            params![user_id],
        )
    }

    /// Items neither consumed nor wasted, in insertion order
    pub fn list_active_items(&self, user_id: i64) -> Result<Vec<FoodItem>> {
        self.query_items(
            &format!(
                r#"
                SELECT {} FROM food_items
                WHERE user_id = ? AND is_consumed = 0 AND is_wasted = 0
                ORDER BY id
                "#,
                ITEM_COLUMNS
            ),
            params![user_id],
        )
    }

    /// Active items predicted to expire on or before `cutoff`
    pub fn list_items_expiring_by(&self, user_id: i64, cutoff: NaiveDate) -> Result<Vec<FoodItem>> {
        self.query_items(
            &format!(
                r#"
                SELECT {} FROM food_items
                WHERE user_id = ? AND is_consumed = 0 AND is_wasted = 0
                  AND predicted_expiry <= ?
                ORDER BY predicted_expiry, id
                "#,
                ITEM_COLUMNS
            ),
            params![user_id, format_date(cutoff)],
        )
    }

    /// Move an active item to a terminal status
    ///
    /// Transitions are one-way: an item already consumed or wasted cannot be
    /// changed again, and nothing can be moved back to active.
    pub fn update_item_status(&self, id: i64, status: ItemStatus) -> Result<()> {
        let column = match status {
            ItemStatus::Consumed => "is_consumed",
            ItemStatus::Wasted => "is_wasted",
            ItemStatus::Active => {
                return Err(Error::InvalidTransition(format!(
                    "item {} cannot be returned to active",
                    id
                )))
            }
        };

        let conn = self.conn()?;
        let changed = conn.execute(
            &format!(
                "UPDATE food_items SET {} = 1 WHERE id = ? AND is_consumed = 0 AND is_wasted = 0",
                column
            ),
            params![id],
        )?;

        if changed == 0 {
            let current: Option<(bool, bool)> = conn
                .query_row(
                    "SELECT is_consumed, is_wasted FROM food_items WHERE id = ?",
                    params![id],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;
            return match current {
                None => Err(Error::NotFound(format!("food item {}", id))),
                Some((consumed, _)) => Err(Error::InvalidTransition(format!(
                    "item {} is already {}",
                    id,
                    if consumed { "consumed" } else { "wasted" }
                ))),
            };
        }

        tracing::debug!(item_id = id, status = %status, "Updated item status");
        Ok(())
    }

    fn query_items(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<FoodItem>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let items = stmt
            .query_map(params, row_to_item)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }
}
