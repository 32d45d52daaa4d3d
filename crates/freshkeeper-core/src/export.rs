//! CSV export of item history

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::models::FoodItem;

/// One exported row
#[derive(Debug, Serialize)]
struct ItemRow<'a> {
    id: i64,
    name: &'a str,
    category: &'a str,
    purchase_date: String,
    predicted_expiry: String,
    storage_condition: &'a str,
    quantity: f64,
    unit: &'a str,
    status: &'static str,
    created_at: String,
}

impl<'a> From<&'a FoodItem> for ItemRow<'a> {
    fn from(item: &'a FoodItem) -> Self {
        Self {
            id: item.id,
            name: &item.name,
            category: item.category.as_str(),
            purchase_date: item.purchase_date.format("%Y-%m-%d").to_string(),
            predicted_expiry: item.predicted_expiry.format("%Y-%m-%d").to_string(),
            storage_condition: item.storage_condition.as_str(),
            quantity: item.quantity,
            unit: &item.unit,
            status: item.status().as_str(),
            created_at: item.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Write `items` as CSV with a header row; returns the number of rows written
pub fn write_items_csv<W: Write>(writer: W, items: &[FoodItem]) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    for item in items {
        csv.serialize(ItemRow::from(item))?;
    }
    csv.flush()?;
    Ok(items.len())
}

/// Render `items` as a CSV string
pub fn items_to_csv(items: &[FoodItem]) -> Result<String> {
    let mut buf = Vec::new();
    write_items_csv(&mut buf, items)?;
    String::from_utf8(buf)
        .map_err(|e| crate::error::Error::InvalidData(format!("CSV is not UTF-8: {}", e)))
}
