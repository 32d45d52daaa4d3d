//! FreshKeeper Core Library
//!
//! Shared functionality for the FreshKeeper food expiry tracker:
//! - Expiry prediction from a versioned shelf-life table
//! - Alert tiers for remaining shelf-life
//! - Dashboard aggregation over active items
//! - Waste analytics with a sparse monthly series
//! - Expiry reminder composition with pluggable delivery
//! - Database access (users, food items, preservation tips, audit log)
//! - CSV export of item history

pub mod alert;
pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod predict;
pub mod reminders;

pub use alert::classify;
pub use analytics::summarize;
pub use config::ShelfLifeTable;
pub use dashboard::build_dashboard;
pub use db::{AuditEntry, Database};
pub use error::{Error, Result};
pub use models::parse_purchase_date;
pub use predict::{predict, ExpiryPredictor, ExpiryStrategy, ItemFeatures};
pub use reminders::{
    compose_reminders, dispatch, DispatchReport, LogSink, NotificationSink, ReminderLevel,
    ReminderNotice,
};
