//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, open_user, load_predictor)
//! - `export` - CSV export of item history
//! - `items` - Item commands (add, list, mark)
//! - `reminders` - Reminder preview and dispatch
//! - `reports` - Dashboard, analytics, classify, predict
//! - `serve` - Web server command
//! - `tips` - Preservation tips

pub mod core;
pub mod export;
pub mod items;
pub mod reminders;
pub mod reports;
pub mod serve;
pub mod tips;

// Re-export command functions for main.rs
pub use core::*;
pub use export::*;
pub use items::*;
pub use reminders::*;
pub use reports::*;
pub use serve::*;
pub use tips::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
