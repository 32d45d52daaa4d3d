//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod analytics;
pub mod audit;
pub mod dashboard;
pub mod engine;
pub mod items;
pub mod reminders;
pub mod tips;

// Re-export all handlers for use in router
pub use analytics::*;
pub use audit::*;
pub use dashboard::*;
pub use engine::*;
pub use items::*;
pub use reminders::*;
pub use tips::*;
