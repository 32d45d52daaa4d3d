//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// FreshKeeper - Track food expiry and cut household waste
#[derive(Parser)]
#[command(name = "freshkeeper")]
#[command(about = "Self-hosted food expiry tracker and waste analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "freshkeeper.db", global = true)]
    pub db: PathBuf,

    /// Household user to act as (created on first use)
    #[arg(short, long, default_value = "household", global = true)]
    pub user: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set FRESHKEEPER_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// Treat this date (YYYY-MM-DD) as today instead of the system clock
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and seed preservation tips
    Init,

    /// Log a food item and predict its expiry date
    Add {
        /// Item name
        name: String,

        /// Food category: dairy, meat, vegetables, fruits, grains, canned (others allowed)
        #[arg(short, long)]
        category: String,

        /// Storage condition: refrigerated, frozen, pantry, room_temp (others allowed)
        #[arg(short, long, default_value = "refrigerated")]
        storage: String,

        /// Purchase date YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        purchased: Option<String>,

        /// Quantity
        #[arg(short, long, default_value = "1")]
        quantity: f64,

        /// Unit for the quantity
        #[arg(long, default_value = "pcs")]
        unit: String,
    },

    /// List items (active only unless --all)
    List {
        /// Include consumed and wasted items
        #[arg(short, long)]
        all: bool,
    },

    /// Mark an item consumed or wasted
    Mark {
        /// Item ID
        id: i64,

        /// New status: consumed, wasted
        status: String,
    },

    /// Show active items and what expires within three days
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show waste totals and the monthly series
    Analytics {
        /// Order months chronologically
        #[arg(long)]
        sorted: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the alert tier for a number of days remaining
    Classify {
        /// Days until expiry (negative when already past)
        #[arg(allow_negative_numbers = true)]
        days: i64,
    },

    /// Preview a predicted expiry date without storing anything
    Predict {
        /// Food category
        category: String,

        /// Storage condition
        storage: String,

        /// Purchase date YYYY-MM-DD
        purchased: String,
    },

    /// Compose expiry reminders for the user's active items
    Remind {
        /// Also include items with more than 30 days left
        #[arg(long)]
        include_green: bool,

        /// Dispatch the reminders (to the log) instead of only printing them
        #[arg(long)]
        send: bool,
    },

    /// Show preservation tips
    Tips {
        /// Only tips for this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Export the user's item history as CSV
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory with static files to serve (web UI)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Allowed CORS origins (comma-separated)
        #[arg(long, value_delimiter = ',')]
        allowed_origins: Vec<String>,
    },
}
