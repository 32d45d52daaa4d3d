//! FreshKeeper CLI - Food expiry tracker
//!
//! Usage:
//!   freshkeeper init                          Initialize database
//!   freshkeeper add Milk --category dairy     Log an item and predict expiry
//!   freshkeeper dashboard                     What expires soon
//!   freshkeeper serve --port 3000             Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Classify { days } => commands::cmd_classify(days),
        Commands::Predict {
            category,
            storage,
            purchased,
        } => {
            let predictor = commands::load_predictor()?;
            commands::cmd_predict(&predictor, today, &category, &storage, &purchased)
        }
        Commands::Serve {
            port,
            host,
            static_dir,
            allowed_origins,
        } => {
            commands::cmd_serve(
                &cli.db,
                &host,
                port,
                cli.no_encrypt,
                static_dir.as_deref(),
                allowed_origins,
            )
            .await
        }
        Commands::Add {
            name,
            category,
            storage,
            purchased,
            quantity,
            unit,
        } => {
            let (db, user) = commands::open_session(&cli.db, cli.no_encrypt, &cli.user)?;
            let predictor = commands::load_predictor()?;
            let item = commands::ItemArgs {
                name,
                category,
                storage,
                purchased,
                quantity,
                unit,
            };
            commands::cmd_add(&db, &user, &predictor, today, item).map(|_| ())
        }
        Commands::List { all } => {
            let (db, user) = commands::open_session(&cli.db, cli.no_encrypt, &cli.user)?;
            commands::cmd_list(&db, &user, today, all)
        }
        Commands::Mark { id, status } => {
            let (db, user) = commands::open_session(&cli.db, cli.no_encrypt, &cli.user)?;
            commands::cmd_mark(&db, &user, id, &status)
        }
        Commands::Dashboard { json } => {
            let (db, user) = commands::open_session(&cli.db, cli.no_encrypt, &cli.user)?;
            commands::cmd_dashboard(&db, &user, today, json)
        }
        Commands::Analytics { sorted, json } => {
            let (db, user) = commands::open_session(&cli.db, cli.no_encrypt, &cli.user)?;
            commands::cmd_analytics(&db, &user, sorted, json)
        }
        Commands::Remind {
            include_green,
            send,
        } => {
            let (db, user) = commands::open_session(&cli.db, cli.no_encrypt, &cli.user)?;
            commands::cmd_remind(&db, &user, today, include_green, send).map(|_| ())
        }
        Commands::Tips { category } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_tips(&db, category.as_deref())
        }
        Commands::Export { output } => {
            let (db, user) = commands::open_session(&cli.db, cli.no_encrypt, &cli.user)?;
            commands::cmd_export(&db, &user, output.as_deref()).map(|_| ())
        }
    }
}
