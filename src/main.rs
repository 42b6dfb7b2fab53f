use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;
use colored::Colorize;
use tracing::{error, info};

mod config;
mod scrape_permits;
mod scraping;
mod utilities;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    utilities::logging::init_logging();

    // Fatal errors are logged here once, with their whole context chain
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    // Load configuration settings
    let config = config::config::load_config().context("Failed to load configuration")?;

    let date_scraped = Local::now().date_naive();
    info!(%date_scraped, strategy = ?config.extraction.strategy, "Starting permit scrape");

    let summary = scrape_permits::scrape_permits(&config, date_scraped).await?;

    println!(
        "{}",
        format!(
            "{} rows read, {} new permits saved, {} duplicates skipped, {} rows without a permit ({} permits stored)",
            summary.rows, summary.inserted, summary.duplicates, summary.skipped, summary.stored
        )
        .green()
    );

    Ok(())
}
