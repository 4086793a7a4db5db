//! # Digest Index
//!
//! Generates the static landing page for a directory of daily digest issues.
//! Each issue is a standalone page (or the Markdown post it was rendered
//! from); the landing page lists every issue newest first with its date,
//! weekday, article count and sources, under a bar of summary statistics.
//!
//! ## Usage
//!
//! ```sh
//! digest_index                       # index ./src/*.html into ./src/index.html
//! digest_index -f markdown -p posts  # index posts/*.md, linking to ./src pages
//! ```
//!
//! ## Architecture
//!
//! The run is a single sequential batch:
//! 1. **Discovery**: List the issue documents in the input directory
//! 2. **Parsing**: Extract metadata from each document, skipping failures
//! 3. **Ordering**: Sort issues by publish date, newest first
//! 4. **Output**: Render and write the landing page (and optional JSON manifest)

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod generate;
mod models;
mod outputs;
mod parsers;
mod utils;

use cli::Cli;
use generate::{Outcome, generate_index};

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("digest_index starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match generate_index(&args).await? {
        Outcome::Written(summary) => info!(
            issues = summary.total_issues,
            articles = summary.total_articles,
            "Landing page generated"
        ),
        Outcome::Skipped(reason) => warn!(?reason, "Nothing to index; no output written"),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
