//! # News Digest
//!
//! Crawls a fixed set of tech news homepages, picks out articles about
//! information security, cloud, hackers and infrastructure by keyword,
//! summarizes them, and emails a dated HTML digest.
//!
//! ## Usage
//!
//! ```sh
//! news_digest ./digests
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Indexing**: Fetch each source homepage and collect same-site links
//! 2. **Fetching**: Download each new, non-noise link (sequentially)
//! 3. **Processing**: Parse title/body, classify by keyword, summarize
//! 4. **Output**: Render the HTML digest, write it, then email it
//!
//! A failed fetch only skips that source or link. Failing to write the
//! digest or to deliver it ends the run with an error; delivery is only
//! attempted after the file is on disk.

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod classify;
mod cli;
mod config;
mod error;
mod mailer;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod summarize;
mod utils;

use cli::Cli;
use config::{CrawlProfile, Settings};
use outputs::{html, json};
use pipeline::Pipeline;
use scrapers::fetch::HttpFetcher;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_digest starting up");

    // A missing .env is normal; the OS environment still applies.
    if let Ok(path) = dotenvy::dotenv() {
        debug!(path = %path.display(), "Loaded .env");
    }

    let args = Cli::parse();
    debug!(?args.output_dir, ?args.config, ?args.json_output_dir, "Parsed CLI arguments");

    let settings = Settings::from_env();
    info!(
        timeout_secs = settings.timeout_secs,
        max_links_per_source = settings.max_links_per_source,
        "Loaded settings"
    );
    let profile = CrawlProfile::load(args.config.as_deref()).await?;

    // Fail on an unusable output directory before crawling.
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Crawl ----
    let fetcher = HttpFetcher::new(Duration::from_secs(settings.timeout_secs))?;
    let items = Pipeline::new(&fetcher, &profile, settings.max_links_per_source)
        .run()
        .await;

    // ---- Render & write ----
    let digest = html::render(&items);
    let html_path = args.output_dir.join(&digest.filename);
    info!(path = %html_path.display(), items = items.len(), "Writing HTML digest");
    tokio::fs::write(&html_path, &digest.html).await?;

    if let Some(ref json_dir) = args.json_output_dir {
        if let Err(e) = json::write_items(&items, &digest, json_dir).await {
            error!(error = %e, "Failed to write JSON items");
        }
    }

    // ---- Deliver ----
    if args.no_email {
        info!("Email delivery disabled");
        println!("Gerado: {}", html_path.display());
    } else {
        mailer::send_digest(&settings.smtp, &digest).await?;
        println!("Gerado e enviado: {}", html_path.display());
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
