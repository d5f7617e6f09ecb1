//! # Newsflow Feed
//!
//! Scrapes the TradingView news-flow page, normalizes each story into a
//! stable record, diffs the result against the previously published
//! snapshot, and writes the feed, the delta, and a plain-text run summary.
//!
//! ## Pipeline
//!
//! 1. **Load**: Fetch the target page (the only fatal failure point)
//! 2. **Extract**: Ordered selector strategies, first non-empty match wins
//! 3. **Normalize**: Absolute links, UTC timestamps, stable identifiers
//! 4. **Assemble**: Dedupe, cap, stamp the run timestamp
//! 5. **Diff**: Partition against the published baseline (optional)
//! 6. **Persist**: `feed.json`, `diff.json`, `scrape_summary.txt`
//!
//! The pipeline is single-pass and linear; cross-run state lives only in
//! the published `feed.json` fetched back as the diff baseline.
//!
//! ## Usage
//!
//! ```sh
//! newsflow_feed -o ./public --existing-feed-url https://example.github.io/feed.json
//! ```
//!
//! ## Exit contract
//!
//! Exit code 0 for any completed run, including one that extracted zero
//! items; non-zero when the source page cannot be loaded or an artifact
//! cannot be written. A fatal fault writes nothing, so previously
//! published artifacts are never clobbered with partial data.

use chrono::Utc;
use clap::Parser;
use scraper::Html;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

mod baseline;
mod cli;
mod extract;
mod feed;
mod models;
mod normalize;
mod outputs;
mod page;
mod utils;

use cli::Cli;
use models::Item;
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
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newsflow_feed starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.output_dir, ?args.target_url, ?args.max_items, "Parsed CLI arguments");

    // Early check: ensure the output dir is writable before spending the scrape
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let target_url = Url::parse(&args.target_url)?;

    // One run timestamp, threaded through every stage: all timestamp
    // fallbacks within a run are identical and the pipeline stays
    // deterministic under an injected clock.
    let run_ts = Utc::now();

    // ---- Load (fatal on failure: no feed can be produced) ----
    let body = page::fetch_document(&target_url).await?;

    if let Some(ref debug_dir) = args.debug_dir {
        if let Err(e) = page::dump_debug_page(debug_dir, &body).await {
            warn!(path = %debug_dir, error = %e, "Failed to write debug page snapshot");
        }
    }

    // ---- Extract ----
    let candidates = {
        let document = Html::parse_document(&body);
        extract::extract(&document, args.max_candidates)
    };
    if candidates.is_empty() {
        warn!("Extraction produced zero candidates; publishing a valid empty feed");
    } else {
        info!(count = candidates.len(), "Extracted raw candidates");
    }

    // ---- Normalize ----
    let candidate_count = candidates.len();
    let items: Vec<Item> = candidates
        .into_iter()
        .filter_map(|candidate| normalize::normalize(candidate, &target_url, run_ts))
        .collect();
    if items.len() < candidate_count {
        debug!(
            dropped = candidate_count - items.len(),
            "Dropped candidates lacking a usable title or link"
        );
    }

    // ---- Assemble ----
    let current = feed::assemble(items, run_ts, args.max_items);
    info!(items = current.items.len(), "Assembled feed snapshot");

    // ---- Diff against the published baseline ----
    let previous = baseline::fetch_existing(args.existing_feed_url.as_deref()).await;
    let delta = feed::diff(&current, previous.as_ref());

    // ---- Persist artifacts ----
    outputs::json::write_feed(&current, &args.output_dir).await?;
    outputs::json::write_delta(&delta, &args.output_dir).await?;
    outputs::summary::write_summary(
        current.items.len(),
        delta.new_items.len(),
        run_ts,
        &args.output_dir,
    )
    .await?;

    let elapsed = start_time.elapsed();
    info!(
        total_items = current.items.len(),
        new_items = delta.new_items.len(),
        ?elapsed,
        "Run complete"
    );

    Ok(())
}
