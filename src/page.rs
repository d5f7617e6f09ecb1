//! Document retrieval for the news-flow page.
//!
//! The pipeline treats the rendering engine as a black box that turns a URL
//! into a queryable document. This module is that boundary: it fetches the
//! page body over HTTP and hands the raw markup back to the caller, which
//! parses it with `scraper`. A failure here means no feed can be produced
//! this run, so it is the one error in the system that propagates.

use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// Browser-adjacent user agent; the page serves a stripped shell to
/// obvious bot agents.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

const LOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Fetch the raw markup of the target page.
///
/// # Arguments
///
/// * `url` - The news-flow page to load
///
/// # Returns
///
/// The response body, or an error when the page cannot be loaded (network
/// failure, timeout, non-success status). Callers must treat that error as
/// fatal: publishing an empty feed because the source was down would
/// clobber the last good snapshot.
#[instrument(level = "info", skip_all, fields(url = %url))]
pub async fn fetch_document(url: &Url) -> Result<String, Box<dyn Error>> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(LOAD_TIMEOUT)
        .build()?;

    let body = client
        .get(url.clone())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    info!(bytes = body.len(), "Fetched page body");
    Ok(body)
}

/// Dump the raw fetched markup for selector forensics.
///
/// Purely diagnostic; the pipeline's correctness never depends on this
/// artifact, and a failure to write it is logged by the caller, not fatal.
#[instrument(level = "info", skip(body))]
pub async fn dump_debug_page(debug_dir: &str, body: &str) -> Result<(), Box<dyn Error>> {
    tokio::fs::create_dir_all(debug_dir).await?;
    let path = format!("{}/page.html", debug_dir.trim_end_matches('/'));
    tokio::fs::write(&path, body).await?;
    info!(%path, bytes = body.len(), "Wrote debug page snapshot");
    Ok(())
}
