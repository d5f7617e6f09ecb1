//! Best-effort retrieval of the previously published feed snapshot.
//!
//! The baseline is optional by contract: a first run has none, a hosting
//! hiccup may hide it, and a malformed body is treated the same as an
//! absent one. Every failure path collapses to `None` with a warning, and
//! the diff engine degrades to "everything is new". Nothing here may abort
//! the run.

use crate::models::Feed;
use std::time::Duration;
use tracing::{info, instrument, warn};

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetch the previously published `feed.json`, if one is reachable.
///
/// # Arguments
///
/// * `url` - Public URL of the current published feed, when configured
///
/// # Returns
///
/// The parsed previous [`Feed`], or `None` when no URL is configured, the
/// fetch fails, the status is non-success, or the body does not parse as a
/// feed.
#[instrument(level = "info", skip_all, fields(configured = url.is_some()))]
pub async fn fetch_existing(url: Option<&str>) -> Option<Feed> {
    let url = url?;

    let client = match reqwest::Client::builder().timeout(FETCH_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Could not build baseline fetch client");
            return None;
        }
    };

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(%url, error = %e, "Baseline fetch failed; diff will report everything as new");
            return None;
        }
    };

    if !response.status().is_success() {
        warn!(%url, status = %response.status(), "Baseline fetch returned non-success status");
        return None;
    }

    match response.json::<Feed>().await {
        Ok(feed) => {
            info!(%url, items = feed.items.len(), "Fetched previous feed snapshot");
            Some(feed)
        }
        Err(e) => {
            warn!(%url, error = %e, "Previous feed body is not a valid feed; ignoring baseline");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_baseline_is_absent() {
        assert!(fetch_existing(None).await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_baseline_url_is_absent_not_an_error() {
        let result = fetch_existing(Some("not a url")).await;
        assert!(result.is_none());
    }
}
