//! Command-line interface definitions for the feed generator.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The URLs can also be provided via environment variables, which is how the
//! scheduled CI job configures the run.

use clap::Parser;

/// Default page to scrape: the TradingView news flow filtered to crypto.
pub const DEFAULT_TARGET_URL: &str = "https://br.tradingview.com/news-flow/?market=crypto";

/// Command-line arguments for the news-flow feed generator.
///
/// # Examples
///
/// ```sh
/// # Write artifacts into the current directory
/// newsflow_feed
///
/// # Diff against the published feed and write elsewhere
/// newsflow_feed -o ./public --existing-feed-url https://example.github.io/feed.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory where feed.json, diff.json, and scrape_summary.txt are written
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// News-flow page to scrape
    #[arg(long, env = "TARGET_URL", default_value = DEFAULT_TARGET_URL)]
    pub target_url: String,

    /// Public URL of the currently published feed.json, used as the diff baseline
    #[arg(long, env = "EXISTING_FEED_URL")]
    pub existing_feed_url: Option<String>,

    /// Maximum number of items kept in the published feed
    #[arg(long, default_value_t = 40)]
    pub max_items: usize,

    /// Maximum number of DOM nodes considered before filtering
    #[arg(long, default_value_t = 60)]
    pub max_candidates: usize,

    /// When set, dump the raw fetched page into this directory for selector debugging
    #[arg(long)]
    pub debug_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["newsflow_feed"]);

        assert_eq!(cli.output_dir, ".");
        assert_eq!(cli.target_url, DEFAULT_TARGET_URL);
        assert!(cli.existing_feed_url.is_none());
        assert_eq!(cli.max_items, 40);
        assert_eq!(cli.max_candidates, 60);
        assert!(cli.debug_dir.is_none());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "newsflow_feed",
            "-o",
            "/tmp/out",
            "--existing-feed-url",
            "https://example.com/feed.json",
            "--max-items",
            "10",
        ]);

        assert_eq!(cli.output_dir, "/tmp/out");
        assert_eq!(
            cli.existing_feed_url.as_deref(),
            Some("https://example.com/feed.json")
        );
        assert_eq!(cli.max_items, 10);
    }
}
