//! JSON artifact writers for `feed.json` and `diff.json`.
//!
//! Both files are pretty-printed so the published artifacts stay diffable
//! in hosting UIs. Writing happens only after the whole pipeline has
//! completed; a fatal fault earlier in the run leaves the previously
//! published files untouched.

use crate::models::{Delta, Feed};
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Write the [`Feed`] snapshot to `{output_dir}/feed.json`.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_feed(feed: &Feed, output_dir: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(feed)?;
    let path = format!("{}/feed.json", output_dir.trim_end_matches('/'));
    fs::write(&path, json).await?;
    info!(path = %path, items = feed.items.len(), "Wrote feed snapshot");
    Ok(())
}

/// Write the [`Delta`] to `{output_dir}/diff.json`.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_delta(delta: &Delta, output_dir: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(delta)?;
    let path = format!("{}/diff.json", output_dir.trim_end_matches('/'));
    fs::write(&path, json).await?;
    info!(path = %path, new_items = delta.new_items.len(), "Wrote feed delta");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    #[test]
    fn test_feed_json_shape_matches_contract() {
        let feed = Feed {
            updated_at: "2026-08-23T12:00:00Z".to_string(),
            source: "TradingView News Flow - crypto".to_string(),
            items: vec![Item {
                id: "https://example.com/news/abc".to_string(),
                title: "Bitcoin climbs".to_string(),
                link: "https://example.com/news/abc".to_string(),
                source: "Reuters".to_string(),
                published_at: "2026-08-23T10:00:00Z".to_string(),
                snippet: String::new(),
                image: None,
            }],
        };

        let json = serde_json::to_string_pretty(&feed).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["updated_at"].is_string());
        assert!(value["source"].is_string());
        assert_eq!(value["items"].as_array().unwrap().len(), 1);
        assert!(value["items"][0]["published_at"].is_string());
    }

    #[test]
    fn test_delta_json_shape_matches_contract() {
        let delta = Delta {
            updated_at: "2026-08-23T12:00:00Z".to_string(),
            new_items: vec![],
        };

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string_pretty(&delta).unwrap()).unwrap();
        assert!(value["updated_at"].is_string());
        assert_eq!(value["new_items"].as_array().unwrap().len(), 0);
    }
}
