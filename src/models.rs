//! Data models for the news-flow pipeline and its published artifacts.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawCandidate`]: An unvalidated field bag extracted from one matched DOM node
//! - [`Item`]: A canonical news entry with a stable identifier
//! - [`Feed`]: The full capped snapshot produced by one run
//! - [`Delta`]: The subset of the current [`Feed`] not present in a previous one
//!
//! [`Feed`] and [`Delta`] are the persisted artifact shapes; their snake_case
//! field names are the JSON schema contract consumed by downstream readers.

use serde::{Deserialize, Serialize};

/// A raw, unvalidated field bag extracted from one matched document node.
///
/// Every field is optional because the source markup is semi-structured and
/// any of them may be absent on a given node. Candidates live only inside a
/// single run: the extractor produces them, the normalizer consumes them.
///
/// # Fields
///
/// * `title` - Headline text, possibly truncated by the page's own layout
/// * `link` - Article URL, possibly path-relative (`/news/...`)
/// * `source` - Provider label shown next to the headline
/// * `published_raw` - Free-form timestamp text or a `datetime` attribute value
/// * `snippet` - Teaser/summary text
/// * `image` - Thumbnail URL
/// * `stable_id` - Native per-item identifier when the page exposes one
#[derive(Debug, Default, Clone)]
pub struct RawCandidate {
    /// Headline text as found on the node.
    pub title: Option<String>,
    /// Article link, possibly relative to the page origin.
    pub link: Option<String>,
    /// Provider label (e.g. the wire service that authored the story).
    pub source: Option<String>,
    /// Unparsed publication timestamp.
    pub published_raw: Option<String>,
    /// Teaser text, frequently absent in the source markup.
    pub snippet: Option<String>,
    /// Thumbnail image URL.
    pub image: Option<String>,
    /// Native per-item identifier attribute, when present.
    pub stable_id: Option<String>,
}

impl RawCandidate {
    /// A candidate missing both a title and a link carries nothing usable
    /// and is filtered out by the extractor before normalization.
    pub fn is_usable(&self) -> bool {
        self.title.is_some() || self.link.is_some()
    }
}

/// A canonical, persisted news entry.
///
/// Invariant: `id` is a pure function of `(stable_id, link, title)` so the
/// same underlying story, re-scraped on a later run, always yields the same
/// `id` even when the page layout shifted (see [`crate::normalize::item_id`]).
///
/// `title` and `link` are guaranteed non-empty: candidates lacking either are
/// dropped during normalization and never become Items.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Item {
    /// Stable identifier, identical across runs for the same story.
    pub id: String,
    /// Headline. Never empty.
    pub title: String,
    /// Absolute article URL. Never empty.
    pub link: String,
    /// Provider label; defaults to the publisher label when the page omits it.
    pub source: String,
    /// Publication time, ISO-8601 UTC. Falls back to the run timestamp when
    /// the page's value is missing or unparsable.
    pub published_at: String,
    /// Teaser text; empty string when unavailable.
    pub snippet: String,
    /// Thumbnail URL, when present.
    pub image: Option<String>,
}

/// The full capped snapshot of [`Item`]s produced by one run.
///
/// Items keep the document order of the source page (most-recent-first per
/// the page's own ordering); the pipeline never re-sorts them.
#[derive(Debug, Deserialize, Serialize)]
pub struct Feed {
    /// Run timestamp, ISO-8601 UTC.
    pub updated_at: String,
    /// Fixed label identifying the origin of this feed.
    pub source: String,
    /// Extracted items, deduplicated by id and capped.
    pub items: Vec<Item>,
}

/// The items of the current [`Feed`] whose ids were not present in the
/// previous published snapshot, in the Feed's original order.
#[derive(Debug, Deserialize, Serialize)]
pub struct Delta {
    /// Run timestamp, ISO-8601 UTC. Matches the Feed written alongside it.
    pub updated_at: String,
    /// Previously unseen items.
    pub new_items: Vec<Item>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            title: "Bitcoin climbs".to_string(),
            link: "https://example.com/news/abc".to_string(),
            source: "Reuters".to_string(),
            published_at: "2026-08-23T12:00:00Z".to_string(),
            snippet: String::new(),
            image: None,
        }
    }

    #[test]
    fn test_candidate_usability() {
        assert!(!RawCandidate::default().is_usable());
        assert!(
            RawCandidate {
                title: Some("headline".to_string()),
                ..Default::default()
            }
            .is_usable()
        );
        assert!(
            RawCandidate {
                link: Some("/news/abc".to_string()),
                ..Default::default()
            }
            .is_usable()
        );
    }

    #[test]
    fn test_feed_serialization_uses_snake_case_schema() {
        let feed = Feed {
            updated_at: "2026-08-23T12:00:00Z".to_string(),
            source: "TradingView News Flow - crypto".to_string(),
            items: vec![item("a")],
        };

        let json = serde_json::to_string(&feed).unwrap();
        assert!(json.contains("\"updated_at\""));
        assert!(json.contains("\"published_at\""));
        assert!(json.contains("\"items\""));
    }

    #[test]
    fn test_feed_deserialization() {
        let json = r#"{
            "updated_at": "2026-08-23T12:00:00Z",
            "source": "TradingView News Flow - crypto",
            "items": [{
                "id": "https://example.com/news/abc",
                "title": "Bitcoin climbs",
                "link": "https://example.com/news/abc",
                "source": "Reuters",
                "published_at": "2026-08-23T11:58:00Z",
                "snippet": "",
                "image": null
            }]
        }"#;

        let feed: Feed = serde_json::from_str(json).unwrap();
        assert_eq!(feed.items.len(), 1);
        assert_eq!(feed.items[0].id, "https://example.com/news/abc");
        assert_eq!(feed.items[0].snippet, "");
        assert!(feed.items[0].image.is_none());
    }

    #[test]
    fn test_delta_serialization_uses_new_items_key() {
        let delta = Delta {
            updated_at: "2026-08-23T12:00:00Z".to_string(),
            new_items: vec![item("a"), item("b")],
        };

        let json = serde_json::to_string(&delta).unwrap();
        assert!(json.contains("\"new_items\""));
        let back: Delta = serde_json::from_str(&json).unwrap();
        assert_eq!(back.new_items.len(), 2);
    }
}
