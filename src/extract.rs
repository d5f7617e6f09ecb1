//! Candidate extraction from the loaded news-flow document.
//!
//! The news-flow markup changes between TradingView deployments, so the
//! extractor does not hard-code one selector. It keeps an ordered table of
//! [`Strategy`] values, most specific first, and uses the first strategy
//! whose query matches at least one node. Results are never merged across
//! strategies: the same story frequently matches more than one pattern and
//! merging would double-count it.
//!
//! Matching nothing at all is a legitimate outcome (the markup changed
//! entirely); the extractor returns an empty set and the run still publishes
//! a valid empty feed.

use crate::models::RawCandidate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};

/// One way the current markup might shape a news item node.
struct Strategy {
    /// Short name used in logs to record which markup shape matched.
    name: &'static str,
    selector: Selector,
}

/// Ordered strategy table, most specific structural marker first.
///
/// The `data-id` variant is tried before its plain counterpart because a
/// native per-item identifier is the most reliable identity source the page
/// can offer. The bare anchor pattern is the last-resort fallback when the
/// item containers were renamed but article links still exist.
static STRATEGIES: Lazy<Vec<Strategy>> = Lazy::new(|| {
    vec![
        Strategy {
            name: "news-feed-item-with-id",
            selector: Selector::parse(".tv-news-feed__item[data-id]").unwrap(),
        },
        Strategy {
            name: "news-feed-item",
            selector: Selector::parse(".tv-news-feed__item").unwrap(),
        },
        Strategy {
            name: "widget-news-item",
            selector: Selector::parse(".tv-widget-news__item").unwrap(),
        },
        Strategy {
            name: "feed-item",
            selector: Selector::parse(".tv-feed__item").unwrap(),
        },
        Strategy {
            name: "news-anchor-fallback",
            selector: Selector::parse("a[href^='/news/']").unwrap(),
        },
    ]
});

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static SOURCE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".tv-news-feed__source, .tv-widget-news__source, .provider").unwrap()
});
static TIME: Lazy<Selector> =
    Lazy::new(|| Selector::parse("time, .tv-widget-news__time, .tv-news-feed__time").unwrap());
static SNIPPET: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".tv-widget-news__summary, .summary, .tv-news-feed__subtitle").unwrap()
});
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Extract raw candidates from a loaded document.
///
/// Evaluates the strategy table in order and maps each node matched by the
/// first non-empty strategy to a [`RawCandidate`], in document order,
/// truncated to `max_candidates`. Candidates missing both title and link are
/// filtered out before returning.
///
/// # Arguments
///
/// * `document` - The parsed news-flow page
/// * `max_candidates` - Cap on nodes considered before filtering
///
/// # Returns
///
/// Candidates in document order. An empty vector means no strategy matched;
/// that is a degraded-but-valid result, not an error.
#[instrument(level = "info", skip(document))]
pub fn extract(document: &Html, max_candidates: usize) -> Vec<RawCandidate> {
    for strategy in STRATEGIES.iter() {
        let nodes: Vec<ElementRef> = document.select(&strategy.selector).collect();
        if nodes.is_empty() {
            continue;
        }
        debug!(
            strategy = strategy.name,
            matched = nodes.len(),
            "Selector strategy matched"
        );

        let candidates: Vec<RawCandidate> = nodes
            .into_iter()
            .take(max_candidates)
            .map(candidate_from_node)
            .filter(RawCandidate::is_usable)
            .collect();

        debug!(
            strategy = strategy.name,
            usable = candidates.len(),
            "Extracted candidates"
        );
        return candidates;
    }

    warn!("No selector strategy matched anything; the source markup may have changed");
    Vec::new()
}

/// Map one matched node to a raw field bag.
///
/// Field lookups are all best-effort: a missing sub-element leaves the field
/// `None` and the normalizer applies the documented default later.
fn candidate_from_node(node: ElementRef) -> RawCandidate {
    let anchor = if node.value().name() == "a" {
        Some(node)
    } else {
        node.select(&ANCHOR).next()
    };

    // The visible headline is often ellipsized by the page layout, so a
    // tooltip/overflow attribute wins over inner text when present.
    let title = anchor
        .and_then(|a| a.value().attr("title").map(str::to_string))
        .or_else(|| node.value().attr("aria-label").map(str::to_string))
        .and_then(non_empty)
        .or_else(|| anchor.and_then(|a| non_empty(text_of(a))))
        .or_else(|| non_empty(first_line(&text_of(node))));

    let link = anchor
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
        .and_then(non_empty);

    let source = node.select(&SOURCE).next().and_then(|e| non_empty(text_of(e)));

    // Machine-readable `datetime` beats the human-readable "2 hours ago" text.
    let published_raw = node.select(&TIME).next().and_then(|t| {
        t.value()
            .attr("datetime")
            .map(str::to_string)
            .and_then(non_empty)
            .or_else(|| non_empty(text_of(t)))
    });

    let snippet = node
        .select(&SNIPPET)
        .next()
        .and_then(|e| non_empty(text_of(e)));

    let image = node
        .select(&IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string)
        .and_then(non_empty);

    let stable_id = node
        .value()
        .attr("data-id")
        .map(str::to_string)
        .and_then(non_empty);

    RawCandidate {
        title,
        link,
        source,
        published_raw,
        snippet,
        image,
        stable_id,
    }
}

/// Collapse runs of whitespace in an element's text into single spaces.
fn text_of(element: ElementRef) -> String {
    let joined = element.text().collect::<Vec<_>>().join(" ");
    WHITESPACE.replace_all(joined.trim(), " ").to_string()
}

fn first_line(s: &str) -> String {
    s.lines().next().unwrap_or("").trim().to_string()
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
