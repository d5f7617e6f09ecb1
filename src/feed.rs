//! Snapshot assembly and diffing against the previously published feed.
//!
//! Both operations are pure: they take the run timestamp and the optional
//! baseline as arguments and never touch the clock, the network, or the
//! filesystem. Cross-run state lives only in the externally published
//! `feed.json` the diff receives as its baseline.

use crate::models::{Delta, Feed, Item};
use chrono::{DateTime, SecondsFormat, Utc};
use itertools::Itertools;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Fixed origin label stamped on every published feed.
pub const FEED_SOURCE_LABEL: &str = "TradingView News Flow - crypto";

/// Assemble normalized items into the run's [`Feed`] snapshot.
///
/// Items are deduplicated by id (first occurrence wins) and truncated to
/// `max_items`, keeping document order. The page lists stories
/// most-recent-first, so taking the front approximates "most recent N";
/// the assembler never re-sorts.
pub fn assemble(items: Vec<Item>, run_ts: DateTime<Utc>, max_items: usize) -> Feed {
    let total = items.len();
    let items: Vec<Item> = items
        .into_iter()
        .unique_by(|item| item.id.clone())
        .take(max_items)
        .collect();

    if items.len() < total {
        debug!(
            before = total,
            after = items.len(),
            max_items,
            "Deduplicated and capped items"
        );
    }

    Feed {
        updated_at: run_ts.to_rfc3339_opts(SecondsFormat::Secs, true),
        source: FEED_SOURCE_LABEL.to_string(),
        items,
    }
}

/// Partition the current feed against a previous snapshot.
///
/// Returns the [`Delta`] of items whose ids were not present in the
/// baseline, preserving the current feed's order. An absent baseline
/// (first run, fetch failure, malformed shape) means every item is
/// reported as new; a missing baseline must never block publication,
/// it only makes the delta larger.
///
/// Membership is a hash set over baseline ids, so the whole diff is
/// O(previous + current).
pub fn diff(current: &Feed, previous: Option<&Feed>) -> Delta {
    let known: HashSet<&str> = match previous {
        Some(prev) => prev.items.iter().map(|item| item.id.as_str()).collect(),
        None => {
            warn!("No previous snapshot available; reporting every item as new");
            HashSet::new()
        }
    };

    let new_items: Vec<Item> = current
        .items
        .iter()
        .filter(|item| !known.contains(item.id.as_str()))
        .cloned()
        .collect();

    info!(
        total = current.items.len(),
        known = known.len(),
        new = new_items.len(),
        "Computed feed delta"
    );

    Delta {
        updated_at: current.updated_at.clone(),
        new_items,
    }
}
