//! Candidate normalization into canonical [`Item`] records.
//!
//! All field defaulting lives here, in one place, so the normalization
//! contract is auditable:
//!
//! | field          | fallback                                            |
//! |----------------|-----------------------------------------------------|
//! | `link`         | path-absolute `/...` resolved against the page base; malformed values pass through unchanged |
//! | `published_at` | the injected run timestamp when missing/unparsable  |
//! | `source`       | the fixed publisher label                           |
//! | `snippet`      | empty string                                        |
//! | `id`           | native stable id, else link, else SHA-256(title+link) |
//!
//! The run timestamp is injected by the caller rather than read from the
//! wall clock here, so every fallback within one run carries the identical
//! value and the whole stage is deterministic under test.

use crate::models::{Item, RawCandidate};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};
use tracing::debug;
use url::Url;

/// Source label applied to items whose node carries no provider element.
pub const PUBLISHER_LABEL: &str = "TradingView";

/// Convert a raw candidate into a canonical [`Item`].
///
/// Returns `None` when the candidate lacks a title or a link: such
/// candidates cannot satisfy the Item invariants and are dropped here
/// rather than producing a half-formed record.
///
/// # Arguments
///
/// * `candidate` - Raw field bag from the extractor
/// * `base_url` - The scraped page's URL, used to resolve path-absolute links
/// * `run_ts` - The single run timestamp, used as the published-at fallback
pub fn normalize(candidate: RawCandidate, base_url: &Url, run_ts: DateTime<Utc>) -> Option<Item> {
    let title = candidate.title?;
    let link = resolve_link(candidate.link?, base_url);

    let published_at = match candidate.published_raw.as_deref().and_then(parse_published) {
        Some(ts) => ts.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => {
            // Documented fallback policy: an absent or unparsable timestamp
            // takes the run timestamp, not a parse failure.
            if let Some(raw) = &candidate.published_raw {
                debug!(%raw, "Unparsable published timestamp; using run timestamp");
            }
            run_ts.to_rfc3339_opts(SecondsFormat::Secs, true)
        }
    };

    let id = item_id(candidate.stable_id.as_deref(), &link, &title);

    Some(Item {
        id,
        title,
        link,
        source: candidate
            .source
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| PUBLISHER_LABEL.to_string()),
        published_at,
        snippet: candidate.snippet.unwrap_or_default(),
        image: candidate.image,
    })
}

/// Compute the stable identifier for an item.
///
/// Priority order, first available wins:
/// 1. the native per-item identifier exposed by the source document,
/// 2. the absolute link URL itself,
/// 3. lowercase-hex SHA-256 over title + link.
///
/// Native and link identity are preferred over hashing because a hash over
/// the title breaks identity the moment the page edits a headline (a typo
/// fix would make a stable story reappear as "new"). The hash branch only
/// applies when neither is available.
pub fn item_id(stable_id: Option<&str>, link: &str, title: &str) -> String {
    if let Some(native) = stable_id.filter(|s| !s.is_empty()) {
        return native.to_string();
    }
    if !link.is_empty() {
        return link.to_string();
    }
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(link.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Resolve a path-absolute link against the page base URL.
///
/// Anything that does not start with `/` is already absolute (or at least
/// not ours to fix) and passes through unchanged; a malformed value must
/// not abort the run over a single field.
fn resolve_link(link: String, base_url: &Url) -> String {
    if !link.starts_with('/') {
        return link;
    }
    match base_url.join(&link) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            debug!(%link, error = %e, "Failed to resolve relative link; keeping as-is");
            link
        }
    }
}

/// Parse a free-form published marker into a UTC timestamp.
///
/// Tries, in order: RFC 3339 (the `<time datetime>` attribute shape),
/// RFC 2822, a naive `YYYY-MM-DDTHH:MM:SS` (assumed UTC), and a bare date.
/// Human-relative text like "2 hours ago" parses as none of these and falls
/// through to the caller's run-timestamp fallback.
fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}
