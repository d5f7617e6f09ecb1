//! Plain-text run summary for line-oriented external tooling.
//!
//! CI reads `scrape_summary.txt` with grep-shaped tools, so the format is
//! exactly one `KEY=value` pair per line with a trailing newline:
//!
//! ```text
//! TOTAL_ITEMS=40
//! NEW_ITEMS=3
//! GENERATED_AT=2026-08-23T12:00:00Z
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Render the summary body.
///
/// Kept separate from the writer so the line format is testable without
/// touching the filesystem.
pub fn format_summary(total_items: usize, new_items: usize, run_ts: DateTime<Utc>) -> String {
    format!(
        "TOTAL_ITEMS={}\nNEW_ITEMS={}\nGENERATED_AT={}\n",
        total_items,
        new_items,
        run_ts.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

/// Write the run summary to `{output_dir}/scrape_summary.txt`.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_summary(
    total_items: usize,
    new_items: usize,
    run_ts: DateTime<Utc>,
    output_dir: &str,
) -> Result<(), Box<dyn Error>> {
    let path = format!("{}/scrape_summary.txt", output_dir.trim_end_matches('/'));
    fs::write(&path, format_summary(total_items, new_items, run_ts)).await?;
    info!(path = %path, total_items, new_items, "Wrote run summary");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_summary_is_key_value_lines() {
        let ts = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        let body = format_summary(40, 3, ts);

        assert_eq!(
            body,
            "TOTAL_ITEMS=40\nNEW_ITEMS=3\nGENERATED_AT=2026-08-23T12:00:00Z\n"
        );
    }

    #[test]
    fn test_summary_lines_parse_as_key_value() {
        let ts = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        let body = format_summary(0, 0, ts);

        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let (key, value) = line.split_once('=').unwrap();
            assert!(!key.is_empty());
            assert!(!value.is_empty());
        }
        assert!(body.ends_with('\n'));
    }

    #[test]
    fn test_empty_run_summary() {
        let ts = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        let body = format_summary(0, 0, ts);
        assert!(body.starts_with("TOTAL_ITEMS=0\nNEW_ITEMS=0\n"));
    }
}
