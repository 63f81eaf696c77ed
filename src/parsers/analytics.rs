//! Parser for the daily analytics YAML export
//!
//! The export groups dated count entries per interaction profile:
//!
//! ```yaml
//! genai:
//!   chatbots:
//!     - {date: 2025-08-12, count: 14}
//!   completions:
//!     - {date: 2025-08-12, count: 210}
//!   translations:
//!     - {date: 2025-08-12, count: 36}
//! session:
//!   sessions:
//!     - {date: 2025-08-12, count: 450}
//! ```
//!
//! Sections carry free-form metadata next to the lists (descriptions,
//! export notes), so profile values that are not lists are skipped rather
//! than fatal. A malformed date or a negative count inside a well-formed
//! entry is a hard error: dropping it would silently understate usage.

use chrono::NaiveDate;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::types::{DailyCounts, Result, WattrackError};

/// Per-date call counts, ascending by date
pub type DailyCountMap = BTreeMap<NaiveDate, DailyCounts>;

/// Read and parse the analytics YAML at `path`
pub fn parse_daily_counts(path: &Path) -> Result<DailyCountMap> {
    let content = fs::read_to_string(path)?;
    parse_daily_counts_str(&content)
}

/// Parse analytics YAML content into per-date counts
pub fn parse_daily_counts_str(content: &str) -> Result<DailyCountMap> {
    let root: Value = serde_yaml::from_str(content)
        .map_err(|e| WattrackError::Parse(format!("invalid analytics yaml: {e}")))?;
    if !root.is_mapping() {
        return Err(WattrackError::Parse(
            "analytics top level must be a mapping".into(),
        ));
    }

    let mut out = DailyCountMap::new();

    if let Some(genai) = root.get("genai") {
        if !genai.is_mapping() {
            return Err(WattrackError::Parse(
                "analytics 'genai' section must be a mapping".into(),
            ));
        }
        ingest(genai.get("chatbots"), "chatbots", &mut out, |c, n| {
            c.chatbots += n
        })?;
        ingest(genai.get("completions"), "completions", &mut out, |c, n| {
            c.completions += n
        })?;
        ingest(genai.get("translations"), "translations", &mut out, |c, n| {
            c.translations += n
        })?;
    }

    if let Some(session) = root.get("session") {
        ingest(session.get("sessions"), "sessions", &mut out, |c, n| {
            c.sessions += n
        })?;
    }

    Ok(out)
}

/// Fold one profile's dated entries into the count map. Entries repeated
/// for the same date accumulate.
fn ingest<F>(section: Option<&Value>, label: &str, out: &mut DailyCountMap, add: F) -> Result<()>
where
    F: Fn(&mut DailyCounts, u64),
{
    // Absent or non-list sections (e.g. a description string) are skipped.
    let Some(items) = section.and_then(Value::as_sequence) else {
        return Ok(());
    };

    for item in items {
        if !item.is_mapping() {
            eprintln!("[wattrack] Warning: skipping malformed '{label}' entry (not a mapping)");
            continue;
        }

        let date = match item.get("date") {
            Some(value) => parse_date(value)?,
            None => {
                eprintln!("[wattrack] Warning: skipping '{label}' entry without a date");
                continue;
            }
        };

        let count = match item.get("count") {
            Some(value) => match value.as_i64() {
                Some(n) if n < 0 => {
                    return Err(WattrackError::InvalidInput(format!(
                        "negative count for '{label}' on {date}: {n}"
                    )));
                }
                Some(n) => n as u64,
                None => {
                    eprintln!(
                        "[wattrack] Warning: skipping '{label}' entry on {date} (count is not an integer)"
                    );
                    continue;
                }
            },
            None => 0,
        };

        add(out.entry(date).or_default(), count);
    }

    Ok(())
}

fn parse_date(value: &Value) -> Result<NaiveDate> {
    let text = value
        .as_str()
        .ok_or_else(|| WattrackError::InvalidInput(format!("malformed date: {value:?}")))?;
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| WattrackError::InvalidInput(format!("malformed date: {text:?}")))
}
