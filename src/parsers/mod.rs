//! Parsers for external analytics exports

pub mod analytics;

pub use analytics::{parse_daily_counts, DailyCountMap};
