//! Input and result types for the estimation engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::WattrackError;

/// Generative-AI interaction category with distinct token-sizing rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    Translation,
    Completion,
    Chatbot,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Translation, Profile::Completion, Profile::Chatbot];

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Translation => "translation",
            Profile::Completion => "completion",
            Profile::Chatbot => "chatbot",
        }
    }
}

impl FromStr for Profile {
    type Err = WattrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "translation" => Ok(Profile::Translation),
            "completion" => Ok(Profile::Completion),
            "chatbot" => Ok(Profile::Chatbot),
            other => Err(WattrackError::UnknownProfile(other.to_string())),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Call counts observed for one date. Absent profiles are zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyCounts {
    pub chatbots: u64,
    pub completions: u64,
    pub translations: u64,
    pub sessions: u64,
}

impl DailyCounts {
    pub fn count_for(&self, profile: Profile) -> u64 {
        match profile {
            Profile::Translation => self.translations,
            Profile::Completion => self.completions,
            Profile::Chatbot => self.chatbots,
        }
    }
}

/// Computed result for one profile on one day
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileMetrics {
    pub count: f64,
    pub tokens_in_per_call: f64,
    pub tokens_out_per_call: f64,
    pub tokens_total: f64,
    pub energy_j_per_call: f64,
    pub energy_j_total: f64,
    pub energy_kwh_total: f64,
    pub co2_g_total: f64,
}

/// Per-profile breakdown for one day, all profiles always present
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DayProfiles {
    pub translation: ProfileMetrics,
    pub completion: ProfileMetrics,
    pub chatbot: ProfileMetrics,
}

/// Day totals summed across the three profiles
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DayTotals {
    pub tokens_total: f64,
    pub energy_j_total: f64,
    pub energy_kwh_total: f64,
    pub co2_g_total: f64,
}

impl DayTotals {
    pub fn add(&mut self, metrics: &ProfileMetrics) {
        self.tokens_total += metrics.tokens_total;
        self.energy_j_total += metrics.energy_j_total;
        self.energy_kwh_total += metrics.energy_kwh_total;
        self.co2_g_total += metrics.co2_g_total;
    }
}

/// Aggregated result for one date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayResult {
    pub date: NaiveDate,
    pub sessions: u64,
    pub profiles: DayProfiles,
    pub totals: DayTotals,
}

/// Cumulative totals over a date window
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RangeSummary {
    pub tokens_total: f64,
    pub energy_j_total: f64,
    pub energy_kwh_total: f64,
    pub co2_g_total: f64,
}

impl RangeSummary {
    /// Sum day totals over exactly the given days. Empty input yields the
    /// all-zero summary.
    pub fn from_days(days: &[DayResult]) -> Self {
        let mut summary = Self::default();
        for day in days {
            summary.tokens_total += day.totals.tokens_total;
            summary.energy_j_total += day.totals.energy_j_total;
            summary.energy_kwh_total += day.totals.energy_kwh_total;
            summary.co2_g_total += day.totals.co2_g_total;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_day(year: i32, month: u32, day: u32, tokens: f64, co2: f64) -> DayResult {
        DayResult {
            date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            sessions: 0,
            profiles: DayProfiles::default(),
            totals: DayTotals {
                tokens_total: tokens,
                energy_j_total: tokens * 10.0,
                energy_kwh_total: tokens * 10.0 / 3_600_000.0,
                co2_g_total: co2,
            },
        }
    }

    #[test]
    fn test_profile_round_trip() {
        for profile in Profile::ALL {
            assert_eq!(profile.as_str().parse::<Profile>().unwrap(), profile);
        }
    }

    #[test]
    fn test_profile_unknown_tag() {
        let err = "summarization".parse::<Profile>().unwrap_err();
        assert!(matches!(err, WattrackError::UnknownProfile(tag) if tag == "summarization"));
    }

    #[test]
    fn test_profile_tag_is_case_sensitive() {
        assert!("Translation".parse::<Profile>().is_err());
    }

    #[test]
    fn test_daily_counts_lookup() {
        let counts = DailyCounts {
            chatbots: 3,
            completions: 7,
            translations: 11,
            sessions: 20,
        };
        assert_eq!(counts.count_for(Profile::Chatbot), 3);
        assert_eq!(counts.count_for(Profile::Completion), 7);
        assert_eq!(counts.count_for(Profile::Translation), 11);
    }

    #[test]
    fn test_day_totals_add() {
        let mut totals = DayTotals::default();
        totals.add(&ProfileMetrics {
            count: 2.0,
            tokens_total: 100.0,
            energy_j_total: 50.0,
            energy_kwh_total: 0.5,
            co2_g_total: 5.0,
            ..Default::default()
        });
        totals.add(&ProfileMetrics {
            count: 1.0,
            tokens_total: 10.0,
            energy_j_total: 5.0,
            energy_kwh_total: 0.05,
            co2_g_total: 0.5,
            ..Default::default()
        });

        assert!((totals.tokens_total - 110.0).abs() < f64::EPSILON);
        assert!((totals.energy_j_total - 55.0).abs() < f64::EPSILON);
        assert!((totals.energy_kwh_total - 0.55).abs() < f64::EPSILON);
        assert!((totals.co2_g_total - 5.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_range_summary_empty() {
        let summary = RangeSummary::from_days(&[]);
        assert!((summary.tokens_total - 0.0).abs() < f64::EPSILON);
        assert!((summary.energy_j_total - 0.0).abs() < f64::EPSILON);
        assert!((summary.energy_kwh_total - 0.0).abs() < f64::EPSILON);
        assert!((summary.co2_g_total - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_range_summary_sums_days() {
        let days = vec![
            make_day(2025, 1, 1, 1000.0, 0.4),
            make_day(2025, 1, 2, 500.0, 0.2),
            make_day(2025, 1, 3, 250.0, 0.1),
        ];
        let summary = RangeSummary::from_days(&days);

        assert!((summary.tokens_total - 1750.0).abs() < f64::EPSILON);
        assert!((summary.co2_g_total - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_day_result_serializes_date_as_iso() {
        let day = make_day(2025, 8, 12, 1.0, 0.0);
        let json = serde_json::to_string(&day).unwrap();
        assert!(json.contains("\"date\":\"2025-08-12\""));
    }
}
