//! Daily aggregation and range summarization

use chrono::NaiveDate;

use crate::config::SimulationParams;
use crate::parsers::analytics::DailyCountMap;
use crate::services::carbon::co2_grams;
use crate::services::energy::{joules_to_kwh, EnergyModel};
use crate::services::tokens::tokens_per_call;
use crate::types::{
    DayProfiles, DayResult, DayTotals, Profile, ProfileMetrics, RangeSummary, Result,
};

/// Aggregator for rolling per-call estimates into daily and range totals
pub struct Aggregator;

impl Aggregator {
    /// One `DayResult` per input date, in ascending date order.
    ///
    /// Every profile appears on every day, zero-valued when that day's
    /// count is zero. A formula error for any profile aborts the whole
    /// computation; dropping the profile would understate the totals.
    pub fn daily(
        counts: &DailyCountMap,
        sim: &SimulationParams,
        model: &dyn EnergyModel,
        carbon_intensity_g_per_kwh: f64,
    ) -> Result<Vec<DayResult>> {
        let mut days = Vec::with_capacity(counts.len());

        for (&date, day_counts) in counts {
            let metrics = |profile: Profile| {
                Self::profile_metrics(
                    profile,
                    day_counts.count_for(profile),
                    sim,
                    model,
                    carbon_intensity_g_per_kwh,
                )
            };
            let translation = metrics(Profile::Translation)?;
            let completion = metrics(Profile::Completion)?;
            let chatbot = metrics(Profile::Chatbot)?;

            let mut totals = DayTotals::default();
            totals.add(&translation);
            totals.add(&completion);
            totals.add(&chatbot);

            days.push(DayResult {
                date,
                sessions: day_counts.sessions,
                profiles: DayProfiles {
                    translation,
                    completion,
                    chatbot,
                },
                totals,
            });
        }

        Ok(days)
    }

    /// Per-call estimate for one profile scaled by that day's call count
    fn profile_metrics(
        profile: Profile,
        count: u64,
        sim: &SimulationParams,
        model: &dyn EnergyModel,
        carbon_intensity_g_per_kwh: f64,
    ) -> Result<ProfileMetrics> {
        let (tokens_in, tokens_out) = tokens_per_call(profile, sim);
        let call = model.estimate_call(profile, tokens_in, tokens_out)?;

        let count = count as f64;
        let energy_j_total = call.energy_j * count;
        let energy_kwh_total = joules_to_kwh(energy_j_total);

        Ok(ProfileMetrics {
            count,
            tokens_in_per_call: tokens_in,
            tokens_out_per_call: tokens_out,
            tokens_total: (tokens_in + tokens_out) * count,
            energy_j_per_call: call.energy_j,
            energy_j_total,
            energy_kwh_total,
            co2_g_total: co2_grams(energy_kwh_total, carbon_intensity_g_per_kwh),
        })
    }

    /// Days within `[start, end]`, inclusive on both sides. Either bound
    /// may be omitted. The source sequence is left untouched.
    pub fn filter_range(
        days: &[DayResult],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Vec<DayResult> {
        days.iter()
            .filter(|day| {
                start.map_or(true, |s| day.date >= s) && end.map_or(true, |e| day.date <= e)
            })
            .cloned()
            .collect()
    }

    /// Cumulative totals over exactly the given days
    pub fn summary(days: &[DayResult]) -> RangeSummary {
        RangeSummary::from_days(days)
    }
}
