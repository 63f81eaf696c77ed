use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::config::{Config, HardwareParams, RegionParams};
use crate::parsers::analytics;
use crate::services::{
    compute_single_request, Aggregator, ComputeTimeModel, EnergyModel, TokenVolumeModel,
};
use crate::types::{DayResult, RangeSummary};

/// Token, energy & CO2 estimator for generative-AI usage analytics
#[derive(Parser)]
#[command(name = "wattrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration YAML (default: config/config.yaml, then ~/.wattrack/)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Analytics YAML, overriding the configured path
    #[arg(long, global = true)]
    analytics: Option<PathBuf>,

    /// Region whose grid parameters apply (lowercase name from the config)
    #[arg(long, global = true)]
    region: Option<String>,

    /// Hardware tier from the config
    #[arg(long, global = true, default_value = "default")]
    hardware: String,

    /// Energy model used for the daily computation
    #[arg(long, global = true, value_enum, default_value_t = ModelArg::TokenVolume)]
    model: ModelArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModelArg {
    /// Fitted token-volume formulas
    TokenVolume,
    /// Compute-time and power-draw formulation
    ComputeTime,
}

#[derive(Subcommand)]
enum Commands {
    /// Full-period summary with the effective parameters
    Summary,

    /// Report for a single date
    Daily {
        /// Date to report (YYYY-MM-DD)
        date: NaiveDate,
    },

    /// Days and cumulative totals within an inclusive date window
    Range {
        /// Start date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// End date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Estimate one representative request of a profile
    Request {
        /// Profile tag: translation, completion or chatbot
        #[arg(long)]
        profile: String,
    },
}

/// Effective parameters echoed back with summary output
#[derive(Serialize)]
struct ParamsEcho {
    topic_size_chars: u64,
    prompt_size_chars: u64,
    chatbot_avg_topics: u64,
    chatbot_avg_prompts: u64,
    output_tokens_avg: u64,
    carbon_intensity_g_per_kwh: f64,
    analytics_yaml: String,
}

#[derive(Serialize)]
struct SummaryReport {
    config: ParamsEcho,
    summary: RangeSummary,
}

#[derive(Serialize)]
struct RangeWindow {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

#[derive(Serialize)]
struct RangeReport {
    range: RangeWindow,
    summary: RangeSummary,
    days: Vec<DayResult>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config_path = self.config.clone().unwrap_or_else(Config::default_path);
        let config = Config::load(&config_path)?;

        let hardware = *config.hardware(&self.hardware)?;
        let (region, carbon_intensity) = match &self.region {
            Some(name) => {
                let region = *config.region(name)?;
                (region, region.carbon_intensity_g_per_kwh)
            }
            None => (
                RegionParams::default(),
                config.carbon.carbon_intensity_g_per_kwh,
            ),
        };

        match &self.command {
            Commands::Request { profile } => {
                let estimate =
                    compute_single_request(profile, &config.simulation, &hardware, &region)?;
                print_json(&estimate)
            }
            Commands::Summary => {
                let days = self.daily_results(&config, hardware, region, carbon_intensity)?;
                print_json(&SummaryReport {
                    config: ParamsEcho {
                        topic_size_chars: config.simulation.topic_size_chars,
                        prompt_size_chars: config.simulation.prompt_size_chars,
                        chatbot_avg_topics: config.simulation.chatbot_avg_topics,
                        chatbot_avg_prompts: config.simulation.chatbot_avg_prompts,
                        output_tokens_avg: config.simulation.output_tokens_avg,
                        carbon_intensity_g_per_kwh: carbon_intensity,
                        analytics_yaml: self.analytics_path(&config).display().to_string(),
                    },
                    summary: Aggregator::summary(&days),
                })
            }
            Commands::Daily { date } => {
                let days = self.daily_results(&config, hardware, region, carbon_intensity)?;
                match days.iter().find(|day| day.date == *date) {
                    Some(day) => print_json(day),
                    None => anyhow::bail!("no analytics for date: {date}"),
                }
            }
            Commands::Range { start, end } => {
                let days = self.daily_results(&config, hardware, region, carbon_intensity)?;
                let filtered = Aggregator::filter_range(&days, *start, *end);
                print_json(&RangeReport {
                    range: RangeWindow {
                        start: *start,
                        end: *end,
                    },
                    summary: Aggregator::summary(&filtered),
                    days: filtered,
                })
            }
        }
    }

    fn analytics_path(&self, config: &Config) -> PathBuf {
        self.analytics
            .clone()
            .unwrap_or_else(|| config.paths.analytics_yaml.clone())
    }

    fn daily_results(
        &self,
        config: &Config,
        hardware: HardwareParams,
        region: RegionParams,
        carbon_intensity: f64,
    ) -> anyhow::Result<Vec<DayResult>> {
        let counts = analytics::parse_daily_counts(&self.analytics_path(config))?;
        let model: Box<dyn EnergyModel> = match self.model {
            ModelArg::TokenVolume => Box::new(TokenVolumeModel::new(hardware)),
            ModelArg::ComputeTime => Box::new(ComputeTimeModel::new(hardware, region)),
        };
        let days = Aggregator::daily(&counts, &config.simulation, model.as_ref(), carbon_intensity)?;
        Ok(days)
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
