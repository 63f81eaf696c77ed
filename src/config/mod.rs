//! Typed configuration with documented defaults
//!
//! Every parameter the engine consumes is loaded once into plain structs,
//! validated, and passed by reference into each computation. There is no
//! process-wide cache: the caller owns the `Config` it loaded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{Result, WattrackError};

/// Assumptions converting real-world content sizes into token counts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SimulationParams {
    /// Average size of one documentation topic, in characters
    pub topic_size_chars: u64,
    /// Average size of one user prompt, in characters
    pub prompt_size_chars: u64,
    /// Topics pulled into context over one chatbot conversation
    pub chatbot_avg_topics: u64,
    /// User turns per chatbot conversation
    pub chatbot_avg_prompts: u64,
    /// Average generated output for completion/chatbot calls, in tokens
    pub output_tokens_avg: u64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            topic_size_chars: 2000,
            prompt_size_chars: 400,
            chatbot_avg_topics: 10,
            chatbot_avg_prompts: 2,
            output_tokens_avg: 300,
        }
    }
}

/// Grid emission factor applied when no region is selected
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CarbonParams {
    pub carbon_intensity_g_per_kwh: f64,
}

impl Default for CarbonParams {
    fn default() -> Self {
        Self {
            carbon_intensity_g_per_kwh: 250.0,
        }
    }
}

/// Physical compute parameters for one hardware tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HardwareParams {
    pub power_gpu_w: f64,
    pub power_cpu_w: f64,
    /// Fraction of inference compute time attributed to the CPU.
    /// The GPU share is the complement.
    pub cpu_time_share: f64,
    /// Declared model throughput used to convert token volume into time
    pub tokens_per_hour: f64,
}

impl Default for HardwareParams {
    fn default() -> Self {
        Self {
            power_gpu_w: 700.0,
            power_cpu_w: 70.0,
            cpu_time_share: 0.15,
            tokens_per_hour: 216_000.0, // 60 tokens/s
        }
    }
}

impl HardwareParams {
    pub fn gpu_time_share(&self) -> f64 {
        1.0 - self.cpu_time_share
    }

    /// Power draw weighted by the GPU/CPU time split, in watts
    pub fn blended_power_w(&self) -> f64 {
        self.power_gpu_w * self.gpu_time_share() + self.power_cpu_w * self.cpu_time_share
    }

    pub fn tokens_per_second(&self) -> f64 {
        self.tokens_per_hour / 3600.0
    }
}

/// Datacenter efficiency and grid context for one region
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegionParams {
    /// Power Usage Effectiveness, total facility draw over IT draw
    pub pue: f64,
    pub utilization_rate: f64,
    pub carbon_intensity_g_per_kwh: f64,
}

impl Default for RegionParams {
    fn default() -> Self {
        Self {
            pue: 1.3,
            utilization_rate: 1.0,
            carbon_intensity_g_per_kwh: 250.0,
        }
    }
}

impl RegionParams {
    /// PUE and utilization applied on top of inference energy
    pub fn infrastructure_multiplier(&self) -> f64 {
        self.pue * self.utilization_rate
    }
}

/// File locations the CLI reads data from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub analytics_yaml: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            analytics_yaml: PathBuf::from("data/analytics.yaml"),
        }
    }
}

/// Full configuration, loaded once per invocation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub simulation: SimulationParams,
    pub carbon: CarbonParams,
    pub hardware: BTreeMap<String, HardwareParams>,
    pub regions: BTreeMap<String, RegionParams>,
}

impl Default for Config {
    fn default() -> Self {
        let mut hardware = BTreeMap::new();
        hardware.insert("default".to_string(), HardwareParams::default());
        Self {
            paths: PathsConfig::default(),
            simulation: SimulationParams::default(),
            carbon: CarbonParams::default(),
            hardware,
            regions: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load a config YAML, falling back to full defaults when the file is
    /// absent. Missing keys take their documented defaults. The result is
    /// validated before it is returned.
    pub fn load(path: &Path) -> Result<Config> {
        let config = if path.exists() {
            let content = fs::read_to_string(path)?;
            Self::from_yaml_str(&content)?
        } else {
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Config> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| WattrackError::Config(format!("invalid config yaml: {e}")))?;
        match value {
            serde_yaml::Value::Null => Ok(Config::default()),
            value if value.is_mapping() => serde_yaml::from_value(value)
                .map_err(|e| WattrackError::Config(format!("invalid config yaml: {e}"))),
            _ => Err(WattrackError::Config(
                "config top level must be a mapping".into(),
            )),
        }
    }

    /// Reject out-of-range parameters once at load time, so the formula
    /// layer never sees a division hazard.
    pub fn validate(&self) -> Result<()> {
        if self.carbon.carbon_intensity_g_per_kwh < 0.0
            || !self.carbon.carbon_intensity_g_per_kwh.is_finite()
        {
            return Err(WattrackError::Config(format!(
                "carbon_intensity_g_per_kwh must be a non-negative number, got {}",
                self.carbon.carbon_intensity_g_per_kwh
            )));
        }

        for (tier, hw) in &self.hardware {
            if hw.power_gpu_w < 0.0 || hw.power_cpu_w < 0.0 {
                return Err(WattrackError::Config(format!(
                    "hardware tier '{tier}': power draw must be non-negative"
                )));
            }
            if !(0.0..=1.0).contains(&hw.cpu_time_share) {
                return Err(WattrackError::Config(format!(
                    "hardware tier '{tier}': cpu_time_share must be within [0, 1], got {}",
                    hw.cpu_time_share
                )));
            }
            if hw.tokens_per_hour <= 0.0 || !hw.tokens_per_hour.is_finite() {
                return Err(WattrackError::InvalidParameter(format!(
                    "hardware tier '{tier}': tokens_per_hour must be positive, got {}",
                    hw.tokens_per_hour
                )));
            }
        }

        for (name, region) in &self.regions {
            if region.pue < 1.0 {
                return Err(WattrackError::Config(format!(
                    "region '{name}': pue must be >= 1, got {}",
                    region.pue
                )));
            }
            if region.utilization_rate < 0.0 || region.carbon_intensity_g_per_kwh < 0.0 {
                return Err(WattrackError::Config(format!(
                    "region '{name}': utilization_rate and carbon intensity must be non-negative"
                )));
            }
        }

        Ok(())
    }

    /// Region lookup. Once a region was explicitly requested there is no
    /// fallback: absent names fail.
    pub fn region(&self, name: &str) -> Result<&RegionParams> {
        self.regions
            .get(name)
            .ok_or_else(|| WattrackError::UnknownRegion(name.to_string()))
    }

    pub fn hardware(&self, tier: &str) -> Result<&HardwareParams> {
        self.hardware
            .get(tier)
            .ok_or_else(|| WattrackError::Config(format!("unknown hardware tier: {tier}")))
    }

    /// `config/config.yaml` relative to the working directory, falling back
    /// to `~/.wattrack/config.yaml` when the local file is absent.
    pub fn default_path() -> PathBuf {
        let local = PathBuf::from("config/config.yaml");
        if local.exists() {
            return local;
        }
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".wattrack").join("config.yaml"))
            .unwrap_or(local)
    }
}
