//! Single-request estimation (compute-time formulation)
//!
//! Instead of averaged per-profile calls, this path models one request that
//! accumulated its own input contributions. Token counting is therefore
//! request-specific, but the physical formulas are shared with
//! `ComputeTimeModel`.

use std::str::FromStr;

use serde::Serialize;

use crate::config::{HardwareParams, RegionParams, SimulationParams};
use crate::services::carbon::co2_grams;
use crate::services::energy::{joules_to_kwh, ComputeTimeModel};
use crate::services::tokens::chars_to_tokens;
use crate::types::{Profile, Result, WattrackError};

/// One request accumulating its input contributions in push order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InferenceRequest {
    input_chunks: Vec<f64>,
    output_tokens: f64,
}

impl InferenceRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a topic-sized input contribution, in characters
    pub fn push_topic(&mut self, chars: f64) -> Result<()> {
        self.push_chunk(chars)
    }

    /// Add a prompt-sized input contribution, in characters
    pub fn push_prompt(&mut self, chars: f64) -> Result<()> {
        self.push_chunk(chars)
    }

    fn push_chunk(&mut self, chars: f64) -> Result<()> {
        if chars < 0.0 {
            return Err(WattrackError::InvalidInput(format!(
                "negative input size: {chars}"
            )));
        }
        self.input_chunks.push(chars_to_tokens(chars));
        Ok(())
    }

    pub fn set_output_tokens(&mut self, tokens: f64) -> Result<()> {
        if tokens < 0.0 {
            return Err(WattrackError::InvalidInput(format!(
                "negative output size: {tokens}"
            )));
        }
        self.output_tokens = tokens;
        Ok(())
    }

    /// Total accumulated input, in tokens
    pub fn input_size(&self) -> f64 {
        self.input_chunks.iter().sum()
    }

    pub fn output_size(&self) -> f64 {
        self.output_tokens
    }
}

/// Compute time, energy and carbon for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RequestEstimate {
    pub time_s: f64,
    pub energy_j: f64,
    pub energy_kwh: f64,
    pub co2_g: f64,
}

/// Binds requests to hardware/region parameters and derives compute time,
/// energy and carbon per request
#[derive(Debug, Clone)]
pub struct RequestEstimator {
    model: ComputeTimeModel,
    carbon_intensity_g_per_kwh: f64,
}

impl RequestEstimator {
    pub fn new(hardware: HardwareParams, region: RegionParams) -> Self {
        Self {
            carbon_intensity_g_per_kwh: region.carbon_intensity_g_per_kwh,
            model: ComputeTimeModel::new(hardware, region),
        }
    }

    pub fn estimate(&self, request: &InferenceRequest) -> Result<RequestEstimate> {
        let time_s = self
            .model
            .compute_time_s(request.input_size(), request.output_size())?;
        let energy_j = self.model.energy_j_for_time(time_s);
        let energy_kwh = joules_to_kwh(energy_j);

        Ok(RequestEstimate {
            time_s,
            energy_j,
            energy_kwh,
            co2_g: co2_grams(energy_kwh, self.carbon_intensity_g_per_kwh),
        })
    }
}

/// Estimate one representative request of a named profile.
///
/// The tag is resolved strictly: names outside the known set fail, nothing
/// is substituted. The request is assembled from the same simulation
/// assumptions the daily path uses, so both paths agree on token counts.
pub fn compute_single_request(
    profile_tag: &str,
    sim: &SimulationParams,
    hardware: &HardwareParams,
    region: &RegionParams,
) -> Result<RequestEstimate> {
    let profile = Profile::from_str(profile_tag)?;

    let mut request = InferenceRequest::new();
    match profile {
        Profile::Translation => {
            request.push_topic(sim.topic_size_chars as f64)?;
            request.set_output_tokens(chars_to_tokens(sim.topic_size_chars as f64))?;
        }
        Profile::Completion => {
            request.push_topic(sim.topic_size_chars as f64)?;
            request.push_prompt(sim.prompt_size_chars as f64)?;
            request.set_output_tokens(sim.output_tokens_avg as f64)?;
        }
        Profile::Chatbot => {
            for _ in 0..sim.chatbot_avg_topics {
                request.push_topic(sim.topic_size_chars as f64)?;
            }
            for _ in 0..sim.chatbot_avg_prompts {
                request.push_prompt(sim.prompt_size_chars as f64)?;
            }
            request.set_output_tokens(sim.output_tokens_avg as f64)?;
        }
    }

    RequestEstimator::new(*hardware, *region).estimate(&request)
}
