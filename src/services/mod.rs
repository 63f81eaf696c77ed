//! The estimation engine: token resolution, energy formulas, carbon
//! conversion, daily aggregation and the single-request path

pub mod aggregator;
pub mod carbon;
pub mod energy;
pub mod request;
pub mod tokens;

pub use aggregator::Aggregator;
pub use energy::{CallEstimate, ComputeTimeModel, EnergyModel, TokenVolumeModel, J_PER_KWH};
pub use request::{compute_single_request, InferenceRequest, RequestEstimate, RequestEstimator};
pub use tokens::{chars_to_tokens, tokens_per_call};
