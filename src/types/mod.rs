//! Type definitions for wattrack

mod error;
mod estimate;

pub use error::*;
pub use estimate::*;
