use thiserror::Error;

/// wattrack error types
#[derive(Error, Debug)]
pub enum WattrackError {
    /// Configuration source malformed or inconsistent
    #[error("config error: {0}")]
    Config(String),

    /// Failed to parse analytics YAML
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Profile tag outside the known set
    #[error("unknown profile: {0}")]
    UnknownProfile(String),

    /// Negative size/count or malformed date, with the offending value
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Parameter that would make a formula divide by zero
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Region absent from configuration
    #[error("unknown region: {0}")]
    UnknownRegion(String),
}

/// Result type alias for wattrack
pub type Result<T> = std::result::Result<T, WattrackError>;
