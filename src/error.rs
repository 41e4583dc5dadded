//! Error types for the RAID calculator
//!
//! The capacity model itself is infallible; these errors cover input parsing,
//! comparison files and the advisory service.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the RAID calculator
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (or JSON) document could not be parsed
    #[error("Failed to parse configuration document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration input
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Comparison set has the wrong number of entries
    #[error("Comparison requires between 1 and {max} configurations, got {count}")]
    ComparisonSize { count: usize, max: usize },

    // =========================================================================
    // Advisory Service Errors
    // =========================================================================
    /// No credential configured for the advisory service
    #[error("Advisory service credential is not configured")]
    MissingCredential,

    /// Advisory service connection error
    #[error("Advisory service connection error: {0}")]
    AdvisorConnection(#[source] reqwest::Error),

    /// Advisory service returned an unusable response
    #[error("Advisory service response error: {0}")]
    AdvisorResponse(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
