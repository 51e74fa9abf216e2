//! Error types for the banner rotator.
//!
//! Fetch errors never reach the viewer: the rotator logs them and falls back
//! to the empty-banner rendering. They exist so sources can say what went
//! wrong in the log.

use thiserror::Error;

/// Failure while producing the slide list.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned status {0}")]
    Status(u16),

    /// IO error reading a manifest, directory or image file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload was JSON but not a slide list in any known envelope
    #[error("malformed slide payload: {0}")]
    Malformed(String),

    /// Worker thread went away without delivering a result
    #[error("fetch worker exited without a result")]
    WorkerLost,
}

/// Rejected rotator operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RotatorError {
    #[error("slide index {index} out of range for {len} slides")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("rotator is unmounted")]
    Unmounted,
}

/// Settings file problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialise settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid setting: {0}")]
    Invalid(String),
}
