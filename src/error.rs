// ================================
// src/error.rs - error types for the forward distance pipeline
// ================================
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DistanceError {
    /// Scan did not carry the configured number of beams.
    #[error("invalid sample length: expected {expected} ranges, got {actual}")]
    InvalidSampleLength { expected: usize, actual: usize },

    /// Distance cannot be compared against the safe band (NaN).
    #[error("invalid distance: {0}")]
    InvalidDistance(f32),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("publish error: {0}")]
    Publish(String),
}

impl From<toml::de::Error> for DistanceError {
    fn from(e: toml::de::Error) -> Self {
        DistanceError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DistanceError>;
