// src/motion/error.rs - Errors raised while building or querying a profile
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// No regime of the decision table matched the given limits and distance.
    #[error(
        "No trajectory case matches limits (jerk_max={jerk_max}, acc_max={acc_max}, v_max={v_max}) and distance {distance}"
    )]
    Classification {
        jerk_max: f64,
        acc_max: f64,
        v_max: f64,
        distance: f64,
    },
    #[error("Invalid query time: {0} (must be >= 0)")]
    InvalidTime(f64),
    #[error("Invalid sample rate: {0} Hz (must be finite and > 0)")]
    InvalidSampleRate(f64),
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}
