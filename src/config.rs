//! # Profile Configuration
//!
//! Limits, target distance and sampling options for a single move, loaded
//! from TOML.
//!
//! ## Example: TOML Configuration
//!
//! ```toml
//! [profile]
//! jerk_max = 2000.0
//! acc_max = 500.0
//! v_max = 120.0
//! distance = 100.0
//!
//! [sampling]
//! rate_hz = 1000.0
//! format = "csv"
//! output = "move.csv"
//! ```
//!
//! Every field is optional; missing ones fall back to the defaults below.
//!
//! ## Example: Rust Usage
//!
//! ```rust
//! use scurve_rs::config::ProfileConfig;
//! let config: ProfileConfig = toml::from_str("[profile]\ndistance = 57.0").unwrap();
//! assert_eq!(config.profile.distance, 57.0);
//! assert_eq!(config.profile.jerk_max, 2000.0);
//! assert!(config.validate().is_ok());
//! ```

// src/config.rs - Single configuration file
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::motion::TrajectoryParameters;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration struct: the move to plan and how to sample it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub profile: LimitsConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
}

/// Kinematic limits and distance of the move.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    #[serde(default = "default_jerk_max")]
    pub jerk_max: f64,
    #[serde(default = "default_acc_max")]
    pub acc_max: f64,
    #[serde(default = "default_v_max")]
    pub v_max: f64,
    #[serde(default = "default_distance")]
    pub distance: f64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            jerk_max: default_jerk_max(),
            acc_max: default_acc_max(),
            v_max: default_v_max(),
            distance: default_distance(),
        }
    }
}

impl LimitsConfig {
    pub fn to_parameters(&self) -> TrajectoryParameters {
        TrajectoryParameters::new(self.jerk_max, self.acc_max, self.v_max, self.distance)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Jsonl,
}

/// Sampling options for the `scurve-sample` binary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SamplingConfig {
    #[serde(default = "default_rate_hz")]
    pub rate_hz: f64,
    #[serde(default)]
    pub format: OutputFormat,
    /// Output file; stdout when unset.
    #[serde(default)]
    pub output: Option<String>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            rate_hz: default_rate_hz(),
            format: OutputFormat::default(),
            output: None,
        }
    }
}

impl ProfileConfig {
    /// Validate limits and sampling rate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.profile
            .to_parameters()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if !self.sampling.rate_hz.is_finite() || self.sampling.rate_hz <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "Sampling rate must be > 0, got {}",
                self.sampling.rate_hz
            )));
        }
        Ok(())
    }
}

// Default value functions
fn default_jerk_max() -> f64 { 2000.0 }
fn default_acc_max() -> f64 { 500.0 }
fn default_v_max() -> f64 { 120.0 }
fn default_distance() -> f64 { 100.0 }
fn default_rate_hz() -> f64 { 1000.0 }

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: &str) -> Result<ProfileConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::error!("Failed to parse config TOML: {}", e);
                Err(ConfigError::Toml(e))
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file '{}': {}", path, e);
            Err(ConfigError::Io(e))
        }
    }
}
