// src/motion/mod.rs - Jerk-limited point-to-point motion

pub mod case;
pub mod error;
pub mod phases;
pub mod s_curve;
pub mod sampler;

pub use case::{CaseThresholds, TrajectoryCase, classify};
pub use error::ProfileError;
pub use phases::{Phase, PhaseBoundaries};
pub use s_curve::{ConstantJerkProfile, KinematicState};
pub use sampler::{MotionPoint, sample};

use serde::{Deserialize, Serialize};

/// Kinematic limits and target displacement of a single rest-to-rest move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryParameters {
    /// Maximum jerk (units/s³)
    pub jerk_max: f64,
    /// Maximum acceleration (units/s²)
    pub acc_max: f64,
    /// Maximum velocity (units/s)
    pub v_max: f64,
    /// Displacement to travel (units)
    pub distance: f64,
}

impl TrajectoryParameters {
    pub fn new(jerk_max: f64, acc_max: f64, v_max: f64, distance: f64) -> Self {
        Self {
            jerk_max,
            acc_max,
            v_max,
            distance,
        }
    }

    /// Check that the limits are finite and positive and the distance is
    /// finite and non-negative.
    pub fn validate(&self) -> Result<(), ProfileError> {
        for (name, value) in [
            ("jerk_max", self.jerk_max),
            ("acc_max", self.acc_max),
            ("v_max", self.v_max),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ProfileError::InvalidParameters(format!(
                    "{} must be finite and > 0, got {}",
                    name, value
                )));
            }
        }
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(ProfileError::InvalidParameters(format!(
                "distance must be finite and >= 0, got {}",
                self.distance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_positive_limits() {
        assert!(TrajectoryParameters::new(2000.0, 500.0, 120.0, 100.0).validate().is_ok());
        assert!(TrajectoryParameters::new(2000.0, 500.0, 120.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            TrajectoryParameters::new(0.0, 500.0, 120.0, 100.0),
            TrajectoryParameters::new(2000.0, -1.0, 120.0, 100.0),
            TrajectoryParameters::new(2000.0, 500.0, f64::INFINITY, 100.0),
            TrajectoryParameters::new(2000.0, 500.0, 120.0, -5.0),
            TrajectoryParameters::new(2000.0, 500.0, 120.0, f64::NAN),
        ];
        for params in bad {
            assert!(
                matches!(params.validate(), Err(ProfileError::InvalidParameters(_))),
                "expected rejection for {:?}",
                params
            );
        }
    }
}
