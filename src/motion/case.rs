// src/motion/case.rs - Kinematic regime classification
use serde::{Deserialize, Serialize};
use std::fmt;

use super::TrajectoryParameters;
use super::error::ProfileError;

/// The six kinematic regimes a rest-to-rest move can fall into.
///
/// Cases 1 and 3 share the same timing formulas, as do cases 2 and 4. They are
/// kept distinct because they are reached through different branches of the
/// decision table.
#[allow(clippy::enum_variant_names)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrajectoryCase {
    /// `v_max < v_a`, `s >= s_a`: cruises at `v_max`, acceleration peaks below `acc_max`.
    Case1,
    /// `v_max >= v_a`, `s < s_a`: neither limit is held.
    Case2,
    /// `v_max < v_a`, `s_v <= s < s_a`: same timing as case 1.
    Case3,
    /// `v_max < v_a`, `s < s_v`: same timing as case 2.
    Case4,
    /// Both `acc_max` and `v_max` are held.
    Case5,
    /// `acc_max` is held, `v_max` is never reached.
    Case6,
}

impl TrajectoryCase {
    pub const ALL: [TrajectoryCase; 6] = [
        TrajectoryCase::Case1,
        TrajectoryCase::Case2,
        TrajectoryCase::Case3,
        TrajectoryCase::Case4,
        TrajectoryCase::Case5,
        TrajectoryCase::Case6,
    ];

    /// Case label in `1..=6`.
    pub fn number(self) -> u8 {
        match self {
            TrajectoryCase::Case1 => 1,
            TrajectoryCase::Case2 => 2,
            TrajectoryCase::Case3 => 3,
            TrajectoryCase::Case4 => 4,
            TrajectoryCase::Case5 => 5,
            TrajectoryCase::Case6 => 6,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|case| case.number() == number)
    }

    /// Whether the move plateaus at `acc_max`. The plateau is zero-length when
    /// `v_max == v_a` or the distance sits exactly on `s_a`.
    pub fn holds_max_acceleration(self) -> bool {
        matches!(self, TrajectoryCase::Case5 | TrajectoryCase::Case6)
    }

    /// Whether the move cruises at `v_max`. The cruise may still be of zero
    /// length when the distance sits exactly on the `s_v` threshold.
    pub fn holds_max_velocity(self) -> bool {
        matches!(
            self,
            TrajectoryCase::Case1 | TrajectoryCase::Case3 | TrajectoryCase::Case5
        )
    }
}

impl fmt::Display for TrajectoryCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "case {}", self.number())
    }
}

/// Velocity and distance thresholds separating the regimes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CaseThresholds {
    /// Velocity at which acceleration saturates when ramped up and down by jerk alone.
    pub v_a: f64,
    /// Minimum distance to reach and return from `acc_max` without holding it.
    pub s_a: f64,
    /// Minimum distance to reach `v_max` and decelerate back to rest.
    pub s_v: f64,
}

impl CaseThresholds {
    pub fn from_parameters(params: &TrajectoryParameters) -> Self {
        let j = params.jerk_max;
        let a = params.acc_max;
        let v = params.v_max;

        let v_a = a * a / j;
        let s_a = 2.0 * a * a * a / (j * j);
        let s_v = if v * j < a * a {
            // acceleration never reaches acc_max
            v * 2.0 * (v / j).sqrt()
        } else {
            v * (v / a + a / j)
        };

        Self { v_a, s_a, s_v }
    }
}

/// Decide which regime governs the move. Conditions are checked in table
/// order and the first match wins, so parameters sitting exactly on a
/// threshold resolve deterministically.
pub fn classify(params: &TrajectoryParameters) -> Result<TrajectoryCase, ProfileError> {
    let CaseThresholds { v_a, s_a, s_v } = CaseThresholds::from_parameters(params);
    let v = params.v_max;
    let s = params.distance;

    let case = if v < v_a && s >= s_a {
        Some(TrajectoryCase::Case1)
    } else if v >= v_a && s < s_a {
        Some(TrajectoryCase::Case2)
    } else if v < v_a && s_v <= s && s < s_a {
        Some(TrajectoryCase::Case3)
    } else if v < v_a && s < s_a && s < s_v {
        Some(TrajectoryCase::Case4)
    } else if v >= v_a && s >= s_a && s >= s_v {
        Some(TrajectoryCase::Case5)
    } else if v >= v_a && s_a <= s && s < s_v {
        Some(TrajectoryCase::Case6)
    } else {
        None
    };

    match case {
        Some(case) => {
            tracing::debug!(
                "Classified move as {} (v_a={:.6}, s_a={:.6}, s_v={:.6})",
                case,
                v_a,
                s_a,
                s_v
            );
            Ok(case)
        }
        None => {
            tracing::error!(
                "No trajectory case matches {:?} (v_a={}, s_a={}, s_v={})",
                params,
                v_a,
                s_a,
                s_v
            );
            Err(ProfileError::Classification {
                jerk_max: params.jerk_max,
                acc_max: params.acc_max,
                v_max: params.v_max,
                distance: params.distance,
            })
        }
    }
}
