// scurve-rs: jerk-limited rest-to-rest motion profiles
//
// `motion` plans and evaluates a seven-segment constant-jerk S-curve;
// `config` loads the limits and sampling options from TOML.

pub mod config;
pub mod motion;

pub use motion::{
    ConstantJerkProfile, KinematicState, Phase, PhaseBoundaries, ProfileError,
    TrajectoryCase, TrajectoryParameters,
};
