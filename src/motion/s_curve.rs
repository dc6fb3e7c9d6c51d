// src/motion/s_curve.rs
//! Constant-jerk S-curve motion profile
//!
//! A rest-to-rest move is split into seven phases whose jerk is one of
//! `+J`, `0` or `-J`:
//! 1. Jerk increase (acceleration increases linearly)
//! 2. Constant acceleration
//! 3. Jerk decrease (acceleration decreases linearly)
//! 4. Constant velocity (cruise)
//! 5. Jerk increase (deceleration increases linearly)
//! 6. Constant deceleration
//! 7. Jerk decrease (deceleration decreases linearly)
//!
//! Which phases have nonzero length depends on the regime the limits and
//! distance fall into, see [`TrajectoryCase`].

use serde::{Deserialize, Serialize};

use super::TrajectoryParameters;
use super::case::{TrajectoryCase, classify};
use super::error::ProfileError;
use super::phases::{Phase, PhaseBoundaries};

/// Motion state at a specific point in time
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KinematicState {
    pub jerk: f64,
    pub acceleration: f64,
    pub velocity: f64,
    pub position: f64,
}

impl KinematicState {
    pub const REST: KinematicState = KinematicState {
        jerk: 0.0,
        acceleration: 0.0,
        velocity: 0.0,
        position: 0.0,
    };

    /// State reached after applying constant `jerk` for `dt` seconds.
    //   a = a0 + j*t
    //   v = v0 + a0*t + j*t²/2
    //   s = s0 + v0*t + a0*t²/2 + j*t³/6
    fn advance(&self, jerk: f64, dt: f64) -> KinematicState {
        let dt2 = dt * dt;
        let dt3 = dt2 * dt;
        KinematicState {
            jerk,
            acceleration: self.acceleration + jerk * dt,
            velocity: self.velocity + self.acceleration * dt + 0.5 * jerk * dt2,
            position: self.position
                + self.velocity * dt
                + 0.5 * self.acceleration * dt2
                + jerk / 6.0 * dt3,
        }
    }
}

/// A planned jerk-limited move. Immutable once built; every query is a pure
/// function of the stored parameters and boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantJerkProfile {
    params: TrajectoryParameters,
    case: TrajectoryCase,
    boundaries: PhaseBoundaries,
}

impl ConstantJerkProfile {
    /// Classify the move and compute its phase boundaries.
    ///
    /// The parameters are not validated here; call
    /// [`TrajectoryParameters::validate`] first when they come from an
    /// untrusted source. Fails only when no regime matches.
    pub fn new(params: TrajectoryParameters) -> Result<Self, ProfileError> {
        let case = classify(&params)?;
        let boundaries = PhaseBoundaries::compute(case, &params);
        tracing::debug!(
            "Planned S-curve move: {:.3} units in {:.4}s ({})",
            params.distance,
            boundaries.total(),
            case
        );
        Ok(Self {
            params,
            case,
            boundaries,
        })
    }

    pub fn from_limits(
        jerk_max: f64,
        acc_max: f64,
        v_max: f64,
        distance: f64,
    ) -> Result<Self, ProfileError> {
        Self::new(TrajectoryParameters::new(jerk_max, acc_max, v_max, distance))
    }

    pub fn parameters(&self) -> &TrajectoryParameters {
        &self.params
    }

    pub fn case(&self) -> TrajectoryCase {
        self.case
    }

    pub fn boundaries(&self) -> &PhaseBoundaries {
        &self.boundaries
    }

    /// Total move time `t7`.
    pub fn duration(&self) -> f64 {
        self.boundaries.total()
    }

    /// State at elapsed time `t`. Times past the end of the move hold the
    /// final state.
    pub fn state_at(&self, t: f64) -> Result<KinematicState, ProfileError> {
        check_time(t)?;
        let t = t.min(self.boundaries.total());
        Ok(self.evaluate(self.boundaries.phase_at(t), t))
    }

    /// Evaluate `phase`'s formula at absolute time `t`, regardless of whether
    /// `t` lies inside that phase. The phase starts from the end state of all
    /// phases before it.
    pub fn state_in_phase(&self, phase: Phase, t: f64) -> Result<KinematicState, ProfileError> {
        check_time(t)?;
        Ok(self.evaluate(phase, t))
    }

    /// Phase active at time `t`.
    pub fn phase_at(&self, t: f64) -> Result<Phase, ProfileError> {
        check_time(t)?;
        Ok(self.boundaries.phase_at(t.min(self.boundaries.total())))
    }

    fn evaluate(&self, phase: Phase, t: f64) -> KinematicState {
        let mut start = KinematicState::REST;
        for prior in &Phase::ALL[..phase.index()] {
            start = self.phase_state(*prior, &start, self.boundaries.duration_of(*prior));
        }
        self.phase_state(phase, &start, t - self.boundaries.start_of(phase))
    }

    /// State `dt` seconds into `phase`, continuing from `start`.
    fn phase_state(&self, phase: Phase, start: &KinematicState, dt: f64) -> KinematicState {
        match phase {
            Phase::Cruise => KinematicState {
                jerk: 0.0,
                acceleration: 0.0,
                velocity: start.velocity,
                position: start.position + start.velocity * dt,
            },
            // velocity slope is pinned to -acc_max, not to the carried acceleration
            Phase::ConstantDeceleration => KinematicState {
                jerk: 0.0,
                acceleration: start.acceleration,
                velocity: start.velocity - self.params.acc_max * dt,
                position: start.position + start.velocity * dt + 0.5 * start.acceleration * dt * dt,
            },
            _ => start.advance(self.params.jerk_max * phase.jerk_sign(), dt),
        }
    }
}

fn check_time(t: f64) -> Result<(), ProfileError> {
    if t >= 0.0 {
        Ok(())
    } else {
        Err(ProfileError::InvalidTime(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn reference_profiles() -> Vec<ConstantJerkProfile> {
        [
            (2000.0, 500.0, 120.0, 100.0),
            (2000.0, 5500.0, 20500.0, 15000.0),
            (2000.0, 5500.0, 2500.0, 15000.0),
            (2000.0, 500.0, 120.0, 57.0),
            (2000.0, 500.0, 2500.0, 15000.0),
            (2000.0, 500.0, 20500.0, 15000.0),
        ]
        .into_iter()
        .map(|(j, a, v, s)| ConstantJerkProfile::from_limits(j, a, v, s).unwrap())
        .collect()
    }

    #[test]
    fn test_reference_profiles_cover_all_cases() {
        let cases: Vec<u8> = reference_profiles().iter().map(|p| p.case().number()).collect();
        assert_eq!(cases, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_starts_at_rest_with_positive_jerk() {
        for profile in reference_profiles() {
            let state = profile.state_at(0.0).unwrap();
            assert_eq!(
                state,
                KinematicState {
                    jerk: profile.parameters().jerk_max,
                    acceleration: 0.0,
                    velocity: 0.0,
                    position: 0.0,
                }
            );
        }
    }

    #[test]
    fn test_ends_at_rest_on_target() {
        for profile in reference_profiles() {
            let p = *profile.parameters();
            let end = profile.state_at(profile.duration()).unwrap();
            assert_eq!(end.jerk, p.jerk_max, "{}", profile.case());
            assert!(approx(end.acceleration, 0.0, 1e-9 * p.acc_max.max(p.jerk_max)), "{}: {:?}", profile.case(), end);
            assert!(approx(end.velocity, 0.0, 1e-9 * p.v_max), "{}: {:?}", profile.case(), end);
            assert!(approx(end.position, p.distance, 1e-9 * p.distance), "{}: {:?}", profile.case(), end);
        }
    }

    #[test]
    fn test_case1_exemplar() {
        let profile = ConstantJerkProfile::from_limits(2000.0, 500.0, 120.0, 100.0).unwrap();
        assert_eq!(profile.case(), TrajectoryCase::Case1);
        let b = *profile.boundaries();
        let cruise = profile.state_at(b.t4).unwrap();
        assert!(approx(cruise.velocity, 120.0, 1e-9));
        assert_eq!(cruise.acceleration, 0.0);
        let end = profile.state_at(b.t7).unwrap();
        assert!(approx(end.position, 100.0, 1e-9));
        assert!(approx(end.velocity, 0.0, 1e-9));
        // acceleration touches its peak only at t1 == t2
        let peak = profile.state_at(b.t1).unwrap();
        assert!(approx(peak.acceleration, 2000.0 * b.t1, 1e-9));
        assert!(peak.acceleration < 500.0);
    }

    #[test]
    fn test_case5_holds_acceleration_and_velocity() {
        let profile = ConstantJerkProfile::from_limits(2000.0, 500.0, 2500.0, 15000.0).unwrap();
        assert_eq!(profile.case(), TrajectoryCase::Case5);
        let b = *profile.boundaries();
        assert!(b.t2 > b.t1);
        assert!(b.t4 > b.t3);

        let hold = profile.state_at(0.5 * (b.t1 + b.t2)).unwrap();
        assert_eq!(hold.jerk, 0.0);
        assert!(approx(hold.acceleration, 500.0, 1e-9));

        let cruise = profile.state_at(0.5 * (b.t3 + b.t4)).unwrap();
        assert_eq!(cruise.acceleration, 0.0);
        assert!(approx(cruise.velocity, 2500.0, 1e-9));

        let decel = profile.state_at(0.5 * (b.t5 + b.t6)).unwrap();
        assert!(approx(decel.acceleration, -500.0, 1e-9));
    }

    #[test]
    fn test_phases_join_continuously() {
        for profile in reference_profiles() {
            let b = profile.boundaries().as_array();
            let p = *profile.parameters();
            for k in 0..6 {
                let t = b[k];
                let ending = profile.state_in_phase(Phase::ALL[k], t).unwrap();
                let starting = profile.state_in_phase(Phase::ALL[k + 1], t).unwrap();
                assert!(
                    approx(ending.velocity, starting.velocity, 1e-9 * p.v_max),
                    "{} velocity jump at t{}",
                    profile.case(),
                    k + 1
                );
                assert!(
                    approx(ending.position, starting.position, 1e-9 * p.distance),
                    "{} position jump at t{}",
                    profile.case(),
                    k + 1
                );
            }
        }
    }

    #[test]
    fn test_jerk_takes_only_three_values() {
        for profile in reference_profiles() {
            let j = profile.parameters().jerk_max;
            let steps = 500;
            for i in 0..=steps {
                let t = profile.duration() * i as f64 / steps as f64;
                let state = profile.state_at(t).unwrap();
                assert!(
                    state.jerk == j || state.jerk == 0.0 || state.jerk == -j,
                    "unexpected jerk {} at t={}",
                    state.jerk,
                    t
                );
                let phase = profile.phase_at(t).unwrap();
                assert_eq!(state.jerk, j * phase.jerk_sign());
            }
        }
    }

    #[test]
    fn test_query_past_end_is_clamped() {
        for profile in reference_profiles() {
            let end = profile.state_at(profile.duration()).unwrap();
            for eps in [1e-9, 0.5, 10.0, f64::INFINITY] {
                assert_eq!(profile.state_at(profile.duration() + eps).unwrap(), end);
            }
        }
    }

    #[test]
    fn test_negative_time_is_rejected() {
        let profile = ConstantJerkProfile::from_limits(2000.0, 500.0, 120.0, 100.0).unwrap();
        assert_eq!(profile.state_at(-0.1), Err(ProfileError::InvalidTime(-0.1)));
        assert!(matches!(profile.state_at(f64::NAN), Err(ProfileError::InvalidTime(_))));
        assert!(profile.phase_at(-1.0).is_err());
        assert!(profile.state_in_phase(Phase::Cruise, -1.0).is_err());
    }

    #[test]
    fn test_zero_distance_stays_at_rest() {
        let profile = ConstantJerkProfile::from_limits(2000.0, 500.0, 120.0, 0.0).unwrap();
        assert_eq!(profile.duration(), 0.0);
        let state = profile.state_at(1.0).unwrap();
        assert_eq!(state.velocity, 0.0);
        assert_eq!(state.position, 0.0);
    }

    #[test]
    fn test_unclassifiable_limits_fail_construction() {
        let result = ConstantJerkProfile::from_limits(2000.0, f64::NAN, 120.0, 100.0);
        assert!(matches!(result, Err(ProfileError::Classification { .. })));
    }
}
