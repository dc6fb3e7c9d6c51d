// src/motion/phases.rs - Phase layout and boundary timing
use serde::{Deserialize, Serialize};

use super::TrajectoryParameters;
use super::case::TrajectoryCase;

/// The seven phases of an S-curve, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Jerk +J, acceleration ramps up from zero.
    JerkUp,
    /// Jerk 0, acceleration held.
    ConstantAcceleration,
    /// Jerk -J, acceleration ramps back toward zero.
    JerkDown,
    /// Jerk 0, acceleration 0, velocity held.
    Cruise,
    /// Jerk -J, deceleration builds up.
    DecelJerkUp,
    /// Jerk 0, deceleration held.
    ConstantDeceleration,
    /// Jerk +J, deceleration ramps back toward zero.
    DecelJerkDown,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::JerkUp,
        Phase::ConstantAcceleration,
        Phase::JerkDown,
        Phase::Cruise,
        Phase::DecelJerkUp,
        Phase::ConstantDeceleration,
        Phase::DecelJerkDown,
    ];

    /// Zero-based position in [`Phase::ALL`].
    pub fn index(self) -> usize {
        match self {
            Phase::JerkUp => 0,
            Phase::ConstantAcceleration => 1,
            Phase::JerkDown => 2,
            Phase::Cruise => 3,
            Phase::DecelJerkUp => 4,
            Phase::ConstantDeceleration => 5,
            Phase::DecelJerkDown => 6,
        }
    }

    /// Sign of the jerk applied during the phase: `{+,0,-,0,-,0,+}`.
    pub fn jerk_sign(self) -> f64 {
        match self {
            Phase::JerkUp | Phase::DecelJerkDown => 1.0,
            Phase::JerkDown | Phase::DecelJerkUp => -1.0,
            Phase::ConstantAcceleration | Phase::Cruise | Phase::ConstantDeceleration => 0.0,
        }
    }

    /// The phase preceding this one, if any.
    pub fn previous(self) -> Option<Phase> {
        match self.index() {
            0 => None,
            i => Some(Phase::ALL[i - 1]),
        }
    }
}

/// End times `t1..t7` of the seven phases, measured from the start of the move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseBoundaries {
    pub t1: f64,
    pub t2: f64,
    pub t3: f64,
    pub t4: f64,
    pub t5: f64,
    pub t6: f64,
    pub t7: f64,
}

impl PhaseBoundaries {
    /// Lay out the boundaries from the jerk-phase duration `tj`, the
    /// acceleration-phase end `ta` and the cruise end `tv`.
    pub fn from_durations(tj: f64, ta: f64, tv: f64) -> Self {
        Self {
            t1: tj,
            t2: ta,
            t3: ta + tj,
            t4: tv,
            t5: tv + tj,
            t6: tv + ta,
            t7: tv + tj + ta,
        }
    }

    /// Compute the boundaries for a classified move.
    pub fn compute(case: TrajectoryCase, params: &TrajectoryParameters) -> Self {
        let (tj, ta, tv) = phase_durations(case, params);
        let boundaries = Self::from_durations(tj, ta, tv);
        tracing::debug!(
            "Phase timing for {}: tj={:.6}s ta={:.6}s tv={:.6}s total={:.6}s",
            case,
            tj,
            ta,
            tv,
            boundaries.t7
        );
        boundaries
    }

    pub fn as_array(&self) -> [f64; 7] {
        [self.t1, self.t2, self.t3, self.t4, self.t5, self.t6, self.t7]
    }

    /// End time of `phase`.
    pub fn end_of(&self, phase: Phase) -> f64 {
        self.as_array()[phase.index()]
    }

    /// Start time of `phase` (the end of the previous one, or zero).
    pub fn start_of(&self, phase: Phase) -> f64 {
        phase.previous().map_or(0.0, |prev| self.end_of(prev))
    }

    pub fn duration_of(&self, phase: Phase) -> f64 {
        self.end_of(phase) - self.start_of(phase)
    }

    /// Total move time.
    pub fn total(&self) -> f64 {
        self.t7
    }

    /// The phase whose interval contains `t`: the first with `t <= t_k`.
    /// Times past `t7` map to the last phase.
    pub fn phase_at(&self, t: f64) -> Phase {
        Phase::ALL
            .iter()
            .copied()
            .find(|phase| t <= self.end_of(*phase))
            .unwrap_or(Phase::DecelJerkDown)
    }

    pub fn is_non_decreasing(&self) -> bool {
        let t = self.as_array();
        t[0] >= 0.0 && t.windows(2).all(|w| w[0] <= w[1])
    }
}

/// `(tj, ta, tv)` for the given regime.
fn phase_durations(case: TrajectoryCase, params: &TrajectoryParameters) -> (f64, f64, f64) {
    let j = params.jerk_max;
    let a = params.acc_max;
    let v = params.v_max;
    let s = params.distance;

    // The max() guards only absorb rounding when the distance sits exactly
    // on s_v or s_a, where the hold phase is algebraically zero-length.
    match case {
        TrajectoryCase::Case1 | TrajectoryCase::Case3 => {
            let tj = (v / j).sqrt();
            (tj, tj, (s / v).max(tj + tj))
        }
        TrajectoryCase::Case2 | TrajectoryCase::Case4 => {
            let tj = cube_root(s / (2.0 * j));
            (tj, tj, 2.0 * tj)
        }
        TrajectoryCase::Case5 => {
            let tj = a / j;
            let ta = v / a;
            (tj, ta, (s / v).max(ta + tj))
        }
        TrajectoryCase::Case6 => {
            let tj = a / j;
            let ta = 0.5 * (((4.0 * s * j * j + a * a * a) / (a * j * j)).sqrt() - a / j);
            let ta = ta.max(tj);
            (tj, ta, ta + tj)
        }
    }
}

/// Sign-preserving real cube root.
fn cube_root(x: f64) -> f64 {
    x.cbrt()
}
