// src/motion/sampler.rs - Fixed-rate sampling of a planned move
use super::error::ProfileError;
use super::s_curve::{ConstantJerkProfile, KinematicState};

/// A sampled point of a profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPoint {
    pub time: f64,
    pub state: KinematicState,
}

/// Upper bound on the number of points a single call may produce.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Sample `profile` every `1 / rate_hz` seconds from `t = 0`. The last point
/// is clamped to the end of the move so the completed state is always
/// included. A regular sample falling within a millionth of a period of the
/// end is folded into that final point.
///
/// Rates that would produce more than [`MAX_SAMPLES`] points are rejected.
pub fn sample(profile: &ConstantJerkProfile, rate_hz: f64) -> Result<Vec<MotionPoint>, ProfileError> {
    if !rate_hz.is_finite() || rate_hz <= 0.0 {
        return Err(ProfileError::InvalidSampleRate(rate_hz));
    }

    let duration = profile.duration();
    let span = (duration * rate_hz).ceil();
    if span >= MAX_SAMPLES as f64 {
        tracing::error!(
            "Sampling {:.4}s at {} Hz exceeds {} points",
            duration,
            rate_hz,
            MAX_SAMPLES
        );
        return Err(ProfileError::InvalidSampleRate(rate_hz));
    }
    let steps = span as usize;
    let snap = 1e-6 / rate_hz;

    let mut points = Vec::with_capacity(steps + 1);
    for i in 0..steps {
        let time = i as f64 / rate_hz;
        if duration - time <= snap {
            break;
        }
        points.push(MotionPoint {
            time,
            state: profile.state_at(time)?,
        });
    }
    points.push(MotionPoint {
        time: duration,
        state: profile.state_at(duration)?,
    });

    tracing::debug!(
        "Sampled {} points at {} Hz over {:.4}s",
        points.len(),
        rate_hz,
        duration
    );
    Ok(points)
}
