//! Parametric motions
//!
//! A [`Motion`] maps the time elapsed since it started to a value. Motions
//! hold no clock of their own: callers pass elapsed milliseconds, which keeps
//! them pure and trivially testable.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::values::Interpolate;

/// Boundaries of the four bounce quarters, in motion progress
const QUARTERS: [(f32, f32); 4] = [(0.0, 0.25), (0.25, 0.5), (0.5, 0.75), (0.75, 1.0)];

/// Amplitude divisor of each bounce quarter
const BOUNCE_DIVISORS: [f32; 4] = [1.0, 3.0, 8.0, 27.0];

/// Shape of a motion between its start and stop values
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Curve {
    /// Eased interpolation from start to stop
    Eased { easing: Easing },
    /// Four decaying dips below the stop value, used to "pop" watch hands in
    ///
    /// Each quarter of the duration is a parabola returning to the stop value,
    /// with a depth proportional to the amplitude divided by 1, 3, 8 and 27.
    Bounce { amplitude: f32 },
}

/// A value evolving over a fixed duration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    start: f32,
    stop: f32,
    duration_ms: u64,
    curve: Curve,
}

impl Motion {
    /// Eased motion from `start` to `stop`
    pub const fn new(start: f32, stop: f32, duration_ms: u64, easing: Easing) -> Self {
        Self {
            start,
            stop,
            duration_ms,
            curve: Curve::Eased { easing },
        }
    }

    pub const fn linear(start: f32, stop: f32, duration_ms: u64) -> Self {
        Self::new(start, stop, duration_ms, Easing::Linear)
    }

    /// Bounce around `value`; starts and ends on it
    pub const fn bounce(value: f32, duration_ms: u64, amplitude: f32) -> Self {
        Self {
            start: value,
            stop: value,
            duration_ms,
            curve: Curve::Bounce { amplitude },
        }
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn stop(&self) -> f32 {
        self.stop
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Value after `elapsed_ms`, clamped to the motion's duration
    pub fn value_at(&self, elapsed_ms: u64) -> f32 {
        if elapsed_ms >= self.duration_ms {
            return self.stop;
        }

        let ratio = elapsed_ms as f32 / self.duration_ms as f32;
        match self.curve {
            Curve::Eased { .. } if elapsed_ms == 0 => self.start,
            Curve::Eased { easing } => self.start + (self.stop - self.start) * easing.apply(ratio),
            Curve::Bounce { amplitude } => bounce(self.stop, amplitude, ratio),
        }
    }

    /// Whether the motion is over after `elapsed_ms`
    ///
    /// Every motion ends with its duration. Eased motions also end as soon as
    /// they reach their stop value; a bounce passes through its stop value at
    /// every quarter, so it only ends with time.
    pub fn is_finished(&self, elapsed_ms: u64) -> bool {
        if elapsed_ms >= self.duration_ms {
            return true;
        }
        match self.curve {
            Curve::Eased { .. } => self.value_at(elapsed_ms) == self.stop,
            Curve::Bounce { .. } => false,
        }
    }

    /// Progress used to drive other values
    ///
    /// For eased motions this is the eased fraction of the way from start to
    /// stop. A bounce never travels, so its progress is the value relative to
    /// the stop value (1 when resting, below 1 while dipping).
    pub fn progress_at(&self, elapsed_ms: u64) -> f32 {
        match self.curve {
            Curve::Eased { easing } => {
                if self.duration_ms == 0 {
                    1.0
                } else {
                    easing.apply(elapsed_ms as f32 / self.duration_ms as f32)
                }
            }
            Curve::Bounce { .. } if self.stop == 0.0 => 1.0,
            Curve::Bounce { .. } => self.value_at(elapsed_ms) / self.stop,
        }
    }

    /// Interpolate between two values following this motion's progress
    pub fn lerp_at<T: Interpolate>(&self, from: &T, to: &T, elapsed_ms: u64) -> T {
        from.lerp(to, self.progress_at(elapsed_ms))
    }

    /// Values sampled every `frame_ms` from 0 through the end of the motion
    ///
    /// The last sample is always taken at the duration itself.
    pub fn samples(&self, frame_ms: u64) -> Vec<(u64, f32)> {
        let frame_ms = frame_ms.max(1);
        let mut samples: Vec<(u64, f32)> = (0..self.duration_ms)
            .step_by(frame_ms as usize)
            .map(|t| (t, self.value_at(t)))
            .collect();
        samples.push((self.duration_ms, self.value_at(self.duration_ms)));
        samples
    }
}

/// Bounce value at `ratio` in [0, 1)
fn bounce(stop: f32, amplitude: f32, ratio: f32) -> f32 {
    let quarter = QUARTERS
        .iter()
        .position(|&(_, high)| ratio < high)
        .unwrap_or(QUARTERS.len() - 1);
    let (low, high) = QUARTERS[quarter];
    let depth = amplitude / BOUNCE_DIVISORS[quarter];
    stop + stop * depth * (ratio - low) * (ratio - high)
}
