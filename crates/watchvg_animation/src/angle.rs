//! Watch-hand angles
//!
//! Converts time of day into hand angles in degrees, clockwise from
//! 12 o'clock. The hour and minute hands always sweep continuously; computers
//! differ in how the second hand moves.

use serde::{Deserialize, Serialize};

const DEGREES_HOUR: f32 = 30.0;
const DEGREES_MINUTE: f32 = 6.0;
const DEGREES_SECOND: f32 = 6.0;
const HOURS_ON_DIAL: f32 = 12.0;

const MS_IN_SECOND: u64 = 1_000;
const MS_IN_MINUTE: u64 = 60 * MS_IN_SECOND;
const MS_IN_HOUR: u64 = 60 * MS_IN_MINUTE;
const MS_IN_DAY: u64 = 24 * MS_IN_HOUR;

/// Strategy mapping time components to hand angles
pub trait WatchAngleComputer {
    /// Angle of the hour hand for `hours` in [0, 24)
    fn hour_angle(&self, hours: f32) -> f32 {
        let hours = if hours >= HOURS_ON_DIAL {
            hours - HOURS_ON_DIAL
        } else {
            hours
        };
        hours * DEGREES_HOUR
    }

    /// Angle of the minute hand for `minutes` in [0, 60)
    fn minute_angle(&self, minutes: f32) -> f32 {
        minutes * DEGREES_MINUTE
    }

    /// Angle of the second hand for `seconds` in [0, 60)
    fn second_angle(&self, seconds: f32) -> f32;

    /// All three angles at `time_ms` (milliseconds since midnight or since
    /// the epoch, in local time)
    fn hand_angles(&self, time_ms: u64) -> HandAngles {
        HandAngles {
            hour: self.hour_angle(hours_of_day(time_ms)),
            minute: self.minute_angle(minutes_of_hour(time_ms)),
            second: self.second_angle(seconds_of_minute(time_ms)),
        }
    }
}

/// Angles of the three hands, in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

/// Smooth second hand
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearAngles;

impl WatchAngleComputer for LinearAngles {
    fn second_angle(&self, seconds: f32) -> f32 {
        seconds * DEGREES_SECOND
    }
}

/// Second hand jumping once per second
#[derive(Clone, Copy, Debug, Default)]
pub struct TickAngles;

impl WatchAngleComputer for TickAngles {
    fn second_angle(&self, seconds: f32) -> f32 {
        seconds.trunc() * DEGREES_SECOND
    }
}

/// Second hand that rushes towards each tick and settles on it
///
/// Within a second the hand covers the 6 degree step along a quartic curve:
/// fast at the start of the second, slowing to a stop on the next tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuarticAngles;

impl WatchAngleComputer for QuarticAngles {
    fn second_angle(&self, seconds: f32) -> f32 {
        let angle = seconds * DEGREES_SECOND;
        let next_tick = ((angle as i32) / DEGREES_SECOND as i32 + 1) as f32;
        let remaining = (angle - DEGREES_SECOND * next_tick) / DEGREES_SECOND;
        DEGREES_SECOND * next_tick - DEGREES_SECOND * remaining.powi(4)
    }
}

/// Hours since midnight, fractional
pub fn hours_of_day(time_ms: u64) -> f32 {
    (time_ms % MS_IN_DAY) as f32 / MS_IN_HOUR as f32
}

/// Minutes into the current hour, fractional
pub fn minutes_of_hour(time_ms: u64) -> f32 {
    (time_ms % MS_IN_HOUR) as f32 / MS_IN_MINUTE as f32
}

/// Seconds into the current minute, fractional
pub fn seconds_of_minute(time_ms: u64) -> f32 {
    (time_ms % MS_IN_MINUTE) as f32 / MS_IN_SECOND as f32
}
