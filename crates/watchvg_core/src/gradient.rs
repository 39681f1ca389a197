//! Multi-stop color gradients
//!
//! A [`GradientSpec`] is an ordered list of color stops plus the angle of the
//! gradient line. Evaluation is piecewise linear between the two stops that
//! bracket the position, clamping to the first/last color outside the stops.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::color::Color;
use crate::error::{Error, Result};

/// Gradient stop
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient (0.0 to 1.0)
    pub offset: f32,
    /// Color at this stop
    pub color: Color,
}

impl GradientStop {
    /// Create a new gradient stop
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Stop list storage; watch gradients rarely carry more than six stops
pub type GradientStops = SmallVec<[GradientStop; 6]>;

/// Validated multi-stop gradient with its angle in degrees
///
/// Stops are non-decreasing and inside [0, 1]; there is always at least one.
/// Immutable once built; share it by reference.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GradientSpec {
    stops: GradientStops,
    angle: i32,
}

impl GradientSpec {
    /// Build a gradient from parallel color and stop arrays
    pub fn new(colors: &[Color], stops: &[f32], angle: i32) -> Result<Self> {
        if colors.len() != stops.len() {
            return Err(Error::GradientLengthMismatch {
                colors: colors.len(),
                stops: stops.len(),
            });
        }
        let stops = colors
            .iter()
            .zip(stops)
            .map(|(&color, &offset)| GradientStop::new(offset, color))
            .collect();
        Self::from_stops(stops, angle)
    }

    /// Build a gradient from stops, validating their order and range
    pub fn from_stops(stops: GradientStops, angle: i32) -> Result<Self> {
        if stops.is_empty() {
            return Err(Error::EmptyGradient);
        }

        let mut previous = f32::NEG_INFINITY;
        for (index, stop) in stops.iter().enumerate() {
            if !(0.0..=1.0).contains(&stop.offset) {
                return Err(Error::StopOutOfRange {
                    index,
                    offset: stop.offset,
                });
            }
            if stop.offset < previous {
                return Err(Error::UnorderedStops {
                    index,
                    offset: stop.offset,
                });
            }
            previous = stop.offset;
        }

        tracing::trace!(stops = stops.len(), angle, "gradient validated");
        Ok(Self { stops, angle })
    }

    /// Two-stop gradient from `from` at 0 to `to` at 1
    pub fn two_stop(from: Color, to: Color, angle: i32) -> Self {
        let mut stops = GradientStops::new();
        stops.push(GradientStop::new(0.0, from));
        stops.push(GradientStop::new(1.0, to));
        Self { stops, angle }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.stops.iter().map(|s| s.color)
    }

    pub fn offsets(&self) -> impl Iterator<Item = f32> + '_ {
        self.stops.iter().map(|s| s.offset)
    }

    pub fn color_count(&self) -> usize {
        self.stops.len()
    }

    /// Angle of the gradient line, in degrees
    pub fn angle(&self) -> i32 {
        self.angle
    }

    pub fn first(&self) -> GradientStop {
        self.stops[0]
    }

    pub fn last(&self) -> GradientStop {
        self.stops[self.stops.len() - 1]
    }

    /// Color of the gradient at `position`
    ///
    /// Positions at or before the first stop yield the first color, positions
    /// at or after the last stop yield the last color. NaN has no place on the
    /// gradient and yields the first color.
    pub fn gradient_at(&self, position: f32) -> Color {
        let first = self.first();
        let last = self.last();
        if position.is_nan() || position <= first.offset {
            return first.color;
        }
        if position >= last.offset {
            return last.color;
        }
        self.blend_between_stops(position)
    }

    /// Map an integer reading onto the gradient
    ///
    /// Values at or below `min_value` give the first color, values at or above
    /// `max_value` the last one. In between, the value is scaled proportionally
    /// to `value * last_stop / max_value` before evaluating the gradient.
    pub fn color_for_value(&self, value: i32, min_value: i32, max_value: i32) -> Color {
        if value <= min_value {
            return self.first().color;
        }
        if value >= max_value {
            return self.last().color;
        }
        let normalized = value as f32 * self.last().offset / max_value as f32;
        self.gradient_at(normalized)
    }

    /// Sample the gradient `length` times, evenly from 0 to 1 inclusive
    pub fn lookup_table(&self, length: usize) -> Vec<Color> {
        match length {
            0 => Vec::new(),
            1 => vec![self.gradient_at(0.0)],
            _ => {
                let last = (length - 1) as f32;
                (0..length)
                    .map(|i| self.gradient_at(i as f32 / last))
                    .collect()
            }
        }
    }

    /// Blend between the stops bracketing `position`
    ///
    /// `position` is strictly inside (first, last); the insertion point is found
    /// with a forward scan since stop lists are short.
    fn blend_between_stops(&self, position: f32) -> Color {
        let index = insertion_point(position, &self.stops);
        let high = self.stops[index];
        let low = self.stops[index - 1];

        let span = high.offset - low.offset;
        if span <= 0.0 {
            return low.color;
        }
        let ratio = (position - low.offset) / span;
        low.color.blend(high.color, ratio)
    }
}

impl Default for GradientSpec {
    /// Opaque white fading to transparent white, horizontal
    fn default() -> Self {
        Self::two_stop(Color(0xFFFF_FFFF), Color(0x00FF_FFFF), 0)
    }
}

/// Index of the first stop whose offset is not below `value`
fn insertion_point(value: f32, stops: &[GradientStop]) -> usize {
    stops
        .iter()
        .position(|s| s.offset >= value)
        .unwrap_or(stops.len())
}

/// Serialized form: `{ stops = [{ offset, color }], angle }`, validated on load
#[derive(Deserialize)]
struct RawGradientSpec {
    stops: Vec<GradientStop>,
    #[serde(default)]
    angle: i32,
}

impl<'de> Deserialize<'de> for GradientSpec {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawGradientSpec::deserialize(deserializer)?;
        GradientSpec::from_stops(raw.stops.into_iter().collect(), raw.angle)
            .map_err(serde::de::Error::custom)
    }
}

/// Evaluate `spec` at `position`; see [`GradientSpec::gradient_at`]
pub fn gradient_at(spec: &GradientSpec, position: f32) -> Color {
    spec.gradient_at(position)
}
