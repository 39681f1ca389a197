//! Animatable value types
//!
//! Values a [`Motion`](crate::Motion) can drive through
//! [`Motion::lerp_at`](crate::Motion::lerp_at).

use watchvg_core::{Color, Point};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for Point {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Point::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

/// Per-channel blend in ARGB space, truncating like [`Color::blend`]
impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self.blend(*other, t)
    }

    /// `epsilon` is a fraction of the full 0..=255 channel range
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.channels()
            .into_iter()
            .zip(other.channels())
            .all(|(a, b)| (a as f32 - b as f32).abs() / 255.0 < epsilon)
    }
}
