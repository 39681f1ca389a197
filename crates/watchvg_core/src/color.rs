//! 32-bit ARGB colors and channel blending
//!
//! Colors are stored the way the display pipeline consumes them: one packed
//! `0xAARRGGBB` word. Blending interpolates each 8-bit channel linearly in the
//! encoded (non gamma-corrected) space and truncates toward zero.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const ALPHA_SHIFT: u32 = 24;
const RED_SHIFT: u32 = 16;
const GREEN_SHIFT: u32 = 8;
const CHANNEL_MASK: u32 = 0xFF;

/// Packed 32-bit ARGB color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const RED: Color = Color(0xFFFF_0000);
    pub const GREEN: Color = Color(0xFF00_FF00);
    pub const BLUE: Color = Color(0xFF00_00FF);
    pub const TRANSPARENT: Color = Color(0x0000_0000);

    /// Create a color from a packed `0xAARRGGBB` value
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    /// Create an opaque color from a packed `0xRRGGBB` value
    pub const fn from_rgb(rgb: u32) -> Self {
        Self(0xFF00_0000 | (rgb & 0x00FF_FFFF))
    }

    /// Create a color from individual channels
    pub const fn from_channels(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self(
            (alpha as u32) << ALPHA_SHIFT
                | (red as u32) << RED_SHIFT
                | (green as u32) << GREEN_SHIFT
                | blue as u32,
        )
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        ((self.0 >> ALPHA_SHIFT) & CHANNEL_MASK) as u8
    }

    pub const fn red(self) -> u8 {
        ((self.0 >> RED_SHIFT) & CHANNEL_MASK) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> GREEN_SHIFT) & CHANNEL_MASK) as u8
    }

    pub const fn blue(self) -> u8 {
        (self.0 & CHANNEL_MASK) as u8
    }

    /// Channels as `[alpha, red, green, blue]`
    pub const fn channels(self) -> [u8; 4] {
        [self.alpha(), self.red(), self.green(), self.blue()]
    }

    /// Same color with another alpha channel
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | (alpha as u32) << ALPHA_SHIFT)
    }

    /// Blend two colors
    ///
    /// A ratio of 0 yields `self`, a ratio of 1 yields `other`. Each channel is
    /// `self * (1 - ratio) + other * ratio`, truncated.
    pub fn blend(self, other: Color, ratio: f32) -> Color {
        if self == other {
            return self;
        }
        if ratio >= 1.0 {
            return other;
        }
        if ratio <= 0.0 {
            return self;
        }
        blend_channels(self.channels(), other.channels(), ratio)
    }
}

/// Blend two colors, `ratio` in [0, 1]; see [`Color::blend`]
pub fn blend(start: Color, end: Color, ratio: f32) -> Color {
    start.blend(end, ratio)
}

/// Precompute `length` evenly spaced colors going from `start` toward `end`
///
/// Entry `i` is the blend at ratio `i / length`, so the table starts exactly on
/// `start` and stops one step short of `end`. Useful as a lookup table when a
/// color must be picked per frame or per pixel.
pub fn make_gradient_array(start: Color, end: Color, length: usize) -> Vec<Color> {
    let from = start.channels();
    let to = end.channels();
    (0..length)
        .map(|i| blend_channels(from, to, i as f32 / length as f32))
        .collect()
}

fn blend_channels(from: [u8; 4], to: [u8; 4], ratio: f32) -> Color {
    let complement = 1.0 - ratio;
    let mix = |a: u8, b: u8| (a as f32 * complement + b as f32 * ratio) as u8;
    Color::from_channels(
        mix(from[0], to[0]),
        mix(from[1], to[1]),
        mix(from[2], to[2]),
        mix(from[3], to[3]),
    )
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Color(argb)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse `#AARRGGBB`, `0xAARRGGBB` or `#RRGGBB` (opaque)
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let value =
            u32::from_str_radix(digits, 16).map_err(|_| Error::InvalidColor(s.to_string()))?;
        match digits.len() {
            8 => Ok(Color(value)),
            6 => Ok(Color::from_rgb(value)),
            _ => Err(Error::InvalidColor(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels() {
        let c = Color(0x80FF_4020);
        assert_eq!(c.channels(), [0x80, 0xFF, 0x40, 0x20]);
        assert_eq!(Color::from_channels(0x80, 0xFF, 0x40, 0x20), c);
        assert_eq!(c.with_alpha(0x11), Color(0x11FF_4020));
        assert_eq!(Color::from_rgb(0x123456), Color(0xFF12_3456));
    }

    #[test]
    fn test_blend_identity() {
        let c = Color(0x8012_3456);
        for ratio in [-1.0, 0.0, 0.3, 0.5, 1.0, 2.0] {
            assert_eq!(c.blend(c, ratio), c);
        }
    }

    #[test]
    fn test_blend_bounds() {
        let a = Color(0xFF00_0000);
        let b = Color(0x00FF_FFFF);
        assert_eq!(a.blend(b, 0.0), a);
        assert_eq!(a.blend(b, -0.5), a);
        assert_eq!(a.blend(b, 1.0), b);
        assert_eq!(a.blend(b, 1.5), b);
    }

    #[test]
    fn test_blend_truncates() {
        // 255 * 0.5 = 127.5 truncates to 0x7F; RGB stays 0xFF on both sides.
        assert_eq!(
            Color(0xFFFF_FFFF).blend(Color(0x00FF_FFFF), 0.5),
            Color(0x7FFF_FFFF)
        );
        // 0x10 * 0.75 + 0x20 * 0.25 = 12 + 8 = 20
        assert_eq!(
            Color(0x1010_1010).blend(Color(0x2020_2020), 0.25),
            Color(0x1414_1414)
        );
        // 1 * 0.5 = 0.5 truncates to 0
        assert_eq!(Color(0x0101_0101).blend(Color(0), 0.5), Color(0));
    }

    #[test]
    fn test_make_gradient_array() {
        let lut = make_gradient_array(Color(0xFF00_0000), Color(0xFF00_00FF), 4);
        assert_eq!(
            lut,
            vec![
                Color(0xFF00_0000),
                Color(0xFF00_003F),
                Color(0xFF00_007F),
                Color(0xFF00_00BF),
            ]
        );
        assert!(make_gradient_array(Color::BLACK, Color::WHITE, 0).is_empty());
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("#80FF0000".parse::<Color>().unwrap(), Color(0x80FF_0000));
        assert_eq!("0x00ffffff".parse::<Color>().unwrap(), Color(0x00FF_FFFF));
        assert_eq!("#336699".parse::<Color>().unwrap(), Color(0xFF33_6699));
        assert!("#12345".parse::<Color>().is_err());
        assert!("zzzzzz".parse::<Color>().is_err());
        assert_eq!(Color(0x7FFF_FFFF).to_string(), "#7FFFFFFF");
    }
}
