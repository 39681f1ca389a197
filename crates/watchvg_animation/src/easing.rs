//! Easing functions
//!
//! Maps linear progress in [0, 1] to eased progress. Every curve starts at 0,
//! ends at 1 and never goes backwards.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// Standard easing curves
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    SineIn,
    SineOut,
    SineInOut,
    CircIn,
    CircOut,
    CircInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
}

impl Easing {
    pub const ALL: [Easing; 22] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::QuartIn,
        Easing::QuartOut,
        Easing::QuartInOut,
        Easing::QuintIn,
        Easing::QuintOut,
        Easing::QuintInOut,
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::CircIn,
        Easing::CircOut,
        Easing::CircInOut,
        Easing::ExpoIn,
        Easing::ExpoOut,
        Easing::ExpoInOut,
    ];

    /// Apply the easing to `t`, clamped to [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self {
            Easing::Linear => t,
            Easing::QuadIn => t.powi(2),
            Easing::QuadOut => 1.0 - (1.0 - t).powi(2),
            Easing::QuadInOut => in_out(t, 2),
            Easing::CubicIn => t.powi(3),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => in_out(t, 3),
            Easing::QuartIn => t.powi(4),
            Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
            Easing::QuartInOut => in_out(t, 4),
            Easing::QuintIn => t.powi(5),
            Easing::QuintOut => 1.0 - (1.0 - t).powi(5),
            Easing::QuintInOut => in_out(t, 5),
            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::CircIn => 1.0 - (1.0 - t * t).sqrt(),
            Easing::CircOut => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Easing::CircInOut => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }
            Easing::ExpoIn => 2f32.powf(10.0 * t - 10.0),
            Easing::ExpoOut => 1.0 - 2f32.powf(-10.0 * t),
            Easing::ExpoInOut => {
                if t < 0.5 {
                    2f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
        }
    }

    /// Name used in configuration files and on the command line
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::QuadIn => "quad_in",
            Easing::QuadOut => "quad_out",
            Easing::QuadInOut => "quad_in_out",
            Easing::CubicIn => "cubic_in",
            Easing::CubicOut => "cubic_out",
            Easing::CubicInOut => "cubic_in_out",
            Easing::QuartIn => "quart_in",
            Easing::QuartOut => "quart_out",
            Easing::QuartInOut => "quart_in_out",
            Easing::QuintIn => "quint_in",
            Easing::QuintOut => "quint_out",
            Easing::QuintInOut => "quint_in_out",
            Easing::SineIn => "sine_in",
            Easing::SineOut => "sine_out",
            Easing::SineInOut => "sine_in_out",
            Easing::CircIn => "circ_in",
            Easing::CircOut => "circ_out",
            Easing::CircInOut => "circ_in_out",
            Easing::ExpoIn => "expo_in",
            Easing::ExpoOut => "expo_out",
            Easing::ExpoInOut => "expo_in_out",
        }
    }
}

/// Symmetric ease-in-out built on `t^power`
fn in_out(t: f32, power: i32) -> f32 {
    if t < 0.5 {
        2f32.powi(power - 1) * t.powi(power)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(power) / 2.0
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        Easing::ALL
            .into_iter()
            .find(|easing| easing.name() == wanted)
            .ok_or_else(|| AnimationError::UnknownEasing(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in Easing::ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing}");
        }
    }

    #[test]
    fn test_input_is_clamped() {
        for easing in Easing::ALL {
            assert_eq!(easing.apply(-3.0), 0.0, "{easing}");
            assert_eq!(easing.apply(7.5), 1.0, "{easing}");
        }
    }

    #[test]
    fn test_monotonic() {
        for easing in Easing::ALL {
            let mut previous = 0.0;
            for i in 1..=100 {
                let value = easing.apply(i as f32 / 100.0);
                assert!(value + 1e-6 >= previous, "{easing} decreases at step {i}");
                previous = value;
            }
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(Easing::Linear.apply(0.25), 0.25);
        assert_eq!(Easing::QuadIn.apply(0.5), 0.25);
        assert_eq!(Easing::QuadOut.apply(0.5), 0.75);
        assert_eq!(Easing::CubicInOut.apply(0.25), 0.0625);
        assert!((Easing::CircOut.apply(0.5) - 0.75f32.sqrt()).abs() < 1e-6);
        assert!((Easing::SineInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::ExpoInOut.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_in_out_is_continuous_at_half() {
        for easing in [
            Easing::QuadInOut,
            Easing::CubicInOut,
            Easing::QuartInOut,
            Easing::QuintInOut,
            Easing::SineInOut,
        ] {
            let below = easing.apply(0.499_99);
            let above = easing.apply(0.5);
            assert!((above - below).abs() < 1e-3, "{easing}");
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("circ_out".parse::<Easing>().unwrap(), Easing::CircOut);
        assert_eq!("Quad-In-Out".parse::<Easing>().unwrap(), Easing::QuadInOut);
        assert!("bounce".parse::<Easing>().is_err());
        for easing in Easing::ALL {
            assert_eq!(easing.name().parse::<Easing>().unwrap(), easing);
        }
    }

    #[test]
    fn test_serde_names_match() {
        let json = serde_json::to_string(&Easing::SineInOut).unwrap();
        assert_eq!(json, "\"sine_in_out\"");
    }
}
