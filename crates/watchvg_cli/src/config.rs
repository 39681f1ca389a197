//! Scene file handling
//!
//! A scene is a TOML file listing the arcs, chart curves, gradients, motions
//! and watch hands of one face:
//!
//! ```toml
//! [scene]
//! name = "activity"
//!
//! [[arc]]
//! name = "steps"
//! diameter = 120
//! thickness = 12
//! start_angle = -90
//! arc_angle = 250
//!
//! [[motion]]
//! name = "hand-pop"
//! from = 1.0
//! bounce = 15.0
//! duration_ms = 600
//! ```
//!
//! Every table is optional and every field but the data itself has a default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use watchvg_animation::{Easing, Motion};
use watchvg_core::{Color, GradientSpec};
use watchvg_paint::{ArcDescriptor, Cap};

/// A whole scene file
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    pub scene: SceneMetadata,
    #[serde(rename = "arc")]
    pub arcs: Vec<ArcItem>,
    #[serde(rename = "curve")]
    pub curves: Vec<CurveItem>,
    #[serde(rename = "gradient")]
    pub gradients: Vec<GradientItem>,
    #[serde(rename = "motion")]
    pub motions: Vec<MotionItem>,
    #[serde(rename = "hands")]
    pub hands: Vec<HandsItem>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneMetadata {
    pub name: String,
    pub description: Option<String>,
}

impl Default for SceneMetadata {
    fn default() -> Self {
        Self {
            name: "scene".to_string(),
            description: None,
        }
    }
}

impl SceneConfig {
    /// Load a scene from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Scene file {} does not exist", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Number of items in the scene
    pub fn len(&self) -> usize {
        self.arcs.len()
            + self.curves.len()
            + self.gradients.len()
            + self.motions.len()
            + self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Thick arc; `vertical_diameter` turns it into an ellipse
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArcItem {
    pub name: Option<String>,
    pub diameter: f32,
    pub vertical_diameter: Option<f32>,
    pub thickness: f32,
    pub start_angle: f32,
    pub arc_angle: f32,
    pub cap: Cap,
}

impl Default for ArcItem {
    fn default() -> Self {
        let descriptor = ArcDescriptor::default();
        Self {
            name: None,
            diameter: descriptor.horizontal_diameter,
            vertical_diameter: None,
            thickness: descriptor.thickness,
            start_angle: descriptor.start_angle,
            arc_angle: descriptor.arc_angle,
            cap: descriptor.cap,
        }
    }
}

impl ArcItem {
    pub fn descriptor(&self) -> ArcDescriptor {
        ArcDescriptor {
            horizontal_diameter: self.diameter,
            vertical_diameter: self.vertical_diameter.unwrap_or(self.diameter),
            thickness: self.thickness,
            start_angle: self.start_angle,
            arc_angle: self.arc_angle,
            cap: self.cap,
        }
    }
}

/// Chart line, or the filled area under it when `area` is set
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CurveItem {
    pub name: Option<String>,
    pub step: f32,
    pub thickness: f32,
    pub area: bool,
    /// Height of the chart box, used to place the baseline
    pub height: f32,
    pub samples: Vec<f32>,
}

impl Default for CurveItem {
    fn default() -> Self {
        Self {
            name: None,
            step: 10.0,
            thickness: 2.0,
            area: false,
            height: 100.0,
            samples: Vec::new(),
        }
    }
}

/// Gradient evaluated at a few positions
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GradientItem {
    pub name: Option<String>,
    /// `#AARRGGBB`, `0xAARRGGBB` or `#RRGGBB`
    pub colors: Vec<String>,
    /// Stop offsets; spread evenly over [0, 1] when empty
    pub stops: Vec<f32>,
    pub angle: i32,
    /// Positions to evaluate
    pub at: Vec<f32>,
    /// Length of the lookup table to emit, none when 0
    pub table: usize,
}

impl GradientItem {
    pub fn spec(&self) -> Result<GradientSpec> {
        let colors = self
            .colors
            .iter()
            .map(|text| text.parse::<Color>())
            .collect::<Result<Vec<_>, _>>()?;

        let stops = if self.stops.is_empty() {
            even_stops(colors.len())
        } else {
            self.stops.clone()
        };

        Ok(GradientSpec::new(&colors, &stops, self.angle)?)
    }
}

/// `count` offsets spread from 0 to 1
pub fn even_stops(count: usize) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..count)
            .map(|i| i as f32 / (count - 1) as f32)
            .collect(),
    }
}

/// Eased motion from `from` to `to`, or a bounce on `from`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionItem {
    pub name: Option<String>,
    pub from: f32,
    /// Defaults to `from`
    pub to: Option<f32>,
    pub duration_ms: u64,
    pub easing: Option<Easing>,
    /// Bounce amplitude; exclusive with `easing`
    pub bounce: Option<f32>,
    /// Sampling interval of the emitted frames
    pub frame_ms: u64,
}

impl Default for MotionItem {
    fn default() -> Self {
        Self {
            name: None,
            from: 0.0,
            to: None,
            duration_ms: 300,
            easing: None,
            bounce: None,
            frame_ms: 16,
        }
    }
}

impl MotionItem {
    pub fn motion(&self) -> Result<Motion> {
        match (self.easing, self.bounce) {
            (Some(_), Some(_)) => {
                anyhow::bail!("A motion takes either an easing or a bounce amplitude, not both")
            }
            (_, Some(amplitude)) => Ok(Motion::bounce(self.from, self.duration_ms, amplitude)),
            (easing, None) => Ok(Motion::new(
                self.from,
                self.to.unwrap_or(self.from),
                self.duration_ms,
                easing.unwrap_or_default(),
            )),
        }
    }
}

/// Which second hand to emulate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandStyle {
    #[default]
    Linear,
    Tick,
    Quartic,
}

/// Watch-hand angles at a time of day
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HandsItem {
    pub name: Option<String>,
    /// `HH:MM`, `HH:MM:SS` or `HH:MM:SS.mmm`
    pub time: String,
    pub style: HandStyle,
}

impl Default for HandsItem {
    fn default() -> Self {
        Self {
            name: None,
            time: "10:10:30".to_string(),
            style: HandStyle::default(),
        }
    }
}

/// Milliseconds since midnight for a clock time
pub fn parse_clock_time(text: &str) -> Result<u64> {
    let invalid = || format!("Invalid time '{text}', expected HH:MM[:SS[.mmm]]");

    let mut parts = text.trim().split(':');
    let hours: u64 = parts
        .next()
        .unwrap_or_default()
        .parse()
        .with_context(invalid)?;
    let minutes: u64 = parts
        .next()
        .with_context(invalid)?
        .parse()
        .with_context(invalid)?;
    let seconds: f64 = match parts.next() {
        Some(seconds) => seconds.parse().with_context(invalid)?,
        None => 0.0,
    };
    if parts.next().is_some() || hours >= 24 || minutes >= 60 || !(0.0..60.0).contains(&seconds)
    {
        anyhow::bail!(invalid());
    }

    Ok((hours * 60 + minutes) * 60_000 + (seconds * 1_000.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scene() {
        let scene = SceneConfig::from_toml("").unwrap();
        assert!(scene.is_empty());
        assert_eq!(scene.scene.name, "scene");
    }

    #[test]
    fn test_arc_defaults() {
        let scene = SceneConfig::from_toml("[[arc]]\narc_angle = 90\n").unwrap();
        let descriptor = scene.arcs[0].descriptor();
        assert_eq!(descriptor.horizontal_diameter, 100.0);
        assert_eq!(descriptor.vertical_diameter, 100.0);
        assert_eq!(descriptor.arc_angle, 90.0);
        assert_eq!(descriptor.cap, Cap::Rounded);
    }

    #[test]
    fn test_ellipse_arc() {
        let scene = SceneConfig::from_toml(
            "[[arc]]\ndiameter = 120\nvertical_diameter = 80\ncap = \"perpendicular\"\n",
        )
        .unwrap();
        let descriptor = scene.arcs[0].descriptor();
        assert_eq!(descriptor.vertical_diameter, 80.0);
        assert_eq!(descriptor.cap, Cap::Perpendicular);
    }

    #[test]
    fn test_even_stops() {
        assert!(even_stops(0).is_empty());
        assert_eq!(even_stops(1), vec![0.0]);
        assert_eq!(even_stops(3), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_gradient_item() {
        let item = GradientItem {
            colors: vec!["#FFFFFFFF".into(), "0x00FFFFFF".into()],
            ..Default::default()
        };
        let spec = item.spec().unwrap();
        assert_eq!(spec.color_count(), 2);
        assert_eq!(spec.gradient_at(0.5), Color(0x7FFF_FFFF));

        let bad = GradientItem {
            colors: vec!["white".into()],
            ..Default::default()
        };
        assert!(bad.spec().is_err());
    }

    #[test]
    fn test_motion_item() {
        let eased = MotionItem {
            from: 0.0,
            to: Some(10.0),
            duration_ms: 100,
            ..Default::default()
        };
        assert_eq!(eased.motion().unwrap(), Motion::linear(0.0, 10.0, 100));

        let bounce = MotionItem {
            from: 1.0,
            bounce: Some(15.0),
            ..Default::default()
        };
        assert_eq!(bounce.motion().unwrap(), Motion::bounce(1.0, 300, 15.0));

        let both = MotionItem {
            easing: Some(Easing::CubicOut),
            bounce: Some(15.0),
            ..Default::default()
        };
        assert!(both.motion().is_err());
    }

    #[test]
    fn test_motion_easing_from_toml() {
        let scene = SceneConfig::from_toml(
            "[[motion]]\nfrom = 0\nto = 1\neasing = \"quart_in_out\"\n",
        )
        .unwrap();
        assert_eq!(scene.motions[0].easing, Some(Easing::QuartInOut));
    }

    #[test]
    fn test_parse_clock_time() {
        assert_eq!(parse_clock_time("00:00").unwrap(), 0);
        assert_eq!(parse_clock_time("01:02:03").unwrap(), 3_723_000);
        assert_eq!(parse_clock_time("13:45:30.5").unwrap(), 49_530_500);
        assert!(parse_clock_time("24:00").is_err());
        assert!(parse_clock_time("12").is_err());
        assert!(parse_clock_time("12:60").is_err());
        assert!(parse_clock_time("1:2:3:4").is_err());
        assert!(parse_clock_time("noon").is_err());
    }
}
