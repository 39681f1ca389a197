//! Evaluation of scene items into serializable reports

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use watchvg_animation::{
    HandAngles, LinearAngles, Motion, QuarticAngles, TickAngles, WatchAngleComputer,
};
use watchvg_core::{Color, GradientSpec, GradientStop, Path, Rect, Translation};
use watchvg_paint::{ArcDescriptor, ChartArea, ChartCurve};

use crate::config::{
    parse_clock_time, ArcItem, CurveItem, GradientItem, HandStyle, HandsItem, MotionItem,
    SceneConfig,
};

#[derive(Debug, Serialize)]
pub struct ArcReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub descriptor: ArcDescriptor,
    pub bounds: Rect,
    pub path: Path,
}

pub fn arc(item: &ArcItem) -> Result<ArcReport> {
    let descriptor = item.descriptor();
    let path = descriptor
        .build()
        .with_context(|| format!("Failed to build arc {}", label(&item.name)))?;

    Ok(ArcReport {
        name: item.name.clone(),
        descriptor,
        bounds: path.bounds(),
        path,
    })
}

#[derive(Debug, Serialize)]
pub struct CurveReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub area: bool,
    pub samples: usize,
    /// Translation placing the baseline inside the chart box
    pub transform: Translation,
    pub bounds: Rect,
    pub path: Path,
}

pub fn curve(item: &CurveItem) -> Result<CurveReport> {
    let built = if item.area {
        ChartArea::new(item.height, &item.samples, item.step, GradientSpec::default())
            .map(|area| (area.path().clone(), area.transform()))
    } else {
        ChartCurve::new(
            item.height,
            &item.samples,
            item.step,
            Color::WHITE,
            item.thickness,
        )
        .map(|curve| (curve.path().clone(), curve.transform()))
    };
    let (path, transform) =
        built.with_context(|| format!("Failed to build curve {}", label(&item.name)))?;

    Ok(CurveReport {
        name: item.name.clone(),
        area: item.area,
        samples: item.samples.len(),
        transform,
        bounds: path.bounds(),
        path,
    })
}

#[derive(Debug, Serialize)]
pub struct GradientSample {
    pub position: f32,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct GradientReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub angle: i32,
    pub stops: Vec<GradientStop>,
    pub samples: Vec<GradientSample>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub table: Vec<String>,
}

pub fn gradient(item: &GradientItem) -> Result<GradientReport> {
    let spec = item
        .spec()
        .with_context(|| format!("Invalid gradient {}", label(&item.name)))?;

    let samples = item
        .at
        .iter()
        .map(|&position| GradientSample {
            position,
            color: spec.gradient_at(position).to_string(),
        })
        .collect();

    let table = spec
        .lookup_table(item.table)
        .into_iter()
        .map(|color| color.to_string())
        .collect();

    Ok(GradientReport {
        name: item.name.clone(),
        angle: spec.angle(),
        stops: spec.stops().to_vec(),
        samples,
        table,
    })
}

#[derive(Debug, Serialize)]
pub struct Frame {
    pub t_ms: u64,
    pub value: f32,
}

#[derive(Debug, Serialize)]
pub struct MotionReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub motion: Motion,
    pub frames: Vec<Frame>,
}

pub fn motion(item: &MotionItem) -> Result<MotionReport> {
    let motion = item
        .motion()
        .with_context(|| format!("Invalid motion {}", label(&item.name)))?;

    let frames = motion
        .samples(item.frame_ms)
        .into_iter()
        .map(|(t_ms, value)| Frame { t_ms, value })
        .collect();

    Ok(MotionReport {
        name: item.name.clone(),
        motion,
        frames,
    })
}

#[derive(Debug, Serialize)]
pub struct HandsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub time_ms: u64,
    pub style: HandStyle,
    pub angles: HandAngles,
}

pub fn hands(item: &HandsItem) -> Result<HandsReport> {
    let time_ms = parse_clock_time(&item.time)?;
    let angles = match item.style {
        HandStyle::Linear => LinearAngles.hand_angles(time_ms),
        HandStyle::Tick => TickAngles.hand_angles(time_ms),
        HandStyle::Quartic => QuarticAngles.hand_angles(time_ms),
    };

    Ok(HandsReport {
        name: item.name.clone(),
        time_ms,
        style: item.style,
        angles,
    })
}

#[derive(Debug, Serialize)]
pub struct SceneReport {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arcs: Vec<ArcReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub curves: Vec<CurveReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gradients: Vec<GradientReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub motions: Vec<MotionReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hands: Vec<HandsReport>,
}

/// Evaluate every item of a scene, stopping at the first failure
pub fn scene(config: &SceneConfig) -> Result<SceneReport> {
    info!("Evaluating scene {} ({} items)", config.scene.name, config.len());

    let report = SceneReport {
        name: config.scene.name.clone(),
        arcs: config.arcs.iter().map(arc).collect::<Result<_>>()?,
        curves: config.curves.iter().map(curve).collect::<Result<_>>()?,
        gradients: config.gradients.iter().map(gradient).collect::<Result<_>>()?,
        motions: config.motions.iter().map(motion).collect::<Result<_>>()?,
        hands: config.hands.iter().map(hands).collect::<Result<_>>()?,
    };

    debug!(
        arcs = report.arcs.len(),
        curves = report.curves.len(),
        gradients = report.gradients.len(),
        motions = report.motions.len(),
        hands = report.hands.len(),
        "scene evaluated"
    );
    Ok(report)
}

fn label(name: &Option<String>) -> String {
    match name {
        Some(name) => format!("'{name}'"),
        None => "(unnamed)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchvg_core::PathCommand;

    #[test]
    fn test_arc_report_is_closed() {
        let item = ArcItem {
            arc_angle: 270.0,
            thickness: 10.0,
            ..Default::default()
        };
        let report = arc(&item).unwrap();
        assert!(report.path.is_closed());
        // the outer edge passes both horizontal extremes of a 270 degree sweep
        assert!(report.bounds.width() > 100.0);
    }

    #[test]
    fn test_arc_report_rejects_bad_geometry() {
        let item = ArcItem {
            name: Some("ring".into()),
            diameter: 10.0,
            thickness: 20.0,
            ..Default::default()
        };
        let message = format!("{:#}", arc(&item).unwrap_err());
        assert!(message.contains("'ring'"), "{message}");
        assert!(message.contains("invalid geometry"), "{message}");
    }

    #[test]
    fn test_curve_report() {
        let item = CurveItem {
            samples: vec![1.0, 4.0, 2.0],
            area: true,
            ..Default::default()
        };
        let report = curve(&item).unwrap();
        assert_eq!(report.samples, 3);
        assert_eq!(report.transform, Translation::new(0.0, 95.0));
        assert_eq!(report.path.commands().last(), Some(&PathCommand::Close));
    }

    #[test]
    fn test_curve_report_needs_samples() {
        assert!(curve(&CurveItem::default()).is_err());
    }

    #[test]
    fn test_gradient_report() {
        let item = GradientItem {
            colors: vec!["#FF000000".into(), "#FFFFFFFF".into()],
            at: vec![0.0, 1.0],
            table: 3,
            ..Default::default()
        };
        let report = gradient(&item).unwrap();
        assert_eq!(report.samples[0].color, "#FF000000");
        assert_eq!(report.samples[1].color, "#FFFFFFFF");
        assert_eq!(report.table.len(), 3);
        assert_eq!(report.stops.len(), 2);
    }

    #[test]
    fn test_motion_report_frames() {
        let item = MotionItem {
            from: 0.0,
            to: Some(10.0),
            duration_ms: 100,
            frame_ms: 40,
            ..Default::default()
        };
        let report = motion(&item).unwrap();
        let values: Vec<f32> = report.frames.iter().map(|f| f.value).collect();
        assert_eq!(values, vec![0.0, 4.0, 8.0, 10.0]);
    }

    #[test]
    fn test_hands_report() {
        let item = HandsItem {
            time: "03:00:15".into(),
            style: HandStyle::Tick,
            ..Default::default()
        };
        let report = hands(&item).unwrap();
        assert_eq!(report.time_ms, 10_815_000);
        assert!((report.angles.hour - 90.125).abs() < 1e-3);
        assert!((report.angles.minute - 1.5).abs() < 1e-3);
        assert_eq!(report.angles.second, 90.0);
    }

    #[test]
    fn test_scene_stops_on_error() {
        let config = SceneConfig::from_toml(
            "[[arc]]\narc_angle = 45\n\n[[curve]]\nname = \"empty\"\n",
        )
        .unwrap();
        let message = format!("{:#}", scene(&config).unwrap_err());
        assert!(message.contains("'empty'"), "{message}");
    }
}
