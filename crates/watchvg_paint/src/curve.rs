//! Chart curves
//!
//! Smooth paths through a series of samples placed `step` pixels apart. The
//! tangent at each sample is the average of the directions towards its two
//! neighbors, and control points sit a third of a step along the tangents.
//! Neighbor lookups wrap around the series, so the curve leaving the last
//! sample heads towards the first one.
//!
//! Samples grow upward: a sample `v` is drawn at `y = -v`.

use std::f32::consts::{FRAC_PI_2, PI};

use tracing::trace;
use watchvg_core::{Color, Error, GradientSpec, Path, Point, Result, Translation};

use crate::path::PathBuilder;
use crate::primitives::GradientLine;

const SMOOTH_FACTOR: f32 = 3.0;

/// Space kept between the chart baseline and the bottom of its box
const TOP_PADDING: f32 = 5.0;

fn sample_at(samples: &[f32], index: isize) -> f32 {
    samples[index.rem_euclid(samples.len() as isize) as usize]
}

fn validate(samples: &[f32], step: f32) -> Result<()> {
    if samples.is_empty() {
        return Err(Error::EmptyInput);
    }
    if !step.is_finite() || step <= 0.0 {
        return Err(Error::InvalidStep(step));
    }
    Ok(())
}

/// Tangent angle at `cur` for a curve going left to right
fn section_angle(prev: f32, cur: f32, next: f32, step: f32) -> f32 {
    ((next - cur).atan2(step) - (prev - cur).atan2(step)) / 2.0
}

fn initial_angle(samples: &[f32], step: f32) -> f32 {
    section_angle(
        sample_at(samples, -1),
        sample_at(samples, 0),
        sample_at(samples, 1),
        step,
    )
}

/// Closed area between the curve and the baseline `y = 0`
///
/// Runs from `x = 0` to `x = samples.len() * step`; the last segment comes
/// back to the first sample's value.
pub fn build_area_path(samples: &[f32], step: f32) -> Result<Path> {
    validate(samples, step)?;

    let first = samples[0];
    let mut angle = initial_angle(samples, step);
    let mut builder = PathBuilder::with_capacity(samples.len() + 4)
        .move_to(0.0, 0.0)
        .line_to(0.0, -first);

    let mut x = 0.0;
    for i in 1..=samples.len() as isize {
        x = i as f32 * step;
        let prev = sample_at(samples, i - 1);
        let cur = sample_at(samples, i);
        let next = sample_at(samples, i + 1);

        let section = section_angle(prev, cur, next, step);
        let cx1 = x - step + step * angle.cos() / SMOOTH_FACTOR;
        let cy1 = prev + step * angle.sin() / SMOOTH_FACTOR;
        let cx2 = x - step * section.cos() / SMOOTH_FACTOR;
        let cy2 = cur - step * section.sin() / SMOOTH_FACTOR;
        builder = builder.cubic_to(cx1, -cy1, cx2, -cy2, x, -cur);
        angle = section;
    }

    let path = builder.line_to(x, 0.0).close().build();
    trace!(samples = samples.len(), step, "area path rebuilt");
    Ok(path)
}

/// Closed ribbon of constant `thickness` centered on the curve
///
/// The upper edge is drawn left to right, the lower edge right to left, and
/// both ends are flat.
pub fn build_curve_path(samples: &[f32], step: f32, thickness: f32) -> Result<Path> {
    validate(samples, step)?;
    if !thickness.is_finite() || thickness < 0.0 {
        return Err(Error::InvalidGeometry(format!(
            "curve thickness must be a non-negative number, got {thickness}"
        )));
    }

    let count = samples.len() as isize;
    let half = thickness / 2.0;
    let mut ribbon = Ribbon {
        builder: PathBuilder::with_capacity(2 * samples.len() + 4)
            .move_to(0.0, -samples[0] - half),
        angle: initial_angle(samples, step),
    };

    let mut x = 0.0;
    for i in 1..=count {
        x = i as f32 * step;
        ribbon.plot(
            sample_at(samples, i - 1),
            sample_at(samples, i),
            sample_at(samples, i + 1),
            x,
            step,
            half,
        );
    }

    ribbon.builder = ribbon.builder.line_to_relative(0.0, thickness);

    for i in (0..count).rev() {
        x -= step;
        ribbon.plot(
            sample_at(samples, i + 1),
            sample_at(samples, i),
            sample_at(samples, i - 1),
            x,
            -step,
            -half,
        );
    }

    let path = ribbon.builder.close().build();
    trace!(samples = samples.len(), step, thickness, "curve path rebuilt");
    Ok(path)
}

/// Pen state while tracing one edge of a ribbon
struct Ribbon {
    builder: PathBuilder,
    /// Tangent at the previously plotted sample
    angle: f32,
}

impl Ribbon {
    /// Cubic from the previous sample to `cur`, both pushed `offset` pixels
    /// away from the curve along their normals
    ///
    /// `step` is negative when walking right to left.
    fn plot(&mut self, prev: f32, cur: f32, next: f32, x: f32, step: f32, offset: f32) {
        let mut section = (PI + (next - cur).atan2(step) + (prev - cur).atan2(-step)) / 2.0;
        while section > FRAC_PI_2 {
            section -= PI;
        }
        while section < -FRAC_PI_2 {
            section += PI;
        }

        let prev_angle = self.angle;
        let x_prev = x - step + offset * (prev_angle + FRAC_PI_2).cos();
        let y_prev = prev + offset * (prev_angle + FRAC_PI_2).sin();
        let x_new = x + offset * (section + FRAC_PI_2).cos();
        let y_new = cur + offset * (section + FRAC_PI_2).sin();

        let cx1 = x_prev + step * prev_angle.cos() / SMOOTH_FACTOR;
        let cy1 = y_prev + step * prev_angle.sin() / SMOOTH_FACTOR;
        let cx2 = x_new - step * section.cos() / SMOOTH_FACTOR;
        let cy2 = y_new - step * section.sin() / SMOOTH_FACTOR;

        let builder = std::mem::take(&mut self.builder);
        self.builder = builder.cubic_to(cx1, -cy1, cx2, -cy2, x_new, -y_new);
        self.angle = section;
    }
}

/// Samples multiplied by `ratio`, used to grow a chart from its baseline
pub fn scale_samples(samples: &[f32], ratio: f32) -> Vec<f32> {
    samples.iter().map(|v| v * ratio).collect()
}

/// Translation putting the chart baseline near the bottom of a box
fn baseline(height: f32) -> Translation {
    Translation::new(0.0, height - TOP_PADDING)
}

/// A stroked chart line
///
/// The outline is recomputed from scratch on every [`ChartCurve::set_data`].
#[derive(Clone, Debug)]
pub struct ChartCurve {
    step: f32,
    thickness: f32,
    color: Color,
    height: f32,
    path: Path,
}

impl ChartCurve {
    pub fn new(height: f32, samples: &[f32], step: f32, color: Color, thickness: f32) -> Result<Self> {
        Ok(Self {
            path: build_curve_path(samples, step, thickness)?,
            step,
            thickness,
            color,
            height,
        })
    }

    /// Replace the plotted samples
    pub fn set_data(&mut self, samples: &[f32]) -> Result<()> {
        self.path = build_curve_path(samples, self.step, self.thickness)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn transform(&self) -> Translation {
        baseline(self.height)
    }
}

/// A gradient-filled area under a chart line
#[derive(Clone, Debug)]
pub struct ChartArea {
    step: f32,
    height: f32,
    gradient: GradientSpec,
    path: Path,
}

impl ChartArea {
    pub fn new(height: f32, samples: &[f32], step: f32, gradient: GradientSpec) -> Result<Self> {
        Ok(Self {
            path: build_area_path(samples, step)?,
            step,
            height,
            gradient,
        })
    }

    /// Replace the plotted samples
    pub fn set_data(&mut self, samples: &[f32]) -> Result<()> {
        self.path = build_area_path(samples, self.step)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gradient(&self) -> &GradientSpec {
        &self.gradient
    }

    pub fn transform(&self) -> Translation {
        baseline(self.height)
    }

    /// Gradient line in path coordinates
    ///
    /// The gradient spans the chart height starting from the top of the box,
    /// rotated by the gradient angle.
    pub fn gradient_line(&self) -> GradientLine {
        let top = -(self.height - TOP_PADDING);
        let (sin, cos) = (self.gradient.angle() as f32).to_radians().sin_cos();
        GradientLine::new(
            Point::new(0.0, top),
            Point::new(self.height * cos, self.height * sin + top),
        )
    }
}
