//! Thick arc outlines
//!
//! A thick arc is the band between two concentric elliptic arcs, closed by a
//! cap at each end. Both arcs are approximated with cubic Bézier fragments of
//! at most 90 degrees each, which keeps the radial error far below a pixel at
//! watch resolutions.
//!
//! Angles follow the usual screen convention for dials: 0 degrees is at
//! 3 o'clock and positive sweeps turn counter-clockwise. The y axis points
//! down, so every computed y is negated.

use std::f32::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use watchvg_core::{Color, Error, GradientSpec, Path, Point, Result, Size, Translation};

use crate::path::PathBuilder;
use crate::primitives::{arc_gradient_line, GradientLine};

const FULL_ANGLE: f32 = 360.0;

/// Sections of a full turn, plus one for rounding at exactly 360 degrees
const MAX_SECTIONS: usize = 5;

/// Tangent factor of a rounded cap (a half circle drawn as one cubic)
const CAP_TANGENT: f32 = 1.33;

/// Shape of the two ends of a thick arc
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cap {
    /// Straight radial edge
    Perpendicular,
    /// Half circle spanning the thickness
    #[default]
    Rounded,
}

/// Parameters of a thick elliptic arc
///
/// Diameters are measured along the middle of the band, so the outer edge
/// extends `thickness / 2` beyond them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcDescriptor {
    pub horizontal_diameter: f32,
    pub vertical_diameter: f32,
    pub thickness: f32,
    /// Start angle in degrees
    pub start_angle: f32,
    /// Sweep in degrees, negative for clockwise
    pub arc_angle: f32,
    pub cap: Cap,
}

impl Default for ArcDescriptor {
    fn default() -> Self {
        Self::circle(100.0, 1.0, 0.0, 0.0, Cap::Rounded)
    }
}

impl ArcDescriptor {
    /// Circular arc: both diameters equal
    pub const fn circle(
        diameter: f32,
        thickness: f32,
        start_angle: f32,
        arc_angle: f32,
        cap: Cap,
    ) -> Self {
        Self {
            horizontal_diameter: diameter,
            vertical_diameter: diameter,
            thickness,
            start_angle,
            arc_angle,
            cap,
        }
    }

    /// Check diameters, thickness and sweep
    ///
    /// Diameters must be positive and the thickness must fit inside the
    /// smaller one, otherwise the inner edge would cross the center. A finite
    /// sweep is limited to one full turn either way.
    pub fn validate(&self) -> Result<()> {
        let Self {
            horizontal_diameter: h,
            vertical_diameter: v,
            thickness,
            ..
        } = *self;

        if !(h > 0.0 && v > 0.0) {
            return Err(Error::InvalidGeometry(format!(
                "diameters must be positive, got {h} x {v}"
            )));
        }
        if !(thickness >= 0.0) {
            return Err(Error::InvalidGeometry(format!(
                "thickness must not be negative, got {thickness}"
            )));
        }
        if thickness > h.min(v) {
            return Err(Error::InvalidGeometry(format!(
                "thickness {thickness} exceeds diameter {}",
                h.min(v)
            )));
        }
        if self.arc_angle.is_finite() && self.arc_angle.abs() > FULL_ANGLE {
            return Err(Error::InvalidGeometry(format!(
                "sweep {} exceeds a full turn",
                self.arc_angle
            )));
        }
        Ok(())
    }

    /// Start angle and non-negative sweep, both in degrees
    ///
    /// A negative sweep is turned around so that it starts from its far end;
    /// the start is then reduced modulo 360 (keeping its sign).
    pub fn normalized_angles(&self) -> (f32, f32) {
        let (mut start, mut sweep) = (self.start_angle, self.arc_angle);
        if sweep < 0.0 {
            start += sweep;
            sweep = -sweep;
        }
        (start % FULL_ANGLE, sweep)
    }

    /// Validate and build the closed outline
    pub fn build(&self) -> Result<Path> {
        self.validate()?;
        Ok(self.outline())
    }

    /// Outline of an already validated descriptor
    pub(crate) fn outline(&self) -> Path {
        let (start, sweep) = self.normalized_angles();
        let t = self.thickness;
        let outer = Radii::new(
            (self.horizontal_diameter + t) / 2.0,
            (self.vertical_diameter + t) / 2.0,
        );
        let inner = Radii::new(
            (self.horizontal_diameter - t) / 2.0,
            (self.vertical_diameter - t) / 2.0,
        );

        let path = approximate_thick_arc(
            outer,
            inner,
            start.to_radians(),
            sweep.to_radians(),
            self.cap,
        );
        trace!(
            start,
            sweep,
            commands = path.len(),
            "thick arc outline rebuilt"
        );
        path
    }
}

/// Outline of a thick circular arc; see [`build_thick_ellipse_arc_path`]
pub fn build_thick_arc_path(
    diameter: f32,
    thickness: f32,
    start_angle: f32,
    arc_angle: f32,
    cap: Cap,
) -> Result<Path> {
    ArcDescriptor::circle(diameter, thickness, start_angle, arc_angle, cap).build()
}

/// Outline of a thick elliptic arc centered on the origin
///
/// The path starts on the outer edge at the start angle, follows the outer
/// arc, draws the end cap, comes back along the inner arc and closes with the
/// start cap.
pub fn build_thick_ellipse_arc_path(
    horizontal_diameter: f32,
    vertical_diameter: f32,
    thickness: f32,
    start_angle: f32,
    arc_angle: f32,
    cap: Cap,
) -> Result<Path> {
    ArcDescriptor {
        horizontal_diameter,
        vertical_diameter,
        thickness,
        start_angle,
        arc_angle,
        cap,
    }
    .build()
}

#[derive(Clone, Copy, Debug)]
struct Radii {
    x: f32,
    y: f32,
}

impl Radii {
    fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn is_collapsed(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Point of the ellipse at `angle` radians (y down)
    fn point_at(&self, angle: f32) -> Point {
        Point::new(self.x * angle.cos(), -self.y * angle.sin())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Angles in radians, `sweep >= 0`
fn approximate_thick_arc(outer: Radii, inner: Radii, start: f32, sweep: f32, cap: Cap) -> Path {
    let end = start + sweep;

    // Fragments never exceed a quarter turn for sweeps up to a full turn.
    // A non-finite sweep gets a single fragment and yields non-finite points.
    let sections = if sweep.is_finite() {
        (1 + (sweep / FRAC_PI_2) as usize).min(MAX_SECTIONS)
    } else {
        1
    };
    let section = sweep / sections as f32;
    let tangent = 4.0 * (section / 4.0).tan() / 3.0;

    let outer_start = outer.point_at(start);
    let inner_start = inner.point_at(start);
    let outer_end = outer.point_at(end);
    let inner_end = inner.point_at(end);
    let cap_radius = (outer.x - inner.x) / 2.0;

    let has_sweep = sweep > 0.0;
    let mut builder =
        PathBuilder::with_capacity(2 * sections + 4).move_to(outer_start.x, outer_start.y);

    if has_sweep {
        builder = sub_arc(builder, outer, start, section, sections, tangent, Direction::Forward);
    }

    builder = match cap {
        Cap::Perpendicular => builder.line_to(inner_end.x, inner_end.y),
        Cap::Rounded => rounded_cap(
            builder,
            outer_end.midpoint(inner_end),
            cap_radius,
            end,
            end + PI,
        ),
    };

    if has_sweep && !inner.is_collapsed() {
        builder = sub_arc(builder, inner, start, section, sections, tangent, Direction::Backward);
    }

    builder = match cap {
        Cap::Perpendicular => builder.line_to(outer_start.x, outer_start.y),
        Cap::Rounded => rounded_cap(
            builder,
            inner_start.midpoint(outer_start),
            cap_radius,
            start + PI,
            start,
        ),
    };

    builder.close().build()
}

fn rounded_cap(builder: PathBuilder, center: Point, radius: f32, from: f32, to: f32) -> PathBuilder {
    arc_fragment(
        builder,
        center,
        Radii::new(radius, radius),
        from,
        to,
        CAP_TANGENT,
        Direction::Forward,
    )
}

fn sub_arc(
    mut builder: PathBuilder,
    radii: Radii,
    start: f32,
    section: f32,
    sections: usize,
    tangent: f32,
    direction: Direction,
) -> PathBuilder {
    for i in 0..sections {
        let factor = match direction {
            Direction::Forward => i,
            Direction::Backward => sections - 1 - i,
        };
        let from = start + factor as f32 * section;
        builder = arc_fragment(
            builder,
            Point::ZERO,
            radii,
            from,
            from + section,
            tangent,
            direction,
        );
    }
    builder
}

/// One cubic approximating the elliptic arc from `from` to `to`
///
/// Backward fragments are emitted from `to` back to `from`.
fn arc_fragment(
    builder: PathBuilder,
    center: Point,
    radii: Radii,
    from: f32,
    to: f32,
    tangent: f32,
    direction: Direction,
) -> PathBuilder {
    let (sin_a, cos_a) = from.sin_cos();
    let (sin_b, cos_b) = to.sin_cos();

    let a = radii.point_at(from);
    let b = radii.point_at(to);
    let c = a.offset(radii.x * tangent * -sin_a, radii.y * tangent * -cos_a);
    let d = b.offset(radii.x * tangent * sin_b, radii.y * tangent * cos_b);

    let [a, b, c, d] = [a, b, c, d].map(|p| p.offset(center.x, center.y));

    match direction {
        Direction::Forward => builder.cubic_to(c.x, c.y, d.x, d.y, b.x, b.y),
        Direction::Backward => builder.cubic_to(d.x, d.y, c.x, c.y, a.x, a.y),
    }
}

/// How a [`CircleArc`] is filled
#[derive(Clone, Debug, PartialEq)]
pub enum ArcFill {
    Solid(Color),
    Gradient {
        spec: GradientSpec,
        line: GradientLine,
    },
}

/// A thick circular arc whose sweep changes over time
///
/// Everything but the sweep is fixed at build time. Each call to
/// [`CircleArc::set_arc_angle`] rebuilds the outline from scratch; the path is
/// centered on the origin and placed with [`CircleArc::transform`].
#[derive(Clone, Debug)]
pub struct CircleArc {
    descriptor: ArcDescriptor,
    center: Point,
    fill: ArcFill,
    path: Path,
}

impl CircleArc {
    pub fn builder() -> CircleArcBuilder {
        CircleArcBuilder::new()
    }

    /// Change the sweep and rebuild the outline
    ///
    /// The sweep is clamped to one full turn either way.
    pub fn set_arc_angle(&mut self, arc_angle: f32) {
        self.descriptor.arc_angle = arc_angle.clamp(-FULL_ANGLE, FULL_ANGLE);
        self.path = self.descriptor.outline();
    }

    pub fn arc_angle(&self) -> f32 {
        self.descriptor.arc_angle
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn descriptor(&self) -> &ArcDescriptor {
        &self.descriptor
    }

    pub fn diameter(&self) -> f32 {
        self.descriptor.horizontal_diameter
    }

    pub fn thickness(&self) -> f32 {
        self.descriptor.thickness
    }

    pub fn start_angle(&self) -> f32 {
        self.descriptor.start_angle
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn fill(&self) -> &ArcFill {
        &self.fill
    }

    /// Translation placing the outline on its center
    pub fn transform(&self) -> Translation {
        Translation::new(self.center.x, self.center.y)
    }
}

/// Builder for [`CircleArc`]
#[derive(Clone, Debug)]
pub struct CircleArcBuilder {
    center: Point,
    diameter: f32,
    thickness: f32,
    start_angle: f32,
    color: Color,
    cap: Cap,
    gradient: Option<GradientSpec>,
    fixed_gradient: bool,
}

impl Default for CircleArcBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CircleArcBuilder {
    pub const DEFAULT_THICKNESS: f32 = 1.0;
    pub const DEFAULT_DIAMETER: f32 = 100.0;
    pub const DEFAULT_START_ANGLE: f32 = 0.0;

    pub fn new() -> Self {
        Self {
            center: Point::ZERO,
            diameter: Self::DEFAULT_DIAMETER,
            thickness: Self::DEFAULT_THICKNESS,
            start_angle: Self::DEFAULT_START_ANGLE,
            color: Color::BLACK,
            cap: Cap::Rounded,
            gradient: None,
            fixed_gradient: true,
        }
    }

    pub fn center(mut self, x: f32, y: f32) -> Self {
        self.center = Point::new(x, y);
        self
    }

    pub fn diameter(mut self, diameter: f32) -> Self {
        self.diameter = diameter;
        self
    }

    /// Fit the arc, outer edge included, inside a widget of `size`
    ///
    /// Uses the current thickness, so set it first.
    pub fn size(mut self, size: Size) -> Self {
        self.diameter = size.width.min(size.height) - self.thickness - 1.0;
        self
    }

    pub fn thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn start_angle(mut self, start_angle: f32) -> Self {
        self.start_angle = start_angle;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn cap(mut self, cap: Cap) -> Self {
        self.cap = cap;
        self
    }

    /// Fill with a gradient instead of the solid color
    pub fn gradient(mut self, gradient: GradientSpec) -> Self {
        self.gradient = Some(gradient);
        self
    }

    /// When not fixed, the gradient line follows the arc start angle instead
    /// of the gradient's own angle
    pub fn fixed_gradient(mut self, fixed: bool) -> Self {
        self.fixed_gradient = fixed;
        self
    }

    /// Build the arc with an empty sweep
    pub fn build(self) -> Result<CircleArc> {
        let descriptor = ArcDescriptor::circle(
            self.diameter,
            self.thickness,
            self.start_angle,
            0.0,
            self.cap,
        );
        descriptor.validate()?;

        let fill = match self.gradient {
            Some(spec) => {
                let angle = if self.fixed_gradient {
                    spec.angle() as f32
                } else {
                    self.start_angle
                };
                let line = arc_gradient_line(angle, self.diameter);
                ArcFill::Gradient { spec, line }
            }
            None => ArcFill::Solid(self.color),
        };

        debug!(
            diameter = self.diameter,
            thickness = self.thickness,
            start_angle = self.start_angle,
            "circle arc built"
        );

        Ok(CircleArc {
            path: descriptor.outline(),
            descriptor,
            center: self.center,
            fill,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchvg_core::PathCommand;

    fn tolerance(diameter: f32) -> f32 {
        1e-4 * diameter.max(1.0)
    }

    fn assert_closed(path: &Path, diameter: f32) {
        assert!(path.is_closed());
        let first = path.first_point().unwrap();
        let last = path.end_point().unwrap();
        assert!(
            first.approx_eq(last, tolerance(diameter)),
            "open outline: {first:?} vs {last:?}"
        );
    }

    fn cubic_count(path: &Path) -> usize {
        path.commands()
            .iter()
            .filter(|c| matches!(c, PathCommand::CubicTo { .. }))
            .count()
    }

    #[test]
    fn test_outline_is_closed() {
        for cap in [Cap::Perpendicular, Cap::Rounded] {
            for (start, sweep) in [(0.0, 45.0), (90.0, 180.0), (-30.0, 300.0), (10.0, -200.0)] {
                let path = build_thick_arc_path(100.0, 10.0, start, sweep, cap).unwrap();
                assert_closed(&path, 100.0);
            }
        }
    }

    #[test]
    fn test_ellipse_outline_is_closed() {
        let path = build_thick_ellipse_arc_path(120.0, 60.0, 8.0, 20.0, 250.0, Cap::Rounded).unwrap();
        assert_closed(&path, 120.0);
    }

    #[test]
    fn test_perpendicular_outline_vertices() {
        let path = build_thick_arc_path(100.0, 10.0, 0.0, 60.0, Cap::Perpendicular).unwrap();
        let vertices: Vec<Point> = path.vertices().collect();
        let eps = tolerance(100.0);
        let (sin, cos) = 60f32.to_radians().sin_cos();

        // outer start, outer end, inner end, inner start, outer start
        assert!(vertices[0].approx_eq(Point::new(55.0, 0.0), eps));
        assert!(vertices[1].approx_eq(Point::new(55.0 * cos, -55.0 * sin), eps));
        assert!(vertices[2].approx_eq(Point::new(45.0 * cos, -45.0 * sin), eps));
        assert!(vertices[3].approx_eq(Point::new(45.0, 0.0), eps));
        assert_eq!(vertices[4], vertices[0]);
        assert_eq!(path.len(), 6);
    }

    #[test]
    fn test_section_count() {
        let quarter = build_thick_arc_path(100.0, 10.0, 0.0, 45.0, Cap::Perpendicular).unwrap();
        assert_eq!(cubic_count(&quarter), 2);

        // 135 degrees needs two sections per edge, plus the two caps
        let wide = build_thick_arc_path(100.0, 10.0, 0.0, 135.0, Cap::Rounded).unwrap();
        assert_eq!(cubic_count(&wide), 6);
        assert_eq!(wide.len(), 8);
    }

    #[test]
    fn test_negative_sweep_symmetry() {
        for cap in [Cap::Perpendicular, Cap::Rounded] {
            let negative = build_thick_arc_path(100.0, 12.0, 30.0, -75.0, cap).unwrap();
            let positive = build_thick_arc_path(100.0, 12.0, 30.0 - 75.0, 75.0, cap).unwrap();
            assert_eq!(negative, positive);
        }
    }

    #[test]
    fn test_start_angle_wraps() {
        let wrapped = build_thick_arc_path(80.0, 6.0, 370.0, 30.0, Cap::Rounded).unwrap();
        let plain = build_thick_arc_path(80.0, 6.0, 10.0, 30.0, Cap::Rounded).unwrap();
        assert_eq!(wrapped, plain);
    }

    #[test]
    fn test_normalized_angles() {
        let d = ArcDescriptor::circle(10.0, 1.0, 10.0, -30.0, Cap::Rounded);
        assert_eq!(d.normalized_angles(), (-20.0, 30.0));
        let d = ArcDescriptor::circle(10.0, 1.0, 725.0, 10.0, Cap::Rounded);
        assert_eq!(d.normalized_angles(), (5.0, 10.0));
    }

    #[test]
    fn test_full_thickness_has_no_nan() {
        for cap in [Cap::Perpendicular, Cap::Rounded] {
            let path = build_thick_arc_path(50.0, 50.0, 0.0, 120.0, cap).unwrap();
            assert!(path.points().all(|p| p.x.is_finite() && p.y.is_finite()));
            assert_closed(&path, 50.0);
        }
        let wedge = build_thick_arc_path(50.0, 50.0, 0.0, 60.0, Cap::Perpendicular).unwrap();
        // outer arc, line to the center, line back out
        assert_eq!(wedge.len(), 5);
    }

    #[test]
    fn test_zero_sweep() {
        let bar = build_thick_arc_path(100.0, 10.0, 0.0, 0.0, Cap::Perpendicular).unwrap();
        assert_eq!(bar.len(), 4);
        assert_closed(&bar, 100.0);

        let dot = build_thick_arc_path(100.0, 10.0, 0.0, 0.0, Cap::Rounded).unwrap();
        assert_eq!(cubic_count(&dot), 2);
        assert_closed(&dot, 100.0);
    }

    #[test]
    fn test_invalid_geometry() {
        let cases = [
            (0.0, 1.0),
            (-10.0, 1.0),
            (f32::NAN, 1.0),
            (10.0, -1.0),
            (10.0, 11.0),
        ];
        for (diameter, thickness) in cases {
            let result = build_thick_arc_path(diameter, thickness, 0.0, 90.0, Cap::Rounded);
            assert!(
                matches!(result, Err(Error::InvalidGeometry(_))),
                "{diameter} / {thickness} accepted"
            );
        }
        let result = build_thick_ellipse_arc_path(100.0, 20.0, 30.0, 0.0, 90.0, Cap::Rounded);
        assert!(matches!(result, Err(Error::InvalidGeometry(_))));
    }

    #[test]
    fn test_sweep_limited_to_full_turn() {
        let full = build_thick_arc_path(100.0, 10.0, 0.0, 360.0, Cap::Rounded).unwrap();
        assert!(cubic_count(&full) <= 2 * MAX_SECTIONS + 2);
        assert_closed(&full, 100.0);
        assert!(build_thick_arc_path(100.0, 10.0, 0.0, -360.0, Cap::Rounded).is_ok());

        for sweep in [360.5, -361.0, 1.0e13, -1.0e21] {
            let result = build_thick_arc_path(100.0, 10.0, 0.0, sweep, Cap::Rounded);
            assert!(
                matches!(result, Err(Error::InvalidGeometry(_))),
                "{sweep} accepted"
            );
        }
    }

    #[test]
    fn test_non_finite_sweep_is_not_validated() {
        let path = build_thick_arc_path(100.0, 10.0, 0.0, f32::INFINITY, Cap::Rounded).unwrap();
        assert!(path.is_closed());
        assert!(path.len() <= 8);
    }

    #[test]
    fn test_circle_arc_clamps_sweep() {
        let mut arc = CircleArc::builder().thickness(10.0).build().unwrap();
        arc.set_arc_angle(1.0e21);
        assert_eq!(arc.arc_angle(), 360.0);
        assert_eq!(
            arc.path(),
            &build_thick_arc_path(100.0, 10.0, 0.0, 360.0, Cap::Rounded).unwrap()
        );
        arc.set_arc_angle(-1.0e13);
        assert_eq!(arc.arc_angle(), -360.0);
    }

    #[test]
    fn test_descriptor_deserializes_with_defaults() {
        let d: ArcDescriptor =
            serde_json::from_str(r#"{"thickness":4.0,"arc_angle":90.0,"cap":"perpendicular"}"#)
                .unwrap();
        assert_eq!(d.horizontal_diameter, 100.0);
        assert_eq!(d.thickness, 4.0);
        assert_eq!(d.cap, Cap::Perpendicular);
    }

    #[test]
    fn test_circle_arc_rebuilds_on_sweep_change() {
        let mut arc = CircleArc::builder()
            .thickness(10.0)
            .size(Size::new(121.0, 200.0))
            .center(60.0, 60.0)
            .build()
            .unwrap();
        assert_eq!(arc.diameter(), 110.0);
        assert_eq!(arc.transform(), Translation::new(60.0, 60.0));
        assert_eq!(arc.fill(), &ArcFill::Solid(Color::BLACK));

        // the outline starts on the outer edge, right of the center
        let start = arc.transform().apply(arc.path().first_point().unwrap());
        assert_eq!(start, Point::new(120.0, 60.0));

        let empty = arc.path().clone();
        arc.set_arc_angle(200.0);
        assert_ne!(arc.path(), &empty);
        assert_eq!(
            arc.path(),
            &build_thick_arc_path(110.0, 10.0, 0.0, 200.0, Cap::Rounded).unwrap()
        );
    }

    #[test]
    fn test_circle_arc_gradient_line() {
        let spec = GradientSpec::two_stop(Color::RED, Color::BLUE, 90);
        let fixed = CircleArc::builder()
            .start_angle(180.0)
            .gradient(spec.clone())
            .build()
            .unwrap();
        let follow = CircleArc::builder()
            .start_angle(180.0)
            .gradient(spec)
            .fixed_gradient(false)
            .build()
            .unwrap();

        match (fixed.fill(), follow.fill()) {
            (ArcFill::Gradient { line: a, .. }, ArcFill::Gradient { line: b, .. }) => {
                assert_eq!(*a, arc_gradient_line(90.0, 100.0));
                assert_eq!(*b, arc_gradient_line(180.0, 100.0));
            }
            other => panic!("expected gradient fills, got {other:?}"),
        }
    }

    #[test]
    fn test_circle_arc_builder_rejects_bad_size() {
        let result = CircleArc::builder().thickness(10.0).size(Size::new(8.0, 8.0)).build();
        assert!(result.is_err());
    }
}
