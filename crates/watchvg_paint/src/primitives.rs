//! Geometric primitives
//!
//! Small shapes and gradient-line helpers shared by the arc and text styles.

use serde::{Deserialize, Serialize};
use watchvg_core::{Path, Point, Rect};

use crate::path::PathBuilder;

/// Control point distance for a quarter circle of radius 1
pub const CIRCLE_TANGENT: f32 = 0.552_284_75;

const RIGHT_ANGLE: f32 = 90.0;

/// Endpoints of a linear gradient
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GradientLine {
    pub start: Point,
    pub end: Point,
}

impl GradientLine {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Length of the gradient vector
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Closed circle path made of four cubic quarter arcs
///
/// Starts at the top of the circle and runs clockwise on screen.
pub fn circle_path(center: Point, radius: f32) -> Path {
    let k = CIRCLE_TANGENT * radius;
    let r = radius;
    PathBuilder::with_capacity(6)
        .move_to(center.x, center.y - r)
        .cubic_to_relative(k, 0.0, r, r - k, r, r)
        .cubic_to_relative(0.0, k, -r + k, r, -r, r)
        .cubic_to_relative(-k, 0.0, -r, -r + k, -r, -r)
        .cubic_to_relative(0.0, -k, r - k, -r, r, -r)
        .close()
        .build()
}

/// Circle of radius 1 centered on the origin
pub fn unit_circle_path() -> Path {
    circle_path(Point::ZERO, 1.0)
}

/// A filled dot of fixed radius, placed at render time
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilledCircle {
    radius: f32,
}

impl FilledCircle {
    pub const fn new(radius: f32) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Path of the circle centered on (x, y)
    pub fn path_at(&self, x: f32, y: f32) -> Path {
        circle_path(Point::new(x, y), self.radius)
    }
}

/// Gradient line across an arc of diameter `diameter`
///
/// The line goes through the arc center; `angle_deg` 0 points the gradient
/// from the top of the circle to the bottom.
pub fn arc_gradient_line(angle_deg: f32, diameter: f32) -> GradientLine {
    let radians = (angle_deg - RIGHT_ANGLE).to_radians();
    let half = diameter / 2.0;
    let x = radians.cos() * half;
    let y = radians.sin() * half;
    GradientLine::new(Point::new(x, y), Point::new(-x, -y))
}

/// Offset of the gradient end point for a text box of `width` x `height`
///
/// Angles below the box diagonal end on the right edge, steeper angles end
/// on the bottom edge.
pub fn text_gradient_end(angle_deg: f32, width: f32, height: f32) -> Point {
    let diagonal = (height / width).atan();
    let radians = angle_deg.to_radians();

    if radians < diagonal {
        Point::new(width, radians.tan() * width)
    } else {
        let tan = radians.tan();
        let x = if tan.is_nan() { 0.0 } else { height / tan };
        Point::new(x, height)
    }
}

/// Gradient line for a text box, starting at its top-left corner
pub fn text_gradient_line(angle_deg: f32, bounds: Rect) -> GradientLine {
    let start = bounds.origin;
    let end = text_gradient_end(angle_deg, bounds.width(), bounds.height());
    GradientLine::new(start, start.offset(end.x, end.y))
}
