//! watchvg Paint
//!
//! Path builders for vector watch faces. Every builder is a pure function of
//! its parameters and returns a fresh [`Path`] centered on the origin; the
//! stateful wrappers ([`CircleArc`], [`ChartCurve`], [`ChartArea`]) only cache
//! the last outline together with the transform the renderer should apply.
//!
//! # Features
//!
//! - Thick circular and elliptic arcs with perpendicular or rounded caps
//! - Smooth chart lines (ribbons) and filled areas through sample series
//! - Unit circles and gradient-line helpers
//!
//! # Example
//!
//! ```rust
//! use watchvg_paint::{build_thick_arc_path, Cap};
//!
//! let path = build_thick_arc_path(100.0, 8.0, 90.0, -270.0, Cap::Rounded).unwrap();
//! assert!(path.is_closed());
//! ```

pub mod arc;
pub mod curve;
pub mod path;
pub mod primitives;

pub use arc::{
    build_thick_arc_path, build_thick_ellipse_arc_path, ArcDescriptor, ArcFill, Cap, CircleArc,
    CircleArcBuilder,
};
pub use curve::{build_area_path, build_curve_path, scale_samples, ChartArea, ChartCurve};
pub use path::PathBuilder;
pub use primitives::{
    arc_gradient_line, circle_path, text_gradient_end, text_gradient_line, unit_circle_path,
    FilledCircle, GradientLine,
};

// Core types used throughout the builders' signatures
pub use watchvg_core::{Color, Error, GradientSpec, Path, PathCommand, Point, Result};
