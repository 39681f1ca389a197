//! watchvg Core Types
//!
//! Shared primitives for the watchvg geometry engine:
//!
//! - **Geometry**: points, sizes, rectangles and translations in pixel space
//! - **Paths**: move / line / cubic / close command lists, the single output
//!   format of every path builder
//! - **Colors**: packed 32-bit ARGB with truncating per-channel blending
//! - **Gradients**: validated multi-stop gradients with boundary clamping
//!
//! # Example
//!
//! ```rust
//! use watchvg_core::{Color, GradientSpec};
//!
//! let spec = GradientSpec::new(
//!     &[Color(0xFFFF_FFFF), Color(0x00FF_FFFF)],
//!     &[0.0, 1.0],
//!     0,
//! )
//! .unwrap();
//!
//! assert_eq!(spec.gradient_at(0.5), Color(0x7FFF_FFFF));
//! assert_eq!(spec.gradient_at(-1.0), Color(0xFFFF_FFFF));
//! ```

pub mod color;
pub mod error;
pub mod geometry;
pub mod gradient;
pub mod path;

pub use color::{blend, make_gradient_array, Color};
pub use error::{Error, Result};
pub use geometry::{Point, Rect, Size, Translation};
pub use gradient::{gradient_at, GradientSpec, GradientStop, GradientStops};
pub use path::{Path, PathCommand};
