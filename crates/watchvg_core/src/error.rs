//! Error types for watchvg

use thiserror::Error;

/// Input-contract violations reported by the path builders and gradients
///
/// All computations are deterministic; an error always means the caller passed
/// values outside the documented domain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Diameter or thickness outside the drawable range
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A sample series with no samples
    #[error("sample series is empty")]
    EmptyInput,

    /// Horizontal step that is zero, negative or not finite
    #[error("invalid horizontal step: {0}")]
    InvalidStep(f32),

    /// A gradient without any stop
    #[error("gradient has no stops")]
    EmptyGradient,

    /// Colors and stops of different lengths
    #[error("gradient has {colors} colors but {stops} stops")]
    GradientLengthMismatch { colors: usize, stops: usize },

    /// Stop positions going backwards
    #[error("gradient stop {index} ({offset}) is before the previous stop")]
    UnorderedStops { index: usize, offset: f32 },

    /// Stop position outside [0, 1]
    #[error("gradient stop {index} ({offset}) is outside [0, 1]")]
    StopOutOfRange { index: usize, offset: f32 },

    /// Text that is not a `#AARRGGBB` / `#RRGGBB` color
    #[error("invalid color: {0}")]
    InvalidColor(String),
}

/// Result type for watchvg operations
pub type Result<T> = std::result::Result<T, Error>;
