//! Error types for the animation crate

use thiserror::Error;

/// Errors raised while configuring motions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// Easing name that matches no known curve
    #[error("unknown easing '{0}'")]
    UnknownEasing(String),
}
