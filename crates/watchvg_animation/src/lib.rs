//! watchvg Animation
//!
//! Time-based values for watch faces.
//!
//! # Features
//!
//! - **Easing**: the classic quad/cubic/quart/quint/sine/circ/expo curves
//! - **Motions**: eased start-to-stop motions and a decaying bounce
//! - **Sequencing**: motions chained one after another or run side by side
//! - **Animator**: owner of running animations, ticked once per frame
//! - **Watch hands**: angle computers for linear, ticking and quartic hands
//!
//! # Example
//!
//! ```rust
//! use watchvg_animation::{Animator, Motion, MotionAnimation};
//!
//! let mut animator = Animator::new();
//! animator.start(MotionAnimation::new(
//!     Motion::bounce(100.0, 1000, 15.0),
//!     0,
//!     |scale| println!("hand scale: {scale}"),
//! ));
//!
//! let mut now = 0;
//! while animator.tick(now) {
//!     now += 16;
//! }
//! assert!(animator.is_empty());
//! ```

pub mod angle;
pub mod animation;
pub mod easing;
pub mod error;
pub mod motion;
pub mod values;

pub use angle::{
    hours_of_day, minutes_of_hour, seconds_of_minute, HandAngles, LinearAngles, QuarticAngles,
    TickAngles, WatchAngleComputer,
};
pub use animation::{
    Animation, AnimationId, Animator, MotionAnimation, ParallelAnimation, StackAnimation,
    ValueCallback,
};
pub use easing::Easing;
pub use error::AnimationError;
pub use motion::{Curve, Motion};
pub use values::Interpolate;
