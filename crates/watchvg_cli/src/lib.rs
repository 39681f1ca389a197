//! watchvg CLI support
//!
//! Scene files and the JSON reports the `watchvg` binary prints. Kept in a
//! library so the reports can be produced without spawning the binary.

pub mod config;
pub mod report;

pub use config::SceneConfig;
