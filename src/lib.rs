//! Squat depth detection from pose landmark trajectories.
//!
//! An external pose extractor writes one normalized y coordinate per frame
//! for each hip and knee. This crate reads those samples, finds the strict
//! local minima of each hip trajectory and checks whether the hip sat above
//! the knee at any of them. Either side passing is enough.
//!
//! ```ignore
//! use squat_depth::depth::overall_has_depth;
//!
//! let knee = [0.5; 5];
//! let hip = [0.8, 0.8, 0.3, 0.8, 0.8];
//! assert!(overall_has_depth(&hip, &knee, &hip, &knee)?);
//! ```

use std::path::Path;

pub mod cli;
pub mod config;
pub mod coords;
pub mod depth;
pub mod error;
pub mod landmarks;
pub mod source;
pub mod trajectory;

pub use config::Config;
pub use depth::{overall_has_depth, side_has_depth, DepthAnalyzer, DepthReport, EmptyPolicy};
pub use error::{DepthError, Error, SourceError};
pub use trajectory::{Side, TrajectorySet};

pub type Result<T> = std::result::Result<T, Error>;

/// Read `source` and judge the squat it contains.
pub fn check_depth(source: &Path, config: &Config) -> Result<DepthReport> {
    let set = source::load_trajectories(source, config.warn_out_of_range)?;
    let report = DepthAnalyzer::with_empty_policy(config.empty_policy).analyze(&set)?;
    Ok(report)
}
