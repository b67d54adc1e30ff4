//! Squat depth detection.
//!
//! A side reaches depth when, at some strict local minimum of the hip
//! trajectory, the hip sits above the knee in image space
//! (`hip[i] < knee[i]`, see [`crate::coords`]). The two sides are judged
//! independently and combined with logical OR.
//!
//! Comparisons are plain floating-point comparisons: a NaN sample can never
//! form a minimum nor pass the height test, and is not filtered out.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coords;
use crate::error::DepthError;
use crate::trajectory::{Joint, Side, SideRecord, TrajectorySet};

/// What an empty trajectory pair means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPolicy {
    /// No samples cannot demonstrate depth.
    #[default]
    NoDepth,
    /// Fail with [`DepthError::EmptyTrajectory`].
    Reject,
}

/// Indices `i` in `1..len-1` where `values[i]` is strictly below both
/// neighbours, in ascending order. Endpoints and plateaus never qualify.
pub fn local_minima(values: &[f64]) -> Vec<usize> {
    minima(values).collect()
}

fn minima(values: &[f64]) -> impl Iterator<Item = usize> + '_ {
    values
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[1] < w[0] && w[1] < w[2])
        .map(|(i, _)| i + 1)
}

/// Per-side diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideReport {
    pub side: Side,
    pub samples: usize,
    /// Every strict local minimum of the hip trajectory.
    pub minima: Vec<usize>,
    /// First minimum where the hip was above the knee.
    pub depth_frame: Option<usize>,
}

impl SideReport {
    pub fn has_depth(&self) -> bool {
        self.depth_frame.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepthReport {
    pub right: SideReport,
    pub left: SideReport,
}

impl DepthReport {
    pub fn has_depth(&self) -> bool {
        self.right.has_depth() || self.left.has_depth()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DepthAnalyzer {
    empty_policy: EmptyPolicy,
}

impl DepthAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_empty_policy(empty_policy: EmptyPolicy) -> Self {
        Self { empty_policy }
    }

    pub fn empty_policy(&self) -> EmptyPolicy {
        self.empty_policy
    }

    /// Validate a hip/knee pair. `Ok(false)` means the pair is empty and the
    /// policy says to treat that as no depth.
    fn check_shape(&self, side: Side, hip: &[f64], knee: &[f64]) -> Result<bool, DepthError> {
        if hip.len() != knee.len() {
            return Err(DepthError::ShapeMismatch {
                side,
                hip_len: hip.len(),
                knee_len: knee.len(),
            });
        }
        if hip.is_empty() {
            return match self.empty_policy {
                EmptyPolicy::NoDepth => Ok(false),
                EmptyPolicy::Reject => Err(DepthError::EmptyTrajectory {
                    side,
                    joint: Joint::Hip,
                }),
            };
        }
        Ok(true)
    }

    /// Whether one side of the body reached depth.
    pub fn side_has_depth(&self, side: Side, hip: &[f64], knee: &[f64]) -> Result<bool, DepthError> {
        if !self.check_shape(side, hip, knee)? {
            return Ok(false);
        }
        Ok(minima(hip).any(|i| coords::is_above(hip[i], knee[i])))
    }

    /// Whether either side reached depth. Both sides are validated, right
    /// first, before the results are combined.
    pub fn overall_has_depth(
        &self,
        right_hip: &[f64],
        right_knee: &[f64],
        left_hip: &[f64],
        left_knee: &[f64],
    ) -> Result<bool, DepthError> {
        let right = self.side_has_depth(Side::Right, right_hip, right_knee)?;
        let left = self.side_has_depth(Side::Left, left_hip, left_knee)?;
        Ok(right || left)
    }

    pub fn analyze_side(&self, record: SideRecord<'_>) -> Result<SideReport, DepthError> {
        let SideRecord { side, hip, knee } = record;
        let mut report = SideReport {
            side,
            samples: hip.len(),
            minima: Vec::new(),
            depth_frame: None,
        };
        if !self.check_shape(side, hip, knee)? {
            return Ok(report);
        }

        report.minima = local_minima(hip);
        report.depth_frame = report
            .minima
            .iter()
            .copied()
            .find(|&i| coords::is_above(hip[i], knee[i]));

        debug!(
            %side,
            samples = report.samples,
            minima = report.minima.len(),
            depth_frame = ?report.depth_frame,
            "side analyzed"
        );
        Ok(report)
    }

    pub fn analyze(&self, set: &TrajectorySet) -> Result<DepthReport, DepthError> {
        Ok(DepthReport {
            right: self.analyze_side(set.side(Side::Right))?,
            left: self.analyze_side(set.side(Side::Left))?,
        })
    }
}

/// [`DepthAnalyzer::side_has_depth`] with the default empty policy.
pub fn side_has_depth(side: Side, hip: &[f64], knee: &[f64]) -> Result<bool, DepthError> {
    DepthAnalyzer::new().side_has_depth(side, hip, knee)
}

/// [`DepthAnalyzer::overall_has_depth`] with the default empty policy.
pub fn overall_has_depth(
    right_hip: &[f64],
    right_knee: &[f64],
    left_hip: &[f64],
    left_knee: &[f64],
) -> Result<bool, DepthError> {
    DepthAnalyzer::new().overall_has_depth(right_hip, right_knee, left_hip, left_knee)
}
