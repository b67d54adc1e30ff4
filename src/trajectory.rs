//! Joint trajectories and the recorder that builds them frame by frame.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coords;
use crate::error::SourceError;
use crate::landmarks::{
    Landmark, LEFT_HIP, LEFT_KNEE, REQUIRED_LANDMARKS, RIGHT_HIP, RIGHT_KNEE,
};

/// Normalized y coordinate of one joint, one entry per frame.
pub type Trajectory = Vec<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Right,
    Left,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Right, Side::Left];
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Right => f.write_str("right"),
            Side::Left => f.write_str("left"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Hip,
    Knee,
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Joint::Hip => f.write_str("hip"),
            Joint::Knee => f.write_str("knee"),
        }
    }
}

/// Hip and knee trajectories for one side of the body.
#[derive(Debug, Clone, Copy)]
pub struct SideRecord<'a> {
    pub side: Side,
    pub hip: &'a [f64],
    pub knee: &'a [f64],
}

/// The four trajectories the analyzer consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrajectorySet {
    pub right_hip: Trajectory,
    pub left_hip: Trajectory,
    pub right_knee: Trajectory,
    pub left_knee: Trajectory,
}

impl TrajectorySet {
    pub fn side(&self, side: Side) -> SideRecord<'_> {
        match side {
            Side::Right => SideRecord {
                side,
                hip: &self.right_hip,
                knee: &self.right_knee,
            },
            Side::Left => SideRecord {
                side,
                hip: &self.left_hip,
                knee: &self.left_knee,
            },
        }
    }

    /// Number of samples in the longest trajectory.
    pub fn frame_count(&self) -> usize {
        [
            self.right_hip.len(),
            self.left_hip.len(),
            self.right_knee.len(),
            self.left_knee.len(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    /// Count of samples outside the normalized frame range.
    pub fn out_of_range_samples(&self) -> usize {
        [
            &self.right_hip,
            &self.left_hip,
            &self.right_knee,
            &self.left_knee,
        ]
        .into_iter()
        .flat_map(|t| t.iter())
        .filter(|y| !coords::in_frame(**y))
        .count()
    }
}

/// Accumulates hip and knee heights from a stream of detected poses.
///
/// Frames without a pose are counted but contribute no samples, so the four
/// trajectories always stay index-aligned with each other.
#[derive(Debug, Default)]
pub struct TrajectoryRecorder {
    set: TrajectorySet,
    frames_seen: usize,
    frames_without_pose: usize,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one captured frame. `None` means the extractor found no pose.
    pub fn push_frame(&mut self, pose: Option<&[Landmark]>) -> Result<(), SourceError> {
        let frame = self.frames_seen;
        self.frames_seen += 1;

        let landmarks = match pose {
            Some(l) if !l.is_empty() => l,
            _ => {
                self.frames_without_pose += 1;
                debug!(frame, "no pose detected");
                return Ok(());
            }
        };

        if landmarks.len() < REQUIRED_LANDMARKS {
            return Err(SourceError::MissingLandmark {
                frame,
                found: landmarks.len(),
                needed: REQUIRED_LANDMARKS,
            });
        }

        self.set.right_hip.push(landmarks[RIGHT_HIP].y);
        self.set.left_hip.push(landmarks[LEFT_HIP].y);
        self.set.right_knee.push(landmarks[RIGHT_KNEE].y);
        self.set.left_knee.push(landmarks[LEFT_KNEE].y);

        Ok(())
    }

    pub fn frames_seen(&self) -> usize {
        self.frames_seen
    }

    pub fn frames_without_pose(&self) -> usize {
        self.frames_without_pose
    }

    /// Freeze the recorded trajectories.
    pub fn finish(self) -> TrajectorySet {
        debug!(
            frames = self.frames_seen,
            skipped = self.frames_without_pose,
            samples = self.set.right_hip.len(),
            "trajectory recording finished"
        );
        self.set
    }
}
