use serde::{Deserialize, Serialize};

// MediaPipe Pose keypoint indices (33 total).
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;

/// A pose must reach at least the last knee index to be usable.
pub const REQUIRED_LANDMARKS: usize = RIGHT_KNEE + 1;

/// One keypoint as reported by the pose extractor, normalized to the frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default = "default_visibility")]
    pub visibility: f64,
}

fn default_visibility() -> f64 {
    1.0
}

impl Default for Landmark {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            visibility: default_visibility(),
        }
    }
}

/// One line of a `.jsonl` landmark file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseRecord {
    #[serde(default)]
    pub landmarks: Option<Vec<Landmark>>,
}

impl PoseRecord {
    pub fn pose(&self) -> Option<&[Landmark]> {
        self.landmarks.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_defaults_for_missing_fields() {
        let lm: Landmark = serde_json::from_str(r#"{"x": 0.4, "y": 0.6}"#).unwrap();
        assert_eq!(lm.x, 0.4);
        assert_eq!(lm.y, 0.6);
        assert_eq!(lm.z, 0.0);
        assert_eq!(lm.visibility, 1.0);
    }

    #[test]
    fn test_record_without_landmarks_has_no_pose() {
        let empty: PoseRecord = serde_json::from_str("{}").unwrap();
        assert!(empty.pose().is_none());

        let null: PoseRecord = serde_json::from_str(r#"{"landmarks": null}"#).unwrap();
        assert!(null.pose().is_none());
    }

    #[test]
    fn test_hip_and_knee_indices_fit_required_count() {
        for idx in [LEFT_HIP, RIGHT_HIP, LEFT_KNEE, RIGHT_KNEE] {
            assert!(idx < REQUIRED_LANDMARKS);
        }
    }
}
