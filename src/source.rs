//! Landmark files written by an external pose extractor.
//!
//! Two layouts are understood, chosen by file extension:
//!
//! - `.jsonl` / `.ndjson`: one pose record per captured frame,
//! - `.json`: a finished [`TrajectorySet`] document.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::SourceError;
use crate::landmarks::PoseRecord;
use crate::trajectory::{TrajectoryRecorder, TrajectorySet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    PoseLines,
    Trajectories,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("jsonl") | Some("ndjson") => Ok(Self::PoseLines),
            Some("json") => Ok(Self::Trajectories),
            _ => Err(SourceError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Frame-by-frame reader over a `.jsonl` pose file.
pub struct LandmarkSource {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl LandmarkSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            path,
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }

    /// Next frame, or `None` at end of file. Blank lines are skipped.
    pub fn read_frame(&mut self) -> Result<Option<PoseRecord>, SourceError> {
        loop {
            let line = match self.lines.next() {
                None => return Ok(None),
                Some(line) => line.map_err(|source| SourceError::Io {
                    path: self.path.clone(),
                    source,
                })?,
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            let record = serde_json::from_str(&line).map_err(|source| SourceError::Parse {
                path: self.path.clone(),
                line: self.line_no,
                source,
            })?;
            return Ok(Some(record));
        }
    }
}

/// Read every frame of a `.jsonl` file into trajectories.
pub fn record_pose_lines(path: &Path) -> Result<TrajectorySet, SourceError> {
    let mut source = LandmarkSource::open(path)?;
    let mut recorder = TrajectoryRecorder::new();

    while let Some(record) = source.read_frame()? {
        recorder.push_frame(record.pose())?;
    }

    if recorder.frames_without_pose() > 0 {
        info!(
            frames = recorder.frames_seen(),
            without_pose = recorder.frames_without_pose(),
            "some frames carried no pose"
        );
    }
    Ok(recorder.finish())
}

/// Read a `.json` trajectory document.
pub fn read_trajectory_document(path: &Path) -> Result<TrajectorySet, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        line: source.line(),
        source,
    })
}

/// Load trajectories from `path`, picking the reader by extension.
pub fn load_trajectories(path: &Path, warn_out_of_range: bool) -> Result<TrajectorySet, SourceError> {
    let format = SourceFormat::from_path(path)?;
    debug!(path = %path.display(), ?format, "loading landmarks");

    let set = match format {
        SourceFormat::PoseLines => record_pose_lines(path)?,
        SourceFormat::Trajectories => read_trajectory_document(path)?,
    };

    if warn_out_of_range {
        let outside = set.out_of_range_samples();
        if outside > 0 {
            warn!(
                samples = outside,
                "landmark heights outside the normalized [0, 1] range"
            );
        }
    }

    info!(
        path = %path.display(),
        frames = set.frame_count(),
        "landmarks loaded"
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn pose_line(right_hip: f64, left_hip: f64, right_knee: f64, left_knee: f64) -> String {
        let mut landmarks = vec![serde_json::json!({"x": 0.5, "y": 0.0}); 33];
        landmarks[24] = serde_json::json!({"x": 0.5, "y": right_hip});
        landmarks[23] = serde_json::json!({"x": 0.5, "y": left_hip});
        landmarks[26] = serde_json::json!({"x": 0.5, "y": right_knee});
        landmarks[25] = serde_json::json!({"x": 0.5, "y": left_knee});
        serde_json::json!({ "landmarks": landmarks }).to_string()
    }

    fn write_file(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("a.jsonl")).unwrap(),
            SourceFormat::PoseLines
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("a.NDJSON")).unwrap(),
            SourceFormat::PoseLines
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("a.json")).unwrap(),
            SourceFormat::Trajectories
        );
        assert!(matches!(
            SourceFormat::from_path(Path::new("squat.mov")),
            Err(SourceError::UnsupportedFormat(_))
        ));
        assert!(SourceFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_pose_lines_build_trajectories() {
        let dir = TempDir::new().unwrap();
        let body = [
            pose_line(0.4, 0.41, 0.6, 0.61),
            String::new(),
            r#"{"landmarks": null}"#.to_string(),
            pose_line(0.7, 0.71, 0.6, 0.61),
            "{}".to_string(),
        ]
        .join("\n");
        let path = write_file(&dir, "frames.jsonl", &body);

        let set = load_trajectories(&path, true).unwrap();
        assert_eq!(set.right_hip, vec![0.4, 0.7]);
        assert_eq!(set.left_hip, vec![0.41, 0.71]);
        assert_eq!(set.right_knee, vec![0.6, 0.6]);
        assert_eq!(set.left_knee, vec![0.61, 0.61]);
    }

    #[test]
    fn test_read_frame_reports_line_of_bad_record() {
        let dir = TempDir::new().unwrap();
        let body = format!("{}\n\nnot json\n", pose_line(0.4, 0.4, 0.6, 0.6));
        let path = write_file(&dir, "frames.jsonl", &body);

        let mut source = LandmarkSource::open(&path).unwrap();
        assert!(source.read_frame().unwrap().is_some());
        match source.read_frame() {
            Err(SourceError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_pose_fails_load() {
        let dir = TempDir::new().unwrap();
        let landmarks = vec![serde_json::json!({"x": 0.5, "y": 0.5}); 25];
        let short = serde_json::json!({ "landmarks": landmarks });
        let path = write_file(&dir, "frames.jsonl", &short.to_string());

        let err = load_trajectories(&path, false).unwrap_err();
        assert!(matches!(
            err,
            SourceError::MissingLandmark { frame: 0, found: 25, .. }
        ));
    }

    #[test]
    fn test_trajectory_document() {
        let dir = TempDir::new().unwrap();
        let body = r#"{
            "right_hip": [0.8, 0.3, 0.8],
            "left_hip": [0.8, 0.6, 0.8],
            "right_knee": [0.5, 0.5, 0.5],
            "left_knee": [0.5, 0.5, 0.5]
        }"#;
        let path = write_file(&dir, "squat.json", body);

        let set = load_trajectories(&path, true).unwrap();
        assert_eq!(set.right_hip, vec![0.8, 0.3, 0.8]);
        assert_eq!(set.left_knee.len(), 3);
    }

    #[test]
    fn test_trajectory_document_rejects_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let body = r#"{"right_hip": [], "left_hip": [], "right_knee": [], "left_knee": [], "nose": []}"#;
        let path = write_file(&dir, "squat.json", body);

        assert!(matches!(
            load_trajectories(&path, false),
            Err(SourceError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.jsonl");
        let err = load_trajectories(&path, false).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("absent.jsonl"));
    }
}
