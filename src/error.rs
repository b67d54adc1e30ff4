use std::path::PathBuf;

use thiserror::Error;

use crate::trajectory::{Joint, Side};

/// Errors raised by the depth analyzer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DepthError {
    #[error("{side} side: hip trajectory has {hip_len} samples but knee trajectory has {knee_len}")]
    ShapeMismatch {
        side: Side,
        hip_len: usize,
        knee_len: usize,
    },

    #[error("{side} side: {joint} trajectory is empty")]
    EmptyTrajectory { side: Side, joint: Joint },
}

/// Errors raised while reading landmark files.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no landmark source configured; pass a path or set `source` in the config file")]
    NotConfigured,

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: invalid landmark record: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("frame {frame}: pose has {found} landmarks, need at least {needed}")]
    MissingLandmark {
        frame: usize,
        found: usize,
        needed: usize,
    },

    #[error("unsupported landmark file {}; expected .jsonl, .ndjson or .json", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Any failure between opening a landmark file and producing a verdict.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Depth(#[from] DepthError),
}
