use clap::Parser;
use std::path::PathBuf;

/// Decide whether a recorded squat reached depth.
#[derive(Parser, Debug)]
#[command(name = "squat-depth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Landmark file (.jsonl pose records or .json trajectories)
    pub source: Option<PathBuf>,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print per-side minima and the qualifying frame
    #[arg(long)]
    pub report: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
