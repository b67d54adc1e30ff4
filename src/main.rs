use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use squat_depth::cli::Cli;
use squat_depth::depth::SideReport;
use squat_depth::{check_depth, Config};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load_or_default(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    let source = config.resolve_source(cli.source)?;
    let report = check_depth(&source, &config)?;

    info!(
        right = report.right.has_depth(),
        left = report.left.has_depth(),
        "depth check finished"
    );

    if cli.report {
        print_side(&report.right);
        print_side(&report.left);
    }
    println!("{}", report.has_depth());

    Ok(())
}

fn print_side(side: &SideReport) {
    let frame = side
        .depth_frame
        .map(|f| f.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{:<5} samples={} minima={} depth_frame={}",
        side.side.to_string(),
        side.samples,
        side.minima.len(),
        frame
    );
}
