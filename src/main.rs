//! arcrows - Entry Point

use arcrows::integration::{run, RunRequest};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Compute row order and vertical positions for endpoints in a time-arc diagram
#[derive(Parser, Debug)]
#[command(name = "arcrows")]
#[command(version)]
#[command(about = "Row ordering and vertical positioning of network endpoints for time-arc diagrams")]
pub struct Args {
    /// Path to JSONL record file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Layout state JSON file holding a prior layout and linked-view order
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// File with one address per line to use as the preferred row order
    #[arg(long)]
    pub order: Option<PathBuf>,

    /// Pixel spacing between rows
    #[arg(long)]
    pub row_gap: Option<f64>,

    /// Pixel offset of the first row
    #[arg(long)]
    pub top_padding: Option<f64>,

    /// Arc marker radius in pixels
    #[arg(long)]
    pub marker_radius: Option<f64>,

    /// Write the computed layout back into the state file
    #[arg(long, requires = "state")]
    pub write_state: bool,

    /// Print single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = arcrows::config::load_config_with_precedence(args.config.clone())?;
        let merged = arcrows::config::merge_config(config_file);
        let with_env = arcrows::config::apply_env_overrides(merged);
        arcrows::config::apply_cli_overrides(
            with_env,
            args.row_gap,
            args.top_padding,
            args.marker_radius,
        )
    };

    arcrows::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let request = RunRequest {
        source: arcrows::source::detect_input_source(args.file.clone())?,
        state_path: args.state.clone(),
        order_path: args.order.clone(),
        write_state: args.write_state,
    };

    let result = run(&request, &config)?;

    let json = if args.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;

    Ok(())
}
