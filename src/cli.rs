/// CLI argument definitions for the `fl` command.
///
/// Defines all subcommands and their arguments using the `clap`
/// derive macros. Long help text lives in `cli_help`.
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::cli_help;

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(name = "fl", version, about = "Flood risk scoring tools")]
pub struct Cli {
    /// TOML file with parameter profiles (default: built-in profiles)
    #[arg(long, global = true)]
    pub profiles_file: Option<PathBuf>,

    /// Log profile registration and scoring details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// All available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Score one observation set given as kind=value pairs
    #[command(long_about = cli_help::EVALUATE)]
    Evaluate {
        /// Observations, e.g. rainfall=42 soil_moisture=0.3
        #[arg(required = true)]
        pairs: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the registered parameter profiles
    #[command(long_about = cli_help::PROFILES)]
    Profiles {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay historical 24 h rainfall records through the rainfall profile
    #[command(long_about = cli_help::CALIBRATE)]
    Calibrate {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate every site in a JSON batch file
    Batch {
        /// Batch file: {"sites": [{"id": ..., "observations": {...}}]}
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Show only the top N sites by composite score (default: 20)
        #[arg(long, default_value = "20")]
        top: usize,

        /// Score only sites whose base_risk is above this value
        #[arg(long)]
        min_base_risk: Option<f64>,

        /// Save the full batch result as JSON (input for `fl diff`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report band transitions between two saved batch results
    #[command(long_about = cli_help::DIFF)]
    Diff {
        /// Earlier batch result
        before: PathBuf,

        /// Later batch result
        after: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Do not report upgrades
        #[arg(long)]
        no_upgrades: bool,

        /// Do not report downgrades
        #[arg(long)]
        no_downgrades: bool,
    },

    /// Aggregate an hourly forecast into one window and score it
    Window {
        /// Forecast file: {"hourly": {"precipitation": [...], ...}}
        path: PathBuf,

        /// First hour of the window (default: 0)
        #[arg(long, default_value = "0")]
        start: usize,

        /// Window length in hours (default: 6)
        #[arg(long, default_value = "6")]
        hours: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}
