//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// GNSS Pose - RTK fix to local-frame pose conversion pipeline
#[derive(Parser, Debug)]
#[command(
    name = "gnss-pose",
    author,
    version,
    about = "GNSS/RTK to 6-DoF pose conversion pipeline",
    long_about = "Converts raw GNSS/RTK fixes into 6-DoF poses in a stable local frame.\n\n\
                  Reads a receiver text log, projects each fix onto the UTM plane, removes \n\
                  the antenna mounting offset and angle, re-origins against the first fix, \n\
                  and dispatches the poses to configured sinks."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "GNSS_POSE_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "GNSS_POSE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the conversion pipeline
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "config.toml", env = "GNSS_POSE_CONFIG")]
    pub config: PathBuf,

    /// Override input log path from configuration
    #[arg(long, env = "GNSS_POSE_INPUT")]
    pub input: Option<PathBuf>,

    /// Override RTK antenna installation angle (degrees)
    #[arg(long, env = "GNSS_POSE_ANTENNA_ANGLE")]
    pub antenna_angle: Option<f64>,

    /// Override RTK antenna installation offset in X (meters)
    #[arg(long, env = "GNSS_POSE_ANTENNA_OFFSET_X")]
    pub antenna_offset_x: Option<f64>,

    /// Override RTK antenna installation offset in Y (meters)
    #[arg(long, env = "GNSS_POSE_ANTENNA_OFFSET_Y")]
    pub antenna_offset_y: Option<f64>,

    /// Attach the visualization bridge regardless of configuration
    #[arg(long)]
    pub with_viz: bool,

    /// Maximum number of poses to emit (0 = unlimited)
    #[arg(long, default_value = "0", env = "GNSS_POSE_MAX_POSES")]
    pub max_poses: u64,

    /// Validate configuration and exit without running pipeline
    #[arg(long)]
    pub dry_run: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "GNSS_POSE_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show sink configuration
    #[arg(long)]
    pub sinks: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
