//! CLI argument parsing for psched-tick

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::psched::PSCHED_PATH;

/// Output format for the tick report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single `key=value` line (default)
    Text,
    /// JSON object for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "psched-tick")]
#[command(version)]
#[command(about = "Derive the kernel packet-scheduler tick length from /proc/net/psched", long_about = None)]
pub struct Cli {
    /// Read psched parameters from this file
    #[arg(long = "source", value_name = "PATH", default_value = PSCHED_PATH)]
    pub source: PathBuf,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also convert a kernel tick count into time
    #[arg(long = "ticks", value_name = "N")]
    pub ticks: Option<u32>,

    /// Enable debug tracing output (to stderr)
    #[arg(long = "debug")]
    pub debug: bool,
}
