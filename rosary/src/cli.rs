//! CLI command definitions and subcommands

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// Rosary - daily prayer sequence viewer
#[derive(Parser, Debug)]
#[command(
    name = "rosary",
    version,
    about = "Pray the rosary of the day in your terminal"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Catalog file path or URL (overrides config)
    #[arg(long, global = true, value_name = "PATH|URL")]
    pub catalog: Option<String>,

    /// Language to pray in (overrides config)
    #[arg(short = 'L', long, global = true)]
    pub language: Option<String>,

    /// Date to pray for instead of today (YYYY-MM-DD)
    #[arg(short, long, global = true, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Subcommand to execute (default: view)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the rosary of the day
    Show {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List mystery themes and the days they are prayed
    Themes {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List languages available in the catalog
    Languages,

    /// Check the catalog for gaps and missing translations
    Check {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Step through the rosary interactively
    View,
}

/// Output format for non-interactive commands
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("Invalid date '{}': {} (expected YYYY-MM-DD)", s, e))
}

/// Path of the log file written by the binary
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rosary")
        .join("logs")
        .join("rosary.log");
    debug!(?path, "get_log_path: returning path");
    path
}

/// Generate the after_help text with the log location and viewer keys
pub fn generate_after_help() -> String {
    let mut help = String::new();

    help.push_str("Viewer keys:\n");
    help.push_str("  ↓/n next step   ↑/N previous step   e English   j Japanese\n");
    help.push_str("  l next language   g/G first/last   ? help   q quit\n");
    help.push('\n');
    help.push_str(&format!("Logs: {}\n", get_log_path().display()));
    help
}
