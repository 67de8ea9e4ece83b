//! Command-line interface for `roster`.
//!
//! # Examples
//!
//! ```bash
//! # First page of a staff export
//! roster --data staff.json
//!
//! # HR staff matching "john", sorted by name
//! roster --data staff.json --filter department=HR --query john --sort name
//!
//! # Third page, 5 rows per page, as JSON
//! roster --data vehicles.json --page 3 --page-size 5 --format json
//!
//! # Show the column layout
//! roster --data staff.json --config roster.toml columns
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Roster - browse admin record sets in the terminal.
///
/// Loads a JSON array of records (employees, shifts, patients, vehicles,
/// trips, invoices) and shows one filtered, sorted page of it.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "roster",
    author,
    version,
    about = "Browse admin record sets as a filtered, sorted, paginated table"
)]
pub struct Cli {
    /// JSON file holding an array of records
    #[arg(long, short = 'd', env = "ROSTER_DATA")]
    pub data: PathBuf,

    /// TOML file with column definitions and defaults
    #[arg(long, short = 'c', env = "ROSTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Free-text search across searchable columns (case-insensitive)
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Column filter as COLUMN=VALUE (repeatable, all must match)
    #[arg(long, short = 'f', value_name = "COLUMN=VALUE")]
    pub filter: Vec<String>,

    /// Sort key as COLUMN[:asc|desc] (repeatable, primary first)
    #[arg(long, short = 's', value_name = "COLUMN[:DIR]")]
    pub sort: Vec<String>,

    /// Page to show (1-based)
    #[arg(long, short = 'p', default_value_t = 1)]
    pub page: usize,

    /// Rows per page (overrides the config file)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Hide a column (repeatable)
    #[arg(long, value_name = "COLUMN")]
    pub hide: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Optional subcommand
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the configured (or inferred) columns
    Columns,
}

/// Output formats.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Fixed-width text table
    #[default]
    Plain,
    /// JSON object with page metadata and rows
    Json,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }
}
