#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Roster
//!
//! Browse admin record sets (staff, shifts, patients, vehicles, trips,
//! invoices) as a filtered, sorted, paginated table.
//!
//! Roster is a thin shell over [`tabula`]:
//! - **cli** - Argument parsing
//! - **config** - TOML column layout and defaults
//! - **data** - JSON record loading
//! - **session** - Loaded state and view requests
//! - **output** - Plain and JSON output
//! - **logging** - Diagnostics on stderr

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod output;
pub mod session;

pub use cli::{Cli, Command, OutputFormat};
pub use config::{ColumnConfig, Config, ConfigError};
pub use data::DataError;
pub use error::{Error, Result};
pub use session::{ArgError, Session, ViewRequest};

/// Runs one invocation and returns what should be printed.
///
/// # Errors
///
/// Returns an error if loading fails or the arguments name bad columns.
pub fn run(cli: &Cli) -> Result<String> {
    let session = Session::from_cli(cli)?;
    match cli.command {
        Some(Command::Columns) => Ok(output::columns(session.config())),
        None => {
            let request = ViewRequest::from_cli(cli)?;
            let table = session.view(&request)?;
            tracing::debug!(
                total = table.filtered_count(),
                page = table.paginator().page_index() + 1,
                "view ready"
            );
            output::render(&table, cli.format)
        }
    }
}
