//! Top-level error type.

use crate::config::ConfigError;
use crate::data::DataError;
use crate::session::ArgError;

/// Any failure while producing output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Records could not be loaded.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Bad command-line arguments.
    #[error(transparent)]
    Arg(#[from] ArgError),

    /// Output could not be serialized.
    #[error("Failed to write JSON output: {0}")]
    Output(#[from] serde_json::Error),
}

/// A specialized [`Result`](std::result::Result) for `roster`.
pub type Result<T> = std::result::Result<T, Error>;
