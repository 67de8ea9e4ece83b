//! Runtime configuration for `roster`.
//!
//! The [`Config`] struct holds the table layout and defaults. It is read
//! from a TOML file when one is given; otherwise columns are inferred from
//! the first record of the data set.
//!
//! # Example
//!
//! ```toml
//! page_size = 5
//! placeholder = "No staff match."
//!
//! [[columns]]
//! id = "name"
//! header = "Name"
//! width = 20
//!
//! [[columns]]
//! id = "city"
//! header = "City"
//! path = "address.city"
//! filter_mode = "equals"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tabula::column::{Align, ColumnDef, FilterMode};
use tabula::paginator::Paginator;

/// Table layout and defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rows per page.
    pub page_size: usize,
    /// Message shown when no rows match.
    pub placeholder: String,
    /// Column layout. Empty means infer from the data.
    pub columns: Vec<ColumnConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: Paginator::DEFAULT_PAGE_SIZE,
            placeholder: "No results.".to_string(),
            columns: Vec::new(),
        }
    }
}

/// One configured column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Stable column id.
    pub id: String,
    /// Header label. Defaults to the id.
    #[serde(default)]
    pub header: Option<String>,
    /// Dotted key path into each record. Defaults to the id.
    #[serde(default)]
    pub path: Option<String>,
    /// Display width.
    #[serde(default = "default_width")]
    pub width: usize,
    /// Alignment.
    #[serde(default)]
    pub align: Align,
    /// Whether header activation sorts.
    #[serde(default = "yes")]
    pub sortable: bool,
    /// Whether the global query searches this column.
    #[serde(default = "yes")]
    pub searchable: bool,
    /// Whether column filters apply.
    #[serde(default = "yes")]
    pub filterable: bool,
    /// Whether the column starts hidden.
    #[serde(default)]
    pub hidden: bool,
    /// Filter match mode.
    #[serde(default)]
    pub filter_mode: FilterMode,
}

const fn default_width() -> usize {
    ColumnDef::<serde_json::Value>::DEFAULT_WIDTH
}

const fn yes() -> bool {
    true
}

impl ColumnConfig {
    /// Creates a column config with defaults for everything but the id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: None,
            path: None,
            width: default_width(),
            align: Align::default(),
            sortable: true,
            searchable: true,
            filterable: true,
            hidden: false,
            filter_mode: FilterMode::default(),
        }
    }

    /// Builds the table column for JSON records.
    #[must_use]
    pub fn to_column(&self) -> ColumnDef<serde_json::Value> {
        let header = self.header.as_deref().unwrap_or(&self.id);
        let path = self.path.as_deref().unwrap_or(&self.id);
        ColumnDef::key_path(self.id.clone(), header, path)
            .width(self.width)
            .align(self.align)
            .sortable(self.sortable)
            .searchable(self.searchable)
            .filterable(self.filterable)
            .hidden(self.hidden)
            .filter_mode(self.filter_mode)
    }
}

impl Config {
    /// Reads and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, is not valid TOML, or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), columns = config.columns.len(), "config loaded");
        Ok(config)
    }

    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or fails validation.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        let mut seen = HashSet::new();
        for col in &self.columns {
            if col.id.trim().is_empty() {
                return Err(ConfigError::EmptyColumnId);
            }
            if col.width == 0 {
                return Err(ConfigError::ZeroWidth(col.id.clone()));
            }
            if !seen.insert(col.id.as_str()) {
                return Err(ConfigError::DuplicateColumn(col.id.clone()));
            }
        }
        Ok(())
    }

    /// Fills in columns from the keys of a sample record when none are
    /// configured.
    pub fn infer_columns(&mut self, sample: Option<&serde_json::Value>) {
        if !self.columns.is_empty() {
            return;
        }
        if let Some(serde_json::Value::Object(map)) = sample {
            self.columns = map.keys().map(ColumnConfig::new).collect();
            tracing::debug!(columns = self.columns.len(), "columns inferred from data");
        }
    }

    /// Builds table columns.
    #[must_use]
    pub fn table_columns(&self) -> Vec<ColumnDef<serde_json::Value>> {
        self.columns.iter().map(ColumnConfig::to_column).collect()
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Config file could not be read.
    #[error("Failed to read config file {path}: {message}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error text.
        message: String,
    },

    /// Config file is not valid TOML.
    #[error("Invalid config: {0}")]
    Parse(String),

    /// Page size of zero.
    #[error("page_size must be at least 1")]
    ZeroPageSize,

    /// A column with an empty id.
    #[error("column id must not be empty")]
    EmptyColumnId,

    /// A column with zero display width.
    #[error("column '{0}' has zero width")]
    ZeroWidth(String),

    /// Two columns with the same id.
    #[error("duplicate column id: {0}")]
    DuplicateColumn(String),
}
