//! Application state.
//!
//! A [`Session`] owns the loaded configuration and records for one run and
//! hands out tables borrowing them. It is built once at startup and passed
//! down explicitly.

use tabula::column;
use tabula::render::Styles;
use tabula::sort::{Direction, SortKey};
use tabula::table::DataTable;

use crate::cli::Cli;
use crate::config::Config;
use crate::data;
use crate::error::Error;

/// One table view request, parsed from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewRequest {
    /// Global query.
    pub query: String,
    /// Column filters as `(column, value)`.
    pub filters: Vec<(String, String)>,
    /// Sort keys, primary first.
    pub sort: Vec<SortKey>,
    /// Page to show (0-based).
    pub page: usize,
    /// Page size override.
    pub page_size: Option<usize>,
    /// Columns to hide.
    pub hide: Vec<String>,
}

impl ViewRequest {
    /// Builds a request from CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed `--filter` or `--sort` argument.
    pub fn from_cli(cli: &Cli) -> Result<Self, ArgError> {
        Ok(Self {
            query: cli.query.clone().unwrap_or_default(),
            filters: cli
                .filter
                .iter()
                .map(|f| parse_filter(f))
                .collect::<Result<_, _>>()?,
            sort: cli
                .sort
                .iter()
                .map(|s| parse_sort(s))
                .collect::<Result<_, _>>()?,
            page: cli.page.saturating_sub(1),
            page_size: cli.page_size,
            hide: cli.hide.clone(),
        })
    }
}

/// Parses `COLUMN=VALUE`.
///
/// # Errors
///
/// Returns an error if there is no `=` or the column is empty.
pub fn parse_filter(arg: &str) -> Result<(String, String), ArgError> {
    match arg.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), value.to_string()))
        }
        _ => Err(ArgError::Filter(arg.to_string())),
    }
}

/// Parses `COLUMN[:asc|desc]`.
///
/// # Errors
///
/// Returns an error for an empty column or an unknown direction.
pub fn parse_sort(arg: &str) -> Result<SortKey, ArgError> {
    let (column, direction) = match arg.split_once(':') {
        Some((column, dir)) => {
            let direction = match dir.to_ascii_lowercase().as_str() {
                "asc" | "ascending" => Direction::Ascending,
                "desc" | "descending" => Direction::Descending,
                _ => return Err(ArgError::Sort(arg.to_string())),
            };
            (column, direction)
        }
        None => (arg, Direction::Ascending),
    };
    let column = column.trim();
    if column.is_empty() {
        return Err(ArgError::Sort(arg.to_string()));
    }
    Ok(SortKey {
        column: column.to_string(),
        direction,
    })
}

/// Loaded configuration and records for one run.
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    records: Vec<serde_json::Value>,
}

impl Session {
    /// Creates a session, inferring columns from the first record when the
    /// config has none.
    #[must_use]
    pub fn new(mut config: Config, records: Vec<serde_json::Value>) -> Self {
        config.infer_columns(records.first());
        Self { config, records }
    }

    /// Loads config and records named on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be loaded.
    pub fn from_cli(cli: &Cli) -> Result<Self, Error> {
        let config = match &cli.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        let records = data::load_records(&cli.data)?;
        Ok(Self::new(config, records))
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the records.
    #[must_use]
    pub fn records(&self) -> &[serde_json::Value] {
        &self.records
    }

    /// Creates a fresh table over the records.
    #[must_use]
    pub fn table(&self) -> DataTable<'_, serde_json::Value> {
        let styles = Styles {
            placeholder: self.config.placeholder.clone(),
            ..Styles::default()
        };
        DataTable::new(self.config.table_columns(), &self.records)
            .with_page_size(self.config.page_size)
            .with_styles(styles)
    }

    /// Creates a table and applies a view request to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request names a column that does not exist.
    pub fn view(&self, request: &ViewRequest) -> Result<DataTable<'_, serde_json::Value>, ArgError> {
        let mut table = self.table();
        let known = |id: &str| -> Result<(), ArgError> {
            if column::find(table.columns(), id).is_some() {
                Ok(())
            } else {
                Err(ArgError::UnknownColumn(id.to_string()))
            }
        };

        for (col, _) in &request.filters {
            known(col)?;
        }
        for key in &request.sort {
            known(&key.column)?;
        }
        for col in &request.hide {
            known(col)?;
        }

        if let Some(n) = request.page_size {
            table.set_page_size(n);
        }
        for (col, value) in &request.filters {
            table.set_column_filter(col.as_str(), value.as_str());
        }
        table.set_global_query(request.query.as_str());
        if !request.sort.is_empty() {
            table.set_sort(request.sort.clone());
        }
        for col in &request.hide {
            if table.is_column_visible(col) {
                table.toggle_column_visibility(col);
            }
        }
        if request.page > 0 && !table.go_to(request.page) {
            tracing::warn!(
                page = request.page + 1,
                total_pages = table.paginator().total_pages(),
                "requested page out of range, showing first page"
            );
        }
        Ok(table)
    }
}

/// Argument error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgError {
    /// Malformed `--filter`.
    #[error("invalid filter '{0}', expected COLUMN=VALUE")]
    Filter(String),

    /// Malformed `--sort`.
    #[error("invalid sort '{0}', expected COLUMN[:asc|desc]")]
    Sort(String),

    /// Column not in the table.
    #[error("unknown column: {0}")]
    UnknownColumn(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> Session {
        let records = vec![
            json!({ "id": 1, "name": "John Smith", "department": "HR" }),
            json!({ "id": 2, "name": "Ann Lee", "department": "ICU" }),
            json!({ "id": 3, "name": "Johnny Park", "department": "Fleet" }),
        ];
        Session::new(Config::default(), records)
    }

    #[test]
    fn parse_filter_ok() {
        assert_eq!(
            parse_filter("department=HR").unwrap(),
            ("department".to_string(), "HR".to_string())
        );
        assert_eq!(
            parse_filter("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_filter("x=").unwrap().1, "");
    }

    #[test]
    fn parse_filter_errors() {
        assert_eq!(
            parse_filter("department").unwrap_err(),
            ArgError::Filter("department".into())
        );
        assert!(parse_filter("=HR").is_err());
    }

    #[test]
    fn parse_sort_variants() {
        assert_eq!(parse_sort("name").unwrap(), SortKey::asc("name"));
        assert_eq!(parse_sort("name:DESC").unwrap(), SortKey::desc("name"));
        assert_eq!(parse_sort("name:ascending").unwrap(), SortKey::asc("name"));
        assert!(parse_sort("name:sideways").is_err());
        assert!(parse_sort(":asc").is_err());
    }

    #[test]
    fn session_infers_columns() {
        let s = session();
        let ids: Vec<&str> = s.config().columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["id", "name", "department"]);
    }

    #[test]
    fn view_applies_request() {
        let s = session();
        let request = ViewRequest {
            query: "john".into(),
            sort: vec![SortKey::desc("name")],
            ..ViewRequest::default()
        };
        let table = s.view(&request).unwrap();
        let names: Vec<&str> = table
            .page()
            .iter()
            .filter_map(|r| r["name"].as_str())
            .collect();
        assert_eq!(names, vec!["Johnny Park", "John Smith"]);
    }

    #[test]
    fn view_rejects_unknown_column() {
        let s = session();
        let request = ViewRequest {
            filters: vec![("salary".into(), "1".into())],
            ..ViewRequest::default()
        };
        assert_eq!(
            s.view(&request).unwrap_err(),
            ArgError::UnknownColumn("salary".into())
        );
    }

    #[test]
    fn view_out_of_range_page_stays_first() {
        let s = session();
        let request = ViewRequest {
            page: 9,
            ..ViewRequest::default()
        };
        let table = s.view(&request).unwrap();
        assert_eq!(table.paginator().page_index(), 0);
    }

    #[test]
    fn view_hides_columns() {
        let s = session();
        let request = ViewRequest {
            hide: vec!["id".into()],
            ..ViewRequest::default()
        };
        let table = s.view(&request).unwrap();
        assert!(!table.is_column_visible("id"));
        assert_eq!(table.header_cells().len(), 2);
    }
}
