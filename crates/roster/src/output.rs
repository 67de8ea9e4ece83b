//! Output formatting.

use serde::Serialize;
use tabula::table::DataTable;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;

/// One page of records with pagination metadata.
#[derive(Debug, Serialize)]
pub struct PageJson<'a> {
    /// Current page (1-based).
    pub page: usize,
    /// Total page count (at least 1).
    pub total_pages: usize,
    /// Rows left after filtering.
    pub total: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Records on this page.
    pub rows: Vec<&'a serde_json::Value>,
}

impl<'a> PageJson<'a> {
    /// Captures the current page of a table.
    #[must_use]
    pub fn from_table(table: &DataTable<'a, serde_json::Value>) -> Self {
        let paginator = table.paginator();
        Self {
            page: paginator.page_index() + 1,
            total_pages: paginator.total_pages(),
            total: table.filtered_count(),
            page_size: paginator.get_page_size(),
            rows: table.page(),
        }
    }
}

/// Formats the current page.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(table: &DataTable<'_, serde_json::Value>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(table.render()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&PageJson::from_table(table))?),
    }
}

/// Lists columns one per line as `id<TAB>header<TAB>flags`.
#[must_use]
pub fn columns(config: &Config) -> String {
    let mut out = String::new();
    for col in &config.columns {
        let header = col.header.as_deref().unwrap_or(&col.id);
        let mut flags = Vec::new();
        if col.sortable {
            flags.push("sort");
        }
        if col.filterable {
            flags.push("filter");
        }
        if col.searchable {
            flags.push("search");
        }
        if col.hidden {
            flags.push("hidden");
        }
        out.push_str(&format!("{}\t{}\t{}\n", col.id, header, flags.join(",")));
    }
    out
}
