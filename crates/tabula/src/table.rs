//! Data table: one mounted table instance.
//!
//! [`DataTable`] borrows caller rows, owns its filter, sort, pagination, and
//! column visibility state, and keeps a cached list of visible row indices.
//! Any change that can alter the filtered set recomputes the cache and
//! re-clamps the page index.
//!
//! # Example
//!
//! ```rust
//! use tabula::column::ColumnDef;
//! use tabula::table::DataTable;
//!
//! struct Shift {
//!     nurse: &'static str,
//!     ward: &'static str,
//! }
//!
//! let shifts = vec![
//!     Shift { nurse: "Ana", ward: "ICU" },
//!     Shift { nurse: "Ben", ward: "A&E" },
//!     Shift { nurse: "Cal", ward: "ICU" },
//! ];
//! let columns = vec![
//!     ColumnDef::new("nurse", "Nurse", |s: &Shift| s.nurse.into()),
//!     ColumnDef::new("ward", "Ward", |s: &Shift| s.ward.into()),
//! ];
//!
//! let mut table = DataTable::new(columns, &shifts).with_page_size(1);
//! table.set_column_filter("ward", "icu");
//! assert_eq!(table.filtered_count(), 2);
//! assert_eq!(table.paginator().total_pages(), 2);
//!
//! table.next_page();
//! assert_eq!(table.page()[0].nurse, "Cal");
//! ```

use std::collections::HashSet;

use crate::column::{self, ColumnDef, ColumnId};
use crate::filter::FilterState;
use crate::paginator::Paginator;
use crate::pipeline;
use crate::render::{self, BodyRow, HeaderCell, Styles};
use crate::sort::{Direction, SortKey, SortState};

/// A table over borrowed rows.
#[derive(Debug)]
pub struct DataTable<'a, T> {
    /// Text used by [`DataTable::render`].
    pub styles: Styles,
    columns: Vec<ColumnDef<T>>,
    rows: &'a [T],
    filters: FilterState,
    sort: SortState,
    paginator: Paginator,
    hidden: HashSet<ColumnId>,
    toolbar: Option<String>,
    visible: Vec<usize>,
}

impl<'a, T> DataTable<'a, T> {
    /// Creates a table with default state: first page, default page size,
    /// no filters, insertion order.
    #[must_use]
    pub fn new(columns: Vec<ColumnDef<T>>, rows: &'a [T]) -> Self {
        let hidden = columns
            .iter()
            .filter(|c| c.hidden)
            .map(|c| c.id().to_string())
            .collect();
        let mut table = Self {
            styles: Styles::default(),
            columns,
            rows,
            filters: FilterState::new(),
            sort: SortState::new(),
            paginator: Paginator::new(),
            hidden,
            toolbar: None,
            visible: Vec::new(),
        };
        table.refresh();
        table
    }

    /// Sets the page size (builder pattern).
    #[must_use]
    pub fn with_page_size(mut self, n: usize) -> Self {
        self.set_page_size(n);
        self
    }

    /// Sets the styles (builder pattern).
    #[must_use]
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Sets caller-supplied filter controls shown above the header.
    #[must_use]
    pub fn with_toolbar(mut self, toolbar: impl Into<String>) -> Self {
        self.toolbar = Some(toolbar.into());
        self
    }

    /// Returns the column definitions.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDef<T>] {
        &self.columns
    }

    /// Returns the columns currently shown, in definition order.
    #[must_use]
    pub fn visible_columns(&self) -> Vec<&ColumnDef<T>> {
        self.columns
            .iter()
            .filter(|c| !self.hidden.contains(c.id()))
            .collect()
    }

    /// Returns the rows the table was given.
    #[must_use]
    pub fn rows(&self) -> &'a [T] {
        self.rows
    }

    /// Returns the filter state.
    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Returns the sort state.
    #[must_use]
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Returns the pagination state.
    #[must_use]
    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Returns the number of rows left after filtering and search.
    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.visible.len()
    }

    /// Replaces the rows and re-derives.
    pub fn set_rows(&mut self, rows: &'a [T]) {
        self.rows = rows;
        self.refresh();
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    /// Sets the global query. Identical values are a no-op.
    pub fn set_global_query(&mut self, query: impl Into<String>) {
        if self.filters.set_global_query(query) {
            self.refresh();
        }
    }

    /// Sets a column filter. An empty value clears it.
    pub fn set_column_filter(&mut self, column: impl Into<ColumnId>, value: impl Into<String>) {
        if self.filters.set_column_filter(column, value) {
            self.refresh();
        }
    }

    /// Clears one column filter.
    pub fn clear_column_filter(&mut self, column: &str) {
        if self.filters.clear_column_filter(column) {
            self.refresh();
        }
    }

    /// Clears the query and every column filter.
    pub fn clear_filters(&mut self) {
        if self.filters.clear() {
            self.refresh();
        }
    }

    // ------------------------------------------------------------------
    // Sorting
    // ------------------------------------------------------------------

    /// Header activation: cycles a sortable column through
    /// unsorted → ascending → descending → unsorted.
    ///
    /// Returns the column's new direction. Unknown or non-sortable
    /// columns are left alone.
    pub fn toggle_sort(&mut self, column: &str) -> Option<Direction> {
        if !column::find(&self.columns, column).is_some_and(|c| c.sortable) {
            tracing::debug!(column = %column, "sort toggle ignored");
            return self.sort.get(column).map(|(_, d)| d);
        }
        let direction = self.sort.toggle(column);
        self.refresh();
        direction
    }

    /// Replaces the whole sort state. Keys for unknown or non-sortable
    /// columns are dropped.
    pub fn set_sort(&mut self, keys: Vec<SortKey>) {
        let keys = keys
            .into_iter()
            .filter(|k| {
                let keep = column::find(&self.columns, &k.column).is_some_and(|c| c.sortable);
                if !keep {
                    tracing::debug!(column = %k.column, "sort key ignored");
                }
                keep
            })
            .collect();
        self.sort.set(keys);
        self.refresh();
    }

    /// Returns to insertion order.
    pub fn clear_sort(&mut self) {
        if self.sort.clear() {
            self.refresh();
        }
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    /// Goes to a page. Out-of-range targets are ignored.
    pub fn go_to(&mut self, page: usize) -> bool {
        self.paginator.go_to(page)
    }

    /// Goes to the next page.
    pub fn next_page(&mut self) -> bool {
        self.paginator.next_page()
    }

    /// Goes to the previous page.
    pub fn prev_page(&mut self) -> bool {
        self.paginator.prev_page()
    }

    /// Goes to the first page.
    pub fn first_page(&mut self) -> bool {
        self.paginator.first()
    }

    /// Goes to the last page.
    pub fn last_page(&mut self) -> bool {
        self.paginator.last()
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, n: usize) {
        self.paginator.set_page_size(n);
    }

    // ------------------------------------------------------------------
    // Column visibility
    // ------------------------------------------------------------------

    /// Shows or hides a column. Returns whether the column is now visible.
    ///
    /// Hidden columns still take part in filtering, search, and sort.
    pub fn toggle_column_visibility(&mut self, column: &str) -> bool {
        if column::find(&self.columns, column).is_none() {
            return false;
        }
        if self.hidden.remove(column) {
            true
        } else {
            self.hidden.insert(column.to_string());
            false
        }
    }

    /// Returns whether a column is shown.
    #[must_use]
    pub fn is_column_visible(&self, column: &str) -> bool {
        column::find(&self.columns, column).is_some() && !self.hidden.contains(column)
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Returns the rows on the current page.
    #[must_use]
    pub fn page(&self) -> Vec<&'a T> {
        let rows = self.rows;
        pipeline::paginate(&self.visible, &self.paginator)
            .iter()
            .map(|&i| &rows[i])
            .collect()
    }

    /// Returns header cells for the visible columns.
    #[must_use]
    pub fn header_cells(&self) -> Vec<HeaderCell> {
        render::header_cells(&self.visible_columns(), &self.sort)
    }

    /// Returns body rows for the current page.
    #[must_use]
    pub fn body_rows(&self) -> Vec<BodyRow> {
        render::body_rows(&self.visible_columns(), &self.page(), &self.styles.placeholder)
    }

    /// Renders toolbar, header, body, and footer as plain text.
    #[must_use]
    pub fn render(&self) -> String {
        let columns = self.visible_columns();
        let headers = render::header_cells(&columns, &self.sort);
        let body = render::body_rows(&columns, &self.page(), &self.styles.placeholder);

        let mut sections = Vec::new();
        if let Some(toolbar) = &self.toolbar {
            sections.push(toolbar.clone());
        }
        sections.push(render::render_plain(&columns, &headers, &body, &self.styles));
        sections.push(format!(
            "{}  ·  page {}",
            self.paginator.summary(),
            self.paginator.view()
        ));
        sections.join("\n")
    }

    fn refresh(&mut self) {
        self.visible = pipeline::visible_indices(self.rows, &self.columns, &self.filters, &self.sort);
        self.paginator.set_total_items(self.visible.len());
    }
}
