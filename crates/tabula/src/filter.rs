//! Filter state: the global query and per-column filters.
//!
//! Setters report whether anything observable changed, so callers can skip
//! re-deriving on repeated identical input. An empty value always means
//! "no filter" and is never stored.
//!
//! # Example
//!
//! ```rust
//! use tabula::filter::FilterState;
//!
//! let mut filters = FilterState::new();
//! assert!(filters.set_column_filter("department", "HR"));
//! assert!(!filters.set_column_filter("department", "HR"));
//! assert!(filters.set_global_query("john"));
//!
//! // Empty clears.
//! assert!(filters.set_column_filter("department", ""));
//! assert!(filters.column_filters().is_empty());
//! ```

use crate::column::ColumnId;

/// A single active column filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    /// Column the filter applies to.
    pub column: ColumnId,
    /// Raw filter text as entered.
    pub value: String,
}

/// Filter state store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    global_query: String,
    column_filters: Vec<ColumnFilter>,
}

impl FilterState {
    /// Creates an empty filter state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the global query.
    #[must_use]
    pub fn global_query(&self) -> &str {
        &self.global_query
    }

    /// Returns the active column filters, in the order they were first set.
    #[must_use]
    pub fn column_filters(&self) -> &[ColumnFilter] {
        &self.column_filters
    }

    /// Returns the filter value for a column, if one is active.
    #[must_use]
    pub fn column_filter(&self, column: &str) -> Option<&str> {
        self.column_filters
            .iter()
            .find(|f| f.column == column)
            .map(|f| f.value.as_str())
    }

    /// Returns true when neither the query nor any column filter is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global_query.is_empty() && self.column_filters.is_empty()
    }

    /// Sets the global query. Returns whether it changed.
    pub fn set_global_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if query == self.global_query {
            return false;
        }
        tracing::debug!(query = %query, "global query set");
        self.global_query = query;
        true
    }

    /// Sets a column filter. An empty value removes it.
    ///
    /// Returns whether the state changed.
    pub fn set_column_filter(&mut self, column: impl Into<ColumnId>, value: impl Into<String>) -> bool {
        let column = column.into();
        let value = value.into();
        if value.is_empty() {
            return self.clear_column_filter(&column);
        }

        match self.column_filters.iter_mut().find(|f| f.column == column) {
            Some(existing) if existing.value == value => false,
            Some(existing) => {
                tracing::debug!(column = %column, value = %value, "column filter replaced");
                existing.value = value;
                true
            }
            None => {
                tracing::debug!(column = %column, value = %value, "column filter added");
                self.column_filters.push(ColumnFilter { column, value });
                true
            }
        }
    }

    /// Removes a column filter. Returns whether one was active.
    pub fn clear_column_filter(&mut self, column: &str) -> bool {
        let before = self.column_filters.len();
        self.column_filters.retain(|f| f.column != column);
        let removed = self.column_filters.len() != before;
        if removed {
            tracing::debug!(column = %column, "column filter cleared");
        }
        removed
    }

    /// Clears the query and every column filter. Returns whether anything
    /// was active.
    pub fn clear(&mut self) -> bool {
        let was_active = !self.is_empty();
        self.global_query.clear();
        self.column_filters.clear();
        was_active
    }
}
