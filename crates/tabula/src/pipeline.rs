//! Derivation pipeline.
//!
//! Turns raw rows plus filter, sort, and pagination state into the page of
//! rows to show. Stages run in a fixed order, each feeding the next:
//!
//! 1. [`apply_column_filters`]: keep rows matching every column filter.
//! 2. [`apply_global_query`]: keep rows whose searchable cells contain the
//!    query, ignoring case.
//! 3. [`apply_sort`]: stable multi-key sort.
//! 4. [`paginate`]: slice out the current page.
//!
//! Stages 1 to 3 work on row indices so rows are never cloned.
//!
//! # Example
//!
//! ```rust
//! use tabula::column::ColumnDef;
//! use tabula::filter::FilterState;
//! use tabula::paginator::Paginator;
//! use tabula::pipeline::derive;
//! use tabula::sort::{SortKey, SortState};
//!
//! let rows = vec![("Ward 3", 12), ("Ward 1", 30), ("Clinic", 4)];
//! let columns = vec![
//!     ColumnDef::new("name", "Name", |r: &(&str, i64)| r.0.into()),
//!     ColumnDef::new("beds", "Beds", |r: &(&str, i64)| r.1.into()),
//! ];
//!
//! let mut filters = FilterState::new();
//! filters.set_global_query("ward");
//! let mut sort = SortState::new();
//! sort.set(vec![SortKey::desc("beds")]);
//!
//! let page = derive(&rows, &columns, &filters, &sort, &Paginator::new());
//! assert_eq!(page, vec![&("Ward 1", 30), &("Ward 3", 12)]);
//! ```

use std::cmp::Ordering;

use crate::column::{self, ColumnDef};
use crate::filter::{ColumnFilter, FilterState};
use crate::paginator::Paginator;
use crate::sort::{Direction, SortKey, SortState};
use crate::value::Value;

/// Runs every stage and returns the visible page.
///
/// The paginator is cloned and clamped against the filtered count before
/// slicing, so a stale page index never produces an empty page while
/// earlier pages hold data.
#[must_use]
pub fn derive<'r, T>(
    rows: &'r [T],
    columns: &[ColumnDef<T>],
    filters: &FilterState,
    sort: &SortState,
    pagination: &Paginator,
) -> Vec<&'r T> {
    let visible = visible_indices(rows, columns, filters, sort);
    let mut pagination = pagination.clone();
    pagination.set_total_items(visible.len());
    paginate(&visible, &pagination)
        .iter()
        .map(|&i| &rows[i])
        .collect()
}

/// Runs the filter, search, and sort stages and returns row indices in
/// display order.
#[must_use]
pub fn visible_indices<T>(
    rows: &[T],
    columns: &[ColumnDef<T>],
    filters: &FilterState,
    sort: &SortState,
) -> Vec<usize> {
    let all: Vec<usize> = (0..rows.len()).collect();
    let filtered = apply_column_filters(rows, columns, filters.column_filters(), all);
    let searched = apply_global_query(rows, columns, filters.global_query(), filtered);
    let sorted = apply_sort(rows, columns, sort.keys(), searched);
    tracing::trace!(
        rows = rows.len(),
        visible = sorted.len(),
        "visible rows derived"
    );
    sorted
}

/// Keeps indices whose row matches every active column filter.
///
/// Filters naming an unknown or non-filterable column are ignored.
#[must_use]
pub fn apply_column_filters<T>(
    rows: &[T],
    columns: &[ColumnDef<T>],
    filters: &[ColumnFilter],
    mut indices: Vec<usize>,
) -> Vec<usize> {
    let active: Vec<(&ColumnDef<T>, String)> = filters
        .iter()
        .filter_map(|f| match column::find(columns, &f.column) {
            Some(col) if col.filterable => Some((col, f.value.to_lowercase())),
            Some(_) => {
                tracing::warn!(column = %f.column, "filter on non-filterable column ignored");
                None
            }
            None => {
                tracing::warn!(column = %f.column, "filter on unknown column ignored");
                None
            }
        })
        .collect();

    if active.is_empty() {
        return indices;
    }

    indices.retain(|&i| {
        active.iter().all(|(col, needle)| {
            let cell = col.value(&rows[i]).search_text();
            col.filter_mode.matches(&cell, needle)
        })
    });
    indices
}

/// Keeps indices whose searchable cells contain `query`, ignoring case.
///
/// An empty query keeps everything.
#[must_use]
pub fn apply_global_query<T>(
    rows: &[T],
    columns: &[ColumnDef<T>],
    query: &str,
    mut indices: Vec<usize>,
) -> Vec<usize> {
    if query.is_empty() {
        return indices;
    }
    let needle = query.to_lowercase();
    indices.retain(|&i| {
        columns
            .iter()
            .filter(|c| c.searchable)
            .any(|c| c.render_cell(&rows[i]).to_lowercase().contains(&needle))
    });
    indices
}

/// Stable sort of indices by the given keys, primary first.
///
/// Equal rows keep their incoming order. Keys naming unknown or
/// non-sortable columns are skipped.
#[must_use]
pub fn apply_sort<T>(
    rows: &[T],
    columns: &[ColumnDef<T>],
    keys: &[SortKey],
    mut indices: Vec<usize>,
) -> Vec<usize> {
    let active: Vec<(&ColumnDef<T>, Direction)> = keys
        .iter()
        .filter_map(|k| {
            column::find(columns, &k.column)
                .filter(|c| c.sortable)
                .map(|c| (c, k.direction))
        })
        .collect();

    if active.is_empty() {
        return indices;
    }

    // Read each sort value once instead of once per comparison.
    let mut keyed: Vec<(usize, Vec<Value>)> = indices
        .drain(..)
        .map(|i| (i, active.iter().map(|(c, _)| c.value(&rows[i])).collect()))
        .collect();

    keyed.sort_by(|(_, a), (_, b)| {
        active
            .iter()
            .zip(a.iter().zip(b.iter()))
            .map(|((_, dir), (va, vb))| dir.apply(va.compare(vb)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });

    keyed.into_iter().map(|(i, _)| i).collect()
}

/// Slices out the current page.
#[must_use]
pub fn paginate<'a, I>(items: &'a [I], pagination: &Paginator) -> &'a [I] {
    let start = (pagination.page_index() * pagination.get_page_size()).min(items.len());
    let end = (start + pagination.get_page_size()).min(items.len());
    &items[start..end]
}
