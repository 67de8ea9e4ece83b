//! Column definitions.
//!
//! A [`ColumnDef`] describes how to pull one field out of a row and how to
//! show it. Columns are built once by the caller and never change while the
//! table is mounted.
//!
//! # Example
//!
//! ```rust
//! use tabula::column::{Align, ColumnDef, FilterMode};
//!
//! struct Employee {
//!     name: String,
//!     department: String,
//!     age: u32,
//! }
//!
//! let columns: Vec<ColumnDef<Employee>> = vec![
//!     ColumnDef::new("name", "Name", |e: &Employee| e.name.clone().into()).width(20),
//!     ColumnDef::new("department", "Department", |e: &Employee| e.department.clone().into())
//!         .filter_mode(FilterMode::Equals),
//!     ColumnDef::new("age", "Age", |e: &Employee| e.age.into())
//!         .align(Align::Right)
//!         .searchable(false),
//! ];
//! assert_eq!(columns[1].id(), "department");
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Stable column identifier.
pub type ColumnId = String;

type Accessor<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;
type CellRenderer<T> = Arc<dyn Fn(&Value, &T) -> String + Send + Sync>;

/// How a column filter value is matched against a cell.
///
/// All modes compare the lowercased display form of the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Substring match.
    #[default]
    Contains,
    /// Whole-value match.
    Equals,
    /// Starts-with match.
    Prefix,
}

impl FilterMode {
    /// Returns whether `cell` matches `needle`. Both must already be lowercase.
    #[must_use]
    pub fn matches(self, cell: &str, needle: &str) -> bool {
        match self {
            Self::Contains => cell.contains(needle),
            Self::Equals => cell == needle,
            Self::Prefix => cell.starts_with(needle),
        }
    }
}

/// Horizontal alignment for plain-text rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// Pad on the right.
    #[default]
    Left,
    /// Pad on the left.
    Right,
    /// Pad on both sides.
    Center,
}

/// A single column definition.
pub struct ColumnDef<T> {
    id: ColumnId,
    header: String,
    accessor: Accessor<T>,
    renderer: Option<CellRenderer<T>>,
    /// Whether header activation cycles sort on this column.
    pub sortable: bool,
    /// Whether column filters apply to this column.
    pub filterable: bool,
    /// Whether the global query looks at this column.
    pub searchable: bool,
    /// Whether the column starts hidden.
    pub hidden: bool,
    /// Match mode for column filters.
    pub filter_mode: FilterMode,
    /// Display width in terminal cells.
    pub width: usize,
    /// Alignment inside the display width.
    pub align: Align,
}

impl<T> ColumnDef<T> {
    /// Default display width.
    pub const DEFAULT_WIDTH: usize = 16;

    /// Creates a column from an accessor.
    ///
    /// Sortable, filterable, searchable, and visible by default.
    #[must_use]
    pub fn new<F>(id: impl Into<ColumnId>, header: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            header: header.into(),
            accessor: Arc::new(accessor),
            renderer: None,
            sortable: true,
            filterable: true,
            searchable: true,
            hidden: false,
            filter_mode: FilterMode::default(),
            width: Self::DEFAULT_WIDTH,
            align: Align::default(),
        }
    }

    /// Sets a custom cell renderer (builder pattern).
    ///
    /// Without one, cells show the value's display form.
    #[must_use]
    pub fn cell<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&Value, &T) -> String + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Sets whether the column is sortable.
    #[must_use]
    pub fn sortable(mut self, on: bool) -> Self {
        self.sortable = on;
        self
    }

    /// Sets whether column filters apply.
    #[must_use]
    pub fn filterable(mut self, on: bool) -> Self {
        self.filterable = on;
        self
    }

    /// Sets whether the global query searches this column.
    #[must_use]
    pub fn searchable(mut self, on: bool) -> Self {
        self.searchable = on;
        self
    }

    /// Sets whether the column starts hidden.
    #[must_use]
    pub fn hidden(mut self, on: bool) -> Self {
        self.hidden = on;
        self
    }

    /// Sets the filter match mode.
    #[must_use]
    pub fn filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }

    /// Sets the display width.
    #[must_use]
    pub fn width(mut self, w: usize) -> Self {
        self.width = w;
        self
    }

    /// Sets the alignment.
    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Returns the column id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the header label.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Reads this column's value from a row.
    #[must_use]
    pub fn value(&self, row: &T) -> Value {
        (self.accessor)(row)
    }

    /// Renders a row's cell for this column.
    #[must_use]
    pub fn render_cell(&self, row: &T) -> String {
        let value = self.value(row);
        match &self.renderer {
            Some(render) => render(&value, row),
            None => value.to_string(),
        }
    }
}

impl ColumnDef<serde_json::Value> {
    /// Creates a column reading a dotted key path from a JSON row.
    ///
    /// Numeric segments index into arrays. Missing segments yield
    /// [`Value::Null`].
    ///
    /// ```rust
    /// use tabula::column::ColumnDef;
    /// use tabula::value::Value;
    ///
    /// let col = ColumnDef::key_path("city", "City", "address.city");
    /// let row = serde_json::json!({ "address": { "city": "Leeds" } });
    /// assert_eq!(col.value(&row), Value::from("Leeds"));
    /// assert!(col.value(&serde_json::json!({})).is_null());
    /// ```
    #[must_use]
    pub fn key_path(id: impl Into<ColumnId>, header: impl Into<String>, path: &str) -> Self {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        Self::new(id, header, move |row: &serde_json::Value| {
            lookup(row, &segments).map_or(Value::Null, Value::from)
        })
    }
}

fn lookup<'v>(row: &'v serde_json::Value, segments: &[String]) -> Option<&'v serde_json::Value> {
    segments.iter().try_fold(row, |node, seg| match node {
        serde_json::Value::Object(map) => map.get(seg),
        serde_json::Value::Array(items) => seg.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: Arc::clone(&self.accessor),
            renderer: self.renderer.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
            searchable: self.searchable,
            hidden: self.hidden,
            filter_mode: self.filter_mode,
            width: self.width,
            align: self.align,
        }
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("searchable", &self.searchable)
            .field("hidden", &self.hidden)
            .field("filter_mode", &self.filter_mode)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

/// Finds a column by id.
#[must_use]
pub fn find<'c, T>(columns: &'c [ColumnDef<T>], id: &str) -> Option<&'c ColumnDef<T>> {
    columns.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Vehicle {
        plate: &'static str,
        seats: Option<u32>,
    }

    #[test]
    fn test_column_defaults() {
        let col = ColumnDef::new("plate", "Plate", |v: &Vehicle| v.plate.into());
        assert_eq!(col.id(), "plate");
        assert_eq!(col.header(), "Plate");
        assert!(col.sortable);
        assert!(col.filterable);
        assert!(col.searchable);
        assert!(!col.hidden);
        assert_eq!(col.filter_mode, FilterMode::Contains);
        assert_eq!(col.width, ColumnDef::<Vehicle>::DEFAULT_WIDTH);
    }

    #[test]
    fn test_missing_value_renders_blank() {
        let col = ColumnDef::new("seats", "Seats", |v: &Vehicle| v.seats.into());
        let van = Vehicle {
            plate: "AB12 CDE",
            seats: None,
        };
        assert_eq!(col.render_cell(&van), "");
    }

    #[test]
    fn test_custom_renderer() {
        let col = ColumnDef::new("seats", "Seats", |v: &Vehicle| v.seats.into())
            .cell(|value, row| format!("{} ({value} seats)", row.plate));
        let bus = Vehicle {
            plate: "BUS 1",
            seats: Some(40),
        };
        assert_eq!(col.render_cell(&bus), "BUS 1 (40 seats)");
    }

    #[test]
    fn test_filter_modes() {
        assert!(FilterMode::Contains.matches("night shift", "shift"));
        assert!(!FilterMode::Equals.matches("night shift", "shift"));
        assert!(FilterMode::Equals.matches("hr", "hr"));
        assert!(FilterMode::Prefix.matches("night shift", "night"));
        assert!(!FilterMode::Prefix.matches("night shift", "shift"));
    }

    #[test]
    fn test_key_path_arrays() {
        let col = ColumnDef::key_path("first_cert", "Cert", "certifications.0.name");
        let row = serde_json::json!({ "certifications": [{ "name": "BLS" }] });
        assert_eq!(col.value(&row), Value::from("BLS"));
        let row = serde_json::json!({ "certifications": [] });
        assert!(col.value(&row).is_null());
    }

    #[test]
    fn test_find() {
        let columns = vec![
            ColumnDef::new("a", "A", |_: &Vehicle| Value::Null),
            ColumnDef::new("b", "B", |_: &Vehicle| Value::Null),
        ];
        assert_eq!(find(&columns, "b").map(ColumnDef::id), Some("b"));
        assert!(find(&columns, "z").is_none());
    }
}
