#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Tabula
//!
//! A headless data table: filter, search, sort, and paginate caller-owned
//! rows, then render the visible page.
//!
//! Tabula provides:
//! - **column** - Column definitions with accessors and cell renderers
//! - **value** - Typed cell values and their ordering
//! - **filter** - Global query and per-column filter state
//! - **sort** - Multi-column sort state with a toggle cycle
//! - **pipeline** - The derivation stages from raw rows to a page
//! - **paginator** - Page index and size, clamped to the filtered set
//! - **render** - Header cells, body rows, and plain-text layout
//! - **table** - A table instance tying all of the above together
//!
//! ## Example
//!
//! ```rust
//! use tabula::prelude::*;
//!
//! struct Employee {
//!     name: &'static str,
//!     department: &'static str,
//! }
//!
//! let staff = vec![
//!     Employee { name: "John Carter", department: "HR" },
//!     Employee { name: "Mia Lopez", department: "ICU" },
//! ];
//! let columns = vec![
//!     ColumnDef::new("name", "Name", |e: &Employee| e.name.into()),
//!     ColumnDef::new("department", "Department", |e: &Employee| e.department.into()),
//! ];
//!
//! let mut table = DataTable::new(columns, &staff);
//! table.set_global_query("JOHN");
//! assert_eq!(table.page().len(), 1);
//! println!("{}", table.render());
//! ```

pub mod column;
pub mod filter;
pub mod paginator;
pub mod pipeline;
pub mod render;
pub mod sort;
pub mod table;
pub mod value;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::column::{Align, ColumnDef, ColumnId, FilterMode};
    pub use crate::filter::{ColumnFilter, FilterState};
    pub use crate::paginator::{Paginator, Type as PaginatorType};
    pub use crate::pipeline::derive;
    pub use crate::render::{BodyRow, HeaderCell, Styles};
    pub use crate::sort::{Direction, SortKey, SortState};
    pub use crate::table::DataTable;
    pub use crate::value::Value;
}
