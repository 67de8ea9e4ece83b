//! Presentation adapter.
//!
//! Maps column definitions and a derived page into header cells and body
//! rows, and formats them as fixed-width text. An empty page becomes a
//! single placeholder row spanning every visible column.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::column::{Align, ColumnDef};
use crate::sort::{Direction, SortState};

/// One rendered header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Column the header belongs to.
    pub column: String,
    /// Header label.
    pub label: String,
    /// Whether activating the header cycles sort.
    pub sortable: bool,
    /// Current sort direction, if the column is sorted.
    pub direction: Option<Direction>,
    /// Position in the multi-sort (0 = primary), if sorted.
    pub sort_index: Option<usize>,
}

/// One rendered body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyRow {
    /// One string per visible column.
    Cells(Vec<String>),
    /// Stand-in row shown when the page is empty.
    Placeholder {
        /// Message to show.
        text: String,
        /// Number of columns the row spans.
        span: usize,
    },
}

/// Text used by plain rendering.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Placeholder message for an empty page.
    pub placeholder: String,
    /// Marker appended to ascending headers.
    pub ascending: String,
    /// Marker appended to descending headers.
    pub descending: String,
    /// Separator between cells.
    pub separator: String,
    /// Character used for the rule under the header.
    pub rule: char,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            placeholder: "No results.".to_string(),
            ascending: "▲".to_string(),
            descending: "▼".to_string(),
            separator: " │ ".to_string(),
            rule: '─',
        }
    }
}

/// Builds header cells for the visible columns.
#[must_use]
pub fn header_cells<T>(columns: &[&ColumnDef<T>], sort: &SortState) -> Vec<HeaderCell> {
    columns
        .iter()
        .map(|col| {
            let sorted = sort.get(col.id());
            HeaderCell {
                column: col.id().to_string(),
                label: col.header().to_string(),
                sortable: col.sortable,
                direction: sorted.map(|(_, d)| d),
                sort_index: sorted.map(|(i, _)| i),
            }
        })
        .collect()
}

/// Builds body rows for a page: one render call per column per row.
#[must_use]
pub fn body_rows<T>(columns: &[&ColumnDef<T>], page: &[&T], placeholder: &str) -> Vec<BodyRow> {
    if page.is_empty() {
        return vec![BodyRow::Placeholder {
            text: placeholder.to_string(),
            span: columns.len(),
        }];
    }
    page.iter()
        .map(|row| BodyRow::Cells(columns.iter().map(|col| col.render_cell(row)).collect()))
        .collect()
}

/// Formats header and body rows as fixed-width text, one line per row.
#[must_use]
pub fn render_plain<T>(
    columns: &[&ColumnDef<T>],
    headers: &[HeaderCell],
    body: &[BodyRow],
    styles: &Styles,
) -> String {
    let labels: Vec<String> = columns
        .iter()
        .zip(headers)
        .map(|(col, h)| match h.direction {
            Some(Direction::Ascending) => marked_label(&h.label, &styles.ascending, col.width),
            Some(Direction::Descending) => marked_label(&h.label, &styles.descending, col.width),
            None => h.label.clone(),
        })
        .collect();

    let header_line = join_cells(columns, &labels, &styles.separator);
    let total_width = UnicodeWidthStr::width(header_line.as_str());
    let mut lines = vec![header_line, styles.rule.to_string().repeat(total_width)];

    for row in body {
        match row {
            BodyRow::Cells(cells) => lines.push(join_cells(columns, cells, &styles.separator)),
            BodyRow::Placeholder { text, .. } => {
                lines.push(pad(&truncate(text, total_width), total_width, Align::Center));
            }
        }
    }

    lines.join("\n")
}

// The label gives way to the marker when the column is narrow.
fn marked_label(label: &str, marker: &str, width: usize) -> String {
    let room = width.saturating_sub(UnicodeWidthStr::width(marker) + 1);
    if room == 0 {
        return marker.to_string();
    }
    format!("{} {marker}", truncate(label, room))
}

fn join_cells<T>(columns: &[&ColumnDef<T>], cells: &[String], separator: &str) -> String {
    columns
        .iter()
        .zip(cells)
        .filter(|(col, _)| col.width > 0)
        .map(|(col, cell)| pad(&truncate(cell, col.width), col.width, col.align))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Truncates a string to a display width, adding an ellipsis if needed.
#[must_use]
pub fn truncate(s: &str, width: usize) -> String {
    if UnicodeWidthStr::width(s) <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Pads a string to a display width.
#[must_use]
pub fn pad(s: &str, width: usize, align: Align) -> String {
    let gap = width.saturating_sub(UnicodeWidthStr::width(s));
    match align {
        Align::Left => format!("{s}{}", " ".repeat(gap)),
        Align::Right => format!("{}{s}", " ".repeat(gap)),
        Align::Center => {
            let left = gap / 2;
            format!("{}{s}{}", " ".repeat(left), " ".repeat(gap - left))
        }
    }
}
