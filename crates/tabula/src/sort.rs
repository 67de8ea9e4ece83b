//! Sort state.
//!
//! An ordered list of sort keys, primary first. Activating a column cycles
//! it through unsorted → ascending → descending → unsorted while leaving
//! the other keys where they are.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::column::ColumnId;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl Direction {
    /// Applies the direction to an ascending comparison.
    #[must_use]
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Self::Ascending => ord,
            Self::Descending => ord.reverse(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// One entry in the sort state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Column to sort by.
    pub column: ColumnId,
    /// Direction to sort in.
    pub direction: Direction,
}

impl SortKey {
    /// Creates an ascending key.
    #[must_use]
    pub fn asc(column: impl Into<ColumnId>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Ascending,
        }
    }

    /// Creates a descending key.
    #[must_use]
    pub fn desc(column: impl Into<ColumnId>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Descending,
        }
    }
}

/// Multi-column sort state. Empty means insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    keys: Vec<SortKey>,
}

impl SortState {
    /// Creates an empty sort state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the keys, primary first.
    #[must_use]
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Returns true when no key is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the direction and position of a column, if it is sorted.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<(usize, Direction)> {
        self.keys
            .iter()
            .position(|k| k.column == column)
            .map(|i| (i, self.keys[i].direction))
    }

    /// Replaces all keys.
    pub fn set(&mut self, keys: Vec<SortKey>) {
        self.keys = keys;
        self.dedup();
    }

    /// Sets a single column's direction in place, or appends it.
    ///
    /// `None` removes the column. Returns whether anything changed.
    pub fn set_direction(&mut self, column: &str, direction: Option<Direction>) -> bool {
        let pos = self.keys.iter().position(|k| k.column == column);
        match (pos, direction) {
            (Some(i), Some(d)) if self.keys[i].direction == d => false,
            (Some(i), Some(d)) => {
                self.keys[i].direction = d;
                true
            }
            (Some(i), None) => {
                self.keys.remove(i);
                true
            }
            (None, Some(d)) => {
                self.keys.push(SortKey {
                    column: column.to_string(),
                    direction: d,
                });
                true
            }
            (None, None) => false,
        }
    }

    /// Advances a column through the toggle cycle and returns its new
    /// direction.
    ///
    /// ```rust
    /// use tabula::sort::{Direction, SortState};
    ///
    /// let mut sort = SortState::new();
    /// assert_eq!(sort.toggle("name"), Some(Direction::Ascending));
    /// assert_eq!(sort.toggle("name"), Some(Direction::Descending));
    /// assert_eq!(sort.toggle("name"), None);
    /// assert!(sort.is_empty());
    /// ```
    pub fn toggle(&mut self, column: &str) -> Option<Direction> {
        let next = match self.get(column).map(|(_, d)| d) {
            None => Some(Direction::Ascending),
            Some(Direction::Ascending) => Some(Direction::Descending),
            Some(Direction::Descending) => None,
        };
        self.set_direction(column, next);
        tracing::debug!(column = %column, direction = ?next, "sort toggled");
        next
    }

    /// Removes every key. Returns whether any was active.
    pub fn clear(&mut self) -> bool {
        let was_active = !self.keys.is_empty();
        self.keys.clear();
        was_active
    }

    // Keep the first occurrence of each column.
    fn dedup(&mut self) {
        let mut seen = Vec::with_capacity(self.keys.len());
        self.keys.retain(|k| {
            if seen.contains(&k.column) {
                false
            } else {
                seen.push(k.column.clone());
                true
            }
        });
    }
}
