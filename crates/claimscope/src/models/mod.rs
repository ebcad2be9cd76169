//! Core data models for the claims dashboard.
//!
//! Four summary tables are precomputed upstream and embedded here as
//! constants. They are built once per process and never mutated; every
//! derived figure on the dashboard is computed on demand from them.

mod claims;
mod dataset;

pub use claims::*;
pub use dataset::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A table row with named numeric columns.
pub trait Row {
    /// Column selector for this row type.
    type Column: Copy + fmt::Display;

    /// Numeric value of `column` for this row.
    fn value(&self, column: Self::Column) -> f64;

    /// Human-readable key of the row (procedure name, region, ...).
    fn label(&self) -> String;
}

impl<R: Row + ?Sized> Row for &R {
    type Column = R::Column;

    fn value(&self, column: Self::Column) -> f64 {
        (**self).value(column)
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

/// Ordered, immutable collection of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R> Table<R> {
    /// Create a table from rows, preserving their order.
    pub fn from_rows(rows: Vec<R>) -> Self {
        Self { rows }
    }

    /// Create a table with no rows.
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// All rows in input order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over rows in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }
}

impl<R> FromIterator<R> for Table<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::from_rows(iter.into_iter().collect())
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
