use std::collections::HashMap;
use std::sync::Arc;

use crate::types::SqlValue;

/// A row from a query result
///
/// An ordered mapping from column name to value, with lookup by name or by
/// index. Column names and the name-to-index map are shared across all rows
/// of one result set.
#[derive(Debug, Clone)]
pub struct Row {
    column_names: Arc<Vec<String>>,
    column_index: Arc<HashMap<String, usize>>,
    values: Vec<SqlValue>,
}

impl Row {
    pub(crate) fn new(
        column_names: Arc<Vec<String>>,
        column_index: Arc<HashMap<String, usize>>,
        values: Vec<SqlValue>,
    ) -> Self {
        Self {
            column_names,
            column_index,
            values,
        }
    }

    /// The column names, in result-set order
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Get a value by column name, or None if the column doesn't exist
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&SqlValue> {
        self.column_index
            .get(column_name)
            .and_then(|&idx| self.values.get(idx))
    }

    /// Get a value by column index, or None if out of bounds
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    /// The values, in result-set order
    #[must_use]
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Replace the value of a named column
    ///
    /// Returns false if the column doesn't exist. Intended for row transforms
    /// that rewrite a column in place.
    pub fn set(&mut self, column_name: &str, value: SqlValue) -> bool {
        if let Some(&idx) = self.column_index.get(column_name) {
            self.values[idx] = value;
            true
        } else {
            false
        }
    }
}

/// A materialized result set from one query
///
/// Column names are stored once and shared by every row.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    column_names: Arc<Vec<String>>,
    column_index: Arc<HashMap<String, usize>>,
    rows: Vec<Row>,
}

impl ResultSet {
    /// Create an empty result set with the given column names
    #[must_use]
    pub fn new(column_names: Vec<String>) -> Self {
        Self::with_capacity(column_names, 0)
    }

    /// Create a result set with the given column names and row capacity
    #[must_use]
    pub fn with_capacity(column_names: Vec<String>, capacity: usize) -> Self {
        let column_index = Arc::new(
            column_names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), i))
                .collect::<HashMap<_, _>>(),
        );

        Self {
            column_names: Arc::new(column_names),
            column_index,
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Append a row; values must be in column order
    pub fn add_row_values(&mut self, values: Vec<SqlValue>) {
        self.rows.push(Row::new(
            Arc::clone(&self.column_names),
            Arc::clone(&self.column_index),
            values,
        ));
    }

    /// The column names, in result-set order
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// The rows, in server order
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consume the result set, yielding its rows in server order
    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}
