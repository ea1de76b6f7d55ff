//! Row-oriented datasets keyed by column name.

mod value;

pub use value::{Literal, Value};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{LoaderError, Result};
use crate::io_utils;

/// Named columns plus rows of cells, positionally aligned.
///
/// JSON form: `{"columns": ["a", "b"], "rows": [[1, "x"], [2, null]]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

#[derive(Deserialize)]
struct RawDataset {
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<Value>>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = LoaderError;

    fn try_from(raw: RawDataset) -> Result<Self> {
        Dataset::new(raw.columns, raw.rows)
    }
}

impl Dataset {
    /// Creates a dataset, checking column uniqueness and row widths.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        ensure_unique(&columns)?;
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != columns.len() {
                return Err(LoaderError::DatasetShape {
                    row,
                    expected: columns.len(),
                    got: cells.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Parses the JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = io_utils::read_text(path)?;
        Self::from_json(&text)
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Consumes the dataset, returning its rows.
    pub fn into_rows(self) -> Vec<Vec<Value>> {
        self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns true if the dataset has a column named `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Iterates over the cells of one column.
    pub fn column_values<'a>(
        &'a self,
        name: &str,
    ) -> Option<impl Iterator<Item = &'a Value> + 'a> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[index]))
    }

    /// Appends a row.
    pub fn push_row(&mut self, cells: Vec<Value>) -> Result<()> {
        if cells.len() != self.columns.len() {
            return Err(LoaderError::DatasetShape {
                row: self.rows.len(),
                expected: self.columns.len(),
                got: cells.len(),
            });
        }
        self.rows.push(cells);
        Ok(())
    }

    /// Replaces all column names at once, keeping cells in place.
    pub fn relabel(&mut self, columns: Vec<String>) -> Result<()> {
        if columns.len() != self.columns.len() {
            return Err(LoaderError::DatasetShape {
                row: 0,
                expected: self.columns.len(),
                got: columns.len(),
            });
        }
        ensure_unique(&columns)?;
        self.columns = columns;
        Ok(())
    }

    /// Removes a column and its cells. Returns false if it does not exist.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(index) = self.column_index(name) else {
            return false;
        };
        self.columns.remove(index);
        for row in &mut self.rows {
            row.remove(index);
        }
        true
    }

    /// Overwrites a column with `values`, appending the column if absent.
    pub fn set_column(&mut self, name: &str, values: Vec<Value>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(LoaderError::DatasetShape {
                row: values.len().min(self.rows.len()),
                expected: self.rows.len(),
                got: values.len(),
            });
        }
        let index = match self.column_index(name) {
            Some(index) => index,
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(Value::Null);
                }
                self.columns.len() - 1
            }
        };
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[index] = value;
        }
        Ok(())
    }
}

/// Fails with `DuplicateColumn` on the first repeated name.
fn ensure_unique(columns: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.as_str()) {
            return Err(LoaderError::DuplicateColumn {
                column: column.clone(),
            });
        }
    }
    Ok(())
}
