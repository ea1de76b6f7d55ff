//! Loader error types.

use thiserror::Error;

/// Schema, reconciliation and script generation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoaderError {
    /// No `CREATE TABLE` clause in the DDL text
    #[error("No CREATE TABLE clause found in DDL text")]
    MissingCreateTable,

    /// `CREATE TABLE` clause without a parenthesized column list
    #[error("CREATE TABLE '{table}' has no column list")]
    MissingColumnList { table: String },

    /// Column list produced no usable column declarations
    #[error("CREATE TABLE '{table}' declares no parseable columns")]
    EmptySchema { table: String },

    /// Dataset columns still unmapped to the reference after applying the crosswalk
    #[error("Columns {columns:?} of dataset for '{table}' do not match any reference column")]
    SchemaMismatch { table: String, columns: Vec<String> },

    /// Reference data cannot provide a primary-key floor
    #[error("Invalid reference for primary key '{column}': {reason}")]
    InvalidReference { column: String, reason: String },

    /// Row width does not match the column list
    #[error("Row {row} has {got} cells, expected {expected}")]
    DatasetShape {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Column name appears twice in one dataset
    #[error("Column '{column}' appears more than once")]
    DuplicateColumn { column: String },

    /// Insert script path without a `.sql` extension
    #[error("Insert script path '{path}' must end in \".sql\"")]
    InvalidInsertPath { path: String },

    /// Script write requested before an insert path was set
    #[error("No insert script path set for '{table}'")]
    InsertPathUnset { table: String },

    /// Post-load row count differs from reference plus inserted rows
    #[error("Load count mismatch for '{table}': expected {expected} rows, found {actual}")]
    LoadCountMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    /// Expected post-load row count does not fit in `usize`
    #[error("Row count for '{table}' overflows: {reference_rows} + {added}")]
    RowCountOverflow {
        table: String,
        reference_rows: usize,
        added: usize,
    },

    /// I/O error reading DDL or writing scripts
    #[error("I/O error: {0}")]
    IoError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoaderError {
    fn from(error: serde_json::Error) -> Self {
        LoaderError::SerializationError(error.to_string())
    }
}

/// Result alias for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;
