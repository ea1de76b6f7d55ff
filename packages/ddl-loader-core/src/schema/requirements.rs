//! Parsed schema requirements and parse diagnostics.

use serde::Serialize;
use std::fmt;

/// Requirements for one column, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRequirement {
    /// Column name (delimiters stripped)
    pub name: String,
    /// Declared type as written between delimiters (e.g. "char", "int")
    pub declared_type: String,
    /// Length of character types such as `char(3)`; None otherwise
    pub max_length: Option<u32>,
    /// False when the declaration contains "NOT NULL"
    pub nullable: bool,
    /// True when the declaration carries an `IDENTITY` property
    pub identity: bool,
    /// Declaration fragment as it appeared in the DDL
    pub original: String,
}

/// Table name plus ordered column requirements.
///
/// `columns` is never empty; the parser fails with `EmptySchema` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaRequirements {
    /// Table name as written after `CREATE TABLE` (e.g. "[dbo].[SurveyEvent]")
    pub table_name: String,
    /// Column requirements in declaration order
    pub columns: Vec<ColumnRequirement>,
}

impl SchemaRequirements {
    /// Looks up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&ColumnRequirement> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Returns the declaration position of a column.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Returns the first column declared with `IDENTITY`.
    pub fn identity_column(&self) -> Option<&ColumnRequirement> {
        self.columns.iter().find(|c| c.identity)
    }

    /// Returns columns declared `NOT NULL`.
    pub fn not_null_columns(&self) -> impl Iterator<Item = &ColumnRequirement> {
        self.columns.iter().filter(|c| !c.nullable)
    }
}

/// Why a column fragment was not turned into a requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    /// Fragment did not contain exactly a name and a type token
    TokenCount { found: usize },
    /// Name token was empty
    EmptyName,
    /// Character type whose length is not an integer, e.g. `varchar(max)`
    UnparsedLength { declared: String },
}

/// Non-fatal parse diagnostic for one column fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    /// Zero-based index of the fragment in the column list
    pub position: usize,
    /// Raw fragment text
    pub fragment: String,
    /// Diagnostic kind
    #[serde(flatten)]
    pub kind: WarningKind,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::TokenCount { found } => write!(
                f,
                "fragment {} '{}' did not include a column name and type ({} delimited tokens)",
                self.position, self.fragment, found
            ),
            WarningKind::EmptyName => write!(
                f,
                "fragment {} '{}' has an empty column name",
                self.position, self.fragment
            ),
            WarningKind::UnparsedLength { declared } => write!(
                f,
                "fragment {} '{}' has non-numeric length '{}'",
                self.position, self.fragment, declared
            ),
        }
    }
}

/// Parser output: requirements plus diagnostics for skipped fragments.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedSchema {
    /// Parsed requirements
    pub requirements: SchemaRequirements,
    /// Diagnostics, in fragment order
    pub warnings: Vec<ParseWarning>,
}
