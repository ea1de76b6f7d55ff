//! Cell normalization and constraint diagnostics.

use serde::Serialize;
use std::fmt;

use crate::dataset::{Literal, Value};
use crate::schema::SchemaRequirements;

/// Converts a cell to its SQL literal.
///
/// Missing cells become `NULL` in every column. Non-missing cells of date
/// columns become text with every `-` removed, so `2024-06-23` is written as
/// `'20240623'`.
pub fn normalize_cell(value: Value, is_date: bool) -> Literal {
    if value.is_missing() {
        return Literal::Null;
    }
    if is_date {
        return Literal::Text(value.to_plain_string().replace('-', ""));
    }
    Literal::from(value)
}

/// A reconciled row that breaks a parsed column requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstraintViolation {
    /// NOT NULL column with no dataset column
    MissingColumn { column: String },
    /// NULL cell in a NOT NULL column
    NullValue { column: String, row: usize },
    /// Text longer than the declared length
    TooLong {
        column: String,
        row: usize,
        max_length: u32,
        length: usize,
    },
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::MissingColumn { column } => {
                write!(f, "NOT NULL column '{}' is not supplied", column)
            }
            ConstraintViolation::NullValue { column, row } => {
                write!(f, "row {}: NOT NULL column '{}' is NULL", row, column)
            }
            ConstraintViolation::TooLong {
                column,
                row,
                max_length,
                length,
            } => write!(
                f,
                "row {}: '{}' holds {} characters, declared length {}",
                row, column, length, max_length
            ),
        }
    }
}

/// Checks reconciled rows against nullability and length requirements.
pub fn check_constraints(
    schema: &SchemaRequirements,
    columns: &[String],
    rows: &[Vec<Literal>],
) -> Vec<ConstraintViolation> {
    let mut violations = Vec::new();

    for requirement in schema.not_null_columns() {
        if !columns.contains(&requirement.name) {
            violations.push(ConstraintViolation::MissingColumn {
                column: requirement.name.clone(),
            });
        }
    }

    for (index, column) in columns.iter().enumerate() {
        let Some(requirement) = schema.column(column) else {
            continue;
        };
        for (row, cells) in rows.iter().enumerate() {
            let cell = &cells[index];
            if cell.is_null() {
                if !requirement.nullable {
                    violations.push(ConstraintViolation::NullValue {
                        column: column.clone(),
                        row,
                    });
                }
                continue;
            }
            if let (Some(max_length), Some(text)) = (requirement.max_length, cell.as_text()) {
                let length = text.chars().count();
                if length > max_length as usize {
                    violations.push(ConstraintViolation::TooLong {
                        column: column.clone(),
                        row,
                        max_length,
                        length,
                    });
                }
            }
        }
    }

    violations
}
