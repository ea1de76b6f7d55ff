//! Reconciliation of candidate datasets against a target schema and its
//! existing reference rows.

mod crosswalk;
mod keys;
mod normalize;

pub use crosswalk::Crosswalk;
pub use keys::PrimaryKeyPlan;
pub use normalize::{check_constraints, normalize_cell, ConstraintViolation};

use serde::Serialize;
use std::collections::HashSet;

use crate::config::{LoaderConfig, MismatchPolicy};
use crate::dataset::{Dataset, Literal, Value};
use crate::error::{LoaderError, Result};
use crate::schema::SchemaRequirements;

/// Diagnostics gathered while reconciling one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Columns that did not match the reference before crosswalk renames
    pub needs_mapping: Vec<String>,
    /// Crosswalk keys naming no dataset column
    pub unknown_crosswalk_keys: Vec<String>,
    /// Columns dropped under `MismatchPolicy::DropColumns`
    pub dropped_columns: Vec<String>,
    /// Nullability and length problems in the reconciled rows
    pub violations: Vec<ConstraintViolation>,
}

/// Dataset aligned to the target schema, ready for statement emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciledDataset {
    /// Target table name
    pub table_name: String,
    /// Column names, positionally aligned with every row
    pub columns: Vec<String>,
    /// Rows of SQL literals
    pub rows: Vec<Vec<Literal>>,
    /// Keys assigned to the rows
    pub primary_key: PrimaryKeyPlan,
    /// Non-fatal diagnostics
    pub report: ReconcileReport,
}

impl ReconciledDataset {
    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Aligns candidate datasets with one target schema.
pub struct Reconciler<'a> {
    schema: &'a SchemaRequirements,
    config: &'a LoaderConfig,
}

impl<'a> Reconciler<'a> {
    /// Creates a reconciler for `schema`.
    pub fn new(schema: &'a SchemaRequirements, config: &'a LoaderConfig) -> Self {
        Self { schema, config }
    }

    /// Reconciles `dataset` with the schema and `reference`.
    ///
    /// Takes ownership of `dataset`: columns are renamed through `crosswalk`,
    /// the client-side identifier placeholder is dropped, and `primary_key`
    /// is overwritten with keys following the reference maximum. Columns
    /// still unknown after renaming are handled per the configured
    /// `MismatchPolicy`.
    pub fn reconcile(
        &self,
        crosswalk: &Crosswalk,
        mut dataset: Dataset,
        reference: &Dataset,
        primary_key: &str,
    ) -> Result<ReconciledDataset> {
        let table = &self.schema.table_name;
        let known: HashSet<&str> = reference
            .columns()
            .iter()
            .map(String::as_str)
            .chain(self.schema.columns.iter().map(|c| c.name.as_str()))
            .collect();

        let mut report = ReconcileReport {
            unknown_crosswalk_keys: crosswalk.unknown_keys(&dataset),
            ..Default::default()
        };
        for key in &report.unknown_crosswalk_keys {
            tracing::warn!("{}: crosswalk key '{}' names no dataset column", table, key);
        }

        report.needs_mapping = self.misnamed(dataset.columns(), &known);
        if !report.needs_mapping.is_empty() {
            tracing::debug!(
                "{}: columns {:?} need crosswalk mapping",
                table,
                report.needs_mapping
            );
        }

        crosswalk.apply(&mut dataset)?;

        let unmapped = self.misnamed(dataset.columns(), &known);
        if !unmapped.is_empty() {
            match self.config.mismatch_policy {
                MismatchPolicy::Abort => {
                    return Err(LoaderError::SchemaMismatch {
                        table: table.clone(),
                        columns: unmapped,
                    });
                }
                MismatchPolicy::DropColumns => {
                    tracing::warn!("{}: dropping unmapped columns {:?}", table, unmapped);
                    for column in &unmapped {
                        dataset.drop_column(column);
                    }
                    report.dropped_columns = unmapped;
                }
            }
        }

        if let Some(placeholder) = &self.config.id_placeholder {
            if placeholder != primary_key && dataset.drop_column(placeholder) {
                tracing::debug!(
                    "{}: dropped identifier placeholder '{}'",
                    table,
                    placeholder
                );
            }
        }

        let plan = PrimaryKeyPlan::derive(reference, primary_key, dataset.row_count())?;
        dataset.set_column(primary_key, plan.keys().map(Value::Integer).collect())?;
        tracing::debug!(
            "{}: assigned {} keys to '{}' after {}",
            table,
            plan.count,
            primary_key,
            plan.floor
        );

        let order = self.column_order(dataset.columns());
        let columns: Vec<String> = order
            .iter()
            .map(|&i| dataset.columns()[i].clone())
            .collect();
        let date_columns: Vec<bool> = columns
            .iter()
            .map(|c| self.config.is_date_column(c))
            .collect();

        let rows: Vec<Vec<Literal>> = dataset
            .into_rows()
            .into_iter()
            .map(|mut cells| {
                order
                    .iter()
                    .zip(&date_columns)
                    .map(|(&i, &is_date)| {
                        normalize_cell(std::mem::replace(&mut cells[i], Value::Null), is_date)
                    })
                    .collect()
            })
            .collect();

        report.violations = check_constraints(self.schema, &columns, &rows);
        for violation in &report.violations {
            tracing::warn!("{}: {}", table, violation);
        }

        Ok(ReconciledDataset {
            table_name: table.clone(),
            columns,
            rows,
            primary_key: plan,
            report,
        })
    }

    /// Columns absent from `known` that are not the identifier placeholder.
    ///
    /// Used both before and after crosswalk renames.
    fn misnamed(&self, columns: &[String], known: &HashSet<&str>) -> Vec<String> {
        columns
            .iter()
            .filter(|c| !known.contains(c.as_str()) && !self.config.is_id_placeholder(c))
            .cloned()
            .collect()
    }

    /// Source positions of the output columns.
    ///
    /// Schema columns come first in declaration order, then any others in
    /// their dataset order.
    fn column_order(&self, columns: &[String]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..columns.len()).collect();
        if self.config.order_by_schema {
            order.sort_by_key(|&i| self.schema.position(&columns[i]).unwrap_or(usize::MAX));
        }
        order
    }
}
