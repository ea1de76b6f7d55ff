//! `INSERT` script generation.

use crate::config::LoaderConfig;
use crate::dataset::Literal;
use crate::reconcile::ReconciledDataset;

/// Renders reconciled rows as SQL statements.
#[derive(Debug, Clone, Copy)]
pub struct StatementEmitter {
    identity_override: bool,
}

impl Default for StatementEmitter {
    fn default() -> Self {
        Self {
            identity_override: true,
        }
    }
}

impl StatementEmitter {
    /// Creates an emitter from loader configuration.
    pub fn new(config: &LoaderConfig) -> Self {
        Self {
            identity_override: config.identity_override,
        }
    }

    /// Emits one statement per line of the script.
    ///
    /// `SET IDENTITY_INSERT <table> ON`, one `INSERT` per row in row order,
    /// then `SET IDENTITY_INSERT <table> OFF`. Cells are written exactly as
    /// their literal renders; nothing else is escaped.
    pub fn emit(&self, table_name: &str, dataset: &ReconciledDataset) -> Vec<String> {
        let mut statements = Vec::with_capacity(dataset.rows.len() + 2);
        if self.identity_override {
            statements.push(identity_insert(table_name, true));
        }
        let column_list = dataset.columns.join(", ");
        for row in &dataset.rows {
            statements.push(insert_statement(table_name, &column_list, row));
        }
        if self.identity_override {
            statements.push(identity_insert(table_name, false));
        }
        tracing::debug!("Emitted {} statements for {}", statements.len(), table_name);
        statements
    }
}

/// `SET IDENTITY_INSERT <table> ON|OFF`.
pub fn identity_insert(table_name: &str, on: bool) -> String {
    format!(
        "SET IDENTITY_INSERT {} {}",
        table_name,
        if on { "ON" } else { "OFF" }
    )
}

/// `INSERT INTO <table> (<columns>) VALUES (<values>)`.
pub fn insert_statement(table_name: &str, column_list: &str, row: &[Literal]) -> String {
    let values: Vec<String> = row.iter().map(Literal::to_string).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table_name,
        column_list,
        values.join(", ")
    )
}

/// Joins statements into script text, one per line.
pub fn render_script(statements: &[String]) -> String {
    statements.join("\n")
}
