//! Per-table load target: parsed schema plus everything needed to generate
//! and verify its insert script.

use std::path::{Path, PathBuf};

use crate::config::LoaderConfig;
use crate::dataset::Dataset;
use crate::emit::{render_script, StatementEmitter};
use crate::error::{LoaderError, Result};
use crate::io_utils;
use crate::reconcile::{Crosswalk, ReconciledDataset, Reconciler};
use crate::schema::{ParseWarning, SchemaParser, SchemaRequirements};

/// One target table in the destination database.
#[derive(Debug, Clone)]
pub struct TargetTable {
    /// Parsed requirements of the table
    pub schema: SchemaRequirements,
    /// Warnings raised while parsing the DDL
    pub warnings: Vec<ParseWarning>,
    /// Source of the DDL, when read from a file
    pub ddl_path: Option<PathBuf>,
    insert_path: Option<PathBuf>,
    crosswalk: Crosswalk,
    primary_key: String,
    config: LoaderConfig,
}

impl TargetTable {
    /// Builds a target from DDL text.
    ///
    /// The primary key defaults to the `IDENTITY` column, falling back to the
    /// first declared column.
    pub fn from_ddl(ddl: &str, config: LoaderConfig) -> Result<Self> {
        let parsed = SchemaParser::parse(ddl)?;
        let primary_key = parsed
            .requirements
            .identity_column()
            .unwrap_or(&parsed.requirements.columns[0])
            .name
            .clone();

        tracing::info!(
            "Target {} parsed: {} columns, primary key '{}'",
            parsed.requirements.table_name,
            parsed.requirements.columns.len(),
            primary_key
        );

        Ok(Self {
            schema: parsed.requirements,
            warnings: parsed.warnings,
            ddl_path: None,
            insert_path: None,
            crosswalk: Crosswalk::new(),
            primary_key,
            config,
        })
    }

    /// Builds a target from a DDL file.
    pub fn from_ddl_file(path: &Path, config: LoaderConfig) -> Result<Self> {
        let text = io_utils::read_text(path)?;
        let mut target = Self::from_ddl(&text, config)?;
        target.ddl_path = Some(path.to_path_buf());
        Ok(target)
    }

    /// Target table name.
    pub fn table_name(&self) -> &str {
        &self.schema.table_name
    }

    /// Primary-key column receiving generated keys.
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Overrides the primary-key column.
    pub fn set_primary_key(&mut self, column: impl Into<String>) {
        self.primary_key = column.into();
    }

    /// Current crosswalk.
    pub fn crosswalk(&self) -> &Crosswalk {
        &self.crosswalk
    }

    /// Replaces the crosswalk wholesale.
    pub fn set_crosswalk(&mut self, crosswalk: Crosswalk) {
        self.crosswalk = crosswalk;
    }

    /// Script destination, if set.
    pub fn insert_path(&self) -> Option<&Path> {
        self.insert_path.as_deref()
    }

    /// Sets the script destination; it must end in `.sql`.
    pub fn set_insert_path(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let is_sql = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "sql");
        if !is_sql {
            return Err(LoaderError::InvalidInsertPath {
                path: path.display().to_string(),
            });
        }
        self.insert_path = Some(path);
        Ok(())
    }

    /// Loader configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Reconciles `dataset` against `reference` for this table.
    pub fn reconcile(&self, dataset: Dataset, reference: &Dataset) -> Result<ReconciledDataset> {
        Reconciler::new(&self.schema, &self.config).reconcile(
            &self.crosswalk,
            dataset,
            reference,
            &self.primary_key,
        )
    }

    /// Reconciles and emits the insert statements.
    pub fn prepare(&self, dataset: Dataset, reference: &Dataset) -> Result<Vec<String>> {
        let reconciled = self.reconcile(dataset, reference)?;
        Ok(StatementEmitter::new(&self.config).emit(self.table_name(), &reconciled))
    }

    /// Writes statements to the insert path, one per line.
    pub fn write_script(&self, statements: &[String]) -> Result<&Path> {
        let path = self
            .insert_path
            .as_deref()
            .ok_or_else(|| LoaderError::InsertPathUnset {
                table: self.schema.table_name.clone(),
            })?;
        io_utils::write_text(path, &render_script(statements))?;
        tracing::info!(
            "Wrote {} statements for {} to {}",
            statements.len(),
            self.table_name(),
            path.display()
        );
        Ok(path)
    }

    /// Checks the table's row count after the script was executed.
    ///
    /// `after_rows` must equal `reference_rows + added`.
    pub fn validate_load(
        &self,
        reference_rows: usize,
        after_rows: usize,
        added: usize,
    ) -> Result<()> {
        let expected = reference_rows
            .checked_add(added)
            .ok_or_else(|| LoaderError::RowCountOverflow {
                table: self.schema.table_name.clone(),
                reference_rows,
                added,
            })?;
        if after_rows != expected {
            return Err(LoaderError::LoadCountMismatch {
                table: self.schema.table_name.clone(),
                expected,
                actual: after_rows,
            });
        }
        Ok(())
    }
}
