//! Loader configuration.

/// What reconciliation does with dataset columns the crosswalk leaves unmapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MismatchPolicy {
    /// Fail with `LoaderError::SchemaMismatch`
    #[default]
    Abort,
    /// Drop the unmapped columns and log a warning
    DropColumns,
}

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Client-side row identifier column, exempt from the mismatch check and
    /// dropped from reconciled output (None = no placeholder)
    pub id_placeholder: Option<String>,
    /// Handling of columns left unmapped after crosswalk renames
    pub mismatch_policy: MismatchPolicy,
    /// Case-insensitive substring marking date columns
    pub date_marker: String,
    /// Bracket emitted inserts with `SET IDENTITY_INSERT ... ON/OFF`
    pub identity_override: bool,
    /// Reorder reconciled columns to DDL declaration order
    pub order_by_schema: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            id_placeholder: Some("id".to_string()),
            mismatch_policy: MismatchPolicy::Abort,
            date_marker: "date".to_string(),
            identity_override: true,
            order_by_schema: true,
        }
    }
}

impl LoaderConfig {
    /// Returns true if `column` is the configured client-side identifier.
    pub fn is_id_placeholder(&self, column: &str) -> bool {
        self.id_placeholder.as_deref() == Some(column)
    }

    /// Returns true if `column` carries dates and needs normalization.
    pub fn is_date_column(&self, column: &str) -> bool {
        !self.date_marker.is_empty()
            && column
                .to_lowercase()
                .contains(&self.date_marker.to_lowercase())
    }
}
