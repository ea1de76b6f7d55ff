//! Schema introspection and record reconciliation for reference-aligned bulk loads.
//!
//! Parses `CREATE TABLE` text into column requirements, reconciles candidate
//! datasets against existing reference data (crosswalk renames, primary-key
//! continuity, null and date normalization), and emits `INSERT` scripts.

pub mod config;
pub mod dataset;
pub mod emit;
pub mod error;
pub mod io_utils;
pub mod reconcile;
pub mod schema;
pub mod target;

pub use config::{LoaderConfig, MismatchPolicy};
pub use dataset::{Dataset, Literal, Value};
pub use emit::StatementEmitter;
pub use error::{LoaderError, Result};
pub use reconcile::{Crosswalk, ReconciledDataset, Reconciler};
pub use schema::{ColumnRequirement, ParseWarning, ParsedSchema, SchemaParser, SchemaRequirements};
pub use target::TargetTable;
