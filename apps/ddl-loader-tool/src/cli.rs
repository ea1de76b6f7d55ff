use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print column requirements parsed from a CREATE TABLE script as JSON
    Reqs {
        /// CREATE TABLE script
        #[arg(long)]
        ddl: PathBuf,
    },

    /// Reconcile a dataset against reference rows and write INSERT statements
    Generate(GenerateArgs),

    /// Check a table's row count after running a generated script
    Verify {
        /// CREATE TABLE script
        #[arg(long)]
        ddl: PathBuf,

        /// Rows in the table before loading
        #[arg(long)]
        reference_rows: usize,

        /// Rows in the table after loading
        #[arg(long)]
        after_rows: usize,

        /// Rows inserted by the script
        #[arg(long)]
        added: usize,
    },
}

#[derive(Args)]
pub struct GenerateArgs {
    /// CREATE TABLE script
    #[arg(long)]
    pub ddl: PathBuf,

    /// Rows to insert (JSON: {"columns": [...], "rows": [[...]]})
    #[arg(long)]
    pub dataset: PathBuf,

    /// Current table contents (same JSON form)
    #[arg(long)]
    pub reference: PathBuf,

    /// Column crosswalk (JSON object: {"dataset column": "table column"})
    #[arg(long)]
    pub crosswalk: Option<PathBuf>,

    /// Primary-key column (default: IDENTITY column, else first column)
    #[arg(long)]
    pub primary_key: Option<String>,

    /// Output .sql file; prints to stdout if omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Client-side identifier column dropped before insert
    #[arg(long, default_value = "id")]
    pub id_placeholder: String,

    /// Treat no column as a client-side identifier
    #[arg(long, conflicts_with = "id_placeholder")]
    pub no_id_placeholder: bool,

    /// Drop columns the crosswalk leaves unmapped instead of failing
    #[arg(long)]
    pub drop_unmapped: bool,

    /// Case-insensitive substring marking date columns
    #[arg(long, default_value = "date")]
    pub date_marker: String,

    /// Omit SET IDENTITY_INSERT ON/OFF around the inserts
    #[arg(long)]
    pub no_identity_insert: bool,

    /// Keep dataset column order instead of DDL declaration order
    #[arg(long)]
    pub keep_dataset_order: bool,
}
