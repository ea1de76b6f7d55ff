//! CLI tool for CREATE TABLE introspection and INSERT script generation.
//!
//! Provides commands for:
//! - Printing parsed column requirements
//! - Generating reference-aligned INSERT scripts
//! - Post-load row count validation

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, GenerateArgs};
use ddl_loader_core::{
    emit::render_script, Crosswalk, Dataset, LoaderConfig, MismatchPolicy, SchemaParser,
    TargetTable,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Reqs { ddl } => {
            let parsed = SchemaParser::from_file(&ddl)
                .with_context(|| format!("Failed to parse {}", ddl.display()))?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Commands::Generate(args) => generate(args)?,
        Commands::Verify {
            ddl,
            reference_rows,
            after_rows,
            added,
        } => {
            let target = TargetTable::from_ddl_file(&ddl, LoaderConfig::default())
                .with_context(|| format!("Failed to parse {}", ddl.display()))?;
            target.validate_load(reference_rows, after_rows, added)?;
            tracing::info!(
                "{}: {} rows = {} reference + {} added",
                target.table_name(),
                after_rows,
                reference_rows,
                added
            );
        }
    }

    Ok(())
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = LoaderConfig {
        id_placeholder: (!args.no_id_placeholder).then(|| args.id_placeholder.clone()),
        mismatch_policy: if args.drop_unmapped {
            MismatchPolicy::DropColumns
        } else {
            MismatchPolicy::Abort
        },
        date_marker: args.date_marker.clone(),
        identity_override: !args.no_identity_insert,
        order_by_schema: !args.keep_dataset_order,
    };

    let mut target = TargetTable::from_ddl_file(&args.ddl, config)
        .with_context(|| format!("Failed to parse {}", args.ddl.display()))?;
    if let Some(primary_key) = args.primary_key {
        target.set_primary_key(primary_key);
    }
    if let Some(path) = &args.crosswalk {
        let crosswalk = Crosswalk::from_json_file(path)
            .with_context(|| format!("Failed to load crosswalk {}", path.display()))?;
        target.set_crosswalk(crosswalk);
    }

    let dataset = Dataset::from_json_file(&args.dataset)
        .with_context(|| format!("Failed to load dataset {}", args.dataset.display()))?;
    let reference = Dataset::from_json_file(&args.reference)
        .with_context(|| format!("Failed to load reference {}", args.reference.display()))?;

    let statements = target
        .prepare(dataset, &reference)
        .with_context(|| format!("Failed to prepare inserts for {}", target.table_name()))?;

    match args.output {
        Some(path) => {
            target.set_insert_path(path)?;
            target.write_script(&statements)?;
        }
        None => println!("{}", render_script(&statements)),
    }

    Ok(())
}
