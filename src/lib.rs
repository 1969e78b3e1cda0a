pub mod batch;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod fix;
pub mod header;
pub mod io_utils;
pub mod merge;
pub mod reconcile;
pub mod record;
pub mod sanitize;
pub mod schema;

use std::{env, path::PathBuf, sync::OnceLock};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cli::{BatchArgs, Cli, Commands, MergeArgs, SanitizeArgs},
    config::Options,
    reconcile::ReconcileOptions,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("maf_toolkit", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Sanitize(args) => handle_sanitize(&args),
        Commands::Merge(args) => handle_merge(&args),
        Commands::Batch(args) => handle_batch(&args),
    }
}

fn handle_sanitize(args: &SanitizeArgs) -> Result<()> {
    let options = resolve_options(
        args.config.as_deref(),
        args.no_sort,
        args.no_add_missing,
        &args.exclude_columns,
        &args.extra_columns,
    )?;

    let errors = sanitize::sanitize(
        &args.input,
        args.output.as_deref(),
        args.misc_output.as_deref(),
        &options,
    )
    .with_context(|| format!("Sanitizing {:?}", args.input))?;

    info!(
        "Number of errors and/or warnings: {} in '{}'",
        errors,
        args.input.display()
    );
    Ok(())
}

fn handle_merge(args: &MergeArgs) -> Result<()> {
    let merged = merge::merge(&args.target, &args.source, args.output.as_deref())
        .with_context(|| format!("Merging {:?} into {:?}", args.source, args.target))?;
    info!("Merged file: '{}'", merged.display());
    Ok(())
}

fn handle_batch(args: &BatchArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let options = apply_overrides(
        config.reconcile_options(),
        args.no_sort,
        args.no_add_missing,
        &args.exclude_columns,
        &[],
    );
    let jobs = args.jobs.or(config.jobs);

    let inputs = expand_inputs(&args.inputs)?;
    if inputs.is_empty() {
        return Err(anyhow!("At least one input file must be provided"));
    }

    let results = batch::sanitize_all(&inputs, args.output_dir.as_deref(), &options, jobs)?;

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    if failed > 0 {
        return Err(anyhow!("{failed} of {} file(s) failed", results.len()));
    }
    Ok(())
}

fn resolve_options(
    config: Option<&std::path::Path>,
    no_sort: bool,
    no_add_missing: bool,
    exclude_columns: &[String],
    extra_columns: &[String],
) -> Result<ReconcileOptions> {
    let base = load_config(config)?;
    Ok(apply_overrides(
        base.reconcile_options(),
        no_sort,
        no_add_missing,
        exclude_columns,
        extra_columns,
    ))
}

fn load_config(path: Option<&std::path::Path>) -> Result<Options> {
    match path {
        Some(path) => Options::load(path),
        None => Ok(Options::default()),
    }
}

fn apply_overrides(
    mut options: ReconcileOptions,
    no_sort: bool,
    no_add_missing: bool,
    exclude_columns: &[String],
    extra_columns: &[String],
) -> ReconcileOptions {
    if no_sort {
        options.sort = false;
    }
    if no_add_missing {
        options.add_missing = false;
    }
    options
        .excluded_columns
        .extend(exclude_columns.iter().cloned());
    options.extra_columns.extend(extra_columns.iter().cloned());
    options
}

/// Expands directory inputs into their contained MAF files; plain files
/// pass through unchanged.
fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let entries = std::fs::read_dir(input)
                .with_context(|| format!("Reading input directory {input:?}"))?;
            let mut found = Vec::new();
            for entry in entries {
                let path = entry
                    .with_context(|| format!("Reading input directory {input:?}"))?
                    .path();
                if path.is_file() && is_maf_path(&path) {
                    found.push(path);
                }
            }
            found.sort();
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn is_maf_path(path: &std::path::Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("maf") || ext.eq_ignore_ascii_case("txt")
    )
}
