use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Sanitize, reconcile, and merge MAF mutation files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sanitize a MAF file, fixing structural defects and diverting unfixable rows
    Sanitize(SanitizeArgs),
    /// Merge a supplementary MAF file into a target MAF file
    Merge(MergeArgs),
    /// Sanitize multiple MAF files concurrently
    Batch(BatchArgs),
}

#[derive(Debug, Args)]
pub struct SanitizeArgs {
    /// Input MAF file ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Sanitized output MAF file; omit to validate only
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Side output for rows with unfixable defects (defaults to the output
    /// path with '_misc' inserted before the extension)
    #[arg(long = "misc-output")]
    pub misc_output: Option<PathBuf>,
    /// Keep the source column order instead of regrouping canonically
    #[arg(long = "no-sort")]
    pub no_sort: bool,
    /// Do not backfill missing standard columns
    #[arg(long = "no-add-missing")]
    pub no_add_missing: bool,
    /// Columns to omit from the output schema
    #[arg(long = "exclude-columns", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub exclude_columns: Vec<String>,
    /// Extension columns to append to the output schema when missing
    #[arg(long = "extra-columns", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub extra_columns: Vec<String>,
    /// YAML options document (flags override its values)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Target MAF file; its column order is preserved
    #[arg(short = 't', long = "target")]
    pub target: PathBuf,
    /// Source MAF file appended onto the target
    #[arg(short = 's', long = "source")]
    pub source: PathBuf,
    /// Merged output file (defaults to '<target>.merged')
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Input MAF files or directories of MAF files
    #[arg(short = 'i', long = "input", action = clap::ArgAction::Append)]
    pub inputs: Vec<PathBuf>,
    /// Directory for sanitized outputs; omit to validate only
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,
    /// Worker count (defaults to the machine's CPU count)
    #[arg(short = 'j', long = "jobs")]
    pub jobs: Option<usize>,
    /// Keep the source column order instead of regrouping canonically
    #[arg(long = "no-sort")]
    pub no_sort: bool,
    /// Do not backfill missing standard columns
    #[arg(long = "no-add-missing")]
    pub no_add_missing: bool,
    /// Columns to omit from the output schema
    #[arg(long = "exclude-columns", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub exclude_columns: Vec<String>,
    /// YAML options document (flags override its values)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}
