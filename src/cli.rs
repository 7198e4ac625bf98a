// Command-line interface definition

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Expand territory/date-range specifications into partition paths.
///
/// A specification is a comma-separated list of clauses, each
/// `territory[:from[:to]]`. `territory` is a literal code or `*` for every
/// code found in storage. Date tokens are `YYYY-MM-DD`, `YYYYMMDD`,
/// `YYYY-MM` (whole month), or `C<n>` (n days before today).
#[derive(Debug, Parser)]
#[command(name = "partspec", version, about)]
pub struct Cli {
    /// Path to a partspec.toml config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the expanded partition paths, one per line
    Expand(ExpandArgs),

    /// Report which expanded partition paths exist in storage
    Verify(ExpandArgs),

    /// Remove the expanded partition directories from storage
    Clean {
        #[command(flatten)]
        expand: ExpandArgs,

        /// Print what would be removed without touching storage
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Debug, clap::Args)]
pub struct ExpandArgs {
    /// Specification string, e.g. "*:2021-01-01:2021-01-31,GB:C7"
    #[arg(long)]
    pub spec: String,

    /// Sub-file-type partition name; repeat for several
    #[arg(long = "sub-file-type", required = true)]
    pub sub_file_types: Vec<String>,
}
