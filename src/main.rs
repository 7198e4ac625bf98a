// partspec - expand partition specifications against a data lake

use anyhow::{Context, Result};
use clap::Parser;
use partspec_config::LayoutConfig;
use partspec_core::{expand_partition_paths, PathLayout};
use partspec_storage::Storage;
use tracing::{info, warn};

mod cli;
mod init;

use cli::{Cli, Command, ExpandArgs};
use init::init_tracing;

/// Exit code when the specification expands to nothing.
const EXIT_ABSENT: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => partspec_config::load_from_file_path(path)?,
        None => partspec_config::load_config()?,
    };
    init_tracing(&config);

    let storage = Storage::from_config(&config.storage)?;
    let layout = path_layout(&config.layout);

    match cli.command {
        Command::Expand(args) => {
            let paths = expand(&storage, &layout, &args).await?;
            for path in &paths {
                println!("{path}");
            }
        }
        Command::Verify(args) => {
            let paths = expand(&storage, &layout, &args).await?;
            let mut present = 0usize;
            for path in &paths {
                if storage.exists(&format!("{path}/")).await? {
                    present += 1;
                    println!("present {path}");
                } else {
                    println!("missing {path}");
                }
            }
            info!(
                present,
                missing = paths.len() - present,
                "verified partition paths"
            );
        }
        Command::Clean { expand: args, dry_run } => {
            let paths = expand(&storage, &layout, &args).await?;
            let mut removed = 0usize;
            for path in &paths {
                if dry_run {
                    println!("would remove {path}");
                } else if storage.remove_dir_if_exists(path).await? {
                    removed += 1;
                }
            }
            if !dry_run {
                info!(removed, candidates = paths.len(), "cleaned partition paths");
            }
        }
    }

    Ok(())
}

/// Expand the CLI arguments to partition paths, exiting with a distinct
/// code when the specification matches nothing.
async fn expand(storage: &Storage, layout: &PathLayout, args: &ExpandArgs) -> Result<Vec<String>> {
    // The catalog is listed once, up front; it backs `*` selectors. A
    // listing failure is fatal since there is no other territory source.
    let catalog_path = layout.catalog_path(&args.sub_file_types[0]);
    let catalog = storage
        .list_names(&catalog_path)
        .await
        .with_context(|| format!("failed to list territory catalog at '{catalog_path}'"))?;
    info!(territories = catalog.len(), path = %catalog_path, "listed territory catalog");

    match expand_partition_paths(&catalog, &args.spec, &args.sub_file_types, layout) {
        Some(paths) => Ok(paths),
        None => {
            warn!(spec = %args.spec, "specification expanded to no partition paths");
            std::process::exit(EXIT_ABSENT);
        }
    }
}

fn path_layout(config: &LayoutConfig) -> PathLayout {
    PathLayout::new(&config.root, &config.final_sub_dir, &config.file_sub_dir)
}
