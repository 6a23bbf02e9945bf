use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use rust_sqlfmt::{files, format_sql_files, load_options, FormattingOptions};

#[derive(Parser)]
#[command(name = "rust-sqlfmt")]
#[command(author, version, about = "Fast, idempotent T-SQL formatter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format SQL files (directories are searched for *.sql)
    Format {
        /// Files or directories to format
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Write the formatted text back to each file
        #[arg(short, long, conflicts_with = "check")]
        write: bool,

        /// Exit with an error if any file is not already formatted
        #[arg(long)]
        check: bool,

        /// TOML file with formatting options
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Format {
            paths,
            write,
            check,
            config,
            verbose,
        } => {
            init_tracing(verbose);

            let options = match config {
                Some(path) => load_options(&path)?,
                None => FormattingOptions::default(),
            };

            let sql_files = collect_sql_files(&paths);
            tracing::debug!("Found {} SQL files", sql_files.len());

            let mut failed = 0;
            let mut changed = 0;
            for result in format_sql_files(&sql_files, &options) {
                let file = match result {
                    Ok(file) => file,
                    Err(e) => {
                        tracing::warn!("{}", e);
                        failed += 1;
                        continue;
                    }
                };

                if check {
                    if file.is_changed() {
                        println!("{}", file.path.display());
                        changed += 1;
                    }
                } else if write {
                    if file.is_changed() {
                        files::write_sql_file(&file.path, &file.formatted)?;
                        tracing::info!("Formatted {}", file.path.display());
                        changed += 1;
                    }
                } else {
                    print!("{}", file.formatted);
                }
            }

            if failed > 0 {
                bail!("{} file(s) could not be formatted", failed);
            }
            if check && changed > 0 {
                bail!("{} file(s) would be reformatted", changed);
            }
            if write {
                tracing::info!("{} of {} file(s) reformatted", changed, sql_files.len());
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Expand directories into the `.sql` files below them. Explicit file paths
/// are kept as given.
fn collect_sql_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file() && is_sql_file(entry.path()))
                .map(|entry| entry.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    files
}

fn is_sql_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("sql"))
}
