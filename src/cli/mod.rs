//! Command-line shell around the traversal/render engine.
//!
//! Every command performs a fresh traversal; nothing is cached between
//! invocations, so output always reflects the live filesystem state.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{settings, AppConfig};
use crate::core::{collect_rows, render_outline, write_csv, DescriptionStore, FilterSettings};

#[derive(Parser)]
#[command(
    name = "treescribe",
    version,
    about = "Generate annotated file tree manifests for research data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the annotated tree outline for a directory.
    Tree {
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Export the annotated tree to a Markdown, plain-text, or CSV file.
    Export {
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        /// Export format.
        #[arg(long, value_enum, default_value = "md")]
        format: ExportFormat,

        /// Target file; defaults to the standard filename inside DIR.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Set (or clear, with empty TEXT) the description for a file or folder.
    Describe {
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        /// The entry to describe, absolute or relative to DIR.
        #[arg(value_name = "PATH")]
        path: PathBuf,

        #[arg(value_name = "TEXT")]
        text: String,
    },
}

#[derive(Args)]
pub struct FilterArgs {
    /// Exclude hidden files and folders.
    #[arg(long)]
    pub exclude_hidden: bool,

    /// Comma-separated extension suffixes to exclude, e.g. ".log, .tmp".
    #[arg(long, value_name = "LIST")]
    pub exclude_extensions: Option<String>,
}

impl FilterArgs {
    /// Resolves the effective filter settings: explicit flags win, the
    /// persisted configuration supplies the defaults.
    fn resolve(&self, config: &AppConfig) -> FilterSettings {
        let exclude_hidden = self.exclude_hidden || config.exclude_hidden;
        let extensions = self
            .exclude_extensions
            .as_deref()
            .unwrap_or(&config.exclude_extensions);
        FilterSettings::new(exclude_hidden, extensions)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Markdown outline.
    Md,
    /// Plain-text outline, identical content to Markdown.
    Txt,
    /// Flat per-entry rows.
    Csv,
}

impl ExportFormat {
    fn default_filename<'a>(&self, config: &'a AppConfig) -> &'a str {
        match self {
            ExportFormat::Md => &config.markdown_filename,
            ExportFormat::Txt => &config.plain_text_filename,
            ExportFormat::Csv => &config.csv_filename,
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {e}. Using defaults.");
        AppConfig::default()
    });

    match cli.command {
        Commands::Tree { directory, filters } => {
            let root = canonicalize_directory(&directory)?;
            let settings = filters.resolve(&config);
            let descriptions = DescriptionStore::load(&root);

            let report = render_outline(&root, &settings, &descriptions);
            println!("{}", report.text);

            remember_directory(&mut config, root);
        }
        Commands::Export {
            directory,
            format,
            output,
            filters,
        } => {
            let root = canonicalize_directory(&directory)?;
            let settings = filters.resolve(&config);
            let descriptions = DescriptionStore::load(&root);

            let target =
                output.unwrap_or_else(|| root.join(format.default_filename(&config)));

            match format {
                ExportFormat::Md | ExportFormat::Txt => {
                    let report = render_outline(&root, &settings, &descriptions);
                    fs::write(&target, report.text)
                        .with_context(|| format!("writing export file {:?}", target))?;
                    tracing::info!(
                        "Exported {} folder(s), {} file(s), {} byte(s) to {:?}",
                        report.counters.folders,
                        report.counters.files,
                        report.counters.total_size,
                        target
                    );
                }
                ExportFormat::Csv => {
                    let rows = collect_rows(&root, &settings, &descriptions);
                    let file = fs::File::create(&target)
                        .with_context(|| format!("creating export file {:?}", target))?;
                    write_csv(&rows, file)?;
                    tracing::info!("Exported {} row(s) to {:?}", rows.len(), target);
                }
            }

            println!("File tree exported to {}", target.display());
            remember_directory(&mut config, root);
        }
        Commands::Describe {
            directory,
            path,
            text,
        } => {
            let root = canonicalize_directory(&directory)?;
            let target = resolve_entry_path(&root, &path);

            let mut store = DescriptionStore::load(&root);
            if text.is_empty() {
                if store.remove(&target) {
                    store.save()?;
                    println!("Cleared description for {}", target.display());
                } else {
                    println!("No description set for {}", target.display());
                }
            } else {
                store.set(target.clone(), text);
                store.save()?;
                println!("Description saved for {}", target.display());
            }

            remember_directory(&mut config, root);
        }
    }

    Ok(())
}

/// Canonicalizes the selected directory once, so description keys and every
/// rendered path agree for the rest of the command.
fn canonicalize_directory(directory: &Path) -> Result<PathBuf> {
    let root = fs::canonicalize(directory)
        .with_context(|| format!("cannot open directory {}", directory.display()))?;
    if !root.is_dir() {
        bail!("{} is not a directory", directory.display());
    }
    Ok(root)
}

/// Resolves a user-supplied entry path against the selected root. The entry
/// may already have been deleted (when clearing a stale description), so a
/// failed canonicalization falls back to the joined path.
fn resolve_entry_path(root: &Path, path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    fs::canonicalize(&absolute).unwrap_or(absolute)
}

fn remember_directory(config: &mut AppConfig, root: PathBuf) {
    if config.last_directory.as_deref() == Some(root.as_path()) {
        return;
    }
    config.last_directory = Some(root);
    if let Err(e) = settings::save_config(config) {
        tracing::warn!("Failed to save config: {e}");
    }
}
