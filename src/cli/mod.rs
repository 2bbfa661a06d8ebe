pub mod browse;
pub mod config;
pub mod list;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::engine::RecordViewEngine;
use crate::error::Result;
use crate::models::PageSize;
use crate::seed;
use crate::settings::{load_settings, shellexpand_path};

/// Build an engine from the seed and page size, letting flags override settings.
pub(crate) fn open_engine(
    seed_file: Option<String>,
    per_page: Option<usize>,
) -> Result<RecordViewEngine> {
    let settings = load_settings();
    let rows = match per_page {
        Some(n) => PageSize::try_from(n)?,
        None => settings.rows_per_page,
    };
    let path = seed_file
        .or(settings.seed_file)
        .map(|p| PathBuf::from(shellexpand_path(&p)));
    let records = seed::load(path.as_deref())?;
    Ok(RecordViewEngine::with_page_size(records, rows))
}

#[derive(Parser)]
#[command(name = "custdesk", about = "Browse, search and edit a table of customer records.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive customer table (default).
    Browse {
        /// JSON or CSV file to load instead of the bundled dataset
        #[arg(long)]
        seed: Option<String>,
        /// Rows per page: 5, 10, 15 or 20
        #[arg(long = "per-page")]
        per_page: Option<usize>,
    },
    /// Print one page of customers.
    List {
        /// JSON or CSV file to load instead of the bundled dataset
        #[arg(long)]
        seed: Option<String>,
        /// Case-insensitive match on name, description or status
        #[arg(long)]
        search: Option<String>,
        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: usize,
        /// Rows per page: 5, 10, 15 or 20
        #[arg(long = "per-page")]
        per_page: Option<usize>,
        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change saved defaults.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current settings.
    Show,
    /// Update settings.
    Set {
        /// Default rows per page: 5, 10, 15 or 20
        #[arg(long = "per-page")]
        per_page: Option<usize>,
        /// Default seed file (JSON or CSV)
        #[arg(long)]
        seed: Option<String>,
        /// Go back to the bundled dataset
        #[arg(long = "clear-seed", conflicts_with = "seed")]
        clear_seed: bool,
    },
}
