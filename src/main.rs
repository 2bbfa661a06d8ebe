mod browser;
mod cli;
mod engine;
mod error;
mod form;
mod logging;
mod models;
mod seed;
mod settings;
mod tui;

use clap::Parser;

use cli::{Cli, Commands, ConfigCommands};

fn main() {
    let cli = Cli::parse();
    logging::init();

    let result = match cli.command {
        None => cli::browse::run(None, None),
        Some(Commands::Browse { seed, per_page }) => cli::browse::run(seed, per_page),
        Some(Commands::List {
            seed,
            search,
            page,
            per_page,
            json,
        }) => cli::list::run(seed, search, page, per_page, json),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Set {
                per_page,
                seed,
                clear_seed,
            } => cli::config::set(per_page, seed, clear_seed),
        },
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
