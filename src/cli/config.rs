use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::models::PageSize;
use crate::settings::{load_settings, save_settings, shellexpand_path, Settings};

pub fn show() -> Result<()> {
    println!("{}", format_settings(&load_settings()));
    Ok(())
}

pub fn set(per_page: Option<usize>, seed: Option<String>, clear_seed: bool) -> Result<()> {
    let mut settings = load_settings();
    if let Some(n) = per_page {
        settings.rows_per_page = PageSize::try_from(n)?;
    }
    if let Some(path) = seed {
        settings.seed_file = Some(shellexpand_path(&path));
    }
    if clear_seed {
        settings.seed_file = None;
    }
    save_settings(&settings)?;
    println!("{}", format_settings(&settings));
    Ok(())
}

fn format_settings(settings: &Settings) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec![
        Cell::new("Rows per page"),
        Cell::new(settings.rows_per_page),
    ]);
    table.add_row(vec![
        Cell::new("Seed file"),
        Cell::new(settings.seed_file.as_deref().unwrap_or("(bundled dataset)")),
    ]);
    format!("Settings\n{table}")
}
