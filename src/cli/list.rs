use colored::Colorize;
use comfy_table::{Cell, Table};

use super::open_engine;
use crate::engine::{classify_financial, classify_status, FinancialClass, PageView, StatusClass};
use crate::error::Result;

pub fn run(
    seed: Option<String>,
    search: Option<String>,
    page: usize,
    per_page: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut engine = open_engine(seed, per_page)?;
    if let Some(q) = search.as_deref() {
        engine.set_search_query(q);
    }
    engine.set_page(page);
    let view = engine.query();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", format_page(&view));
    }
    Ok(())
}

fn status_cell(status: &str) -> Cell {
    match classify_status(status) {
        StatusClass::Positive => Cell::new(status.green()),
        StatusClass::Neutral => Cell::new(status.dimmed()),
        StatusClass::Negative => Cell::new(status.red()),
        StatusClass::Special => Cell::new(status.purple()),
        StatusClass::Default => Cell::new(status),
    }
}

fn amount_cell(amount: &str) -> Cell {
    match classify_financial(amount) {
        FinancialClass::Negative => Cell::new(amount.red()),
        FinancialClass::Positive => Cell::new(amount.green()),
    }
}

pub fn format_page(view: &PageView) -> String {
    if view.records.is_empty() {
        return "No matching customers.".to_string();
    }
    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Name", "Description", "Status", "Rate", "Balance", "Deposit",
    ]);
    for r in &view.records {
        table.add_row(vec![
            Cell::new(r.id),
            Cell::new(&r.name),
            Cell::new(&r.description),
            status_cell(&r.status),
            Cell::new(&r.rate),
            amount_cell(&r.balance),
            Cell::new(&r.deposit),
        ]);
    }
    format!(
        "Customer Data\n{table}\nPage {} of {} ({} matching)",
        view.current_page, view.total_pages, view.filtered_count
    )
}
