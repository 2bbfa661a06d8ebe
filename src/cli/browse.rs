use super::open_engine;
use crate::browser::RecordBrowser;
use crate::error::Result;
use crate::tui::run_view;

pub fn run(seed: Option<String>, per_page: Option<usize>) -> Result<()> {
    let engine = open_engine(seed, per_page)?;
    tracing::info!(records = engine.records().len(), "opening browser");
    let mut browser = RecordBrowser::new(engine);
    run_view(&mut browser)?;
    let remaining = browser.engine().records().len();
    println!("{remaining} customers in table when closed (changes are not saved).");
    Ok(())
}
