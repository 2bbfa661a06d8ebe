use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{NewRecord, PageSize, Record};

/// Search, paging and selection state. Everything the presentation layer
/// needs to restore a view lives here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub search_query: String,
    /// 1-based. Stored as requested; `query()` clamps it.
    pub current_page: usize,
    pub rows_per_page: PageSize,
    pub selected: BTreeSet<u64>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            current_page: 1,
            rows_per_page: PageSize::default(),
            selected: BTreeSet::new(),
        }
    }
}

/// One computed page of the filtered collection.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub records: Vec<Record>,
    pub total_pages: usize,
    pub current_page: usize,
    pub filtered_count: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Positive,
    Neutral,
    Negative,
    Special,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinancialClass {
    Positive,
    Negative,
}

pub fn classify_status(status: &str) -> StatusClass {
    match status.to_lowercase().as_str() {
        "paid" => StatusClass::Positive,
        "unpaid" => StatusClass::Neutral,
        "due" => StatusClass::Negative,
        "open" => StatusClass::Special,
        _ => StatusClass::Default,
    }
}

pub fn classify_financial(amount: &str) -> FinancialClass {
    if amount.starts_with('-') {
        FinancialClass::Negative
    } else {
        FinancialClass::Positive
    }
}

/// Case-insensitive substring match on name, description or status.
fn record_matches(record: &Record, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [&record.name, &record.description, &record.status]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

pub struct RecordViewEngine {
    records: Vec<Record>,
    state: ViewState,
    /// `None` once `u64::MAX` has been handed out.
    next_id: Option<u64>,
}

impl RecordViewEngine {
    pub fn new(records: Vec<Record>) -> Self {
        Self::with_page_size(records, PageSize::default())
    }

    pub fn with_page_size(records: Vec<Record>, rows_per_page: PageSize) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0).checked_add(1);
        Self {
            records,
            state: ViewState {
                rows_per_page,
                ..ViewState::default()
            },
            next_id,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.state.search_query = query.to_string();
        self.state.current_page = 1;
    }

    pub fn set_rows_per_page(&mut self, size: PageSize) {
        self.state.rows_per_page = size;
        self.state.current_page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.current_page = page;
    }

    /// Advance one page. Does nothing on the last page.
    pub fn next_page(&mut self) {
        let total = self.total_pages();
        let page = self.effective_page(total);
        if page < total {
            self.state.current_page = page + 1;
        }
    }

    /// Go back one page. Does nothing on the first page.
    pub fn prev_page(&mut self) {
        let page = self.effective_page(self.total_pages());
        self.state.current_page = page.saturating_sub(1).max(1);
    }

    pub fn toggle_select(&mut self, id: u64, selected: bool) {
        if selected {
            if self.records.iter().any(|r| r.id == id) {
                self.state.selected.insert(id);
            }
        } else {
            self.state.selected.remove(&id);
        }
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.state.selected.contains(&id)
    }

    pub fn selected_count(&self) -> usize {
        self.state.selected.len()
    }

    /// Remove every selected record and clear the selection.
    /// Returns how many records were removed.
    pub fn delete_selected(&mut self) -> usize {
        if self.state.selected.is_empty() {
            return 0;
        }
        let before = self.records.len();
        let selected = std::mem::take(&mut self.state.selected);
        self.records.retain(|r| !selected.contains(&r.id));
        let removed = before - self.records.len();
        tracing::info!(removed, "deleted selected records");
        removed
    }

    /// Append a record and return its id. Ids are never reused, so this
    /// fails once the id space is used up.
    pub fn insert(&mut self, new: NewRecord) -> Result<u64> {
        let id = self.next_id.ok_or(AppError::IdOverflow(u64::MAX))?;
        self.next_id = id.checked_add(1);
        self.records.push(new.into_record(id));
        tracing::info!(id, "inserted record");
        Ok(id)
    }

    pub fn filtered(&self) -> Vec<&Record> {
        let needle = self.state.search_query.to_lowercase();
        self.records.iter().filter(|r| record_matches(r, &needle)).collect()
    }

    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(self.state.rows_per_page.get())
    }

    fn effective_page(&self, total_pages: usize) -> usize {
        self.state.current_page.clamp(1, total_pages.max(1))
    }

    pub fn query(&self) -> PageView {
        let filtered = self.filtered();
        let rows = self.state.rows_per_page.get();
        let total_pages = filtered.len().div_ceil(rows);
        let current_page = self.effective_page(total_pages);
        let start = (current_page - 1) * rows;
        let records = filtered
            .iter()
            .skip(start)
            .take(rows)
            .map(|r| (*r).clone())
            .collect();
        PageView {
            records,
            total_pages,
            current_page,
            filtered_count: filtered.len(),
            has_prev: current_page > 1,
            has_next: current_page < total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record {
                id: (i + 1) as u64,
                name: format!("Customer {}", i + 1),
                description: String::new(),
                status: "Paid".to_string(),
                rate: "70.00".to_string(),
                balance: if i % 2 == 0 { "100.00" } else { "-50.00" }.to_string(),
                deposit: "0.00".to_string(),
            })
            .collect()
    }

    fn new_record(name: &str) -> NewRecord {
        NewRecord {
            name: name.to_string(),
            description: "Added later".to_string(),
            status: "Open".to_string(),
            rate: "10.00".to_string(),
            balance: "0.00".to_string(),
            deposit: "0.00".to_string(),
        }
    }

    fn size(n: usize) -> PageSize {
        PageSize::try_from(n).unwrap()
    }

    #[test]
    fn test_twelve_records_paginate_into_two_pages() {
        let mut engine = RecordViewEngine::new(make_records(12));
        let view = engine.query();
        assert_eq!(view.records.len(), 10);
        assert_eq!(view.total_pages, 2);
        assert!(!view.has_prev);
        assert!(view.has_next);

        engine.set_page(2);
        let view = engine.query();
        assert_eq!(view.records.len(), 2);
        assert_eq!(view.records[0].id, 11);
        assert!(view.has_prev);
        assert!(!view.has_next);
    }

    #[test]
    fn test_search_due_matches_status_case_insensitively() {
        let mut records = make_records(8);
        records[1].status = "Due".to_string();
        records[4].status = "DUE".to_string();
        records[6].status = "due".to_string();
        let mut engine = RecordViewEngine::new(records);
        engine.set_search_query("due");
        let view = engine.query();
        let ids: Vec<u64> = view.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 5, 7]);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn test_search_covers_name_and_description() {
        let mut records = make_records(5);
        records[3].description = "Quarterly RETAINER".to_string();
        let mut engine = RecordViewEngine::new(records);

        engine.set_search_query("retainer");
        assert_eq!(engine.query().records[0].id, 4);

        engine.set_search_query("customer 2");
        let view = engine.query();
        assert_eq!(view.records.len(), 1);
        assert_eq!(view.records[0].id, 2);
    }

    #[test]
    fn test_every_visible_record_matches_query() {
        let mut records = make_records(30);
        for (i, r) in records.iter_mut().enumerate() {
            r.status = ["Open", "Paid", "Unpaid"][i % 3].to_string();
        }
        // both rows below are "Open", so only name or description can match
        records[6].name = "Painter & Co".to_string();
        records[3].description = "Repainting the office".to_string();
        let mut engine = RecordViewEngine::new(records.clone());
        engine.set_search_query("PAI");
        let mut seen = Vec::new();
        for page in 1..=engine.total_pages() {
            engine.set_page(page);
            for r in engine.query().records {
                assert!(record_matches(&r, "pai"), "record {} does not match", r.id);
                seen.push(r.id);
            }
        }
        let expected: Vec<u64> = records
            .iter()
            .filter(|r| {
                [&r.name, &r.description, &r.status]
                    .iter()
                    .any(|f| f.to_lowercase().contains("pai"))
            })
            .map(|r| r.id)
            .collect();
        assert_eq!(seen, expected);
        assert!(seen.contains(&4));
        assert!(seen.contains(&7));
        // 20 "Paid"/"Unpaid" rows plus the two matched by name or description
        assert_eq!(engine.query().filtered_count, 22);
    }

    #[test]
    fn test_empty_fields_never_match_nonempty_query() {
        let records = vec![Record {
            id: 1,
            name: "Solo".to_string(),
            description: String::new(),
            status: String::new(),
            rate: String::new(),
            balance: String::new(),
            deposit: String::new(),
        }];
        let mut engine = RecordViewEngine::new(records);
        engine.set_search_query("open");
        assert!(engine.query().records.is_empty());
    }

    #[test]
    fn test_total_pages_is_ceiling_for_every_page_size() {
        for n in PageSize::ALL {
            for f in [0usize, 1, 4, 5, 6, 19, 20, 21, 47] {
                let mut engine = RecordViewEngine::new(make_records(f));
                engine.set_rows_per_page(size(n));
                let view = engine.query();
                assert_eq!(view.total_pages, f.div_ceil(n));
                assert!(view.records.len() <= n);
            }
        }
    }

    #[test]
    fn test_empty_result_reports_zero_pages_on_page_one() {
        let mut engine = RecordViewEngine::new(make_records(3));
        engine.set_search_query("nothing matches this");
        let view = engine.query();
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.current_page, 1);
        assert!(view.records.is_empty());
        assert!(!view.has_prev);
        assert!(!view.has_next);
    }

    #[test]
    fn test_search_resets_page() {
        let mut engine = RecordViewEngine::new(make_records(30));
        engine.set_page(3);
        engine.set_search_query("customer");
        assert_eq!(engine.view_state().current_page, 1);
    }

    #[test]
    fn test_rows_per_page_change_resets_page() {
        let mut engine = RecordViewEngine::new(make_records(30));
        engine.set_page(3);
        engine.set_rows_per_page(size(20));
        assert_eq!(engine.query().current_page, 1);
        assert_eq!(engine.query().total_pages, 2);
    }

    #[test]
    fn test_out_of_range_page_is_clamped_on_query() {
        let mut engine = RecordViewEngine::new(make_records(12));
        engine.set_page(9);
        let view = engine.query();
        assert_eq!(view.current_page, 2);
        assert_eq!(view.records.len(), 2);

        engine.set_page(0);
        assert_eq!(engine.query().current_page, 1);
    }

    #[test]
    fn test_page_clamped_after_delete_shrinks_total() {
        let mut engine = RecordViewEngine::new(make_records(12));
        engine.set_page(2);
        engine.toggle_select(11, true);
        engine.toggle_select(12, true);
        assert_eq!(engine.delete_selected(), 2);
        let view = engine.query();
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.records.len(), 10);
    }

    #[test]
    fn test_next_and_prev_stay_in_bounds() {
        let mut engine = RecordViewEngine::new(make_records(25));
        engine.prev_page();
        assert_eq!(engine.query().current_page, 1);

        engine.next_page();
        engine.next_page();
        engine.next_page();
        assert_eq!(engine.query().current_page, 3);

        engine.prev_page();
        assert_eq!(engine.query().current_page, 2);
    }

    #[test]
    fn test_next_page_on_empty_view_is_noop() {
        let mut engine = RecordViewEngine::new(Vec::new());
        engine.next_page();
        assert_eq!(engine.view_state().current_page, 1);
    }

    #[test]
    fn test_toggle_select_round_trip() {
        let mut engine = RecordViewEngine::new(make_records(5));
        engine.toggle_select(2, true);
        let before = engine.view_state().selected.clone();

        engine.toggle_select(4, true);
        engine.toggle_select(4, true);
        assert_eq!(engine.selected_count(), 2);
        engine.toggle_select(4, false);
        assert_eq!(engine.view_state().selected, before);

        engine.toggle_select(4, false);
        assert_eq!(engine.view_state().selected, before);
    }

    #[test]
    fn test_toggle_select_ignores_unknown_id() {
        let mut engine = RecordViewEngine::new(make_records(3));
        engine.toggle_select(42, true);
        assert_eq!(engine.selected_count(), 0);
    }

    #[test]
    fn test_selection_survives_paging_and_search() {
        let mut engine = RecordViewEngine::new(make_records(15));
        engine.toggle_select(3, true);
        engine.set_page(2);
        engine.set_search_query("customer 1");
        engine.set_search_query("");
        assert!(engine.is_selected(3));
    }

    #[test]
    fn test_delete_selected_removes_exactly_selection() {
        let mut engine = RecordViewEngine::new(make_records(6));
        engine.toggle_select(2, true);
        engine.toggle_select(5, true);
        assert_eq!(engine.delete_selected(), 2);
        let ids: Vec<u64> = engine.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 6]);
        assert_eq!(engine.selected_count(), 0);
    }

    #[test]
    fn test_delete_with_empty_selection_is_noop() {
        let mut engine = RecordViewEngine::new(make_records(4));
        assert_eq!(engine.delete_selected(), 0);
        assert_eq!(engine.records().len(), 4);
    }

    #[test]
    fn test_insert_assigns_next_id_and_is_searchable() {
        let mut engine = RecordViewEngine::new(make_records(12));
        let before = engine.records().len() as u64;
        let id = engine.insert(new_record("Zephyr Consulting")).unwrap();
        assert_eq!(id, before + 1);
        assert_eq!(engine.records().last().map(|r| r.id), Some(id));

        engine.set_search_query("zephyr");
        let view = engine.query();
        assert_eq!(view.records.len(), 1);
        assert_eq!(view.records[0].id, id);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut engine = RecordViewEngine::new(make_records(3));
        engine.toggle_select(1, true);
        engine.delete_selected();
        let a = engine.insert(new_record("First")).unwrap();
        let b = engine.insert(new_record("Second")).unwrap();
        assert_eq!((a, b), (4, 5));
        let mut ids: Vec<u64> = engine.records().iter().map(|r| r.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), engine.records().len());
    }

    #[test]
    fn test_insert_fails_once_ids_run_out() {
        let mut records = make_records(2);
        records[1].id = u64::MAX - 1;
        let mut engine = RecordViewEngine::new(records);
        assert_eq!(engine.insert(new_record("Last")).unwrap(), u64::MAX);
        let err = engine.insert(new_record("One too many")).unwrap_err();
        assert!(matches!(err, AppError::IdOverflow(_)));
        assert_eq!(engine.records().len(), 3);
    }

    #[test]
    fn test_max_id_seed_does_not_panic() {
        let mut records = make_records(1);
        records[0].id = u64::MAX;
        let mut engine = RecordViewEngine::new(records);
        assert!(engine.insert(new_record("Next")).is_err());
        assert_eq!(engine.query().records.len(), 1);
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status("Paid"), StatusClass::Positive);
        assert_eq!(classify_status("UNPAID"), StatusClass::Neutral);
        assert_eq!(classify_status("due"), StatusClass::Negative);
        assert_eq!(classify_status("Open"), StatusClass::Special);
        assert_eq!(classify_status("Inactive"), StatusClass::Default);
        assert_eq!(classify_status(""), StatusClass::Default);
        assert_eq!(classify_status("whatever"), StatusClass::Default);
    }

    #[test]
    fn test_classify_financial() {
        assert_eq!(classify_financial("-50.00"), FinancialClass::Negative);
        assert_eq!(classify_financial("50.00"), FinancialClass::Positive);
        assert_eq!(classify_financial(""), FinancialClass::Positive);
    }

    #[test]
    fn test_view_state_serializes() {
        let mut engine = RecordViewEngine::new(make_records(3));
        engine.toggle_select(1, true);
        engine.set_search_query("cust");
        let json = serde_json::to_string(engine.view_state()).unwrap();
        let back: ViewState = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, engine.view_state());
    }
}
