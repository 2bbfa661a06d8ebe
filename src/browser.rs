use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::engine::RecordViewEngine;
use crate::form::{FormAction, RecordForm};
use crate::models::Record;
use crate::tui::{
    self, View, ViewAction, CHECKED_STYLE, CURSOR_STYLE, FOOTER_STYLE, HEADER_STYLE, NOTICE_STYLE,
};

/// Ticks a notice stays on screen (about three seconds).
const NOTICE_TICKS: u8 = 12;

enum BrowseMode {
    Normal,
    Search,
    ConfirmDelete,
    Add(RecordForm),
}

pub struct RecordBrowser {
    engine: RecordViewEngine,
    mode: BrowseMode,
    /// Row index within the visible page.
    cursor: usize,
    notice: Option<String>,
    notice_ticks: u8,
    table_state: TableState,
}

impl RecordBrowser {
    pub fn new(engine: RecordViewEngine) -> Self {
        Self {
            engine,
            mode: BrowseMode::Normal,
            cursor: 0,
            notice: None,
            notice_ticks: 0,
            table_state: TableState::default(),
        }
    }

    pub fn engine(&self) -> &RecordViewEngine {
        &self.engine
    }

    fn set_notice(&mut self, msg: String) {
        self.notice = Some(msg);
        self.notice_ticks = NOTICE_TICKS;
    }

    fn tick_notice(&mut self) {
        if self.notice_ticks > 0 {
            self.notice_ticks -= 1;
            if self.notice_ticks == 0 {
                self.notice = None;
            }
        }
    }

    fn visible(&self) -> Vec<Record> {
        self.engine.query().records
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    fn toggle_cursor_row(&mut self) {
        if let Some(id) = self.visible().get(self.cursor).map(|r| r.id) {
            let checked = self.engine.is_selected(id);
            self.engine.toggle_select(id, !checked);
        }
    }

    fn edit_query(&mut self, edit: impl FnOnce(&mut String)) {
        let mut query = self.engine.view_state().search_query.clone();
        edit(&mut query);
        self.engine.set_search_query(&query);
        self.cursor = 0;
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> ViewAction {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Close,
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.visible().len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Char(' ') => self.toggle_cursor_row(),
            KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
                self.engine.next_page();
                self.cursor = 0;
            }
            KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => {
                self.engine.prev_page();
                self.cursor = 0;
            }
            KeyCode::Home => {
                self.engine.set_page(1);
                self.cursor = 0;
            }
            KeyCode::End => {
                self.engine.set_page(self.engine.total_pages());
                self.cursor = 0;
            }
            KeyCode::Char('/') => self.mode = BrowseMode::Search,
            KeyCode::Char('r') => {
                let next = self.engine.view_state().rows_per_page.next();
                self.engine.set_rows_per_page(next);
                self.cursor = 0;
            }
            KeyCode::Char('a') => self.mode = BrowseMode::Add(RecordForm::new()),
            KeyCode::Char('d') => {
                if self.engine.selected_count() > 0 {
                    self.mode = BrowseMode::ConfirmDelete;
                } else {
                    self.set_notice("Nothing selected".to_string());
                }
            }
            _ => {}
        }
        ViewAction::Continue
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.mode = BrowseMode::Normal,
            KeyCode::Esc => {
                self.edit_query(String::clear);
                self.mode = BrowseMode::Normal;
            }
            KeyCode::Backspace => self.edit_query(|q| {
                q.pop();
            }),
            KeyCode::Char(c) => self.edit_query(|q| q.push(c)),
            _ => {}
        }
    }

    fn handle_delete_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('y') => {
                let removed = self.engine.delete_selected();
                self.mode = BrowseMode::Normal;
                self.clamp_cursor();
                let noun = if removed == 1 { "entry" } else { "entries" };
                self.set_notice(format!("{removed} {noun} deleted successfully"));
            }
            KeyCode::Char('n') | KeyCode::Esc => self.mode = BrowseMode::Normal,
            _ => {}
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        let BrowseMode::Add(form) = &mut self.mode else {
            return;
        };
        match form.handle_key(code) {
            FormAction::Continue => {}
            FormAction::Cancel => self.mode = BrowseMode::Normal,
            FormAction::Submit(record) => {
                self.mode = BrowseMode::Normal;
                match self.engine.insert(record) {
                    Ok(id) => self.set_notice(format!("Entry #{id} added successfully!")),
                    Err(e) => self.set_notice(format!("Add failed: {e}")),
                }
            }
        }
    }

    fn build_rows(&self, records: &[Record], desc_width: usize) -> Vec<Row<'static>> {
        records
            .iter()
            .map(|r| {
                let checked = self.engine.is_selected(r.id);
                let (desc, lines) = tui::wrap_text(&r.description, desc_width);
                let cells = vec![
                    Cell::from(if checked { "[x]" } else { "[ ]" }),
                    Cell::from(r.id.to_string()),
                    Cell::from(r.name.clone()),
                    Cell::from(desc),
                    Cell::from(Span::styled(r.status.clone(), tui::status_style(&r.status))),
                    Cell::from(r.rate.clone()),
                    Cell::from(tui::amount_span(&r.balance)),
                    Cell::from(r.deposit.clone()),
                ];
                let row = Row::new(cells).height(lines);
                if checked {
                    row.style(CHECKED_STYLE)
                } else {
                    row
                }
            })
            .collect()
    }

    fn status_line(&self, page: usize, total: usize, matching: usize) -> String {
        let state = self.engine.view_state();
        let mut parts = vec![
            format!("Page {page} of {total}"),
            format!("{} per page", state.rows_per_page),
            format!("{matching} matching"),
        ];
        if self.engine.selected_count() > 0 {
            parts.push(format!("{} selected", self.engine.selected_count()));
        }
        parts.join(" | ")
    }
}

impl View for RecordBrowser {
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [title_area, search_area, table_area, status_area, keys_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new("Customer Data").style(HEADER_STYLE),
            title_area,
        );

        let query = &self.engine.view_state().search_query;
        let search = match self.mode {
            BrowseMode::Search => Line::from(format!("Search: {query}\u{2588}")),
            _ if query.is_empty() => Line::from(Span::styled("Search: (press /)", FOOTER_STYLE)),
            _ => Line::from(format!("Search: {query}")),
        };
        frame.render_widget(Paragraph::new(search), search_area);

        let view = self.engine.query();

        // ID, Name, Status, Rate, Balance, Deposit + checkbox and spacing
        let fixed_cols: u16 = 3 + 5 + 22 + 10 + 10 + 12 + 10 + 7;
        let desc_width = (table_area.width.saturating_sub(fixed_cols) as usize).max(10);
        let rows = self.build_rows(&view.records, desc_width);

        let widths = [
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(22),
            Constraint::Fill(1),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(10),
        ];
        let header = Row::new(vec![
            "", "ID", "Name", "Description", "Status", "Rate", "Balance", "Deposit",
        ])
        .style(HEADER_STYLE)
        .bottom_margin(1);

        let empty = rows.is_empty();
        self.table_state
            .select(if empty { None } else { Some(self.cursor) });
        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .row_highlight_style(CURSOR_STYLE);
        frame.render_stateful_widget(table, table_area, &mut self.table_state);

        if empty {
            let [_, msg_area] =
                Layout::vertical([Constraint::Length(2), Constraint::Length(1)]).areas(table_area);
            frame.render_widget(
                Paragraph::new("  No matching customers.").style(FOOTER_STYLE),
                msg_area,
            );
        }

        let status = self.status_line(view.current_page, view.total_pages, view.filtered_count);
        let status_line = match &self.notice {
            Some(msg) => Line::from(vec![
                Span::styled(status, FOOTER_STYLE),
                Span::styled(" | ", FOOTER_STYLE),
                Span::styled(msg.clone(), NOTICE_STYLE),
            ]),
            None => Line::from(Span::styled(status, FOOTER_STYLE)),
        };
        frame.render_widget(Paragraph::new(status_line), status_area);

        let keys = match &self.mode {
            BrowseMode::Normal => Paragraph::new(
                "\u{2191}/\u{2193}:move  space:select  n/\u{2192}:next  p/\u{2190}:prev  /:search  r:rows  a:add  d:delete  q:quit",
            )
            .style(FOOTER_STYLE),
            BrowseMode::Search => {
                Paragraph::new("Type to filter, Enter=keep, Esc=clear").style(FOOTER_STYLE)
            }
            BrowseMode::ConfirmDelete => Paragraph::new(format!(
                "Delete {} selected? (y/n)",
                self.engine.selected_count()
            ))
            .style(Style::default().fg(Color::Yellow)),
            BrowseMode::Add(_) => Paragraph::new(""),
        };
        frame.render_widget(keys, keys_area);

        if let BrowseMode::Add(form) = &self.mode {
            form.draw(frame, area);
        }
    }

    fn tick(&mut self) {
        self.tick_notice();
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        match &self.mode {
            BrowseMode::Normal => return self.handle_normal_key(code),
            BrowseMode::Search => self.handle_search_key(code),
            BrowseMode::ConfirmDelete => self.handle_delete_key(code),
            BrowseMode::Add(_) => self.handle_form_key(code),
        }
        ViewAction::Continue
    }
}
