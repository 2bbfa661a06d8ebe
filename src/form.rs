use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{NewRecord, STATUS_OPTIONS};
use crate::tui::{FOOTER_STYLE, HEADER_STYLE};

// Field indices for RecordForm::new() — keep in sync with field order
const NAME_IDX: usize = 0;
const DESC_IDX: usize = 1;
const STATUS_IDX: usize = 2;
const RATE_IDX: usize = 3;
const BALANCE_IDX: usize = 4;
const DEPOSIT_IDX: usize = 5;

pub enum FormAction {
    Continue,
    Cancel,
    Submit(NewRecord),
}

struct FormField {
    label: &'static str,
    value: String,
    kind: FieldKind,
}

enum FieldKind {
    Text,
    Selector { selected: usize },
}

impl FormField {
    fn text(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            kind: FieldKind::Text,
        }
    }
}

/// Modal form collecting the six editable fields of a new record.
pub struct RecordForm {
    fields: Vec<FormField>,
    focused: usize,
    error: Option<String>,
}

impl RecordForm {
    pub fn new() -> Self {
        Self {
            fields: vec![
                FormField::text("Name"),
                FormField::text("Description"),
                FormField {
                    label: "Status",
                    value: STATUS_OPTIONS[0].to_string(),
                    kind: FieldKind::Selector { selected: 0 },
                },
                FormField::text("Rate"),
                FormField::text("Balance"),
                FormField::text("Deposit"),
            ],
            focused: 0,
            error: None,
        }
    }

    fn value(&self, idx: usize) -> String {
        self.fields[idx].value.trim().to_string()
    }

    fn to_new_record(&self) -> NewRecord {
        NewRecord {
            name: self.value(NAME_IDX),
            description: self.value(DESC_IDX),
            status: self.value(STATUS_IDX),
            rate: self.value(RATE_IDX),
            balance: self.value(BALANCE_IDX),
            deposit: self.value(DEPOSIT_IDX),
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> FormAction {
        use KeyCode::*;

        match code {
            Esc => return FormAction::Cancel,
            Tab | Down => {
                self.focused = (self.focused + 1) % self.fields.len();
            }
            BackTab | Up => {
                self.focused = if self.focused == 0 {
                    self.fields.len() - 1
                } else {
                    self.focused - 1
                };
            }
            Left => {
                let field = &mut self.fields[self.focused];
                if let FieldKind::Selector { selected } = &mut field.kind {
                    *selected = if *selected == 0 {
                        STATUS_OPTIONS.len() - 1
                    } else {
                        *selected - 1
                    };
                    field.value = STATUS_OPTIONS[*selected].to_string();
                }
            }
            Right => {
                let field = &mut self.fields[self.focused];
                if let FieldKind::Selector { selected } = &mut field.kind {
                    *selected = (*selected + 1) % STATUS_OPTIONS.len();
                    field.value = STATUS_OPTIONS[*selected].to_string();
                }
            }
            Char(c) => {
                if let FieldKind::Text = self.fields[self.focused].kind {
                    self.fields[self.focused].value.push(c);
                }
            }
            Backspace => {
                if let FieldKind::Text = self.fields[self.focused].kind {
                    self.fields[self.focused].value.pop();
                }
            }
            Enter => {
                let record = self.to_new_record();
                match record.validate() {
                    Ok(()) => return FormAction::Submit(record),
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            _ => {}
        }
        FormAction::Continue
    }

    /// Draw the form as a centered box over whatever is already in `area`.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let height = self.fields.len() as u16 + 6;
        let [popup] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::horizontal([Constraint::Length(60)])
            .flex(Flex::Center)
            .areas(popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(" Add Customer ", HEADER_STYLE));

        let mut lines = vec![Line::from("")];
        for (i, field) in self.fields.iter().enumerate() {
            let is_focused = i == self.focused;
            let label_style = if is_focused {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let value_style = if is_focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            let value = match &field.kind {
                FieldKind::Text => {
                    let cursor = if is_focused { "_" } else { "" };
                    format!("{}{cursor}", field.value)
                }
                FieldKind::Selector { .. } => {
                    let arrows = if is_focused { ("< ", " >") } else { ("  ", "  ") };
                    format!("{}{}{}", arrows.0, field.value, arrows.1)
                }
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<12} ", field.label), label_style),
                Span::styled(value, value_style),
            ]));
        }

        lines.push(Line::from(""));
        if let Some(msg) = &self.error {
            lines.push(Line::from(Span::styled(
                format!("  {msg}"),
                Style::default().fg(Color::Yellow),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "  Tab=next field  \u{2190}/\u{2192}=status  Enter=save  Esc=cancel",
                FOOTER_STYLE,
            )));
        }

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}
