use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::Frame;

use crate::engine::{classify_financial, classify_status, FinancialClass, StatusClass};
use crate::error::Result;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const NOTICE_STYLE: Style = Style::new().fg(Color::Rgb(80, 220, 100));

pub const AMOUNT_POS_STYLE: Style = Style::new().fg(Color::Rgb(80, 220, 100));
pub const AMOUNT_NEG_STYLE: Style = Style::new().fg(Color::Red);

pub const CURSOR_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

/// Background for rows in the selection set.
pub const CHECKED_STYLE: Style = Style::new().bg(Color::Rgb(60, 30, 30));

pub fn status_style(status: &str) -> Style {
    match classify_status(status) {
        StatusClass::Positive => Style::new().fg(Color::Green),
        StatusClass::Neutral => Style::new().fg(Color::Gray),
        StatusClass::Negative => Style::new().fg(Color::Red),
        StatusClass::Special => Style::new().fg(Color::Magenta),
        StatusClass::Default => Style::new(),
    }
}

/// Amount text colored by its sign. The text is shown as entered.
pub fn amount_span(amount: &str) -> Span<'static> {
    let style = match classify_financial(amount) {
        FinancialClass::Negative => AMOUNT_NEG_STYLE,
        FinancialClass::Positive => AMOUNT_POS_STYLE,
    };
    Span::styled(amount.to_string(), style)
}

/// Wrap text to a given width. Returns (wrapped_string, line_count).
pub fn wrap_text(text: &str, width: usize) -> (String, u16) {
    if width == 0 {
        return (text.to_string(), 1);
    }
    let wrapped = textwrap::fill(text, width);
    let lines = wrapped.lines().count().max(1) as u16;
    (wrapped, lines)
}

/// How long the event loop waits for a key before calling `View::tick`.
pub const TICK_RATE: Duration = Duration::from_millis(250);

pub enum ViewAction {
    Continue,
    Close,
}

pub trait View {
    fn draw(&mut self, frame: &mut Frame);
    fn handle_key(&mut self, code: KeyCode) -> ViewAction;
    /// Called every `TICK_RATE` without input, for timed UI such as notices.
    fn tick(&mut self) {}
}

enum Input {
    Key(KeyCode),
    Quit,
    Idle,
}

/// Wait up to `TICK_RATE` for a key press. Ctrl-C quits from any view.
fn next_input() -> std::io::Result<Input> {
    if !event::poll(TICK_RATE)? {
        return Ok(Input::Idle);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                Ok(Input::Quit)
            } else {
                Ok(Input::Key(key.code))
            }
        }
        _ => Ok(Input::Idle),
    }
}

/// Run a view full-screen until it closes. The terminal is restored on
/// exit and on panic.
pub fn run_view(view: &mut dyn View) -> Result<()> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();
    let mut last_tick = Instant::now();

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| view.draw(frame)) {
            break Err(e.into());
        }
        match next_input() {
            Err(e) => break Err(e.into()),
            Ok(Input::Quit) => break Ok(()),
            Ok(Input::Key(code)) => {
                if let ViewAction::Close = view.handle_key(code) {
                    break Ok(());
                }
            }
            Ok(Input::Idle) => {}
        }
        if last_tick.elapsed() >= TICK_RATE {
            view.tick();
            last_tick = Instant::now();
        }
    };

    drop(terminal);
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_span_colors_by_sign() {
        assert_eq!(amount_span("-20.00").style, AMOUNT_NEG_STYLE);
        assert_eq!(amount_span("20.00").style, AMOUNT_POS_STYLE);
        assert_eq!(amount_span("").style, AMOUNT_POS_STYLE);
        assert_eq!(amount_span("-20.00").content, "-20.00");
    }

    #[test]
    fn test_status_style_unknown_is_plain() {
        assert_eq!(status_style("Inactive"), Style::new());
        assert_eq!(status_style("due"), Style::new().fg(Color::Red));
    }

    #[test]
    fn test_wrap_text_counts_lines() {
        let (wrapped, lines) = wrap_text("monthly retainer for design work", 10);
        assert!(lines > 1);
        assert_eq!(wrapped.lines().count() as u16, lines);
        assert_eq!(wrap_text("short", 0).1, 1);
    }
}
