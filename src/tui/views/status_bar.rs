//! Status bar view
//!
//! Shows the input prompt or status message, and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::shell::StartupPhase;
use crate::tui::app::{App, InputMode};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.input_mode == InputMode::GoTo {
        frame.render_widget(app.goto_input.clone(), area);
        return;
    }

    let mut spans = vec![];

    let phase = match app.shell.startup_phase() {
        StartupPhase::Scheduled => "starting",
        StartupPhase::CheckingForUpdates => "checking for updates",
        StartupPhase::Done => "ready",
    };
    spans.push(Span::styled(
        format!(" {} ", phase),
        Style::default().fg(Color::DarkGray),
    ));

    if app.is_dragging() {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(
            "Moving group: j/k to move, Enter to drop, Esc to cancel",
            Style::default().fg(Color::Magenta),
        ));
    } else if let Some(ref message) = app.status_message {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let hints = " q:Quit  ?:Help  ::Go to ";
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());

    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
