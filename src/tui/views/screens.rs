//! Remaining screens
//!
//! Payees and settings show what the client has loaded. The other screens
//! only announce themselves; their content lives outside this client.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::shell::Screen;
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect, screen: &Screen) {
    let lines = match screen {
        Screen::Payees => payee_lines(app),
        Screen::Settings => settings_lines(app),
        Screen::TransactionEdit { account_id, .. } => {
            let mut lines = vec![Line::from("Transaction entry is not available in this client.")];
            if let Some(id) = account_id {
                lines.push(Line::from(format!("Account: {}", id)));
            }
            lines
        }
        other => vec![Line::from(Span::styled(
            format!("{} is not available in this client.", other.name()),
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let block = Block::default()
        .title(format!(" {} ", screen.title()))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn payee_lines(app: &App) -> Vec<Line<'static>> {
    let payees = app.shell.providers().payees.all();
    if payees.is_empty() {
        return vec![Line::from(Span::styled(
            "No payees",
            Style::default().fg(Color::DarkGray),
        ))];
    }
    payees
        .iter()
        .map(|p| Line::from(format!("  {}", p.name)))
        .collect()
}

fn settings_lines(app: &App) -> Vec<Line<'static>> {
    let s = &app.settings;
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<22}", label), Style::default().fg(Color::Cyan)),
            Span::raw(value),
        ])
    };
    vec![
        row("Narrow below", format!("{} columns", s.narrow_breakpoint)),
        row("Tick rate", format!("{} ms", s.tick_rate_ms)),
        row("Startup delay", format!("{} ms", s.startup_delay_ms)),
        row(
            "Update check",
            if s.update_check.enabled { "on" } else { "off" }.to_string(),
        ),
        row("Changelog", s.update_check.changelog_url.clone()),
        row("Log filter", s.log_filter.clone()),
        row("Data directory", app.storage().paths().base_dir().display().to_string()),
    ]
}
