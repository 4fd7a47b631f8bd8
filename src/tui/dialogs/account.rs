//! Account entry dialog
//!
//! Modal dialog for adding an account: a name and a type.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::handler::edit_input;
use crate::tui::layout::centered_rect_fixed;

/// Render the add-account dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(50, 8, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Add Account ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Name
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Type
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    frame.render_widget(app.account_form.name.clone(), chunks[0]);

    let type_line = Line::from(vec![
        Span::styled("Type: ", Style::default().fg(Color::Cyan)),
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.account_form.account_type.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(type_line), chunks[2]);

    let hints = Line::from(Span::styled(
        "Tab: type  Enter: save  Esc: cancel",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(hints), chunks[4]);
}

/// Handle key input for the add-account dialog
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => app.submit_account_form(),
        KeyCode::Tab | KeyCode::Down => app.account_form.cycle_type(true),
        KeyCode::BackTab | KeyCode::Up => app.account_form.cycle_type(false),
        _ => edit_input(&mut app.account_form.name, key),
    }
}
