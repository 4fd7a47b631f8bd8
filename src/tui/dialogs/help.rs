//! Help dialog
//!
//! Shows keyboard shortcuts for the global scope and the current screen

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::shell::Screen;
use crate::tui::app::App;
use crate::tui::keybindings::{format_keybinding, get_keybindings, KeyContext};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 80, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines(app))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Contexts worth listing for the current screen
pub fn help_contexts(screen: Option<&Screen>) -> Vec<KeyContext> {
    let mut contexts = vec![KeyContext::Global, KeyContext::Sidebar];
    match screen {
        Some(Screen::Budget) => contexts.extend([
            KeyContext::Budget,
            KeyContext::Menu,
            KeyContext::Drag,
            KeyContext::Editing,
        ]),
        Some(Screen::Accounts) | Some(Screen::Account { .. }) => {
            contexts.extend([KeyContext::Accounts, KeyContext::Dialog])
        }
        _ => {}
    }
    contexts
}

fn help_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for context in help_contexts(app.current_screen()) {
        lines.push(Line::from(vec![Span::styled(
            context.title(),
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Yellow),
        )]));
        for kb in get_keybindings(context) {
            lines.push(key_line(&format_keybinding(kb), kb.description));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )]));

    lines
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_help_lists_menu_keys() {
        let contexts = help_contexts(Some(&Screen::Budget));
        assert!(contexts.contains(&KeyContext::Menu));
        assert!(!contexts.contains(&KeyContext::Accounts));
    }

    #[test]
    fn test_other_screens_only_global() {
        assert_eq!(
            help_contexts(Some(&Screen::Rules)),
            vec![KeyContext::Global, KeyContext::Sidebar]
        );
    }
}
