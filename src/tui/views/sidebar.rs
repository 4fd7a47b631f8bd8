//! Sidebar view
//!
//! Shows the screen switcher and the open accounts

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::tui::app::{App, FocusedPanel, NAV_ITEMS};
use crate::tui::layout::SidebarLayout;

/// Render the sidebar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = SidebarLayout::new(area, NAV_ITEMS.len() as u16);
    render_navigation(frame, app, layout.navigation);
    render_accounts(frame, app, layout.accounts);
}

fn render_navigation(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focused_panel == FocusedPanel::Sidebar;
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Finances ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let pathname = &app.shell.location().pathname;
    let items: Vec<ListItem> = NAV_ITEMS
        .iter()
        .map(|(key, name, path)| {
            let current = pathname == path || pathname.starts_with(&format!("{}/", path));
            let style = if current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let indicator = if current { "▶" } else { " " };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", indicator), style),
                Span::styled(format!("[{}] ", key), Style::default().fg(Color::Yellow)),
                Span::styled(*name, style),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default();
    if is_focused {
        state.select(Some(app.selected_nav_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_accounts(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Accounts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let accounts: Vec<_> = app.shell.providers().accounts.open().collect();
    if accounts.is_empty() {
        let text = Paragraph::new("No accounts")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = accounts
        .iter()
        .map(|account| {
            let style = if account.on_budget {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Span::styled(truncate_string(&account.name, width), style))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Truncate a string to a maximum number of characters
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len == 0 {
        String::new()
    } else {
        let head: String = s.chars().take(max_len - 1).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Checking", 10), "Checking");
        assert_eq!(truncate_string("Everyday Checking", 8), "Everyda…");
        assert_eq!(truncate_string("Épargne", 3), "Ép…");
    }
}
