//! Accounts view
//!
//! Lists open accounts. With an account id, the matching account is
//! highlighted and its details are shown below the list.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::Account;
use crate::tui::app::{App, FocusedPanel};

/// Render the accounts list, optionally focused on one account
pub fn render(frame: &mut Frame, app: &App, area: Rect, account_id: Option<&str>) {
    let accounts: Vec<&Account> = app.shell.providers().accounts.open().collect();
    let narrow = app.shell.view().map(|v| v.narrow_variant).unwrap_or(false);

    let details_height = if account_id.is_some() { 5 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(details_height)])
        .split(area);

    render_table(frame, app, chunks[0], &accounts, narrow);

    if let Some(id) = account_id {
        let account = accounts
            .iter()
            .find(|a| a.id.as_uuid().to_string() == id)
            .copied();
        render_details(frame, chunks[1], id, account);
    }
}

fn render_table(frame: &mut Frame, app: &App, area: Rect, accounts: &[&Account], narrow: bool) {
    let is_focused = app.focused_panel == FocusedPanel::Main;
    let border_color = if is_focused { Color::Cyan } else { Color::Gray };

    let block = Block::default()
        .title(" Accounts ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if accounts.is_empty() {
        let text = Paragraph::new(vec![
            Line::from("No accounts yet."),
            Line::from(Span::styled(
                "Press a to add your first account.",
                Style::default().fg(Color::Yellow),
            )),
        ])
        .block(block);
        frame.render_widget(text, area);
        return;
    }

    // The narrow layout drops the type and budget columns
    let (header, widths): (Vec<&str>, Vec<Constraint>) = if narrow {
        (vec!["Name"], vec![Constraint::Min(10)])
    } else {
        (
            vec!["Name", "Type", "Budget"],
            vec![
                Constraint::Min(20),
                Constraint::Length(14),
                Constraint::Length(10),
            ],
        )
    };

    let rows: Vec<Row> = accounts
        .iter()
        .map(|account| {
            let mut cells = vec![Cell::from(account.name.clone())];
            if !narrow {
                cells.push(Cell::from(account.account_type.to_string()));
                cells.push(Cell::from(if account.on_budget { "on" } else { "off" }));
            }
            Row::new(cells)
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(
            Row::new(header).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(app.selected_account_index.min(accounts.len() - 1)));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_details(frame: &mut Frame, area: Rect, id: &str, account: Option<&Account>) {
    let block = Block::default()
        .title(" Account ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let lines = match account {
        Some(account) => vec![
            Line::from(Span::styled(
                account.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "{} · {}",
                account.account_type,
                if account.on_budget { "on budget" } else { "off budget" }
            )),
        ],
        None => vec![Line::from(Span::styled(
            format!("No open account with id {}", id),
            Style::default().fg(Color::Red),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
