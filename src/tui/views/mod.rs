//! TUI Views module
//!
//! The frame is the title bar, the sidebar, the main screen picked by the
//! router, optional navigation tabs and the status bar. Notifications and
//! dialogs are drawn on top.

pub mod accounts;
pub mod budget;
pub mod nav_tabs;
pub mod screens;
pub mod sidebar;
pub mod status_bar;
pub mod titlebar;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::shell::Screen;

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::AppLayout;
use super::widgets::notification::{notification_height, NotificationWidget};

const NOTIFICATION_WIDTH: u16 = 48;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(
        frame.area(),
        app.shell.providers().sidebar,
        app.shell.nav_tabs_visible(),
    );

    titlebar::render(frame, app, layout.titlebar);

    if let Some(area) = layout.sidebar {
        sidebar::render(frame, app, area);
    }

    match app.current_screen().cloned() {
        Some(Screen::Budget) => budget::render(frame, app, layout.main),
        Some(Screen::Accounts) => accounts::render(frame, app, layout.main, None),
        Some(Screen::Account { id }) => accounts::render(frame, app, layout.main, Some(&id)),
        Some(screen) => screens::render(frame, app, layout.main, &screen),
        None => render_placeholder(frame, layout.main, "Loading"),
    }

    if let Some(area) = layout.floating_sidebar {
        frame.render_widget(Clear, area);
        sidebar::render(frame, app, area);
    }

    if let Some(area) = layout.nav_tabs {
        nav_tabs::render(frame, app, area);
    }

    status_bar::render(frame, app, layout.status_bar);

    render_notification(frame, app, layout.main);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// Current notification in the top-right corner of the main area
fn render_notification(frame: &mut Frame, app: &App, main: Rect) {
    let Some(notification) = app.shell.actions().notifications().current() else {
        return;
    };
    let width = NOTIFICATION_WIDTH.min(main.width);
    let height = notification_height(notification).min(main.height);
    let area = Rect::new(main.x + main.width - width, main.y, width, height);
    frame.render_widget(NotificationWidget::new(notification), area);
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &mut App) {
    match &app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::AddAccount => dialogs::account::render(frame, app),
        ActiveDialog::Notes(key) => {
            let key = *key;
            dialogs::notes::render(frame, app, key);
        }
        ActiveDialog::None => {}
    }
}

/// Render a bordered block with a single line of text
pub fn render_placeholder(frame: &mut Frame, area: Rect, name: &str) {
    let block = Block::default()
        .title(format!(" {} ", name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let text = Paragraph::new(format!("{}...", name))
        .block(block)
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(text, area);
}
