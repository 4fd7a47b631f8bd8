//! Bottom navigation tabs for narrow terminals

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Tabs,
    Frame,
};

use crate::tui::app::App;

/// Tabs shown on the top-level screens: label, shortcut and path
pub const TABS: [(&str, char, &str); 3] = [
    ("Budget", '1', "/budget"),
    ("Accounts", '4', "/accounts"),
    ("Settings", '7', "/settings"),
];

/// Index of the tab owning `pathname`
pub fn active_tab(pathname: &str) -> Option<usize> {
    TABS.iter().position(|(_, _, path)| {
        pathname == *path || pathname.starts_with(&format!("{}/", path))
    })
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = TABS
        .iter()
        .map(|(label, key, _)| Line::from(format!("{} {}", key, label)))
        .collect();

    let tabs = Tabs::new(titles)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .divider("│");

    let tabs = match active_tab(&app.shell.location().pathname) {
        Some(index) => tabs.select(index),
        None => tabs,
    };

    frame.render_widget(tabs, area);
}
