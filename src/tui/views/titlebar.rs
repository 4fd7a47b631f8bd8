//! Title bar
//!
//! Screen title on the left, viewport class and current location on the
//! right.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = app.shell.providers().titlebar.title();
    let right = format!(
        " {} │ {} ",
        app.shell.location().href(),
        app.shell.viewport()
    );

    let left = format!(" {} ", title);
    let used = left.chars().count() + right.chars().count();
    let padding = (area.width as usize).saturating_sub(used).max(1);

    let line = Line::from(vec![
        Span::styled(
            left,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(Color::Black)),
        area,
    );
}
