//! Group notes dialog
//!
//! Read-only view of the notes kept on the categories of a group.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::{CategoryGroup, GroupKey};
use crate::tui::app::App;
use crate::tui::layout::centered_rect;

pub fn render(frame: &mut Frame, app: &App, key: GroupKey) {
    let area = centered_rect(50, 50, frame.area());
    frame.render_widget(Clear, area);

    let group = app.groups.groups().iter().find(|g| g.id == key);
    let title = match group {
        Some(group) => format!(" Notes: {} ", group.name),
        None => " Notes ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = group.map(note_lines).unwrap_or_default();
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No notes",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

/// One heading per category with notes, followed by the note text
pub fn note_lines(group: &CategoryGroup) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for category in group.categories.iter().filter(|c| !c.notes.trim().is_empty()) {
        lines.push(Line::from(Span::styled(
            category.name.clone(),
            Style::default().fg(Color::Yellow),
        )));
        for text in category.notes.lines() {
            lines.push(Line::from(format!("  {}", text)));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryGroupId};

    #[test]
    fn test_note_lines_skip_empty_notes() {
        let mut group = CategoryGroup::new("Bills");
        let group_id = CategoryGroupId::new();
        let mut rent = Category::new("Rent", group_id);
        rent.notes = "Due on the 1st\nAutopay".into();
        group.categories = vec![rent, Category::new("Power", group_id)];

        let lines = note_lines(&group);
        assert_eq!(lines.len(), 3);
    }
}
