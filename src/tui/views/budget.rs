//! Budget view
//!
//! Category group rows with their categories, laid out under a header with
//! as many month columns as the terminal fits.

use chrono::{Local, Months, NaiveDate};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::budget::group_row::{self, GroupRowView};
use crate::models::GroupKey;
use crate::shell::providers::Spreadsheet;
use crate::tui::app::{App, FocusedPanel, InputMode};
use crate::tui::layout::MainPanelLayout;
use crate::tui::widgets::PopupMenu;

/// Render the budget view
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = MainPanelLayout::new(area);
    render_header(frame, app, layout.header);
    render_groups(frame, app, layout.content);
}

/// Labels of the months shown, starting with `first`
pub fn month_labels(first: NaiveDate, count: usize) -> Vec<String> {
    (0..count as u32)
        .filter_map(|i| first.checked_add_months(Months::new(i)))
        .map(|d| d.format("%b %Y").to_string())
        .collect()
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let count = app.shell.providers().month_count.count();
    let today = Local::now().date_naive();

    let mut spans = Vec::new();
    for (i, label) in month_labels(today, count).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(label, Style::default().fg(Color::White)));
    }
    spans.push(Span::raw("    "));
    spans.push(Span::styled(
        "[A] Add group  [m] Menu  [d] Move",
        Style::default().fg(Color::Yellow),
    ));

    let block = Block::default()
        .title(" Budget ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Where overlays go once the list is laid out
struct Overlays {
    /// Line of the row holding the name editor, and the editor's column
    editor: Option<(usize, u16)>,
    new_category: Option<usize>,
    menu: Option<(usize, Vec<&'static str>)>,
}

fn group_line(view: &GroupRowView, count: Option<i64>, selected: bool, dragging: bool) -> Line<'static> {
    let mut style = if view.dimmed {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };
    style = style.add_modifier(Modifier::BOLD);
    if view.elevated {
        style = style.bg(Color::DarkGray).fg(Color::White);
    } else if selected && !dragging {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let mut spans = vec![Span::raw(" ".repeat(view.indent as usize))];
    if view.elevated {
        spans.push(Span::styled("╭ ", style));
    }
    if let Some(arrow) = view.arrow {
        spans.push(Span::styled(format!("{} ", arrow.glyph()), style));
    }
    if view.editor.is_none() {
        spans.push(Span::styled(view.label.clone(), style));
        if let Some(count) = count {
            spans.push(Span::styled(
                format!(" ({})", count),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    if view.elevated {
        spans.push(Span::styled(" ╮", style));
    }
    if view.show_notes_button && view.editor.is_none() {
        spans.push(Span::styled(" ✎", Style::default().fg(Color::DarkGray)));
    }
    if view.show_menu_button {
        spans.push(Span::styled(" ⋯", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn render_groups(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.focused_panel == FocusedPanel::Main;
    let border_color = if is_focused { Color::Cyan } else { Color::Gray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);

    if app.groups.is_empty() {
        let text = Paragraph::new("No category groups. Press A to add one.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let providers = app.shell.providers();
    let dnd = &providers.drag_drop;
    let dragging = dnd.dragging().is_some();
    let selected = app.groups.selected();

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0;
    let mut overlays = Overlays {
        editor: None,
        new_category: None,
        menu: None,
    };

    for (index, preview) in app.groups.display_order(dnd) {
        let Some(mut props) = app.groups.props(index) else {
            continue;
        };
        props.drag_preview = preview;
        let key = props.group.id;
        let state = app.groups.row_state(&key);
        let view = group_row::view(&props, &state);
        let count = providers
            .spreadsheet
            .get(&Spreadsheet::group_count_cell(&key));

        if index == selected {
            selected_line = lines.len();
        }
        if view.editor.is_some() {
            let column = view.indent + if view.arrow.is_some() { 2 } else { 0 };
            overlays.editor = Some((lines.len(), column));
        }
        if let Some(menu) = &view.menu {
            overlays.menu = Some((lines.len(), menu.iter().map(|(_, label)| *label).collect()));
        }
        lines.push(group_line(&view, count, index == selected, dragging));

        if props.collapsed || preview || matches!(key, GroupKey::Draft) {
            continue;
        }
        for category in &props.group.categories {
            let style = if category.hidden || props.group.hidden {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(Span::styled(
                format!("    {}", category.name),
                style,
            )));
        }
        if app.groups.new_category_for() == Some(key) {
            overlays.new_category = Some(lines.len());
            lines.push(Line::from(""));
        }
    }

    let visible = inner.height as usize;
    let offset = {
        let scroll = &mut app.shell.providers_mut().scroll;
        scroll.follow(selected_line, visible);
        scroll.offset()
    };

    frame.render_widget(
        Paragraph::new(lines).block(block).scroll((offset as u16, 0)),
        area,
    );

    let row_area = |line: usize, indent: u16| -> Option<Rect> {
        let y = line.checked_sub(offset)?;
        (y < visible).then(|| {
            Rect::new(
                inner.x + indent,
                inner.y + y as u16,
                inner.width.saturating_sub(indent),
                1,
            )
        })
    };

    if let Some((line, column)) = overlays.editor {
        if app.input_mode == InputMode::EditingGroup {
            if let Some(rect) = row_area(line, column) {
                frame.render_widget(app.name_input.clone(), rect);
            }
        }
    }
    if let Some(line) = overlays.new_category {
        if app.input_mode == InputMode::NewCategory {
            if let Some(rect) = row_area(line, 4) {
                frame.render_widget(app.name_input.clone(), rect);
            }
        }
    }
    if let Some((line, labels)) = overlays.menu {
        if let Some(anchor) = row_area(line, 0) {
            let menu = PopupMenu::new(&labels, app.groups.menu_cursor());
            let menu_area = menu.area(anchor, inner);
            frame.render_widget(menu, menu_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_labels_cross_year() {
        let first = NaiveDate::from_ymd_opt(2026, 11, 15).unwrap();
        assert_eq!(
            month_labels(first, 3),
            vec!["Nov 2026", "Dec 2026", "Jan 2027"]
        );
    }
}
