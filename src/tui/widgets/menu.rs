//! Popup menu widget
//!
//! A bordered list of labelled items with one highlighted entry, drawn over
//! whatever is underneath.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

pub struct PopupMenu<'a> {
    items: &'a [&'a str],
    selected: usize,
    title: &'a str,
}

impl<'a> PopupMenu<'a> {
    pub fn new(items: &'a [&'a str], selected: usize) -> Self {
        Self {
            items,
            selected,
            title: "",
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Size of the popup including borders
    pub fn size(&self) -> (u16, u16) {
        let widest = self
            .items
            .iter()
            .map(|item| item.chars().count())
            .chain(std::iter::once(self.title.chars().count()))
            .max()
            .unwrap_or(0) as u16;
        (widest + 6, self.items.len() as u16 + 2)
    }

    /// Place the popup just below `anchor`, kept inside `bounds`
    pub fn area(&self, anchor: Rect, bounds: Rect) -> Rect {
        let (width, height) = self.size();
        let width = width.min(bounds.width);
        let height = height.min(bounds.height);
        let right = bounds.x + bounds.width;
        let bottom = bounds.y + bounds.height;

        let x = anchor
            .x
            .saturating_add(anchor.width)
            .saturating_sub(width)
            .max(bounds.x)
            .min(right.saturating_sub(width));
        let below = anchor.y.saturating_add(1);
        let y = if below + height <= bottom {
            below
        } else {
            bottom.saturating_sub(height).max(bounds.y)
        };
        Rect::new(x, y, width, height)
    }
}

impl Widget for PopupMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if i == self.selected {
                    Line::from(Span::styled(
                        format!("> {}", item),
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(format!("  {}", item))
                }
            })
            .collect();

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        if !self.title.is_empty() {
            block = block.title(format!(" {} ", self.title));
        }

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_sized_to_longest_item() {
        let items = ["Add category", "Hide", "Rename", "Delete"];
        let menu = PopupMenu::new(&items, 0);
        assert_eq!(menu.size(), (18, 6));
    }

    #[test]
    fn test_menu_flips_above_when_no_room() {
        let items = ["Rename", "Delete"];
        let menu = PopupMenu::new(&items, 0);
        let bounds = Rect::new(0, 0, 40, 10);
        let area = menu.area(Rect::new(0, 8, 40, 1), bounds);
        assert_eq!(area.y + area.height, 10);
        assert_eq!(area.x + area.width, 40);
    }
}
