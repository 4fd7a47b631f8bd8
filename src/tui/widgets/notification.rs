//! Toast notification widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::notifications::{Notification, NotificationKind};

/// Border color for a notification kind
pub fn kind_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Info => Color::Blue,
        NotificationKind::Success => Color::Green,
        NotificationKind::Warning => Color::Yellow,
        NotificationKind::Error => Color::Red,
        NotificationKind::Message => Color::Magenta,
    }
}

fn kind_icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "i",
        NotificationKind::Success => "+",
        NotificationKind::Warning => "!",
        NotificationKind::Error => "x",
        NotificationKind::Message => "*",
    }
}

fn kind_title(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "Info",
        NotificationKind::Success => "Success",
        NotificationKind::Warning => "Warning",
        NotificationKind::Error => "Error",
        NotificationKind::Message => "Message",
    }
}

/// Rows needed to show a notification, borders included
pub fn notification_height(notification: &Notification) -> u16 {
    let mut rows = 3;
    if notification.button.is_some() {
        rows += 1;
    }
    if notification.sticky {
        rows += 1;
    }
    rows
}

/// Widget for rendering a notification
pub struct NotificationWidget<'a> {
    notification: &'a Notification,
}

impl<'a> NotificationWidget<'a> {
    pub fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }
}

impl Widget for NotificationWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let n = self.notification;
        let color = kind_color(n.kind);
        let title = n.title.as_deref().unwrap_or(kind_title(n.kind));

        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} {} ", kind_icon(n.kind), title))
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

        let mut lines = vec![Line::from(n.message.as_str())];
        if let Some(button) = &n.button {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", button.title),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    button.url.as_str(),
                    Style::default().add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
        if n.sticky {
            lines.push(Line::from(Span::styled(
                "Press x to dismiss",
                Style::default().fg(Color::DarkGray),
            )));
        }

        Paragraph::new(lines)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_colors() {
        assert_eq!(kind_color(NotificationKind::Info), Color::Blue);
        assert_eq!(kind_color(NotificationKind::Error), Color::Red);
        assert_eq!(kind_color(NotificationKind::Message), Color::Magenta);
    }

    #[test]
    fn test_height_grows_with_button() {
        let plain = Notification::info("Saved");
        let prompt = Notification::new("Version 9.0.0", NotificationKind::Message)
            .with_button("Open changelog", "https://example.org")
            .sticky();
        assert_eq!(notification_height(&plain), 3);
        assert_eq!(notification_height(&prompt), 5);
    }

    #[test]
    fn test_render_uses_custom_title() {
        let n = Notification::new("Version 9.0.0", NotificationKind::Message)
            .with_title("A new version is available!");
        let area = Rect::new(0, 0, 50, 3);
        let mut buf = Buffer::empty(area);
        NotificationWidget::new(&n).render(area, &mut buf);

        let top: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(top.contains("A new version is available!"));
    }
}
