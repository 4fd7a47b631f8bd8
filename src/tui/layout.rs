//! Layout definitions for the TUI
//!
//! Wide terminals pin the sidebar next to the main panel. Narrow ones give
//! the main panel the full width, float the sidebar over it when opened and
//! show a row of navigation tabs at the bottom on the top-level screens.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::shell::providers::{SidebarState, SIDEBAR_WIDTH};

/// Layout regions for the TUI
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub titlebar: Rect,
    /// Pinned sidebar, absent when hidden or floating
    pub sidebar: Option<Rect>,
    pub main: Rect,
    pub nav_tabs: Option<Rect>,
    pub status_bar: Rect,
    /// Sidebar drawn on top of the main panel
    pub floating_sidebar: Option<Rect>,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect, sidebar: SidebarState, nav_tabs: bool) -> Self {
        let tabs_height = if nav_tabs { 1 } else { 0 };
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),           // Titlebar
                Constraint::Min(3),              // Body
                Constraint::Length(tabs_height), // Nav tabs
                Constraint::Length(1),           // Status bar
            ])
            .split(area);

        let body = vertical[1];
        let reserved = sidebar.reserved_width();
        let (pinned, main) = if reserved > 0 && body.width > reserved {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(reserved), Constraint::Min(20)])
                .split(body);
            (Some(horizontal[0]), horizontal[1])
        } else {
            (None, body)
        };

        let floating_sidebar = (sidebar.visible && sidebar.floating).then(|| {
            Rect::new(
                body.x,
                body.y,
                SIDEBAR_WIDTH.min(body.width),
                body.height,
            )
        });

        Self {
            titlebar: vertical[0],
            sidebar: pinned,
            main,
            nav_tabs: nav_tabs.then_some(vertical[2]),
            status_bar: vertical[3],
            floating_sidebar,
        }
    }

    /// Where the sidebar is drawn, pinned or floating
    pub fn sidebar_area(&self) -> Option<Rect> {
        self.sidebar.or(self.floating_sidebar)
    }
}

/// Layout for the sidebar
pub struct SidebarLayout {
    pub navigation: Rect,
    pub accounts: Rect,
}

impl SidebarLayout {
    pub fn new(area: Rect, nav_items: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(nav_items + 2), // Navigation
                Constraint::Min(3),                // Accounts
            ])
            .split(area);

        Self {
            navigation: chunks[0],
            accounts: chunks[1],
        }
    }
}

/// Layout for the main panel header
pub struct MainPanelLayout {
    /// Header area (title, month columns for the budget)
    pub header: Rect,
    pub content: Rect,
}

impl MainPanelLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Content
            ])
            .split(area);

        Self {
            header: chunks[0],
            content: chunks[1],
        }
    }
}

/// Create a centered rect for dialogs
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sidebar(floating: bool, visible: bool) -> SidebarState {
        SidebarState { floating, visible }
    }

    #[test]
    fn test_wide_layout_pins_sidebar() {
        let layout = AppLayout::new(Rect::new(0, 0, 120, 40), sidebar(false, true), false);
        let pinned = layout.sidebar.unwrap();
        assert_eq!(pinned.width, SIDEBAR_WIDTH);
        assert_eq!(layout.main.x, SIDEBAR_WIDTH);
        assert!(layout.nav_tabs.is_none());
        assert!(layout.floating_sidebar.is_none());
    }

    #[test]
    fn test_narrow_layout_with_tabs() {
        let layout = AppLayout::new(Rect::new(0, 0, 60, 30), sidebar(true, false), true);
        assert!(layout.sidebar.is_none());
        assert_eq!(layout.main.width, 60);
        assert_eq!(layout.nav_tabs.unwrap().height, 1);
        assert_eq!(layout.status_bar.y, 29);
    }

    #[test]
    fn test_floating_sidebar_overlays_main() {
        let layout = AppLayout::new(Rect::new(0, 0, 60, 30), sidebar(true, true), false);
        assert_eq!(layout.main.width, 60);
        assert_eq!(layout.sidebar_area(), layout.floating_sidebar);
        assert!(layout.floating_sidebar.is_some());
    }

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let r = centered_rect_fixed(80, 10, Rect::new(0, 0, 40, 20));
        assert_eq!(r.width, 40);
        assert_eq!(r.y, 5);
    }
}
