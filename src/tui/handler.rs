//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the current
//! application state. Global shortcuts only fire while the app keyboard
//! scope is active.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::budget::GroupRowEvent;
use crate::shell::{Screen, APP_SCOPE};

use super::app::{ActiveDialog, App, FocusedPanel, InputMode, NAV_ITEMS};
use super::event::Event;
use super::widgets::TextInput;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Resize(width, _) => {
            app.resize(width);
            Ok(())
        }
        Event::Tick => Ok(()),
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    if app.has_dialog() {
        return handle_dialog_key(app, key);
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::EditingGroup => handle_group_name_key(app, key),
        InputMode::NewCategory => handle_new_category_key(app, key),
        InputMode::GoTo => handle_goto_key(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    // Open menus and drags capture every key
    if app.groups.open_menu().is_some() {
        handle_menu_key(app, key);
        return Ok(());
    }
    if app.is_dragging() {
        handle_drag_key(app, key);
        return Ok(());
    }

    if app.shell.key_scope().is_active(APP_SCOPE) && handle_global_key(app, key) {
        return Ok(());
    }

    match app.focused_panel {
        FocusedPanel::Sidebar => handle_sidebar_key(app, key),
        FocusedPanel::Main => handle_main_panel_key(app, key),
    }
    Ok(())
}

/// Returns true when the key was consumed
fn handle_global_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),
        KeyCode::Char(':') => app.open_goto(),
        KeyCode::Tab => app.toggle_panel_focus(),
        KeyCode::Char('b') | KeyCode::Backspace => app.back(),
        KeyCode::Char('x') => app.dismiss_notification(),
        KeyCode::Char('s') => app.toggle_sidebar(),
        KeyCode::Char('n') => app.navigate("/transactions/new"),
        KeyCode::Char(c) => match NAV_ITEMS.iter().position(|(k, _, _)| *k == c) {
            Some(index) => {
                app.selected_nav_index = index;
                app.open_selected_nav();
            }
            None => return false,
        },
        _ => return false,
    }
    true
}

/// Handle keys when the sidebar is focused
fn handle_sidebar_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_nav_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_nav_selection(-1),
        KeyCode::Enter => {
            app.open_selected_nav();
            app.focused_panel = FocusedPanel::Main;
        }
        _ => {}
    }
}

/// Handle keys when the main panel is focused
fn handle_main_panel_key(app: &mut App, key: KeyEvent) {
    match app.current_screen() {
        Some(Screen::Budget) => handle_budget_key(app, key),
        Some(Screen::Accounts) | Some(Screen::Account { .. }) => handle_accounts_key(app, key),
        _ => {}
    }
}

fn handle_budget_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.groups.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.groups.select_prev(),
        KeyCode::Char(' ') => {
            app.dispatch_group(GroupRowEvent::ClickBody);
        }
        KeyCode::Enter => {
            app.dispatch_group(GroupRowEvent::RowEnter);
        }
        KeyCode::Char('m') => {
            app.dispatch_group(GroupRowEvent::ClickMenuButton);
        }
        KeyCode::Char('N') => {
            app.dispatch_group(GroupRowEvent::ClickNotes);
        }
        KeyCode::Char('A') => app.add_group(),
        KeyCode::Char('d') => app.begin_drag(),
        _ => {}
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.groups.move_menu_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.groups.move_menu_cursor(-1),
        KeyCode::Enter => {
            if let Some(item) = app.groups.menu_selection() {
                app.dispatch_group(GroupRowEvent::SelectMenu(item));
            }
        }
        KeyCode::Esc | KeyCode::Char('m') => {
            app.dispatch_group(GroupRowEvent::CloseMenu);
        }
        _ => {}
    }
}

fn handle_drag_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.drag_hover(1),
        KeyCode::Char('k') | KeyCode::Up => app.drag_hover(-1),
        KeyCode::Enter | KeyCode::Char('d') => app.drop_drag(),
        KeyCode::Esc => app.cancel_drag(),
        _ => {}
    }
}

fn handle_accounts_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_account_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_account_selection(-1),
        KeyCode::Enter => app.open_selected_account(),
        KeyCode::Char('a') => app.open_dialog(ActiveDialog::AddAccount),
        _ => {}
    }
}

/// Standard editing keys shared by every text field
pub fn edit_input(input: &mut TextInput, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_start(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
}

fn handle_group_name_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Enter => app.commit_group_name(),
        KeyCode::Esc => app.blur_group_name(),
        _ => edit_input(&mut app.name_input, key),
    }
    Ok(())
}

fn handle_new_category_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Enter => app.add_category(),
        KeyCode::Esc => app.cancel_new_category(),
        _ => edit_input(&mut app.name_input, key),
    }
    Ok(())
}

fn handle_goto_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Enter => app.submit_goto(),
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        _ => edit_input(&mut app.goto_input, key),
    }
    Ok(())
}

/// Handle keys when a dialog is open
fn handle_dialog_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match &app.active_dialog {
        ActiveDialog::Help | ActiveDialog::Notes(_) => app.close_dialog(),
        ActiveDialog::AddAccount => super::dialogs::account::handle_key(app, key),
        ActiveDialog::None => {}
    }
    Ok(())
}
