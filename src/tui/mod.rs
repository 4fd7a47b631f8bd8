//! Terminal User Interface module
//!
//! Hosts the application shell in a ratatui terminal: the budget sidebar,
//! the accounts list, and the screens the router picks.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub mod keybindings;

pub use app::App;
pub use terminal::run_tui;
