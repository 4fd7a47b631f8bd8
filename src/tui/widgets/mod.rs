//! Reusable widgets for the TUI

pub mod input;
pub mod menu;
pub mod notification;

pub use input::TextInput;
pub use menu::PopupMenu;
pub use notification::NotificationWidget;
