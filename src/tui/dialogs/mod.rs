//! Dialog modules for the TUI

pub mod account;
pub mod help;
pub mod notes;
